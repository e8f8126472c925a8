pub mod user;
pub mod repository;
pub mod context;

pub use user::*;
pub use repository::*;
pub use context::*;
