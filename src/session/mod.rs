pub mod context;
pub mod state;
pub mod controller;

pub use context::{Dashboard, Session};
pub use controller::{AnalysisOutcome, SessionController};
pub use state::{AnalysisModal, AnalysisPhase, SessionStatus, ViewState};
