use crate::session::context::Session;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionStatus {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Analyzing,
}

/// The analysis result dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisModal {
    pub open: bool,
    pub title: String,
    pub phase: AnalysisPhase,
    pub result: Option<String>,
    /// Ticket of the request whose result this modal is waiting for.
    pub(crate) active_ticket: Option<u64>,
}

impl AnalysisModal {
    pub fn is_analyzing(&self) -> bool {
        self.phase == AnalysisPhase::Analyzing
    }
}

/// All state behind the view. The credential outlives failed logins and logouts;
/// it is only ever held in memory.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub status: SessionStatus,
    pub login_error: Option<String>,
    pub(crate) credential: Option<String>,
    pub modal: AnalysisModal,
    pub(crate) last_ticket: u64,
}

impl ViewState {
    pub fn session(&self) -> Option<&Session> {
        match &self.status {
            SessionStatus::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticating)
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub(crate) fn open_modal(&mut self, title: String) -> u64 {
        self.last_ticket += 1;
        self.modal = AnalysisModal {
            open: true,
            title,
            phase: AnalysisPhase::Analyzing,
            result: None,
            active_ticket: Some(self.last_ticket),
        };
        self.last_ticket
    }

    /// Stores `text` if `ticket` still owns the modal. Returns whether it was stored.
    pub(crate) fn finish_analysis(&mut self, ticket: u64, text: String) -> bool {
        if !self.modal.open || self.modal.active_ticket != Some(ticket) {
            return false;
        }
        self.modal.phase = AnalysisPhase::Idle;
        self.modal.result = Some(text);
        self.modal.active_ticket = None;
        true
    }

    pub(crate) fn close_modal(&mut self) {
        self.modal = AnalysisModal::default();
    }
}
