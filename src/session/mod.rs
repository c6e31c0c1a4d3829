//! Session state machine: `Loading → Ready ⇄ Submitting → Results → Ready`.
//!
//! [`Session::apply`] is the single reducer. It performs no I/O; network work
//! is requested through the returned [`Effect`] and carried out by
//! [`SessionController`].

use std::sync::Arc;

use crate::{
    error::{BackendError, RecommendationError, SessionError, SessionResult},
    models::{Catalog, ItemId, RankedResult, SubmissionPayload},
    services::selection::{SelectionCoordinator, SlotIndex},
    view::{DisplayModel, ResultsView},
};

mod controller;
mod gate;

pub use controller::SessionController;
pub use gate::{SubmitGate, SubmitPermit, SUBMITTING_LABEL, SUBMIT_LABEL};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Loading,
    /// Terminal; the session has to be restarted
    Error(BackendError),
    Ready,
    Submitting,
    Results(RankedResult),
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Loading => "Loading",
            SessionState::Error(_) => "Error",
            SessionState::Ready => "Ready",
            SessionState::Submitting => "Submitting",
            SessionState::Results(_) => "Results",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Loaded(Catalog),
    LoadFailed(BackendError),
    SlotChanged {
        slot: SlotIndex,
        item: Option<ItemId>,
    },
    SubmitRequested,
    SubmitSucceeded(RankedResult),
    SubmitFailed(RecommendationError),
    BackRequested,
    NoticeDismissed,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Loaded(_) => "Loaded",
            SessionEvent::LoadFailed(_) => "LoadFailed",
            SessionEvent::SlotChanged { .. } => "SlotChanged",
            SessionEvent::SubmitRequested => "SubmitRequested",
            SessionEvent::SubmitSucceeded(_) => "SubmitSucceeded",
            SessionEvent::SubmitFailed(_) => "SubmitFailed",
            SessionEvent::BackRequested => "BackRequested",
            SessionEvent::NoticeDismissed => "NoticeDismissed",
        }
    }
}

/// Work the reducer asks its driver to perform
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Submit(SubmissionPayload),
}

/// Everything one browser-style session holds
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    coordinator: Option<SelectionCoordinator>,
    display: Option<DisplayModel>,
    notice: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Loading,
            coordinator: None,
            display: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Present once the catalog has loaded
    pub fn coordinator(&self) -> Option<&SelectionCoordinator> {
        self.coordinator.as_ref()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.coordinator.as_ref().map(SelectionCoordinator::catalog)
    }

    /// Rendered results while in `Results`
    pub fn display(&self) -> Option<&DisplayModel> {
        self.display.as_ref()
    }

    /// Dismissible message from the last failed submission
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Clears the notice; allowed in every state
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn coordinator_mut(&mut self) -> SessionResult<&mut SelectionCoordinator> {
        self.coordinator.as_mut().ok_or(SessionError::NotLoaded)
    }

    /// Applies one event, returning any network work it requires
    pub fn apply(&mut self, event: SessionEvent) -> SessionResult<Option<Effect>> {
        let from = self.state.name();
        let event_name = event.name();

        let effect = match event {
            SessionEvent::Loaded(catalog) if self.state == SessionState::Loading => {
                tracing::info!(items = catalog.len(), "Catalog ready for selection");
                self.coordinator = Some(SelectionCoordinator::new(Arc::new(catalog)));
                self.state = SessionState::Ready;
                None
            }
            SessionEvent::LoadFailed(err) if self.state == SessionState::Loading => {
                tracing::error!(error = %err, "Session failed to load");
                self.state = SessionState::Error(err);
                None
            }
            SessionEvent::SlotChanged { slot, item }
                if matches!(self.state, SessionState::Ready | SessionState::Submitting) =>
            {
                self.coordinator_mut()?.set_slot(slot, item);
                None
            }
            SessionEvent::SubmitRequested if self.state == SessionState::Ready => {
                let payload = self.coordinator_mut()?.submission_payload();
                self.notice = None;
                self.state = SessionState::Submitting;
                Some(Effect::Submit(payload))
            }
            SessionEvent::SubmitSucceeded(data) if self.state == SessionState::Submitting => {
                self.display = Some(ResultsView::render(&data));
                self.state = SessionState::Results(data);
                None
            }
            SessionEvent::SubmitFailed(err) if self.state == SessionState::Submitting => {
                tracing::warn!(error = %err, "Submission failed; selection kept");
                self.notice = Some(err.to_string());
                self.state = SessionState::Ready;
                None
            }
            SessionEvent::BackRequested if matches!(self.state, SessionState::Results(_)) => {
                self.coordinator_mut()?.reset();
                self.display = None;
                self.state = SessionState::Ready;
                None
            }
            SessionEvent::NoticeDismissed => {
                self.dismiss_notice();
                None
            }
            _ => {
                tracing::warn!(state = from, event = event_name, "Rejected session event");
                return Err(SessionError::IllegalTransition {
                    state: from,
                    event: event_name,
                });
            }
        };

        let to = self.state.name();
        if from != to {
            tracing::info!(from, to, event = event_name, "Session transition");
        }

        Ok(effect)
    }
}
