use std::sync::Arc;

use crate::{
    error::{BackendResult, RecommendationError, SessionError, SessionResult},
    models::{Catalog, ItemId},
    services::{
        providers::{CatalogStore, HealthProbe, RecommendationClient},
        selection::{SlotIndex, SlotOption},
    },
    view::ResultsView,
};

use super::{Effect, Session, SessionEvent, SessionState, SubmitGate, SubmitPermit};

const SUBMISSION_CANCELLED: &str = "submission cancelled";

/// Drives a [`Session`] against the backend
///
/// Load order is fixed: the health probe must succeed before the catalog is
/// requested, and the catalog must be loaded before any selection is possible.
pub struct SessionController {
    health: Arc<dyn HealthProbe>,
    catalog_store: Arc<dyn CatalogStore>,
    recommender: Arc<dyn RecommendationClient>,
    session: Session,
    submit_gate: SubmitGate,
}

impl SessionController {
    pub fn new(
        health: Arc<dyn HealthProbe>,
        catalog_store: Arc<dyn CatalogStore>,
        recommender: Arc<dyn RecommendationClient>,
    ) -> Self {
        Self {
            health,
            catalog_store,
            recommender,
            session: Session::new(),
            submit_gate: SubmitGate::new(),
        }
    }

    /// Uses one backend for all three contracts
    pub fn with_backend<B>(backend: Arc<B>) -> Self
    where
        B: HealthProbe + CatalogStore + RecommendationClient + 'static,
    {
        Self::new(backend.clone(), backend.clone(), backend)
    }

    /// Shares an externally held submit gate, e.g. one owned by a renderer
    pub fn with_submit_gate(mut self, submit_gate: SubmitGate) -> Self {
        self.submit_gate = submit_gate;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn submit_gate(&self) -> &SubmitGate {
        &self.submit_gate
    }

    /// Runs the health probe and catalog load, ending in `Ready` or `Error`
    pub async fn start(&mut self) -> SessionResult<&SessionState> {
        if *self.session.state() != SessionState::Loading {
            return Err(SessionError::IllegalTransition {
                state: self.session.state().name(),
                event: "Start",
            });
        }

        let event = match self.load_catalog().await {
            Ok(catalog) => SessionEvent::Loaded(catalog),
            Err(err) => SessionEvent::LoadFailed(err),
        };
        self.session.apply(event)?;

        Ok(self.session.state())
    }

    async fn load_catalog(&self) -> BackendResult<Catalog> {
        self.health.check().await?;
        self.catalog_store.load().await
    }

    pub fn set_slot(&mut self, slot: SlotIndex, item: Option<ItemId>) -> SessionResult<()> {
        self.session
            .apply(SessionEvent::SlotChanged { slot, item })
            .map(|_| ())
    }

    pub fn available_options_for(&self, slot: SlotIndex) -> SessionResult<Vec<SlotOption<'_>>> {
        self.session
            .coordinator()
            .map(|coordinator| coordinator.available_options_for(slot))
            .ok_or(SessionError::NotLoaded)
    }

    /// Submits the current selection and waits for the outcome
    ///
    /// Ends in `Results` on success or back in `Ready` on failure. The submit
    /// gate is released and `Submitting` is left on every path, including when
    /// the returned future is dropped before the backend answers.
    pub async fn submit(&mut self) -> SessionResult<&SessionState> {
        let permit = self
            .submit_gate
            .try_acquire()
            .ok_or(SessionError::SubmitInFlight)?;

        let payload = match self.session.apply(SessionEvent::SubmitRequested)? {
            Some(Effect::Submit(payload)) => payload,
            None => return Err(SessionError::NotLoaded),
        };
        let in_flight = InFlightSubmit {
            session: &mut self.session,
            _permit: permit,
        };

        tracing::info!(
            selected = payload.selected_movies.len(),
            "Requesting recommendations"
        );

        let event = match self.recommender.submit(&payload.selected_movies).await {
            Ok(data) => SessionEvent::SubmitSucceeded(data),
            Err(err) => SessionEvent::SubmitFailed(err),
        };
        in_flight.finish(event)?;

        Ok(self.session.state())
    }

    /// Leaves the results screen and clears all slots
    pub fn back(&mut self) -> SessionResult<()> {
        self.session.apply(ResultsView::back()).map(|_| ())
    }

    pub fn dismiss_notice(&mut self) {
        self.session.dismiss_notice();
    }
}

/// One submission between `SubmitRequested` and its outcome
///
/// Dropping it unfinished applies a cancellation failure, so the session
/// returns to `Ready` before the permit re-enables submit.
struct InFlightSubmit<'a> {
    session: &'a mut Session,
    _permit: SubmitPermit,
}

impl InFlightSubmit<'_> {
    fn finish(mut self, event: SessionEvent) -> SessionResult<()> {
        self.session.apply(event).map(|_| ())
    }
}

impl Drop for InFlightSubmit<'_> {
    fn drop(&mut self) {
        if *self.session.state() == SessionState::Submitting {
            tracing::warn!("Submission dropped before the backend answered");
            let cancelled = SessionEvent::SubmitFailed(RecommendationError::Transport(
                SUBMISSION_CANCELLED.to_string(),
            ));
            if let Err(err) = self.session.apply(cancelled) {
                tracing::error!(error = %err, "Failed to leave Submitting after cancellation");
            }
        }
    }
}
