use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub const SUBMIT_LABEL: &str = "Get recommendations";
pub const SUBMITTING_LABEL: &str = "Analyzing recommendations...";

/// UI-level flag guarding the submit action
///
/// Clones share the same flag so a rendering layer can hold one while the
/// controller holds another.
#[derive(Debug, Clone, Default)]
pub struct SubmitGate {
    in_flight: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the submit capability, or `None` while a submission is in flight
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit {
                in_flight: self.in_flight.clone(),
            })
    }

    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::Acquire)
    }

    /// Button text for the current gate state
    pub fn label(&self) -> &'static str {
        if self.is_enabled() {
            SUBMIT_LABEL
        } else {
            SUBMITTING_LABEL
        }
    }
}

/// Held for the duration of one submission; re-enables submit when dropped
#[derive(Debug)]
pub struct SubmitPermit {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_permit_at_a_time() {
        let gate = SubmitGate::new();
        let permit = gate.try_acquire();
        assert!(permit.is_some());
        assert!(gate.try_acquire().is_none());
        assert!(!gate.is_enabled());
        assert_eq!(gate.label(), SUBMITTING_LABEL);
    }

    #[test]
    fn test_drop_releases_permit() {
        let gate = SubmitGate::new();
        {
            let _permit = gate.try_acquire().unwrap();
            assert!(!gate.is_enabled());
        }
        assert!(gate.is_enabled());
        assert_eq!(gate.label(), SUBMIT_LABEL);
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_released_on_early_return() {
        fn fail_while_holding(gate: &SubmitGate) -> Result<(), &'static str> {
            let _permit = gate.try_acquire().ok_or("busy")?;
            Err("request failed")
        }

        let gate = SubmitGate::new();
        assert_eq!(fail_while_holding(&gate), Err("request failed"));
        assert!(gate.is_enabled());
    }

    #[test]
    fn test_clones_share_state() {
        let gate = SubmitGate::new();
        let view = gate.clone();
        let _permit = gate.try_acquire().unwrap();
        assert!(!view.is_enabled());
    }
}
