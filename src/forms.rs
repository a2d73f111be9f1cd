/// Lifecycle of a single form submission.
///
/// `Idle -> Submitting -> Success | Failed`, and back to `Idle` once the
/// operator has seen the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPhase<R, E> {
    Idle,
    Submitting,
    Success(R),
    Failed(E),
}

impl<R, E> Default for FormPhase<R, E> {
    fn default() -> Self {
        FormPhase::Idle
    }
}

impl<R, E> FormPhase<R, E> {
    /// Enter `Submitting`. Returns `None` while a submission is already in flight.
    ///
    /// The phase only leaves `Submitting` through the returned handle; if the
    /// handle is dropped unsettled (the submitting future was cancelled) the
    /// form goes back to `Idle`.
    pub fn begin(&mut self) -> Option<InFlight<'_, R, E>> {
        if self.is_submitting() {
            return None;
        }
        *self = FormPhase::Submitting;
        Some(InFlight {
            phase: self,
            settled: false,
        })
    }

    /// Leave a terminal state. A no-op while idle or submitting.
    pub fn acknowledge(&mut self) {
        if matches!(self, FormPhase::Success(_) | FormPhase::Failed(_)) {
            *self = FormPhase::Idle;
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, FormPhase::Submitting)
    }

    pub fn result(&self) -> Option<&R> {
        match self {
            FormPhase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            FormPhase::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// A submission in progress
#[derive(Debug)]
pub struct InFlight<'a, R, E> {
    phase: &'a mut FormPhase<R, E>,
    settled: bool,
}

impl<R, E> InFlight<'_, R, E> {
    pub fn succeed(mut self, result: R) {
        *self.phase = FormPhase::Success(result);
        self.settled = true;
    }

    pub fn fail(mut self, error: E) {
        *self.phase = FormPhase::Failed(error);
        self.settled = true;
    }
}

impl<R, E> Drop for InFlight<'_, R, E> {
    fn drop(&mut self) {
        if !self.settled {
            *self.phase = FormPhase::Idle;
        }
    }
}
