//! Presentation state machine for conversion submissions.
//!
//! `Empty -> Loading -> Success | Error`, restarting at `Loading` for every
//! new submission. The state lives in a `watch` channel so any number of
//! observers see the latest value.
//!
//! A newer submission replaces an older one still in flight: the older task is
//! aborted and, since abort only lands at an await point, every resolution is
//! also checked against a generation counter under the channel's lock before
//! it is written.

use crate::core::{
    ConversionRequest, ConvertTemperatureOperation, PresentationState, TemperatureGateway,
};
use crate::utils::error::{ConvertError, ErrorSeverity, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct TemperaturePresenter<G: TemperatureGateway + 'static> {
    operation: Arc<ConvertTemperatureOperation<G>>,
    state: Arc<watch::Sender<PresentationState>>,
    generation: Arc<AtomicU64>,
    // severity behind the current `Error` state; the state itself only keeps the message
    last_failure: Arc<Mutex<Option<ErrorSeverity>>>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
    closed: AtomicBool,
}

impl<G: TemperatureGateway + 'static> TemperaturePresenter<G> {
    pub fn new(operation: ConvertTemperatureOperation<G>) -> Self {
        let (state, _) = watch::channel(PresentationState::Empty);
        Self {
            operation: Arc::new(operation),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            last_failure: Arc::new(Mutex::new(None)),
            in_flight: Mutex::new(None),
            closed: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PresentationState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> PresentationState {
        self.state.borrow().clone()
    }

    /// Severity of the failure behind the current `Error` state, if any.
    pub fn last_failure_severity(&self) -> Option<ErrorSeverity> {
        *lock_ignoring_poison(&self.last_failure)
    }

    /// Starts a conversion. The state is `Loading` by the time this returns.
    ///
    /// Blank input is rejected with the state left as it was, and so is a call
    /// made outside a tokio runtime.
    pub fn submit(&self, fahrenheit: &str) -> Result<()> {
        let request = ConversionRequest::new(fahrenheit)?;
        let runtime = Handle::try_current().map_err(|_| ConvertError::RuntimeUnavailable)?;

        let mut in_flight = lock_ignoring_poison(&self.in_flight);
        // checked under the lock so a concurrent close() cannot slip in between
        if self.closed.load(Ordering::SeqCst) {
            return Err(ConvertError::ScopeClosed);
        }

        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Superseding in-flight conversion");
            }
            previous.abort();
        }
        *lock_ignoring_poison(&self.last_failure) = None;
        self.state.send_replace(PresentationState::Loading);

        let operation = Arc::clone(&self.operation);
        let state = Arc::clone(&self.state);
        let generation = Arc::clone(&self.generation);
        let last_failure = Arc::clone(&self.last_failure);

        *in_flight = Some(runtime.spawn(async move {
            let outcome = operation.execute(&request).await;
            let severity = match &outcome {
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Conversion failed: {} (Severity: {:?})", e, e.severity());
                    Some(e.severity())
                }
            };
            let next = PresentationState::from_outcome(outcome);

            state.send_if_modified(|current| {
                if generation.load(Ordering::SeqCst) != ticket {
                    return false;
                }
                *lock_ignoring_poison(&last_failure) = severity;
                *current = next;
                true
            });
        }));

        Ok(())
    }

    /// Ends the scope: the pending call is abandoned and no further state
    /// transition is published. Idempotent.
    pub fn close(&self) {
        let mut in_flight = lock_ignoring_poison(&self.in_flight);
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        if let Some(handle) = in_flight.take() {
            handle.abort();
        }
        tracing::debug!("Presenter closed");
    }
}

fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<G: TemperatureGateway + 'static> Drop for TemperaturePresenter<G> {
    fn drop(&mut self) {
        self.close();
    }
}
