//! Merge session
//!
//! The application context owned by a window. It keeps the dispatcher,
//! runs each dispatch on a worker thread so the caller stays responsive,
//! and allows at most one unresolved attempt at a time.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::executor::MergeExecutor;
use crate::request::{FailureKind, MergeRequest, MergeResult};

const WORKER_LOST_MESSAGE: &str = "Merge worker stopped without reporting a result";

pub struct MergeSession<E> {
    dispatcher: Arc<Dispatcher<E>>,
    in_flight: Option<Receiver<MergeResult>>,
}

impl<E: MergeExecutor + 'static> MergeSession<E> {
    pub fn new(dispatcher: Dispatcher<E>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            in_flight: None,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<E> {
        &self.dispatcher
    }

    /// Whether an attempt has been started and not yet collected
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start dispatching `request` in the background.
    ///
    /// Fails with [`Error::Busy`] while a previous attempt is unresolved.
    pub fn begin(&mut self, request: MergeRequest) -> Result<()> {
        if self.is_busy() {
            tracing::debug!("ignoring merge request while another is in flight");
            return Err(Error::Busy);
        }

        let (tx, rx) = bounded(1);
        let dispatcher = Arc::clone(&self.dispatcher);
        thread::Builder::new()
            .name("merge-dispatch".to_string())
            .spawn(move || {
                let result = dispatcher.dispatch(&request);
                // The receiver only goes away with the session itself
                let _ = tx.send(result);
            })?;

        self.in_flight = Some(rx);
        Ok(())
    }

    /// Collect the result of the in-flight attempt if it has resolved
    pub fn poll(&mut self) -> Option<MergeResult> {
        let outcome = self.in_flight.as_ref()?.try_recv();
        match outcome {
            Ok(result) => {
                self.in_flight = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.in_flight = None;
                Some(worker_lost())
            }
        }
    }

    /// Block up to `timeout` for the in-flight attempt to resolve
    pub fn wait(&mut self, timeout: Duration) -> Option<MergeResult> {
        let outcome = self.in_flight.as_ref()?.recv_timeout(timeout);
        match outcome {
            Ok(result) => {
                self.in_flight = None;
                Some(result)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.in_flight = None;
                Some(worker_lost())
            }
        }
    }
}

fn worker_lost() -> MergeResult {
    tracing::error!("{}", WORKER_LOST_MESSAGE);
    MergeResult::error(FailureKind::ExecutorFailure, WORKER_LOST_MESSAGE)
}
