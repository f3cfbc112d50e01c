use super::state::ComparisonState;
use crate::compare::{ComparisonRequest, ComparisonResult, ComparisonService, FileSlot, SelectedFile};
use crate::error::CompareError;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

type Outcome = Result<ComparisonResult, CompareError>;

struct InFlight {
    handle: JoinHandle<()>,
    receiver: Receiver<Outcome>,
}

/// Turns a button press into a comparison request and its outcome into
/// a [`ComparisonState`]. At most one request is in flight at a time.
pub struct UploadController {
    service: Arc<dyn ComparisonService>,
    runtime: Runtime,
    file1: Option<SelectedFile>,
    file2: Option<SelectedFile>,
    state: ComparisonState,
    in_flight: Option<InFlight>,
}

impl UploadController {
    pub fn new(service: Arc<dyn ComparisonService>) -> std::io::Result<Self> {
        Ok(Self {
            service,
            runtime: Runtime::new()?,
            file1: None,
            file2: None,
            state: ComparisonState::default(),
            in_flight: None,
        })
    }

    pub fn state(&self) -> &ComparisonState {
        &self.state
    }

    pub fn file(&self, slot: FileSlot) -> Option<&SelectedFile> {
        match slot {
            FileSlot::First => self.file1.as_ref(),
            FileSlot::Second => self.file2.as_ref(),
        }
    }

    pub fn select_file(&mut self, slot: FileSlot, path: impl Into<PathBuf>) {
        let file = SelectedFile::from_path(path);
        debug!(slot = slot.field_name(), file = %file.name, "file selected");
        *self.slot_mut(slot) = Some(file);
    }

    pub fn clear_file(&mut self, slot: FileSlot) {
        *self.slot_mut(slot) = None;
    }

    fn slot_mut(&mut self, slot: FileSlot) -> &mut Option<SelectedFile> {
        match slot {
            FileSlot::First => &mut self.file1,
            FileSlot::Second => &mut self.file2,
        }
    }

    /// `on_complete` runs on the runtime once the outcome is ready to poll.
    pub fn start_compare<F>(&mut self, on_complete: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.in_flight.is_some() {
            debug!("comparison already in flight; ignoring activation");
            return;
        }

        let request =
            match ComparisonRequest::from_selection(self.file1.as_ref(), self.file2.as_ref()) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "comparison not started");
                    self.state = ComparisonState::failed(&e);
                    return;
                }
            };

        info!(file1 = %request.file1.name, file2 = %request.file2.name, "starting comparison");
        self.state = ComparisonState::Loading;

        let (sender, receiver) = mpsc::channel();
        let service = Arc::clone(&self.service);
        let handle = self.runtime.spawn(async move {
            let outcome = service.compare(request).await;
            let _ = sender.send(outcome);
            on_complete();
        });

        self.in_flight = Some(InFlight { handle, receiver });
    }

    /// Applies a finished outcome, if any. Returns whether the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(in_flight) = &self.in_flight else {
            return false;
        };

        let outcome = match in_flight.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                error!("comparison task ended without reporting an outcome");
                Err(CompareError::Interrupted)
            }
        };
        self.in_flight = None;

        self.state = match outcome {
            Ok(result) => ComparisonState::succeeded(&result),
            Err(e) => ComparisonState::failed(&e),
        };
        true
    }

    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
            info!("comparison cancelled");
            self.state = ComparisonState::Idle;
        }
    }

    pub fn reset(&mut self) {
        self.cancel();
        self.file1 = None;
        self.file2 = None;
        self.state = ComparisonState::Idle;
    }
}
