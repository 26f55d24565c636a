// Pipeline worker - Single background lane for harvest runs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::harvest_interactor::HarvestInteractor;
use crate::domain::errors::DomainError;
use crate::domain::model::{HarvestRequest, RunSummary};
use crate::error::{ClipKitError, ClipKitResult};
use crate::ports::ProgressPort;

/// Completion channel handed back by [`PipelineWorker::submit`]
pub type Completion = oneshot::Receiver<Result<RunSummary, DomainError>>;

struct Job {
    request: HarvestRequest,
    reply: oneshot::Sender<Result<RunSummary, DomainError>>,
}

/// Runs one harvest at a time on a dedicated task.
///
/// While a run is in flight further submissions are refused, which is the
/// state an interactive shell mirrors by disabling its triggers.
pub struct PipelineWorker {
    sender: mpsc::Sender<Job>,
    busy: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PipelineWorker {
    /// Spawn the worker task on the current tokio runtime
    pub fn spawn(harvester: Arc<HarvestInteractor>, progress: Arc<dyn ProgressPort>) -> Self {
        let (sender, mut receiver) = mpsc::channel::<Job>(1);
        let busy = Arc::new(AtomicBool::new(false));
        let task_busy = Arc::clone(&busy);

        let handle = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                debug!("Worker starting harvest for {}", job.request.channel);
                let result = harvester
                    .execute_with_progress(&job.request, progress.as_ref())
                    .await;
                task_busy.store(false, Ordering::SeqCst);
                if job.reply.send(result).is_err() {
                    debug!("Harvest result dropped; submitter went away");
                }
            }
            debug!("Worker queue closed");
        });

        Self {
            sender,
            busy,
            handle,
        }
    }

    /// Whether a run is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Queue a harvest run
    pub fn submit(&self, request: HarvestRequest) -> ClipKitResult<Completion> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ClipKitError::WorkerBusy);
        }

        let (reply, completion) = oneshot::channel();
        if self.sender.try_send(Job { request, reply }).is_err() {
            self.busy.store(false, Ordering::SeqCst);
            return Err(ClipKitError::WorkerStopped);
        }
        Ok(completion)
    }

    /// Submit and wait for the result
    pub async fn run(&self, request: HarvestRequest) -> ClipKitResult<RunSummary> {
        let completion = self.submit(request)?;
        let summary = completion.await.map_err(|_| ClipKitError::WorkerStopped)??;
        Ok(summary)
    }

    /// Close the queue and wait for the in-flight run, if any, to finish
    pub async fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.handle.await {
            debug!("Worker task ended abnormally: {}", e);
        }
    }
}
