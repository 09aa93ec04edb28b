use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument, warn};

use domain::blob::{BlobEntry, BlobName, BlobVersion, ImageBlob};
use photo_reducer_application::{
    error::{AppError, AppResult},
    infrastructure_config::{StorageConfig, TriggerConfig},
    ports::{incoming::thumbnails::ThumbnailUseCase, outgoing::blob_store::DynBlobStorePort},
};

#[derive(Debug, Clone)]
pub struct StoragePollPolicy {
    pub input_container: String,
    pub output_container: String,
    pub poll_interval: Duration,
    pub max_concurrent_invocations: usize,
}

impl StoragePollPolicy {
    pub fn from_config(storage: &StorageConfig, trigger: &TriggerConfig) -> Self {
        Self {
            input_container: storage.input_container.clone(),
            output_container: storage.output_container.clone(),
            poll_interval: trigger.poll_interval(),
            max_concurrent_invocations: trigger.max_concurrent_invocations,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub discovered: usize,
    pub skipped: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl SweepReport {
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.succeeded + self.failed
    }
}

#[derive(Default)]
struct TriggerState {
    in_flight: HashSet<BlobName>,
    poisoned: HashMap<BlobName, BlobVersion>,
}

enum Invocation {
    Succeeded,
    Failed,
}

struct TriggerInner {
    policy: StoragePollPolicy,
    blob_store: DynBlobStorePort,
    use_case: Arc<dyn ThumbnailUseCase>,
    permits: Semaphore,
    state: Mutex<TriggerState>,
}

/// Watches the input container and invokes the thumbnail use case once per
/// new blob, writing the result to the output container under the same name.
///
/// A blob counts as handled once its thumbnail exists. A blob whose content
/// cannot be turned into a thumbnail is poisoned at the version that failed
/// and skipped until it is uploaded again. Storage and task failures are not
/// remembered, so the next sweep retries them.
#[derive(Clone)]
pub struct StoragePollTrigger {
    inner: Arc<TriggerInner>,
}

impl StoragePollTrigger {
    pub fn new(
        policy: StoragePollPolicy,
        blob_store: DynBlobStorePort,
        use_case: Arc<dyn ThumbnailUseCase>,
    ) -> Self {
        let permits = Semaphore::new(
            policy
                .max_concurrent_invocations
                .clamp(1, Semaphore::MAX_PERMITS),
        );
        Self {
            inner: Arc::new(TriggerInner {
                policy,
                blob_store,
                use_case,
                permits,
                state: Mutex::new(TriggerState::default()),
            }),
        }
    }

    #[must_use]
    pub fn is_poisoned(&self, name: &BlobName) -> bool {
        self.inner.lock_state().poisoned.contains_key(name)
    }

    /// Lists the input container once and waits for every invocation it
    /// started.
    #[instrument(skip(self))]
    pub async fn run_once(&self) -> AppResult<SweepReport> {
        let inner = &self.inner;
        let entries = inner.blob_store.list(&inner.policy.input_container).await?;

        let mut report = SweepReport {
            discovered: entries.len(),
            ..SweepReport::default()
        };
        let mut invocations = JoinSet::new();

        for entry in entries {
            let name = &entry.name;
            if !inner.claim(&entry) {
                report.skipped += 1;
                continue;
            }

            match inner
                .blob_store
                .exists(&inner.policy.output_container, name)
                .await
            {
                Ok(false) => {}
                Ok(true) => {
                    inner.release(name);
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(blob_name = %name, "Cannot check for existing thumbnail: {}", e);
                    inner.release(name);
                    report.skipped += 1;
                    continue;
                }
            }

            let task_inner = Arc::clone(inner);
            invocations.spawn(async move { task_inner.invoke(entry).await });
        }

        while let Some(joined) = invocations.join_next().await {
            match joined {
                Ok(Invocation::Succeeded) => report.succeeded += 1,
                Ok(Invocation::Failed) => report.failed += 1,
                Err(e) => {
                    error!("Invocation task aborted: {}", e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Sweeps on every poll interval until `shutdown` resolves. A sweep in
    /// progress is allowed to finish.
    pub async fn run<F>(&self, shutdown: F) -> AppResult<()>
    where
        F: Future<Output = ()> + Send,
    {
        let policy = &self.inner.policy;
        info!(
            "Watching '{}' for new blobs, thumbnails go to '{}'",
            policy.input_container, policy.output_container
        );

        let mut ticker = interval(policy.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Storage trigger stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(report) if report.invoked() > 0 => info!(
                            "Sweep finished: {} succeeded, {} failed, {} skipped",
                            report.succeeded, report.failed, report.skipped
                        ),
                        Ok(report) => debug!("Sweep found nothing new ({} blobs)", report.discovered),
                        Err(e) => error!("Storage sweep failed: {}", e),
                    }
                }
            }
        }
    }
}

impl TriggerInner {
    fn lock_state(&self) -> MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim(&self, entry: &BlobEntry) -> bool {
        let mut state = self.lock_state();
        if state.poisoned.get(&entry.name) == Some(&entry.version) {
            return false;
        }
        state.in_flight.insert(entry.name.clone())
    }

    fn release(&self, name: &BlobName) {
        self.lock_state().in_flight.remove(name);
    }

    fn settle(&self, name: &BlobName) {
        let mut state = self.lock_state();
        state.in_flight.remove(name);
        state.poisoned.remove(name);
    }

    fn poison(&self, entry: BlobEntry) {
        let mut state = self.lock_state();
        state.in_flight.remove(&entry.name);
        state.poisoned.insert(entry.name, entry.version);
    }

    async fn invoke(&self, entry: BlobEntry) -> Invocation {
        let name = &entry.name;
        let outcome = match self.permits.acquire().await {
            Ok(_permit) => self.deliver(name).await,
            Err(e) => Err(AppError::TaskError {
                message: format!("Invocation slots closed: {e}"),
            }),
        };

        match outcome {
            Ok(()) => {
                self.settle(name);
                Invocation::Succeeded
            }
            Err(e) if e.is_content_failure() => {
                warn!(blob_name = %name, error = %e, "Invocation failed, skipping blob until it is uploaded again");
                self.poison(entry);
                Invocation::Failed
            }
            Err(e) => {
                warn!(blob_name = %name, error = %e, "Invocation failed, retrying on the next sweep");
                self.release(name);
                Invocation::Failed
            }
        }
    }

    async fn deliver(&self, name: &BlobName) -> AppResult<()> {
        let bytes = self
            .blob_store
            .read(&self.policy.input_container, name)
            .await?;

        let result = self
            .use_case
            .process(ImageBlob::new(name.clone(), bytes))
            .await?;

        self.blob_store
            .write(&self.policy.output_container, name, result.bytes())
            .await
    }
}
