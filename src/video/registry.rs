//! Concurrent generations keyed by id.

use crate::error::{Result, StudioError};
use crate::video::driver::{GenerationDriver, JobContext, JobState};
use crate::video::service::{GenerationService, VideoFetcher};
use crate::video::types::{GeneratedArtifact, GenerationRequest};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use uuid::Uuid;

/// Identifies one generation started through a [`GenerationRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationId(Uuid);

impl GenerationId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

struct Entry {
    cancel: CancellationToken,
    state: watch::Receiver<JobState>,
    task: JoinHandle<Result<GeneratedArtifact>>,
}

/// Runs generations as tokio tasks and tracks them by id.
///
/// Every started generation must be [`join`](Self::join)ed or
/// [`forget`](Self::forget)ten. Until then its entry, and any artifact it
/// produced, stay alive.
pub struct GenerationRegistry<S, F> {
    driver: Arc<GenerationDriver<S, F>>,
    entries: Mutex<HashMap<GenerationId, Entry>>,
}

impl<S, F> GenerationRegistry<S, F>
where
    S: GenerationService + 'static,
    F: VideoFetcher + 'static,
{
    /// Creates a registry running jobs on `driver`.
    pub fn new(driver: Arc<GenerationDriver<S, F>>) -> Self {
        Self {
            driver,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The shared driver.
    pub fn driver(&self) -> &Arc<GenerationDriver<S, F>> {
        &self.driver
    }

    /// Starts `request` in the background.
    pub fn start(&self, request: GenerationRequest) -> GenerationId {
        let id = GenerationId::new();
        let cancel = CancellationToken::new();
        let (tx, state) = watch::channel(JobState::Submitting);
        let ctx = JobContext::new()
            .with_cancellation(cancel.clone())
            .on_state(move |s| {
                tx.send_replace(s.clone());
            });

        let driver = Arc::clone(&self.driver);
        let span = tracing::info_span!("generation", %id);
        let task = tokio::spawn(
            async move { driver.run_with(&request, &ctx).await }.instrument(span),
        );

        self.lock().insert(id, Entry { cancel, state, task });
        tracing::debug!(%id, "generation started");
        id
    }

    /// Latest state of a generation.
    pub fn state(&self, id: GenerationId) -> Option<JobState> {
        self.lock().get(&id).map(|e| e.state.borrow().clone())
    }

    /// Receiver that sees every state change of a generation.
    pub fn subscribe(&self, id: GenerationId) -> Option<watch::Receiver<JobState>> {
        self.lock().get(&id).map(|e| e.state.clone())
    }

    /// Requests cancellation. Returns false for unknown ids.
    pub fn cancel(&self, id: GenerationId) -> bool {
        match self.lock().get(&id) {
            Some(entry) => {
                entry.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Waits for a generation and removes it from the registry.
    pub async fn join(&self, id: GenerationId) -> Result<GeneratedArtifact> {
        let entry = self
            .lock()
            .remove(&id)
            .ok_or_else(|| StudioError::UnknownJob(id.to_string()))?;

        match entry.task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(StudioError::Cancelled),
            Err(e) => Err(StudioError::Generation(format!("generation task panicked: {e}"))),
        }
    }

    /// Cancels a generation, removes it, and revokes any artifact it produced.
    ///
    /// Returns false for unknown ids.
    pub async fn forget(&self, id: GenerationId) -> bool {
        let Some(entry) = self.lock().remove(&id) else {
            return false;
        };
        entry.cancel.cancel();
        if let Ok(Ok(artifact)) = entry.task.await {
            self.driver.store().revoke(&artifact.local_url);
        }
        tracing::debug!(%id, "generation forgotten");
        true
    }

    /// Number of generations started and not yet joined.
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    /// Ids of generations started and not yet joined.
    pub fn ids(&self) -> Vec<GenerationId> {
        self.lock().keys().copied().collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<GenerationId, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S, F> Drop for GenerationRegistry<S, F> {
    fn drop(&mut self) {
        let entries = self.entries.get_mut().unwrap_or_else(|p| p.into_inner());
        for entry in entries.values() {
            entry.cancel.cancel();
        }
    }
}
