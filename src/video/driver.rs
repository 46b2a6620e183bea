//! Generation job driver: submit, poll, fetch, materialize.

use crate::error::{Result, StudioError};
use crate::video::artifact::ArtifactStore;
use crate::video::service::{ApiKey, GenerationService, SubmitPayload, VideoFetcher};
use crate::video::types::{GeneratedArtifact, GenerationRequest, Operation, VideoMetadata};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// MIME type of the videos the service produces.
const VIDEO_MIME_TYPE: &str = "video/mp4";

/// Where a generation job is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// Sending the request.
    Submitting,
    /// Waiting for the remote job to finish; `attempt` counts status checks.
    Polling {
        /// Status checks performed so far.
        attempt: u32,
    },
    /// Downloading the result.
    Fetching,
    /// Finished with an artifact.
    Complete,
    /// Finished with an error.
    Failed {
        /// Error message.
        message: String,
    },
}

impl JobState {
    /// Returns true for `Complete` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed { .. })
    }
}

/// How long to keep waiting for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed wait between status checks.
    pub interval: Duration,
    /// Give up after this many status checks.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since submission.
    pub max_wait: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: None,
            max_wait: Some(Duration::from_secs(600)),
        }
    }
}

impl PollPolicy {
    /// Polls every 5 seconds with no limit.
    pub fn unbounded() -> Self {
        Self {
            max_wait: None,
            ..Self::default()
        }
    }

    /// Sets the wait between status checks.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Caps the number of status checks.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Caps the total wait.
    pub fn max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = Some(wait);
        self
    }
}

type StateObserver = Arc<dyn Fn(&JobState) + Send + Sync>;

/// Per-invocation controls: cancellation and state reporting.
#[derive(Clone, Default)]
pub struct JobContext {
    cancel: CancellationToken,
    observer: Option<StateObserver>,
}

impl JobContext {
    /// A context that is never cancelled and reports nowhere.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `token` for cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Calls `observer` on every state transition.
    pub fn on_state(mut self, observer: impl Fn(&JobState) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// The cancellation token.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    fn report(&self, state: JobState) {
        if let Some(observer) = &self.observer {
            observer(&state);
        }
    }

    /// Runs `fut` unless the token fires first.
    async fn guard<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StudioError::Cancelled),
            res = fut => res,
        }
    }
}

impl fmt::Debug for JobContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobContext")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// Runs one generation request through its whole lifecycle.
///
/// The driver keeps no per-invocation state and can be shared; concurrent
/// invocations are the caller's business (see
/// [`GenerationRegistry`](crate::video::GenerationRegistry)).
pub struct GenerationDriver<S, F> {
    service: S,
    fetcher: F,
    store: ArtifactStore,
    api_key: ApiKey,
    policy: PollPolicy,
}

impl<S, F> GenerationDriver<S, F>
where
    S: GenerationService,
    F: VideoFetcher,
{
    /// Creates a driver. `api_key` is appended to result URIs when fetching.
    pub fn new(service: S, fetcher: F, store: ArtifactStore, api_key: ApiKey) -> Self {
        Self {
            service,
            fetcher,
            store,
            api_key,
            policy: PollPolicy::default(),
        }
    }

    /// Replaces the poll policy.
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The poll policy in effect.
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// The store artifacts are materialized into.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// The remote service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs `request` to completion.
    pub async fn run(&self, request: &GenerationRequest) -> Result<GeneratedArtifact> {
        self.run_with(request, &JobContext::new()).await
    }

    /// Runs `request` with cancellation and state reporting.
    pub async fn run_with(
        &self,
        request: &GenerationRequest,
        ctx: &JobContext,
    ) -> Result<GeneratedArtifact> {
        let result = self.drive(request, ctx).await;
        match &result {
            Ok(artifact) => {
                ctx.report(JobState::Complete);
                tracing::info!(
                    url = %artifact.local_url,
                    size_bytes = artifact.size_bytes,
                    duration_ms = artifact.metadata.duration_ms,
                    "video generation complete"
                );
            }
            Err(e) => {
                ctx.report(JobState::Failed {
                    message: e.to_string(),
                });
                tracing::warn!("video generation failed: {e}");
            }
        }
        result
    }

    async fn drive(&self, request: &GenerationRequest, ctx: &JobContext) -> Result<GeneratedArtifact> {
        let start = Instant::now();

        ctx.report(JobState::Submitting);
        let payload = SubmitPayload::from_request(request);
        let operation = ctx.guard(self.service.submit(&payload)).await?;
        tracing::debug!(operation = %operation.name, "submitted video generation request");

        let (operation, attempts) = self.poll(operation, start, ctx).await?;
        let uri = result_uri(&operation)?;

        ctx.report(JobState::Fetching);
        let url = with_key_param(uri, &self.api_key)?;
        let fetched = ctx.guard(self.fetcher.fetch(&url)).await?;
        if !fetched.status.is_success() {
            return Err(StudioError::Download {
                status: fetched.status.as_u16(),
                reason: fetched
                    .status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let settings = request.settings();
        let metadata = VideoMetadata {
            model: Some(self.service.model_id().to_string()),
            duration_ms: Some(start.elapsed().as_millis() as u64),
            poll_attempts: attempts,
            resolution: Some(settings.resolution),
            aspect_ratio: Some(settings.aspect_ratio),
        };
        Ok(self
            .store
            .materialize(fetched.body, VIDEO_MIME_TYPE, metadata))
    }

    /// Waits for `operation` to finish. Returns it with the number of checks made.
    async fn poll(
        &self,
        mut operation: Operation,
        start: Instant,
        ctx: &JobContext,
    ) -> Result<(Operation, u32)> {
        let mut attempts = 0u32;
        ctx.report(JobState::Polling { attempt: 0 });

        while !operation.done {
            if let Some(err) = operation.error.take() {
                return Err(StudioError::Generation(err));
            }
            let out_of_attempts = self.policy.max_attempts.is_some_and(|max| attempts >= max);
            let out_of_time = self
                .policy
                .max_wait
                .is_some_and(|max| start.elapsed() + self.policy.interval > max);
            if out_of_attempts || out_of_time {
                return Err(StudioError::Timeout {
                    waited: start.elapsed(),
                    attempts,
                });
            }

            ctx.guard(async {
                tokio::time::sleep(self.policy.interval).await;
                Ok(())
            })
            .await?;

            operation = ctx.guard(self.service.refresh(&operation)).await?;
            attempts += 1;
            if !operation.done {
                ctx.report(JobState::Polling { attempt: attempts });
            }
            tracing::debug!(
                operation = %operation.name,
                attempt = attempts,
                elapsed_secs = start.elapsed().as_secs(),
                done = operation.done,
                "polling video generation"
            );
        }

        Ok((operation, attempts))
    }
}

/// Picks the first video URI of a finished operation.
fn result_uri(operation: &Operation) -> Result<&str> {
    if let Some(err) = &operation.error {
        return Err(StudioError::Generation(err.clone()));
    }
    if let Some(uri) = operation.first_video_uri() {
        return Ok(uri);
    }
    if operation.filtered_count > 0 {
        return Err(StudioError::ContentBlocked(
            "Video was filtered by Veo safety filters".into(),
        ));
    }
    Err(StudioError::MissingResult)
}

/// Appends the API key as a percent-encoded `key` query parameter.
pub(crate) fn with_key_param(uri: &str, api_key: &ApiKey) -> Result<String> {
    let mut url =
        reqwest::Url::parse(uri).map_err(|_| StudioError::UnsupportedUri(uri.to_string()))?;
    url.query_pairs_mut().append_pair("key", api_key.expose());
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::service::FetchedVideo;
    use crate::video::types::{AspectRatio, GenerationSettings, Resolution};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves scripted operation states: the first on submit, the rest on refresh.
    struct ScriptedService {
        script: Mutex<VecDeque<Operation>>,
        submitted: Mutex<Vec<SubmitPayload>>,
        refreshes: Mutex<u32>,
        fail_submit: bool,
        fail_refresh: bool,
    }

    impl ScriptedService {
        fn new(script: impl IntoIterator<Item = Operation>) -> Self {
            Self {
                script: Mutex::new(script.into_iter().collect()),
                submitted: Mutex::new(Vec::new()),
                refreshes: Mutex::new(0),
                fail_submit: false,
                fail_refresh: false,
            }
        }

        fn next(&self) -> Operation {
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                script.front().cloned().unwrap()
            }
        }

        fn refresh_count(&self) -> u32 {
            *self.refreshes.lock().unwrap()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn submit(&self, payload: &SubmitPayload) -> Result<Operation> {
            if self.fail_submit {
                return Err(StudioError::Submission {
                    status: Some(400),
                    message: "Invalid prompt".into(),
                });
            }
            self.submitted.lock().unwrap().push(payload.clone());
            Ok(self.next())
        }

        async fn refresh(&self, _operation: &Operation) -> Result<Operation> {
            *self.refreshes.lock().unwrap() += 1;
            if self.fail_refresh {
                return Err(StudioError::Api {
                    status: 503,
                    message: "Service unavailable".into(),
                });
            }
            Ok(self.next())
        }

        fn model_id(&self) -> &str {
            "veo-test"
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    struct StubFetcher {
        status: StatusCode,
        body: Vec<u8>,
        urls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn ok(body: &[u8]) -> Self {
            Self::with_status(StatusCode::OK, body)
        }

        fn with_status(status: StatusCode, body: &[u8]) -> Self {
            Self {
                status,
                body: body.to_vec(),
                urls: Mutex::new(Vec::new()),
            }
        }

        fn urls(&self) -> Vec<String> {
            self.urls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedVideo> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(FetchedVideo {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    const URI: &str = "https://generativelanguage.googleapis.com/v1beta/files/abc:download?alt=media";

    fn request() -> GenerationRequest {
        GenerationRequest::new(
            "A cat on a skateboard".into(),
            None,
            GenerationSettings::new(AspectRatio::Landscape, Resolution::Hd),
        )
    }

    fn driver(
        service: &Arc<ScriptedService>,
        fetcher: &Arc<StubFetcher>,
    ) -> GenerationDriver<Arc<ScriptedService>, Arc<StubFetcher>> {
        GenerationDriver::new(
            Arc::clone(service),
            Arc::clone(fetcher),
            ArtifactStore::new(),
            ApiKey::new("test-key"),
        )
    }

    fn recording_context() -> (JobContext, Arc<Mutex<Vec<JobState>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let ctx = JobContext::new().on_state(move |s| sink.lock().unwrap().push(s.clone()));
        (ctx, log)
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_wait_cycles_then_fetch() {
        let service = Arc::new(ScriptedService::new([
            Operation::pending("operations/1"),
            Operation::pending("operations/1"),
            Operation::finished("operations/1", [URI.to_string()]),
        ]));
        let fetcher = Arc::new(StubFetcher::ok(b"video-bytes"));
        let driver = driver(&service, &fetcher);

        let start = Instant::now();
        let artifact = driver.run(&request()).await.unwrap();

        assert_eq!(start.elapsed(), Duration::from_secs(10));
        assert_eq!(service.refresh_count(), 2);
        assert_eq!(artifact.metadata.poll_attempts, 2);
        assert_eq!(artifact.size_bytes, 11);
        assert_eq!(
            driver.store().resolve(&artifact.local_url).unwrap().as_slice(),
            b"video-bytes"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_path_state_sequence() {
        let service = Arc::new(ScriptedService::new([Operation::finished(
            "operations/2",
            [URI.to_string()],
        )]));
        let fetcher = Arc::new(StubFetcher::ok(b"mp4"));
        let driver = driver(&service, &fetcher);
        let (ctx, log) = recording_context();

        let artifact = driver.run_with(&request(), &ctx).await.unwrap();

        assert!(!artifact.local_url.is_empty());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                JobState::Submitting,
                JobState::Polling { attempt: 0 },
                JobState::Fetching,
                JobState::Complete,
            ]
        );
        assert_eq!(artifact.metadata.model.as_deref(), Some("veo-test"));
        assert_eq!(artifact.metadata.resolution, Some(Resolution::Hd));
    }

    #[tokio::test(start_paused = true)]
    async fn test_polling_states_are_reported() {
        let service = Arc::new(ScriptedService::new([
            Operation::pending("operations/3"),
            Operation::finished("operations/3", [URI.to_string()]),
        ]));
        let fetcher = Arc::new(StubFetcher::ok(b"mp4"));
        let (ctx, log) = recording_context();

        driver(&service, &fetcher)
            .run_with(&request(), &ctx)
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                JobState::Submitting,
                JobState::Polling { attempt: 0 },
                JobState::Fetching,
                JobState::Complete,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_results_is_missing_result_without_fetch() {
        let service = Arc::new(ScriptedService::new([Operation::finished(
            "operations/4",
            Vec::new(),
        )]));
        let fetcher = Arc::new(StubFetcher::ok(b"never"));
        let (ctx, log) = recording_context();

        let err = driver(&service, &fetcher)
            .run_with(&request(), &ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, StudioError::MissingResult));
        assert!(fetcher.urls().is_empty());
        assert_eq!(
            log.lock().unwrap().last(),
            Some(&JobState::Failed {
                message: "No video URI returned from the API.".into()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_filtered_result_is_content_blocked() {
        let mut op = Operation::finished("operations/5", Vec::new());
        op.filtered_count = 1;
        let service = Arc::new(ScriptedService::new([op]));
        let fetcher = Arc::new(StubFetcher::ok(b"never"));

        let err = driver(&service, &fetcher).run(&request()).await.unwrap_err();
        assert!(matches!(err, StudioError::ContentBlocked(_)));
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_download_failure_carries_reason_phrase() {
        let service = Arc::new(ScriptedService::new([Operation::finished(
            "operations/6",
            [URI.to_string()],
        )]));
        let fetcher = Arc::new(StubFetcher::with_status(StatusCode::FORBIDDEN, b""));
        let driver = driver(&service, &fetcher);

        let err = driver.run(&request()).await.unwrap_err();
        match err {
            StudioError::Download { status, reason } => {
                assert_eq!(status, 403);
                assert_eq!(reason, "Forbidden");
            }
            other => panic!("expected Download, got {other:?}"),
        }
        assert!(driver.store().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_credential_appended_to_fetch_url() {
        let service = Arc::new(ScriptedService::new([Operation::finished(
            "operations/7",
            [URI.to_string()],
        )]));
        let fetcher = Arc::new(StubFetcher::ok(b"mp4"));

        driver(&service, &fetcher).run(&request()).await.unwrap();

        assert_eq!(fetcher.urls(), vec![format!("{URI}&key=test-key")]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_error_surfaces_as_is() {
        let mut scripted = ScriptedService::new([Operation::pending("unused")]);
        scripted.fail_submit = true;
        let service = Arc::new(scripted);
        let fetcher = Arc::new(StubFetcher::ok(b""));

        let err = driver(&service, &fetcher).run(&request()).await.unwrap_err();
        assert!(matches!(err, StudioError::Submission { status: Some(400), .. }));
        assert_eq!(service.refresh_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_error_ends_job_without_retry() {
        let mut scripted = ScriptedService::new([Operation::pending("operations/13")]);
        scripted.fail_refresh = true;
        let service = Arc::new(scripted);
        let fetcher = Arc::new(StubFetcher::ok(b""));
        let driver = driver(&service, &fetcher).with_poll_policy(PollPolicy::unbounded());
        let (ctx, log) = recording_context();

        let err = driver.run_with(&request(), &ctx).await.unwrap_err();

        assert!(matches!(err, StudioError::Api { status: 503, .. }));
        assert_eq!(service.refresh_count(), 1);
        assert!(fetcher.urls().is_empty());
        assert!(matches!(
            log.lock().unwrap().last(),
            Some(JobState::Failed { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_multiple_polls_report_each_attempt() {
        let service = Arc::new(ScriptedService::new([
            Operation::pending("operations/14"),
            Operation::pending("operations/14"),
            Operation::finished("operations/14", [URI.to_string()]),
        ]));
        let fetcher = Arc::new(StubFetcher::ok(b"mp4"));
        let (ctx, log) = recording_context();

        driver(&service, &fetcher)
            .run_with(&request(), &ctx)
            .await
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                JobState::Submitting,
                JobState::Polling { attempt: 0 },
                JobState::Polling { attempt: 1 },
                JobState::Fetching,
                JobState::Complete,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_remote_operation_error() {
        let mut failed = Operation::pending("operations/8");
        failed.done = true;
        failed.error = Some("Quota exceeded".into());
        let service = Arc::new(ScriptedService::new([
            Operation::pending("operations/8"),
            failed,
        ]));
        let fetcher = Arc::new(StubFetcher::ok(b""));

        let err = driver(&service, &fetcher).run(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "video generation failed: Quota exceeded");
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_attempts_times_out() {
        let service = Arc::new(ScriptedService::new([Operation::pending("operations/9")]));
        let fetcher = Arc::new(StubFetcher::ok(b""));
        let driver = driver(&service, &fetcher)
            .with_poll_policy(PollPolicy::unbounded().max_attempts(3));

        let err = driver.run(&request()).await.unwrap_err();
        match err {
            StudioError::Timeout { attempts, waited } => {
                assert_eq!(attempts, 3);
                assert_eq!(waited, Duration::from_secs(15));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
        assert_eq!(service.refresh_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_wait_times_out() {
        let service = Arc::new(ScriptedService::new([Operation::pending("operations/10")]));
        let fetcher = Arc::new(StubFetcher::ok(b""));
        let driver = driver(&service, &fetcher).with_poll_policy(
            PollPolicy::unbounded()
                .interval(Duration::from_secs(5))
                .max_wait(Duration::from_secs(12)),
        );

        let err = driver.run(&request()).await.unwrap_err();
        assert!(matches!(err, StudioError::Timeout { attempts: 2, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_wait() {
        let service = Arc::new(ScriptedService::new([Operation::pending("operations/11")]));
        let fetcher = Arc::new(StubFetcher::ok(b""));
        let driver = driver(&service, &fetcher).with_poll_policy(PollPolicy::unbounded());

        let token = CancellationToken::new();
        let ctx = JobContext::new().with_cancellation(token.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            token.cancel();
        });

        let start = Instant::now();
        let err = driver.run_with(&request(), &ctx).await.unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(err, StudioError::Cancelled));
        assert_eq!(start.elapsed(), Duration::from_secs(12));
        assert_eq!(service.refresh_count(), 2);
        assert!(fetcher.urls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pre_cancelled_token_never_submits() {
        let service = Arc::new(ScriptedService::new([Operation::pending("operations/12")]));
        let fetcher = Arc::new(StubFetcher::ok(b""));
        let token = CancellationToken::new();
        token.cancel();
        let ctx = JobContext::new().with_cancellation(token);

        let err = driver(&service, &fetcher)
            .run_with(&request(), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::Cancelled));
        assert!(service.submitted.lock().unwrap().is_empty());
    }

    #[test]
    fn test_with_key_param() {
        let key = ApiKey::new("k");
        assert_eq!(with_key_param("https://a/b", &key).unwrap(), "https://a/b?key=k");
        assert_eq!(
            with_key_param("https://a/b?alt=media", &key).unwrap(),
            "https://a/b?alt=media&key=k"
        );
    }

    #[test]
    fn test_with_key_param_encodes_key() {
        let key = ApiKey::new("a+b/c&d");
        assert_eq!(
            with_key_param("https://a/b?alt=media", &key).unwrap(),
            "https://a/b?alt=media&key=a%2Bb%2Fc%26d"
        );
        assert!(matches!(
            with_key_param("not a url", &key).unwrap_err(),
            StudioError::UnsupportedUri(_)
        ));
    }

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.interval, Duration::from_secs(5));
        assert_eq!(policy.max_wait, Some(Duration::from_secs(600)));
        assert_eq!(policy.max_attempts, None);
        assert_eq!(PollPolicy::unbounded().max_wait, None);
    }
}
