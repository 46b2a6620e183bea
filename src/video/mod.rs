//! Video generation: composing requests, driving jobs, holding results.

mod artifact;
mod compose;
mod driver;
pub mod progress;
mod registry;
mod service;
mod types;
mod veo;

pub use artifact::ArtifactStore;
pub use compose::{compose, normalize_prompt, ImageSource, SOUND_DIRECTIVE};
pub use driver::{GenerationDriver, JobContext, JobState, PollPolicy};
pub use progress::ProgressTicker;
pub use registry::{GenerationId, GenerationRegistry};
pub use service::{
    ApiKey, FetchedVideo, GenerationService, SubmitConfig, SubmitPayload, VideoFetcher,
};
pub use types::{
    AspectRatio, GeneratedArtifact, GenerationRequest, GenerationSettings, Operation,
    ReferenceImage, Resolution, VideoMetadata, VideoRef,
};
pub use veo::{VeoClient, VeoClientBuilder, VeoModel, DEFAULT_BASE_URL};
