#![warn(missing_docs)]
//! Veo Studio - prompt and image to video generation with Google Veo.
//!
//! A generation goes through four steps: compose the request, submit it,
//! poll the long-running operation, then fetch the result bytes into an
//! in-memory [`ArtifactStore`] that hands out local `blob:` URLs.
//!
//! # Quick Start
//!
//! ```no_run
//! use veo_studio::{
//!     compose, ApiKey, ArtifactStore, GenerationDriver, GenerationSettings, VeoClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> veo_studio::Result<()> {
//!     let key = ApiKey::new(std::env::var("GOOGLE_API_KEY").unwrap_or_default());
//!     let client = VeoClient::builder().api_key(key.clone()).build()?;
//!     let driver = GenerationDriver::new(client.clone(), client, ArtifactStore::new(), key);
//!
//!     let request = compose("A cat playing with a ball", None, GenerationSettings::default()).await?;
//!     let video = driver.run(&request).await?;
//!     driver.store().save(&video.local_url, "cat.mp4").await?;
//!     driver.store().revoke(&video.local_url);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `veo-studio` command-line interface

mod error;

pub mod config;
pub mod video;

// Re-export error types at crate root
pub use error::{ErrorKind, Result, StudioError};

pub use config::StudioConfig;
pub use video::{
    compose, normalize_prompt, ApiKey, ArtifactStore, AspectRatio, GeneratedArtifact,
    GenerationDriver, GenerationId, GenerationRegistry, GenerationRequest, GenerationService,
    GenerationSettings, ImageSource, JobContext, JobState, PollPolicy, ProgressTicker,
    Resolution, VeoClient, VeoClientBuilder, VeoModel, VideoFetcher, VideoMetadata,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{Result, StudioError};
    pub use crate::video::{
        compose, ApiKey, ArtifactStore, GeneratedArtifact, GenerationDriver, GenerationService,
        GenerationSettings, ImageSource, VeoClient, VideoFetcher,
    };
}
