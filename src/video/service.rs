//! Remote collaborator traits: the generation service and the byte fetcher.

use crate::error::Result;
use crate::video::types::{
    AspectRatio, GenerationRequest, Operation, ReferenceImage, Resolution,
};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Service credential, passed explicitly to whatever needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the key is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Output configuration sent with every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Always 1.
    pub number_of_videos: u32,
    /// Requested resolution.
    pub resolution: Resolution,
    /// Requested aspect ratio.
    pub aspect_ratio: AspectRatio,
}

/// What gets submitted. The shape depends on whether an image was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPayload {
    /// Prompt only.
    TextToVideo {
        /// Prompt text.
        prompt: String,
        /// Output configuration.
        config: SubmitConfig,
    },
    /// Prompt plus a starting frame.
    ImageToVideo {
        /// Prompt text, possibly empty.
        prompt: String,
        /// Encoded reference image.
        image: ReferenceImage,
        /// Output configuration.
        config: SubmitConfig,
    },
}

impl SubmitPayload {
    /// Builds the payload for a composed request.
    pub fn from_request(request: &GenerationRequest) -> Self {
        let settings = request.settings();
        let config = SubmitConfig {
            number_of_videos: 1,
            resolution: settings.resolution,
            aspect_ratio: settings.aspect_ratio,
        };
        let prompt = request.prompt().to_string();
        match request.image() {
            Some(image) => Self::ImageToVideo {
                prompt,
                image: image.clone(),
                config,
            },
            None => Self::TextToVideo { prompt, config },
        }
    }

    /// Prompt text.
    pub fn prompt(&self) -> &str {
        match self {
            Self::TextToVideo { prompt, .. } | Self::ImageToVideo { prompt, .. } => prompt,
        }
    }

    /// Output configuration.
    pub fn config(&self) -> &SubmitConfig {
        match self {
            Self::TextToVideo { config, .. } | Self::ImageToVideo { config, .. } => config,
        }
    }

    /// Reference image, for image-to-video.
    pub fn image(&self) -> Option<&ReferenceImage> {
        match self {
            Self::TextToVideo { .. } => None,
            Self::ImageToVideo { image, .. } => Some(image),
        }
    }
}

/// Remote video-generation service.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Starts a generation job.
    async fn submit(&self, payload: &SubmitPayload) -> Result<Operation>;

    /// Fetches the current state of a job.
    async fn refresh(&self, operation: &Operation) -> Result<Operation>;

    /// Model identifier, for metadata.
    fn model_id(&self) -> &str;

    /// Checks if the service is reachable and the credential is accepted.
    async fn health_check(&self) -> Result<()>;
}

/// Raw response of a byte fetch.
#[derive(Debug, Clone)]
pub struct FetchedVideo {
    /// HTTP status.
    pub status: reqwest::StatusCode,
    /// Response body.
    pub body: Vec<u8>,
}

/// Plain HTTP GET for result bytes.
///
/// Implementations report the status as-is; the driver decides what counts
/// as failure.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Fetches `url`, which already carries the credential.
    async fn fetch(&self, url: &str) -> Result<FetchedVideo>;
}

#[async_trait]
impl<T: GenerationService + ?Sized> GenerationService for Arc<T> {
    async fn submit(&self, payload: &SubmitPayload) -> Result<Operation> {
        (**self).submit(payload).await
    }

    async fn refresh(&self, operation: &Operation) -> Result<Operation> {
        (**self).refresh(operation).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }

    async fn health_check(&self) -> Result<()> {
        (**self).health_check().await
    }
}

#[async_trait]
impl<T: VideoFetcher + ?Sized> VideoFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<FetchedVideo> {
        (**self).fetch(url).await
    }
}
