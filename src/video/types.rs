//! Core types for video generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output aspect ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9 landscape.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16 portrait.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Returns the API string for this ratio.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(Self::Landscape),
            "9:16" => Ok(Self::Portrait),
            other => Err(format!("unsupported aspect ratio {other:?} (expected 16:9 or 9:16)")),
        }
    }
}

/// Output resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// 1280x720.
    #[default]
    #[serde(rename = "720p")]
    Hd,
    /// 1920x1080.
    #[serde(rename = "1080p")]
    FullHd,
}

impl Resolution {
    /// Returns the API string for this resolution.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hd => "720p",
            Self::FullHd => "1080p",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "720p" => Ok(Self::Hd),
            "1080p" => Ok(Self::FullHd),
            other => Err(format!("unsupported resolution {other:?} (expected 720p or 1080p)")),
        }
    }
}

/// Output settings chosen by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    /// Aspect ratio of the generated video.
    pub aspect_ratio: AspectRatio,
    /// Resolution of the generated video.
    pub resolution: Resolution,
    /// Ask the model for a soundtrack.
    pub enable_sound: bool,
}

impl GenerationSettings {
    /// Creates settings with sound disabled.
    pub fn new(aspect_ratio: AspectRatio, resolution: Resolution) -> Self {
        Self {
            aspect_ratio,
            resolution,
            enable_sound: false,
        }
    }

    /// Enables or disables sound.
    pub fn with_sound(mut self, enable: bool) -> Self {
        self.enable_sound = enable;
        self
    }
}

/// A reference image in transport form: base64 data plus its MIME type.
#[derive(Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    data: String,
    mime_type: String,
}

impl ReferenceImage {
    pub(crate) fn new(data: String, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }

    /// Base64-encoded image bytes.
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Declared MIME type (e.g. `image/png`).
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

// Image payloads run to megabytes; keep them out of debug output.
impl fmt::Debug for ReferenceImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceImage")
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}

/// A composed generation request. Built by [`compose`](crate::video::compose).
///
/// The prompt is the exact text sent to the model, sound directive included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt: String,
    image: Option<ReferenceImage>,
    settings: GenerationSettings,
}

impl GenerationRequest {
    pub(crate) fn new(
        prompt: String,
        image: Option<ReferenceImage>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            prompt,
            image,
            settings,
        }
    }

    /// Prompt text sent downstream.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Reference image, if any.
    pub fn image(&self) -> Option<&ReferenceImage> {
        self.image.as_ref()
    }

    /// Output settings.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }
}

/// One generated video entry in a finished operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoRef {
    /// Fetchable location of the video bytes.
    pub uri: Option<String>,
}

/// Snapshot of a remote long-running generation job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Operation {
    /// Server-assigned operation name, used to refresh the status.
    pub name: String,
    /// Whether the job has finished.
    pub done: bool,
    /// Generated videos, in the order the service lists them.
    pub videos: Vec<VideoRef>,
    /// Error reported by the service for this job.
    pub error: Option<String>,
    /// Number of outputs removed by safety filters.
    pub filtered_count: u32,
}

impl Operation {
    /// An operation that has not finished yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A finished operation listing the given video URIs.
    pub fn finished(name: impl Into<String>, uris: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            videos: uris.into_iter().map(|uri| VideoRef { uri: Some(uri) }).collect(),
            ..Self::default()
        }
    }

    /// URI of the first generated video, if the service returned one.
    pub fn first_video_uri(&self) -> Option<&str> {
        self.videos.first().and_then(|v| v.uri.as_deref())
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Wall time from submission to materialization, in milliseconds.
    pub duration_ms: Option<u64>,
    /// Number of status checks after submission.
    pub poll_attempts: u32,
    /// Requested resolution.
    pub resolution: Option<Resolution>,
    /// Requested aspect ratio.
    pub aspect_ratio: Option<AspectRatio>,
}

/// A generated video, addressable through the [`ArtifactStore`] that holds it.
///
/// The caller owns the local URL and must revoke it once the video is no
/// longer needed; the bytes stay in memory until then.
///
/// [`ArtifactStore`]: crate::video::ArtifactStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    /// Local handle, e.g. `blob:veo-studio/6f1c...`.
    pub local_url: String,
    /// MIME type of the stored bytes.
    pub mime_type: String,
    /// Size of the stored bytes.
    pub size_bytes: usize,
    /// Generation metadata.
    pub metadata: VideoMetadata,
}
