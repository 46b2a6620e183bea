//! Turns raw user input into a [`GenerationRequest`].

use crate::error::{Result, StudioError};
use crate::video::types::{GenerationRequest, GenerationSettings, ReferenceImage};
use base64::Engine;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Directive appended to the prompt when sound is requested.
///
/// The generation API has no audio switch, so sound is asked for in the
/// prompt itself.
pub const SOUND_DIRECTIVE: &str = "Include high quality sound design and audio.";

/// Where a reference image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk. MIME type comes from the extension, then the contents.
    Path(PathBuf),
    /// Raw bytes with an optional declared MIME type.
    Bytes {
        /// Image bytes.
        data: Vec<u8>,
        /// Declared type; sniffed from the bytes when absent.
        mime_type: Option<String>,
    },
    /// A `data:<mime>;base64,<payload>` URL, as produced by a browser file reader.
    DataUrl(String),
}

impl ImageSource {
    /// Reference a file on disk.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Use in-memory bytes.
    pub fn bytes(data: impl Into<Vec<u8>>, mime_type: Option<String>) -> Self {
        Self::Bytes {
            data: data.into(),
            mime_type,
        }
    }

    /// Reads and encodes the image.
    pub async fn load(self) -> Result<ReferenceImage> {
        match self {
            Self::Path(path) => {
                let data = tokio::fs::read(&path)
                    .await
                    .map_err(|e| StudioError::ImageRead(format!("{}: {e}", path.display())))?;
                let declared = mime_from_extension(&path).map(str::to_string);
                encode(&data, declared)
            }
            Self::Bytes { data, mime_type } => encode(&data, mime_type),
            Self::DataUrl(url) => {
                let (declared, payload) = split_data_url(&url)?;
                let data = decode_base64_lenient(payload)
                    .map_err(|e| StudioError::ImageRead(format!("invalid base64 payload: {e}")))?;
                encode(&data, declared)
            }
        }
    }
}

/// Builds a request from user input.
///
/// Fails with [`StudioError::Validation`] when the prompt is blank and no image
/// is given, before touching the image. When `settings.enable_sound` is set,
/// [`SOUND_DIRECTIVE`] is appended to the prompt once.
pub async fn compose(
    prompt_text: &str,
    image: Option<ImageSource>,
    settings: GenerationSettings,
) -> Result<GenerationRequest> {
    if prompt_text.trim().is_empty() && image.is_none() {
        return Err(StudioError::Validation);
    }

    let image = match image {
        Some(source) => Some(source.load().await?),
        None => None,
    };

    let prompt = if settings.enable_sound {
        with_sound_directive(prompt_text)
    } else {
        prompt_text.to_string()
    };

    tracing::debug!(
        prompt_len = prompt.len(),
        has_image = image.is_some(),
        aspect_ratio = %settings.aspect_ratio,
        resolution = %settings.resolution,
        "composed generation request"
    );

    Ok(GenerationRequest::new(prompt, image, settings))
}

fn with_sound_directive(prompt: &str) -> String {
    if prompt.trim().is_empty() {
        SOUND_DIRECTIVE.to_string()
    } else {
        format!("{prompt}. {SOUND_DIRECTIVE}")
    }
}

/// Best-effort cleanup of a prompt pasted as JSON.
///
/// - an object with a non-empty string `prompt` (or else `text`) field yields
///   that field's value
/// - any other valid JSON is pretty-printed
/// - anything that is not JSON comes back unchanged
pub fn normalize_prompt(text: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    for key in ["prompt", "text"] {
        if let Some(value) = parsed.get(key).and_then(Value::as_str) {
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| text.to_string())
}

fn encode(data: &[u8], declared: Option<String>) -> Result<ReferenceImage> {
    if data.is_empty() {
        return Err(StudioError::ImageRead("image is empty".into()));
    }
    let mime_type = match declared.filter(|m| !m.is_empty()) {
        Some(mime) => mime,
        None => mime_from_magic_bytes(data)
            .ok_or_else(|| StudioError::ImageRead("unrecognized image format".into()))?
            .to_string(),
    };
    let b64 = base64::engine::general_purpose::STANDARD.encode(data);
    Ok(ReferenceImage::new(b64, mime_type))
}

fn split_data_url(url: &str) -> Result<(Option<String>, &str)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| StudioError::ImageRead("not a data URL".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| StudioError::ImageRead("data URL has no payload".into()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| StudioError::ImageRead("data URL is not base64-encoded".into()))?;
    let mime = (!mime.is_empty()).then(|| mime.to_string());
    Ok((mime, payload))
}

/// Decodes base64 that may carry whitespace or lack padding.
fn decode_base64_lenient(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
        return Ok(data);
    }
    base64::engine::general_purpose::STANDARD_NO_PAD.decode(&cleaned)
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn mime_from_magic_bytes(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    None
}
