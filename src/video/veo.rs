//! Veo (Google) client for the Gemini Developer API.

use crate::error::{sanitize_error_message, Result, StudioError};
use crate::video::service::{
    ApiKey, FetchedVideo, GenerationService, SubmitPayload, VideoFetcher,
};
use crate::video::types::{Operation, VideoRef};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Veo model variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VeoModel {
    /// Veo 3.1 Fast Preview.
    #[default]
    Veo31FastPreview,
    /// Veo 3.1 Preview.
    Veo31Preview,
}

impl VeoModel {
    /// Returns the API model identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Veo31FastPreview => "veo-3.1-fast-generate-preview",
            Self::Veo31Preview => "veo-3.1-generate-preview",
        }
    }
}

impl std::str::FromStr for VeoModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "veo-3.1-fast-generate-preview" | "fast" => Ok(Self::Veo31FastPreview),
            "veo-3.1-generate-preview" | "standard" => Ok(Self::Veo31Preview),
            other => Err(format!("unknown Veo model: {other}")),
        }
    }
}

/// Builder for [`VeoClient`].
#[derive(Debug, Clone, Default)]
pub struct VeoClientBuilder {
    api_key: Option<ApiKey>,
    model: VeoModel,
    base_url: Option<String>,
    http: Option<reqwest::Client>,
}

impl VeoClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Required.
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the Veo model variant.
    pub fn model(mut self, model: VeoModel) -> Self {
        self.model = model;
        self
    }

    /// Overrides the API root (for proxies and tests).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<VeoClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_blank())
            .ok_or_else(|| StudioError::Auth("no API key provided".into()))?;

        Ok(VeoClient {
            client: self.http.unwrap_or_default(),
            api_key,
            model: self.model,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

/// Veo client: submits jobs, polls operations and downloads results.
#[derive(Debug, Clone)]
pub struct VeoClient {
    client: reqwest::Client,
    api_key: ApiKey,
    model: VeoModel,
    base_url: String,
}

impl VeoClient {
    /// Creates a new [`VeoClientBuilder`].
    pub fn builder() -> VeoClientBuilder {
        VeoClientBuilder::new()
    }

    /// The model this client submits to.
    pub fn model(&self) -> VeoModel {
        self.model
    }

    fn submit_url(&self) -> String {
        format!(
            "{}/models/{}:predictLongRunning",
            self.base_url,
            self.model.as_str()
        )
    }

    fn operation_url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    async fn read_operation(response: reqwest::Response) -> Result<Operation> {
        let wire: VeoOperationResponse = response.json().await.map_err(StudioError::network)?;
        Ok(wire.into_operation())
    }
}

#[async_trait]
impl GenerationService for VeoClient {
    async fn submit(&self, payload: &SubmitPayload) -> Result<Operation> {
        let body = VeoRequest::from_payload(payload);

        let response = self
            .client
            .post(self.submit_url())
            .header("x-goog-api-key", self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::Submission {
                status: None,
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(StudioError::Submission {
                status: Some(status.as_u16()),
                message: describe_error(status.as_u16(), &text),
            });
        }

        Self::read_operation(response)
            .await
            .map_err(|e| StudioError::Submission {
                status: Some(status.as_u16()),
                message: e.to_string(),
            })
    }

    async fn refresh(&self, operation: &Operation) -> Result<Operation> {
        let response = self
            .client
            .get(self.operation_url(&operation.name))
            .header("x-goog-api-key", self.api_key.expose())
            .send()
            .await
            .map_err(StudioError::network)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => StudioError::Auth(sanitize_error_message(&text)),
                code => StudioError::Api {
                    status: code,
                    message: describe_error(code, &text),
                },
            });
        }

        Self::read_operation(response).await
    }

    fn model_id(&self) -> &str {
        self.model.as_str()
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/models/{}", self.base_url, self.model.as_str());
        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", self.api_key.expose())
            .send()
            .await
            .map_err(StudioError::network)?;

        match response.status().as_u16() {
            401 | 403 => Err(StudioError::Auth("Invalid API key".into())),
            404 => Err(StudioError::Api {
                status: 404,
                message: describe_error(404, ""),
            }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl VideoFetcher for VeoClient {
    async fn fetch(&self, url: &str) -> Result<FetchedVideo> {
        if url.starts_with("gs://") {
            return Err(StudioError::UnsupportedUri(
                url.split('?').next().unwrap_or(url).to_string(),
            ));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StudioError::network)?;
        let status = response.status();
        let body = if status.is_success() {
            response.bytes().await.map_err(StudioError::network)?.to_vec()
        } else {
            Vec::new()
        };
        Ok(FetchedVideo { status, body })
    }
}

/// Human-readable message for a non-success API response.
fn describe_error(status: u16, text: &str) -> String {
    match status {
        402 => "Veo billing issue: enable billing at https://aistudio.google.com".into(),
        404 => "Veo API not available. Veo requires a paid-tier API key with billing enabled. \
                Enable it at https://aistudio.google.com by selecting a Google Cloud project with billing."
            .into(),
        _ => sanitize_error_message(text),
    }
}

// ── Wire format ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoRequest {
    instances: Vec<VeoInstance>,
    parameters: VeoParameters,
}

/// Inline data wrapper (`{"inlineData": {"mimeType": "...", "data": "..."}}`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoMediaData {
    inline_data: VeoInlineData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoInstance {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<VeoMediaData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VeoParameters {
    aspect_ratio: &'static str,
    resolution: &'static str,
    number_of_videos: u32,
}

impl VeoRequest {
    fn from_payload(payload: &SubmitPayload) -> Self {
        let config = payload.config();
        let image = match payload {
            SubmitPayload::TextToVideo { .. } => None,
            SubmitPayload::ImageToVideo { image, .. } => Some(VeoMediaData {
                inline_data: VeoInlineData {
                    mime_type: image.mime_type().to_string(),
                    data: image.data().to_string(),
                },
            }),
        };

        Self {
            instances: vec![VeoInstance {
                prompt: payload.prompt().to_string(),
                image,
            }],
            parameters: VeoParameters {
                aspect_ratio: config.aspect_ratio.as_str(),
                resolution: config.resolution.as_str(),
                number_of_videos: config.number_of_videos,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct VeoOperationResponse {
    name: String,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    response: Option<VeoVideoResponse>,
    #[serde(default)]
    error: Option<VeoError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VeoVideoResponse {
    #[serde(default)]
    generate_video_response: Option<VeoGenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VeoGenerateVideoResponse {
    #[serde(default)]
    generated_samples: Option<Vec<VeoGeneratedSample>>,
    #[serde(default)]
    rai_media_filtered_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct VeoGeneratedSample {
    #[serde(default)]
    video: Option<VeoVideo>,
}

#[derive(Debug, Deserialize)]
struct VeoVideo {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VeoError {
    #[serde(default)]
    message: Option<String>,
}

impl VeoOperationResponse {
    fn into_operation(self) -> Operation {
        let (videos, filtered_count) = match self.response.and_then(|r| r.generate_video_response)
        {
            Some(resp) => (
                resp.generated_samples
                    .unwrap_or_default()
                    .into_iter()
                    .map(|s| VideoRef {
                        uri: s.video.and_then(|v| v.uri),
                    })
                    .collect(),
                resp.rai_media_filtered_count.unwrap_or(0),
            ),
            None => (Vec::new(), 0),
        };

        Operation {
            name: self.name,
            done: self.done.unwrap_or(false),
            videos,
            error: self
                .error
                .map(|e| e.message.unwrap_or_else(|| "Unknown error".into())),
            filtered_count,
        }
    }
}
