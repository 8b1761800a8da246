use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::{GenAiConfig, API_KEY_VAR};
use crate::engine::orchestrator::{SceneImageGenerator, SceneTextGenerator};
use crate::engine::prompt_builder::{PromptBuilder, Turn};
use crate::engine::scene_parser::parse_scene;
use crate::error::EngineError;
use crate::model::scene::SceneData;
use crate::model::transcript::Transcript;

/// Fixed stylistic preamble prepended to every image prompt.
const IMAGE_STYLE_PREAMBLE: &str =
    "Epic cinematic, hyper-detailed, atmospheric, dark fantasy art.";

const IMAGE_ASPECT_RATIO: &str = "16:9";
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/* =========================
   Text generation wire types
   ========================= */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    // A safety-blocked candidate may arrive without content.
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/* =========================
   Image generation wire types
   ========================= */

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    parameters: PredictParameters,
}

#[derive(Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: &'static str,
    output_mime_type: &'static str,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: String,
}

/// Structured-output schema constraining the scene reply.
fn scene_response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "description": {
                "type": "STRING",
                "description": "A vivid and atmospheric description of the current scene (100-150 words)."
            },
            "choices": {
                "type": "ARRAY",
                "description": "Exactly 3 distinct and interesting choices for the player.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": {
                            "type": "STRING",
                            "description": "The text for a single choice."
                        }
                    },
                    "required": ["text"]
                }
            }
        },
        "required": ["description", "choices"]
    })
}

/* =========================
   Client
   ========================= */

/// Blocking client for the hosted text and image generation endpoints.
///
/// One request per call, no retries: the first failure is terminal for the
/// turn and surfaces as an [`EngineError`].
#[derive(Clone)]
pub struct GenAiClient {
    http: Client,
    config: GenAiConfig,
}

impl GenAiClient {
    pub fn new(config: GenAiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The key is optional at startup; calls fail here instead.
    fn api_key(&self) -> Result<&str, String> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| format!("{API_KEY_VAR} is not set"))
    }

    fn endpoint(&self, model: &str, verb: &str, key: &str) -> String {
        format!("{}/models/{}:{}?key={}", self.config.api_base, model, verb, key)
    }
}

impl SceneTextGenerator for GenAiClient {
    fn generate_scene(
        &self,
        theme: &str,
        transcript: &Transcript,
        turn: &Turn,
    ) -> Result<SceneData, EngineError> {
        let key = self.api_key().map_err(EngineError::Generation)?;
        let prompt = PromptBuilder::build(theme, transcript, turn);

        debug!(
            target: "genai",
            model = %self.config.text_model,
            prompt_len = prompt.len(),
            "requesting scene text"
        );

        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                response_mime_type: "application/json",
                response_schema: scene_response_schema(),
            },
        };

        let resp: GenerateContentResponse = self
            .http
            .post(self.endpoint(&self.config.text_model, "generateContent", key))
            .json(&req)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| EngineError::Generation(e.to_string()))?
            .json()
            .map_err(|e| EngineError::Generation(e.to_string()))?;

        let text = resp
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| EngineError::Generation("text model returned no candidates".to_string()))?;

        debug!(target: "genai", reply_len = text.len(), "scene text received");

        let scene = parse_scene(text)?;
        Ok(scene)
    }
}

impl SceneImageGenerator for GenAiClient {
    fn generate_image(&self, description: &str, theme: &str) -> Result<String, EngineError> {
        let key = self.api_key().map_err(EngineError::ImageGeneration)?;
        let prompt = format!("{IMAGE_STYLE_PREAMBLE} {description}. Theme: {theme}.");

        debug!(
            target: "genai",
            model = %self.config.image_model,
            prompt_len = prompt.len(),
            "requesting scene image"
        );

        let req = PredictRequest {
            instances: vec![Instance { prompt: &prompt }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: IMAGE_ASPECT_RATIO,
                output_mime_type: IMAGE_MIME_TYPE,
            },
        };

        let resp: PredictResponse = self
            .http
            .post(self.endpoint(&self.config.image_model, "predict", key))
            .json(&req)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| EngineError::ImageGeneration(e.to_string()))?
            .json()
            .map_err(|e| EngineError::ImageGeneration(e.to_string()))?;

        let payload = resp
            .predictions
            .first()
            .map(|p| p.bytes_base64_encoded.as_str())
            .filter(|b| !b.is_empty())
            .ok_or_else(|| {
                EngineError::ImageGeneration("image model returned no images".to_string())
            })?;

        // Reject a payload the UI could not display.
        let bytes = BASE64
            .decode(payload.as_bytes())
            .map_err(|e| EngineError::ImageGeneration(format!("image payload is not base64: {e}")))?;
        if bytes.is_empty() {
            return Err(EngineError::ImageGeneration(
                "image model returned an empty image".to_string(),
            ));
        }

        Ok(format!("data:{IMAGE_MIME_TYPE};base64,{payload}"))
    }
}
