use tracing::warn;

/// Environment variable holding the hosted-API credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection and sampling settings for the hosted generative APIs.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// API key. `None` is tolerated at startup; the first request fails.
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    /// Creative but bounded variance for scene text.
    pub temperature: f32,
    pub top_p: f32,
    pub api_base: String,
}

impl Default for GenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-3.0-generate-002".to_string(),
            temperature: 0.8,
            top_p: 0.9,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl GenAiConfig {
    /// Reads the credential from the process environment.
    ///
    /// A missing key is logged, not fatal: startup proceeds and the first
    /// API call reports the failure.
    pub fn from_env() -> Self {
        let api_key = match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Some(key),
            _ => {
                warn!(target: "genai", "{} is not set; API calls will fail", API_KEY_VAR);
                None
            }
        };

        Self {
            api_key,
            ..Self::default()
        }
    }
}
