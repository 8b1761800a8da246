use thiserror::Error;

/// Failure kinds of the fence-strip → decode → validate pipeline.
///
/// `Json` means the model reply was not JSON at all; `Validation` means it
/// was JSON but not a usable scene. Callers that only care about "the scene
/// is unusable" match on [`EngineError::InvalidScene`] instead.
#[derive(Debug, Error)]
pub enum SceneParseError {
    #[error("scene reply is not valid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
        raw: String,
    },

    #[error("scene reply is incomplete: {reason}")]
    Validation { reason: String, raw: String },
}

impl SceneParseError {
    /// The raw model output that failed, kept for diagnostics.
    pub fn raw_text(&self) -> &str {
        match self {
            SceneParseError::Json { raw, .. } => raw,
            SceneParseError::Validation { raw, .. } => raw,
        }
    }
}

/// The closed error set a game session switches on.
///
/// Every turn either fully succeeds (validated text plus image) or fails
/// with exactly one of these. Nothing is retried here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Transport or provider failure on the text-generation request.
    #[error("text generation failed: {0}")]
    Generation(String),

    /// The text model answered, but not with a usable scene.
    #[error("text model returned an unusable scene")]
    InvalidScene(#[from] SceneParseError),

    /// Transport or provider failure on the image request, or zero images.
    #[error("image generation failed: {0}")]
    ImageGeneration(String),
}
