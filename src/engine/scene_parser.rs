use serde_json::Value;
use tracing::error;

use crate::error::SceneParseError;
use crate::model::scene::SceneData;

/// Strips an optional triple-backtick fence, with optional language tag,
/// around the model reply. Text without a fence passes through trimmed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // Language tag sits directly after the opening fence.
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.trim()
}

/// Decodes a raw model reply into a validated [`SceneData`].
///
/// Two failure stages, kept distinct so callers can tell malformed JSON
/// from well-formed-but-incomplete payloads:
/// - [`SceneParseError::Json`]: the stripped text is not JSON;
/// - [`SceneParseError::Validation`]: the JSON does not carry a non-empty
///   description and a non-empty choice list.
pub fn parse_scene(raw: &str) -> Result<SceneData, SceneParseError> {
    let stripped = strip_code_fence(raw);

    let value: Value = serde_json::from_str(stripped).map_err(|source| {
        error!(target: "genai", raw, "scene reply is not valid JSON");
        SceneParseError::Json {
            source,
            raw: raw.to_string(),
        }
    })?;

    let scene: SceneData = serde_json::from_value(value).map_err(|e| {
        error!(target: "genai", raw, "scene reply does not match the scene shape");
        SceneParseError::Validation {
            reason: e.to_string(),
            raw: raw.to_string(),
        }
    })?;

    if scene.description.trim().is_empty() {
        return Err(SceneParseError::Validation {
            reason: "description is empty".to_string(),
            raw: raw.to_string(),
        });
    }
    if scene.choices.is_empty() {
        return Err(SceneParseError::Validation {
            reason: "choice list is empty".to_string(),
            raw: raw.to_string(),
        });
    }

    Ok(scene)
}
