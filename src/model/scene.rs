use serde::{Deserialize, Serialize};

/// One player-selectable action, produced by the text model and echoed
/// back as the next turn's player action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
}

/// The narrative unit returned by the text model.
///
/// The parser guarantees a non-empty description and at least one choice;
/// the prompt asks for exactly three.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneData {
    pub description: String,
    pub choices: Vec<Choice>,
}

/// A scene plus its illustration, the unit handed to the UI layer.
///
/// Created once per orchestration call and never mutated; the next turn
/// supersedes it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullScene {
    pub description: String,
    pub choices: Vec<Choice>,
    /// `data:image/jpeg;base64,...` URI for direct display.
    pub image_url: String,
}

impl FullScene {
    pub fn new(scene: SceneData, image_url: String) -> Self {
        Self {
            description: scene.description,
            choices: scene.choices,
            image_url,
        }
    }
}
