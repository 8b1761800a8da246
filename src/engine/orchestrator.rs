use crate::engine::prompt_builder::Turn;
use crate::error::EngineError;
use crate::model::scene::{FullScene, SceneData};
use crate::model::transcript::Transcript;

/// Source of validated scene text. Implemented by the hosted-API client
/// and by stubs in tests.
pub trait SceneTextGenerator {
    fn generate_scene(
        &self,
        theme: &str,
        transcript: &Transcript,
        turn: &Turn,
    ) -> Result<SceneData, EngineError>;
}

/// Source of one displayable image URI for a scene.
pub trait SceneImageGenerator {
    fn generate_image(&self, description: &str, theme: &str) -> Result<String, EngineError>;
}

/// Composes text and image generation into one full scene.
///
/// The single operation the session layer calls per turn.
pub struct SceneOrchestrator<T, I> {
    text: T,
    image: I,
}

impl<T, I> SceneOrchestrator<T, I>
where
    T: SceneTextGenerator,
    I: SceneImageGenerator,
{
    pub fn new(text: T, image: I) -> Self {
        Self { text, image }
    }

    /// Runs text generation, then image generation, strictly in sequence.
    /// The image prompt depends on the generated description, so a text
    /// failure means the image request is never issued. Either failure
    /// propagates unchanged; no partial scene is ever returned.
    pub fn generate_full_scene(
        &self,
        theme: &str,
        transcript: &Transcript,
        turn: &Turn,
    ) -> Result<FullScene, EngineError> {
        let scene = self.text.generate_scene(theme, transcript, turn)?;
        let image_url = self.image.generate_image(&scene.description, theme)?;
        Ok(FullScene::new(scene, image_url))
    }
}
