use crate::engine::prompt_builder::Turn;
use crate::error::EngineError;
use crate::model::scene::FullScene;
use crate::model::transcript::Transcript;

/// Requests accepted by the engine worker thread.
pub enum EngineCommand {
    GenerateScene {
        /// Session generation counter at send time; echoed in the response.
        generation: u64,
        theme: String,
        transcript: Transcript,
        turn: Turn,
    },
}

/// Results sent back to the session.
///
/// `generation` lets a session that restarted while the call was in flight
/// recognize and discard the stale result.
pub enum EngineResponse {
    SceneReady {
        generation: u64,
        scene: FullScene,
    },

    SceneFailed {
        generation: u64,
        error: EngineError,
    },
}
