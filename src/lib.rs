//! Storyloom — orchestration engine for an LLM-driven interactive fiction game.
//!
//! Builds a prompt from the story so far, asks a hosted text model for the
//! next scene (description plus three player choices as structured JSON),
//! asks a hosted image model for a matching illustration, and merges both
//! into one scene object. A small session state machine drives the pipeline
//! from a worker thread so a UI never blocks on the network.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;

pub use config::GenAiConfig;
pub use engine::genai_client::GenAiClient;
pub use engine::orchestrator::{SceneImageGenerator, SceneOrchestrator, SceneTextGenerator};
pub use engine::prompt_builder::{PromptBuilder, Turn};
pub use error::{EngineError, SceneParseError};
pub use model::scene::{Choice, FullScene, SceneData};
pub use model::session::{GamePhase, GameSession};
pub use model::transcript::Transcript;
