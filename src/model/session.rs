use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use crate::config::GenAiConfig;
use crate::engine::engine::Engine;
use crate::engine::genai_client::GenAiClient;
use crate::engine::orchestrator::SceneOrchestrator;
use crate::engine::prompt_builder::Turn;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::scene::FullScene;
use crate::model::transcript::Transcript;

/// Finite state of one game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GamePhase {
    #[default]
    Start,
    Loading,
    Playing,
    Error,
}

/// The game session a UI drives: holds the phase, theme, transcript and
/// current scene, and talks to the engine worker over channels.
///
/// Single-threaded by construction. Each request carries a generation
/// counter; `restart` bumps it so an in-flight result that arrives later
/// is recognized as stale and dropped instead of resurrecting a dead game.
pub struct GameSession {
    phase: GamePhase,
    theme: String,
    transcript: Transcript,
    scene: Option<FullScene>,
    error: Option<String>,
    generation: u64,
    /// Choice being processed; appended to the transcript only on success.
    pending_choice: Option<String>,

    cmd_tx: Sender<EngineCommand>,
    resp_rx: Receiver<EngineResponse>,
}

impl GameSession {
    /// Starts the engine worker thread and wires a session to it.
    pub fn spawn(config: GenAiConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let client = GenAiClient::new(config);
            let orchestrator = SceneOrchestrator::new(client.clone(), client);
            let mut engine = Engine::new(cmd_rx, resp_tx, orchestrator);
            engine.run();
        });

        Self::with_channels(cmd_tx, resp_rx)
    }

    /// Wires a session to an existing worker. Test seam.
    pub fn with_channels(
        cmd_tx: Sender<EngineCommand>,
        resp_rx: Receiver<EngineResponse>,
    ) -> Self {
        Self {
            phase: GamePhase::Start,
            theme: String::new(),
            transcript: Transcript::new(),
            scene: None,
            error: None,
            generation: 0,
            pending_choice: None,
            cmd_tx,
            resp_rx,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn scene(&self) -> Option<&FullScene> {
        self.scene.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a turn is in flight; the UI must disable choice input.
    pub fn is_busy(&self) -> bool {
        self.phase == GamePhase::Loading
    }

    /// Begins a new adventure with the given theme.
    pub fn start(&mut self, theme: &str) {
        if self.is_busy() {
            return;
        }

        self.generation += 1;
        self.theme = theme.to_string();
        self.transcript.clear();
        self.scene = None;
        self.error = None;
        self.pending_choice = None;
        self.phase = GamePhase::Loading;

        let _ = self.cmd_tx.send(EngineCommand::GenerateScene {
            generation: self.generation,
            theme: self.theme.clone(),
            transcript: self.transcript.clone(),
            turn: Turn::Opening,
        });
    }

    /// Advances the story with a player choice. Ignored unless a scene is
    /// currently playing.
    pub fn choose(&mut self, choice: &str) {
        if self.phase != GamePhase::Playing {
            return;
        }

        self.generation += 1;
        self.pending_choice = Some(choice.to_string());
        self.error = None;
        self.phase = GamePhase::Loading;

        let _ = self.cmd_tx.send(EngineCommand::GenerateScene {
            generation: self.generation,
            theme: self.theme.clone(),
            transcript: self.transcript.clone(),
            turn: Turn::Continuation {
                choice: choice.to_string(),
            },
        });
    }

    /// Returns to the start screen, clearing all story state. Any call
    /// still in flight becomes stale and its result is dropped on arrival.
    pub fn restart(&mut self) {
        self.generation += 1;
        self.phase = GamePhase::Start;
        self.theme.clear();
        self.transcript.clear();
        self.scene = None;
        self.error = None;
        self.pending_choice = None;
    }

    /// Drains engine responses and applies state transitions. Call once
    /// per UI tick.
    pub fn poll(&mut self) {
        while let Ok(response) = self.resp_rx.try_recv() {
            match response {
                EngineResponse::SceneReady { generation, scene } => {
                    if generation != self.generation {
                        debug!(target: "session", generation, "dropping stale scene");
                        continue;
                    }

                    match self.pending_choice.take() {
                        None => self.transcript.record_opening(&self.theme, &scene.description),
                        Some(choice) => self.transcript.record_turn(&choice, &scene.description),
                    }
                    self.scene = Some(scene);
                    self.phase = GamePhase::Playing;
                }

                EngineResponse::SceneFailed { generation, error } => {
                    if generation != self.generation {
                        debug!(target: "session", generation, "dropping stale failure");
                        continue;
                    }

                    self.pending_choice = None;
                    self.error = Some(error.to_string());
                    self.phase = GamePhase::Error;
                }
            }
        }
    }
}
