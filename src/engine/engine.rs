use std::sync::mpsc::{Receiver, Sender};

use tracing::{debug, warn};

use crate::engine::orchestrator::{SceneImageGenerator, SceneOrchestrator, SceneTextGenerator};
use crate::engine::protocol::{EngineCommand, EngineResponse};

/// Worker loop that executes scene orchestration off the session's thread.
///
/// Commands arrive one at a time; the session never has more than one call
/// in flight, so there is no queueing discipline beyond the channel itself.
pub struct Engine<T, I> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    orchestrator: SceneOrchestrator<T, I>,
}

impl<T, I> Engine<T, I>
where
    T: SceneTextGenerator,
    I: SceneImageGenerator,
{
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        orchestrator: SceneOrchestrator<T, I>,
    ) -> Self {
        Self {
            rx,
            tx,
            orchestrator,
        }
    }

    /// Blocks until the command channel closes.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            match cmd {
                EngineCommand::GenerateScene {
                    generation,
                    theme,
                    transcript,
                    turn,
                } => {
                    debug!(target: "engine", generation, "generating scene");

                    let response =
                        match self
                            .orchestrator
                            .generate_full_scene(&theme, &transcript, &turn)
                        {
                            Ok(scene) => EngineResponse::SceneReady { generation, scene },
                            Err(error) => {
                                warn!(target: "engine", generation, %error, "scene generation failed");
                                EngineResponse::SceneFailed { generation, error }
                            }
                        };

                    let _ = self.tx.send(response);
                }
            }
        }
    }
}
