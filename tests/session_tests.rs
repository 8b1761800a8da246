//! Session state machine tests, run against a real engine worker thread
//! wired to stub generators.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use storyloom::engine::engine::Engine;
use storyloom::engine::orchestrator::{
    SceneImageGenerator, SceneOrchestrator, SceneTextGenerator,
};
use storyloom::engine::prompt_builder::{PromptBuilder, Turn};
use storyloom::engine::protocol::EngineResponse;
use storyloom::error::EngineError;
use storyloom::model::scene::{Choice, FullScene, SceneData};
use storyloom::model::session::{GamePhase, GameSession};
use storyloom::model::transcript::Transcript;

const KNIGHT_THEME: &str =
    "A lone knight discovering a forgotten, glowing ruin in a dark forest.";

/// Records every prompt it is asked to render, then answers from a script.
#[derive(Clone)]
struct ScriptedText {
    prompts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl ScriptedText {
    fn new(fail: bool) -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail,
        }
    }
}

impl SceneTextGenerator for ScriptedText {
    fn generate_scene(
        &self,
        theme: &str,
        transcript: &Transcript,
        turn: &Turn,
    ) -> Result<SceneData, EngineError> {
        let prompt = PromptBuilder::build(theme, transcript, turn);
        self.prompts.lock().unwrap().push(prompt);

        if self.fail {
            return Err(EngineError::Generation("connection refused".to_string()));
        }

        let description = match turn {
            Turn::Opening => "The knight halts before a ruin laced with pale light.",
            Turn::Continuation { .. } => "Beyond the threshold, the glow thickens into mist.",
        };
        Ok(SceneData {
            description: description.to_string(),
            choices: vec![
                Choice {
                    text: "Enter the ruin".to_string(),
                },
                Choice {
                    text: "Draw your sword".to_string(),
                },
                Choice {
                    text: "Retreat into the trees".to_string(),
                },
            ],
        })
    }
}

#[derive(Clone)]
struct StaticImage {
    calls: Arc<AtomicUsize>,
    has_image: bool,
}

impl StaticImage {
    fn new(has_image: bool) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            has_image,
        }
    }
}

impl SceneImageGenerator for StaticImage {
    fn generate_image(&self, _description: &str, _theme: &str) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.has_image {
            Ok("data:image/jpeg;base64,ZmFrZS1qcGVn".to_string())
        } else {
            Err(EngineError::ImageGeneration(
                "image model returned no images".to_string(),
            ))
        }
    }
}

fn session_over(text: ScriptedText, image: StaticImage) -> GameSession {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    thread::spawn(move || {
        let mut engine = Engine::new(cmd_rx, resp_tx, SceneOrchestrator::new(text, image));
        engine.run();
    });

    GameSession::with_channels(cmd_tx, resp_rx)
}

fn poll_until_settled(session: &mut GameSession) {
    for _ in 0..200 {
        session.poll();
        if !session.is_busy() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("engine did not respond in time");
}

#[test]
fn start_produces_a_scene_and_seeds_the_transcript() {
    common::init();
    let text = ScriptedText::new(false);
    let mut session = session_over(text.clone(), StaticImage::new(true));

    session.start(KNIGHT_THEME);
    assert_eq!(session.phase(), GamePhase::Loading);
    assert!(session.is_busy());

    poll_until_settled(&mut session);

    assert_eq!(session.phase(), GamePhase::Playing);
    let scene = session.scene().expect("scene after successful start");
    assert!(!scene.description.is_empty());
    assert!(!scene.choices.is_empty());

    assert_eq!(
        session.transcript().entries(),
        [
            format!("Adventure Theme: {KNIGHT_THEME}"),
            format!("Scene 1: {}", scene.description),
        ]
    );
}

#[test]
fn chosen_action_text_reaches_the_next_prompt() {
    common::init();
    let text = ScriptedText::new(false);
    let mut session = session_over(text.clone(), StaticImage::new(true));

    session.start(KNIGHT_THEME);
    poll_until_settled(&mut session);

    session.choose("Enter the ruin");
    assert!(session.is_busy());
    poll_until_settled(&mut session);

    assert_eq!(session.phase(), GamePhase::Playing);
    let prompts = text.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("Enter the ruin"));
    assert!(prompts[1].contains(&format!("Adventure Theme: {KNIGHT_THEME}")));

    assert_eq!(
        session.transcript().entries()[2],
        "Player chose: \"Enter the ruin\""
    );
    assert!(session.transcript().entries()[3].starts_with("Scene 2: "));
}

#[test]
fn text_failure_reaches_error_state_without_an_image_request() {
    common::init();
    let image = StaticImage::new(true);
    let mut session = session_over(ScriptedText::new(true), image.clone());

    session.start(KNIGHT_THEME);
    poll_until_settled(&mut session);

    assert_eq!(session.phase(), GamePhase::Error);
    assert!(session.error_message().is_some());
    assert_eq!(image.calls.load(Ordering::SeqCst), 0);
    assert!(session.transcript().is_empty());
}

#[test]
fn missing_image_fails_the_turn() {
    common::init();
    let mut session = session_over(ScriptedText::new(false), StaticImage::new(false));

    session.start(KNIGHT_THEME);
    poll_until_settled(&mut session);

    assert_eq!(session.phase(), GamePhase::Error);
    let message = session.error_message().unwrap();
    assert!(message.contains("image"), "unexpected message: {message}");
    assert!(session.scene().is_none());
}

#[test]
fn restart_clears_error_and_story_state() {
    common::init();
    let mut session = session_over(ScriptedText::new(true), StaticImage::new(true));

    session.start(KNIGHT_THEME);
    poll_until_settled(&mut session);
    assert_eq!(session.phase(), GamePhase::Error);

    session.restart();

    assert_eq!(session.phase(), GamePhase::Start);
    assert!(session.error_message().is_none());
    assert!(session.transcript().is_empty());
    assert!(session.scene().is_none());
    assert!(session.theme().is_empty());
}

#[test]
fn choosing_while_loading_sends_no_second_command() {
    common::init();
    // No worker: commands stay observable in the channel.
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (_resp_tx, resp_rx) = mpsc::channel();
    let mut session = GameSession::with_channels(cmd_tx, resp_rx);

    session.start(KNIGHT_THEME);
    assert!(cmd_rx.try_recv().is_ok());

    session.choose("Enter the ruin");
    assert!(session.is_busy());
    assert!(cmd_rx.try_recv().is_err());
}

#[test]
fn stale_result_after_restart_is_discarded() {
    common::init();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let mut session = GameSession::with_channels(cmd_tx, resp_rx);

    session.start(KNIGHT_THEME);
    let _pending = cmd_rx.try_recv().unwrap();

    // Player gives up before the call resolves.
    session.restart();

    // The in-flight call resolves afterwards, tagged with the old generation.
    resp_tx
        .send(EngineResponse::SceneReady {
            generation: 1,
            scene: FullScene {
                description: "A scene from a game that no longer exists.".to_string(),
                choices: vec![Choice {
                    text: "Continue".to_string(),
                }],
                image_url: "data:image/jpeg;base64,ZmFrZQ==".to_string(),
            },
        })
        .unwrap();
    session.poll();

    assert_eq!(session.phase(), GamePhase::Start);
    assert!(session.scene().is_none());
    assert!(session.transcript().is_empty());
}
