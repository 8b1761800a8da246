use crate::model::transcript::Transcript;

/// Whether the requested scene opens the adventure or continues it after a
/// player choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Opening,
    Continuation { choice: String },
}

/// Builds the instruction sent to the text model.
/// This struct is intentionally dumb: it only formats text.
/// No parsing, no networking, no session logic.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(theme: &str, transcript: &Transcript, turn: &Turn) -> String {
        match turn {
            Turn::Opening => Self::build_opening(theme),
            Turn::Continuation { choice } => Self::build_continuation(transcript, choice),
        }
    }

    fn build_opening(theme: &str) -> String {
        let mut prompt = String::new();

        push_storyteller_role(&mut prompt, false);
        prompt.push_str(&format!(
            "Generate the starting scene for a game with the theme: \"{theme}\".\n"
        ));
        prompt.push_str("Describe the scene vividly and atmospherically.\n");
        prompt.push_str(
            "Then, provide 3 distinct and interesting choices for the player to make.\n",
        );
        push_format_reminder(&mut prompt);

        prompt
    }

    fn build_continuation(transcript: &Transcript, choice: &str) -> String {
        let mut prompt = String::new();

        push_storyteller_role(&mut prompt, true);
        push_story_so_far(&mut prompt, transcript);
        push_player_action(&mut prompt, choice);
        prompt.push_str("Continue the story based on this choice.\n");
        prompt.push_str("Describe the new scene vividly and atmospherically.\n");
        prompt.push_str("Provide 3 new, distinct, and interesting choices.\n");
        prompt.push_str("Keep the story engaging and coherent.\n");
        push_format_reminder(&mut prompt);

        prompt
    }
}

fn push_storyteller_role(prompt: &mut String, continuing: bool) {
    if continuing {
        prompt.push_str("You are a master storyteller continuing a text-based adventure game.\n");
    } else {
        prompt.push_str("You are a master storyteller for a text-based adventure game.\n");
    }
}

fn push_story_so_far(prompt: &mut String, transcript: &Transcript) {
    prompt.push_str("This is the story so far:\n");
    prompt.push_str(&transcript.joined());
    prompt.push_str("\n\n");
}

fn push_player_action(prompt: &mut String, choice: &str) {
    prompt.push_str(&format!("The player's last action was: \"{choice}\"\n\n"));
}

fn push_format_reminder(prompt: &mut String) {
    prompt.push_str("The output must be a JSON object that conforms to the provided schema.\n");
}
