/// Separator used when the transcript is flattened into a prompt.
pub const ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// Append-only log of the story so far: the theme line, then alternating
/// scene descriptions and player choices.
///
/// Lives for one playthrough and is cleared on restart. Entries are only
/// appended after a turn fully succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Flattens the log for embedding in a continuation prompt.
    pub fn joined(&self) -> String {
        self.entries.join(ENTRY_SEPARATOR)
    }

    /// Records the theme and the opening scene. Replaces any prior content
    /// so a fresh start never inherits stale story lines.
    pub fn record_opening(&mut self, theme: &str, description: &str) {
        self.entries.clear();
        self.entries.push(format!("Adventure Theme: {theme}"));
        self.entries.push(format!("Scene 1: {description}"));
    }

    /// Records one completed turn: the choice the player made and the scene
    /// it led to.
    pub fn record_turn(&mut self, choice: &str, description: &str) {
        let scene_number = self.entries.len() / 2 + 1;
        self.entries.push(format!("Player chose: \"{choice}\""));
        self.entries
            .push(format!("Scene {scene_number}: {description}"));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
