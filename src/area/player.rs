//! The occupant the core writes narrative text into

use crate::core::types::Position;

/// A player avatar as seen by the area graph
///
/// The core only ever appends to `output`; draining it is the session
/// layer's job.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub position: Position,
    output: String,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            output: String::new(),
        }
    }

    /// Append one line of narrative
    pub fn say(&mut self, line: impl AsRef<str>) {
        self.output.push_str(line.as_ref());
        self.output.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.output.push('\n');
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Drain everything written so far
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
