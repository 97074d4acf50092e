//! Debug domain: state for the developer tools.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Player ignores non-lethal hits while set.
    pub invincible: bool,
    /// Whether to show the info overlay (position, trap states, etc.)
    pub show_info: bool,
    /// Message to display temporarily, with seconds left
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Counts the status message down, clearing it once expired.
    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(text, _)| text.as_str())
    }
}
