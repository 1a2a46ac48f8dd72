//! # StatusBar Component
//!
//! Top line of the screen. Doubles as the live region: move announcements
//! and rejection notices are written to `status_message` and stay until the
//! next one replaces them.
//!
//! The text changes based on state:
//!
//! 1. **Status message**: `"Menuboard (rev 3) | You've moved ..."`
//! 2. **Default**: `"Menuboard (rev 3)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Span;

/// Top status bar showing the board revision and the latest announcement.
pub struct StatusBar {
    /// Revision of the committed board state
    pub revision: u64,
    /// Latest announcement or notice
    pub status_message: String,
}

impl StatusBar {
    pub fn new(revision: u64, status_message: String) -> Self {
        Self {
            revision,
            status_message,
        }
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let text = if self.status_message.is_empty() {
            format!("Menuboard (rev {})", self.revision)
        } else {
            format!("Menuboard (rev {}) | {}", self.revision, self.status_message)
        };

        frame.render_widget(Span::raw(text), area);
    }
}
