//! Terminal front-end for a capture session.

use std::io::Write;

use chacha_session_model::{CapturedPhoto, Controls, SessionRenderer, SessionView};

/// Draws the slot row, trigger, and countdown on stdout.
pub struct TerminalRenderer {
    last_line: Option<String>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { last_line: None }
    }

    fn slot_row(view: &SessionView) -> String {
        (0..view.total_steps)
            .map(|slot| {
                if slot < view.filled_slots {
                    "[■]".to_string()
                } else if view.active_slot == Some(slot) {
                    "[▶]".to_string()
                } else {
                    "[ ]".to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRenderer for TerminalRenderer {
    fn render(&mut self, view: &SessionView) {
        let controls = match &view.controls {
            Controls::Trigger { label, enabled: true } => format!("{label}  (Enter)"),
            Controls::Trigger { label, enabled: false } => format!("{label}  …"),
            Controls::ExportReady => "Strip complete: [Enter] export  [r] reset".to_string(),
        };
        let line = format!(
            "{}  theme: {}  {}",
            Self::slot_row(view),
            view.theme,
            controls
        );
        if self.last_line.as_deref() != Some(line.as_str()) {
            println!("{line}");
            self.last_line = Some(line);
        }
    }

    fn countdown(&mut self, remaining: Option<u32>) {
        match remaining {
            Some(n) => {
                print!("  {n}… ");
                let _ = std::io::stdout().flush();
            }
            None => println!(),
        }
    }

    fn flash(&mut self) {
        println!("  ✨ *click*");
    }

    fn shutter(&mut self, photo: &CapturedPhoto) {
        println!(
            "  Saved photo {} ({}x{})",
            photo.slot + 1,
            photo.width,
            photo.height
        );
    }
}
