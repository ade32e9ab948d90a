//! Console panel widget
//!
//! Shows the output log, the input field, a highlighted preview of the input and
//! the suggestion popup.
//!
//! ## Keys (while the input has focus)
//!
//! - `Enter` runs the input, `Shift+Enter` inserts a newline
//! - `Tab` accepts the closest suggestion
//! - `Up` / `Down` walk the command history when the input is a single line
//! - `Ctrl+Z` / `Ctrl+Y` (`Cmd` on macOS) undo and redo edits

use crate::completion::parse_word_path;
use crate::config::EditorPreferences;
use crate::console::{Assist, ConsoleSession};
use crate::highlight::{HexColor, Highlighted};
use crate::scripting::OutputKind;
use egui::text::{CCursor, CCursorRange, LayoutJob};
use egui::{Color32, FontId, Key, Modifiers, RichText, TextFormat, Ui};

/// Input field state kept between frames
#[derive(Debug, Clone, Default)]
pub struct ConsolePanelState {
    /// Current input text
    pub input: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Completions for the current cursor position
    pub assist: Assist,
}

impl ConsolePanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute completions from the live namespace
    pub fn refresh_assist(&mut self, session: &ConsoleSession) {
        self.assist = session.assist(&self.input, self.cursor);
    }

    /// Replace the input and put the cursor at its end
    fn set_input(&mut self, text: String) {
        self.cursor = text.chars().count();
        self.input = text;
    }
}

/// Edits requested by keys consumed before the text field saw them
#[derive(Debug, Default)]
struct KeyActions {
    submit: bool,
    accept: bool,
    history_up: bool,
    history_down: bool,
    undo: bool,
    redo: bool,
}

impl KeyActions {
    fn read(ui: &mut Ui, can_accept: bool, single_line: bool) -> Self {
        ui.input_mut(|i| {
            let mut actions = KeyActions::default();
            // consume_key matches Shift+Enter too, so check shift first
            if !i.modifiers.shift {
                actions.submit = i.consume_key(Modifiers::NONE, Key::Enter);
            }
            if can_accept {
                actions.accept = i.consume_key(Modifiers::NONE, Key::Tab);
            }
            if single_line {
                actions.history_up = i.consume_key(Modifiers::NONE, Key::ArrowUp);
                actions.history_down = i.consume_key(Modifiers::NONE, Key::ArrowDown);
            }
            actions.redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            if !actions.redo {
                actions.undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            }
            actions
        })
    }
}

/// Console panel widget
pub struct ConsolePanel<'a> {
    session: &'a mut ConsoleSession,
    state: &'a mut ConsolePanelState,
    prefs: &'a EditorPreferences,
}

impl<'a> ConsolePanel<'a> {
    pub fn new(
        session: &'a mut ConsoleSession,
        state: &'a mut ConsolePanelState,
        prefs: &'a EditorPreferences,
    ) -> Self {
        Self {
            session,
            state,
            prefs,
        }
    }

    /// Show the console panel
    pub fn show(self, ui: &mut Ui) {
        let Self {
            session,
            state,
            prefs,
        } = self;
        let font = FontId::monospace(prefs.font_size);
        let input_id = ui.make_persistent_id("console_input");

        // Output log
        let log_height = (ui.available_height() - 8.0 * prefs.font_size - 40.0).max(60.0);
        egui::ScrollArea::vertical()
            .id_salt("console_output")
            .max_height(log_height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in session.output() {
                    ui.label(
                        RichText::new(line.display_text())
                            .font(font.clone())
                            .color(output_color(line.kind, ui.visuals())),
                    );
                }
            });

        ui.separator();

        // Keys the console handles itself
        let mut replaced = false;
        if ui.memory(|m| m.has_focus(input_id)) {
            let can_accept = prefs.show_suggestions && state.assist.closest.is_some();
            let single_line = !state.input.contains('\n');
            let actions = KeyActions::read(ui, can_accept, single_line);

            let replacement = if actions.submit {
                let text = std::mem::take(&mut state.input);
                if let Err(e) = session.submit(&text) {
                    tracing::debug!("Console command failed: {}", e);
                }
                Some(String::new())
            } else if actions.accept {
                state.assist.closest.as_deref().map(|completion| {
                    let (text, cursor) = apply_completion(&state.input, state.cursor, completion);
                    state.cursor = cursor;
                    text
                })
            } else if actions.history_up {
                session.history_mut().previous_command(&state.input)
            } else if actions.history_down {
                session.history_mut().next_command()
            } else if actions.redo {
                session.history_mut().redo(&state.input)
            } else if actions.undo {
                session.history_mut().undo(&state.input)
            } else {
                None
            };

            if let Some(text) = replacement {
                // Completion places the cursor itself; everything else goes to the end
                let cursor = state.cursor;
                state.set_input(text);
                if actions.accept {
                    state.cursor = cursor;
                }
                replaced = true;
            }
        }

        // Input field
        let previous_cursor = state.cursor;
        let output = egui::TextEdit::multiline(&mut state.input)
            .id(input_id)
            .code_editor()
            .font(font.clone())
            .desired_rows(3)
            .desired_width(f32::INFINITY)
            .hint_text("Rhai code. Enter runs it, Shift+Enter adds a line.")
            .show(ui);
        let response = output.response;

        if replaced {
            let mut edit_state = output.state;
            edit_state
                .cursor
                .set_char_range(Some(CCursorRange::one(CCursor::new(state.cursor))));
            edit_state.store(ui.ctx(), response.id);
            response.request_focus();
        } else if let Some(range) = output.cursor_range {
            state.cursor = range.primary.index;
        }

        if response.changed() {
            session.history_mut().on_text_changed(&state.input);
        }
        if replaced || response.changed() || state.cursor != previous_cursor {
            state.refresh_assist(session);
        }

        // Highlighted preview
        if prefs.show_highlight_preview && !state.input.is_empty() {
            let highlighted = session.segments(&state.input);
            ui.label(layout_job(&highlighted, &font));
            if let Some(err) = &highlighted.halted {
                ui.label(RichText::new(err.to_string()).small().weak());
            }
        }

        // Suggestion popup
        if prefs.show_suggestions && response.has_focus() && !state.assist.suggestions.is_empty() {
            let picked = egui::Popup::from_response(&response)
                .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
                .show(|ui| {
                    let mut picked = None;
                    egui::ScrollArea::vertical()
                        .max_height(prefs.font_size * 1.6 * prefs.max_visible_suggestions as f32)
                        .show(ui, |ui| {
                            for (i, name) in state.assist.suggestions.iter().enumerate() {
                                let is_closest = state.assist.closest.as_deref() == Some(name.as_str());
                                if ui
                                    .selectable_label(is_closest, RichText::new(name).monospace())
                                    .clicked()
                                {
                                    picked = Some(i);
                                }
                            }
                        });
                    picked
                })
                .and_then(|r| r.inner);

            if let Some(completion) = picked.and_then(|i| state.assist.suggestions.get(i).cloned()) {
                let (text, cursor) = apply_completion(&state.input, state.cursor, &completion);
                state.input = text;
                state.cursor = cursor;
                session.history_mut().on_text_changed(&state.input);

                let mut edit_state = egui::text_edit::TextEditState::load(ui.ctx(), response.id)
                    .unwrap_or_default();
                edit_state
                    .cursor
                    .set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
                edit_state.store(ui.ctx(), response.id);
                response.request_focus();
                state.refresh_assist(session);
            }
        }
    }
}

/// Replace the prefix left of `cursor` with `completion`
///
/// Returns the new text and the cursor position after the inserted name.
pub fn apply_completion(text: &str, cursor: usize, completion: &str) -> (String, usize) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let prefix_len = parse_word_path(text, cursor).prefix.chars().count();
    let start = cursor - prefix_len;

    let mut out: String = chars[..start].iter().collect();
    out.push_str(completion);
    let new_cursor = out.chars().count();
    out.extend(&chars[cursor..]);
    (out, new_cursor)
}

pub fn to_color32(color: HexColor) -> Color32 {
    let [r, g, b] = color.to_array();
    Color32::from_rgb(r, g, b)
}

/// Build a layout job from highlighted segments
pub fn layout_job(highlighted: &Highlighted<'_>, font: &FontId) -> LayoutJob {
    let mut job = LayoutJob::default();
    for segment in &highlighted.segments {
        job.append(
            segment.text,
            0.0,
            TextFormat {
                font_id: font.clone(),
                color: to_color32(segment.color),
                ..Default::default()
            },
        );
    }
    job
}

fn output_color(kind: OutputKind, visuals: &egui::Visuals) -> Color32 {
    match kind {
        OutputKind::Result => visuals.text_color(),
        OutputKind::Print => visuals.weak_text_color(),
        OutputKind::Error => visuals.error_fg_color,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{ColorMap, Highlighter};

    #[test]
    fn test_apply_completion_replaces_prefix() {
        assert_eq!(apply_completion("he", 2, "hello"), ("hello".to_string(), 5));
        assert_eq!(
            apply_completion("Console.ve + 1", 10, "version"),
            ("Console.version + 1".to_string(), 15)
        );
    }

    #[test]
    fn test_apply_completion_after_separator() {
        assert_eq!(apply_completion("x.", 2, "len"), ("x.len".to_string(), 5));
    }

    #[test]
    fn test_apply_completion_unicode() {
        assert_eq!(apply_completion("é.ab", 4, "abc"), ("é.abc".to_string(), 5));
        // Cursor past the end is clamped
        assert_eq!(apply_completion("lo", 9, "log"), ("log".to_string(), 3));
    }

    #[test]
    fn test_layout_job_covers_input() {
        let colors = ColorMap::default();
        let highlighter = Highlighter::new(&colors);
        let highlighted = highlighter.segments("let x = \"<a>\";");
        let job = layout_job(&highlighted, &FontId::monospace(12.0));

        assert_eq!(job.text, "let x = \"<a>\";");
        assert_eq!(job.sections.len(), highlighted.segments.len());
    }

    #[test]
    fn test_to_color32() {
        assert_eq!(
            to_color32(HexColor::rgb(0x56, 0x9C, 0xD6)),
            Color32::from_rgb(86, 156, 214)
        );
    }
}
