//! Frontend module for the console UI
//!
//! This module contains the egui application that hosts the console:
//! - A menu bar for resetting the runtime and toggling display options
//! - The [`ConsolePanel`] with output log, input field, preview and suggestions
//!
//! All evaluation happens on the UI thread. Each submission is bounded by the
//! engine's operation limit.

mod console_panel;

pub use console_panel::{apply_completion, layout_job, to_color32, ConsolePanel, ConsolePanelState};

use crate::config::{ColorTheme, ConsoleConfig};
use crate::console::ConsoleSession;
use crate::highlight::ColorMap;
use std::path::PathBuf;

/// Main console application
pub struct ConsoleApp {
    session: ConsoleSession,
    config: ConsoleConfig,
    panel: ConsolePanelState,
    /// Where command history is saved on exit, if persistence is enabled
    history_path: Option<PathBuf>,
}

impl ConsoleApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: ConsoleSession,
        config: ConsoleConfig,
        history_path: Option<PathBuf>,
    ) -> Self {
        apply_visuals(&cc.egui_ctx, config.editor.dark_mode);
        Self {
            session,
            config,
            panel: ConsolePanelState::new(),
            history_path,
        }
    }

    fn set_dark_mode(&mut self, ctx: &egui::Context, dark: bool) {
        self.config.editor.dark_mode = dark;
        apply_visuals(ctx, dark);

        // Only the built-in palettes follow the mode; a theme file stays as is
        if self.config.theme_file.is_none() {
            self.config.theme = if dark {
                ColorTheme::default()
            } else {
                ColorTheme::light()
            };
        }
        self.session
            .set_colors(ColorMap::from_theme(&self.config.effective_theme()));
    }

    fn save_history(&self) {
        if !self.config.history.persist {
            return;
        }
        if let Some(path) = &self.history_path {
            if let Err(e) = self.session.history().save_to(path) {
                tracing::warn!("Failed to save command history: {}", e);
            }
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("Console", |ui| {
                if ui.button("Reset Environment").clicked() {
                    self.session.reset();
                    self.panel.refresh_assist(&self.session);
                    ui.close();
                }
                if ui.button("Clear Output").clicked() {
                    self.session.clear_output();
                    ui.close();
                }
                if ui.button("Clear Command History").clicked() {
                    self.session.history_mut().clear_command_history();
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark = self.config.editor.dark_mode;
                if ui.checkbox(&mut dark, "Dark Mode").changed() {
                    self.set_dark_mode(ctx, dark);
                }
                ui.checkbox(
                    &mut self.config.editor.show_highlight_preview,
                    "Highlighted Preview",
                );
                ui.checkbox(&mut self.config.editor.show_suggestions, "Suggestions");
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("Rhai console {}", env!("CARGO_PKG_VERSION")));
            });
        });
    }
}

fn apply_visuals(ctx: &egui::Context, dark: bool) {
    if dark {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.session.poll_output() > 0 {
            ctx.request_repaint();
        }

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window.size = (rect.width(), rect.height());
        }

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ConsolePanel::new(&mut self.session, &mut self.panel, &self.config.editor).show(ui);
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.save_history();

        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save console config: {}", e);
        }
        tracing::info!("Console closed");
    }
}
