use crate::notify::Notifier;
use eframe::egui;
use std::collections::VecDeque;

/// Blocking message box. Messages queue up and are acknowledged one at a
/// time; while one is open the rest of the panel is disabled.
#[derive(Debug, Default)]
pub struct AlertModal {
    queue: VecDeque<String>,
}

impl AlertModal {
    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.queue.push_back(message.into());
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let Some(message) = self.queue.front().cloned() else {
            return;
        };
        let mut acknowledged = false;
        let mut open = true;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        if acknowledged || !open {
            self.queue.pop_front();
        }
    }
}

impl Notifier for AlertModal {
    fn alert(&mut self, message: &str) {
        self.push(message);
    }
}
