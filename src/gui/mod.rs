mod alert_modal;
mod form_panel;
mod preview_panel;

pub use alert_modal::AlertModal;
pub use form_panel::form_ui;
pub use preview_panel::{decode_texture, PreviewPanel};

use crate::clipboard::{ClipboardBackend, CopyButton, PlatformCopy, SystemClipboard};
use crate::notify::Notifier;
use crate::session::PanelSession;
use crate::settings::PanelSettings;
use crate::submission::{HttpRenderService, RenderService, Submission};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

/// Routes blocking alerts to the modal and passing notices to toasts.
struct PanelNotifier<'a> {
    alerts: &'a mut AlertModal,
    toasts: &'a mut Toasts,
    enable_toasts: bool,
    toast_duration: f32,
}

impl Notifier for PanelNotifier<'_> {
    fn alert(&mut self, message: &str) {
        self.alerts.alert(message);
    }

    fn info(&mut self, message: &str) {
        if self.enable_toasts {
            self.toasts.add(Toast {
                text: message.to_string().into(),
                kind: ToastKind::Info,
                options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
            });
        }
    }
}

fn panel_notifier<'a>(
    alerts: &'a mut AlertModal,
    toasts: &'a mut Toasts,
    settings: &PanelSettings,
) -> PanelNotifier<'a> {
    PanelNotifier {
        alerts,
        toasts,
        enable_toasts: settings.enable_toasts,
        toast_duration: settings.toast_duration,
    }
}

struct InFlight {
    submission: Submission,
    rx: Receiver<anyhow::Result<Vec<u8>>>,
}

pub struct OverlayPanelApp {
    pub session: PanelSession,
    settings: PanelSettings,
    service: Arc<HttpRenderService>,
    in_flight: Option<InFlight>,
    alerts: AlertModal,
    toasts: Toasts,
    preview: PreviewPanel,
    share_button: CopyButton,
    settings_button: CopyButton,
    system_clipboard: Option<SystemClipboard>,
    platform_copy: PlatformCopy,
    upload_input: String,
    thumbnails_rx: Option<Receiver<(String, anyhow::Result<Vec<u8>>)>>,
    thumbnails: HashMap<String, egui::TextureHandle>,
}

impl OverlayPanelApp {
    pub fn new(session: PanelSession, settings: PanelSettings, service: HttpRenderService) -> Self {
        let service = Arc::new(service);
        let thumbnails_rx = spawn_thumbnail_loader(&service, session.gallery.names().to_vec());
        Self {
            session,
            settings,
            service,
            in_flight: None,
            alerts: AlertModal::default(),
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            preview: PreviewPanel::new(),
            share_button: CopyButton::share(),
            settings_button: CopyButton::settings(),
            system_clipboard: SystemClipboard::new(),
            platform_copy: PlatformCopy::default(),
            upload_input: String::new(),
            thumbnails_rx,
            thumbnails: HashMap::new(),
        }
    }

    /// Start a render on a worker thread.
    pub fn start_submit(&mut self) {
        let mut notifier = panel_notifier(&mut self.alerts, &mut self.toasts, &self.settings);
        let Some(submission) = self.session.begin_submit(&mut notifier) else {
            return;
        };
        let (tx, rx) = channel();
        let service = Arc::clone(&self.service);
        let job = submission.clone();
        std::thread::spawn(move || {
            let _ = tx.send(service.process(&job));
        });
        self.in_flight = Some(InFlight { submission, rx });
    }

    fn poll_submit(&mut self) {
        let Some(in_flight) = self.in_flight.as_ref() else {
            return;
        };
        let result = match in_flight.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(anyhow::anyhow!("render worker stopped")),
        };
        if let Some(in_flight) = self.in_flight.take() {
            let mut notifier = panel_notifier(&mut self.alerts, &mut self.toasts, &self.settings);
            self.session
                .finish_submit(in_flight.submission, result, &mut notifier);
        }
    }

    fn poll_thumbnails(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.thumbnails_rx else {
            return;
        };
        let mut finished = false;
        loop {
            match rx.try_recv() {
                Ok((name, Ok(bytes))) => {
                    match decode_texture(ctx, &format!("sample-{name}"), &bytes) {
                        Ok(tex) => {
                            self.thumbnails.insert(name, tex);
                        }
                        Err(e) => tracing::warn!("thumbnail for '{name}' undecodable: {e}"),
                    }
                }
                Ok((name, Err(e))) => tracing::warn!("thumbnail for '{name}' failed: {e}"),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }
        if finished {
            self.thumbnails_rx = None;
        }
    }

    pub fn handle_dropped_files(&mut self, files: Vec<egui::DroppedFile>) {
        if let Some(path) = files.into_iter().find_map(|f| f.path) {
            self.upload_input = path.display().to_string();
            self.session.attach_upload(path);
        }
    }

    fn copy_share_url(&mut self) {
        let primary = self
            .system_clipboard
            .as_mut()
            .map(|c| c as &mut dyn ClipboardBackend);
        let mut notifier = panel_notifier(&mut self.alerts, &mut self.toasts, &self.settings);
        self.session.copy_share_url(
            primary,
            &mut self.platform_copy,
            &mut self.share_button,
            &mut notifier,
            Instant::now(),
        );
    }

    fn copy_settings_url(&mut self) {
        let primary = self
            .system_clipboard
            .as_mut()
            .map(|c| c as &mut dyn ClipboardBackend);
        let mut notifier = panel_notifier(&mut self.alerts, &mut self.toasts, &self.settings);
        self.session.copy_settings_url(
            primary,
            &mut self.platform_copy,
            &mut self.settings_button,
            &mut notifier,
            Instant::now(),
        );
    }

    fn download(&mut self) {
        let dir = self.settings.download_dir();
        let mut notifier = panel_notifier(&mut self.alerts, &mut self.toasts, &self.settings);
        self.session.download(&dir, &mut notifier);
    }

    fn sample_gallery_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sample images");
        if self.session.gallery.names().is_empty() {
            ui.label("No sample images configured.");
            return;
        }
        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for name in self.session.gallery.names() {
                let selected = self.session.gallery.is_selected(name);
                let resp = match self.thumbnails.get(name) {
                    Some(tex) => {
                        let image = egui::Image::new(tex).fit_to_exact_size(egui::vec2(96.0, 64.0));
                        ui.add(egui::ImageButton::new(image).selected(selected))
                            .on_hover_text(name.as_str())
                    }
                    None => ui.selectable_label(selected, name.as_str()),
                };
                if resp.clicked() {
                    clicked = Some(name.clone());
                }
            }
        });
        if let Some(name) = clicked {
            self.upload_input.clear();
            self.session.select_sample(&name);
        }
    }

    fn upload_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Upload");
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.upload_input)
                    .hint_text("Path to image, or drop a file here"),
            );
            if ui.button("Attach").clicked() && !self.upload_input.trim().is_empty() {
                let path = PathBuf::from(self.upload_input.trim());
                self.session.attach_upload(path);
            }
        });
        if let Some(path) = self.session.form().and_then(|f| f.upload()) {
            ui.label(format!("Attached: {}", path.display()));
        }
    }

    fn share_ui(&mut self, ui: &mut egui::Ui) {
        if self.session.share.visible {
            ui.group(|ui| {
                ui.label("🔗 Share these settings");
                ui.horizontal(|ui| {
                    let mut shown = self.session.share.share_url.clone();
                    ui.add(egui::TextEdit::singleline(&mut shown).desired_width(f32::INFINITY));
                });
                let button = egui::Button::new(self.share_button.label()).fill(self.share_button.fill());
                if ui.add(button).clicked() {
                    self.copy_share_url();
                }
            });
        }
        egui::CollapsingHeader::new("Settings URL").show(ui, |ui| {
            let mut shown = self.session.share.settings_url.clone();
            ui.add(
                egui::TextEdit::multiline(&mut shown)
                    .desired_rows(2)
                    .desired_width(f32::INFINITY),
            );
            let button =
                egui::Button::new(self.settings_button.label()).fill(self.settings_button.fill());
            if ui.add(button).clicked() {
                self.copy_settings_url();
            }
        });
    }

    fn results_ui(&mut self, ui: &mut egui::Ui) {
        if self.session.is_loading() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Rendering...");
            });
        }
        if self.session.preview_visible {
            if let Some(preview) = self.session.preview().cloned() {
                ui.heading("Preview");
                self.preview.ui(ui, &preview);
                if ui.button("⬇ Download").clicked() {
                    self.download();
                }
            }
        }
    }
}

fn spawn_thumbnail_loader(
    service: &Arc<HttpRenderService>,
    names: Vec<String>,
) -> Option<Receiver<(String, anyhow::Result<Vec<u8>>)>> {
    if names.is_empty() {
        return None;
    }
    let (tx, rx) = channel();
    let service = Arc::clone(service);
    std::thread::spawn(move || {
        for name in names {
            let result = service.sample_image(&name);
            if tx.send((name, result)).is_err() {
                break;
            }
        }
    });
    Some(rx)
}

impl eframe::App for OverlayPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.platform_copy.attach();
        self.poll_submit();
        self.poll_thumbnails(ctx);

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.handle_dropped_files(dropped);
        }

        let now = Instant::now();
        for button in [&mut self.share_button, &mut self.settings_button] {
            if let Some(left) = button.refresh(now) {
                ctx.request_repaint_after(left);
            }
        }
        if self.in_flight.is_some() || self.thumbnails_rx.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        let enabled = !self.alerts.is_open();

        egui::SidePanel::left("overlay_form")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(enabled, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.heading("🖼 Text overlay");
                        let changed = match self.session.form_mut() {
                            Some(form) => form_ui(ui, form),
                            None => false,
                        };
                        if changed {
                            self.session.update_share_url();
                        }
                        ui.add_space(8.0);
                        let submit = ui.add_enabled(
                            !self.session.is_loading(),
                            egui::Button::new("✨ Render"),
                        );
                        if submit.clicked() {
                            self.start_submit();
                        }
                    });
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.sample_gallery_ui(ui);
                    ui.separator();
                    self.upload_ui(ui);
                    ui.separator();
                    self.results_ui(ui);
                    ui.separator();
                    self.share_ui(ui);
                });
            });
        });

        self.alerts.ui(ctx);
        if self.settings.enable_toasts {
            self.toasts.show(ctx);
        }
        self.platform_copy.flush(ctx);
    }
}
