use crate::session::Preview;
use eframe::egui;

/// Decoded preview texture, rebuilt whenever the session shows a new render.
pub struct PreviewPanel {
    texture: Option<(u64, egui::TextureHandle)>,
    failed: Option<u64>,
    zoom: f32,
}

impl Default for PreviewPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewPanel {
    pub fn new() -> Self {
        Self {
            texture: None,
            failed: None,
            zoom: 1.0,
        }
    }

    fn load_texture(&mut self, ctx: &egui::Context, preview: &Preview) {
        if self.texture.as_ref().map(|(id, _)| *id) == Some(preview.id())
            || self.failed == Some(preview.id())
        {
            return;
        }
        match decode_texture(ctx, &format!("preview-{}", preview.id()), &preview.fetch()) {
            Ok(tex) => {
                self.texture = Some((preview.id(), tex));
                self.failed = None;
            }
            Err(e) => {
                tracing::error!("failed to decode preview: {e}");
                self.texture = None;
                self.failed = Some(preview.id());
            }
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, preview: &Preview) {
        self.load_texture(ui.ctx(), preview);
        ui.add(egui::Slider::new(&mut self.zoom, 0.1..=3.0).text("Zoom"));
        match &self.texture {
            Some((_, tex)) => {
                let size = fit_width(tex.size_vec2(), ui.available_width()) * self.zoom;
                egui::ScrollArea::both()
                    .id_source("preview_scroll")
                    .max_height(420.0)
                    .show(ui, |ui| {
                        ui.add(egui::Image::new(tex).fit_to_exact_size(size));
                    });
            }
            None => {
                ui.label("Failed to load image");
            }
        }
    }
}

fn fit_width(size: egui::Vec2, width: f32) -> egui::Vec2 {
    if size.x <= width || size.x <= 0.0 {
        size
    } else {
        size * (width / size.x)
    }
}

pub fn decode_texture(
    ctx: &egui::Context,
    name: &str,
    bytes: &[u8],
) -> anyhow::Result<egui::TextureHandle> {
    let img = image::load_from_memory(bytes)?;
    let size = [img.width() as usize, img.height() as usize];
    let rgba = img.to_rgba8();
    Ok(ctx.load_texture(
        name,
        egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()),
        egui::TextureOptions::LINEAR,
    ))
}
