use clap::Parser;
use eframe::egui;
use overlay_panel::gui::OverlayPanelApp;
use overlay_panel::samples::SampleGallery;
use overlay_panel::session::PanelSession;
use overlay_panel::settings::PanelSettings;
use overlay_panel::submission::HttpRenderService;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(name = "overlay_panel", about = "Control panel for the image text-overlay service")]
struct Args {
    /// Panel configuration file.
    #[arg(long, default_value = "settings.json")]
    settings: String,
    /// Share URL (or bare query string) to restore the form from.
    #[arg(long)]
    url: Option<String>,
    /// Force debug logging regardless of the configuration file.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = PanelSettings::load(&args.settings)?;
    overlay_panel::logging::init(args.debug || settings.debug_logging, settings.log_file());
    if !Path::new(&args.settings).exists() {
        match settings.save(&args.settings) {
            Ok(()) => tracing::info!("wrote default settings to {}", args.settings),
            Err(e) => tracing::warn!("could not write {}: {e}", args.settings),
        }
    }

    let service = HttpRenderService::new(&settings.server_url)?;
    let gallery = SampleGallery::load(
        &settings.samples,
        settings.samples_dir.as_deref().map(Path::new),
    );
    let session = PanelSession::open(settings.share_base()?, gallery, args.url.as_deref());
    tracing::info!(server = %service.base(), "starting overlay panel");

    let (w, h) = settings.window_size.unwrap_or((1000, 760));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w as f32, h as f32])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Overlay Panel",
        native_options,
        Box::new(move |_cc| Box::new(OverlayPanelApp::new(session, settings, service))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run panel: {e}"))
}
