mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::draw`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use extrude_map_lib::draw;
pub use extrude_map_lib::extrude;
pub use extrude_map_lib::map;
pub use extrude_map_lib::state;

use app::MapApp;
use state::AppSettings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "extrude_map=info,extrude_map_lib=info".into()),
        )
        .init();

    let (settings, persist) = match parse_settings_arg() {
        Some(settings) => (settings, false),
        None => (AppSettings::load(), true),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Extrude Map")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "extrude-map",
        native_options,
        Box::new(move |cc| Ok(Box::new(MapApp::new(cc, settings, persist)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// `--settings <path>` loads settings from a file instead of the user config.
fn parse_settings_arg() -> Option<AppSettings> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--settings" && i + 1 < args.len() {
            let path = std::path::Path::new(&args[i + 1]);
            match AppSettings::load_from(path) {
                Ok(settings) => {
                    tracing::info!("Loaded settings from {}", path.display());
                    return Some(settings);
                }
                Err(e) => tracing::error!("{e}"),
            }
            break;
        }
        i += 1;
    }
    None
}
