//! Vyzio frontend application.
//!
//! Supports both WASM (for web browsers) and native modes.

#![warn(clippy::all, rust_2018_idioms)]

use vyzio_frontend::VyzioApp;

// ============================================================================
// WASM Entry Point
// ============================================================================

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    // Initialize panic handler for better error messages in browser console
    console_error_panic_hook::set_once();

    // Initialize tracing for WASM
    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");
        let canvas = document
            .get_element_by_id("vyzio_app_canvas")
            .expect("Failed to find vyzio_app_canvas")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("vyzio_app_canvas is not a canvas");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(VyzioApp::new(cc, Default::default())))),
            )
            .await
            .expect("Failed to start eframe");
    });
}

// ============================================================================
// Native Entry Point
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Vyzio - login client
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the Vyzio server
    #[arg(long)]
    server_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,

    /// Clear the password field after a rejected login
    #[arg(long)]
    clear_password_on_failure: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use vyzio_frontend::config::Config;

    let args = Args::parse();

    let config = Config::from_figment(
        args.server_url,
        args.log_level,
        args.log_file,
        args.clear_password_on_failure.then_some(true),
    )?;

    let _log_guard = vyzio_frontend::logging::init_tracing(
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    )?;

    tracing::info!("Starting Vyzio frontend in native mode");

    // Async requests are spawned onto this runtime from the UI thread
    let runtime = tokio::runtime::Runtime::new()?;
    let _runtime_guard = runtime.enter();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 420.0])
            .with_title("Vyzio"),
        ..Default::default()
    };

    let server_url = config.server_url.clone();
    let settings = config.app_settings();

    eframe::run_native(
        "Vyzio",
        native_options,
        Box::new(move |cc| Ok(Box::new(VyzioApp::new(cc, &server_url, settings)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {}", e))
}
