//! Saturation Adjustment Tool
//!
//! A Slint desktop application that loads an image, adjusts its color
//! saturation with a slider, previews the result and saves it as
//! `adjusted-image.jpg`.
//!
//! # Architecture
//! - `config`: TOML settings stored in the platform config directory
//! - `logic`: Slint callback wiring; the pixel work lives in `image-effect`
//! - `desktop_main`: logger, config and window setup

slint::include_modules!();

#[macro_use]
extern crate derivative;

mod config;
mod logic;

/// Initializes the logger.
///
/// Each line carries a local timestamp, the level, the source file name and
/// line number.
pub fn init_logger() {
    use std::io::Write;

    env_logger::builder()
        .filter_module("winit", log::LevelFilter::Warn)
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn ui_before() {
    init_logger();

    if let Err(e) = config::init() {
        log::warn!("init config failed, fall back to defaults. {e:?}");
    }

    #[cfg(target_os = "linux")]
    {
        _ = slint::set_xdg_app_id("saturation-tool".to_string());
    }
}

fn ui_after(ui: &AppWindow) {
    logic::init(ui);
}

/// Main entry point for the desktop application.
pub async fn desktop_main() -> anyhow::Result<()> {
    log::debug!("start...");

    ui_before();
    let ui = AppWindow::new()?;
    ui_after(&ui);

    global_util!(ui).invoke_update_window_size();

    ui.run()?;

    log::debug!("exit...");
    Ok(())
}
