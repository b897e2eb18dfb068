use super::toast;
use crate::{
    config, global_util,
    slint_generatedAppWindow::{AppWindow, Theme},
};
use image_effect::loader::SUPPORTED_EXTENSIONS;
use slint::{ComponentHandle, Weak};
use std::path::{Path, PathBuf};

pub fn init(ui: &AppWindow) {
    init_theme(ui);

    let ui_weak = ui.as_weak();
    global_util!(ui).on_update_window_size(move || {
        let ui = ui_weak.unwrap();
        let preference = config::all().preference;

        let scale = ui.window().scale_factor();
        let psize = slint::PhysicalSize::from_logical(
            slint::LogicalSize {
                width: preference.win_width.max(500) as f32,
                height: preference.win_height.max(400) as f32,
            },
            scale,
        );
        ui.window().set_size(psize);
    });
}

fn init_theme(ui: &AppWindow) {
    let preference = config::all().preference;
    let theme = ui.global::<Theme>();

    theme.set_font_size(preference.font_size.clamp(10, 50) as i32);
    theme.set_is_dark(preference.is_dark);
}

/// Blocks on the native file dialog; call it from a background task.
pub fn picker_image(ui: Weak<AppWindow>, title: &str) -> Option<PathBuf> {
    let result = native_dialog::DialogBuilder::file()
        .set_title(title)
        .add_filter("Image", SUPPORTED_EXTENSIONS)
        .open_single_file()
        .show();

    match result {
        Ok(Some(path)) => Some(path),
        Err(e) => {
            toast::async_toast_warn(ui, format!("Choose image failed. Reason: {e}"));
            None
        }
        _ => None,
    }
}

pub fn picker_directory(ui: Weak<AppWindow>, title: &str, location: &str) -> Option<PathBuf> {
    let mut dialog = native_dialog::DialogBuilder::file().set_title(title);

    if !location.is_empty() && Path::new(location).is_dir() {
        dialog = dialog.set_location(location);
    }

    match dialog.open_single_dir().show() {
        Ok(Some(path)) => Some(path),
        Err(e) => {
            toast::async_toast_warn(ui, format!("Choose directory failed. Reason: {e}"));
            None
        }
        _ => None,
    }
}
