//! Saturation editor panel
//!
//! Owns the `Editor` state for the window. Slint callbacks and background
//! completions are all turned into `Message`s and fed to `Editor::update` on
//! the UI thread; the returned `Outcome` decides what happens next.

use super::util;
use crate::{
    config, global_store, logic_cb,
    slint_generatedAppWindow::{AppWindow, EditorStatus as UIEditorStatus},
    toast_success, toast_warn,
};
use image_effect::{Editor, EditorState, ExportConfig, Message, Outcome, loader};
use slint::{ComponentHandle, Image, Rgba8Pixel, SharedPixelBuffer, Weak};
use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

type SharedEditor = Arc<Mutex<Editor>>;

pub fn init(ui: &AppWindow) {
    let setting = config::all().editor;
    let editor: SharedEditor = Arc::new(Mutex::new(
        Editor::new(setting.default_saturation)
            .with_export_config(ExportConfig::new().with_quality(setting.jpeg_quality)),
    ));

    sync_store(ui, &editor.lock().unwrap(), true);

    logic_cb!(upload_image, ui, [editor]);
    logic_cb!(saturation_changed, ui, [editor], level);
    logic_cb!(export_image, ui, [editor]);

    let ui_weak = ui.as_weak();
    ui.window().on_close_requested(move || {
        dispatch(&ui_weak.unwrap(), &editor, Message::Teardown);
        slint::CloseRequestResponse::HideWindow
    });
}

fn upload_image(ui: &AppWindow, editor: &SharedEditor) {
    let ui_weak = ui.as_weak();
    let editor = editor.clone();

    tokio::spawn(async move {
        let path = util::picker_image(ui_weak.clone(), "Choose an image");
        post(ui_weak, editor, Message::FileSelected(path));
    });
}

fn saturation_changed(ui: &AppWindow, editor: &SharedEditor, level: i32) {
    dispatch(ui, editor, Message::SaturationChanged(level));
}

fn export_image(ui: &AppWindow, editor: &SharedEditor) {
    if !editor.lock().unwrap().can_export() {
        log::warn!("no adjusted image to save");
        return;
    }

    let ui_weak = ui.as_weak();
    let editor = editor.clone();
    let location = config::all().editor.last_save_dir;

    tokio::spawn(async move {
        if let Some(dir) = util::picker_directory(
            ui_weak.clone(),
            &format!("Save {}", image_effect::EXPORT_FILENAME),
            &location,
        ) {
            post(ui_weak, editor, Message::ExportRequested(dir));
        }
    });
}

// Hands a message from a background task back to the UI thread.
fn post(ui: Weak<AppWindow>, editor: SharedEditor, message: Message) {
    _ = ui.upgrade_in_event_loop(move |ui| dispatch(&ui, &editor, message));
}

fn dispatch(ui: &AppWindow, editor: &SharedEditor, message: Message) {
    let outcome = editor.lock().unwrap().update(message);

    let refresh_preview = match outcome {
        Outcome::Nothing => false,
        Outcome::Preview => true,
        Outcome::Load { path, seq } => {
            load(ui.as_weak(), editor.clone(), path, seq);
            false
        }
        Outcome::Failed(msg) => {
            toast_warn!(ui, msg);
            true
        }
        Outcome::Saved(path) => {
            remember_save_dir(&path);
            toast_success!(ui, format!("Saved to {}", path.display()));
            false
        }
    };

    sync_store(ui, &editor.lock().unwrap(), refresh_preview);
}

fn load(ui: Weak<AppWindow>, editor: SharedEditor, path: PathBuf, seq: u64) {
    tokio::spawn(async move {
        let result = loader::load_file_async(&path).await;
        post(ui, editor, Message::Decoded { seq, result });
    });
}

fn sync_store(ui: &AppWindow, editor: &Editor, refresh_preview: bool) {
    let store = global_store!(ui);

    store.set_saturation(editor.level() as f32);
    store.set_can_export(editor.can_export());
    store.set_editor_status(match editor.state() {
        EditorState::Loaded => UIEditorStatus::Loaded,
        EditorState::Idle | EditorState::Terminated => UIEditorStatus::Idle,
    });

    match editor.rendered() {
        Some(rendered) if refresh_preview && !rendered.is_empty() => {
            let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
                rendered.pixels.as_raw(),
                rendered.width(),
                rendered.height(),
            );
            store.set_preview_image(Image::from_rgba8(buffer));
            store.set_image_info(slint::format!("{} x {}", rendered.width(), rendered.height()));
            store.set_has_preview(true);
        }
        Some(rendered) if !rendered.is_empty() => (),
        _ => {
            store.set_has_preview(false);
            store.set_preview_image(Image::default());
            store.set_image_info(Default::default());
        }
    }
}

fn remember_save_dir(saved: &Path) {
    let Some(dir) = saved.parent() else {
        return;
    };

    let mut all = config::all();
    all.editor.last_save_dir = dir.to_string_lossy().to_string();

    if let Err(e) = config::save(all) {
        log::warn!("remember save directory failed. {e:?}");
    }
}
