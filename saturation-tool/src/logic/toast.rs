//! Toast notifications with a single-shot hide timer.

use crate::{
    global_util,
    slint_generatedAppWindow::{AppWindow, ToastSetting, ToastStatus},
};
use slint::{ComponentHandle, Timer, TimerMode, Weak};
use std::time::Duration;

#[macro_export]
macro_rules! toast_warn {
    ($ui:expr, $msg:expr) => {
        $ui.global::<$crate::slint_generatedAppWindow::Util>()
            .invoke_show_toast(
                slint::format!("{}", $msg),
                $crate::slint_generatedAppWindow::ToastStatus::Warning,
            )
    };
}

#[macro_export]
macro_rules! toast_success {
    ($ui:expr, $msg:expr) => {
        $ui.global::<$crate::slint_generatedAppWindow::Util>()
            .invoke_show_toast(
                slint::format!("{}", $msg),
                $crate::slint_generatedAppWindow::ToastStatus::Success,
            )
    };
}

/// Shows a warning toast from outside the UI thread.
pub fn async_toast_warn(ui: Weak<AppWindow>, msg: String) {
    _ = ui.upgrade_in_event_loop(move |ui| {
        global_util!(ui).invoke_show_toast(msg.into(), ToastStatus::Warning);
    });
}

pub fn init(ui: &AppWindow) {
    let timer = Timer::default();
    let ui_weak = ui.as_weak();

    global_util!(ui).on_show_toast(move |msg, status| {
        let ui = ui_weak.unwrap();

        if timer.running() {
            timer.stop();
        }

        // long messages stay longer
        let interval = if msg.chars().count() > 20 { 5 } else { 2 };

        ui.global::<ToastSetting>().set_is_timeout(false);
        ui.global::<ToastSetting>().invoke_set(msg, status);

        timer.start(TimerMode::SingleShot, Duration::from_secs(interval), move || {
            ui.global::<ToastSetting>().set_is_timeout(true);
        });
    });
}
