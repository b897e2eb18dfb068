//! UI logic and callback management module
//!
//! Connects Slint callbacks to Rust functions and gives shorthand access to
//! the UI globals.

use crate::slint_generatedAppWindow::AppWindow;

mod editor;
mod toast;
mod util;

#[macro_export]
macro_rules! global_store {
    ($ui:expr) => {
        $ui.global::<crate::slint_generatedAppWindow::Store>()
    };
}

#[macro_export]
macro_rules! global_logic {
    ($ui:expr) => {
        $ui.global::<crate::slint_generatedAppWindow::Logic>()
    };
}

#[macro_export]
macro_rules! global_util {
    ($ui:expr) => {
        $ui.global::<crate::slint_generatedAppWindow::Util>()
    };
}

/// Connects `Logic.<callback_name>` to the Rust function of the same name.
///
/// The function receives the upgraded window followed by the callback
/// arguments and any extra captured state.
#[macro_export]
macro_rules! logic_cb {
    ($callback_name:ident, $ui:expr, [$($state:ident),*], $($arg:ident),*) => {
        {{
            let ui_weak = $ui.as_weak();
            $(let $state = $state.clone();)*
            paste::paste! {
                crate::global_logic!($ui)
                    .[<on_ $callback_name>](move |$($arg),*| {
                        $callback_name(&ui_weak.unwrap(), $(&$state,)* $($arg),*)
                    });
            }
        }}
    };
    ($callback_name:ident, $ui:expr, [$($state:ident),*]) => {
        {{
            let ui_weak = $ui.as_weak();
            $(let $state = $state.clone();)*
            paste::paste! {
                crate::global_logic!($ui)
                    .[<on_ $callback_name>](move || {
                        $callback_name(&ui_weak.unwrap(), $(&$state),*)
                    });
            }
        }}
    };
}

pub fn init(ui: &AppWindow) {
    toast::init(ui);
    util::init(ui);
    editor::init(ui);
}
