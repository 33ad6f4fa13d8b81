use leptos::prelude::*;
use leptos_use::{use_color_mode_with_options, ColorMode, UseColorModeOptions, UseColorModeReturn};

use crate::view_mode::ViewMode;

impl From<ViewMode> for ColorMode {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Light => ColorMode::Light,
            ViewMode::Dark => ColorMode::Dark,
        }
    }
}

fn from_color_mode(mode: ColorMode) -> ViewMode {
    match mode {
        ColorMode::Dark => ViewMode::Dark,
        _ => ViewMode::Light,
    }
}

/// Page-local view mode starting at `initial`. The document root's color
/// class follows it; nothing is written to storage.
pub fn use_view_mode(initial: ViewMode) -> (Signal<ViewMode>, impl Fn() + Copy + 'static) {
    let UseColorModeReturn { mode, set_mode, .. } = use_color_mode_with_options(
        UseColorModeOptions::default()
            .initial_value(ColorMode::from(initial))
            .storage_enabled(false),
    );
    let view_mode = Signal::derive(move || from_color_mode(mode.get()));
    let toggle = move || {
        let next = view_mode.get_untracked().toggled();
        log::debug!("view mode -> {next:?}");
        set_mode.set(next.into());
    };
    (view_mode, toggle)
}

#[component]
pub fn ViewModeToggle<F>(mode: Signal<ViewMode>, on_toggle: F, class: &'static str) -> impl IntoView
where
    F: Fn() + 'static,
{
    view! {
        <button
            class=class
            aria-label=move || mode.get().toggle_label()
            on:click=move |_| on_toggle()
        >
            {move || mode.get().toggle_glyph()}
        </button>
    }
}
