//! Dioxus web app for the pdbview sidebar.
//!
//! Compiled to WASM and loaded into a wry webview by the native viewer.
//! Communicates with the shell via a JSON IPC bridge.

mod bridge;
mod sidebar;

use dioxus::prelude::*;
use serde_json::Value;

fn main() {
    dioxus::launch(app);
}

fn app() -> Element {
    let state: Signal<Option<Value>> = use_signal(|| None);

    // Register the IPC listener once on mount.
    use_effect(move || bridge::register_state_listener(state));

    let state_val = state.read();
    match &*state_val {
        Some(s) => rsx! {
            sidebar::Sidebar { state: s.clone() }
        },
        None => rsx! {
            div {
                style: "padding: 16px; color: #585b70;",
                "Waiting for viewer..."
            }
        },
    }
}
