//! IPC bridge between the wry webview (native) and the Dioxus WASM app.
//!
//! **Inbound** (native → WASM): the native side calls
//! `window.__pdbview_push_state(json)`, which dispatches a `pdbview-state`
//! `CustomEvent` that we listen to here.
//!
//! **Outbound** (WASM → native): we call `window.ipc.postMessage(json)` to
//! send control actions back to the shell.

use dioxus::signals::{Signal, Writable};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

// ── Inbound listener ─────────────────────────────────────────────────────

/// Register the `CustomEvent` listener that pushes panel state JSON into
/// `state_sig`. Call once at app startup.
pub fn register_state_listener(mut state_sig: Signal<Option<Value>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_state = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(json_str) = evt.detail().as_string() {
                if let Ok(val) = serde_json::from_str::<Value>(&json_str) {
                    state_sig.set(Some(val));
                }
            }
        },
    );
    if window
        .add_event_listener_with_callback(
            "pdbview-state",
            on_state.as_ref().unchecked_ref(),
        )
        .is_ok()
    {
        on_state.forget();
    }
}

// ── Outbound actions ─────────────────────────────────────────────────────

/// Ask the native side to open the `.pdb` file dialog.
pub fn send_open_file() {
    post(&json!({ "action": "open_file" }));
}

/// Submit the identifier text box.
pub fn send_fetch_id(id: &str) {
    post(&json!({ "action": "fetch_id", "id": id }));
}

/// Switch input tab (`"upload"` or `"enter_id"`).
pub fn send_select_tab(tab: &Value) {
    post(&json!({ "action": "select_tab", "tab": tab }));
}

/// Change the style selector.
pub fn send_set_style(style: &str) {
    post(&json!({ "action": "set_style", "style": style }));
}

/// Change the color-mode radio (`"spectrum"` or `"custom"`).
pub fn send_set_color_mode(mode: &Value) {
    post(&json!({ "action": "set_color_mode", "mode": mode }));
}

/// Change the custom color (`#rrggbb`).
pub fn send_set_custom_color(color: &str) {
    post(&json!({ "action": "set_custom_color", "color": color }));
}

/// Call `window.ipc.postMessage(json)` to send a message to the native
/// wry IPC handler.
fn post(msg: &Value) {
    let js = format!(
        "window.ipc.postMessage('{}')",
        msg.to_string().replace('\\', "\\\\").replace('\'', "\\'")
    );
    let _ = js_sys::eval(&js);
}
