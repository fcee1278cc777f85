//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] to the right of the 3D viewport, loads the
//! pdbview-ui WASM bundle via a custom `pdbview://` protocol, and bridges
//! IPC between the Dioxus web app and the native shell.

use std::borrow::Cow;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use serde_json::Value;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::session::InputTab;
use crate::shell::{PanelState, UiAction};
use crate::style::{ColorMode, HexColor, Style};

/// Embedded pdbview-ui dist output (built by `trunk build`).
#[derive(RustEmbed)]
#[folder = "crates/pdbview-ui/dist/"]
struct UiAssets;

/// Width of the sidebar panel in logical pixels.
pub const PANEL_WIDTH: u32 = 340;

/// Messages sent from the webview WASM app to the native side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelMessage {
    /// Open the native file dialog for an upload.
    OpenFile,
    /// A control changed; forwarded to the shell.
    Action(UiAction),
}

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, message_rx)`: the receiver yields [`PanelMessage`]s
/// from the WASM app.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    bounds: Rect,
) -> Result<(WebView, mpsc::Receiver<PanelMessage>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let webview = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_custom_protocol("pdbview".into(), |_id, request| {
            let path = request.uri().path();
            // Default to index.html for the root path.
            let path = if path == "/" { "index.html" } else { &path[1..] };

            match UiAssets::get(path) {
                Some(asset) => {
                    let mime = mime_guess::from_path(path)
                        .first_or_octet_stream()
                        .to_string();
                    Response::builder()
                        .header(CONTENT_TYPE, mime)
                        .body(Cow::from(asset.data.to_vec()))
                        .unwrap_or_else(|_| {
                            Response::new(Cow::from(Vec::new()))
                        })
                }
                None => Response::builder()
                    .status(404)
                    .body(Cow::from(Vec::new()))
                    .unwrap_or_else(|_| {
                        Response::new(Cow::from(Vec::new()))
                    }),
            }
        })
        .with_url("pdbview://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| {
            let Ok(msg) = serde_json::from_str::<Value>(req.body()) else {
                return;
            };
            match parse_message(&msg) {
                Some(message) => {
                    let _ = tx.send(message);
                }
                None => log::debug!("Ignoring panel message {msg}"),
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// Panel rectangle in physical pixels: `x` from the left window edge,
/// spanning the full window height.
#[must_use]
pub fn panel_bounds(x: u32, width: u32, height: u32) -> Rect {
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            i32::try_from(x).unwrap_or(i32::MAX),
            0,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            width.max(1),
            height.max(1),
        )),
    }
}

/// Push the full panel state to the webview.
pub fn push_state(webview: &WebView, state: &PanelState) {
    let json = serde_json::to_string(state).unwrap_or_default();
    let _ = webview.evaluate_script(&format!(
        "window.__pdbview_push_state('{}')",
        escape_js(&json)
    ));
}

// ── Internals ────────────────────────────────────────────────────────────

/// JavaScript injected before page load. Defines the bridge function that
/// the native side calls, and dispatches a `CustomEvent` for the WASM app.
///
/// A state pushed before the WASM app has registered its listener is
/// buffered and replayed when the listener attaches.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = null;

    function dispatch(json) {
        window.dispatchEvent(new CustomEvent('pdbview-state', { detail: json }));
    }

    window.__pdbview_push_state = function(json) {
        pending = json;
        dispatch(json);
    };

    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this === window && type === 'pdbview-state' && pending) {
            dispatch(pending);
        }
    };
})();
"#;

/// Escape `json` for use inside a single-quoted JS string literal.
fn escape_js(json: &str) -> String {
    json.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Parse an IPC message from the WASM side into a [`PanelMessage`].
fn parse_message(msg: &Value) -> Option<PanelMessage> {
    let field = |name: &str| msg.get(name).and_then(Value::as_str);
    let action = match field("action")? {
        "open_file" => return Some(PanelMessage::OpenFile),
        "fetch_id" => UiAction::SubmitId(field("id")?.to_owned()),
        "select_tab" => UiAction::SelectTab(
            serde_json::from_value::<InputTab>(msg.get("tab")?.clone()).ok()?,
        ),
        "set_style" => UiAction::SelectStyle(field("style")?.parse::<Style>().ok()?),
        "set_color_mode" => UiAction::SelectColorMode(
            serde_json::from_value::<ColorMode>(msg.get("mode")?.clone())
                .ok()?,
        ),
        "set_custom_color" => {
            UiAction::PickColor(HexColor::parse(field("color")?).ok()?)
        }
        _ => return None,
    };
    Some(PanelMessage::Action(action))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn control_messages_map_to_actions() {
        let cases = [
            (json!({ "action": "open_file" }), PanelMessage::OpenFile),
            (
                json!({ "action": "fetch_id", "id": " 1AKE " }),
                PanelMessage::Action(UiAction::SubmitId(" 1AKE ".into())),
            ),
            (
                json!({ "action": "select_tab", "tab": "enter_id" }),
                PanelMessage::Action(UiAction::SelectTab(InputTab::EnterId)),
            ),
            (
                json!({ "action": "set_style", "style": "stick" }),
                PanelMessage::Action(UiAction::SelectStyle(Style::Stick)),
            ),
            (
                json!({ "action": "set_color_mode", "mode": "custom" }),
                PanelMessage::Action(UiAction::SelectColorMode(
                    ColorMode::Custom,
                )),
            ),
            (
                json!({ "action": "set_custom_color", "color": "#00ff00" }),
                PanelMessage::Action(UiAction::PickColor(HexColor::new(
                    0, 255, 0,
                ))),
            ),
        ];
        for (msg, expected) in cases {
            assert_eq!(parse_message(&msg), Some(expected), "{msg}");
        }
    }

    #[test]
    fn malformed_messages_are_dropped() {
        for msg in [
            json!({}),
            json!({ "action": "set_style", "style": "ribbon" }),
            json!({ "action": "set_custom_color", "color": "red" }),
            json!({ "action": "fetch_id" }),
            json!({ "action": "select_tab", "tab": "nope" }),
            json!({ "action": "load_file", "path": "/tmp/x.pdb" }),
        ] {
            assert_eq!(parse_message(&msg), None, "{msg}");
        }
    }

    #[test]
    fn escaped_json_stays_one_literal() {
        let escaped = escape_js(r#"{"error":"it's a \"bad\" id"}"#);
        assert!(escaped.contains("it\\'s"));
        assert!(escaped.contains("\\\\\"bad\\\\\""));
    }
}
