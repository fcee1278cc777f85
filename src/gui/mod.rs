//! Native-side GUI layer: wry webview hosting the pdbview-ui WASM bundle.
//!
//! The webview is created as a child of the winit window, right of the 3D
//! viewport, and exchanges control actions and panel state with the shell
//! over a minimal JSON IPC bridge.

pub(crate) mod panel;
/// Wry webview creation, IPC handler, and state push helpers.
pub mod webview;
