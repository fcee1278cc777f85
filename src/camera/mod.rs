//! Camera system for 3D scene viewing.
//!
//! Provides an orbital camera with rotation, panning, zoom and
//! zoom-to-fit framing.

/// Orbital camera controller managing rotation, pan, zoom and framing.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use controller::CameraController;
