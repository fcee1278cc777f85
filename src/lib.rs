// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D viewer for molecular structures in PDB format.
//!
//! A structure is either uploaded from a local `.pdb` file or fetched by
//! identifier from the RCSB archive, then rendered with one of five styles
//! (cartoon, line, cross, stick, sphere) colored by a residue spectrum or a
//! single custom color. The user rotates, zooms and pans with the mouse.
//!
//! # Key entry points
//!
//! - [`shell::Shell`] - per-control handlers over the [`session::Session`]
//! - [`source`] - upload decoding and the RCSB [`source::Fetcher`]
//! - [`render::Renderer`] - the render seam, implemented on the GPU by
//!   [`engine::ViewerEngine`]
//! - [`options::Options`] - runtime configuration (viewport, camera,
//!   display, network, keybindings)
//!
//! # Architecture
//!
//! Everything runs on the window's event-loop thread. Each UI action is
//! handled synchronously: load operations write the session, and every
//! handler that changes render-relevant state calls the renderer with the
//! structure text and a freshly derived [`style::StyleConfig`]. The GPU
//! engine parses the text, builds style-specific geometry on the CPU
//! ([`render::scene`]) and draws it in a single depth-tested pass.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
#[cfg(feature = "gui")]
pub mod gui;
pub mod input;
pub mod options;
pub mod render;
pub mod session;
pub mod shell;
pub mod source;
pub mod structure;
pub mod style;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::ViewerEngine;
pub use error::ViewerError;
pub use input::{InputEvent, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
