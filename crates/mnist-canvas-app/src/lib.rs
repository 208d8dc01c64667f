//! MNIST Canvas Application
//!
//! The shell around the core widget: a Streamlit component entry point for
//! the browser and a headless replay tool for native builds.

#[cfg(not(target_arch = "wasm32"))]
pub mod replay;

#[cfg(not(target_arch = "wasm32"))]
pub use replay::{Replay, ReplayError, Script, ScriptEvent, run_script};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
