#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Front-end runtime for the landing site: intro animations, page
//! transitions, click delegation and the WebGL hero scene.
//!
//! The top-level modules are plain computation and build on any target.
//! Everything that touches the browser lives in [`wasm`], compiled only for
//! `wasm32`.

pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod intro;
pub mod scene;
pub mod transition;
pub mod tween;
pub mod viewport;

pub use config::SiteConfig;
pub use error::SiteError;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
