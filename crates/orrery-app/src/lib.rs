//! Headless driver for the orrery simulation.
//!
//! Resolves platform directories, runs the fixed-rate tick loop, reads
//! keyboard commands from stdin and hands every frame to a [`RenderSink`].

pub mod error;
pub mod game_loop;
pub mod keymap;
pub mod platform;
pub mod runner;
pub mod sink;

pub use error::AppError;
pub use game_loop::GameLoop;
pub use platform::PlatformDirs;
pub use runner::{Orrery, load_catalog};
pub use sink::{LogSink, RenderSink};
