//! EzRoute CLI library
//!
//! Argument definitions and output rendering, shared by the `ezroute-cli`
//! binary and its tests.

pub mod cli;
pub mod render;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use render::{render_json, render_row, render_text};
