//! Minesweeper on a square board, played over a text interface.
//!
//! [`game::Board`] holds the rules: mine placement, neighbor counts, cascading reveals, flags and
//! the win check. [`session::Game`] tracks whether a game is still running, and [`app::App`] is
//! the prompt-driven front end the binary runs.

pub mod app;
pub mod error;
pub mod game;
pub mod render;
pub mod session;
pub mod settings;

pub use error::{Error, Result};
