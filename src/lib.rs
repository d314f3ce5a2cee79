//! Classic grid Snake.
//!
//! [`game::Game`] is the whole simulation: the host feeds it ticks and key
//! presses and draws [`game::Snapshot`]s. The remaining modules are the
//! terminal host shipped with the `ekans` binary.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod timer;
pub mod ui;
