//! Kindle library crate: the simulation core plus the Bevy plugins.
//!
//! The binary (`main.rs`) only assembles the app. Integration tests in
//! `tests/` drive the same session resources headless, without a window or GPU.

pub mod config;
pub mod enemies;
pub mod entities;
pub mod input;
pub mod player;
pub mod save;
pub mod session;
pub mod shared;
pub mod ui;
pub mod world;
