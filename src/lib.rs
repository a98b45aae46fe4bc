//! Sproutfield library crate — re-exports all modules for integration testing.
//!
//! The binary crate (`main.rs`) is the actual game entry point.
//! This library crate exposes the same modules so that `tests/` integration
//! tests can drive the farming session without needing a window or GPU.

pub mod shared;
pub mod grid;
pub mod data;
pub mod input;
pub mod session;
pub mod player;
pub mod farming;
pub mod ui;
