//! Hyperlayer library
//!
//! This library compiles a nested description of Hyper-key layers into the
//! flat, ordered complex-modification rules Karabiner-Elements consumes:
//! building the layer tree, compiling it into manipulators with per-layer
//! state variables, and writing the resulting document.

// Module declarations
pub mod cli;
pub mod compiler;
pub mod config;
pub mod constants;
pub mod karabiner;
pub mod keymap;
pub mod models;
pub mod services;
