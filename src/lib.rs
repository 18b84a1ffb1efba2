//! Momentum: a motivational age counter dashboard.
//!
//! State management and persistence live in the library so integration tests
//! can drive them without a window; the binary wires up logging, the tokio
//! runtime and eframe.

pub mod age;
pub mod app;
pub mod config;
pub mod ideas;
pub mod storage;
pub mod ui;
pub mod utils;
