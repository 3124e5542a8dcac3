//! Rendering of experiment results

pub mod console;
