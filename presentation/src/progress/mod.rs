//! Progress display for running experiments

pub mod reporter;
