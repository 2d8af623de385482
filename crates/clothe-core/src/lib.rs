//! Core library for the Clothe client: config, logging, and the backend client.

pub mod backend;
pub mod config;
pub mod logging;
