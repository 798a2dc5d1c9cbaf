//! tilda - client for the tilda dashcam-footage analysis backend
//!
//! Submits video and image files to the analysis backend and consumes its
//! streaming progress/result protocol.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod stream;
