//! Every Color
//!
//! Generates images that contain every color of a quantized RGB space
//! exactly once. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
