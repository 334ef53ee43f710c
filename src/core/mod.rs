//! Core framework components

pub mod error;

pub use error::{DeviceKind, InferenceStage, Result, SenseError};
