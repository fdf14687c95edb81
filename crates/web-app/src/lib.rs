#![warn(clippy::pedantic)]

pub mod log;
mod service;
mod settings;

pub use service::*;
pub use settings::*;
