#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod rest;

#[cfg(test)]
mod tests;
