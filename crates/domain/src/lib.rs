#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod composer;
mod error;
mod exercise;
mod filter;
mod name;
mod plan;
mod schedule;
mod service;
mod session;
mod submit;
mod taxonomy;
mod training;
mod user;
mod workout;


pub use catalog::*;
pub use composer::*;
pub use error::*;
pub use exercise::*;
pub use filter::*;
pub use name::*;
pub use plan::*;
pub use schedule::*;
pub use service::*;
pub use session::*;
pub use submit::*;
pub use taxonomy::*;
pub use training::*;
pub use user::*;
pub use workout::*;
