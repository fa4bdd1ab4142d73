pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod session;
pub mod stroke;
pub mod topology;

pub use error::{Result, SproutsError};
