pub mod cli;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod games;
pub mod screenshots;

pub use error::{Error, Result};
