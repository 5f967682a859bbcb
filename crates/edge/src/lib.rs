pub mod cache;
pub mod cli;
pub mod config;
pub mod fs;
pub mod source;

mod error;

pub use error::Error;
