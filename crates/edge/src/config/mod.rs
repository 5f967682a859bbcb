pub mod builder;
pub mod loader;
