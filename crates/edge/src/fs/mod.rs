pub mod filter;
pub mod scan;
pub mod watch;
