//! Volatility smile construction.

pub mod error;
pub mod vanna_volga;

pub use error::SmileError;
pub use vanna_volga::VannaVolga;
