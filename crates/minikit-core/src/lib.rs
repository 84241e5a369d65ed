pub mod abi;
pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod metadata;
pub mod offset;
pub mod tx;
pub mod validate;

pub use error::{MiniError, Result};
