pub mod metadata;
pub mod preflight;
pub mod transaction;
