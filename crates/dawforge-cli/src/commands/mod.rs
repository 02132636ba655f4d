//! Command implementations

pub mod generate;
pub mod unpack;
pub mod validate;
