//! dawforge CLI library.
//!
//! Command implementations live here so they can be integration-tested
//! without spawning the binary.

pub mod commands;
