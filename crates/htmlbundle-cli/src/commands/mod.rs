//! Subcommand implementations.

pub mod cat;
pub mod cleanup;
pub mod completion;
pub mod extract;
pub mod inspect;
pub mod resolve;
