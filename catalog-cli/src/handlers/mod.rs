//! Shared handlers for the CLI.

pub mod product;
