//! Command definitions.

pub mod product;
