//! CLI command implementations.

pub mod columns;
pub mod ensure;
pub mod indexes;
