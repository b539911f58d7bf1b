// Core data models for sqview
// Fields, the per-field query results, and color rules

pub mod field;
pub mod color;

pub use field::*;
pub use color::*;
