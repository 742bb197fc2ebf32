//! Transforms shared by every dialect: downgrade rules, the callout
//! grammar, and the inline-span extractor.

pub mod callouts;
pub mod downgrade;
pub mod spans;
