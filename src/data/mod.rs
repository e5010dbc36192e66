//! Data structures modified with guaranteed deterministic behavior after deserialization.

pub mod arena;

pub use arena::{Arena, Index};
