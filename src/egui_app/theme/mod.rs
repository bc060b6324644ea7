//! Theme Module
//!
//! Colour palette and frame builders for the document views. The palette is a
//! warm brown/tan scheme: dark chrome around light paper-like cards.

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
