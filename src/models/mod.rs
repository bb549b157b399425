//! Core data models for the hand-history analyzer.

mod hand;
mod ids;
mod player;
mod report;
mod style;
mod summary;

pub use hand::*;
pub use ids::*;
pub use player::*;
pub use report::*;
pub use style::*;
pub use summary::*;
