//! Core domain types.
//!
//! These types represent the story content handed to the narration engine,
//! independent of how it was produced or where it is stored.
//!
//! # Structure
//!
//! - `paragraph` - `Paragraph`, `ModuleHint`, `SensoryModule`
//! - `story` - the content-provider document (`Story`) and its errors

mod paragraph;
mod story;

pub use paragraph::{ModuleHint, Paragraph, SensoryModule};
pub use story::{Story, StoryError};
