//! Command handlers.
//!
//! Each handler parses CLI-specific input, calls into the core and engine
//! crates, and formats the result for the terminal. Formatting lives in
//! `render` functions returning `String` so it can be tested without a
//! terminal.

pub mod hints;
pub mod play;
pub mod segment;
