// Cover-letter generation: same two-path shape as the match scorer.
// One model attempt, then the fixed three-paragraph template fallback.

pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::{generate_cover_letter, CoverLetter, Tone};
