// Match scoring pipeline: resume vs job description.
// Primary path goes through llm_client; any failure degrades to the
// deterministic keyword-overlap fallback. The operation never fails.

pub mod handlers;
pub mod prompts;
pub mod scorer;

pub use scorer::{analyze_match, MatchAnalysis};
