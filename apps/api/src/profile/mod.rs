// User profile: saved resumes, preferences and historical match statistics.
// One JSONB document per user in Postgres; the stats aggregation itself is
// pure and lives in `stats`.

pub mod handlers;
pub mod models;
pub mod stats;
pub mod store;
