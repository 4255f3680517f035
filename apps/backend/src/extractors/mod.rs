pub mod query;
pub mod validated_json;

pub use query::query_config;
pub use validated_json::ValidatedJson;
