// Document persistence and per-type validation.
// Documents are stored whole as JSONB; every save replaces the previous body.

pub mod handlers;
pub mod store;
pub mod validation;
