// Recommendation Requester
// Implements: admission strategy selection, prompt + schema construction, one
// generation call, response parsing.
// All model calls go through llm_client, never direct HTTP calls here.

pub mod handlers;
pub mod prompts;
pub mod requester;
pub mod schema;
