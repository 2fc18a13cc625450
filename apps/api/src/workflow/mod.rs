// The evaluation workflow: a per-session state machine coordinating file
// intake, decoding, validation, submission, and result caching.
// All service calls go through llm_client; no direct API calls here.

pub mod controller;
pub mod handlers;
