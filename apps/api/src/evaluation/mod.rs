// Resume-to-JD evaluation: prompt construction, completion parsing,
// the sequential pipeline and its HTTP handler.
// All completion calls go through llm_client.

pub mod evaluator;
pub mod handlers;
pub mod parser;
pub mod prompts;
