// Post generation: prompt construction, the LLM call and parsing of the answer.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod generator;
pub mod handlers;
pub mod parser;
pub mod platform;
pub mod prompt_builder;
pub mod prompts;
pub mod topics;
