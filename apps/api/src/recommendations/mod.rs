// Topic recommendations: trends + posted history → ranked video ideas.
// The engine is pure; the handler only gathers its inputs.

pub mod engine;
pub mod handlers;
