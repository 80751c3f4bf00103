// Chat: LLM answers grounded in graph context, plus the mode-dispatching
// `/chat` endpoint that fronts matching and graph queries.

pub mod composer;
pub mod handlers;
pub mod mode;
pub mod prompts;
