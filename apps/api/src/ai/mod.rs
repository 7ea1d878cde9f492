pub mod analyzer;
pub mod enhance;
pub mod handlers;
pub mod pdf;
pub mod prompts;
pub mod resume_text;
