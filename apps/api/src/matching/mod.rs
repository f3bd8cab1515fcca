// Keyword match analysis between a resume and a job description.
// Everything here is synchronous and side-effect free; handlers own the I/O.

pub mod analyzer;
pub mod display;
pub mod handlers;
pub mod stopwords;
pub mod tokenizer;
