//! Resume field parsing: plain text in, `ResumeProfile` out.

pub mod parser;
pub mod vocabulary;

pub use parser::parse_resume;
