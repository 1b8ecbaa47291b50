//! The recommendation pipeline: deterministic filtering, random backfill,
//! ranking prompt construction, reply parsing, and the orchestrating engine.

pub mod backfill;
pub mod criteria;
pub mod engine;
pub mod filter;
pub mod handlers;
pub mod parser;
pub mod prompts;
