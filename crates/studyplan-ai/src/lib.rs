//! studyplan-ai
//!
//! Study schedule generation and concept validation through an external
//! text-generation model: prompt construction, provider clients, and
//! recovery of JSON from unreliable model output.

pub mod client;
pub mod config;
pub mod error;
pub mod gemini;
pub mod normalize;
pub mod openai;
pub mod prompt;
pub mod service;
