//! Generative narration collaborator: transport client and response glue

pub mod client;
pub mod reading;

pub use client::LlmClient;
pub use reading::{analyze_chart, ChartReading};
