//! Sizhu - Four Pillars (BaZi) chart and luck-cycle engine

pub mod almanac;
pub mod chart;
pub mod core;
pub mod llm;
pub mod luck;
