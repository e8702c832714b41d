//! Core types, tables, errors, and configuration

pub mod config;
pub mod error;
pub mod tables;
pub mod types;
