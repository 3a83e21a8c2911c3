//! Tailorbill Library
//!
//! Order splitting, itemized bill reconciliation and measurement parsing for
//! a tailoring shop's billing tool.

pub mod build_info;
pub mod config;
pub mod mcp;
pub mod measurement;
pub mod models;
pub mod orders;
pub mod tools;
