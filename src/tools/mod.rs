//! Tailorbill Tools module
//!
//! MCP tool implementations over the order and measurement pipeline.

pub mod measurements;
pub mod orders;
pub mod status;
