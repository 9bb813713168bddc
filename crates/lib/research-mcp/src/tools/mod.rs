//! MCP tool modules.
//!
//! Tools are grouped by provider: Brave search tools and the Gemini
//! research-paper analysis tool.

pub mod analysis;
pub mod search;
