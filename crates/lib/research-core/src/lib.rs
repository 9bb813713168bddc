//! Core gateways for research-mcp.
//!
//! This crate owns the outbound provider calls: the Brave Search gateway for
//! web and local search, the pure local-result formatter, and the Gemini
//! gateway for research-paper analysis. Nothing here holds state across
//! requests; every call is a fresh translation of arguments into provider
//! HTTP requests and of provider payloads into plain text.

pub mod analysis;
pub mod format;
pub mod search;
