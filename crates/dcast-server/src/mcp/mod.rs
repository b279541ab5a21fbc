//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes the streaming tools over stdio for AI assistant integration.
//! This runs instead of the REST API when the binary is started with
//! `--mcp`.

pub mod server;

pub use server::McpServer;
