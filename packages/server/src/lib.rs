// Research-Paper Ingestion - API Core
//
// This crate wires the ingestion library into an HTTP surface: on-demand
// fetches, stored-paper retrieval, and scheduler status.

pub mod config;
pub mod server;

pub use config::*;
