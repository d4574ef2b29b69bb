//! Log analysis for the UDP reliable-messaging test harness.
//!
//! This module turns plain-text client/server/proxy log files into
//! typed events and aggregates them into per-role statistics.

pub mod types;
pub mod log_parser;
pub mod client;
pub mod server;
pub mod proxy;

pub use types::*;
pub use log_parser::parse_log_file;
pub use client::analyze_client_log;
pub use server::analyze_server_log;
pub use proxy::analyze_proxy_log;
