//! # udplogviz - log analysis for the UDP reliable messaging harness
//!
//! Post-hoc analyzer for the plain-text logs written by the harness's
//! client, server, and proxy processes. It discovers log files in a
//! directory by naming convention, groups them into test sets, parses
//! each file into timestamped events, aggregates per-role statistics,
//! and renders a human-readable report with ASCII bar charts.
//!
//! The pipeline is one-way and single-threaded:
//!
//! ```text
//! filesystem -> discovery -> log_parser -> classifiers -> report -> stdout
//! ```
//!
//! The library is organized into three modules:
//!
//! - `analysis`: event parsing and the client/server/proxy classifiers
//! - `discovery`: test-set location by filename convention
//! - `report`: text rendering of computed statistics
//!
//! All data is transient, recomputed from disk on every run; a missing
//! log file is reported and treated as empty input, while any other
//! I/O failure propagates as a `color_eyre::Result` error.

pub mod analysis;
pub mod discovery;
pub mod report;
