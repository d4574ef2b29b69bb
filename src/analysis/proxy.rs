//! Proxy log classification.

use super::client::extract_u64;
use super::log_parser::PATTERNS;
use super::types::{Event, ProxyStats};

/// Scan proxy events and accumulate per-direction traffic statistics.
///
/// Direction prefixes are mutually exclusive within each marker kind
/// (a packet cannot travel both ways), but the Received/DROPPED/DELAYED
/// kinds are checked independently of each other.
pub fn analyze_proxy_log(events: &[Event]) -> ProxyStats {
    let mut stats = ProxyStats::default();

    for event in events {
        let msg = &event.message;

        if msg.contains("C->S: Received") {
            stats.client_to_server += 1;
        } else if msg.contains("S->C: Received") {
            stats.server_to_client += 1;
        }

        if msg.contains("C->S: DROPPED") {
            stats.dropped_c2s += 1;
        } else if msg.contains("S->C: DROPPED") {
            stats.dropped_s2c += 1;
        }

        if msg.contains("C->S: DELAYED") {
            stats.delayed_c2s += 1;
            if let Some(ms) = extract_u64(&PATTERNS.delay_ms, msg) {
                stats.delay_times_c2s.push(ms);
            }
        } else if msg.contains("S->C: DELAYED") {
            stats.delayed_s2c += 1;
            if let Some(ms) = extract_u64(&PATTERNS.delay_ms, msg) {
                stats.delay_times_s2c.push(ms);
            }
        }
    }

    stats
}
