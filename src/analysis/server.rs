//! Server log classification.

use super::client::extract_u64;
use super::log_parser::PATTERNS;
use super::types::{Event, ServerStats};

/// Scan server events and accumulate receive/ACK statistics.
pub fn analyze_server_log(events: &[Event]) -> ServerStats {
    let mut stats = ServerStats::default();

    for event in events {
        let msg = &event.message;

        // Both markers required: control packets also log "RECV:" but
        // only data packets carry a payload.
        if msg.contains("RECV:") && msg.contains("payload=") {
            stats.total_received += 1;
            if let Some(seq) = extract_u64(&PATTERNS.seq, msg) {
                stats.unique_sequences.insert(seq);
            }
        }

        if msg.contains("ACK_SEND:") {
            stats.total_acks_sent += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(messages: &[&str]) -> Vec<Event> {
        let ts = chrono::NaiveDateTime::parse_from_str("2024-03-01 12:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        messages
            .iter()
            .map(|m| Event {
                timestamp: ts,
                message: m.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_duplicate_receive_dedup() {
        let stats = analyze_server_log(&events(&[
            "RECV: seq=5, from=10.0.0.1:40000, payload=\"x\"",
            "RECV: seq=5, from=10.0.0.1:40000, payload=\"y\"",
        ]));
        assert_eq!(stats.total_received, 2);
        assert_eq!(stats.unique_sequences.len(), 1);
        assert!(stats.unique_sequences.contains(&5));
    }

    #[test]
    fn test_recv_without_payload_ignored() {
        let stats = analyze_server_log(&events(&["RECV: seq=5 control packet"]));
        assert_eq!(stats.total_received, 0);
        assert!(stats.unique_sequences.is_empty());
    }

    #[test]
    fn test_acks_counted_independently() {
        let stats = analyze_server_log(&events(&[
            "RECV: seq=1, payload=\"a\"",
            "ACK_SEND: seq=1, to=10.0.0.1:40000",
            "ACK_SEND: seq=1, to=10.0.0.1:40000",
        ]));
        assert_eq!(stats.total_received, 1);
        assert_eq!(stats.total_acks_sent, 2);
    }
}
