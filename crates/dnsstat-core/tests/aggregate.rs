use std::sync::Arc;
use std::thread;

use dnsstat_core::{
    Aggregator, AggregatorConfig, AggregatorError, AggregatorState, Packet, Transport,
    decode_packet,
};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn query(id: u16, name: &str, rcode: u8) -> Packet {
    let mut msg = id.to_be_bytes().to_vec();
    msg.extend_from_slice(&[0x01, rcode, 0, 1, 0, 0, 0, 0, 0, 0]);
    for label in name.split('.').filter(|l| !l.is_empty()) {
        msg.push(label.len() as u8);
        msg.extend_from_slice(label.as_bytes());
    }
    msg.extend_from_slice(&[0, 0, 1, 0, 1]);
    decode_packet(&msg, Transport::Udp).unwrap()
}

fn response(id: u16, an_count: u16, rcode: u8) -> Packet {
    let mut msg = id.to_be_bytes().to_vec();
    msg.extend_from_slice(&[0x81, 0x80 | rcode, 0, 1]);
    msg.extend_from_slice(&an_count.to_be_bytes());
    msg.extend_from_slice(&[0, 0, 0, 0]);
    decode_packet(&msg, Transport::Udp).unwrap()
}

#[test]
fn concurrent_producers_are_all_counted() {
    init_logger();
    let aggregator = Arc::new(
        Aggregator::spawn(AggregatorConfig {
            queue_capacity: 8,
            ..AggregatorConfig::default()
        })
        .unwrap(),
    );

    let producers = 4u16;
    let per_producer = 500u16;
    let handles: Vec<_> = (0..producers)
        .map(|p| {
            let aggregator = Arc::clone(&aggregator);
            thread::spawn(move || {
                for i in 0..per_producer {
                    let packet = if i % 2 == 0 {
                        query(i, &format!("host{p}.example."), (i % 4) as u8)
                    } else {
                        response(i, i % 7, 3)
                    };
                    aggregator.ingest(packet).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let snapshot = aggregator.summarize().unwrap();
    let expected = u64::from(producers) * u64::from(per_producer);
    assert_eq!(snapshot.total_packets, expected);
    assert_eq!(snapshot.rcode_histogram.values().sum::<u64>(), expected);
    assert_eq!(snapshot.top_hosts.len(), 4);
    for host in &snapshot.top_hosts {
        assert_eq!(host.count, u64::from(per_producer / 2));
    }
}

#[test]
fn rendezvous_queue_never_drops_packets() {
    init_logger();
    let aggregator = Aggregator::spawn(AggregatorConfig {
        queue_capacity: 0,
        ..AggregatorConfig::default()
    })
    .unwrap();

    for i in 0..2_000u16 {
        aggregator.ingest(response(i, 0, 0)).unwrap();
    }
    let snapshot = aggregator.summarize().unwrap();
    assert_eq!(snapshot.total_packets, 2_000);
    assert_eq!(snapshot.rcode_histogram.get("NoError"), Some(&2_000));
}

#[test]
fn top_answer_is_first_packet_reaching_maximum() {
    let aggregator = Aggregator::spawn(AggregatorConfig::default()).unwrap();
    for (id, an_count) in [(1, 1), (2, 5), (3, 5), (4, 3)] {
        aggregator.ingest(response(id, an_count, 0)).unwrap();
    }
    let snapshot = aggregator.summarize().unwrap();
    let top = snapshot.top_answer.as_ref().unwrap();
    assert_eq!(top.header.id, 2);
    assert_eq!(snapshot.top_answer_count, 5);
}

#[test]
fn unknown_rcodes_share_the_empty_bucket() {
    let aggregator = Aggregator::spawn(AggregatorConfig::default()).unwrap();
    aggregator.ingest(response(1, 0, 11)).unwrap();
    aggregator.ingest(response(2, 0, 14)).unwrap();
    aggregator.ingest(response(3, 0, 2)).unwrap();
    let snapshot = aggregator.summarize().unwrap();
    assert_eq!(snapshot.rcode_histogram.get(""), Some(&2));
    assert_eq!(snapshot.rcode_histogram.get("ServFail"), Some(&1));
}

#[test]
fn top_hosts_follow_config_limit() {
    let aggregator = Aggregator::spawn(AggregatorConfig {
        top_hosts: 2,
        ..AggregatorConfig::default()
    })
    .unwrap();
    for (name, n) in [("a.test.", 1), ("b.test.", 3), ("c.test.", 2)] {
        for id in 0..n {
            aggregator.ingest(query(id, name, 0)).unwrap();
        }
    }
    let snapshot = aggregator.summarize().unwrap();
    let names: Vec<&str> = snapshot
        .top_hosts
        .iter()
        .map(|h| h.hostname.as_str())
        .collect();
    assert_eq!(names, ["b.test.", "c.test."]);
}

#[test]
fn ingest_after_summarize_is_rejected() {
    let aggregator = Aggregator::spawn(AggregatorConfig::default()).unwrap();
    aggregator.ingest(response(1, 0, 0)).unwrap();
    aggregator.summarize().unwrap();

    assert_eq!(aggregator.state(), AggregatorState::Closed);
    let err = aggregator.ingest(response(2, 0, 0)).unwrap_err();
    assert!(matches!(err, AggregatorError::Closed));
    assert_eq!(err.to_string(), "aggregator is closed");
    assert!(matches!(aggregator.summarize(), Err(AggregatorError::Closed)));
}

#[test]
fn snapshot_json_shape() {
    let aggregator = Aggregator::spawn(AggregatorConfig::default()).unwrap();
    aggregator.ingest(query(1, "example.com.", 0)).unwrap();
    aggregator.ingest(query(2, "example.com.", 0)).unwrap();
    aggregator.ingest(response(3, 2, 3)).unwrap();
    let snapshot = aggregator.summarize().unwrap();

    let mut value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    let object = value.as_object_mut().unwrap();
    assert!(object.remove("window_start").is_some());
    assert!(object.remove("window_end").is_some());

    assert_eq!(
        value,
        json!({
            "snapshot_version": 1,
            "total_packets": 3,
            "rcode_histogram": { "NXDomain": 1, "NoError": 2 },
            "top_answer": {
                "header": {
                    "id": 3,
                    "qr": true,
                    "opcode": 0,
                    "aa": false,
                    "tc": false,
                    "rd": true,
                    "ra": true,
                    "rcode": 3,
                    "qd_count": 1,
                    "an_count": 2,
                    "ns_count": 0,
                    "ar_count": 0
                },
                "kind": "Response",
                "opcode": "Query",
                "rcode": "NXDomain",
                "authority": false,
                "an_count": 2,
                "qd_count": 1,
                "transport": "udp"
            },
            "top_answer_count": 2,
            "top_hosts": [{ "hostname": "example.com.", "count": 2 }]
        })
    );
}
