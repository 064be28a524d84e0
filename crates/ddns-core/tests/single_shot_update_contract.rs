//! Contract Test: Single-Shot Update Flow
//!
//! Verifies the IP lookup → payload → update sequence of one run.
//!
//! Constraints verified:
//! - Exactly one IP lookup and one update per run
//! - The payload shape is fixed and the address is passed through trimmed
//! - Only ASCII whitespace (vertical tab included) is trimmed
//! - Malformed addresses are not rejected by the updater
//! - Runs with the same address send byte-identical bodies
//! - A failed IP lookup stops the run before the provider is called
//! - Dry-run mode never calls the provider

mod common;

use common::*;
use ddns_core::config::UpdateMode;
use ddns_core::{DnsUpdater, ErrorKind};

#[tokio::test]
async fn update_body_matches_scenario() {
    let ip_source = StaticIpSource::new("203.0.113.7\n");
    let provider = RecordingProvider::succeeding();

    let updater = DnsUpdater::new(
        Box::new(StaticIpSource::sharing_counters_with(&ip_source)),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        &test_config("abc123"),
    )
    .expect("updater construction succeeds");

    let report = updater.run().await.expect("run succeeds");

    let expected = r#"{"type":"A","name":"check","content":"203.0.113.7","ttl":60,"proxied":false}"#;
    assert_eq!(report.ip, "203.0.113.7");
    assert_eq!(report.request_body, expected);
    assert_eq!(provider.sent_bodies(), vec![expected.to_string()]);
    assert_eq!(ip_source.call_count(), 1);
    assert_eq!(provider.update_call_count(), 1);

    let response = report.response.expect("live run has a response");
    assert!(response.body.contains(r#""success":true"#));
}

#[tokio::test]
async fn malformed_address_is_passed_through() {
    let ip_source = StaticIpSource::new("  <html>rate limited</html>\r\n");
    let provider = RecordingProvider::succeeding();

    let updater = DnsUpdater::new(
        Box::new(ip_source),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        &test_config("abc123"),
    )
    .expect("updater construction succeeds");

    let report = updater.run().await.expect("run succeeds");

    assert_eq!(report.ip, "<html>rate limited</html>");
    let sent: serde_json::Value = serde_json::from_str(&provider.sent_bodies()[0]).unwrap();
    assert_eq!(sent["content"], "<html>rate limited</html>");
}

#[tokio::test]
async fn only_ascii_whitespace_is_trimmed() {
    let provider = RecordingProvider::succeeding();

    for (body, expected) in [
        ("\x0b203.0.113.7\x0b\n", "203.0.113.7"),
        ("\u{a0}203.0.113.7\n", "\u{a0}203.0.113.7"),
    ] {
        let updater = DnsUpdater::new(
            Box::new(StaticIpSource::new(body)),
            Box::new(RecordingProvider::sharing_counters_with(&provider)),
            &test_config("abc123"),
        )
        .expect("updater construction succeeds");

        let report = updater.run().await.expect("run succeeds");
        assert_eq!(report.ip, expected);
    }
}

#[tokio::test]
async fn repeated_runs_send_identical_bodies() {
    let provider = RecordingProvider::succeeding();

    for _ in 0..2 {
        let updater = DnsUpdater::new(
            Box::new(StaticIpSource::new("198.51.100.23\n")),
            Box::new(RecordingProvider::sharing_counters_with(&provider)),
            &test_config("abc123"),
        )
        .expect("updater construction succeeds");
        updater.run().await.expect("run succeeds");
    }

    let bodies = provider.sent_bodies();
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0].as_bytes(), bodies[1].as_bytes());
}

#[tokio::test]
async fn failed_lookup_skips_update() {
    let ip_source = UnreachableIpSource::new();
    let provider = RecordingProvider::succeeding();

    let updater = DnsUpdater::new(
        Box::new(UnreachableIpSource::sharing_counters_with(&ip_source)),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        &test_config("abc123"),
    )
    .expect("updater construction succeeds");

    let err = updater.run().await.expect_err("lookup failure propagates");

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(ip_source.call_count(), 1);
    assert_eq!(provider.update_call_count(), 0, "No update after failed lookup");
}

#[tokio::test]
async fn dry_run_never_calls_provider() {
    let provider = RecordingProvider::succeeding();

    let mut config = test_config("abc123");
    config.mode = UpdateMode::DryRun;

    let updater = DnsUpdater::new(
        Box::new(StaticIpSource::new("192.0.2.44")),
        Box::new(RecordingProvider::sharing_counters_with(&provider)),
        &config,
    )
    .expect("updater construction succeeds");

    let report = updater.run().await.expect("dry run succeeds");

    assert_eq!(provider.update_call_count(), 0);
    assert!(report.response.is_none());
    assert_eq!(
        report.request_body,
        r#"{"type":"A","name":"check","content":"192.0.2.44","ttl":60,"proxied":false}"#
    );
}
