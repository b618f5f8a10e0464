//! PEF Retriever Tests
//!
//! Count-gated sizing, opt-out behavior, selector addressing, and abort
//! semantics against a scripted controller.

mod common;

use common::{pef_reply, MockTransport};
use ipmikit::pef::{
    AlertPoliciesCount, EventFilter, EventFiltersCount, PefConfig,
};
use ipmikit::{Client, IpmiError};

/// Parameter selector of a recorded exchange (bits [6:0] of request byte 0)
fn sent_selector(data: &[u8]) -> u8 {
    data[0] & 0x7F
}

/// Set selector of a recorded exchange (request byte 1)
fn sent_set(data: &[u8]) -> u8 {
    data[1]
}

// =============================================================================
// Opt-Out Tests
// =============================================================================

#[test]
fn test_empty_aggregate_makes_no_exchanges() {
    let transport = MockTransport::new();
    let mut client = Client::new(transport);

    let mut config = PefConfig::default();
    client.get_pef_config_into(&mut config).unwrap();

    assert_eq!(client.into_transport().exchanges(), 0);
}

#[test]
fn test_nil_slots_are_never_fetched() {
    // Only the control singleton is requested
    let mut transport = MockTransport::new();
    transport.reply_ok(&pef_reply(&[0x03]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        control: Some(Default::default()),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    let control = config.control.unwrap();
    assert!(control.pef_enabled);
    assert!(control.event_messages_enabled);

    let transport = client.into_transport();
    assert_eq!(transport.exchanges(), 1);
    assert_eq!(sent_selector(&transport.sent[0].1), 1); // PEF Control
}

// =============================================================================
// Count-Gated Sizing Tests
// =============================================================================

#[test]
fn test_one_based_family_sized_from_count() {
    // Alert policies index from 1: count of 3 fetches selectors 1, 2, 3
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[3])) // NumberOfAlertPolicies
        .reply_ok(&pef_reply(&[1, 0x08, 0x12, 0x00]))
        .reply_ok(&pef_reply(&[2, 0x08, 0x12, 0x00]))
        .reply_ok(&pef_reply(&[3, 0x08, 0x12, 0x00]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        alert_policies_count: Some(AlertPoliciesCount::default()),
        alert_policies: Some(Vec::new()),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    assert_eq!(config.alert_policies_count.unwrap().value, 3);
    let policies = config.alert_policies.unwrap();
    assert_eq!(policies.len(), 3);

    let transport = client.into_transport();
    assert_eq!(transport.exchanges(), 4);
    let sets: Vec<u8> = transport.sent[1..].iter().map(|(_, d)| sent_set(d)).collect();
    assert_eq!(sets, vec![1, 2, 3]);
    assert!(transport.sent[1..].iter().all(|(_, d)| sent_selector(d) == 9));
}

#[test]
fn test_zero_based_family_sized_from_count() {
    // Group controls index from 0: count of 3 fetches selectors 0, 1, 2
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[3])) // NumberOfGroupControls
        .reply_ok(&pef_reply(&[0, 0x00]))
        .reply_ok(&pef_reply(&[1, 0x00]))
        .reply_ok(&pef_reply(&[2, 0x00]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        group_controls: Some(Vec::new()),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    assert_eq!(config.group_controls.unwrap().len(), 3);
    // The count was fetched for gating but its slot was not requested
    assert!(config.group_controls_count.is_none());

    let transport = client.into_transport();
    assert_eq!(transport.exchanges(), 4);
    assert_eq!(sent_selector(&transport.sent[0].1), 14);
    let sets: Vec<u8> = transport.sent[1..].iter().map(|(_, d)| sent_set(d)).collect();
    assert_eq!(sets, vec![0, 1, 2]);
}

#[test]
fn test_count_of_zero_leaves_list_empty() {
    let mut transport = MockTransport::new();
    transport.reply_ok(&pef_reply(&[0]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        alert_policies: Some(Vec::new()),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    assert!(config.alert_policies.unwrap().is_empty());
    assert_eq!(client.into_transport().exchanges(), 1);
}

#[test]
fn test_prepopulated_list_is_not_resized() {
    // Caller asked for exactly one filter entry; the count still gates the
    // family but must not grow the caller's list.
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[5])) // NumberOfEventFilters says 5
        .reply_ok(&pef_reply(&[2, 0x80]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        event_filters: Some(vec![EventFilter::with_selector(2)]),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    let filters = config.event_filters.unwrap();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].set_selector, 2);

    let transport = client.into_transport();
    assert_eq!(transport.exchanges(), 2);
    assert_eq!(sent_set(&transport.sent[1].1), 2);
}

#[test]
fn test_one_count_gates_both_event_filter_views() {
    // event_filters and event_filters_data1 share the NumberOfEventFilters
    // gate; the count is fetched once.
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[2])) // NumberOfEventFilters
        .reply_ok(&pef_reply(&[1, 0x80]))
        .reply_ok(&pef_reply(&[2, 0x80]))
        .reply_ok(&pef_reply(&[1, 0x80]))
        .reply_ok(&pef_reply(&[2, 0x80]));

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        event_filters_count: Some(EventFiltersCount::default()),
        event_filters: Some(Vec::new()),
        event_filters_data1: Some(Vec::new()),
        ..Default::default()
    };
    client.get_pef_config_into(&mut config).unwrap();

    assert_eq!(config.event_filters.unwrap().len(), 2);
    assert_eq!(config.event_filters_data1.unwrap().len(), 2);

    let transport = client.into_transport();
    assert_eq!(transport.exchanges(), 5);
    let selectors: Vec<u8> = transport.sent.iter().map(|(_, d)| sent_selector(d)).collect();
    assert_eq!(selectors, vec![5, 6, 6, 7, 7]);
}

// =============================================================================
// Abort Tests
// =============================================================================

#[test]
fn test_retrieval_aborts_on_first_error() {
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[2])) // count = 2
        .reply_ok(&pef_reply(&[1, 0x08, 0x12, 0x00]))
        .reply(0x80, &[]); // second policy entry not supported

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        alert_policies: Some(Vec::new()),
        ..Default::default()
    };
    let err = client.get_pef_config_into(&mut config).unwrap_err();

    assert!(matches!(err, IpmiError::Completion { code: 0x80, .. }));
    // No fetch was issued after the failure
    assert_eq!(client.into_transport().exchanges(), 3);
}

#[test]
fn test_retrieval_aborts_on_malformed_param_data() {
    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[1]))
        .reply_ok(&pef_reply(&[1])); // entry data too short for a policy

    let mut client = Client::new(transport);
    let mut config = PefConfig {
        alert_policies: Some(Vec::new()),
        ..Default::default()
    };
    let err = client.get_pef_config_into(&mut config).unwrap_err();
    assert!(matches!(err, IpmiError::Truncated { .. }));
}

// =============================================================================
// Full Retrieval Scenario
// =============================================================================

#[test]
fn test_full_retrieval_visits_parameters_in_order() {
    // One entry per table family; with that shape the fetch sequence visits
    // every parameter selector exactly once, in ascending order.
    let guid: [u8; 16] = *b"\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0A\x0B\x0C\x0D\x0E\x0F\x10";
    let mut guid_data = vec![0x01];
    guid_data.extend_from_slice(&guid);

    let mut transport = MockTransport::new();
    transport
        .reply_ok(&pef_reply(&[0x00])) // set in progress
        .reply_ok(&pef_reply(&[0x0F])) // control
        .reply_ok(&pef_reply(&[0x3F])) // action global control
        .reply_ok(&pef_reply(&[60])) // startup delay
        .reply_ok(&pef_reply(&[30])) // alert startup delay
        .reply_ok(&pef_reply(&[1])) // event filters count
        .reply_ok(&pef_reply(&[1, 0x80])) // event filter 1
        .reply_ok(&pef_reply(&[1, 0x80])) // event filter data1 1
        .reply_ok(&pef_reply(&[1])) // alert policies count
        .reply_ok(&pef_reply(&[1, 0x08, 0x12, 0x00])) // alert policy 1
        .reply_ok(&pef_reply(&guid_data)) // system guid
        .reply_ok(&pef_reply(&[1])) // alert strings count
        .reply_ok(&pef_reply(&[0, 0x01, 0x01])) // alert string key 0
        .reply_ok(&pef_reply(&[0, 0x00, b'h', b'i'])) // alert string 0
        .reply_ok(&pef_reply(&[1])) // group controls count
        .reply_ok(&pef_reply(&[0, 0x00])); // group control 0

    let mut client = Client::new(transport);
    let config = client.get_pef_config().unwrap();

    assert_eq!(config.startup_delay.unwrap().seconds, 60);
    assert_eq!(config.event_filters.unwrap().len(), 1);
    assert_eq!(config.alert_policies.unwrap().len(), 1);
    assert_eq!(config.system_guid.as_ref().unwrap().guid, guid);
    assert!(config.system_guid.unwrap().used_for_pet);
    assert_eq!(config.alert_strings.unwrap()[0].data, b"hi".to_vec());
    assert_eq!(config.group_controls_count.unwrap().value, 1);

    let transport = client.into_transport();
    let selectors: Vec<u8> = transport.sent.iter().map(|(_, d)| sent_selector(d)).collect();
    assert_eq!(
        selectors,
        vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]
    );
}
