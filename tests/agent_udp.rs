//! End-to-end tests: captured net-snmp requests against a live agent.

mod common;

use common::*;
use snmp_switch::{CommunityMessage, ErrorStatus, Pdu, PduType, Value, VarBind, Version, oid};

fn encode(version: Version, pdu: Pdu) -> Vec<u8> {
    CommunityMessage::new(version, COMMUNITY, pdu).encode().to_vec()
}

#[tokio::test]
async fn test_snmpget() {
    let agent = TestAgent::new().await;
    let reply = agent.request(GET).await;

    assert_eq!(reply.version, Version::V2c);
    assert_eq!(&reply.community[..], COMMUNITY.as_bytes());
    assert_eq!(reply.pdu.pdu_type, PduType::Response);
    assert_eq!(reply.pdu.request_id, GET_REQUEST_ID);
    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::NoError);
    assert_eq!(
        reply.pdu.varbinds,
        vec![VarBind::new(oid!(1, 1), Value::from("test"))]
    );
}

#[tokio::test]
async fn test_snmpset_updates_store() {
    let agent = TestAgent::new().await;
    let reply = agent.request(SET).await;

    assert_eq!(reply.pdu.request_id, SET_REQUEST_ID);
    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::NoError);
    assert_eq!(
        reply.pdu.varbinds,
        vec![VarBind::new(oid!(1, 1), Value::Integer(5))]
    );
    assert_eq!(agent.store().get(&oid!(1, 1)).unwrap().1, Value::Integer(5));

    let reply = agent.request(GET).await;
    assert_eq!(reply.pdu.varbinds[0].value, Value::Integer(5));
}

#[tokio::test]
async fn test_snmpwalk_step() {
    let agent = TestAgent::new().await;
    let reply = agent.request(WALK).await;

    assert_eq!(reply.pdu.request_id, WALK_REQUEST_ID);
    assert_eq!(
        reply.pdu.varbinds,
        vec![VarBind::new(oid!(1, 2), Value::Integer(42))]
    );
}

#[tokio::test]
async fn test_snmpbulkget_is_gen_err() {
    let agent = TestAgent::new().await;
    let reply = agent.request(BULK).await;

    assert_eq!(reply.pdu.request_id, BULK_REQUEST_ID);
    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::GenErr);
    assert!(reply.pdu.varbinds.is_empty());
}

#[tokio::test]
async fn test_wrong_community_is_silent() {
    let agent = TestAgent::new().await;
    agent.expect_silence(WRONG_COMMUNITY).await;
    agent
        .expect_silence(&payload(&[WRONG_COMMUNITY, GET]))
        .await;
}

#[tokio::test]
async fn test_concatenated_messages() {
    let agent = TestAgent::new().await;
    let replies = agent.exchange(&payload(&[GET, WALK]), 2).await;

    assert_eq!(replies[0].pdu.request_id, GET_REQUEST_ID);
    assert_eq!(replies[0].pdu.varbinds[0].oid, oid!(1, 1));
    assert_eq!(replies[1].pdu.request_id, WALK_REQUEST_ID);
    assert_eq!(replies[1].pdu.varbinds[0].oid, oid!(1, 2));
}

#[tokio::test]
async fn test_get_unknown_v2c_exception() {
    let agent = TestAgent::new().await;
    let request = encode(Version::V2c, Pdu::get_request(10, &[oid!(1, 1), oid!(1, 3)]));
    let reply = agent.request(&request).await;

    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::NoError);
    assert_eq!(reply.pdu.error_index, 0);
    assert_eq!(reply.pdu.varbinds[0].value, Value::from("test"));
    assert_eq!(reply.pdu.varbinds[1], VarBind::new(oid!(1, 3), Value::NoSuchInstance));
}

#[tokio::test]
async fn test_get_unknown_v1_no_such_name() {
    let agent = TestAgent::new().await;
    let request = encode(Version::V1, Pdu::get_request(11, &[oid!(1, 3)]));
    let reply = agent.request(&request).await;

    assert_eq!(reply.version, Version::V1);
    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::NoSuchName);
    assert_eq!(reply.pdu.error_index, 1);
    assert_eq!(reply.pdu.varbinds[0].value, Value::Null);
}

#[tokio::test]
async fn test_get_next_past_end() {
    let agent = TestAgent::new().await;
    let request = encode(Version::V2c, Pdu::get_next_request(12, &[oid!(1, 2)]));
    let reply = agent.request(&request).await;

    assert_eq!(reply.pdu.error_status_enum(), ErrorStatus::NoSuchName);
    assert_eq!(reply.pdu.error_index, 0);
    assert!(reply.pdu.varbinds.is_empty());
}

#[tokio::test]
async fn test_set_unknown_does_not_create() {
    let agent = TestAgent::new().await;
    let request = encode(
        Version::V2c,
        Pdu::set_request(13, vec![VarBind::new(oid!(1, 7), Value::Integer(1))]),
    );
    let reply = agent.request(&request).await;

    assert_eq!(reply.pdu.varbinds[0], VarBind::new(oid!(1, 7), Value::NoSuchInstance));
    assert!(!agent.store().contains(&oid!(1, 7)));
}

#[tokio::test]
async fn test_garbage_is_dropped() {
    let agent = TestAgent::new().await;
    agent.expect_silence(b"\x30\x03\x02\x01").await;

    // agent keeps serving
    let reply = agent.request(GET).await;
    assert_eq!(reply.pdu.request_id, GET_REQUEST_ID);
}

#[tokio::test]
async fn test_agents_share_one_tracing_subscriber() {
    init_tracing();
    let first = TestAgent::new().await;
    let second = TestAgent::new().await;

    assert_ne!(first.addr(), second.addr());
    assert_eq!(first.request(GET).await.pdu.request_id, GET_REQUEST_ID);
    assert_eq!(second.request(GET).await.pdu.request_id, GET_REQUEST_ID);
}
