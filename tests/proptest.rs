//! Property-based tests for the OID store and dispatcher.
//!
//! Arcs are drawn from a small alphabet so generated queries frequently hit,
//! prefix, or fall between stored identifiers.

use proptest::prelude::*;
use snmp_switch::handler::{Dispatcher, Operation};
use snmp_switch::store::{OidStore, StoreError, is_descendant, is_descendant_or_self};
use snmp_switch::{ErrorStatus, Oid, Value, VarBind};
use std::collections::BTreeSet;
use std::sync::Arc;

// =============================================================================
// Strategies
// =============================================================================

fn arb_arcs() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..4, 0..=5)
}

fn arb_oid() -> impl Strategy<Value = Oid> {
    arb_arcs().prop_map(|arcs| Oid::from_slice(&arcs))
}

fn arb_keys() -> impl Strategy<Value = BTreeSet<Vec<u32>>> {
    prop::collection::btree_set(arb_arcs(), 0..=24)
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::Integer),
        "[a-z0-9/]{0,16}".prop_map(Value::from),
        any::<u32>().prop_map(Value::Gauge32),
        any::<u32>().prop_map(Value::TimeTicks),
    ]
}

/// Store mapping each key to its position in ascending order.
fn build_store(keys: &BTreeSet<Vec<u32>>) -> OidStore {
    keys.iter()
        .enumerate()
        .map(|(i, arcs)| (Oid::from_slice(arcs), Value::Integer(i as i32)))
        .collect()
}

// =============================================================================
// Store properties
// =============================================================================

proptest! {
    #[test]
    fn get_next_is_smallest_greater_key(keys in arb_keys(), query in arb_arcs()) {
        let store = build_store(&keys);
        let expected = keys
            .iter()
            .enumerate()
            .filter(|(_, k)| k.as_slice() > query.as_slice())
            .min_by(|a, b| a.1.cmp(b.1));

        match (store.get_next(&Oid::from_slice(&query)), expected) {
            (Ok((oid, value)), Some((index, arcs))) => {
                prop_assert_eq!(oid.arcs(), arcs.as_slice());
                prop_assert_eq!(value, Value::Integer(index as i32));
            }
            (Err(StoreError::NoSuccessor(oid)), None) => {
                prop_assert_eq!(oid.arcs(), query.as_slice());
            }
            (actual, expected) => {
                prop_assert!(false, "get_next mismatch: {:?} vs {:?}", actual, expected);
            }
        }
    }

    #[test]
    fn get_matches_membership(keys in arb_keys(), query in arb_arcs()) {
        let store = build_store(&keys);
        let result = store.get(&Oid::from_slice(&query));
        prop_assert_eq!(result.is_ok(), keys.contains(&query));
        if let Err(err) = result {
            prop_assert!(matches!(err, StoreError::UnknownIdentifier(_)), "unexpected error: {}", err);
        }
    }

    #[test]
    fn set_then_get_returns_written_value(
        keys in arb_keys(),
        target in arb_arcs(),
        value in arb_value(),
    ) {
        let store = build_store(&keys);
        let oid = Oid::from_slice(&target);
        let before = store.oids();

        match store.set(&oid, value.clone()) {
            Ok(()) => {
                prop_assert!(keys.contains(&target));
                prop_assert_eq!(store.get(&oid).unwrap().1, value);
            }
            Err(StoreError::UnknownIdentifier(_)) => {
                prop_assert!(!keys.contains(&target));
                prop_assert!(!store.contains(&oid));
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
        prop_assert_eq!(store.oids(), before);
    }

    #[test]
    fn descendant_predicates_agree_with_prefix(a in arb_oid(), b in arb_oid()) {
        let prefix = a.arcs().len() >= b.arcs().len()
            && a.arcs()[..b.arcs().len()] == *b.arcs();
        prop_assert_eq!(is_descendant_or_self(&a, &b), prefix);
        prop_assert_eq!(is_descendant(&a, &b), prefix && a != b);
        if is_descendant(&a, &b) {
            prop_assert!(!is_descendant(&b, &a));
            prop_assert!(a > b);
        }
    }
}

// =============================================================================
// Dispatcher properties
// =============================================================================

proptest! {
    #[test]
    fn get_flags_exactly_the_absent_positions(
        keys in arb_keys(),
        queries in prop::collection::vec(arb_arcs(), 0..=8),
    ) {
        let dispatcher = Dispatcher::new(Arc::new(build_store(&keys)), "public");
        let request: Vec<VarBind> = queries
            .iter()
            .map(|arcs| VarBind::null(Oid::from_slice(arcs)))
            .collect();

        let response = dispatcher.dispatch(b"public", Operation::Get, &request).unwrap();

        let expected: Vec<u32> = queries
            .iter()
            .enumerate()
            .filter(|(_, arcs)| !keys.contains(*arcs))
            .map(|(i, _)| i as u32 + 1)
            .collect();
        prop_assert_eq!(response.no_such_instance, expected);
        prop_assert_eq!(response.error_status, ErrorStatus::NoError);
        prop_assert_eq!(response.varbinds.len(), queries.len());
        for (vb, arcs) in response.varbinds.iter().zip(&queries) {
            prop_assert_eq!(vb.oid.arcs(), arcs.as_slice());
        }
    }

    #[test]
    fn get_next_drops_bindings_without_successor(
        keys in arb_keys(),
        queries in prop::collection::vec(arb_arcs(), 1..=8),
    ) {
        let store = build_store(&keys);
        let answered = queries
            .iter()
            .filter(|q| store.get_next(&Oid::from_slice(q)).is_ok())
            .count();

        let dispatcher = Dispatcher::new(Arc::new(store), "public");
        let request: Vec<VarBind> = queries
            .iter()
            .map(|arcs| VarBind::null(Oid::from_slice(arcs)))
            .collect();
        let response = dispatcher.dispatch(b"public", Operation::GetNext, &request).unwrap();

        prop_assert_eq!(response.varbinds.len(), answered);
        let status = if answered == queries.len() {
            ErrorStatus::NoError
        } else {
            ErrorStatus::NoSuchName
        };
        prop_assert_eq!(response.error_status, status);
    }
}
