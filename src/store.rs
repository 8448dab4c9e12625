//! OID store: the ordered index of managed values.
//!
//! Entries map an [`Oid`] to a [`StoreValue`], which is either a static
//! [`Value`] or a producer invoked on every read. The set of identifiers is
//! fixed once the store is shared: [`OidStore::insert`] needs `&mut self`,
//! while [`OidStore::set`] only replaces values that already exist.
//!
//! # Example
//!
//! ```
//! use snmp_switch::store::{OidStore, StoreError, StoreValue};
//! use snmp_switch::{Value, oid};
//!
//! let mut store = OidStore::new();
//! store.insert(oid!(1, 2, 3), Value::Integer(99));
//! store.insert(
//!     oid!(1, 2, 4),
//!     StoreValue::computed(|oid, _store| Ok(Value::from(oid.to_string()))),
//! );
//!
//! assert_eq!(store.get(&oid!(1, 2, 3)).unwrap().1, Value::Integer(99));
//! assert_eq!(store.get_next(&oid!(1, 2, 3)).unwrap().1, Value::from("1.2.4"));
//! assert!(matches!(store.get_next(&oid!(1, 2, 4)), Err(StoreError::NoSuccessor(_))));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::oid::Oid;
use crate::value::Value;

/// Error returned by a value producer.
pub type ProducerError = Box<dyn std::error::Error + Send + Sync>;

/// Function computing a value at read time.
///
/// Receives the identifier being resolved and the store itself, so producers
/// may read other entries.
pub type Producer = Arc<dyn Fn(&Oid, &OidStore) -> Result<Value, ProducerError> + Send + Sync>;

/// A store entry.
#[derive(Clone)]
pub enum StoreValue {
    /// Fixed value, replaced only by [`OidStore::set`].
    Static(Value),
    /// Value recomputed on every `get`/`get_next` that resolves this entry.
    Computed(Producer),
}

impl StoreValue {
    /// Wrap a closure as a computed entry.
    pub fn computed<F>(producer: F) -> Self
    where
        F: Fn(&Oid, &OidStore) -> Result<Value, ProducerError> + Send + Sync + 'static,
    {
        StoreValue::Computed(Arc::new(producer))
    }
}

impl fmt::Debug for StoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreValue::Static(value) => f.debug_tuple("Static").field(value).finish(),
            StoreValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for StoreValue {
    fn from(value: Value) -> Self {
        StoreValue::Static(value)
    }
}

/// Store lookup failures.
///
/// These are expected conditions the dispatcher maps to protocol status; none
/// of them indicates a broken store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The identifier is not present.
    #[error("unknown identifier {0}")]
    UnknownIdentifier(Oid),

    /// No identifier is ordered after the given one.
    #[error("no identifier follows {0}")]
    NoSuccessor(Oid),

    /// A computed entry failed to produce its value.
    #[error("producer for {oid} failed: {source}")]
    Producer {
        oid: Oid,
        #[source]
        source: ProducerError,
    },
}

/// Ordered, shareable OID-to-value index.
///
/// Reads take a shared lock and `set` an exclusive one, so a write is never
/// observed half-applied. Producers run after the lock is released.
#[derive(Default)]
pub struct OidStore {
    entries: RwLock<BTreeMap<Oid, StoreValue>>,
}

impl OidStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry while the store is still being built.
    pub fn insert(&mut self, oid: Oid, value: impl Into<StoreValue>) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(oid, value.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// True if `oid` is present.
    pub fn contains(&self, oid: &Oid) -> bool {
        self.read().contains_key(oid)
    }

    /// Snapshot of all identifiers in ascending order.
    pub fn oids(&self) -> Vec<Oid> {
        self.read().keys().cloned().collect()
    }

    /// Look up an exact identifier.
    pub fn get(&self, oid: &Oid) -> Result<(Oid, Value), StoreError> {
        let entry = self
            .read()
            .get(oid)
            .cloned()
            .ok_or_else(|| StoreError::UnknownIdentifier(oid.clone()))?;
        self.resolve(oid.clone(), entry)
    }

    /// Look up the first identifier strictly greater than `oid`.
    ///
    /// `oid` itself need not be present.
    pub fn get_next(&self, oid: &Oid) -> Result<(Oid, Value), StoreError> {
        let (next, entry) = self
            .read()
            .range::<Oid, _>((Bound::Excluded(oid), Bound::Unbounded))
            .next()
            .map(|(next, entry)| (next.clone(), entry.clone()))
            .ok_or_else(|| StoreError::NoSuccessor(oid.clone()))?;
        self.resolve(next, entry)
    }

    /// Replace the value of an existing identifier.
    ///
    /// A computed entry becomes static. Absent identifiers are never created.
    pub fn set(&self, oid: &Oid, value: Value) -> Result<(), StoreError> {
        let mut entries = self.write();
        let Some(slot) = entries.get_mut(oid) else {
            return Err(StoreError::UnknownIdentifier(oid.clone()));
        };
        tracing::trace!(target: "snmp_switch::store", { snmp.oid = %oid, snmp.value = %value }, "value replaced");
        *slot = StoreValue::Static(value);
        Ok(())
    }

    fn resolve(&self, oid: Oid, entry: StoreValue) -> Result<(Oid, Value), StoreError> {
        match entry {
            StoreValue::Static(value) => Ok((oid, value)),
            StoreValue::Computed(producer) => match producer(&oid, self) {
                Ok(value) => Ok((oid, value)),
                Err(source) => Err(StoreError::Producer { oid, source }),
            },
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<Oid, StoreValue>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<Oid, StoreValue>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for OidStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidStore")
            .field("entries", &self.len())
            .finish()
    }
}

impl<V: Into<StoreValue>> FromIterator<(Oid, V)> for OidStore {
    fn from_iter<I: IntoIterator<Item = (Oid, V)>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|(oid, v)| (oid, v.into())).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

/// True if `oid` equals `ancestor` or lies beneath it.
pub fn is_descendant_or_self(oid: &Oid, ancestor: &Oid) -> bool {
    oid.starts_with(ancestor)
}

/// True if `oid` lies strictly beneath `ancestor`.
///
/// Walk loops use this to stop once `get_next` leaves a subtree.
pub fn is_descendant(oid: &Oid, ancestor: &Oid) -> bool {
    oid != ancestor && is_descendant_or_self(oid, ancestor)
}
