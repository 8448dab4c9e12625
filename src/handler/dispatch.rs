//! Request dispatch against an [`OidStore`].

use std::sync::Arc;

use bytes::Bytes;
use subtle::ConstantTimeEq;

use super::results::{Operation, Response};
use crate::error::ErrorStatus;
use crate::store::{OidStore, StoreError};
use crate::value::Value;
use crate::varbind::VarBind;

const NO_SUCH_NAME_MESSAGE: &str = "Returning noSuchName, ignoring exception";

/// Drives decoded requests against a shared store.
///
/// The dispatcher holds no per-request state; one instance is shared by every
/// task serving the agent socket.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    store: Arc<OidStore>,
    community: Bytes,
}

impl Dispatcher {
    /// Create a dispatcher answering requests carrying `community`.
    pub fn new(store: Arc<OidStore>, community: impl Into<Bytes>) -> Self {
        Self {
            store,
            community: community.into(),
        }
    }

    /// The store requests are served from.
    pub fn store(&self) -> &Arc<OidStore> {
        &self.store
    }

    /// The community requests must carry.
    pub fn community(&self) -> &[u8] {
        &self.community
    }

    /// Check a request community against the configured one.
    pub(crate) fn validate_community(&self, community: &[u8]) -> bool {
        // ct_eq returns a Choice, which we convert to bool after comparison
        self.community.len() == community.len()
            && bool::from(self.community.as_ref().ct_eq(community))
    }

    /// Dispatch one request.
    ///
    /// Returns `None` when the community does not match, in which case
    /// nothing must be sent back.
    pub fn dispatch(
        &self,
        community: &[u8],
        operation: Operation,
        bindings: &[VarBind],
    ) -> Option<Response> {
        if !self.validate_community(community) {
            return None;
        }

        tracing::trace!(target: "snmp_switch::handler", { snmp.operation = ?operation, snmp.bindings = bindings.len() }, "dispatching request");

        let response = match operation {
            Operation::Get => self.handle_get(bindings),
            Operation::GetNext => self.handle_get_next(bindings),
            Operation::Set => self.handle_set(bindings),
            Operation::Unsupported(pdu_type) => {
                tracing::debug!(target: "snmp_switch::handler", { snmp.pdu_type = %pdu_type }, "unsupported operation");
                Response::error(ErrorStatus::GenErr, 0, Vec::new())
            }
        };
        Some(response)
    }

    fn handle_get(&self, bindings: &[VarBind]) -> Response {
        let mut response = Response::success(Vec::with_capacity(bindings.len()));

        for (index, vb) in bindings.iter().enumerate() {
            match self.store.get(&vb.oid) {
                Ok((oid, value)) => response.varbinds.push(VarBind::new(oid, value)),
                Err(StoreError::UnknownIdentifier(oid)) => {
                    tracing::debug!(target: "snmp_switch::handler", { snmp.oid = %oid }, "{}", NO_SUCH_NAME_MESSAGE);
                    response.varbinds.push(VarBind::new(oid, Value::NoSuchInstance));
                    response.no_such_instance.push(index as u32 + 1);
                }
                Err(err) => return producer_fault(index, bindings, err),
            }
        }

        response
    }

    fn handle_get_next(&self, bindings: &[VarBind]) -> Response {
        let mut response = Response::success(Vec::with_capacity(bindings.len()));

        for (index, vb) in bindings.iter().enumerate() {
            match self.store.get_next(&vb.oid) {
                Ok((oid, value)) => response.varbinds.push(VarBind::new(oid, value)),
                Err(StoreError::NoSuccessor(oid)) => {
                    tracing::debug!(target: "snmp_switch::handler", { snmp.oid = %oid }, "{}", NO_SUCH_NAME_MESSAGE);
                    response.error_status = ErrorStatus::NoSuchName;
                }
                Err(err) => return producer_fault(index, bindings, err),
            }
        }

        response
    }

    fn handle_set(&self, bindings: &[VarBind]) -> Response {
        // exception values are response-only; nothing is stored
        if let Some(index) = bindings.iter().position(|vb| vb.value.is_exception()) {
            tracing::debug!(target: "snmp_switch::handler", { snmp.oid = %bindings[index].oid }, "set with exception value rejected");
            return Response::error(ErrorStatus::BadValue, index as i32 + 1, bindings.to_vec());
        }

        let mut response = Response::success(bindings.to_vec());

        for (index, vb) in bindings.iter().enumerate() {
            if let Err(err) = self.store.set(&vb.oid, vb.value.clone()) {
                tracing::debug!(target: "snmp_switch::handler", { snmp.oid = %vb.oid, error = %err }, "{}", NO_SUCH_NAME_MESSAGE);
                response.no_such_instance.push(index as u32 + 1);
            }
        }

        response
    }
}

/// genErr pointing at the binding whose producer failed, echoing the request.
fn producer_fault(index: usize, bindings: &[VarBind], err: StoreError) -> Response {
    tracing::warn!(target: "snmp_switch::handler", { error = %err, snmp.error_index = index + 1 }, "value producer failed");
    Response::error(ErrorStatus::GenErr, index as i32 + 1, bindings.to_vec())
}
