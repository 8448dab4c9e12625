//! Operation and response types for request dispatch.

use crate::error::ErrorStatus;
use crate::pdu::{Pdu, PduType};
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

/// Operation requested by an incoming PDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Exact lookup of each binding.
    Get,
    /// Single-step successor lookup of each binding.
    GetNext,
    /// Overwrite of existing identifiers.
    Set,
    /// Any other PDU type, answered with genErr.
    Unsupported(PduType),
}

impl From<PduType> for Operation {
    fn from(pdu_type: PduType) -> Self {
        match pdu_type {
            PduType::GetRequest => Operation::Get,
            PduType::GetNextRequest => Operation::GetNext,
            PduType::SetRequest => Operation::Set,
            other => Operation::Unsupported(other),
        }
    }
}

/// Outcome of dispatching one request.
///
/// Positions in `no_such_instance` are 1-based indexes into `varbinds`. How
/// they reach the wire depends on the protocol version; see
/// [`Response::into_pdu`].
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Variable bindings in the response
    pub varbinds: Vec<VarBind>,
    /// Message-level error status
    pub error_status: ErrorStatus,
    /// Error index (1-based index of problematic varbind, 0 if none)
    pub error_index: i32,
    /// Bindings whose identifier does not exist
    pub no_such_instance: Vec<u32>,
}

impl Response {
    /// Create a successful response with the given varbinds.
    pub fn success(varbinds: Vec<VarBind>) -> Self {
        Self::error(ErrorStatus::NoError, 0, varbinds)
    }

    /// Create an error response.
    pub fn error(error_status: ErrorStatus, error_index: i32, varbinds: Vec<VarBind>) -> Self {
        Self {
            varbinds,
            error_status,
            error_index,
            no_such_instance: Vec::new(),
        }
    }

    /// Build the Response PDU answering `request_id`.
    ///
    /// SNMPv2c marks every flagged binding with the `noSuchInstance`
    /// exception. SNMPv1 has no exception values: the last flagged position
    /// becomes a `noSuchName` error (unless another error is already set) and
    /// any exception value is sent as NULL.
    pub fn into_pdu(self, version: Version, request_id: i32) -> Pdu {
        let Response {
            mut varbinds,
            mut error_status,
            mut error_index,
            no_such_instance,
        } = self;

        if version.has_exceptions() {
            for position in &no_such_instance {
                let slot = position
                    .checked_sub(1)
                    .and_then(|i| varbinds.get_mut(i as usize));
                if let Some(varbind) = slot {
                    varbind.value = Value::NoSuchInstance;
                }
            }
        } else {
            if let Some(&last) = no_such_instance.last()
                && error_status == ErrorStatus::NoError
            {
                error_status = ErrorStatus::NoSuchName;
                error_index = last as i32;
            }
            for varbind in &mut varbinds {
                if varbind.value.is_exception() {
                    varbind.value = Value::Null;
                }
            }
        }

        Pdu::response(request_id, error_status, error_index, varbinds)
    }
}
