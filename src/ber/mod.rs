//! BER (Basic Encoding Rules) codec for SNMP community messages.
//!
//! Only the subset of X.690 that SNMPv1/v2c uses is implemented: definite
//! lengths, primitive scalars, and constructed SEQUENCE/PDU containers.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::Decoder;
pub use encode::EncodeBuf;
pub use length::{MAX_LENGTH, decode_length, encode_length};
