//! Community-based SNMP message format (v1/v2c).
//!
//! `SEQUENCE { version INTEGER, community OCTET STRING, pdu PDU }`
//!
//! A datagram may contain several of these back to back; see
//! [`CommunityMessage::decode_from`].

use crate::ber::{Decoder, EncodeBuf};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::pdu::Pdu;
use crate::version::Version;
use bytes::Bytes;

/// Community-based SNMP message (v1/v2c).
#[derive(Debug, Clone, PartialEq)]
pub struct CommunityMessage {
    /// SNMP version (V1 or V2c)
    pub version: Version,
    /// Community string
    pub community: Bytes,
    /// Protocol data unit
    pub pdu: Pdu,
}

impl CommunityMessage {
    /// Create a new community message.
    pub fn new(version: Version, community: impl Into<Bytes>, pdu: Pdu) -> Self {
        Self {
            version,
            community: community.into(),
            pdu,
        }
    }

    /// Build the reply to this message: same version and community, new PDU.
    pub fn reply(&self, pdu: Pdu) -> Self {
        Self {
            version: self.version,
            community: self.community.clone(),
            pdu,
        }
    }

    /// Encode to BER.
    pub fn encode(&self) -> Bytes {
        let mut buf = EncodeBuf::new();

        buf.push_sequence(|buf| {
            self.pdu.encode(buf);
            buf.push_octet_string(&self.community);
            buf.push_integer(self.version.as_i32());
        });

        buf.finish()
    }

    /// Decode a single message, ignoring any trailing bytes.
    pub fn decode(data: Bytes) -> Result<Self> {
        Self::decode_from(&mut Decoder::new(data))
    }

    /// Decode the next message from a decoder, leaving it positioned after it.
    pub fn decode_from(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;

        let version_offset = seq.offset();
        let version_num = seq.read_integer()?;
        let version = Version::from_i32(version_num).ok_or_else(|| {
            Error::decode(version_offset, DecodeErrorKind::UnknownVersion(version_num))
        })?;

        let community = seq.read_octet_string()?;
        let pdu = Pdu::decode(&mut seq)?;

        Ok(CommunityMessage {
            version,
            community,
            pdu,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use crate::pdu::PduType;

    // snmpget -v2c -c community localhost:10610 .1.1
    const SNMP_GET: &[u8] = b"0%\x02\x01\x01\x04\tcommunity\xa0\x15\x02\x04$=W\xfd\x02\x01\x00\x02\x01\x000\x070\x05\x06\x01)\x05\x00";

    #[test]
    fn test_decode_net_snmp_get() {
        let msg = CommunityMessage::decode(Bytes::from_static(SNMP_GET)).unwrap();
        assert_eq!(msg.version, Version::V2c);
        assert_eq!(msg.community.as_ref(), b"community");
        assert_eq!(msg.pdu.pdu_type, PduType::GetRequest);
        assert_eq!(msg.pdu.request_id, 0x243D_57FD);
        assert_eq!(msg.pdu.varbinds[0].oid, oid!(1, 1));
    }

    #[test]
    fn test_encode_matches_net_snmp_bytes() {
        let msg = CommunityMessage::decode(Bytes::from_static(SNMP_GET)).unwrap();
        assert_eq!(msg.encode().as_ref(), SNMP_GET);
    }

    #[test]
    fn test_back_to_back_messages() {
        let mut payload = SNMP_GET.to_vec();
        payload.extend_from_slice(SNMP_GET);
        let mut decoder = Decoder::new(Bytes::from(payload));

        CommunityMessage::decode_from(&mut decoder).unwrap();
        assert!(!decoder.is_empty());
        CommunityMessage::decode_from(&mut decoder).unwrap();
        assert!(decoder.is_empty());
    }

    #[test]
    fn test_v3_rejected() {
        let pdu = Pdu::get_request(1, &[oid!(1, 1)]);
        let mut bytes = CommunityMessage::new(Version::V1, &b"public"[..], pdu)
            .encode()
            .to_vec();
        // version INTEGER content byte sits after the 2-byte SEQUENCE header and 2-byte INTEGER header
        bytes[4] = 3;
        let err = CommunityMessage::decode(Bytes::from(bytes)).unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                offset: 2,
                kind: DecodeErrorKind::UnknownVersion(3)
            }
        ));
    }

    #[test]
    fn test_reply_keeps_version_and_community() {
        let msg = CommunityMessage::decode(Bytes::from_static(SNMP_GET)).unwrap();
        let reply = msg.reply(Pdu::response(
            msg.pdu.request_id,
            crate::error::ErrorStatus::NoError,
            0,
            vec![],
        ));
        assert_eq!(reply.version, Version::V2c);
        assert_eq!(reply.community, msg.community);
    }
}
