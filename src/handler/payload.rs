//! Datagram processing: decode, dispatch and encode replies.

use std::net::SocketAddr;

use bytes::Bytes;

use super::dispatch::Dispatcher;
use super::results::Operation;
use crate::ber::Decoder;
use crate::message::CommunityMessage;

impl Dispatcher {
    /// Answer every message contained in one datagram.
    ///
    /// Messages are decoded back to back until the payload is exhausted and
    /// one encoded reply is returned per answered message, in order.
    /// Processing stops at the first message that fails to decode or carries
    /// the wrong community; bytes after it are ignored.
    pub fn handle_payload(&self, data: Bytes, source: SocketAddr) -> Vec<Bytes> {
        let mut decoder = Decoder::new(data);
        let mut replies = Vec::new();

        while !decoder.is_empty() {
            let message = match CommunityMessage::decode_from(&mut decoder) {
                Ok(message) => message,
                Err(err) => {
                    tracing::debug!(target: "snmp_switch::handler", { snmp.source = %source, error = %err }, "failed to decode message");
                    break;
                }
            };

            let operation = Operation::from(message.pdu.pdu_type);
            let Some(response) = self.dispatch(&message.community, operation, &message.pdu.varbinds)
            else {
                tracing::debug!(target: "snmp_switch::handler", { snmp.source = %source, snmp.version = %message.version }, "invalid community, dropping");
                break;
            };

            let pdu = response.into_pdu(message.version, message.pdu.request_id);
            replies.push(message.reply(pdu).encode());
        }

        replies
    }
}
