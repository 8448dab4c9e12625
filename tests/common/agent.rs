//! In-process SNMP agent for testing.
//!
//! Agents bind to ephemeral localhost ports and shut down cleanly on drop.

use crate::common::fixtures;

use bytes::Bytes;
use snmp_switch::store::OidStore;
use snmp_switch::{Agent, CommunityMessage};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How long to wait for a reply that should arrive.
const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to listen for a reply that should not arrive.
const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// An in-process SNMP agent for testing.
///
/// Automatically starts on creation and stops on drop.
pub struct TestAgent {
    addr: SocketAddr,
    store: Arc<OidStore>,
    cancel: CancellationToken,
    _task: JoinHandle<()>,
}

impl TestAgent {
    /// Create an agent serving [`fixtures::capture_store`].
    pub async fn new() -> Self {
        Self::with_store(fixtures::capture_store()).await
    }

    /// Create an agent serving a custom store with the fixture community.
    pub async fn with_store(store: OidStore) -> Self {
        crate::common::init_tracing();

        let cancel = CancellationToken::new();
        let store = Arc::new(store);

        let agent = Agent::builder()
            .bind("127.0.0.1")
            .port(0)
            .community(fixtures::COMMUNITY)
            .name("test-switch")
            .store(store.clone())
            .cancel(cancel.clone())
            .build()
            .await
            .expect("failed to build test agent");

        let addr = agent.local_addr();

        let task = tokio::spawn(async move {
            if let Err(e) = agent.run().await {
                eprintln!("TestAgent error: {}", e);
            }
        });

        Self {
            addr,
            store,
            cancel,
            _task: task,
        }
    }

    /// Get the agent's address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the store the agent serves.
    pub fn store(&self) -> &Arc<OidStore> {
        &self.store
    }

    /// Send one datagram and collect `count` replies.
    pub async fn exchange(&self, payload: &[u8], count: usize) -> Vec<CommunityMessage> {
        let socket = self.send(payload).await;
        let mut buf = vec![0u8; 65535];
        let mut replies = Vec::with_capacity(count);

        for _ in 0..count {
            let (len, from) = tokio::time::timeout(REPLY_TIMEOUT, socket.recv_from(&mut buf))
                .await
                .expect("timed out waiting for reply")
                .expect("recv failed");
            assert_eq!(from, self.addr);
            let reply = CommunityMessage::decode(Bytes::copy_from_slice(&buf[..len]))
                .expect("reply does not decode");
            replies.push(reply);
        }

        replies
    }

    /// Send one datagram and return the single reply.
    pub async fn request(&self, payload: &[u8]) -> CommunityMessage {
        self.exchange(payload, 1)
            .await
            .pop()
            .expect("missing reply")
    }

    /// Send one datagram and assert nothing comes back.
    pub async fn expect_silence(&self, payload: &[u8]) {
        let socket = self.send(payload).await;
        let mut buf = vec![0u8; 65535];
        let result = tokio::time::timeout(SILENCE_WINDOW, socket.recv_from(&mut buf)).await;
        assert!(result.is_err(), "unexpected reply from agent");
    }

    async fn send(&self, payload: &[u8]) -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0")
            .await
            .expect("failed to bind client socket");
        socket
            .send_to(payload, self.addr)
            .await
            .expect("failed to send request");
        socket
    }
}

impl Drop for TestAgent {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
