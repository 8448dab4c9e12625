//! UDP agent serving an [`OidStore`] over SNMP v1/v2c.
//!
//! # Example
//!
//! ```rust,no_run
//! use snmp_switch::agent::Agent;
//! use snmp_switch::switch::SwitchBuilder;
//!
//! # async fn example() -> snmp_switch::Result<()> {
//! let store = SwitchBuilder::new()
//!     .name("lab-switch")
//!     .port("GigabitEthernet0/1", "PS-T001-010.0")
//!     .build();
//!
//! let agent = Agent::builder()
//!     .bind("127.0.0.1")
//!     .port(10161)
//!     .community("public")
//!     .name("lab-switch")
//!     .store(store)
//!     .build()
//!     .await?;
//!
//! agent.run().await
//! # }
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::error::{Error, Result};
use crate::handler::Dispatcher;
use crate::store::OidStore;
use crate::switch::DEFAULT_NAME;
use crate::util::bind_udp_socket;

/// Standard SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Largest datagram the agent reads.
const MAX_DATAGRAM_SIZE: usize = 65535;

/// Builder for [`Agent`].
pub struct AgentBuilder {
    bind_addr: String,
    port: u16,
    community: Option<Bytes>,
    name: String,
    store: Option<Arc<OidStore>>,
    max_concurrent_requests: Option<usize>,
    recv_buffer_size: Option<usize>,
    cancel: Option<CancellationToken>,
}

impl AgentBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - Bind address: `0.0.0.0`, port 161 (UDP)
    /// - Name: "Untitled Switch"
    /// - Max concurrent requests: 1000
    /// - Receive buffer size: 4MB (requested from kernel)
    /// - Empty store
    ///
    /// A community must be configured before [`build`](Self::build).
    pub fn new() -> Self {
        Self {
            bind_addr: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
            community: None,
            name: DEFAULT_NAME.to_string(),
            store: None,
            max_concurrent_requests: Some(1000),
            recv_buffer_size: Some(4 * 1024 * 1024), // 4MB
            cancel: None,
        }
    }

    /// Set the IP address to bind, e.g. `"127.0.0.1"` or `"::"`.
    ///
    /// An IPv6 address binds dual-stack.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set the UDP port. Port 0 picks an ephemeral port, see
    /// [`Agent::local_addr`].
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the community requests must carry. Matching is exact.
    pub fn community(mut self, community: impl Into<Bytes>) -> Self {
        self.community = Some(community.into());
        self
    }

    /// Set the display name used in log output.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the store requests are served from.
    pub fn store(mut self, store: impl Into<Arc<OidStore>>) -> Self {
        self.store = Some(store.into());
        self
    }

    /// Set the maximum number of datagrams processed at once.
    ///
    /// `None` removes the limit.
    pub fn max_concurrent_requests(mut self, limit: Option<usize>) -> Self {
        self.max_concurrent_requests = limit;
        self
    }

    /// Set the UDP socket receive buffer size.
    ///
    /// The kernel may cap this at `net.core.rmem_max`. Set to `None` to use
    /// the kernel default.
    pub fn recv_buffer_size(mut self, size: Option<usize>) -> Self {
        self.recv_buffer_size = size;
        self
    }

    /// Set a cancellation token that stops [`Agent::run`].
    ///
    /// If not set, the agent creates its own token accessible via
    /// [`Agent::cancel`].
    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Bind the socket and build the agent.
    pub async fn build(self) -> Result<Agent> {
        let ip: IpAddr = self.bind_addr.parse().map_err(|_| {
            Error::Config(format!("invalid bind address: {}", self.bind_addr).into())
        })?;
        let community = self
            .community
            .ok_or_else(|| Error::Config("no community configured".into()))?;
        let bind_addr = SocketAddr::new(ip, self.port);

        let socket = bind_udp_socket(bind_addr, self.recv_buffer_size)
            .await
            .map_err(|e| Error::io(bind_addr, e))?;
        let local_addr = socket.local_addr().map_err(|e| Error::io(bind_addr, e))?;

        let store = self.store.unwrap_or_default();
        let dispatcher = Dispatcher::new(store, community);

        tracing::info!(
            target: "snmp_switch::agent",
            "{} (SNMP): Registered on {} udp/{} with community {}",
            self.name,
            local_addr.ip(),
            local_addr.port(),
            String::from_utf8_lossy(dispatcher.community()),
        );

        Ok(Agent {
            inner: Arc::new(AgentInner {
                socket,
                local_addr,
                name: self.name,
                dispatcher,
                concurrency_limit: self
                    .max_concurrent_requests
                    .map(|n| Arc::new(Semaphore::new(n))),
                cancel: self.cancel.unwrap_or_default(),
            }),
        })
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct AgentInner {
    socket: UdpSocket,
    local_addr: SocketAddr,
    name: String,
    dispatcher: Dispatcher,
    concurrency_limit: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
}

/// SNMP agent bound to a UDP socket.
///
/// Cloning is cheap; clones share the socket, store and cancellation token.
#[derive(Clone)]
pub struct Agent {
    inner: Arc<AgentInner>,
}

impl Agent {
    /// Create a builder for configuring the agent.
    pub fn builder() -> AgentBuilder {
        AgentBuilder::new()
    }

    /// Get the local address the agent is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.inner.local_addr
    }

    /// Display name of the emulated device.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The store requests are served from.
    pub fn store(&self) -> &Arc<OidStore> {
        self.inner.dispatcher.store()
    }

    /// Get the cancellation token for this agent.
    ///
    /// Call `token.cancel()` to initiate graceful shutdown.
    pub fn cancel(&self) -> CancellationToken {
        self.inner.cancel.clone()
    }

    /// Run the agent until the cancellation token is triggered.
    ///
    /// Each datagram is handled in its own task, up to the configured
    /// `max_concurrent_requests`. Replies go back to the datagram's source in
    /// message order.
    #[instrument(skip(self), err, fields(snmp.local_addr = %self.local_addr(), snmp.name = %self.name()))]
    pub async fn run(&self) -> Result<()> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            let (len, source) = tokio::select! {
                result = self.inner.socket.recv_from(&mut buf) => {
                    result.map_err(|e| Error::io(self.inner.local_addr, e))?
                }
                _ = self.inner.cancel.cancelled() => {
                    tracing::info!(target: "snmp_switch::agent", "agent shutdown requested");
                    return Ok(());
                }
            };

            let data = Bytes::copy_from_slice(&buf[..len]);
            let agent = self.clone();

            let permit = match &self.inner.concurrency_limit {
                Some(sem) => tokio::select! {
                    permit = sem.clone().acquire_owned() => permit.ok(),
                    _ = self.inner.cancel.cancelled() => {
                        tracing::info!(target: "snmp_switch::agent", "agent shutdown requested");
                        return Ok(());
                    }
                },
                None => None,
            };

            tokio::spawn(async move {
                agent.handle_datagram(data, source).await;
                drop(permit);
            });
        }
    }

    async fn handle_datagram(&self, data: Bytes, source: SocketAddr) {
        tracing::trace!(target: "snmp_switch::agent", { snmp.source = %source, snmp.bytes = data.len() }, "datagram received");

        for reply in self.inner.dispatcher.handle_payload(data, source) {
            if let Err(e) = self.inner.socket.send_to(&reply, source).await {
                tracing::warn!(target: "snmp_switch::agent", { snmp.source = %source, error = %e }, "failed to send response");
                return;
            }
        }
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.inner.name)
            .field("local_addr", &self.inner.local_addr)
            .finish_non_exhaustive()
    }
}
