//! Socket setup shared by the agent and its tests.

use std::io;
use std::net::SocketAddr;

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::UdpSocket;

/// Bind a non-blocking UDP socket for the agent.
///
/// IPv6 addresses are bound dual-stack (`IPV6_V6ONLY = false`), so `[::]`
/// also accepts IPv4 requests. `SO_REUSEADDR` is set to allow quick restarts
/// on a fixed port. The receive buffer request is best effort; the kernel caps
/// it at `net.core.rmem_max`.
pub(crate) async fn bind_udp_socket(
    addr: SocketAddr,
    recv_buffer_size: Option<usize>,
) -> io::Result<UdpSocket> {
    let domain = if addr.is_ipv6() {
        Domain::IPV6
    } else {
        Domain::IPV4
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;

    if let Some(size) = recv_buffer_size
        && let Err(e) = socket.set_recv_buffer_size(size)
    {
        tracing::debug!(target: "snmp_switch::agent", { error = %e, snmp.recv_buffer_size = size }, "receive buffer size not applied");
    }

    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;

    UdpSocket::from_std(socket.into())
}
