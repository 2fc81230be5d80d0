use std::io;
use std::net::{IpAddr, TcpStream};

/// Source of the addresses of the request being served.
pub trait RequestContext: Send + Sync {
    fn server_address(&self) -> Option<String>;
    fn remote_address(&self) -> Option<String>;
}

/// A fixed server/remote pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAddresses {
    server: String,
    remote: String,
}

impl StaticAddresses {
    pub fn new(server: impl Into<String>, remote: impl Into<String>) -> Self {
        StaticAddresses {
            server: server.into(),
            remote: remote.into(),
        }
    }
}

impl RequestContext for StaticAddresses {
    fn server_address(&self) -> Option<String> {
        Some(self.server.clone())
    }

    fn remote_address(&self) -> Option<String> {
        Some(self.remote.clone())
    }
}

/// Local and peer IP of an accepted connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionAddresses {
    local: IpAddr,
    peer: IpAddr,
}

impl ConnectionAddresses {
    pub fn new(local: IpAddr, peer: IpAddr) -> Self {
        ConnectionAddresses { local, peer }
    }

    pub fn from_stream(stream: &TcpStream) -> io::Result<Self> {
        Ok(ConnectionAddresses {
            local: stream.local_addr()?.ip(),
            peer: stream.peer_addr()?.ip(),
        })
    }
}

impl RequestContext for ConnectionAddresses {
    fn server_address(&self) -> Option<String> {
        Some(self.local.to_string())
    }

    fn remote_address(&self) -> Option<String> {
        Some(self.peer.to_string())
    }
}

/// The bracketed IP segment of a log line.
///
/// Empty when either address is unknown.
pub fn ip_segment(context: &dyn RequestContext) -> String {
    match (context.server_address(), context.remote_address()) {
        (Some(server), Some(remote)) if server == remote => format!(" [{}] ", remote),
        (Some(server), Some(remote)) => format!(" [{}|{}] ", server, remote),
        _ => String::new(),
    }
}
