//! Proxy end points and connection details

use std::fmt;

/// A host and port pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndPoint {
    pub host: String,
    pub port: u16,
}

impl EndPoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for EndPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// One proxied connection as seen by a filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionDetails {
    pub local: EndPoint,
    pub remote: EndPoint,
    pub secure: bool,
}

impl ConnectionDetails {
    pub fn new(local: EndPoint, remote: EndPoint, secure: bool) -> Self {
        Self {
            local,
            remote,
            secure,
        }
    }
}

impl fmt::Display for ConnectionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.local, self.remote)?;
        if self.secure {
            write!(f, " (secure)")?;
        }
        Ok(())
    }
}
