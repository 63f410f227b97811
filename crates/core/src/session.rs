//! Per-connection session state. Sessions are created on accept,
//! destroyed on disconnect, and never persisted.

use std::fmt;
use std::net::SocketAddr;

use chrono::{DateTime, Utc};

/// Authorization level of a session.
///
/// Every connection starts as `Guest`; a successful LOGIN escalates to
/// `Admin` or `User` for the remainder of the connection. There is no
/// transition back without reconnecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Guest => "GUEST",
            Role::Admin => "ADMIN",
            Role::User => "USER",
        };
        f.write_str(name)
    }
}

/// State tracked for one client connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub role: Role,
    pub started_at: DateTime<Utc>,
    pub peer: SocketAddr,
}

impl Session {
    pub fn new(peer: SocketAddr) -> Self {
        Self {
            role: Role::Guest,
            started_at: Utc::now(),
            peer,
        }
    }
}
