//! Extension servers and the set of servers available to a window.
use std::fmt;

use serde::{Deserialize, Serialize};

/// An execution host for extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    /// The desktop process on the user's machine.
    Local,
    /// The workspace host (SSH, container, WSL, ...).
    Remote,
    /// A browser web worker.
    Web,
}

impl Server {
    /// All servers in default preference order.
    pub const ALL: [Self; 3] = [Self::Local, Self::Remote, Self::Web];
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
            Self::Web => write!(f, "web"),
        }
    }
}

/// Which servers exist for the current window.
///
/// # Examples
///
/// ```
/// use extension_placement::model::{Server, ServerSet};
///
/// let servers = ServerSet::new(true, true, false);
/// assert!(servers.contains(Server::Remote));
/// assert!(!servers.contains(Server::Web));
/// assert_eq!(servers.iter().collect::<Vec<_>>(), vec![Server::Local, Server::Remote]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ServerSet {
    /// A local extension server exists.
    #[serde(default)]
    pub local: bool,
    /// A remote extension server exists.
    #[serde(default)]
    pub remote: bool,
    /// A web extension server exists.
    #[serde(default)]
    pub web: bool,
    /// Display label of the remote server (e.g. `"SSH: devbox"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_label: Option<String>,
}

impl ServerSet {
    /// Create a server set without labels.
    #[must_use]
    pub const fn new(local: bool, remote: bool, web: bool) -> Self {
        Self {
            local,
            remote,
            web,
            remote_label: None,
        }
    }

    /// Whether `server` exists.
    #[must_use]
    pub const fn contains(&self, server: Server) -> bool {
        match server {
            Server::Local => self.local,
            Server::Remote => self.remote,
            Server::Web => self.web,
        }
    }

    /// Iterate over existing servers in default preference order.
    pub fn iter(&self) -> impl Iterator<Item = Server> + '_ {
        Server::ALL.into_iter().filter(|s| self.contains(*s))
    }

    /// Human-readable label for `server`.
    #[must_use]
    pub fn label(&self, server: Server) -> String {
        match (server, &self.remote_label) {
            (Server::Remote, Some(label)) => label.clone(),
            _ => server.to_string(),
        }
    }
}
