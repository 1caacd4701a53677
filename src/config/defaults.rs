//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::{Ipv4Addr, SocketAddr};

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_server_name() -> String {
    "localhost".to_string()
}

pub fn default_network_name() -> String {
    "IRC Network".to_string()
}

// =============================================================================
// Listener Defaults
// =============================================================================

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 6667))
}

// =============================================================================
// Limit Defaults
// =============================================================================

pub fn default_channel_len() -> usize {
    50
}

pub fn default_nick_len() -> usize {
    30
}

pub fn default_line_len() -> usize {
    512
}

pub fn default_sendq() -> usize {
    256
}
