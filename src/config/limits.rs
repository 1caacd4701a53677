//! Protocol and queue limits configuration.

use super::defaults::{default_channel_len, default_line_len, default_nick_len, default_sendq};
use serde::Deserialize;

/// Protocol and queue limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum channel name length in characters, `#` included (default: 50).
    #[serde(default = "default_channel_len")]
    pub channel_len: usize,
    /// Maximum nickname length in characters (default: 30).
    #[serde(default = "default_nick_len")]
    pub nick_len: usize,
    /// Maximum inbound line length in bytes, terminator included (default: 512).
    /// Longer lines close the connection.
    #[serde(default = "default_line_len")]
    pub line_len: usize,
    /// Outbound queue capacity per connection, in lines (default: 256).
    /// A client that lets its queue fill up is disconnected.
    #[serde(default = "default_sendq")]
    pub sendq: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            channel_len: default_channel_len(),
            nick_len: default_nick_len(),
            line_len: default_line_len(),
            sendq: default_sendq(),
        }
    }
}
