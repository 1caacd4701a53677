//! State management module.
//!
//! Contains the Matrix (server state) and the registries it owns.

mod channel;
mod matrix;
mod mode;
mod nicks;
mod outbox;
mod registry;
mod session;
mod uid;

pub use channel::{Channel, ChannelRegistry, is_valid_channel_name};
pub use matrix::{Matrix, ServerInfo};
pub use mode::ModeChange;
pub use nicks::{ClaimError, NickIndex, is_valid_nick};
pub use outbox::Outbox;
pub use registry::ConnectionRegistry;
pub use session::{RegistrationPhase, Session, UserInfo};
pub use uid::SessionId;
