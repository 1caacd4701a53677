//! Channel command handlers.
//!
//! Handles JOIN, PART, KICK, TOPIC and INVITE.

mod common;
mod invite;
mod join;
mod kick;
mod part;
mod topic;

pub use invite::InviteHandler;
pub use join::JoinHandler;
pub use kick::KickHandler;
pub use part::PartHandler;
pub use topic::TopicHandler;
