//! ircserv - single-process IRC-style chat server.
//!
//! One event-loop task owns all server state (the [`state::Matrix`]);
//! per-connection tasks frame lines and forward them to it. See
//! [`network`] for the task layout and [`handlers`] for command dispatch.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
