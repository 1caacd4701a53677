//! Network module.
//!
//! Contains the Gateway (TCP listener), the per-socket Connection task and
//! the EventLoop that owns all server state.
//!
//! ```text
//!  Gateway ──accept──▶ Connection (one task per socket)
//!                         │  ▲
//!            Event::Line  │  │  outbound mpsc (sendq)
//!                         ▼  │
//!                      EventLoop ── owns ──▶ Matrix + Registry
//! ```

mod connection;
mod event_loop;
mod gateway;

pub use connection::Connection;
pub use event_loop::{EVENT_QUEUE, Event, EventLoop};
pub use gateway::Gateway;
