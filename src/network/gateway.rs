//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listening socket and spawns a Connection task for
//! each incoming client.

use super::connection::Connection;
use super::event_loop::Event;
use crate::config::LimitsConfig;
use anyhow::Context as _;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    events: mpsc::Sender<Event>,
    limits: LimitsConfig,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(
        addr: SocketAddr,
        events: mpsc::Sender<Event>,
        limits: LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            events,
            limits,
        })
    }

    /// The bound address (useful when binding port 0).
    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!(%addr, "Connection accepted");
                    let events = self.events.clone();
                    let limits = self.limits.clone();

                    tokio::spawn(async move {
                        let connection =
                            match Connection::register(stream, addr, events, &limits).await {
                                Ok(connection) => connection,
                                Err(e) => {
                                    warn!(%addr, error = %e, "Connection registration failed");
                                    return;
                                }
                            };
                        let id = connection.id();
                        if let Err(e) = connection.run().await {
                            error!(%id, %addr, error = %e, "Connection error");
                        }
                        info!(%id, %addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
