//! Server assembly: the gateway plus the event loop.

use crate::config::Config;
use crate::network::{EventLoop, Gateway};
use std::net::SocketAddr;
use tracing::info;

/// A bound, not yet running server.
pub struct Server {
    gateway: Gateway,
    event_loop: EventLoop,
}

impl Server {
    /// Validate `config` and bind the listener.
    pub async fn bind(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let (event_loop, events) = EventLoop::new(&config);
        let gateway = Gateway::bind(config.listen.address, events, config.limits.clone()).await?;
        Ok(Self {
            gateway,
            event_loop,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        self.gateway.local_addr()
    }

    /// Serve until the listener fails or the event loop stops.
    pub async fn run(self) -> anyhow::Result<()> {
        let event_loop = tokio::spawn(self.event_loop.run());
        tokio::select! {
            res = self.gateway.run() => res,
            res = event_loop => {
                res?;
                info!("Event loop exited");
                Ok(())
            }
        }
    }
}
