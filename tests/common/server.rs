//! Test server management.
//!
//! Runs an in-process ircserv bound to an ephemeral port.

use ircserv::{Config, Server};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Connection password every test server uses.
pub const PASSWORD: &str = "secret";

/// A test server instance. Aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a server with the test defaults.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn a server after letting `tweak` adjust the configuration.
    pub async fn spawn_with(tweak: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.server.name = "test.server".into();
        config.server.network = "TestNet".into();
        config.server.password = PASSWORD.into();
        config.listen.address = "127.0.0.1:0".parse()?;
        tweak(&mut config);

        let server = Server::bind(config).await?;
        let addr = server.local_addr()?;
        let handle = tokio::spawn(server.run());
        Ok(Self { addr, handle })
    }

    /// Address clients should connect to.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
