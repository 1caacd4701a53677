//! Test client.
//!
//! Provides a line-based client for integration testing that can send
//! commands and assert on received responses.

use super::server::PASSWORD;
use ircserv_proto::{Command, Message, Response};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    nick: String,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str, nick: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            nick: nick.to_string(),
        })
    }

    /// Connect and complete registration.
    pub async fn registered(address: &str, nick: &str) -> anyhow::Result<Self> {
        let mut client = Self::connect(address, nick).await?;
        client.register().await?;
        Ok(client)
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Send a raw line; the terminator is appended when missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\r\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single message from the server.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a message with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<Message> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        if n == 0 {
            anyhow::bail!("connection closed by server");
        }
        line.trim_end()
            .parse::<Message>()
            .map_err(|e| anyhow::anyhow!("Parse error: {}", e))
    }

    /// Receive messages until the predicate matches; returns all of them.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<Message>>
    where
        F: FnMut(&Message) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                break;
            }
        }
        Ok(messages)
    }

    /// Receive until a numeric `response` arrives and return it.
    pub async fn expect_numeric(&mut self, response: Response) -> anyhow::Result<Message> {
        let mut messages = self
            .recv_until(|msg| msg.response() == Some(response))
            .await?;
        messages
            .pop()
            .ok_or_else(|| anyhow::anyhow!("no {} received", response))
    }

    /// Discard whatever arrives within a short quiet period.
    pub async fn drain(&mut self) {
        while self.recv_timeout(Duration::from_millis(100)).await.is_ok() {}
    }

    /// Assert that nothing arrives within a short quiet period.
    pub async fn expect_silence(&mut self) {
        if let Ok(msg) = self.recv_timeout(Duration::from_millis(200)).await {
            panic!("{} expected silence, got {}", self.nick, msg);
        }
    }

    /// Register with the server (PASS + NICK + USER) and consume the
    /// welcome burst.
    pub async fn register(&mut self) -> anyhow::Result<()> {
        self.send_raw(&format!("PASS {}", PASSWORD)).await?;
        self.send_raw(&format!("NICK {}", self.nick)).await?;
        self.send_raw(&format!("USER {} 0 * :Test User {}", self.nick, self.nick))
            .await?;

        let messages = self
            .recv_until(|msg| msg.response() == Some(Response::RPL_CREATED))
            .await?;
        if messages
            .iter()
            .any(|msg| msg.response() == Some(Response::RPL_WELCOME))
        {
            Ok(())
        } else {
            anyhow::bail!("Registration failed: no RPL_WELCOME received")
        }
    }

    /// Join a channel and wait for the end of its roster.
    pub async fn join(&mut self, channel: &str) -> anyhow::Result<Vec<Message>> {
        self.send_raw(&format!("JOIN {}", channel)).await?;
        self.recv_until(|msg| msg.response() == Some(Response::RPL_ENDOFNAMES))
            .await
    }

    /// Send a PRIVMSG.
    pub async fn privmsg(&mut self, target: &str, text: &str) -> anyhow::Result<()> {
        let msg = Message::from(Command::PRIVMSG(target.to_string(), text.to_string()));
        self.send_raw(&msg.to_string()).await
    }

    /// Send QUIT.
    pub async fn quit(&mut self, reason: Option<String>) -> anyhow::Result<()> {
        let msg = Message::from(Command::QUIT(reason));
        self.send_raw(&msg.to_string()).await
    }
}

/// Parameters of a numeric reply, nick included.
#[allow(dead_code)]
pub fn numeric_args(msg: &Message) -> &[String] {
    match &msg.command {
        Command::Response(_, args) => args,
        _ => &[],
    }
}
