//! Integration tests for PRIVMSG and MSG routing.

mod common;

use common::{TestClient, TestServer};
use ircserv_proto::Response;

#[tokio::test]
async fn test_direct_message() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = TestClient::registered(&server.address(), "alice").await.unwrap();
    let mut bob = TestClient::registered(&server.address(), "bob").await.unwrap();

    alice.privmsg("bob", "hi bob, got a minute?").await.unwrap();
    assert_eq!(
        bob.recv().await.unwrap().to_string(),
        ":alice!alice@127.0.0.1 PRIVMSG bob :hi bob, got a minute?"
    );
    assert_eq!(
        alice.recv().await.unwrap().to_string(),
        ":test.server 341 alice bob :hi bob, got a minute?"
    );
}

#[tokio::test]
async fn test_routing_errors() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = TestClient::registered(&server.address(), "alice").await.unwrap();

    alice.send_raw("PRIVMSG nobody :hello").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap().response(),
        Some(Response::ERR_NOSUCHNICK)
    );
    alice.send_raw("PRIVMSG #void :hello").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap().response(),
        Some(Response::ERR_NOSUCHCHANNEL)
    );
    alice.send_raw("PRIVMSG alice").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap().to_string(),
        ":test.server 411 alice :No recipient given (PRIVMSG)"
    );
}

#[tokio::test]
async fn test_msg_to_channel() {
    let server = TestServer::spawn().await.unwrap();
    let mut alice = TestClient::registered(&server.address(), "alice").await.unwrap();
    let mut bob = TestClient::registered(&server.address(), "bob").await.unwrap();
    alice.join("#room").await.unwrap();
    bob.join("#room").await.unwrap();
    alice.drain().await;

    bob.send_raw("MSG #room status update").await.unwrap();
    assert_eq!(
        alice.recv().await.unwrap().to_string(),
        ":bob!bob@127.0.0.1 PRIVMSG #room :status update"
    );
    bob.expect_silence().await;
}
