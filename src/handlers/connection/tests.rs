use crate::handlers::test_support::Harness;

fn welcome_codes(lines: &[String]) -> Vec<&str> {
    lines
        .iter()
        .filter_map(|l| l.split(' ').nth(1))
        .collect()
}

#[test]
fn registration_sends_welcome_burst() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "NICK alice");
    assert!(h.take(id).is_empty());

    h.line(id, "USER alice 0 * :Alice Liddell");
    let lines = h.take(id);
    assert_eq!(welcome_codes(&lines), vec!["001", "002", "003"]);
    assert_eq!(lines[0], ":test.server 001 alice :Welcome to the TestNet, alice");
    assert_eq!(lines[1], ":test.server 002 alice :Your host is test.server");
    assert!(lines[2].starts_with(":test.server 003 alice :This server was created "));

    let session = h.matrix.sessions.get(id).unwrap();
    assert!(session.is_registered());
    assert_eq!(session.user.as_ref().unwrap().realname, "Alice Liddell");
}

#[test]
fn user_before_nick_also_registers() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "USER alice 0 * :Alice");
    assert!(h.take(id).is_empty());
    h.line(id, "NICK alice");
    assert_eq!(welcome_codes(&h.take(id)), vec!["001", "002", "003"]);
}

#[test]
fn wrong_password_is_rejected_and_retry_allowed() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS nope");
    assert_eq!(h.take(id), vec![":test.server 464 * :Password incorrect"]);
    h.line(id, "PASS secret");
    assert!(h.take(id).is_empty());
    assert!(h.matrix.sessions.get(id).unwrap().password_verified());
}

#[test]
fn pass_twice_is_rejected() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "PASS secret");
    assert_eq!(h.take(id), vec![":test.server 462 * :You may not reregister"]);
}

#[test]
fn pass_without_argument() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS");
    assert_eq!(
        h.take(id),
        vec![":test.server 461 * PASS :Not enough parameters"]
    );
}

#[test]
fn nick_and_user_require_password() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "NICK alice");
    h.line(id, "USER alice 0 * :Alice");
    assert_eq!(
        h.take(id),
        vec![
            ":test.server 451 * :Password required",
            ":test.server 451 * :Password required",
        ]
    );
    assert!(h.matrix.nicks.resolve("alice").is_none());
}

#[test]
fn nick_errors() {
    let mut h = Harness::new();
    let _alice = h.register("alice");
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "NICK");
    h.line(id, "NICK 9lives");
    h.line(id, "NICK alice");
    assert_eq!(
        h.take(id),
        vec![
            ":test.server 431 * :No nickname given",
            ":test.server 432 * 9lives :Erroneous nickname",
            ":test.server 433 * alice :Nickname is already in use",
        ]
    );
}

#[test]
fn nick_is_case_sensitive() {
    let mut h = Harness::new();
    h.register("alice");
    let id = h.register("Alice");
    assert!(h.matrix.sessions.get(id).unwrap().is_registered());
}

#[test]
fn nick_change_before_registration_frees_old_name() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "NICK first");
    h.line(id, "NICK second");
    assert!(h.matrix.nicks.resolve("first").is_none());
    assert_eq!(h.matrix.nicks.resolve("second"), Some(id));
}

#[test]
fn nick_change_reaches_self_and_each_peer_once() {
    let mut h = Harness::new();
    let alice = h.register("alice");
    let bob = h.register("bob");
    let carol = h.register("carol");
    h.line(alice, "JOIN #a");
    h.line(alice, "JOIN #b");
    h.line(bob, "JOIN #a");
    h.line(bob, "JOIN #b");
    h.clear();

    h.line(alice, "NICK alicia");
    let expected = ":alice!alice@127.0.0.1 NICK alicia";
    assert_eq!(h.take(alice), vec![expected]);
    assert_eq!(h.take(bob), vec![expected]);
    assert!(h.take(carol).is_empty());
    assert_eq!(h.matrix.nicks.resolve("alicia"), Some(alice));
    assert!(h.matrix.nicks.resolve("alice").is_none());
}

#[test]
fn same_nick_is_a_no_op() {
    let mut h = Harness::new();
    let alice = h.register("alice");
    h.line(alice, "NICK alice");
    assert!(h.take(alice).is_empty());
}

#[test]
fn user_needs_username_and_realname() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "USER alice");
    assert_eq!(
        h.take(id),
        vec![":test.server 461 * USER :Not enough parameters"]
    );
}

#[test]
fn user_twice_is_rejected() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "PASS secret");
    h.line(id, "USER alice 0 * :Alice");
    h.line(id, "USER alice 0 * :Alice");
    assert_eq!(h.take(id), vec![":test.server 462 * :You may not reregister"]);
}

#[test]
fn cap_negotiation() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "CAP LS 302");
    h.line(id, "CAP REQ :multi-prefix");
    h.line(id, "CAP END");
    h.line(id, "CAP");
    assert_eq!(
        h.take(id),
        vec![
            ":test.server CAP * LS :",
            ":test.server CAP * ACK",
            ":test.server 461 * CAP :Not enough parameters",
        ]
    );
}

#[test]
fn ping_answers_with_token() {
    let mut h = Harness::new();
    let alice = h.register("alice");
    h.line(alice, "PING :lag check");
    h.line(alice, "PING");
    h.line(alice, "PONG whatever");
    assert_eq!(
        h.take(alice),
        vec![
            ":test.server PONG test.server :lag check",
            ":test.server 461 alice PING :Not enough parameters",
        ]
    );
}

#[test]
fn quit_notifies_peers_and_frees_nick() {
    let mut h = Harness::new();
    let alice = h.register("alice");
    let bob = h.register("bob");
    h.line(alice, "JOIN #a");
    h.line(bob, "JOIN #a");
    h.clear();

    h.line(bob, "QUIT :gone fishing");
    assert_eq!(h.take(bob), vec!["ERROR :Closing link (gone fishing)"]);
    assert_eq!(h.take(alice), vec![":bob!bob@127.0.0.1 QUIT :gone fishing"]);
    assert!(h.matrix.nicks.resolve("bob").is_none());
    assert!(!h.matrix.sessions.contains(bob));
    assert!(!h.matrix.channels.get("#a").unwrap().is_member(bob));
}

#[test]
fn quit_without_reason_uses_default() {
    let mut h = Harness::new();
    let id = h.connect();
    h.line(id, "QUIT");
    assert_eq!(h.take(id), vec!["ERROR :Closing link (Client quit)"]);
    assert!(h.matrix.sessions.is_empty());
}

#[test]
fn last_member_quit_deletes_channel() {
    let mut h = Harness::new();
    let alice = h.register("alice");
    h.line(alice, "JOIN #room");
    h.line(alice, "MODE #room +k hunter2");
    h.line(alice, "MODE #room +l 5");
    h.line(alice, "TOPIC #room :before");
    h.line(alice, "QUIT");
    assert!(!h.matrix.channels.contains("#room"));

    let bob = h.register("bob");
    h.line(bob, "JOIN #room");
    let lines = h.take(bob);
    assert!(lines.contains(&":test.server 331 bob #room :No topic is set".to_string()));
    assert!(lines.contains(&":test.server 353 bob = #room :@bob".to_string()));
    let channel = h.matrix.channels.get("#room").unwrap();
    assert!(channel.key.is_none());
    assert_eq!(channel.limit, 0);
}
