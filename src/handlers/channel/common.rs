//! Replies shared by channel handlers.

use crate::state::{Matrix, SessionId};
use ircserv_proto::Response;

/// Send 332 with the topic, or 331 when none is set.
pub(super) fn send_topic(matrix: &mut Matrix, id: SessionId, channel: &str) {
    let Some(topic) = matrix.channels.get(channel).map(|c| c.topic.clone()) else {
        return;
    };
    if topic.is_empty() {
        matrix.send_numeric(
            id,
            Response::RPL_NOTOPIC,
            vec![channel.to_string(), "No topic is set".to_string()],
        );
    } else {
        matrix.send_numeric(id, Response::RPL_TOPIC, vec![channel.to_string(), topic]);
    }
}

/// Send the roster (353 lines then one 366) to every member of `channel`.
///
/// Entries are packed into as few 353 lines as fit in `limits.line_len`
/// once the recipient's prefix and terminator are counted.
pub(super) fn broadcast_names(matrix: &mut Matrix, channel: &str) {
    let Some(names) = matrix.names(channel) else {
        return;
    };
    let members: Vec<SessionId> = matrix
        .channels
        .get(channel)
        .map(|c| c.members().collect())
        .unwrap_or_default();

    for member in members {
        // ":<server> 353 <nick> = <channel> :" plus CRLF
        let overhead = matrix.server_info.name.len()
            + matrix.nick_of(member).len()
            + channel.len()
            + 13;
        let budget = matrix.limits.line_len.saturating_sub(overhead);

        for chunk in pack_names(&names, budget) {
            matrix.send_numeric(
                member,
                Response::RPL_NAMREPLY,
                vec!["=".to_string(), channel.to_string(), chunk],
            );
        }
        matrix.send_numeric(
            member,
            Response::RPL_ENDOFNAMES,
            vec![channel.to_string(), "End of /NAMES list".to_string()],
        );
    }
}

/// Join `names` with spaces into chunks of at most `budget` bytes.
///
/// An entry longer than `budget` on its own still gets a chunk.
fn pack_names(names: &[String], budget: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for name in names {
        if !current.is_empty() && current.len() + 1 + name.len() > budget {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(name);
    }
    if !current.is_empty() || chunks.is_empty() {
        chunks.push(current);
    }
    chunks
}
