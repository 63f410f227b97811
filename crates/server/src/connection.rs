//! Per-connection line protocol.
//!
//! Every response, the welcome banner included, is a block of lines
//! terminated by a sentinel line so clients know when to stop reading.
//! LOGIN is handled here rather than in the dispatcher because it is
//! the only command that mutates session state.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::OwnedWriteHalf;
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use recomtree_core::{Role, Session};

use crate::metrics::{ACTIVE_CONNECTIONS, COMMANDS_TOTAL, CONNECTIONS_TOTAL, LOGINS_TOTAL};
use crate::state::ServerState;

/// Marks the end of one response block on the wire.
pub const END_OF_RESPONSE: &str = "<END_OF_RESPONSE>";

const LOGIN_USAGE: &str = "USAGE: LOGIN <username> <password>";

const WELCOME: &[&str] = &[
    "Welcome to RecomTree!",
    "",
    "Please log in:",
    "  - Admin: LOGIN admin admin123",
    "  - User:  LOGIN user user123",
    "",
    "Type HELP to see all available commands",
];

/// Serve one client for the lifetime of its connection.
pub async fn handle_connection(state: Arc<ServerState>, stream: TcpStream, peer: SocketAddr) {
    CONNECTIONS_TOTAL.inc();
    ACTIVE_CONNECTIONS.inc();
    info!(%peer, "client connected");

    let mut session = Session::new(peer);
    if let Err(e) = serve_session(&state, stream, &mut session).await {
        warn!(%peer, error = %e, "connection ended with I/O error");
    }

    ACTIVE_CONNECTIONS.dec();
    let duration = chrono::Utc::now() - session.started_at;
    info!(%peer, duration_secs = duration.num_seconds(), "client disconnected");
}

async fn serve_session(
    state: &ServerState,
    stream: TcpStream,
    session: &mut Session,
) -> std::io::Result<()> {
    let peer = session.peer;
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    send_response(&mut writer, &WELCOME.join("\n")).await?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        debug!(%peer, input, "received");

        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        let keyword = input
            .split_whitespace()
            .next()
            .map(|k| k.to_uppercase());

        let response = if keyword.as_deref() == Some("LOGIN") {
            handle_login(state, session, input).await
        } else {
            if let Some(keyword) = &keyword {
                COMMANDS_TOTAL.with_label_values(&[keyword]).inc();
            }
            state.dispatcher().dispatch(input, session.role)
        };

        send_response(&mut writer, &response).await?;
        debug!(%peer, response_lines = response.lines().count(), "response sent");
    }

    Ok(())
}

async fn handle_login(state: &ServerState, session: &mut Session, input: &str) -> String {
    let args: Vec<&str> = input.split_whitespace().collect();
    if args.len() < 3 {
        return LOGIN_USAGE.to_string();
    }

    match state.authenticator().authenticate(args[1], args[2]).await {
        Ok(identity) => {
            session.role = identity.role;
            let outcome = match identity.role {
                Role::Admin => "admin",
                Role::User => "user",
                Role::Guest => "failed",
            };
            LOGINS_TOTAL.with_label_values(&[outcome]).inc();
            info!(peer = %session.peer, username = %identity.username, role = %identity.role, "login succeeded");
            format!("CONNECTION SUCCESSFUL: You are now {}.", identity.role)
        }
        Err(e) => {
            LOGINS_TOTAL.with_label_values(&["failed"]).inc();
            info!(peer = %session.peer, username = args[1], error = %e, "login failed");
            "ERROR: Invalid credentials.".to_string()
        }
    }
}

/// Write a response as individual lines followed by the sentinel line.
/// A trailing newline in the response text must not produce an extra
/// blank line before the sentinel.
async fn send_response(writer: &mut OwnedWriteHalf, response: &str) -> std::io::Result<()> {
    for line in response.trim_end_matches('\n').split('\n') {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.write_all(END_OF_RESPONSE.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
