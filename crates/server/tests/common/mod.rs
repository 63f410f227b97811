//! Common test utilities: spawn the built server binary with a temp
//! config and drive it over a real `TcpStream` with the line protocol.

use std::net::TcpListener;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

pub const END_OF_RESPONSE: &str = "<END_OF_RESPONSE>";

const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Find an available port
pub fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// A spawned server process with its own temp directory for the config
/// and catalog snapshot. The process is killed when the struct drops.
pub struct TestServer {
    pub port: u16,
    pub snapshot_path: PathBuf,
    _temp_dir: TempDir,
    _child: tokio::process::Child,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self::start_in(temp_dir).await
    }

    /// Start the server with config and snapshot inside `temp_dir`.
    /// Useful when a test wants to seed the snapshot file up front.
    pub async fn start_in(temp_dir: TempDir) -> Self {
        let port = get_available_port();
        let snapshot_path = temp_dir.path().join("catalog_data.json");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!(
                r#"
[auth]
method = "fixed"

[server]
host = "127.0.0.1"
port = {port}

[persistence]
path = "{}"
"#,
                snapshot_path.display()
            ),
        )
        .expect("Failed to write config");

        let child = tokio::process::Command::new(env!("CARGO_BIN_EXE_recomtree"))
            .env("RECOMTREE_CONFIG", &config_path)
            .env("RUST_LOG", "error") // Quiet logs during tests
            .kill_on_drop(true)
            .spawn()
            .expect("Failed to spawn server");

        assert!(
            wait_for_server(port, 100).await,
            "Server did not start in time"
        );

        Self {
            port,
            snapshot_path,
            _temp_dir: temp_dir,
            _child: child,
        }
    }

    /// Open a new client connection and consume the welcome banner.
    pub async fn connect(&self) -> LineClient {
        let mut client = LineClient::connect(self.port).await;
        client.read_response().await;
        client
    }

    /// Open a new client connection without reading the welcome banner.
    pub async fn connect_raw(&self) -> LineClient {
        LineClient::connect(self.port).await
    }
}

/// Wait for the server to accept connections
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    for _ in 0..max_attempts {
        if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

/// Line-protocol client: sends one line, reads until the sentinel.
pub struct LineClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl LineClient {
    pub async fn connect(port: u16) -> Self {
        let stream = TcpStream::connect(("127.0.0.1", port))
            .await
            .expect("Failed to connect");
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.write_all(b"\n").await.unwrap();
        self.writer.flush().await.unwrap();
    }

    /// Read lines until the sentinel. The sentinel itself is dropped.
    pub async fn read_response(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let n = timeout(READ_TIMEOUT, self.reader.read_line(&mut line))
                .await
                .expect("Timed out waiting for response")
                .expect("Failed to read line");
            assert!(n > 0, "Connection closed before end of response");
            let line = line.trim_end_matches(['\r', '\n']).to_string();
            if line == END_OF_RESPONSE {
                break;
            }
            lines.push(line);
        }
        lines
    }

    /// Send one command and return its response joined back into text.
    pub async fn request(&mut self, line: &str) -> String {
        self.send(line).await;
        self.read_response().await.join("\n")
    }

    pub async fn login(&mut self, username: &str, password: &str) -> String {
        self.request(&format!("LOGIN {username} {password}")).await
    }

    /// Assert the server has closed its side of the connection.
    pub async fn expect_closed(&mut self) {
        let mut line = String::new();
        let n = timeout(READ_TIMEOUT, self.reader.read_line(&mut line))
            .await
            .expect("Timed out waiting for close")
            .expect("Failed to read line");
        assert_eq!(n, 0, "Expected server to close the connection, got: {line:?}");
    }
}
