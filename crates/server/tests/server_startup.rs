use std::io::Write;
use std::net::TcpListener;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::net::TcpStream;
use tokio::time::{sleep, timeout};

/// Find an available port
fn get_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a minimal valid config
fn minimal_config(port: u16) -> String {
    format!(
        r#"
[auth]
method = "fixed"

[server]
host = "127.0.0.1"
port = {}
"#,
        port
    )
}

/// Spawn the server and return a handle
async fn spawn_server(config_path: &std::path::Path) -> tokio::process::Child {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_recomtree"))
        .env("RECOMTREE_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn server")
}

/// Wait for server to be ready
async fn wait_for_server(port: u16, max_attempts: u32) -> bool {
    for _ in 0..max_attempts {
        if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
            return true;
        }
        sleep(Duration::from_millis(50)).await;
    }
    false
}

#[tokio::test]
async fn test_server_accepts_connections() {
    let port = get_available_port();
    let config_content = minimal_config(port);

    // Write temp config file
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    // Start server
    let mut server = spawn_server(temp_file.path()).await;

    // Wait for server to be ready
    assert!(
        wait_for_server(port, 40).await,
        "Server did not start in time"
    );

    // A fresh connection gets the line protocol, first line of the banner
    use tokio::io::AsyncBufReadExt;
    let stream = TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("Failed to connect");
    let mut lines = tokio::io::BufReader::new(stream).lines();
    let first = timeout(Duration::from_secs(5), lines.next_line())
        .await
        .expect("Timed out waiting for banner")
        .expect("Failed to read banner")
        .expect("Connection closed before banner");
    assert_eq!(first, "Welcome to RecomTree!");

    // Cleanup
    server.kill().await.ok();
}

#[tokio::test]
async fn test_missing_config_file_exits_with_error() {
    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_recomtree"))
            .env("RECOMTREE_CONFIG", "/nonexistent/config.toml")
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_missing_auth_section_exits_with_error() {
    let config_without_auth = r#"
[server]
port = 8080
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config_without_auth.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_recomtree"))
            .env("RECOMTREE_CONFIG", temp_file.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}

#[tokio::test]
async fn test_port_zero_fails_validation() {
    let config = r#"
[auth]
method = "fixed"

[server]
port = 0
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(config.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let result = timeout(
        Duration::from_secs(5),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_recomtree"))
            .env("RECOMTREE_CONFIG", temp_file.path())
            .env("RUST_LOG", "error")
            .output(),
    )
    .await
    .expect("Command timed out")
    .expect("Failed to execute command");

    assert!(!result.status.success());
}
