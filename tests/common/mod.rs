//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use spa_shell::app::Document;
use spa_shell::{Bootstrapper, ShellConfig, ShellServer, Shutdown};

/// Bootstrap the shell with `config` and serve it on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_shell(config: ShellConfig) -> (SocketAddr, Shutdown) {
    spawn_shell_with_document(config, Document::builtin()).await
}

pub async fn spawn_shell_with_document(config: ShellConfig, document: Document) -> (SocketAddr, Shutdown) {
    let root = Bootstrapper::new(config.clone()).run(document).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = ShellServer::new(root, config.server);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// Client that never reuses connections or goes through a proxy.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
