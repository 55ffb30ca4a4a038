//! Shared utilities for end-to-end tests.

use std::net::SocketAddr;
use std::sync::Arc;

use address_service::config::{Environment, ServiceConfig};
use address_service::{AddressStore, HttpServer, Shutdown};
use tokio::net::TcpListener;

pub const TOKEN: &str = "e2e-secret-token";

/// A running service bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<AddressStore>,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn record_count(&self) -> usize {
        self.store.len().unwrap()
    }

    pub fn ids(&self) -> Vec<String> {
        self.store.list().unwrap().into_iter().map(|r| r.id).collect()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn test_config(environment: Environment) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.environment = environment;
    config.auth.api_token = TOKEN.to_string();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config
}

/// Start the service with the seeded store.
pub async fn start_server(environment: Environment) -> TestServer {
    start_server_with(test_config(environment)).await
}

pub async fn start_server_with(config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config);
    let store = server.store();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap();

    TestServer {
        addr,
        store,
        client,
        shutdown,
    }
}
