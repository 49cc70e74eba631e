//! Common test utilities for client integration tests.

use savings_api::{Server, ServerConfig};
use savings_client::SavingsClient;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A live server on an ephemeral port, stopped on drop.
pub struct TestServer {
    /// Client pointed at the server.
    pub client: SavingsClient,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Server with the demo projects.
    pub async fn seeded() -> Self {
        Self::start(true).await
    }

    /// Server with no projects.
    pub async fn empty() -> Self {
        Self::start(false).await
    }

    async fn start(seed_demo_projects: bool) -> Self {
        let server = Server::new(ServerConfig {
            port: 0,
            seed_demo_projects,
            ..Default::default()
        })
        .expect("server");
        let listener = server.bind().await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            server.serve(listener, shutdown).await.expect("serve");
        });

        let client = SavingsClient::new(&format!("http://{addr}")).expect("client");
        Self {
            client,
            shutdown: Some(tx),
            handle: Some(handle),
        }
    }

    /// Stop the server and wait for it to exit.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.expect("server task");
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
