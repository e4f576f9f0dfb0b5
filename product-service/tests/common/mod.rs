use product_service::config::{MongoConfig, ProductConfig, ServerConfig};
use product_service::services::{InMemoryProductStore, ProductStore};
use product_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub store: Arc<dyn ProductStore>,
}

impl TestApp {
    /// Spawn the full HTTP stack on a random port, backed by an in-memory
    /// store so no MongoDB instance is required.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(InMemoryProductStore::new())).await
    }

    /// Spawn against an explicit store, for tests that need a different
    /// double.
    pub async fn spawn_with_store(store: Arc<dyn ProductStore>) -> Self {
        let config = ProductConfig {
            server: ServerConfig { port: 0 },
            mongodb: MongoConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database: "product_test".to_string(),
            },
        };

        let app = Application::build_with_store(config, store)
            .await
            .expect("Failed to build test application");

        let store = app.store();
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp { address, store }
    }
}
