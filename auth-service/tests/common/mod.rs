use std::sync::Arc;

use auth_service::domain::auth::models::CreateUserCommand;
use auth_service::domain::auth::models::Username;
use auth_service::domain::auth::ports::AuthServicePort;
use auth_service::domain::auth::service::AuthService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::metrics::NoOpMetrics;
use auth_service::outbound::stores::InMemoryUserStore;
use authkit::TokenCodec;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub token_codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let auth_service: Arc<dyn AuthServicePort> =
            Arc::new(AuthService::new(store, Arc::new(NoOpMetrics), TEST_SECRET));

        // Every test starts with one known account
        auth_service
            .create_user(CreateUserCommand::new(
                Username::new("admin".to_string()).expect("Failed to build seed username"),
                "admin123".to_string(),
            ))
            .await
            .expect("Failed to seed test user");

        let router = create_router(Arc::clone(&auth_service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            auth_service,
            token_codec: TokenCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }
}
