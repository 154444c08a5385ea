use pos_sync_service::config::{Config, PirposConfig, ServerConfig};
use pos_sync_service::Application;
use secrecy::Secret;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "token-123";

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the service on a random port against the given POS stand-in.
    ///
    /// With credentials the application performs the login exchange during
    /// build, so mount a login mock (see [`mount_login`]) first.
    pub async fn spawn(pos_base_url: &str, with_credentials: bool) -> Self {
        let (username, password) = if with_credentials {
            ("pos@example.com".to_string(), "secret".to_string())
        } else {
            (String::new(), String::new())
        };

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            pirpos: PirposConfig {
                api_base_url: pos_base_url.to_string(),
                username,
                password: Secret::new(password),
            },
            service_name: "pos-sync-service-test".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp { address, port }
    }
}

/// Mount the POS login endpoint answering with the test token.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "tokenCurrent": TEST_TOKEN })),
        )
        .mount(server)
        .await;
}

/// A minimal POS client record as the search endpoint returns it.
pub fn client_record(id: &str, name: &str, document: i64) -> Value {
    json!({
        "_id": id,
        "name": name,
        "document": document,
        "idDocumentType": 13,
        "email": "julian@example.com",
    })
}
