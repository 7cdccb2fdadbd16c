// Mock Duitku Gateway
//
// Spins up a local wiremock server standing in for the Duitku merchant API
// and builds a client pointed at it.

pub use duitku::gateway::services::{INQUIRY_PATH, PAYMENT_METHODS_PATH, TRANSACTION_STATUS_PATH};
use duitku::{DuitkuClient, Environment};
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_MERCHANT_CODE: &str = "D1234";
pub const TEST_MERCHANT_KEY: &str = "test_merchant_key";

/// Local stand-in for the gateway
pub struct MockGateway {
    pub server: MockServer,
}

impl MockGateway {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Client with test credentials whose base URL is the mock server
    pub fn client(&self) -> DuitkuClient {
        DuitkuClient::new(TEST_MERCHANT_KEY, TEST_MERCHANT_CODE, Environment::Sandbox)
            .with_base_url(self.server.uri())
    }

    /// Respond to POSTs on `endpoint` whose body contains `expected`
    ///
    /// The mock must be hit exactly once.
    pub async fn expect_post(&self, endpoint: &str, expected: Value, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(body_partial_json(expected))
            .respond_with(response)
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the test if any request reaches the gateway
    pub async fn expect_no_requests(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}

/// A base URL nothing is listening on
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
