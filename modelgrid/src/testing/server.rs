//! Test server utilities using axum-test
//!
//! A thin wrapper around `axum-test::TestServer` so suites talk to the
//! admin surface the way a browser would, without binding a port per
//! assertion helper.

use axum::Router;

/// Test server wrapper for integration testing
///
/// # Example
///
/// ```rust,no_run
/// use modelgrid::testing::TestServer;
/// use axum::{routing::get, Router};
///
/// # async fn example() -> anyhow::Result<()> {
/// let app = Router::new().route("/", get(|| async { "Hello" }));
/// let server = TestServer::new(app)?;
///
/// let response = server.get("/").await;
/// response.assert_status_ok();
/// # Ok(())
/// # }
/// ```
pub struct TestServer {
    inner: axum_test::TestServer,
}

impl TestServer {
    /// Create a new test server from an axum router
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be started
    pub fn new(app: Router) -> anyhow::Result<Self> {
        let inner = axum_test::TestServer::new(app)?;
        Ok(Self { inner })
    }

    /// Make a GET request to the server
    pub fn get(&self, path: &str) -> axum_test::TestRequest {
        self.inner.get(path)
    }

    /// Make a POST request to the server
    pub fn post(&self, path: &str) -> axum_test::TestRequest {
        self.inner.post(path)
    }

    /// Make a PUT request to the server
    pub fn put(&self, path: &str) -> axum_test::TestRequest {
        self.inner.put(path)
    }

    /// Make a DELETE request to the server
    pub fn delete(&self, path: &str) -> axum_test::TestRequest {
        self.inner.delete(path)
    }

    /// Get the inner `axum_test::TestServer` for advanced usage
    #[must_use]
    pub fn inner(&self) -> &axum_test::TestServer {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[tokio::test]
    async fn test_server_round_trip() {
        let app = Router::new().route("/", get(|| async { "pong" }));
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "pong");
    }
}
