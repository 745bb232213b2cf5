//! Configuration options for the ClickDelivery client

use std::path::PathBuf;
use std::time::Duration;

/// Which backend the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Real HTTP calls against the BFF.
    #[default]
    Real,
    /// In-process mock backend with seeded data.
    Mock,
}

/// Configuration options for the ClickDelivery client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Backend selection, decided once at construction
    pub backend_mode: BackendMode,

    /// The request timeout for real HTTP calls
    pub request_timeout: Option<Duration>,

    /// Directory for session and mock-store persistence; `None` keeps
    /// everything in memory
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            backend_mode: BackendMode::Real,
            request_timeout: Some(Duration::from_secs(30)),
            data_dir: None,
        }
    }
}

impl ClientOptions {
    /// Set the backend mode
    pub fn with_backend_mode(mut self, value: BackendMode) -> Self {
        self.backend_mode = value;
        self
    }

    /// Shorthand for selecting the mock backend
    pub fn with_mock_backend(self) -> Self {
        self.with_backend_mode(BackendMode::Mock)
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the persistence directory
    pub fn with_data_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(value.into());
        self
    }
}
