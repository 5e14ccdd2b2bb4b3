use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// Default upload ceiling: 20 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// JWT secret. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks after the listener stops.
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
    pub payment: PaymentConfig,
}

/// Where uploaded objects live and how they are addressed publicly.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Filesystem root; each bucket is a subdirectory.
    pub root: PathBuf,
    /// URL prefix under which `root` is served, e.g. `/storage`.
    pub public_prefix: String,
    pub max_upload_bytes: usize,
}

/// Hosted-checkout gateway settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub gateway_url: String,
    /// Shared secret: bearer token for API calls and HMAC key for webhooks.
    pub gateway_secret: String,
    /// Where the gateway sends the learner after checkout.
    pub callback_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                      |
    /// |--------------------------|------------------------------|
    /// | `HOST`                   | `0.0.0.0`                    |
    /// | `PORT`                   | `3000`                       |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`      |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                         |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `30`                         |
    /// | `STORAGE_ROOT`           | `storage`                    |
    /// | `PUBLIC_STORAGE_PREFIX`  | `/storage`                   |
    /// | `MAX_UPLOAD_BYTES`       | `20971520`                   |
    /// | `PAYMENT_GATEWAY_URL`    | `https://api.paystack.co`    |
    /// | `PAYMENT_GATEWAY_SECRET` | empty (webhooks rejected)    |
    /// | `PAYMENT_CALLBACK_URL`   | unset                        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            storage: StorageConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let root = std::env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into());
        let public_prefix = std::env::var("PUBLIC_STORAGE_PREFIX")
            .unwrap_or_else(|_| "/storage".into())
            .trim_end_matches('/')
            .to_string();
        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            root: PathBuf::from(root),
            public_prefix,
            max_upload_bytes,
        }
    }
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        let gateway_url = std::env::var("PAYMENT_GATEWAY_URL")
            .unwrap_or_else(|_| "https://api.paystack.co".into())
            .trim_end_matches('/')
            .to_string();
        let gateway_secret = std::env::var("PAYMENT_GATEWAY_SECRET").unwrap_or_default();
        if gateway_secret.is_empty() {
            tracing::warn!("PAYMENT_GATEWAY_SECRET is not set; payment webhooks will be rejected");
        }
        let callback_url = std::env::var("PAYMENT_CALLBACK_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            gateway_url,
            gateway_secret,
            callback_url,
        }
    }
}
