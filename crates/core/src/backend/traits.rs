use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::upload::UploadOutcome;

/// Trait abstraction over the Capra backend service.
///
/// The real implementation talks HTTP; tests substitute a mock. If the
/// backend's transport or shape changes, only the one implementation
/// moves — the rest of the codebase is untouched.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch the hello banner. One request, no retry; callers keep
    /// their loading placeholder on failure.
    async fn hello(&self) -> Result<String, CoreError>;

    /// Send one CSV file as a multipart form and return the parsed
    /// response envelope. One request, no retry, no timeout beyond the
    /// client default.
    async fn upload_portfolio(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadOutcome, CoreError>;
}
