// ═══════════════════════════════════════════════════════════════════
// Backend Tests — PortfolioBackend trait, upload envelopes, and the
// facade's upload state machine
// ═══════════════════════════════════════════════════════════════════

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use capra_core::backend::client::HttpBackend;
use capra_core::backend::traits::PortfolioBackend;
use capra_core::errors::CoreError;
use capra_core::models::settings::Settings;
use capra_core::models::upload::{UploadEnvelope, UploadOutcome, UploadState};
use capra_core::CapraDashboard;

const VALID_CSV: &str = "\
ticker,shares,purchase_price,purchase_date
AAPL,50,175.43,2024-01-15
MSFT,30,378.85,2024-01-20";

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Backends
// ═══════════════════════════════════════════════════════════════════

/// A mock backend with a scripted response and a call counter.
struct MockBackend {
    outcome: UploadOutcome,
    upload_calls: Arc<AtomicUsize>,
}

impl MockBackend {
    fn accepting(count: usize) -> Self {
        Self {
            outcome: UploadOutcome::Accepted {
                message: "Portfolio uploaded and processed successfully".into(),
                stocks_count: count,
                stocks: Vec::new(),
            },
            upload_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn rejecting(error: &str) -> Self {
        Self {
            outcome: UploadOutcome::Rejected {
                error: error.into(),
            },
            upload_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.upload_calls)
    }
}

#[async_trait]
impl PortfolioBackend for MockBackend {
    fn name(&self) -> &str {
        "MockBackend"
    }

    async fn hello(&self) -> Result<String, CoreError> {
        Ok("Hello from Flask backend!".into())
    }

    async fn upload_portfolio(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadOutcome, CoreError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcome.clone())
    }
}

/// A mock whose requests always fail at the transport layer.
struct FailingBackend;

#[async_trait]
impl PortfolioBackend for FailingBackend {
    fn name(&self) -> &str {
        "FailingBackend"
    }

    async fn hello(&self) -> Result<String, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }

    async fn upload_portfolio(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadOutcome, CoreError> {
        Err(CoreError::Network("connection refused".into()))
    }
}

/// A mock that never resolves, for exercising the in-flight guard.
struct HangingBackend;

#[async_trait]
impl PortfolioBackend for HangingBackend {
    fn name(&self) -> &str {
        "HangingBackend"
    }

    async fn hello(&self) -> Result<String, CoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(String::new())
    }

    async fn upload_portfolio(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<UploadOutcome, CoreError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(UploadOutcome::Rejected {
            error: "unreachable".into(),
        })
    }
}

fn dashboard_with(backend: Box<dyn PortfolioBackend>) -> CapraDashboard {
    CapraDashboard::with_backend(Settings::default(), backend)
}

// ═══════════════════════════════════════════════════════════════════
// Upload envelope decoding
// ═══════════════════════════════════════════════════════════════════

mod envelopes {
    use super::*;

    #[test]
    fn success_body_becomes_accepted() {
        let json = r#"{
            "message": "Portfolio uploaded and processed successfully",
            "stocks_count": 3,
            "stocks": [{"ticker": "AAPL"}, {"ticker": "MSFT"}, {"ticker": "GOOGL"}]
        }"#;

        let envelope: UploadEnvelope = serde_json::from_str(json).unwrap();
        let outcome = envelope.into_outcome();

        assert!(outcome.is_accepted());
        match outcome {
            UploadOutcome::Accepted {
                message,
                stocks_count,
                stocks,
            } => {
                assert_eq!(message, "Portfolio uploaded and processed successfully");
                assert_eq!(stocks_count, 3);
                assert_eq!(stocks.len(), 3);
                // Stock records are opaque JSON — no schema is assumed
                assert_eq!(stocks[0]["ticker"], "AAPL");
            }
            UploadOutcome::Rejected { .. } => unreachable!(),
        }
    }

    #[test]
    fn error_body_becomes_rejected() {
        let json = r#"{"error": "Invalid file type. Only CSV files are allowed"}"#;

        let envelope: UploadEnvelope = serde_json::from_str(json).unwrap();
        let outcome = envelope.into_outcome();

        assert!(!outcome.is_accepted());
        assert_eq!(
            outcome.error(),
            Some("Invalid file type. Only CSV files are allowed")
        );
    }

    #[test]
    fn error_field_wins_over_success_fields() {
        let json = r#"{"message": "ok", "stocks_count": 1, "error": "boom"}"#;

        let envelope: UploadEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_outcome().error(), Some("boom"));
    }

    #[test]
    fn missing_success_fields_default() {
        let json = r#"{"message": "ok"}"#;

        let envelope: UploadEnvelope = serde_json::from_str(json).unwrap();
        match envelope.into_outcome() {
            UploadOutcome::Accepted {
                stocks_count,
                stocks,
                ..
            } => {
                assert_eq!(stocks_count, 0);
                assert!(stocks.is_empty());
            }
            UploadOutcome::Rejected { .. } => unreachable!(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// HttpBackend construction
// ═══════════════════════════════════════════════════════════════════

mod http_backend {
    use super::*;

    #[test]
    fn trims_trailing_slashes_from_the_base_url() {
        let backend = HttpBackend::new("http://127.0.0.1:5000///");
        assert_eq!(backend.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn reports_its_name() {
        let backend = HttpBackend::new("http://127.0.0.1:5000");
        assert_eq!(backend.name(), "Capra backend");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Facade — hello bridge
// ═══════════════════════════════════════════════════════════════════

mod hello {
    use super::*;

    #[tokio::test]
    async fn returns_the_backend_banner() {
        let dash = dashboard_with(Box::new(MockBackend::accepting(0)));

        let message = dash.hello().await.unwrap();
        assert_eq!(message, "Hello from Flask backend!");
    }

    #[tokio::test]
    async fn propagates_transport_failures() {
        let dash = dashboard_with(Box::new(FailingBackend));

        let err = dash.hello().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Facade — upload state machine
// ═══════════════════════════════════════════════════════════════════

mod upload {
    use super::*;

    #[tokio::test]
    async fn starts_idle_with_no_outcome() {
        let dash = dashboard_with(Box::new(MockBackend::accepting(0)));

        assert_eq!(dash.upload_state(), UploadState::Idle);
        assert!(dash.last_upload().is_none());
    }

    #[tokio::test]
    async fn successful_upload_transitions_to_succeeded() {
        let mut dash = dashboard_with(Box::new(MockBackend::accepting(2)));

        let outcome = dash
            .upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        assert!(outcome.is_accepted());
        assert_eq!(dash.upload_state(), UploadState::Succeeded);
        assert!(dash.last_upload().unwrap().is_accepted());
    }

    #[tokio::test]
    async fn backend_rejection_transitions_to_failed() {
        let mut dash = dashboard_with(Box::new(MockBackend::rejecting("CSV validation failed")));

        let outcome = dash
            .upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        assert_eq!(outcome.error(), Some("CSV validation failed"));
        assert_eq!(dash.upload_state(), UploadState::Failed);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_rejected_outcome() {
        let mut dash = dashboard_with(Box::new(FailingBackend));

        let outcome = dash
            .upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        let error = outcome.error().unwrap();
        assert!(error.contains("connection refused"));
        assert_eq!(dash.upload_state(), UploadState::Failed);
    }

    #[tokio::test]
    async fn non_csv_file_is_rejected_without_a_network_call() {
        let backend = MockBackend::accepting(0);
        let calls = backend.calls();
        let mut dash = dashboard_with(Box::new(backend));

        let outcome = dash
            .upload_portfolio("portfolio.txt", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        assert_eq!(
            outcome.error(),
            Some("Invalid file type. Only CSV files are allowed")
        );
        assert_eq!(dash.upload_state(), UploadState::Failed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_filename_is_rejected() {
        let mut dash = dashboard_with(Box::new(MockBackend::accepting(0)));

        let outcome = dash
            .upload_portfolio("", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        assert_eq!(outcome.error(), Some("No file selected"));
    }

    #[tokio::test]
    async fn non_utf8_content_is_rejected_locally() {
        let backend = MockBackend::accepting(0);
        let calls = backend.calls();
        let mut dash = dashboard_with(Box::new(backend));

        let outcome = dash
            .upload_portfolio("portfolio.csv", vec![0xFF, 0xFE, 0x00])
            .await
            .unwrap();

        assert!(outcome.error().unwrap().contains("encoding"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_csv_is_rejected_locally() {
        let backend = MockBackend::accepting(0);
        let calls = backend.calls();
        let mut dash = dashboard_with(Box::new(backend));

        let outcome = dash
            .upload_portfolio("portfolio.csv", b"ticker,shares\nAAPL,1\n".to_vec())
            .await
            .unwrap();

        assert!(outcome.error().unwrap().contains("CSV validation failed"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn next_attempt_replaces_the_previous_outcome() {
        let mut dash = dashboard_with(Box::new(MockBackend::accepting(2)));

        dash.upload_portfolio("bad.txt", Vec::new()).await.unwrap();
        assert_eq!(dash.upload_state(), UploadState::Failed);

        dash.upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap();

        assert_eq!(dash.upload_state(), UploadState::Succeeded);
        assert!(dash.last_upload().unwrap().is_accepted());
    }

    #[tokio::test]
    async fn second_upload_while_in_flight_is_rejected() {
        let mut dash = dashboard_with(Box::new(HangingBackend));

        // Abandon an upload mid-flight; the machine stays in Uploading
        let abandoned = tokio::time::timeout(
            Duration::from_millis(20),
            dash.upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec()),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(dash.upload_state(), UploadState::Uploading);

        // The guard refuses a second attempt by construction
        let err = dash
            .upload_portfolio("portfolio.csv", VALID_CSV.as_bytes().to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UploadInFlight));
    }

    #[tokio::test]
    async fn uploading_state_displays_for_the_indicator() {
        assert_eq!(UploadState::Uploading.to_string(), "uploading");
        assert_eq!(UploadState::Idle.to_string(), "idle");
    }
}
