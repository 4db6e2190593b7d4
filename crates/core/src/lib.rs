pub mod backend;
pub mod errors;
pub mod models;
pub mod samples;
pub mod services;

use std::time::Duration;

use backend::client::HttpBackend;
use backend::traits::PortfolioBackend;
use models::{
    chart::{ChartDataPoint, Period, PeriodOverview},
    chat::ChatMessage,
    holding::{Holding, HoldingSortKey},
    news::NewsItem,
    settings::Settings,
    upload::{UploadOutcome, UploadState},
};
use services::{
    advisor_service::AdvisorService,
    chart_service::ChartService,
    holdings_service::HoldingsService,
    import_service::{CsvImportReport, ImportService},
};

use errors::CoreError;

/// Main entry point for the Capra dashboard core.
/// Holds the portfolio view state and all services needed to operate on it.
///
/// All entities are ephemeral: nothing survives the struct. The only
/// operation that touches the network is the backend bridge (hello +
/// upload); everything else is in-memory derivation.
#[must_use]
pub struct CapraDashboard {
    holdings: Vec<Holding>,
    news: Vec<NewsItem>,
    settings: Settings,
    holdings_service: HoldingsService,
    chart_service: ChartService,
    import_service: ImportService,
    advisor: AdvisorService,
    backend: Box<dyn PortfolioBackend>,
    upload_state: UploadState,
    last_upload: Option<UploadOutcome>,
}

impl std::fmt::Debug for CapraDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapraDashboard")
            .field("holdings", &self.holdings.len())
            .field("news", &self.news.len())
            .field("chat_messages", &self.advisor.messages().len())
            .field("upload_state", &self.upload_state)
            .finish()
    }
}

impl CapraDashboard {
    /// A dashboard pre-loaded with the built-in sample portfolio and
    /// news, talking to the default local backend.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    /// A dashboard with custom settings (backend URL, advisor delay).
    pub fn with_settings(settings: Settings) -> Self {
        let backend = Box::new(HttpBackend::new(settings.backend_base_url.clone()));
        Self::build(settings, backend)
    }

    /// A dashboard with an explicit backend implementation (tests pass
    /// a mock here).
    pub fn with_backend(settings: Settings, backend: Box<dyn PortfolioBackend>) -> Self {
        Self::build(settings, backend)
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// The current holdings list in stored order.
    #[must_use]
    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    /// A new holdings list ranked descending by the chosen field.
    /// The stored list is left untouched.
    #[must_use]
    pub fn holdings_sorted(&self, key: HoldingSortKey) -> Vec<Holding> {
        self.holdings_service.rank(&self.holdings, key)
    }

    /// Sum of all position values.
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.holdings_service.total_value(&self.holdings)
    }

    /// Replace the holdings list. Allocations are recomputed so they
    /// sum to ~100 again.
    pub fn set_holdings(&mut self, holdings: Vec<Holding>) {
        self.holdings = holdings;
        self.holdings_service
            .recompute_allocations(&mut self.holdings);
    }

    /// Parse portfolio CSV text and replace the holdings with its rows,
    /// valued at purchase price. Returns the number of holdings loaded.
    pub fn load_holdings_from_csv(&mut self, content: &str) -> Result<usize, CoreError> {
        let report = self.import_service.parse_portfolio_csv(content, None);
        if !report.is_success() {
            return Err(CoreError::CsvParse(report.errors.join("; ")));
        }

        let holdings = report
            .rows
            .into_iter()
            .map(|row| {
                let name = row.company_name.unwrap_or_else(|| row.ticker.clone());
                Holding::new(row.ticker, name, row.shares, row.purchase_price)
            })
            .collect();

        self.set_holdings(holdings);
        Ok(self.holdings.len())
    }

    // ── News ────────────────────────────────────────────────────────

    /// The market news cards.
    #[must_use]
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// The cached chart series for a reporting window. Selecting a
    /// period is a lookup — series are generated once per session.
    #[must_use]
    pub fn chart_series(&self, period: Period) -> &[ChartDataPoint] {
        self.chart_service.series(period)
    }

    /// Headline figures (end value, change, percent change) for a window.
    #[must_use]
    pub fn period_overview(&self, period: Period) -> PeriodOverview {
        self.chart_service.overview(period)
    }

    // ── Advisor Chat ────────────────────────────────────────────────

    /// The chat log, oldest first.
    #[must_use]
    pub fn advisor_messages(&self) -> &[ChatMessage] {
        self.advisor.messages()
    }

    /// Suggested prompts for the chat's quick-select chips.
    #[must_use]
    pub fn advisor_starter_questions() -> &'static [&'static str] {
        AdvisorService::starter_questions()
    }

    /// True while a reply is staged but not yet delivered.
    #[must_use]
    pub fn advisor_is_typing(&self) -> bool {
        self.advisor.is_typing()
    }

    /// Send a user message; the advisor stages its scripted reply.
    pub fn advisor_send(&mut self, text: &str) -> Result<&ChatMessage, CoreError> {
        self.advisor.send(text)
    }

    /// Wait the reply delay and append the staged advisor reply.
    /// Dropping the future before it resolves cancels nothing
    /// permanently — the reply stays staged for a later call.
    pub async fn advisor_deliver_reply(&mut self) -> Option<&ChatMessage> {
        self.advisor.deliver_reply().await
    }

    // ── Backend Bridge ──────────────────────────────────────────────

    /// Fetch the backend's hello banner. Failures propagate (and are
    /// logged); callers keep their loading placeholder.
    pub async fn hello(&self) -> Result<String, CoreError> {
        self.backend.hello().await.map_err(|e| {
            log::error!("Error fetching hello message: {e}");
            e
        })
    }

    /// Current position in the upload lifecycle.
    #[must_use]
    pub fn upload_state(&self) -> UploadState {
        self.upload_state
    }

    /// Result of the most recent upload attempt, if any.
    #[must_use]
    pub fn last_upload(&self) -> Option<&UploadOutcome> {
        self.last_upload.as_ref()
    }

    /// Upload a portfolio CSV to the backend.
    ///
    /// Exactly one attempt may be in flight: a second call while
    /// `Uploading` returns `CoreError::UploadInFlight` without touching
    /// the outstanding request. Everything else — wrong file type,
    /// non-UTF-8 content, local validation failure, transport failure,
    /// backend rejection — lands in a `Rejected` outcome rather than an
    /// error, and the attempt's outcome replaces the previous one.
    pub async fn upload_portfolio(
        &mut self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<&UploadOutcome, CoreError> {
        if self.upload_state == UploadState::Uploading {
            return Err(CoreError::UploadInFlight);
        }
        self.upload_state = UploadState::Uploading;

        let outcome = match self.prevalidate_upload(filename, &bytes) {
            Err(error) => UploadOutcome::Rejected { error },
            Ok(()) => match self.backend.upload_portfolio(filename, bytes).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Upload failed: {e}");
                    UploadOutcome::Rejected {
                        error: e.to_string(),
                    }
                }
            },
        };

        self.upload_state = if outcome.is_accepted() {
            UploadState::Succeeded
        } else {
            UploadState::Failed
        };

        Ok(self.last_upload.insert(outcome))
    }

    /// Local checks before any network call, mirroring the backend's
    /// own rejections: file presence, `.csv` extension, UTF-8 content,
    /// CSV validation.
    fn prevalidate_upload(&self, filename: &str, bytes: &[u8]) -> Result<(), String> {
        if filename.trim().is_empty() {
            return Err("No file selected".into());
        }

        let is_csv = filename
            .rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            return Err("Invalid file type. Only CSV files are allowed".into());
        }

        let content = std::str::from_utf8(bytes)
            .map_err(|_| "File encoding error. Please ensure the file is UTF-8 encoded")?;

        let report = self
            .import_service
            .parse_portfolio_csv(content, Some(filename));
        if !report.is_success() {
            return Err(format!("CSV validation failed: {}", report.errors.join("; ")));
        }

        Ok(())
    }

    // ── CSV Import ──────────────────────────────────────────────────

    /// Parse portfolio CSV text without touching dashboard state.
    #[must_use]
    pub fn parse_portfolio_csv(&self, content: &str, filename: Option<&str>) -> CsvImportReport {
        self.import_service.parse_portfolio_csv(content, filename)
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Point the bridge at a different backend. The HTTP client is
    /// rebuilt so the new URL takes effect immediately.
    pub fn set_backend_base_url(&mut self, url: String) -> Result<(), CoreError> {
        let trimmed = url.trim();
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(CoreError::ValidationError(format!(
                "Invalid backend URL '{url}': must start with http:// or https://"
            )));
        }
        self.settings.backend_base_url = trimmed.to_string();
        self.backend = Box::new(HttpBackend::new(trimmed));
        Ok(())
    }

    /// Change how long the advisor "types" before replying.
    pub fn set_advisor_delay_ms(&mut self, delay_ms: u64) {
        self.settings.advisor_delay_ms = delay_ms;
        self.advisor.set_delay(Duration::from_millis(delay_ms));
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, backend: Box<dyn PortfolioBackend>) -> Self {
        let advisor = AdvisorService::with_delay(Duration::from_millis(settings.advisor_delay_ms));
        Self {
            holdings: samples::sample_holdings(),
            news: samples::sample_news(),
            settings,
            holdings_service: HoldingsService::new(),
            chart_service: ChartService::new(),
            import_service: ImportService::new(),
            advisor,
            backend,
            upload_state: UploadState::Idle,
            last_upload: None,
        }
    }
}

impl Default for CapraDashboard {
    fn default() -> Self {
        Self::new()
    }
}
