use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Serialize;

/// Columns every portfolio CSV must carry (matched case-insensitively).
const REQUIRED_COLUMNS: [&str; 4] = ["ticker", "shares", "purchase_price", "purchase_date"];

/// Columns that may be present; anything else is ignored with a warning.
const OPTIONAL_COLUMNS: [&str; 3] = ["company_name", "sector", "notes"];

/// Accepted purchase-date formats, tried in order.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", // 2024-01-15
    "%m/%d/%Y", // 01/15/2024
    "%m-%d-%Y", // 01-15-2024
    "%d/%m/%Y", // 15/01/2024
    "%d-%m-%Y", // 15-01-2024
    "%Y/%m/%d", // 2024/01/15
];

/// One validated row of an uploaded portfolio CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedHolding {
    /// Ticker symbol, uppercased
    pub ticker: String,

    /// Number of shares, > 0
    pub shares: f64,

    /// Price paid per share, > 0
    pub purchase_price: f64,

    /// Purchase date
    pub purchase_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Outcome of parsing one CSV document. Row errors are collected, not
/// thrown: a bad row invalidates the import but parsing continues so
/// the user sees every problem at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CsvImportReport {
    /// Rows that passed validation
    pub rows: Vec<ImportedHolding>,

    /// Fatal problems (header or row); non-empty means the import failed
    pub errors: Vec<String>,

    /// Non-fatal observations (ignored columns, future dates)
    pub warnings: Vec<String>,
}

impl CsvImportReport {
    /// The import succeeded iff no errors were recorded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of validated rows.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Parses and validates uploaded portfolio CSVs.
///
/// Pure text-in, report-out — no I/O beyond log lines.
pub struct ImportService;

impl ImportService {
    pub fn new() -> Self {
        Self
    }

    /// Parse CSV content, validating against today's date.
    #[must_use]
    pub fn parse_portfolio_csv(&self, content: &str, filename: Option<&str>) -> CsvImportReport {
        let today = chrono::Utc::now().date_naive();
        self.parse_portfolio_csv_at(content, filename, today)
    }

    /// Parse CSV content with an explicit "today" (the future-date check
    /// is relative to it).
    #[must_use]
    pub fn parse_portfolio_csv_at(
        &self,
        content: &str,
        filename: Option<&str>,
        today: NaiveDate,
    ) -> CsvImportReport {
        let name = filename.unwrap_or("<inline>");
        let mut report = CsvImportReport::default();

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = match reader.headers() {
            Ok(h) => h.iter().map(|s| s.trim().to_lowercase()).collect(),
            Err(e) => {
                report.errors.push(format!("Failed to parse CSV file: {e}"));
                log::error!("CSV parsing error in {name}: {e}");
                return report;
            }
        };

        if !self.validate_headers(&headers, &mut report) {
            log::error!("CSV header validation failed for {name}: {:?}", report.errors);
            return report;
        }

        let column_index = |col: &str| headers.iter().position(|h| h == col);

        // Header is row 1; data rows start at 2
        for (idx, record) in reader.records().enumerate() {
            let row_num = idx + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    report
                        .errors
                        .push(format!("Error processing row {row_num}: {e}"));
                    continue;
                }
            };

            let field = |col: &str| -> &str {
                column_index(col)
                    .and_then(|i| record.get(i))
                    .unwrap_or("")
                    .trim()
            };

            match self.validate_row(
                field("ticker"),
                field("shares"),
                field("purchase_price"),
                field("purchase_date"),
                field("company_name"),
                field("sector"),
                field("notes"),
                row_num,
                today,
                &mut report.warnings,
            ) {
                Ok(row) => report.rows.push(row),
                Err(msg) => report
                    .errors
                    .push(format!("Error processing row {row_num}: {msg}")),
            }
        }

        if report.is_success() {
            log::info!("Successfully parsed {} holdings from {name}", report.count());
        } else {
            log::error!("CSV parsing failed for {name}: {:?}", report.errors);
        }

        report
    }

    /// Check that every required column is present; warn about columns
    /// that are neither required nor optional.
    fn validate_headers(&self, headers: &[String], report: &mut CsvImportReport) -> bool {
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            report
                .errors
                .push("CSV file appears to be empty or has no headers".into());
            return false;
        }

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !headers.iter().any(|h| h.as_str() == *c))
            .collect();

        if !missing.is_empty() {
            report
                .errors
                .push(format!("Missing required columns: {}", missing.join(", ")));
            report.errors.push(format!(
                "Required columns are: {}",
                REQUIRED_COLUMNS.join(", ")
            ));
            return false;
        }

        let unexpected: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .filter(|h| {
                !h.is_empty() && !REQUIRED_COLUMNS.contains(h) && !OPTIONAL_COLUMNS.contains(h)
            })
            .collect();

        if !unexpected.is_empty() {
            let warning = format!(
                "Unexpected columns found (will be ignored): {}",
                unexpected.join(", ")
            );
            log::warn!("{warning}");
            report.warnings.push(warning);
        }

        true
    }

    /// Validate one data row. Returns the first problem found, matching
    /// the upload endpoint's row-by-row error reporting.
    #[allow(clippy::too_many_arguments)]
    fn validate_row(
        &self,
        ticker: &str,
        shares: &str,
        purchase_price: &str,
        purchase_date: &str,
        company_name: &str,
        sector: &str,
        notes: &str,
        row_num: usize,
        today: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> Result<ImportedHolding, String> {
        // Ticker
        if ticker.is_empty() {
            return Err("Ticker symbol is required and cannot be empty".into());
        }
        if ticker.len() > 10 {
            return Err("Ticker symbol is too long (max 10 characters)".into());
        }
        let ticker = ticker.to_uppercase();

        // Shares
        if shares.is_empty() {
            return Err("Shares is required and cannot be empty".into());
        }
        let shares_value: f64 = shares
            .parse()
            .map_err(|_| format!("Invalid shares value: '{shares}' - must be a number"))?;
        if !shares_value.is_finite() || shares_value <= 0.0 {
            return Err("Shares must be greater than 0".into());
        }

        // Purchase price — tolerate currency symbols and thousands separators
        if purchase_price.is_empty() {
            return Err("Purchase price is required and cannot be empty".into());
        }
        let cleaned_price = purchase_price.replace(['$', ','], "");
        let cleaned_price = cleaned_price.trim();
        let price_value: f64 = cleaned_price.parse().map_err(|_| {
            format!("Invalid purchase price: '{cleaned_price}' - must be a number")
        })?;
        if !price_value.is_finite() || price_value <= 0.0 {
            return Err("Purchase price must be greater than 0".into());
        }

        // Purchase date
        if purchase_date.is_empty() {
            return Err("Purchase date is required and cannot be empty".into());
        }
        let date_value = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(purchase_date, fmt).ok())
            .ok_or_else(|| {
                format!(
                    "Invalid date format: '{purchase_date}' - supported formats: \
                     YYYY-MM-DD, MM/DD/YYYY, etc."
                )
            })?;

        if date_value > today {
            warnings.push(format!(
                "Row {row_num}: Purchase date is in the future: {purchase_date}"
            ));
        }

        let optional = |s: &str| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };

        Ok(ImportedHolding {
            ticker,
            shares: shares_value,
            purchase_price: price_value,
            purchase_date: date_value,
            company_name: optional(company_name),
            sector: optional(sector),
            notes: optional(notes),
        })
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::new()
    }
}
