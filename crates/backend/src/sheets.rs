//! Thin client for the Google Sheet that receives form responses.
//!
//! Rows are addressed by named column via the sheet's header row; the column
//! names are the exact strings the form writes, punctuation included. One
//! client is constructed per process and shared across requests.

use std::collections::HashMap;

use anyhow::{Context, Result};
use google_sheets4::api::ValueRange;
use google_sheets4::hyper_rustls::{self, HttpsConnector};
use google_sheets4::{yup_oauth2, Sheets};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::config::AppConfig;

type SheetsHub = Sheets<HttpsConnector<HttpConnector>>;

/// One data row, keyed by header-row column names.
#[derive(Debug, Clone)]
pub struct SheetRow {
    /// 1-based sheet row number (the header is row 1).
    pub row_number: usize,
    values: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(row_number: usize, values: HashMap<String, String>) -> Self {
        Self { row_number, values }
    }

    /// Trimmed cell under the named column; blank and missing cells are
    /// both `None`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

#[derive(Clone)]
pub struct SheetsClient {
    hub: SheetsHub,
    spreadsheet_id: String,
    tab: String,
}

impl SheetsClient {
    /// Build the hub with service-account credentials from config.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        // Use the yup_oauth2 re-exported by google_sheets4 to avoid version
        // mismatch.
        let key: yup_oauth2::ServiceAccountKey = serde_json::from_value(serde_json::json!({
            "type": "service_account",
            "client_email": config.service_account_email,
            "private_key": config.private_key,
            "token_uri": "https://oauth2.googleapis.com/token",
        }))
        .context("Failed to assemble service account key")?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .context("Failed to build service account authenticator")?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .context("Failed to load native TLS roots")?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);
        let hub = Sheets::new(client, auth);

        Ok(Self {
            hub,
            spreadsheet_id: config.spreadsheet_id.clone(),
            tab: config.sheet_tab.clone(),
        })
    }

    /// Fetch every data row of the tab.
    pub async fn fetch_rows(&self) -> Result<Vec<SheetRow>> {
        let range = format!("'{}'", self.tab);
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .doit()
            .await
            .context("Failed to load sheet values")?;

        Ok(rows_from_values(value_range.values.unwrap_or_default()))
    }

    /// Append one row, placing each named cell under its header column.
    /// Columns not present in `cells` are written blank.
    pub async fn append_row(&self, cells: &HashMap<&str, String>) -> Result<()> {
        let headers = self.fetch_headers().await?;
        let row: Vec<serde_json::Value> = headers
            .iter()
            .map(|header| {
                serde_json::Value::String(cells.get(header.as_str()).cloned().unwrap_or_default())
            })
            .collect();

        let body = ValueRange {
            values: Some(vec![row]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .values_append(body, &self.spreadsheet_id, &format!("'{}'", self.tab))
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .context("Failed to append row")?;

        Ok(())
    }

    /// Overwrite a single cell, addressed by column name and sheet row
    /// number.
    pub async fn update_cell(&self, row_number: usize, column: &str, value: &str) -> Result<()> {
        let headers = self.fetch_headers().await?;
        let index = headers
            .iter()
            .position(|header| header == column)
            .with_context(|| format!("Column {column:?} not present in sheet header"))?;

        let range = format!("'{}'!{}{}", self.tab, column_letter(index), row_number);
        let body = ValueRange {
            range: Some(range.clone()),
            values: Some(vec![vec![serde_json::Value::String(value.to_string())]]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .values_update(body, &self.spreadsheet_id, &range)
            .value_input_option("RAW")
            .doit()
            .await
            .with_context(|| format!("Failed to update cell {range}"))?;

        Ok(())
    }

    async fn fetch_headers(&self) -> Result<Vec<String>> {
        let range = format!("'{}'!1:1", self.tab);
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .doit()
            .await
            .context("Failed to load sheet header row")?;

        let mut rows = value_range.values.unwrap_or_default();
        if rows.is_empty() {
            anyhow::bail!("Sheet tab {:?} has no header row", self.tab);
        }
        Ok(rows.remove(0).iter().map(cell_text).collect())
    }
}

/// Turn raw cell values into named rows using the first row as headers.
fn rows_from_values(values: Vec<Vec<serde_json::Value>>) -> Vec<SheetRow> {
    let mut iter = values.into_iter();
    let headers: Vec<String> = match iter.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Vec::new(),
    };

    iter.enumerate()
        .map(|(i, cells)| {
            let values = headers
                .iter()
                .zip(cells.iter())
                .map(|(header, cell)| (header.clone(), cell_text(cell)))
                .collect();
            // header is sheet row 1, first data row is 2
            SheetRow::new(i + 2, values)
        })
        .collect()
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// 0-based column index to A1 letters (0 -> A, 26 -> AA).
fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push((b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}
