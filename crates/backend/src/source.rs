//! Event source adapter over the form-responses sheet.
//!
//! Fetches submitted rows, keeps the approved ones, and normalizes them
//! into canonical [`FoodEvent`] records. Rows missing a required field or
//! carrying unparseable date/time text are dropped here, with a warning,
//! so everything downstream can rely on well-formed records.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::AppConfig;
use crate::dates::{parse_event_date, parse_start_time};
use crate::sheets::{SheetRow, SheetsClient};
use shared_types::{ApprovalStatus, Campus, EventSubmission, FoodEvent};

/// Column headers exactly as the form writes them, punctuation included.
mod columns {
    pub const ID: &str = "ID";
    pub const EVENT_NAME: &str = "Event Name";
    pub const EVENT_LOCATION: &str = "Event Location";
    pub const EVENT_DATE: &str = "Event Date";
    pub const START_TIME: &str = "Start Time";
    pub const END_TIME: &str = "End Time (Optional)";
    pub const EVENT_DESCRIPTION: &str = "Event Description";
    pub const FOOD_TYPES: &str = "Type of Food Offered";
    pub const HOST_CLUB: &str = "Host Club";
    pub const CONTACT_EMAIL: &str = "Contact Email";
    pub const ADDITIONAL_NOTES: &str = "Any Additional Notes? (Optional)";
    pub const REGISTRATION_LINK: &str =
        "Is Registration Required? If so, provide the link to register in \"Other...\"";
    pub const APPROVAL_STATUS: &str = "Approval Status";
    pub const CAMPUS: &str = "Campus";
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The sheet could not be loaded or authenticated against.
    #[error("event source unavailable: {0:#}")]
    Unavailable(anyhow::Error),

    /// Appending a new submission row failed.
    #[error("submission failed: {0:#}")]
    SubmissionFailed(anyhow::Error),

    /// No row carries the requested ID.
    #[error("no event row with id {0:?}")]
    RowNotFound(String),
}

/// The sole reader/writer of the form-responses sheet. Cheap to clone;
/// constructed once in `main` and shared as router state.
#[derive(Clone)]
pub struct EventSource {
    sheets: SheetsClient,
}

impl EventSource {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            sheets: SheetsClient::connect(config).await?,
        })
    }

    /// All approved events, normalized. Submissions still pending (or
    /// rejected) never appear here.
    pub async fn fetch_approved_events(&self) -> Result<Vec<FoodEvent>, SourceError> {
        let rows = self
            .sheets
            .fetch_rows()
            .await
            .map_err(SourceError::Unavailable)?;

        Ok(approved_events(&rows))
    }

    /// Append one submission with `Approval Status = pending`. The new row
    /// stays invisible to `fetch_approved_events` until approved.
    pub async fn submit_event(&self, submission: &EventSubmission) -> Result<(), SourceError> {
        let cells = submission_cells(submission);
        self.sheets
            .append_row(&cells)
            .await
            .map_err(SourceError::SubmissionFailed)?;

        tracing::info!(event_name = %submission.event_name, "submission appended as pending");
        Ok(())
    }

    /// Overwrite the approval-status cell of the row whose `ID` column
    /// equals `id`.
    pub async fn update_approval_status(
        &self,
        id: &str,
        status: ApprovalStatus,
    ) -> Result<(), SourceError> {
        let rows = self
            .sheets
            .fetch_rows()
            .await
            .map_err(SourceError::Unavailable)?;

        let row = rows
            .iter()
            .find(|row| row.get(columns::ID) == Some(id))
            .ok_or_else(|| SourceError::RowNotFound(id.to_string()))?;

        self.sheets
            .update_cell(row.row_number, columns::APPROVAL_STATUS, status.as_str())
            .await
            .map_err(SourceError::Unavailable)?;

        tracing::info!(id, status = status.as_str(), "approval status updated");
        Ok(())
    }
}

/// Keep approved rows and normalize them, dropping malformed ones.
fn approved_events(rows: &[SheetRow]) -> Vec<FoodEvent> {
    rows.iter()
        .filter(|row| {
            row.get(columns::APPROVAL_STATUS)
                .is_some_and(|status| status.eq_ignore_ascii_case("approved"))
        })
        .filter_map(|row| {
            let event = normalize_row(row);
            if event.is_none() {
                tracing::warn!(row = row.row_number, "dropping malformed event row");
            }
            event
        })
        .collect()
}

/// Map one approved row into the canonical record shape. `None` means the
/// row is malformed: a required field is missing or its date/time text
/// does not parse.
fn normalize_row(row: &SheetRow) -> Option<FoodEvent> {
    let event_name = row.get(columns::EVENT_NAME)?.to_string();
    let campus: Campus = row.get(columns::CAMPUS)?.parse().ok()?;

    let event_date = row.get(columns::EVENT_DATE)?.to_string();
    parse_event_date(&event_date)?;
    let start_time = row.get(columns::START_TIME)?.to_string();
    parse_start_time(&start_time)?;

    // "no" is the form's way of saying registration is not required.
    let registration_link = row
        .get(columns::REGISTRATION_LINK)
        .filter(|link| !link.eq_ignore_ascii_case("no"))
        .map(str::to_string);

    Some(FoodEvent {
        id: row.get(columns::ID).map(str::to_string),
        event_name,
        event_location: row
            .get(columns::EVENT_LOCATION)
            .unwrap_or_default()
            .to_string(),
        event_date,
        start_time,
        end_time: row.get(columns::END_TIME).map(str::to_string),
        event_description: row.get(columns::EVENT_DESCRIPTION).map(str::to_string),
        host_club: row.get(columns::HOST_CLUB).map(str::to_string),
        food_types: split_food_types(row.get(columns::FOOD_TYPES)),
        registration_link,
        campus,
        approval_status: ApprovalStatus::Approved,
    })
}

/// The sheet stores food types as one comma-joined cell (submissions write
/// the list joined with ", "); expose them as individual labels again.
fn split_food_types(cell: Option<&str>) -> Vec<String> {
    let labels: Vec<String> = cell
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect();

    if labels.is_empty() {
        vec!["Not specified".to_string()]
    } else {
        labels
    }
}

/// Cells for a new submission row, keyed by column header. Optional fields
/// become blank cells, matching what the form itself writes.
fn submission_cells(submission: &EventSubmission) -> HashMap<&'static str, String> {
    let mut cells = HashMap::new();
    cells.insert(columns::EVENT_NAME, submission.event_name.clone());
    cells.insert(columns::EVENT_LOCATION, submission.event_location.clone());
    cells.insert(columns::EVENT_DATE, submission.event_date.clone());
    cells.insert(columns::START_TIME, submission.start_time.clone());
    cells.insert(
        columns::END_TIME,
        submission.end_time.clone().unwrap_or_default(),
    );
    cells.insert(
        columns::EVENT_DESCRIPTION,
        submission.event_description.clone(),
    );
    cells.insert(columns::FOOD_TYPES, submission.food_types.join(", "));
    cells.insert(
        columns::HOST_CLUB,
        submission.host_club.clone().unwrap_or_default(),
    );
    cells.insert(columns::CONTACT_EMAIL, submission.contact_email.clone());
    cells.insert(
        columns::ADDITIONAL_NOTES,
        submission.additional_notes.clone().unwrap_or_default(),
    );
    cells.insert(
        columns::REGISTRATION_LINK,
        submission.registration_link.clone().unwrap_or_default(),
    );
    cells.insert(columns::CAMPUS, submission.campus.as_str().to_string());
    cells.insert(
        columns::APPROVAL_STATUS,
        ApprovalStatus::Pending.as_str().to_string(),
    );
    cells
}
