use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::source::EventSource;
use crate::view::{derive_view, CampusSelection, EventFilters};
use shared_types::{
    ApprovalRequest, ApprovalStatus, EventSubmission, EventViewResponse, EventsResponse,
    SubmissionResponse,
};

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// GET /api/events — all approved events, unfiltered.
pub async fn list_events(State(source): State<EventSource>) -> ApiResult<Json<EventsResponse>> {
    let events = source.fetch_approved_events().await?;
    tracing::debug!(count = events.len(), "serving approved events");
    Ok(Json(EventsResponse {
        success: true,
        events,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Reference date (`YYYY-MM-DD`); defaults to the current date.
    pub date: Option<NaiveDate>,
    /// `UTSG`, `UTM`, `UTSC`, or `All` (default).
    pub campus: Option<String>,
    /// Search text; blank passes everything.
    pub q: Option<String>,
}

impl ViewQuery {
    fn into_filters(self) -> Result<EventFilters, ApiError> {
        let campus = match self.campus.as_deref() {
            None => CampusSelection::All,
            Some(c) if c.eq_ignore_ascii_case("all") => CampusSelection::All,
            Some(c) => CampusSelection::Only(c.parse().map_err(|_| {
                ApiError::BadRequest(format!("unknown campus {c:?}"))
            })?),
        };

        Ok(EventFilters {
            search: self.q.unwrap_or_default(),
            campus,
            reference_date: self.date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }
}

/// GET /api/events/view — the date-grouped calendar view.
pub async fn event_view(
    State(source): State<EventSource>,
    Query(query): Query<ViewQuery>,
) -> ApiResult<Json<EventViewResponse>> {
    let filters = query.into_filters()?;
    let events = source.fetch_approved_events().await?;
    let view = derive_view(&events, &filters);
    Ok(Json(EventViewResponse {
        success: true,
        today: view.today,
        upcoming: view.upcoming,
    }))
}

/// POST /api/submissions — append one pending row. The form itself
/// enforces field formats; no extra validation happens here.
pub async fn submit_event(
    State(source): State<EventSource>,
    Json(submission): Json<EventSubmission>,
) -> ApiResult<Json<SubmissionResponse>> {
    source.submit_event(&submission).await?;
    Ok(Json(SubmissionResponse {
        success: true,
        data: submission,
    }))
}

/// POST /api/events/:id/approval — moderation: approve or reject a row.
pub async fn set_approval(
    State(source): State<EventSource>,
    Path(id): Path<String>,
    Json(request): Json<ApprovalRequest>,
) -> ApiResult<StatusCode> {
    if request.status == ApprovalStatus::Pending {
        return Err(ApiError::BadRequest(
            "status must be approved or rejected".to_string(),
        ));
    }

    source.update_approval_status(&id, request.status).await?;
    Ok(StatusCode::NO_CONTENT)
}
