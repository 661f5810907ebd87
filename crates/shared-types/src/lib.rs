use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Campus a record belongs to. The "All" choice only exists in filter
/// state, never on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Campus {
    UTSG,
    UTM,
    UTSC,
}

impl Campus {
    pub fn as_str(&self) -> &str {
        match self {
            Campus::UTSG => "UTSG",
            Campus::UTM => "UTM",
            Campus::UTSC => "UTSC",
        }
    }
}

impl FromStr for Campus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("UTSG") {
            Ok(Campus::UTSG)
        } else if s.eq_ignore_ascii_case("UTM") {
            Ok(Campus::UTM)
        } else if s.eq_ignore_ascii_case("UTSC") {
            Ok(Campus::UTSC)
        } else {
            Err(())
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Canonical event record after adapter normalization.
///
/// `event_date` (`DD/MM/YYYY`) and `start_time` (`HH:MM`) are guaranteed
/// parseable for any record the adapter emits; the view model relies on
/// that and does not re-validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEvent {
    /// Sheet row identifier, when the sheet carries an ID column.
    pub id: Option<String>,
    pub event_name: String,
    pub event_location: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub event_description: Option<String>,
    pub host_club: Option<String>,
    /// Never empty; falls back to a single "Not specified" entry.
    pub food_types: Vec<String>,
    /// `None` covers both a blank cell and the "no" sentinel.
    pub registration_link: Option<String>,
    pub campus: Campus,
    pub approval_status: ApprovalStatus,
}

/// Form submission body, matching the original form's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubmission {
    pub event_name: String,
    pub event_location: String,
    pub event_date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub event_description: String,
    pub food_types: Vec<String>,
    pub contact_email: String,
    pub additional_notes: Option<String>,
    pub registration_link: Option<String>,
    pub host_club: Option<String>,
    pub campus: Campus,
}

// API response envelopes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<FoodEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub data: EventSubmission,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventViewResponse {
    pub success: bool,
    pub today: Vec<FoodEvent>,
    pub upcoming: Vec<FoodEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub status: ApprovalStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campus_parse_is_case_insensitive() {
        assert_eq!("utsg".parse::<Campus>(), Ok(Campus::UTSG));
        assert_eq!(" UTM ".parse::<Campus>(), Ok(Campus::UTM));
        assert_eq!("utsc".parse::<Campus>(), Ok(Campus::UTSC));
        assert!("Scarborough".parse::<Campus>().is_err());
    }

    #[test]
    fn test_approval_status_round_trip() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<ApprovalStatus>(), Ok(status));
        }
        assert_eq!(
            "APPROVED".parse::<ApprovalStatus>(),
            Ok(ApprovalStatus::Approved)
        );
    }

    #[test]
    fn test_submission_uses_form_field_names() {
        let body = serde_json::json!({
            "eventName": "Pizza Night",
            "eventLocation": "Bahen Centre",
            "eventDate": "15/10/2024",
            "startTime": "18:00",
            "eventDescription": "Free pizza for all students",
            "foodTypes": ["Pizza", "Pop"],
            "contactEmail": "club@example.com",
            "campus": "UTSG"
        });
        let submission: EventSubmission = serde_json::from_value(body).unwrap();
        assert_eq!(submission.event_name, "Pizza Night");
        assert_eq!(submission.food_types, vec!["Pizza", "Pop"]);
        assert_eq!(submission.campus, Campus::UTSG);
        assert!(submission.registration_link.is_none());
    }
}
