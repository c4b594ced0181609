// libs/availability-cell/src/models.rs
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use std::fmt;

use shared_models::error::AppError;

pub const DEFAULT_DURATION_MINUTES: i32 = 60;
pub const ALL_THERAPISTS: &str = "all";

// ==============================================================================
// APPOINTMENT ROWS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    #[serde(alias = "canceled")]
    Cancelled,
    NoShow,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
            AppointmentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A row of the `appointments` table, as much of it as scheduling needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppointmentRecord {
    pub time: Option<String>,
    pub duration: Option<i32>,
    pub status: Option<AppointmentStatus>,
    pub therapist: Option<String>,
    pub patient_name: Option<String>,
}

impl AppointmentRecord {
    pub fn new(time: &str, duration: Option<i32>) -> Self {
        Self {
            time: Some(time.to_string()),
            duration,
            status: Some(AppointmentStatus::Scheduled),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn duration_minutes(&self) -> i32 {
        self.duration.unwrap_or(DEFAULT_DURATION_MINUTES)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == Some(AppointmentStatus::Cancelled)
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Raw body of `POST /check-availability`; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckAvailabilityRequest {
    pub date: Option<String>,
    pub therapist: Option<String>,
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayScheduleParams {
    pub date: Option<String>,
    pub therapist: Option<String>,
}

/// A validated availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    date: NaiveDate,
    therapist: Option<String>,
    duration: u32,
}

impl AvailabilityQuery {
    pub fn new(date: NaiveDate, therapist: Option<&str>, duration: i64) -> Result<Self, AvailabilityError> {
        let duration = u32::try_from(duration)
            .ok()
            .filter(|minutes| *minutes > 0)
            .ok_or(AvailabilityError::InvalidDuration(duration))?;

        Ok(Self {
            date,
            therapist: normalize_therapist(therapist),
            duration,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn therapist(&self) -> Option<&str> {
        self.therapist.as_deref()
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn therapist_label(&self) -> String {
        self.therapist.clone().unwrap_or_else(|| ALL_THERAPISTS.to_string())
    }
}

impl TryFrom<CheckAvailabilityRequest> for AvailabilityQuery {
    type Error = AvailabilityError;

    fn try_from(request: CheckAvailabilityRequest) -> Result<Self, Self::Error> {
        let date = parse_request_date(request.date.as_deref())?;
        let duration = request.duration.unwrap_or(DEFAULT_DURATION_MINUTES as i64);

        Self::new(date, request.therapist.as_deref(), duration)
    }
}

/// Validates the mandatory `YYYY-MM-DD` date shared by every endpoint.
pub fn parse_request_date(raw: Option<&str>) -> Result<NaiveDate, AvailabilityError> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(AvailabilityError::MissingDate)?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AvailabilityError::InvalidDate(raw.to_string()))
}

/// A blank therapist filter means "every therapist"; any other value is kept verbatim.
pub fn normalize_therapist(therapist: Option<&str>) -> Option<String> {
    therapist
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub date: String,
    pub therapist: String,
    pub duration: u32,
    pub available_slots: Vec<String>,
    pub total_available: usize,
    pub occupied_slots: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAppointment {
    pub time: String,
    pub start: String,
    pub end: String,
    pub duration: u32,
    pub status: Option<AppointmentStatus>,
    pub therapist: Option<String>,
    pub patient_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: String,
    pub therapist: String,
    pub appointments: Vec<ScheduledAppointment>,
    pub total: usize,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Data é obrigatória")]
    MissingDate,

    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("Duração inválida: {0}")]
    InvalidDuration(i64),

    #[error("JSON inválido: {0}")]
    InvalidBody(String),

    #[error("Horário inválido: {0}")]
    MalformedTime(String),

    #[error("Intervalo inválido: início {start}, duração {duration}")]
    InvalidInterval { start: u32, duration: i64 },

    #[error("Grade de horários inválida: {0}")]
    InvalidGrid(String),

    #[error("{0}")]
    UpstreamFetch(String),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::MissingDate
            | AvailabilityError::InvalidDate(_)
            | AvailabilityError::InvalidDuration(_)
            | AvailabilityError::InvalidBody(_) => AppError::BadRequest(err.to_string()),
            AvailabilityError::MalformedTime(_)
            | AvailabilityError::InvalidInterval { .. }
            | AvailabilityError::InvalidGrid(_) => AppError::Internal(err.to_string()),
            AvailabilityError::UpstreamFetch(message) => AppError::Database(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_does_not_fail_the_row() {
        let record: AppointmentRecord = serde_json::from_value(json!({
            "time": "10:00",
            "duration": null,
            "status": "aguardando"
        }))
        .unwrap();

        assert_eq!(record.status, Some(AppointmentStatus::Unknown));
        assert_eq!(record.duration_minutes(), 60);
        assert!(!record.is_cancelled());
    }

    #[test]
    fn american_spelling_is_cancelled_too() {
        let record: AppointmentRecord =
            serde_json::from_value(json!({ "time": "10:00", "status": "canceled" })).unwrap();
        assert!(record.is_cancelled());
    }

    #[test]
    fn request_defaults_to_one_hour_for_all_therapists() {
        let request = CheckAvailabilityRequest {
            date: Some("2025-03-10".to_string()),
            therapist: Some("   ".to_string()),
            duration: None,
        };

        let query = AvailabilityQuery::try_from(request).unwrap();
        assert_eq!(query.duration(), 60);
        assert_eq!(query.therapist(), None);
        assert_eq!(query.therapist_label(), "all");
    }

    #[test]
    fn date_is_required_before_anything_else() {
        let request = CheckAvailabilityRequest {
            date: None,
            therapist: None,
            duration: Some(-5),
        };

        assert_eq!(AvailabilityQuery::try_from(request), Err(AvailabilityError::MissingDate));
    }

    #[test]
    fn rejects_non_positive_durations() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(
            AvailabilityQuery::new(date, None, 0),
            Err(AvailabilityError::InvalidDuration(0))
        );
        assert_eq!(
            AvailabilityQuery::new(date, None, -30),
            Err(AvailabilityError::InvalidDuration(-30))
        );
    }

    #[test]
    fn accepts_durations_longer_than_the_day() {
        let request = CheckAvailabilityRequest {
            date: Some("2025-03-10".to_string()),
            therapist: None,
            duration: Some(1441),
        };
        assert_eq!(AvailabilityQuery::try_from(request).unwrap().duration(), 1441);

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(AvailabilityQuery::new(date, None, 1500).unwrap().duration(), 1500);
    }

    #[test]
    fn therapist_name_is_kept_verbatim() {
        assert_eq!(normalize_therapist(Some(" Ana")), Some(" Ana".to_string()));
        assert_eq!(normalize_therapist(Some("Ana Souza")), Some("Ana Souza".to_string()));
        assert_eq!(normalize_therapist(Some(" \t ")), None);
        assert_eq!(normalize_therapist(None), None);
    }

    #[test]
    fn record_level_errors_are_internal() {
        let err: AppError = AvailabilityError::MalformedTime("9h".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(
            parse_request_date(Some("10/03/2025")),
            Err(AvailabilityError::InvalidDate("10/03/2025".to_string()))
        );
        assert_eq!(parse_request_date(Some("")), Err(AvailabilityError::MissingDate));
    }

    #[test]
    fn upstream_failures_keep_their_message() {
        let err: AppError = AvailabilityError::UpstreamFetch("connection refused".to_string()).into();
        assert!(matches!(err, AppError::Database(ref msg) if msg == "connection refused"));
    }
}
