use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{AppointmentRecord, AvailabilityError};

const APPOINTMENT_COLUMNS: &str = "time,duration,status,therapist,patient_name";

/// Where the day's bookings come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    /// Non-cancelled appointments on `date`, restricted to `therapist` when given.
    async fn fetch_day(
        &self,
        date: NaiveDate,
        therapist: Option<String>,
    ) -> Result<Vec<AppointmentRecord>, AvailabilityError>;
}

pub struct SupabaseAppointmentSource {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentSource {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// PostgREST path selecting one day of bookings.
    pub fn appointments_path(date: NaiveDate, therapist: Option<&str>) -> String {
        let mut path = format!(
            "/rest/v1/appointments?select={}&date=eq.{}&or=(status.is.null,status.neq.cancelled)&order=time.asc",
            APPOINTMENT_COLUMNS,
            date.format("%Y-%m-%d")
        );

        if let Some(therapist) = therapist {
            path.push_str(&format!("&therapist=eq.{}", urlencoding::encode(therapist)));
        }

        path
    }
}

#[async_trait]
impl AppointmentSource for SupabaseAppointmentSource {
    async fn fetch_day(
        &self,
        date: NaiveDate,
        therapist: Option<String>,
    ) -> Result<Vec<AppointmentRecord>, AvailabilityError> {
        let path = Self::appointments_path(date, therapist.as_deref());
        debug!("Fetching appointments for {} (therapist: {:?})", date, therapist);

        let appointments: Vec<AppointmentRecord> = self
            .supabase
            .get(&path)
            .await
            .map_err(|e| {
                error!("Failed to fetch appointments for {}: {}", date, e);
                AvailabilityError::UpstreamFetch(e.to_string())
            })?;

        debug!("Fetched {} appointments for {}", appointments.len(), date);
        Ok(appointments)
    }
}
