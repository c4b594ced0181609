// libs/availability-cell/src/services/availability.rs

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use shared_config::AppConfig;

use crate::models::{
    AppointmentRecord, AvailabilityError, AvailabilityQuery, AvailabilityResult,
    DaySchedule, ScheduledAppointment, ALL_THERAPISTS,
};
use crate::services::interval::{format_time, overlaps, TimeInterval};
use crate::services::query::{AppointmentSource, SupabaseAppointmentSource};
use crate::services::slot_grid::SlotGrid;

/// Booked intervals of the non-cancelled records. Records that cannot be
/// turned into an interval are logged and left out.
fn booked_intervals<'a>(
    appointments: impl IntoIterator<Item = &'a AppointmentRecord>,
) -> Vec<TimeInterval> {
    appointments
        .into_iter()
        .filter_map(|record| match TimeInterval::from_record(record) {
            Ok(interval) => Some(interval),
            Err(e) => {
                warn!("Skipping appointment {:?}: {}", record, e);
                None
            }
        })
        .collect()
}

/// Bookable start times for `query` given the day's existing appointments.
///
/// A slot `s` is available iff `[s, s + duration)` overlaps no booked interval.
/// Candidates running past closing time are not clamped.
pub fn compute_availability(
    query: &AvailabilityQuery,
    appointments: &[AppointmentRecord],
    grid: &SlotGrid,
) -> AvailabilityResult {
    let active: Vec<&AppointmentRecord> = appointments
        .iter()
        .filter(|record| !record.is_cancelled())
        .collect();
    let booked = booked_intervals(active.iter().copied());
    let duration = query.duration();

    let available_slots: Vec<String> = grid
        .slots()
        .filter(|&start| {
            let candidate = TimeInterval { start, end: start.saturating_add(duration) };
            !booked.iter().any(|interval| overlaps(&candidate, interval))
        })
        .map(format_time)
        .collect();

    AvailabilityResult {
        date: query.date().format("%Y-%m-%d").to_string(),
        therapist: query.therapist_label(),
        duration,
        total_available: available_slots.len(),
        available_slots,
        occupied_slots: active.len(),
    }
}

pub struct AvailabilityService {
    source: Arc<dyn AppointmentSource>,
    grid: SlotGrid,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Result<Self, AvailabilityError> {
        Ok(Self {
            source: Arc::new(SupabaseAppointmentSource::new(config)),
            grid: SlotGrid::from_config(&config.schedule)?,
        })
    }

    pub fn with_source(source: Arc<dyn AppointmentSource>, grid: SlotGrid) -> Self {
        Self { source, grid }
    }

    /// Fetch the day's bookings and compute the free slots.
    pub async fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityResult, AvailabilityError> {
        debug!(
            "Checking availability on {} for {} ({} min)",
            query.date(),
            query.therapist_label(),
            query.duration()
        );

        let appointments = self
            .source
            .fetch_day(query.date(), query.therapist().map(str::to_string))
            .await?;

        let result = compute_availability(query, &appointments, &self.grid);

        info!(
            "{} of {} slots available on {} for {} ({} booked)",
            result.total_available,
            self.grid.len(),
            result.date,
            result.therapist,
            result.occupied_slots
        );

        Ok(result)
    }

    /// The day's non-cancelled bookings with their occupied range, in time order.
    pub async fn day_schedule(
        &self,
        date: NaiveDate,
        therapist: Option<&str>,
    ) -> Result<DaySchedule, AvailabilityError> {
        debug!("Loading day schedule for {} ({:?})", date, therapist);

        let records = self
            .source
            .fetch_day(date, therapist.map(str::to_string))
            .await?;

        let mut appointments: Vec<(TimeInterval, ScheduledAppointment)> = records
            .into_iter()
            .filter(|record| !record.is_cancelled())
            .filter_map(|record| {
                let interval = match TimeInterval::from_record(&record) {
                    Ok(interval) => interval,
                    Err(e) => {
                        warn!("Leaving appointment out of schedule {:?}: {}", record, e);
                        return None;
                    }
                };

                Some((
                    interval,
                    ScheduledAppointment {
                        time: record.time.clone().unwrap_or_default(),
                        start: format_time(interval.start),
                        end: format_time(interval.end),
                        duration: interval.duration(),
                        status: record.status,
                        therapist: record.therapist,
                        patient_name: record.patient_name,
                    },
                ))
            })
            .collect();

        appointments.sort_by_key(|(interval, _)| *interval);
        let appointments: Vec<ScheduledAppointment> =
            appointments.into_iter().map(|(_, appointment)| appointment).collect();

        Ok(DaySchedule {
            date: date.format("%Y-%m-%d").to_string(),
            therapist: therapist.unwrap_or(ALL_THERAPISTS).to_string(),
            total: appointments.len(),
            appointments,
        })
    }
}
