pub mod interval;
pub mod slot_grid;
pub mod query;
pub mod availability;

pub use interval::{TimeInterval, overlaps, parse_time, format_time};
pub use slot_grid::SlotGrid;
pub use query::{AppointmentSource, SupabaseAppointmentSource};
pub use availability::{AvailabilityService, compute_availability};
