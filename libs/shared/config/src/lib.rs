use std::env;
use tracing::warn;

/// Business hours used to build the slot grid, in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub day_start_minutes: u32,
    pub day_end_minutes: u32,
    pub slot_step_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            day_start_minutes: 6 * 60 + 30,
            day_end_minutes: 21 * 60,
            slot_step_minutes: 30,
        }
    }
}

impl ScheduleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let day_start_minutes = env_clock_minutes("SCHEDULE_DAY_START", defaults.day_start_minutes);
        let day_end_minutes = env_clock_minutes("SCHEDULE_DAY_END", defaults.day_end_minutes);
        let slot_step_minutes = match env::var("SCHEDULE_SLOT_MINUTES") {
            Ok(raw) => match raw.trim().parse::<u32>() {
                Ok(step) if step > 0 => step,
                _ => {
                    warn!("SCHEDULE_SLOT_MINUTES={} is not a positive integer, using default", raw);
                    defaults.slot_step_minutes
                }
            },
            Err(_) => defaults.slot_step_minutes,
        };

        if day_start_minutes >= day_end_minutes {
            warn!(
                "Schedule window {}..{} is empty, falling back to default business hours",
                day_start_minutes, day_end_minutes
            );
            return Self { slot_step_minutes, ..defaults };
        }

        Self {
            day_start_minutes,
            day_end_minutes,
            slot_step_minutes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub port: u16,
    pub schedule: ScheduleConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_SERVICE_ROLE_KEY not set, using empty value");
                    String::new()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set or invalid, using default 3000");
                    3000
                }),
            schedule: ScheduleConfig::from_env(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_service_role_key.is_empty()
    }
}

// Accepts "HH:MM"; "21:00" style values only, no seconds.
fn env_clock_minutes(key: &str, default: u32) -> u32 {
    let Ok(raw) = env::var(key) else {
        return default;
    };

    let parsed = raw.trim().split_once(':').and_then(|(h, m)| {
        let hours: u32 = h.parse().ok()?;
        let minutes: u32 = m.parse().ok()?;
        (hours <= 24 && minutes < 60 && hours * 60 + minutes <= 24 * 60).then_some(hours * 60 + minutes)
    });

    parsed.unwrap_or_else(|| {
        warn!("{}={} is not a valid HH:MM time, using default", key, raw);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_matches_clinic_hours() {
        let schedule = ScheduleConfig::default();
        assert_eq!(schedule.day_start_minutes, 390);
        assert_eq!(schedule.day_end_minutes, 1260);
        assert_eq!(schedule.slot_step_minutes, 30);
    }

    #[test]
    fn unset_clock_variable_uses_default() {
        assert_eq!(env_clock_minutes("SCHEDULE_TEST_UNSET_VARIABLE", 390), 390);
    }

    #[test]
    fn configured_requires_url_and_key() {
        let mut config = AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_role_key: String::new(),
            port: 3000,
            schedule: ScheduleConfig::default(),
        };
        assert!(!config.is_configured());

        config.supabase_service_role_key = "service-key".to_string();
        assert!(config.is_configured());
    }
}
