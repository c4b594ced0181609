use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::{AppConfig, ScheduleConfig};

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub schedule: ScheduleConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_role_key: "test-service-role-key".to_string(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl TestConfig {
    /// Point the config at a mock server, e.g. `MockServer::uri()`.
    pub fn with_url(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_role_key: self.supabase_service_role_key.clone(),
            port: 0,
            schedule: self.schedule,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned PostgREST rows from the `appointments` table.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn appointment_row(time: &str, duration: Option<i32>, status: &str) -> Value {
        json!({
            "time": time,
            "duration": duration,
            "status": status,
            "therapist": "Ana",
            "patient_name": "Paciente Teste"
        })
    }

    pub fn therapist_appointment_row(time: &str, duration: i32, therapist: &str) -> Value {
        json!({
            "time": time,
            "duration": duration,
            "status": "scheduled",
            "therapist": therapist,
            "patient_name": "Paciente Teste"
        })
    }

    pub fn postgrest_error(message: &str) -> Value {
        json!({
            "code": "PGRST301",
            "details": null,
            "hint": null,
            "message": message
        })
    }
}
