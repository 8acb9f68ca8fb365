#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alias_registry::application::services::AliasService;
use alias_registry::domain::clock::Clock;
use alias_registry::domain::entities::AliasRequest;
use alias_registry::infrastructure::persistence::MemoryAliasRepository;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Test clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub type TestRegistry = AliasService<MemoryAliasRepository, ManualClock>;

/// Builds a registry over a fresh store and a manual clock pinned to
/// [`start_time`].
pub fn test_registry() -> (TestRegistry, Arc<MemoryAliasRepository>, Arc<ManualClock>) {
    let repository = Arc::new(MemoryAliasRepository::new());
    let clock = Arc::new(ManualClock::new(start_time()));
    let registry = AliasService::new(repository.clone(), clock.clone());
    (registry, repository, clock)
}

pub fn request(url: &str) -> AliasRequest {
    AliasRequest {
        original_url: url.to_string(),
        validity_minutes: None,
        custom_code: None,
    }
}

pub fn request_with_code(url: &str, code: &str) -> AliasRequest {
    AliasRequest {
        original_url: url.to_string(),
        validity_minutes: None,
        custom_code: Some(code.to_string()),
    }
}

pub fn request_with_validity(url: &str, minutes: u32) -> AliasRequest {
    AliasRequest {
        original_url: url.to_string(),
        validity_minutes: Some(minutes),
        custom_code: None,
    }
}
