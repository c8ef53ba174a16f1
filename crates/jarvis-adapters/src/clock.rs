//! Wall-clock collaborator.

use chrono::{DateTime, Local};

use crate::traits::Clock;

/// Host-local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
