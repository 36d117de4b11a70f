// file: src/clock.rs
// description: timestamp and id collaborators used when records are created or edited
// reference: https://docs.rs/chrono, https://docs.rs/uuid

use crate::parser::grammar::DATE_FORMAT;
use chrono::Local;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

pub trait ClockIdProvider {
    /// Current local time as `YYYY-MM-DD HH:mm:ss`.
    fn now(&self) -> String;

    fn new_id(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockIdProvider for SystemClock {
    fn now(&self) -> String {
        Local::now().format(DATE_FORMAT).to_string()
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic provider. Ids are `<prefix>`, then `<prefix>-2`, `<prefix>-3`...
#[derive(Debug)]
pub struct FixedClock {
    now: String,
    id_prefix: String,
    issued: AtomicUsize,
}

impl FixedClock {
    pub fn new(now: impl Into<String>, id_prefix: impl Into<String>) -> Self {
        Self {
            now: now.into(),
            id_prefix: id_prefix.into(),
            issued: AtomicUsize::new(0),
        }
    }
}

impl ClockIdProvider for FixedClock {
    fn now(&self) -> String {
        self.now.clone()
    }

    fn new_id(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        if n == 1 {
            self.id_prefix.clone()
        } else {
            format!("{}-{}", self.id_prefix, n)
        }
    }
}

impl<T: ClockIdProvider + ?Sized> ClockIdProvider for &T {
    fn now(&self) -> String {
        (**self).now()
    }

    fn new_id(&self) -> String {
        (**self).new_id()
    }
}
