//! Injected time source.

use chrono::{DateTime, FixedOffset, Local, Utc};

/// Provides the current instant for attendance transitions.
///
/// The offset of the returned instant decides which calendar day a
/// transition is recorded under.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the system clock, in the host's local time zone unless a fixed
/// facility offset is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub const fn local() -> Self {
        Self { offset: None }
    }

    pub const fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    pub const fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}
