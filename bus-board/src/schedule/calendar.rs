//! Weekly service calendars.

use std::collections::HashMap;

use crate::domain::DayIndex;

use super::error::DatasetError;

/// Service id → which weekdays it runs, indexed by [`DayIndex`].
#[derive(Debug, Clone, Default)]
pub struct ServiceCalendar {
    days: HashMap<String, [bool; 7]>,
}

impl ServiceCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the dataset's `service -> [0|1; 7]` rows. Only a flag of
    /// exactly 1 marks the day active.
    pub fn decode(rows: HashMap<String, Vec<u8>>) -> Result<Self, DatasetError> {
        let mut calendar = Self::new();
        for (service, flags) in rows {
            let days: [u8; 7] = flags.as_slice().try_into().map_err(|_| {
                DatasetError::MalformedCalendar {
                    service: service.clone(),
                    found: flags.len(),
                }
            })?;
            calendar.insert(service, days.map(|f| f == 1));
        }
        Ok(calendar)
    }

    pub fn insert(&mut self, service_id: impl Into<String>, days: [bool; 7]) {
        self.days.insert(service_id.into(), days);
    }

    /// Whether `service_id` runs on `day`. Services without a row never run.
    pub fn is_active(&self, service_id: &str, day: DayIndex) -> bool {
        self.days
            .get(service_id)
            .is_some_and(|days| days[day.index()])
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Answers "does this service run today?" over a calendar that may not have
/// been loaded at all.
///
/// A missing calendar dataset and a missing row are deliberately different:
/// with no dataset the answer is indeterminate and callers include
/// everything, while a dataset without a row for the service means the
/// service does not run.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCalendarResolver<'a> {
    calendar: Option<&'a ServiceCalendar>,
}

impl<'a> ServiceCalendarResolver<'a> {
    pub fn new(calendar: Option<&'a ServiceCalendar>) -> Self {
        Self { calendar }
    }

    /// `None` when no calendar dataset is loaded.
    pub fn resolve(&self, service_id: &str, day: DayIndex) -> Option<bool> {
        self.calendar.map(|c| c.is_active(service_id, day))
    }

    /// Resolve, treating an indeterminate answer as active.
    pub fn is_active(&self, service_id: &str, day: DayIndex) -> bool {
        self.resolve(service_id, day).unwrap_or(true)
    }
}
