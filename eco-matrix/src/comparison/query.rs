//! Comparison query form.

use chrono::{NaiveDate, NaiveTime};

use crate::domain::StationRef;

/// Travel date and earliest departure used for every comparison.
///
/// Emission figures barely depend on the day, but the service still needs
/// a concrete connection to compare against, so the date is pinned rather
/// than taken from the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelSchedule {
    pub date: NaiveDate,
    pub depart_after: NaiveTime,
}

impl TravelSchedule {
    pub fn new(date: NaiveDate, depart_after: NaiveTime) -> Self {
        Self { date, depart_after }
    }

    /// Date as the query form expects it, e.g. "Fri, 01.03.24".
    pub fn form_date(&self) -> String {
        self.date.format("%a, %d.%m.%y").to_string()
    }

    /// Time as the query form expects it, e.g. "06:00".
    pub fn form_time(&self) -> String {
        self.depart_after.format("%H:%M").to_string()
    }
}

impl Default for TravelSchedule {
    fn default() -> Self {
        Self {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or_default(),
            depart_after: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
        }
    }
}

/// A single comparison request between two resolved stations.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonQuery<'a> {
    pub origin: &'a StationRef,
    pub destination: &'a StationRef,
    pub schedule: TravelSchedule,
}

impl<'a> ComparisonQuery<'a> {
    pub fn new(
        origin: &'a StationRef,
        destination: &'a StationRef,
        schedule: TravelSchedule,
    ) -> Self {
        Self {
            origin,
            destination,
            schedule,
        }
    }

    /// Form fields for the comparison search.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("queryPageDisplayed", "yes".to_string()),
            ("REQComparisonCarload", "0".to_string()),
            ("REQ0Total_KissRide_maxDist", "5555500".to_string()),
            ("REQ0JourneyStopsS0A", "1".to_string()),
            ("REQ0JourneyStopsS0G", self.origin.display_name.clone()),
            ("REQ0JourneyStopsS0ID", self.origin.id.clone()),
            ("REQ0JourneyStopsZ0A", "1".to_string()),
            ("REQ0JourneyStopsZ0G", self.destination.display_name.clone()),
            ("REQ0JourneyStopsZ0ID", self.destination.id.clone()),
            ("REQ0JourneyDate", self.schedule.form_date()),
            ("wDayExt0", "Mo|Tu|We|Th|Fr|Sa|Su".to_string()),
            ("REQ0JourneyTime", self.schedule.form_time()),
            ("REQ0HafasSearchForw", "1".to_string()),
            ("application", "ECOLOGYINFO".to_string()),
            ("start", "Search connection".to_string()),
        ]
    }
}
