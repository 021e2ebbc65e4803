use chrono::NaiveDate;
use gtfs_structures::{Exception, Gtfs, Trip};

use crate::network::Minutes;

pub const fn get_size_bits<T>() -> usize {
    std::mem::size_of::<T>() * 8
}

pub fn get_duration_str(duration: Minutes) -> String {
    if duration < 60 {
        format!("{duration} minutes")
    } else {
        format!("{}h {:02}m", duration / 60, duration % 60)
    }
}

// GTFS times are seconds since midnight, round partial minutes up.
pub fn seconds_to_minutes(seconds: u32) -> Minutes {
    seconds.div_ceil(60)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceDay {
    Running,
    NotRunning,
    // The service id is in neither calendar.txt nor calendar_dates.txt.
    UnknownService,
}

pub fn get_service_day(gtfs: &Gtfs, service_id: &str, date: NaiveDate) -> ServiceDay {
    let calendar_dates = gtfs.calendar_dates.get(service_id);

    // Exceptions override the regular calendar.
    if let Some(exception) = calendar_dates.and_then(|calendar_dates| calendar_dates.iter().find(|calendar_date| calendar_date.date == date)) {
        return if exception.exception_type == Exception::Added { ServiceDay::Running } else { ServiceDay::NotRunning };
    }

    match gtfs.calendar.get(service_id) {
        Some(calendar) if calendar.valid_weekday(date) && calendar.start_date <= date && date <= calendar.end_date => ServiceDay::Running,
        Some(_) => ServiceDay::NotRunning,
        // Services defined only by calendar_dates run on their added dates alone.
        None if calendar_dates.is_some() => ServiceDay::NotRunning,
        None => ServiceDay::UnknownService,
    }
}

pub fn does_trip_run(gtfs: &Gtfs, trip: &Trip, date: NaiveDate) -> bool {
    match get_service_day(gtfs, &trip.service_id, date) {
        ServiceDay::Running => true,
        ServiceDay::NotRunning => false,
        ServiceDay::UnknownService => {
            log::warn!("Trip {} does not have a valid service_id.", trip.id);
            false
        }
    }
}
