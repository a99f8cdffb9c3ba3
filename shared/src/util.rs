/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current local calendar date (hire and termination dates)
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
