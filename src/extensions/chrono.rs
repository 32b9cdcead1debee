use chrono::{DateTime, Utc};

pub trait PrettyDate {
    /// Short `MM/DD/YY HH:MM` rendering used in tester reports.
    fn to_pretty(&self) -> String;
}

impl PrettyDate for DateTime<Utc> {
    fn to_pretty(&self) -> String {
        self.format("%m/%d/%y %H:%M").to_string()
    }
}
