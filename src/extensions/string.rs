pub trait ToEmailKey {
    /// Returns the lookup key for an email: trimmed and ASCII-lowercased.
    fn to_email_key(&self) -> String;
}

impl ToEmailKey for str {
    fn to_email_key(&self) -> String {
        self.trim().to_ascii_lowercase()
    }
}

impl ToEmailKey for String {
    fn to_email_key(&self) -> String {
        self.as_str().to_email_key()
    }
}

pub trait SplitCsv {
    /// Splits on commas, trims each entry and drops blanks.
    fn split_csv(&self) -> Vec<String>;
}

impl SplitCsv for str {
    fn split_csv(&self) -> Vec<String> {
        self.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
