use crate::core::types::{AppFilter, TesterKind};
use crate::extensions::chrono::PrettyDate;
use crate::extensions::string::ToEmailKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub model: String,
    pub os_version: String,
}

impl Device {
    pub fn new(model: impl Into<String>, os_version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            os_version: os_version.into(),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, iOS {}", self.model, self.os_version)
    }
}

/// Most recent build a tester installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallInfo {
    pub short_version: String,
    pub build_version: String,
    pub installed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tester {
    pub kind: TesterKind,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub latest_install: Option<InstallInfo>,
}

impl Tester {
    pub fn new(
        kind: TesterKind,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            groups: Vec::new(),
            devices: Vec::new(),
            latest_install: None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.kind, TesterKind::Internal)
    }

    pub fn matches_email(&self, email: &str) -> bool {
        self.email.to_email_key() == email.to_email_key()
    }

    pub fn groups_list(&self) -> String {
        self.groups.join(", ")
    }

    /// `"<short> (<build>)"`, when an install is known.
    pub fn full_version(&self) -> Option<String> {
        self.latest_install
            .as_ref()
            .map(|i| format!("{} ({})", i.short_version, i.build_version))
    }

    pub fn latest_install_date(&self) -> Option<DateTime<Utc>> {
        self.latest_install.as_ref().map(|i| i.installed_at)
    }

    pub fn pretty_install_date(&self) -> Option<String> {
        self.latest_install_date().map(|d| d.to_pretty())
    }

    /// Copy suitable for a per-app listing: groups narrowed, no device or install data.
    pub fn scoped_to(&self, groups: Vec<String>) -> Self {
        Self {
            groups,
            devices: Vec::new(),
            latest_install: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for Tester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} <{}> ({})",
            self.first_name, self.last_name, self.email, self.kind
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    pub apple_id: u64,
    pub bundle_id: String,
    pub name: String,
}

impl App {
    pub fn new(apple_id: u64, bundle_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            apple_id,
            bundle_id: bundle_id.into(),
            name: name.into(),
        }
    }

    pub fn matches(&self, filter: &AppFilter) -> bool {
        match filter {
            AppFilter::AppleId(id) => self.apple_id == *id,
            AppFilter::BundleId(b) => self.bundle_id.eq_ignore_ascii_case(b),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub app_id: u64,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    /// Emails of member testers.
    #[serde(default)]
    pub testers: Vec<String>,
}

impl Group {
    pub fn new(app_id: u64, name: impl Into<String>, is_default: bool) -> Self {
        Self {
            app_id,
            name: name.into(),
            is_default,
            testers: Vec::new(),
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.testers.iter().any(|t| t.to_email_key() == email.to_email_key())
    }
}

pub fn group_names(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
