use crate::core::models::{App, Group, Tester};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::{Error, Result};
use crate::extensions::string::ToEmailKey;
use serde::{Deserialize, Serialize};

/// Internal testers reach an app through an access grant, not a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAccess {
    pub app_id: u64,
    pub email: String,
}

/// Everything the distribution service knows, as one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceState {
    #[serde(default = "default_team_listing")]
    pub team_listing_allowed: bool,
    #[serde(default)]
    pub apps: Vec<App>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub testers: Vec<Tester>,
    #[serde(default)]
    pub app_access: Vec<AppAccess>,
}

fn default_team_listing() -> bool {
    true
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            team_listing_allowed: default_team_listing(),
            apps: Vec::new(),
            groups: Vec::new(),
            testers: Vec::new(),
            app_access: Vec::new(),
        }
    }
}

impl ServiceState {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- Lookups ------------------------------------------------------------

    pub fn find_app(&self, filter: &AppFilter) -> Option<App> {
        self.apps.iter().find(|a| a.matches(filter)).cloned()
    }

    pub fn find_tester(&self, kind: TesterKind, email: &str) -> Option<Tester> {
        self.testers
            .iter()
            .find(|t| t.kind == kind && t.matches_email(email))
            .map(|t| self.hydrate(t))
    }

    pub fn testers_by_app(&self, kind: TesterKind, app: &App) -> Vec<Tester> {
        self.testers
            .iter()
            .filter(|t| t.kind == kind)
            .filter_map(|t| match kind {
                TesterKind::Internal => self
                    .has_access(app.apple_id, &t.email)
                    .then(|| t.scoped_to(Vec::new())),
                TesterKind::External => {
                    let names = self.group_names_for(t, Some(app.apple_id));
                    (!names.is_empty()).then(|| t.scoped_to(names))
                }
            })
            .collect()
    }

    pub fn all_testers(&self, kind: TesterKind) -> Result<Vec<Tester>> {
        if !self.team_listing_allowed {
            return Err(Error::Permission(
                "Insufficient permissions to list the testers of the team.".into(),
            ));
        }
        Ok(self
            .testers
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| self.hydrate(t))
            .collect())
    }

    // ---- Mutations ----------------------------------------------------------

    pub fn create_external(&mut self, email: &str, first: &str, last: &str) -> Result<Tester> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::remote(format!("'{email}' is not a valid email address")));
        }
        if self.find_tester(TesterKind::External, email).is_some() {
            return Err(Error::remote(format!("Tester {email} already exists")));
        }
        let tester = Tester::new(TesterKind::External, email, first, last);
        self.testers.push(tester.clone());
        Ok(tester)
    }

    pub fn delete_tester(&mut self, tester: &Tester) -> Result<()> {
        let before = self.testers.len();
        self.testers
            .retain(|t| !(t.kind == tester.kind && t.matches_email(&tester.email)));
        if self.testers.len() == before {
            return Err(Error::remote(format!("Tester {} does not exist", tester.email)));
        }
        match tester.kind {
            TesterKind::Internal => self.revoke_access(None, &tester.email),
            TesterKind::External => {
                for g in self.groups.iter_mut() {
                    g.testers.retain(|e| e.to_email_key() != tester.email.to_email_key());
                }
            }
        }
        Ok(())
    }

    pub fn add_to_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        if tester.is_internal() {
            if !self.has_access(app.apple_id, &tester.email) {
                self.app_access.push(AppAccess {
                    app_id: app.apple_id,
                    email: tester.email.clone(),
                });
            }
            return Ok(Vec::new());
        }

        let targets = match groups {
            Some(names) => self.resolve_groups(app, names)?,
            None => vec![self.default_group(app)?],
        };
        for &idx in &targets {
            let group = &mut self.groups[idx];
            if !group.contains(&tester.email) {
                group.testers.push(tester.email.clone());
            }
        }
        Ok(targets.iter().map(|&i| self.groups[i].clone()).collect())
    }

    pub fn remove_from_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        if tester.is_internal() {
            self.revoke_access(Some(app.apple_id), &tester.email);
            return Ok(Vec::new());
        }

        let targets = match groups {
            Some(names) => self.resolve_groups(app, names)?,
            None => self.member_groups(app.apple_id, &tester.email),
        };
        let key = tester.email.to_email_key();
        for &idx in &targets {
            self.groups[idx].testers.retain(|e| e.to_email_key() != key);
        }
        Ok(targets.iter().map(|&i| self.groups[i].clone()).collect())
    }

    pub fn remove_from_app(&mut self, tester: &Tester, app: &App) -> Result<()> {
        if tester.is_internal() {
            return Err(Error::remote(format!(
                "{} is an internal tester and has no app membership to remove",
                tester.email
            )));
        }
        let targets = self.member_groups(app.apple_id, &tester.email);
        if targets.is_empty() {
            return Err(Error::remote(format!(
                "Tester {} is not a tester of app {}",
                tester.email, app.name
            )));
        }
        let key = tester.email.to_email_key();
        for idx in targets {
            self.groups[idx].testers.retain(|e| e.to_email_key() != key);
        }
        Ok(())
    }

    // ---- Helpers ------------------------------------------------------------

    fn hydrate(&self, tester: &Tester) -> Tester {
        let mut out = tester.clone();
        out.groups = match tester.kind {
            TesterKind::Internal => Vec::new(),
            TesterKind::External => self.group_names_for(tester, None),
        };
        out
    }

    fn group_names_for(&self, tester: &Tester, app_id: Option<u64>) -> Vec<String> {
        self.groups
            .iter()
            .filter(|g| app_id.is_none_or(|id| g.app_id == id))
            .filter(|g| g.contains(&tester.email))
            .map(|g| g.name.clone())
            .collect()
    }

    fn member_groups(&self, app_id: u64, email: &str) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.app_id == app_id && g.contains(email))
            .map(|(i, _)| i)
            .collect()
    }

    fn default_group(&self, app: &App) -> Result<usize> {
        self.groups
            .iter()
            .position(|g| g.app_id == app.apple_id && g.is_default)
            .ok_or_else(|| Error::remote(format!("App {} has no default group", app.name)))
    }

    /// All names must exist on the app; nothing is touched otherwise.
    fn resolve_groups(&self, app: &App, names: &[String]) -> Result<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.groups
                    .iter()
                    .position(|g| g.app_id == app.apple_id && g.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| {
                        Error::remote(format!("Group '{name}' not found for app {}", app.name))
                    })
            })
            .collect()
    }

    fn has_access(&self, app_id: u64, email: &str) -> bool {
        let key = email.to_email_key();
        self.app_access
            .iter()
            .any(|a| a.app_id == app_id && a.email.to_email_key() == key)
    }

    fn revoke_access(&mut self, app_id: Option<u64>, email: &str) {
        let key = email.to_email_key();
        self.app_access.retain(|a| {
            !(app_id.is_none_or(|id| a.app_id == id) && a.email.to_email_key() == key)
        });
    }
}
