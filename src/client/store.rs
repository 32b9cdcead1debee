use crate::client::DistributionClient;
use crate::client::state::ServiceState;
use crate::core::models::{App, Group, Tester};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Distribution service backed by a JSON document on disk.
///
/// Each successful mutation rewrites the whole document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: ServiceState,
}

impl FileStore {
    /// Opens `path`; a missing file is an empty service.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| {
                Error::Parse(format!("Invalid store document '{}': {}", path.display(), e))
            })?
        } else {
            ServiceState::default()
        };
        Ok(Self { path, state })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ServiceState) -> Result<T>,
    {
        let out = f(&mut self.state)?;
        self.save()?;
        Ok(out)
    }
}

impl DistributionClient for FileStore {
    fn find_tester(&self, kind: TesterKind, email: &str) -> Result<Option<Tester>> {
        Ok(self.state.find_tester(kind, email))
    }

    fn create_external_tester(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Tester> {
        self.mutate(|s| s.create_external(email, first_name, last_name))
    }

    fn delete_tester(&mut self, tester: &Tester) -> Result<()> {
        self.mutate(|s| s.delete_tester(tester))
    }

    fn add_tester_to_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        self.mutate(|s| s.add_to_groups(tester, app, groups))
    }

    fn remove_tester_from_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        self.mutate(|s| s.remove_from_groups(tester, app, groups))
    }

    fn remove_tester_from_app(&mut self, tester: &Tester, app: &App) -> Result<()> {
        self.mutate(|s| s.remove_from_app(tester, app))
    }

    fn find_app(&self, filter: &AppFilter) -> Result<Option<App>> {
        Ok(self.state.find_app(filter))
    }

    fn testers_by_app(&self, kind: TesterKind, app: &App) -> Result<Vec<Tester>> {
        Ok(self.state.testers_by_app(kind, app))
    }

    fn all_testers(&self, kind: TesterKind) -> Result<Vec<Tester>> {
        self.state.all_testers(kind)
    }
}
