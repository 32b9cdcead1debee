use crate::client::DistributionClient;
use crate::client::state::{AppAccess, ServiceState};
use crate::core::models::{App, Group, Tester};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::{Error, Result};

/// In-process distribution service.
///
/// Records the name of every mutating call and can be told to fail group
/// associations, which makes it the backend of choice for tests.
#[derive(Debug, Default)]
pub struct MemoryClient {
    state: ServiceState,
    calls: Vec<String>,
    fail_associations: bool,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, app: App) -> Self {
        self.state.apps.push(app);
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.state.groups.push(group);
        self
    }

    pub fn with_tester(mut self, tester: Tester) -> Self {
        self.state.testers.push(tester);
        self
    }

    pub fn with_app_access(mut self, app_id: u64, email: &str) -> Self {
        self.state.app_access.push(AppAccess {
            app_id,
            email: email.to_string(),
        });
        self
    }

    pub fn deny_team_listing(mut self) -> Self {
        self.state.team_listing_allowed = false;
        self
    }

    pub fn failing_associations(mut self) -> Self {
        self.fail_associations = true;
        self
    }

    pub fn state(&self) -> &ServiceState {
        &self.state
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    fn record(&mut self, call: &str) {
        self.calls.push(call.to_string());
    }

    fn check_association(&self, app: &App) -> Result<()> {
        if self.fail_associations {
            return Err(Error::remote(format!(
                "service rejected group change for app {}",
                app.name
            )));
        }
        Ok(())
    }
}

impl DistributionClient for MemoryClient {
    fn find_tester(&self, kind: TesterKind, email: &str) -> Result<Option<Tester>> {
        Ok(self.state.find_tester(kind, email))
    }

    fn create_external_tester(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Tester> {
        self.record("create");
        self.state.create_external(email, first_name, last_name)
    }

    fn delete_tester(&mut self, tester: &Tester) -> Result<()> {
        self.record("delete");
        self.state.delete_tester(tester)
    }

    fn add_tester_to_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        self.record("add_to_groups");
        self.check_association(app)?;
        self.state.add_to_groups(tester, app, groups)
    }

    fn remove_tester_from_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>> {
        self.record("remove_from_groups");
        self.check_association(app)?;
        self.state.remove_from_groups(tester, app, groups)
    }

    fn remove_tester_from_app(&mut self, tester: &Tester, app: &App) -> Result<()> {
        self.record("remove_from_app");
        self.check_association(app)?;
        self.state.remove_from_app(tester, app)
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
