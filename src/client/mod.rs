pub mod memory;
pub mod state;
pub mod store;
#[cfg(test)]
mod tests;

use crate::core::models::{App, Group, Tester};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::Result;

/// The calls the tester commands make against the distribution service.
///
/// Lookups return `Ok(None)` when nothing matches; `Err` is reserved for
/// failures of the service itself. Mutations report failures as
/// [`Error::Remote`](crate::errors::Error::Remote), team-wide listing as
/// [`Error::Permission`](crate::errors::Error::Permission).
pub trait DistributionClient {
    fn find_tester(&self, kind: TesterKind, email: &str) -> Result<Option<Tester>>;

    fn create_external_tester(
        &mut self,
        email: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Tester>;

    /// Account-wide deletion.
    fn delete_tester(&mut self, tester: &Tester) -> Result<()>;

    /// `groups = None` targets the app's default group. Returns the groups touched.
    fn add_tester_to_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>>;

    /// `groups = None` targets every group of the app the tester is in.
    fn remove_tester_from_groups(
        &mut self,
        tester: &Tester,
        app: &App,
        groups: Option<&[String]>,
    ) -> Result<Vec<Group>>;

    fn remove_tester_from_app(&mut self, tester: &Tester, app: &App) -> Result<()>;

    fn find_app(&self, filter: &AppFilter) -> Result<Option<App>>;

    /// Per-app listing; records carry no devices or install data.
    fn testers_by_app(&self, kind: TesterKind, app: &App) -> Result<Vec<Tester>>;

    fn all_testers(&self, kind: TesterKind) -> Result<Vec<Tester>>;
}
