pub mod report;

use crate::client::DistributionClient;
use crate::core::models::{App, Tester, group_names};
use crate::core::types::{AppFilter, TesterKind};
use crate::errors::{Error, Result, require_config_item, require_found};
use crate::logging::{LogTarget, Logger};
use crate::manager::report::TesterReport;
use std::io::Write;

/// Lookup order for add and find.
const FIND_ORDER: [TesterKind; 2] = [TesterKind::Internal, TesterKind::External];
/// Lookup order for remove. Reversed on purpose; a tester on both sides is removed as external.
const REMOVE_ORDER: [TesterKind; 2] = [TesterKind::External, TesterKind::Internal];

const MISSING_APP_FILTER: &str = "You must provide either an Apple ID for the app (with the \
     `--apple-id` option) or app identifier (with the `--app-identifier` option)";
const TEAM_LISTING_DENIED: &str = "You don't have the permission to list the testers of your \
     whole team. Please provide an app identifier to list all testers of a specific application.";

/// Name fields for a tester that may have to be invited.
#[derive(Debug, Clone, Copy)]
pub struct NewTester<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Add, remove, find and list testers against a distribution service.
///
/// Every operation is one pass: validate, resolve, act, report.
pub struct TesterManager<'a> {
    client: &'a mut dyn DistributionClient,
    logger: &'a Logger,
    report: TesterReport,
}

impl<'a> TesterManager<'a> {
    pub fn new(
        client: &'a mut dyn DistributionClient,
        logger: &'a Logger,
        report: TesterReport,
    ) -> Self {
        Self {
            client,
            logger,
            report,
        }
    }

    /// Invite (or reuse) a tester and add them to `groups` of the app, or to its
    /// default group when no groups are named.
    pub fn add_tester(
        &mut self,
        new: &NewTester<'_>,
        app_filter: Option<&AppFilter>,
        groups: Option<&[String]>,
    ) -> Result<Tester> {
        let new = NewTester {
            email: require_email(new.email)?,
            ..*new
        };
        let app = require_found(self.find_app(app_filter)?, MISSING_APP_FILTER)?;
        let tester = self.find_or_create_tester(&new)?;

        match self.client.add_tester_to_groups(&tester, &app, groups) {
            Ok(joined) => {
                let msg = if tester.is_internal() {
                    format!("Successfully added tester to app {}", app.name)
                } else {
                    format!(
                        "Successfully added tester to app {} in group(s) {}",
                        app.name,
                        group_names(&joined)
                    )
                };
                self.logger.success(msg, LogTarget::ConsoleAndFile);
                Ok(tester)
            }
            Err(err) => {
                self.logger.error(
                    format!("Could not add {} to app: {}", tester.email, app.name),
                    LogTarget::ConsoleAndFile,
                );
                Err(err)
            }
        }
    }

    /// Print and return the tester registered under `email`.
    pub fn find_tester<W: Write + ?Sized>(&mut self, email: &str, out: &mut W) -> Result<Tester> {
        let email = require_email(email)?;
        let tester = require_found(
            self.lookup(email, &FIND_ORDER)?,
            format!("Tester {email} not found"),
        )?;
        self.report.describe_tester(&tester, out)?;
        Ok(tester)
    }

    /// Without an app filter the tester is deleted from the account. With one,
    /// an external tester and no groups means leaving the app; anything else
    /// leaves the named groups.
    pub fn remove_tester(
        &mut self,
        email: &str,
        app_filter: Option<&AppFilter>,
        groups: Option<&[String]>,
    ) -> Result<()> {
        let email = require_email(email)?;
        let tester = require_found(
            self.lookup(email, &REMOVE_ORDER)?,
            format!("Tester not found: {email}"),
        )?;

        let Some(app) = self.find_app(app_filter)? else {
            if let Err(err) = self.client.delete_tester(&tester) {
                self.log_remove_failure(&tester, &err);
                return Err(err);
            }
            self.logger.success(
                format!("Successfully removed tester {}", tester.email),
                LogTarget::ConsoleAndFile,
            );
            return Ok(());
        };

        let outcome = if groups.is_none() && !tester.is_internal() {
            self.client
                .remove_tester_from_app(&tester, &app)
                .map(|()| {
                    format!(
                        "Successfully removed tester, {}, from app: {}",
                        tester.email, app.name
                    )
                })
        } else {
            self.client
                .remove_tester_from_groups(&tester, &app, groups)
                .map(|left| {
                    format!(
                        "Successfully removed tester {} from app {} in group(s) {}",
                        tester.email,
                        app.name,
                        group_names(&left)
                    )
                })
        };

        match outcome {
            Ok(msg) => {
                self.logger.success(msg, LogTarget::ConsoleAndFile);
                Ok(())
            }
            Err(err) => {
                self.log_remove_failure(&tester, &err);
                Err(err)
            }
        }
    }

    /// Two tables (internal, external): per app when filtered, team-wide otherwise.
    pub fn list_testers<W: Write + ?Sized>(
        &mut self,
        app_filter: Option<&AppFilter>,
        out: &mut W,
    ) -> Result<()> {
        match app_filter {
            Some(filter) => self.list_testers_by_app(filter, out),
            None => self.list_testers_global(out),
        }
    }

    fn list_testers_by_app<W: Write + ?Sized>(&mut self, filter: &AppFilter, out: &mut W) -> Result<()> {
        let app = self
            .client
            .find_app(filter)?
            .ok_or_else(|| Error::not_found(format!("Couldn't find app with '{filter}'")))?;

        let internal = self.client.testers_by_app(TesterKind::Internal, &app)?;
        let external = self.client.testers_by_app(TesterKind::External, &app)?;

        self.report.list_by_app(&internal, "Internal Testers", out)?;
        writeln!(out)?;
        self.report.list_by_app(&external, "External Testers", out)?;
        Ok(())
    }

    fn list_testers_global<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        // Both lists are fetched before anything is printed.
        let fetched = self
            .client
            .all_testers(TesterKind::Internal)
            .and_then(|internal| {
                let external = self.client.all_testers(TesterKind::External)?;
                Ok((internal, external))
            });
        let (internal, external) = match fetched {
            Ok(lists) => lists,
            Err(Error::Permission(_)) => return Err(Error::Permission(TEAM_LISTING_DENIED.into())),
            Err(err) => return Err(err),
        };

        self.report.list_global(&internal, "Internal Testers", out)?;
        writeln!(out)?;
        self.report.list_global(&external, "External Testers", out)?;
        Ok(())
    }

    fn lookup(&self, email: &str, order: &[TesterKind]) -> Result<Option<Tester>> {
        for &kind in order {
            if let Some(tester) = self.client.find_tester(kind, email)? {
                return Ok(Some(tester));
            }
        }
        Ok(None)
    }

    /// `Ok(None)` only when no filter was given.
    fn find_app(&self, filter: Option<&AppFilter>) -> Result<Option<App>> {
        let Some(filter) = filter else {
            return Ok(None);
        };
        match self.client.find_app(filter)? {
            Some(app) => Ok(Some(app)),
            None => Err(Error::not_found(format!("Could not find an app by {filter}"))),
        }
    }

    fn find_or_create_tester(&mut self, new: &NewTester<'_>) -> Result<Tester> {
        if let Some(tester) = self.lookup(new.email, &FIND_ORDER)? {
            self.logger.success(
                format!("Existing tester {}", tester.email),
                LogTarget::ConsoleAndFile,
            );
            return Ok(tester);
        }

        match self
            .client
            .create_external_tester(new.email, new.first_name, new.last_name)
        {
            Ok(tester) => {
                self.logger.success(
                    format!("Successfully added tester: {} to your account", tester.email),
                    LogTarget::ConsoleAndFile,
                );
                Ok(tester)
            }
            Err(err) => {
                self.logger.error(
                    format!("Could not create tester {}", new.email),
                    LogTarget::ConsoleAndFile,
                );
                Err(err)
            }
        }
    }

    fn log_remove_failure(&self, tester: &Tester, err: &Error) {
        self.logger.error(
            format!("Could not remove {} from app: {}", tester.email, err),
            LogTarget::ConsoleAndFile,
        );
    }
}

fn require_email(email: &str) -> Result<&str> {
    let email = email.trim();
    require_config_item((!email.is_empty()).then_some(email), "email")
}
