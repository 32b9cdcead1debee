use std::io::Write;

use crate::command::manual::{overview, usage_for};
use crate::command::policies::flag_policy::{
    EmailRequired, FlagDecision, FlagPolicy, FlagRule, HelpRequested,
};
use crate::core::cli::CliOptions;
use crate::core::context::AppContext;
use crate::core::types::TesterCommand;
use crate::errors::Result;
use crate::logging::LogTarget;
use crate::manager::NewTester;
use crate::ui::table_printer::TablePrinter;

pub struct CommandCore<'a> {
    pub opts: &'a CliOptions,
    pub flag_policy: FlagPolicy,
}
impl<'a> CommandCore<'a> {
    pub fn new(opts: &'a CliOptions, flag_policy: FlagPolicy) -> Self {
        Self { opts, flag_policy }
    }

    /// Help first, then whatever else the command requires.
    fn with_rules(opts: &'a CliOptions, email_required: bool) -> Self {
        let mut rules: Vec<Box<dyn FlagRule>> = vec![Box::new(HelpRequested)];
        if email_required {
            rules.push(Box::new(EmailRequired));
        }
        Self::new(opts, FlagPolicy::new(rules))
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<()>;

    fn execute(&self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<()> {
        let core = self.core();
        match core.flag_policy.evaluate(core.opts) {
            FlagDecision::ShortCircuitUsage => {
                write!(out, "{}", self.usage())?;
                Ok(())
            }
            FlagDecision::Continue => self.perform(ctx, out),
            FlagDecision::Error(e) => Err(e),
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

macro_rules! impl_sealed {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<'a> sealed::Sealed<'a> for $ty<'a> {
                fn core(&self) -> &CommandCore<'a> {
                    &self.core
                }
            }
        )*
    };
}

impl_sealed!(
    AddCommand,
    FindCommand,
    RemoveCommand,
    ListCommand,
    ConfigCommand,
    HelpCommand,
);

/// Email as given on the command line; the flag policy has already checked it.
fn email_of(opts: &CliOptions) -> &str {
    opts.email.as_deref().unwrap_or_default()
}

pub struct AddCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> AddCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::with_rules(opts, true),
        }
    }
}
impl<'a> Command<'a> for AddCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::Add)
    }

    fn perform(&self, ctx: &mut AppContext, _out: &mut dyn Write) -> Result<()> {
        let opts = self.core.opts;
        let filter = opts.app_filter()?;
        let new = NewTester {
            email: email_of(opts),
            first_name: opts.first_name.as_deref().unwrap_or_default(),
            last_name: opts.last_name.as_deref().unwrap_or_default(),
        };
        ctx.manager()?
            .add_tester(&new, filter.as_ref(), opts.groups())
            .map(|_| ())
    }
}

pub struct FindCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> FindCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::with_rules(opts, true),
        }
    }
}
impl<'a> Command<'a> for FindCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::Find)
    }

    fn perform(&self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<()> {
        ctx.manager()?
            .find_tester(email_of(self.core.opts), out)
            .map(|_| ())
    }
}

pub struct RemoveCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> RemoveCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::with_rules(opts, true),
        }
    }
}
impl<'a> Command<'a> for RemoveCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::Remove)
    }

    fn perform(&self, ctx: &mut AppContext, _out: &mut dyn Write) -> Result<()> {
        let opts = self.core.opts;
        let filter = opts.app_filter()?;
        ctx.manager()?
            .remove_tester(email_of(opts), filter.as_ref(), opts.groups())
    }
}

pub struct ListCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> ListCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::with_rules(opts, false),
        }
    }
}
impl<'a> Command<'a> for ListCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::List)
    }

    fn perform(&self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<()> {
        let filter = self.core.opts.app_filter()?;
        ctx.manager()?.list_testers(filter.as_ref(), out)
    }
}

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> ConfigCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::with_rules(opts, false),
        }
    }

    fn print_table(&self, ctx: &AppContext, out: &mut dyn Write) -> Result<()> {
        let rows: Vec<Vec<String>> = ctx
            .config
            .rows()
            .iter()
            .map(|(key, description, value)| vec![key.clone(), description.clone(), value.clone()])
            .collect();
        TablePrinter::new()
            .with_colored_titles(ctx.config.colored_titles())
            .render_table(
                "Configuration",
                &["KEY", "DESCRIPTION", "VALUE"],
                &rows,
                None,
                out,
            )?;
        Ok(())
    }
}
impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::Config)
    }

    fn perform(&self, ctx: &mut AppContext, out: &mut dyn Write) -> Result<()> {
        let Some(assignment) = self.core.opts.set.as_deref() else {
            return self.print_table(ctx, out);
        };
        ctx.config.set_assignment(assignment)?;
        // the running logger follows the new toggle immediately
        ctx.logger
            .set_file_logging_enabled(ctx.config.file_logging_enabled());
        if let Some((key, old, new)) = ctx.config.take_last_change() {
            ctx.logger.info(
                format!("Changed {key} from {old} to {new}"),
                LogTarget::ConsoleAndFile,
            );
        }
        Ok(())
    }
}

pub struct HelpCommand<'a> {
    core: CommandCore<'a>,
}
impl<'a> HelpCommand<'a> {
    pub fn new(opts: &'a CliOptions) -> Self {
        Self {
            core: CommandCore::new(opts, FlagPolicy::none()),
        }
    }
}
impl<'a> Command<'a> for HelpCommand<'a> {
    fn usage(&self) -> String {
        usage_for(TesterCommand::Help)
    }

    fn perform(&self, _ctx: &mut AppContext, out: &mut dyn Write) -> Result<()> {
        write!(out, "{}", overview())?;
        Ok(())
    }
}
