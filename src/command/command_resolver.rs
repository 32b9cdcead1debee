use crate::command::commands::{
    AddCommand, CommandDyn, ConfigCommand, FindCommand, HelpCommand, ListCommand, RemoveCommand,
};
use crate::core::cli::CliOptions;
use crate::core::types::TesterCommand;
use crate::errors::{Error, Result};

pub trait CommandResolver {
    fn can_resolve(&self, command: &str) -> bool;
    fn resolve<'a>(&self, command: &str, opts: &'a CliOptions) -> Result<CommandDyn<'a>>;
}

/// Commands that act on testers through the manager.
pub struct TesterResolver;

impl CommandResolver for TesterResolver {
    fn can_resolve(&self, command: &str) -> bool {
        matches!(
            TesterCommand::try_from(command),
            Ok(TesterCommand::Add | TesterCommand::Find | TesterCommand::Remove | TesterCommand::List)
        )
    }

    fn resolve<'a>(&self, command: &str, opts: &'a CliOptions) -> Result<CommandDyn<'a>> {
        Ok(match TesterCommand::try_from(command)? {
            TesterCommand::Add => Box::new(AddCommand::new(opts)),
            TesterCommand::Find => Box::new(FindCommand::new(opts)),
            TesterCommand::Remove => Box::new(RemoveCommand::new(opts)),
            TesterCommand::List => Box::new(ListCommand::new(opts)),
            _ => return Err(Error::unknown(command)),
        })
    }
}

pub struct GlobalResolver;

impl CommandResolver for GlobalResolver {
    fn can_resolve(&self, command: &str) -> bool {
        matches!(
            TesterCommand::try_from(command),
            Ok(TesterCommand::Config | TesterCommand::Help)
        )
    }

    fn resolve<'a>(&self, command: &str, opts: &'a CliOptions) -> Result<CommandDyn<'a>> {
        Ok(match TesterCommand::try_from(command)? {
            TesterCommand::Config => Box::new(ConfigCommand::new(opts)),
            TesterCommand::Help => Box::new(HelpCommand::new(opts)),
            _ => return Err(Error::unknown(command)),
        })
    }
}
