use crate::command::command_resolver::{CommandResolver, GlobalResolver, TesterResolver};
use crate::command::commands::CommandDyn;
use crate::core::cli::CliOptions;
use crate::core::types::TesterCommand;
use crate::errors::{Error, Result};

pub struct CommandParser {
    registry: Vec<Box<dyn CommandResolver>>,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandParser {
    pub fn new() -> Self {
        Self {
            registry: vec![Box::new(TesterResolver), Box::new(GlobalResolver)],
        }
    }

    /// Resolves `opts.command`; no command at all means help.
    pub fn parse<'a>(&self, opts: &'a CliOptions) -> Result<CommandDyn<'a>> {
        let command = opts
            .command
            .as_deref()
            .unwrap_or(TesterCommand::Help.as_ref());
        for r in &self.registry {
            if r.can_resolve(command) {
                return r.resolve(command, opts);
            }
        }
        Err(Error::unknown(command))
    }
}
