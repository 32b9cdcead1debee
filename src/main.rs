use std::io::{self, Write};

use anyhow::Context;
use pilot::command::command_parser::CommandParser;
use pilot::core::cli::CliOptions;
use pilot::core::context::AppContext;
use pilot::logging::LogTarget;

fn bootstrap() -> anyhow::Result<(CliOptions, AppContext)> {
    let opts = CliOptions::from_env().context("Invalid command line")?;
    let ctx = AppContext::from_options(&opts).with_context(|| {
        format!("Could not load config '{}'", opts.config_path.display())
    })?;
    Ok((opts, ctx))
}

fn main() {
    let (opts, mut ctx) = match bootstrap() {
        Ok(parts) => parts,
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = CommandParser::new()
        .parse(&opts)
        .and_then(|cmd| cmd.execute(&mut ctx, &mut out))
        .and_then(|()| out.flush().map_err(Into::into));

    if let Err(err) = result {
        ctx.logger.error(format!("{err}"), LogTarget::ConsoleAndFile);
        std::process::exit(1);
    }
}
