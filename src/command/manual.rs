use std::collections::HashMap;

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::core::types::TesterCommand;

struct ManualEntry {
    synopsis: &'static str,
    summary: &'static str,
    options: &'static [&'static str],
}

const APP_OPTIONS: [&str; 2] = [
    "-a, --apple-id <ID>            Numeric Apple ID of the app",
    "-i, --app-identifier <BUNDLE>  Bundle identifier of the app",
];

static MANUAL: Lazy<HashMap<TesterCommand, ManualEntry>> = Lazy::new(|| {
    HashMap::from([
        (
            TesterCommand::Add,
            ManualEntry {
                synopsis: "add --email <EMAIL> [--first-name <NAME>] [--last-name <NAME>] (--apple-id <ID> | --app-identifier <BUNDLE>) [--groups <G1,G2>]",
                summary: "Invite a tester (or reuse an existing one) and add them to groups of an app.",
                options: &[
                    "-e, --email <EMAIL>            Tester email",
                    "    --first-name <NAME>        First name for a new tester",
                    "    --last-name <NAME>         Last name for a new tester",
                    APP_OPTIONS[0],
                    APP_OPTIONS[1],
                    "-g, --groups <G1,G2>           Groups to join (default group when omitted)",
                ],
            },
        ),
        (
            TesterCommand::Find,
            ManualEntry {
                synopsis: "find --email <EMAIL>",
                summary: "Show everything known about a tester.",
                options: &["-e, --email <EMAIL>            Tester email"],
            },
        ),
        (
            TesterCommand::Remove,
            ManualEntry {
                synopsis: "remove --email <EMAIL> [--apple-id <ID> | --app-identifier <BUNDLE>] [--groups <G1,G2>]",
                summary: "Remove a tester from groups of an app, from an app, or (without an app) from the account.",
                options: &[
                    "-e, --email <EMAIL>            Tester email",
                    APP_OPTIONS[0],
                    APP_OPTIONS[1],
                    "-g, --groups <G1,G2>           Groups to leave",
                ],
            },
        ),
        (
            TesterCommand::List,
            ManualEntry {
                synopsis: "list [--apple-id <ID> | --app-identifier <BUNDLE>]",
                summary: "List internal and external testers of an app, or of the whole team.",
                options: &[APP_OPTIONS[0], APP_OPTIONS[1]],
            },
        ),
        (
            TesterCommand::Config,
            ManualEntry {
                synopsis: "config [--set KEY=VALUE]",
                summary: "Show the configuration, or change one item.",
                options: &["    --set KEY=VALUE            Update a configuration item"],
            },
        ),
        (
            TesterCommand::Help,
            ManualEntry {
                synopsis: "help",
                summary: "Show the available commands.",
                options: &[],
            },
        ),
    ])
});

/// Usage text for one command.
pub fn usage_for(command: TesterCommand) -> String {
    let Some(entry) = MANUAL.get(&command) else {
        return format!("Usage: pilot {command}");
    };
    let mut s = format!("Usage: pilot {}\n\n{}\n", entry.synopsis, entry.summary);
    if !entry.options.is_empty() {
        s.push_str("\nOptions:\n");
        for line in entry.options {
            s.push_str("  ");
            s.push_str(line);
            s.push('\n');
        }
    }
    s
}

/// One line per command plus the global flags.
pub fn overview() -> String {
    let mut s = String::from("Usage: pilot [--config <PATH>] [--logs <DIR>] <COMMAND> [OPTIONS]\n\nCommands:\n");
    for command in TesterCommand::iter() {
        if let Some(entry) = MANUAL.get(&command) {
            s.push_str(&format!("  {:<8} {}\n", command.to_string(), entry.summary));
        }
    }
    s.push_str("\nRun `pilot <COMMAND> --help` for the options of a command.\n");
    s
}
