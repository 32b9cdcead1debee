use crate::core::types::AppFilter;
use crate::errors::{Error, Result, require_parse};
use crate::extensions::string::SplitCsv;
use std::path::PathBuf;

/// Parsed command line: global paths, the subcommand and its options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: PathBuf,
    pub logs_dir: PathBuf,
    pub command: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub apple_id: Option<String>,
    pub app_identifier: Option<String>,
    pub groups: Option<Vec<String>>,
    pub set: Option<String>,
    pub help: bool,
}

impl CliOptions {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self>
    where
        I: Iterator<Item = String>,
    {
        let mut opts = Self::defaults();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => opts.config_path = Self::next_value(&mut args, "--config")?.into(),
                "--logs" => opts.logs_dir = Self::next_value(&mut args, "--logs")?.into(),
                "--email" | "-e" => opts.email = Some(Self::next_value(&mut args, "--email")?),
                "--first-name" => {
                    opts.first_name = Some(Self::next_value(&mut args, "--first-name")?)
                }
                "--last-name" => opts.last_name = Some(Self::next_value(&mut args, "--last-name")?),
                "--apple-id" | "-a" => {
                    opts.apple_id = Some(Self::next_value(&mut args, "--apple-id")?)
                }
                "--app-identifier" | "-i" => {
                    opts.app_identifier = Some(Self::next_value(&mut args, "--app-identifier")?)
                }
                "--groups" | "-g" => {
                    let raw = Self::next_value(&mut args, "--groups")?;
                    let groups = raw.split_csv();
                    opts.groups = (!groups.is_empty()).then_some(groups);
                }
                "--set" => opts.set = Some(Self::next_value(&mut args, "--set")?),
                "--help" | "-h" => opts.help = true,
                flag if flag.starts_with('-') => {
                    return Err(Error::Parse(format!("Unknown argument: {flag}")));
                }
                _ if opts.command.is_none() => opts.command = Some(arg),
                _ => return Err(Error::Parse(format!("Unexpected argument: {arg}"))),
            }
        }
        Ok(opts)
    }

    /// `--apple-id` wins over `--app-identifier`.
    pub fn app_filter(&self) -> Result<Option<AppFilter>> {
        self.apple_id
            .as_deref()
            .or(self.app_identifier.as_deref())
            .map(AppFilter::try_from_str)
            .transpose()
    }

    pub fn groups(&self) -> Option<&[String]> {
        self.groups.as_deref()
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String>
    where
        I: Iterator<Item = String>,
    {
        require_parse(args.next(), format!("Missing value for {flag}"))
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            logs_dir: PathBuf::from("logs"),
            ..Self::default()
        }
    }
}
