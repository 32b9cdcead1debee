use crate::client::DistributionClient;
use crate::client::store::FileStore;
use crate::config::Config;
use crate::core::cli::CliOptions;
use crate::errors::Result;
use crate::logging::Logger;
use crate::manager::TesterManager;
use crate::manager::report::TesterReport;
use std::fmt;
use std::path::PathBuf;

pub struct AppContext {
    pub config: Config,
    client: Option<Box<dyn DistributionClient>>,
    pub logger: Logger,
    pub logs_dir: PathBuf,
}

impl AppContext {
    /// Loads config and wires the logger. The store it points at is opened
    /// by the first command that needs it.
    pub fn from_options(opts: &CliOptions) -> Result<Self> {
        let config = Config::load_from(&opts.config_path)?;
        Ok(Self::build(config, None, opts.logs_dir.clone()))
    }

    pub fn with_client(
        config: Config,
        client: Box<dyn DistributionClient>,
        logs_dir: PathBuf,
    ) -> Self {
        Self::build(config, Some(client), logs_dir)
    }

    fn build(
        config: Config,
        client: Option<Box<dyn DistributionClient>>,
        logs_dir: PathBuf,
    ) -> Self {
        let logger = Logger::with_log_dir(&logs_dir, config.file_logging_enabled());
        Self {
            config,
            client,
            logger,
            logs_dir,
        }
    }

    pub fn report(&self) -> TesterReport {
        TesterReport::new(self.config.colored_titles())
    }

    /// Fails when the store named by the current config cannot be opened.
    pub fn manager(&mut self) -> Result<TesterManager<'_>> {
        let report = self.report();
        let client: Box<dyn DistributionClient> = match self.client.take() {
            Some(client) => client,
            None => Box::new(FileStore::open(self.config.store_path())?),
        };
        let client = self.client.insert(client);
        Ok(TesterManager::new(&mut **client, &self.logger, report))
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("logger", &self.logger)
            .field("logs_dir", &self.logs_dir)
            .finish()
    }
}
