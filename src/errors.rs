use thiserror::Error;

// Re-export a simple Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure the tester commands can surface.
#[derive(Error, Debug)]
pub enum Error {
    // ---- Parsing & Routing --------------------------------------------------
    /// Bad command-line options or config values.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No resolver matched the command name (CommandParser).
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // ---- Service / Domain ---------------------------------------------------
    /// An app or tester could not be resolved. The message is shown as-is.
    #[error("{0}")]
    NotFound(String),

    /// The account may not perform the request (team-wide listing).
    #[error("{0}")]
    Permission(String),

    /// A mutating call against the distribution service failed.
    #[error("Remote operation failed: {0}")]
    Remote(String),

    // ---- Config -------------------------------------------------------------
    /// Any issue reading or writing the config file.
    #[error("Config error: {0}")]
    Config(String),

    /// A required option or config item was not supplied.
    #[error("Missing configuration item: {item}")]
    ConfigItemMissing { item: &'static str },

    // ---- Plumbing / Wrappers ------------------------------------------------
    /// IO passthrough (store file, log file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde JSON passthrough (store document encode/decode).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ----------------------- Convenience constructors ----------------------------

impl Error {
    /// Helper to create a parse error from any displayable value.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }
    /// Helper to create a generic config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
    /// Helper for unknown command.
    pub fn unknown<S: Into<String>>(cmd: S) -> Self {
        Error::UnknownCommand(cmd.into())
    }
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Error::NotFound(msg.into())
    }
    pub fn remote<S: Into<String>>(msg: S) -> Self {
        Error::Remote(msg.into())
    }
}

// ----------------------- Small result helpers --------------------------------

/// Map an `Option<T>` into `Result<T, Error::Parse>` with a custom message.
pub fn require_parse<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::Parse(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::NotFound>` with a custom message.
pub fn require_found<T, S: Into<String>>(opt: Option<T>, msg: S) -> Result<T> {
    opt.ok_or_else(|| Error::NotFound(msg.into()))
}

/// Map an `Option<T>` into `Result<T, Error::ConfigItemMissing>` with a static key.
pub fn require_config_item<T>(opt: Option<T>, item: &'static str) -> Result<T> {
    opt.ok_or_else(|| Error::ConfigItemMissing { item })
}
