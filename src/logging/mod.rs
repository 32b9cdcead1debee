
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Local;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

impl LogLevel {
    /// Warnings and errors go to stderr, everything else to stdout.
    fn is_failure(self) -> bool {
        matches!(self, LogLevel::Warn | LogLevel::Error)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Info => "INFO",
            LogLevel::Success => "OK",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        f.pad(label)
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub enum LogTarget {
    ConsoleOnly,
    #[default]
    ConsoleAndFile,
    FileOnly,
}

impl LogTarget {
    fn console(self) -> bool {
        matches!(self, LogTarget::ConsoleOnly | LogTarget::ConsoleAndFile)
    }

    fn file(self) -> bool {
        matches!(self, LogTarget::ConsoleAndFile | LogTarget::FileOnly)
    }
}

/// Session file, opened on the first file-targeted line.
enum SessionFile {
    Pending { dir: PathBuf },
    Open { dir: PathBuf, path: PathBuf, file: File },
    Unavailable { dir: PathBuf },
}

impl SessionFile {
    fn dir(&self) -> &Path {
        match self {
            SessionFile::Pending { dir }
            | SessionFile::Open { dir, .. }
            | SessionFile::Unavailable { dir } => dir,
        }
    }

    fn open(dir: &Path) -> std::io::Result<(PathBuf, File)> {
        fs::create_dir_all(dir)?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let path = dir.join(format!("session-{stamp}.log"));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok((path, file))
    }

    /// Opens the file if still pending. One attempt per session.
    fn writer(&mut self) -> Option<&mut File> {
        if let SessionFile::Pending { dir } = self {
            let dir = std::mem::take(dir);
            *self = match Self::open(&dir) {
                Ok((path, file)) => SessionFile::Open { dir, path, file },
                Err(err) => {
                    eprintln!(
                        "WARN: File logging unavailable; continuing without a log file. ({err})"
                    );
                    SessionFile::Unavailable { dir }
                }
            };
        }
        match self {
            SessionFile::Open { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Console plus session-file logger. Clones share the same file.
#[derive(Clone)]
pub struct Logger {
    session: Arc<Mutex<SessionFile>>,
    file_enabled: Arc<AtomicBool>,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            session: Arc::new(Mutex::new(SessionFile::Pending {
                dir: PathBuf::from("logs"),
            })),
            file_enabled: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logger that writes its session file under `dir` (created on first use).
    pub fn with_log_dir(dir: impl AsRef<Path>, file_enabled: bool) -> Self {
        let logger = Self::default();
        logger.set_log_dir(dir);
        logger.set_file_logging_enabled(file_enabled);
        logger
    }

    fn log(&self, level: LogLevel, message: &str, target: LogTarget) {
        if target.console() {
            if level.is_failure() {
                eprintln!("{message}");
            } else {
                println!("{message}");
            }
        }

        if target.file() && self.file_logging_enabled() {
            let Ok(mut session) = self.session.lock() else {
                return;
            };
            if let Some(file) = session.writer() {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "[{timestamp}] {level:<5} {message}");
            }
        }
    }

    pub fn info(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Info, message.as_ref(), target);
    }

    pub fn success(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Success, message.as_ref(), target);
    }

    pub fn warn(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Warn, message.as_ref(), target);
    }

    pub fn error(&self, message: impl AsRef<str>, target: LogTarget) {
        self.log(LogLevel::Error, message.as_ref(), target);
    }

    pub fn set_file_logging_enabled(&self, enabled: bool) {
        self.file_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.file_enabled.load(Ordering::SeqCst)
    }

    /// Ignored once a session file has been opened (or failed to open).
    pub fn set_log_dir(&self, dir: impl AsRef<Path>) {
        if let Ok(mut session) = self.session.lock() {
            if let SessionFile::Pending { dir: current } = &mut *session {
                *current = dir.as_ref().to_path_buf();
            }
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.session.lock().ok().map(|s| s.dir().to_path_buf())
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        let session = self.session.lock().ok()?;
        match &*session {
            SessionFile::Open { path, .. } => Some(path.clone()),
            _ => None,
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("log_dir", &self.log_dir())
            .field("log_path", &self.log_path())
            .field("file_enabled", &self.file_logging_enabled())
            .finish()
    }
}
