use crate::core::cli::CliOptions;
use crate::errors::Error;

#[derive(Debug)]
pub enum FlagDecision {
    /// Stop execution and just print usage()
    ShortCircuitUsage,
    /// Continue command execution
    Continue,
    /// Turn into an error
    Error(Error),
}

pub trait FlagRule {
    fn check(&self, opts: &CliOptions) -> FlagDecision;
}

pub struct HelpRequested;
impl FlagRule for HelpRequested {
    fn check(&self, opts: &CliOptions) -> FlagDecision {
        if opts.help {
            FlagDecision::ShortCircuitUsage
        } else {
            FlagDecision::Continue
        }
    }
}

/// Fails with `ConfigItemMissing` when `--email` is absent or blank.
pub struct EmailRequired;
impl FlagRule for EmailRequired {
    fn check(&self, opts: &CliOptions) -> FlagDecision {
        match opts.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => FlagDecision::Continue,
            _ => FlagDecision::Error(Error::ConfigItemMissing { item: "email" }),
        }
    }
}

pub struct FlagPolicy {
    rules: Vec<Box<dyn FlagRule>>,
}
impl FlagPolicy {
    pub fn new(rules: Vec<Box<dyn FlagRule>>) -> Self {
        Self { rules }
    }
    pub fn none() -> Self {
        Self { rules: vec![] }
    }

    pub fn evaluate(&self, opts: &CliOptions) -> FlagDecision {
        // First matching short-circuit wins; otherwise Continue.
        for r in &self.rules {
            match r.check(opts) {
                FlagDecision::Continue => continue,
                other => return other,
            }
        }
        FlagDecision::Continue
    }
}
