use crate::error::MonError;
use clap::ValueEnum;
use std::path::PathBuf;

/// The parts of the process environment the tool reads, captured once at
/// startup so everything downstream stays a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub aws_profile: Option<String>,
    pub config_file: Option<PathBuf>,
    pub credentials_file: Option<PathBuf>,
    pub home_dir: Option<PathBuf>,
}

impl Environment {
    pub fn capture() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());

        Self {
            aws_profile: var("AWS_PROFILE"),
            config_file: var("AWS_CONFIG_FILE").map(PathBuf::from),
            credentials_file: var("AWS_SHARED_CREDENTIALS_FILE").map(PathBuf::from),
            home_dir: dirs::home_dir(),
        }
    }

    /// Shared config file, honouring `AWS_CONFIG_FILE`.
    pub fn aws_config_path(&self) -> Option<PathBuf> {
        let default = self.home_dir.as_ref().map(|home| home.join(".aws/config"));
        self.config_file.clone().or(default)
    }

    /// Shared credentials file, honouring `AWS_SHARED_CREDENTIALS_FILE`.
    pub fn aws_credentials_path(&self) -> Option<PathBuf> {
        let default = self
            .home_dir
            .as_ref()
            .map(|home| home.join(".aws/credentials"));
        self.credentials_file.clone().or(default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    Flag,
    Environment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    pub name: String,
    pub source: ProfileSource,
}

/// The `--profile` flag wins over `AWS_PROFILE`; with neither the run stops
/// before any API call is made.
pub fn resolve_profile(
    flag: Option<&str>,
    env: &Environment,
) -> Result<ResolvedProfile, MonError> {
    if let Some(name) = flag.filter(|name| !name.is_empty()) {
        return Ok(ResolvedProfile {
            name: name.to_string(),
            source: ProfileSource::Flag,
        });
    }

    env.aws_profile
        .as_ref()
        .map(|name| ResolvedProfile {
            name: name.clone(),
            source: ProfileSource::Environment,
        })
        .ok_or(MonError::MissingProfile)
}

/// What to do when a provider call fails on a path that can still produce
/// a useful report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Stop the run and exit non-zero.
    Abort,
    /// Print the failure into the report and carry on.
    #[value(name = "continue")]
    ReportAndContinue,
}
