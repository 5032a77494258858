use crate::errors::{AppError, AppResult};
use crate::github::DEFAULT_API_URL;
use crate::storage::{DEFAULT_OUTPUT_FILE, resolve_output_path};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::process::Command;

/// Values given explicitly on the command line. They win over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub user: Option<String>,
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub output_file: Option<String>,
    pub input: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    GitHub {
        user: String,
        token: String,
        api_url: String,
    },
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: Source,
    pub output_path: PathBuf,
    pub today: Option<NaiveDate>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env(overrides: Overrides) -> AppResult<Self> {
        Self::resolve(overrides, |key| std::env::var(key).ok(), git_config_value)
    }

    /// Resolves settings as explicit override, then `env`, then `git config`.
    pub fn resolve<E, G>(overrides: Overrides, env: E, git: G) -> AppResult<Self>
    where
        E: Fn(&str) -> Option<String>,
        G: Fn(&str) -> Option<String>,
    {
        let lookup = |explicit: Option<String>, keys: &[&str]| {
            explicit
                .or_else(|| keys.iter().find_map(|&key| env(key)))
                .filter(|value| !value.trim().is_empty())
        };

        let source = match overrides.input {
            Some(path) => Source::File(path),
            None => {
                let user = lookup(overrides.user, &["GITHUB_USERNAME"])
                    .or_else(|| git("user.name"))
                    .ok_or_else(|| {
                        AppError::config(
                            "no user given; pass --user, set GITHUB_USERNAME, or set git user.name",
                        )
                    })?;
                let token = lookup(overrides.token, &["TOKEN", "GITHUB_TOKEN"]).ok_or_else(|| {
                    AppError::config("no access token; pass --token or set TOKEN")
                })?;
                let api_url = lookup(overrides.api_url, &["GITHUB_GRAPHQL_URL"])
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string());
                Source::GitHub {
                    user,
                    token,
                    api_url,
                }
            }
        };

        let output_dir = overrides
            .output_dir
            .or_else(|| env("OUTPUT_DIR").map(PathBuf::from));
        let output_file = lookup(overrides.output_file, &["OUTPUT_FILE"])
            .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());

        Ok(Self {
            source,
            output_path: resolve_output_path(output_dir.as_deref(), &output_file),
            today: overrides.today,
            seed: overrides.seed,
        })
    }
}

fn git_config_value(key: &str) -> Option<String> {
    let output = Command::new("git").args(["config", key]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8(output.stdout).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
