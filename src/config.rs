use core::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::cli::{CliArgs, OutputFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValue {
  Token,
  Team
}

impl MissingValue {
  pub fn label(&self) -> &'static str {
    match self {
      MissingValue::Token => "token",
      MissingValue::Team => "team id"
    }
  }

  /// One-line hint telling the user how to supply the value.
  pub fn guidance(&self) -> &'static str {
    match self {
      MissingValue::Token => "No Figma token given. Pass one with --token <token> or set FIGMA_TOKEN.",
      MissingValue::Team => "No Figma team id given. Pass one with --team <id> or set FIGMA_TEAM_ID."
    }
  }
}

impl fmt::Display for MissingValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.guidance())
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("missing required configuration: {}", .0.iter().map(MissingValue::label).join(", "))]
  Missing(Vec<MissingValue>)
}

/// Settings for one run. Built once from the command line and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub token: String,
  pub team_id: String,
  pub project_id: Option<String>,
  pub output: OutputFormat,
  pub api_url: String,
  pub color: bool
}

impl Config {
  pub fn resolve(args: &CliArgs) -> Result<Self, ConfigError> {
    let token = present(&args.token);
    let team_id = present(&args.team);

    let mut missing = Vec::new();
    if token.is_none() {
      missing.push(MissingValue::Token);
    }
    if team_id.is_none() {
      missing.push(MissingValue::Team);
    }

    match (token, team_id) {
      (Some(token), Some(team_id)) => Ok(Config {
        token,
        team_id,
        project_id: present(&args.project),
        output: args.output,
        api_url: args.api_url.trim_end_matches('/').to_string(),
        color: !args.no_color
      }),
      _ => Err(ConfigError::Missing(missing))
    }
  }
}

fn present(value: &Option<String>) -> Option<String> {
  value.as_deref()
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string)
}
