use clap::{ArgAction, Parser, ValueEnum};

pub const DEFAULT_API_URL: &str = "https://api.figma.com";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Json,
  Css
}

impl OutputFormat {
  pub fn extension(&self) -> &'static str {
    match self {
      OutputFormat::Json => "json",
      OutputFormat::Css => "css"
    }
  }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "figma", about, version, disable_version_flag = true)]
pub struct CliArgs {
  #[arg(short = 'v', long = "version", action = ArgAction::Version, help = "Print version")]
  pub(crate) version: Option<bool>,

  #[arg(long, alias = "to", env = "FIGMA_TOKEN", value_name = "TOKEN", help = "Add a Figma token")]
  pub token: Option<String>,

  #[arg(short = 't', long, env = "FIGMA_TEAM_ID", value_name = "ID", help = "Add a Figma team id")]
  pub team: Option<String>,

  #[arg(short = 'p', long, value_name = "ID", help = "Add a Figma project id")]
  pub project: Option<String>,

  #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json, help = "Output format type")]
  pub output: OutputFormat,

  #[arg(long = "api-url", env = "FIGMA_API_URL", default_value = DEFAULT_API_URL, hide = true)]
  pub api_url: String,

  #[arg(long, default_value_t = false)]
  pub verbose: bool,

  #[arg(long = "no-color", default_value_t = false)]
  pub no_color: bool
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::CommandFactory;

  #[test]
  fn command_is_well_formed() {
    CliArgs::command().debug_assert();
  }

  #[test]
  fn parses_short_flags() {
    let args = CliArgs::try_parse_from(["figma", "--token", "abc", "-t", "42", "-p", "7", "-o", "css"]).unwrap();
    assert_eq!(args.token.as_deref(), Some("abc"));
    assert_eq!(args.team.as_deref(), Some("42"));
    assert_eq!(args.project.as_deref(), Some("7"));
    assert_eq!(args.output, OutputFormat::Css);
  }

  #[test]
  fn token_accepts_the_to_alias() {
    let args = CliArgs::try_parse_from(["figma", "--to", "abc", "--team", "1"]).unwrap();
    assert_eq!(args.token.as_deref(), Some("abc"));
  }

  #[test]
  fn rejects_unknown_output_format() {
    assert!(CliArgs::try_parse_from(["figma", "-o", "xml"]).is_err());
  }
}
