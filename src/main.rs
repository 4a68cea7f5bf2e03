use std::path::Path;
use std::process;

use clap::Parser;
use simply_colored::*;
use tracing_subscriber::EnvFilter;

use figma_colors::api::HttpClient;
use figma_colors::config::ConfigError;
use figma_colors::output;
use figma_colors::prompt::DialoguerSelector;
use figma_colors::{run, AppError, CliArgs};

fn init_tracing(verbose: bool) {
  let default = if verbose { "figma_colors=debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let args = CliArgs::parse();
  init_tracing(args.verbose);

  let color = !args.no_color;
  print!("{}", output::banner(color));

  let client = match HttpClient::new(&args.api_url) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("{RED}{e}{RESET}");
      process::exit(1);
    }
  };
  let selector = DialoguerSelector::new();

  match run(&args, &client, &selector, Path::new(".")) {
    Ok(outcome) => output::print_written(&outcome.written, color),
    Err(AppError::Config(ConfigError::Missing(missing))) => {
      for value in missing {
        eprintln!("{RED}{value}{RESET}");
      }
      process::exit(-1);
    }
    Err(e) => {
      eprintln!("{RED}{e}{RESET}");
      process::exit(1);
    }
  }
}
