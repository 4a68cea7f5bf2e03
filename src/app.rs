use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::api::{ApiError, FigmaApi};
use crate::cli::CliArgs;
use crate::config::{Config, ConfigError};
use crate::model::FileDocument;
use crate::output::{self, OutputError};
use crate::palette::{self, ColorMap};
use crate::prompt::{Choices, PromptError, Selector};

pub const PROJECT_PROMPT: &str = "Which project?";
pub const FILE_PROMPT: &str = "Which document contains color definitions?";

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Config(#[from] ConfigError),
  #[error(transparent)]
  Api(#[from] ApiError),
  #[error(transparent)]
  Prompt(#[from] PromptError),
  #[error(transparent)]
  Output(#[from] OutputError),
  #[error("no {0} to choose from")]
  NothingToSelect(&'static str),
  #[error("selection '{0}' does not match any listed entry")]
  UnknownChoice(String),
  #[error("file response is not a Figma document: {0}")]
  Document(#[source] serde_json::Error)
}

struct Session<'a> {
  config: Config,
  api: &'a dyn FigmaApi,
  selector: &'a dyn Selector
}

impl Session<'_> {
  fn choose(&self, message: &str, what: &'static str, choices: &Choices) -> Result<String, AppError> {
    if choices.is_empty() {
      return Err(AppError::NothingToSelect(what));
    }
    let index = self.selector.select(message, choices.labels())?;
    choices
      .resolve_index(index)
      .map(str::to_string)
      .ok_or_else(|| AppError::UnknownChoice(index.to_string()))
  }
}

pub struct App<'a, State> {
  session: Session<'a>,
  state: State
}

pub struct Configured;

pub struct ProjectSelected {
  pub project_id: String
}

pub struct FileSelected {
  pub project_id: String,
  pub file_key: String
}

pub struct Extracted {
  pub project_id: String,
  pub file_key: String,
  pub raw: Value,
  pub document: FileDocument,
  pub colors: ColorMap
}

impl<'a> App<'a, Configured> {
  pub fn new(config: Config, api: &'a dyn FigmaApi, selector: &'a dyn Selector) -> Self {
    App {
      session: Session { config, api, selector },
      state: Configured
    }
  }

  /// Uses the configured project id when there is one, otherwise lists the
  /// team's projects and asks.
  pub fn select_project(self) -> Result<App<'a, ProjectSelected>, AppError> {
    let session = self.session;

    let project_id = match &session.config.project_id {
      Some(id) => {
        debug!(project_id = %id, "project given on the command line");
        id.clone()
      }
      None => {
        output::status("Looking for projects ...");
        let projects = session.api.list_projects(&session.config.team_id, &session.config.token)?;
        debug!(count = projects.len(), "projects listed");
        let choices = Choices::new(projects.into_iter().map(|p| (p.name, p.id)));
        session.choose(PROJECT_PROMPT, "projects", &choices)?
      }
    };

    Ok(App {
      session,
      state: ProjectSelected { project_id }
    })
  }
}

impl<'a> App<'a, ProjectSelected> {
  pub fn select_file(self) -> Result<App<'a, FileSelected>, AppError> {
    let session = self.session;
    let project_id = self.state.project_id;

    let files = session.api.list_files(&project_id, &session.config.token)?;
    debug!(count = files.len(), %project_id, "files listed");
    let choices = Choices::new(files.into_iter().map(|f| (f.name, f.key)));
    let file_key = session.choose(FILE_PROMPT, "files", &choices)?;

    Ok(App {
      session,
      state: FileSelected { project_id, file_key }
    })
  }
}

impl<'a> App<'a, FileSelected> {
  pub fn extract(self) -> Result<App<'a, Extracted>, AppError> {
    let session = self.session;
    let FileSelected { project_id, file_key } = self.state;

    output::status("Reading file ...");
    let raw = session.api.get_file(&file_key, &session.config.token)?;
    let document: FileDocument = serde_json::from_value(raw.clone()).map_err(AppError::Document)?;
    let colors = palette::resolve_colors(&document);
    info!(%file_key, styles = document.styles.len(), colors = colors.len(), "colors resolved");

    Ok(App {
      session,
      state: Extracted { project_id, file_key, raw, document, colors }
    })
  }
}

impl App<'_, Extracted> {
  pub fn report(&self) -> Result<(), AppError> {
    output::print_colors(&self.state.colors, self.session.config.color)?;

    let unresolved = palette::unresolved_fill_names(&self.state.document, &self.state.colors);
    if !unresolved.is_empty() {
      println!();
      output::print_style_names(&unresolved);
    }
    Ok(())
  }

  /// Writes the raw document and the color export into `dir`.
  pub fn persist(&self, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let document = output::write_document(dir, &self.state.raw)?;
    let colors = output::export_colors(dir, &self.state.colors, self.session.config.output)?;
    Ok(vec![document, colors])
  }

  pub fn into_outcome(self, written: Vec<PathBuf>) -> Outcome {
    Outcome {
      project_id: self.state.project_id,
      file_key: self.state.file_key,
      colors: self.state.colors,
      written
    }
  }
}

#[derive(Debug)]
pub struct Outcome {
  pub project_id: String,
  pub file_key: String,
  pub colors: ColorMap,
  pub written: Vec<PathBuf>
}

/// Whole flow: configuration, project, file, colors, files on disk.
/// A configuration error returns before the API is touched.
pub fn run(args: &CliArgs, api: &dyn FigmaApi, selector: &dyn Selector, out_dir: &Path) -> Result<Outcome, AppError> {
  let config = Config::resolve(args)?;

  let app = App::new(config, api, selector)
    .select_project()?
    .select_file()?
    .extract()?;

  app.report()?;
  let written = app.persist(out_dir)?;
  Ok(app.into_outcome(written))
}
