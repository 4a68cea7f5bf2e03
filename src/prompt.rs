use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PromptError {
  #[error("prompt failed: {0}")]
  Io(#[from] dialoguer::Error),
  #[error("selection cancelled")]
  Cancelled
}

/// Single-select over a fixed list, returning the index picked.
pub trait Selector {
  fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError>;
}

pub fn figma_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

pub struct DialoguerSelector {
  theme: ColorfulTheme
}

impl DialoguerSelector {
  pub fn new() -> Self {
    Self { theme: figma_theme() }
  }
}

impl Default for DialoguerSelector {
  fn default() -> Self {
    Self::new()
  }
}

impl Selector for DialoguerSelector {
  fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
    Select::with_theme(&self.theme)
      .with_prompt(message)
      .items(items)
      .default(0)
      .interact_opt()?
      .ok_or(PromptError::Cancelled)
  }
}

/// Names shown to the user plus the name → id lookup used to resolve the pick.
///
/// Every name is listed in the order received. When two entries share a
/// name the last one wins the lookup.
#[derive(Debug, Clone, Default)]
pub struct Choices {
  labels: Vec<String>,
  by_name: IndexMap<String, String>
}

impl Choices {
  pub fn new<I, N, K>(entries: I) -> Self
  where
    I: IntoIterator<Item = (N, K)>,
    N: Into<String>,
    K: Into<String>
  {
    let mut choices = Choices::default();
    for (name, id) in entries {
      let name = name.into();
      choices.labels.push(name.clone());
      choices.by_name.insert(name, id.into());
    }

    for dup in choices.labels.iter().duplicates() {
      warn!(name = %dup, "duplicate name in list, the last entry will be used");
    }

    choices
  }

  pub fn labels(&self) -> &[String] {
    &self.labels
  }

  pub fn is_empty(&self) -> bool {
    self.labels.is_empty()
  }

  pub fn resolve(&self, name: &str) -> Option<&str> {
    self.by_name.get(name).map(String::as_str)
  }

  /// Id behind the label at `index`, as returned by a [`Selector`].
  pub fn resolve_index(&self, index: usize) -> Option<&str> {
    self.labels.get(index).and_then(|name| self.resolve(name))
  }
}
