use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use lazy_static::lazy_static;
use serde_json::Value;
use simply_colored::*;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::css_var::css_property_name;
use crate::palette::{ColorMap, ResolvedColor};

/// Where the raw file response is written, relative to the output directory.
pub const DOCUMENT_FILE: &str = "figma-document.json";
pub const COLORS_FILE_STEM: &str = "colors";

const SWATCH: &str = "      ";

lazy_static! {
  pub static ref TEMPLATES: Tera = {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    if let Err(e) = tera.add_raw_templates(vec![
      ("COLOR_LINE", "- {{ name }}: rgba({{ r }}, {{ g }}, {{ b }}, {{ a }})"),
      ("CSS_PROPERTY", "  {{ property }}: rgba({{ r8 }}, {{ g8 }}, {{ b8 }}, {{ a }});"),
      ("CSS_SHEET", ":root {\n{% for line in lines %}{{ line }}\n{% endfor %}}\n"),
    ]) {
      panic!("built-in templates failed to parse: {e}");
    }
    tera
  };
}

#[derive(Debug, Error)]
pub enum OutputError {
  #[error("failed to render {template}: {source}")]
  Render {
    template: &'static str,
    #[source]
    source: tera::Error
  },
  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error
  },
  #[error("failed to serialize {what}: {source}")]
  Serialize {
    what: &'static str,
    #[source]
    source: serde_json::Error
  }
}

/// Channel value as typed into the `rgba(...)` text: `1` rather than `1.0`.
fn channel(v: f64) -> String {
  format!("{v}")
}

fn color_context(color: &ResolvedColor) -> Context {
  let (r8, g8, b8) = color.to_rgb8();
  let mut context = Context::new();
  context.insert("name", &color.name);
  context.insert("property", &css_property_name(&color.name));
  context.insert("r", &channel(color.r));
  context.insert("g", &channel(color.g));
  context.insert("b", &channel(color.b));
  context.insert("a", &channel(color.a));
  context.insert("r8", &r8);
  context.insert("g8", &g8);
  context.insert("b8", &b8);
  context
}

fn render(template: &'static str, context: &Context) -> Result<String, OutputError> {
  TEMPLATES.render(template, context)
    .map_err(|source| OutputError::Render { template, source })
}

pub fn color_line(color: &ResolvedColor) -> Result<String, OutputError> {
  render("COLOR_LINE", &color_context(color))
}

fn truecolor_fg(hex: u32, text: &str) -> String {
  let (r, g, b) = ((hex >> 16) & 0xff, (hex >> 8) & 0xff, hex & 0xff);
  format!("\x1b[1;38;2;{r};{g};{b}m{text}\x1b[0m")
}

/// A block of background color. Alpha is ignored; terminals have no notion of it.
pub fn swatch(color: &ResolvedColor, enabled: bool) -> String {
  if !enabled {
    return String::new();
  }
  let (r, g, b) = color.to_rgb8();
  format!("\x1b[48;2;{r};{g};{b}m{SWATCH}\x1b[0m")
}

pub fn banner(color: bool) -> String {
  let letters = [
    (0xf0441c, "F"),
    (0xff6658, "I"),
    (0x974fff, "G"),
    (0x17b4fe, "M"),
    (0x0ec878, "A")
  ];

  let name: String = if color {
    letters.iter().map(|(hex, l)| truecolor_fg(*hex, l)).collect()
  } else {
    letters.iter().map(|(_, l)| *l).collect()
  };

  format!("\n\n  Welcome to the {name} CLI\n\n")
}

/// OSC 8 terminal link to a written file, labelled with its path.
pub fn file_link(path: &Path) -> String {
  let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
  format!("\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\", target.display(), path.display())
}

pub fn print_written(paths: &[PathBuf], color: bool) {
  println!();
  for path in paths {
    if color {
      println!("  {DIM_YELLOW}Saved {RESET}{BOLD}{}{RESET}", file_link(path));
    } else {
      println!("  Saved {}", path.display());
    }
  }
}

pub fn status(message: &str) {
  println!("  {message}\n");
}

pub fn print_colors(colors: &ColorMap, color: bool) -> Result<(), OutputError> {
  println!("  Colors:");
  for resolved in colors.values() {
    let line = color_line(resolved)?;
    if color {
      println!("    {line} {}", swatch(resolved, true));
    } else {
      println!("    {line}");
    }
  }
  Ok(())
}

pub fn print_style_names(names: &[&str]) {
  println!("  {DIM_YELLOW}FILL styles without a matching node:{RESET}");
  for name in names {
    println!("    - {name}");
  }
}

fn write(path: PathBuf, contents: &str) -> Result<PathBuf, OutputError> {
  fs::write(&path, contents).map_err(|source| OutputError::Write { path: path.clone(), source })?;
  Ok(path)
}

pub fn write_document(dir: &Path, document: &Value) -> Result<PathBuf, OutputError> {
  let json = serde_json::to_string_pretty(document)
    .map_err(|source| OutputError::Serialize { what: "document", source })?;
  write(dir.join(DOCUMENT_FILE), &json)
}

/// Custom property names produced by more than one color, each listed once.
pub fn clashing_properties(colors: &ColorMap) -> Vec<String> {
  colors
    .values()
    .map(|c| css_property_name(&c.name))
    .duplicates()
    .collect()
}

pub fn render_css(colors: &ColorMap) -> Result<String, OutputError> {
  for property in clashing_properties(colors) {
    warn!(%property, "several styles map to the same custom property, the last one wins in CSS");
  }

  let lines = colors
    .values()
    .map(|c| render("CSS_PROPERTY", &color_context(c)))
    .collect::<Result<Vec<_>, _>>()?;

  let mut context = Context::new();
  context.insert("lines", &lines);
  render("CSS_SHEET", &context)
}

pub fn export_colors(dir: &Path, colors: &ColorMap, format: OutputFormat) -> Result<PathBuf, OutputError> {
  let contents = match format {
    OutputFormat::Json => serde_json::to_string_pretty(colors)
      .map_err(|source| OutputError::Serialize { what: "colors", source })?,
    OutputFormat::Css => render_css(colors)?
  };
  let path = dir.join(format!("{COLORS_FILE_STEM}.{}", format.extension()));
  write(path, &contents)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn red() -> ResolvedColor {
    ResolvedColor { name: "Brand/Red".into(), r: 1.0, g: 0.0, b: 0.0, a: 1.0 }
  }

  #[test]
  fn color_line_uses_raw_channels() {
    assert_eq!(color_line(&red()).unwrap(), "- Brand/Red: rgba(1, 0, 0, 1)");

    let half = ResolvedColor { name: "Ghost".into(), r: 0.5, g: 0.25, b: 0.125, a: 0.5 };
    assert_eq!(color_line(&half).unwrap(), "- Ghost: rgba(0.5, 0.25, 0.125, 0.5)");
  }

  #[test]
  fn swatch_scales_to_eight_bits() {
    assert_eq!(swatch(&red(), true), "\x1b[48;2;255;0;0m      \x1b[0m");
    assert_eq!(swatch(&red(), false), "");
  }

  #[test]
  fn banner_without_color_is_plain() {
    assert!(banner(false).contains("Welcome to the FIGMA CLI"));
  }

  #[test]
  fn css_export_uses_custom_properties() {
    let mut colors = ColorMap::new();
    colors.insert("S1".into(), red());
    let css = render_css(&colors).unwrap();
    assert!(css.starts_with(":root {\n  --brand-red: rgba(255, 0, 0, 1);\n}"), "{css}");
  }

  #[test]
  fn clashing_style_names_are_detected() {
    let mut colors = ColorMap::new();
    colors.insert("S1".into(), red());
    colors.insert("S2".into(), ResolvedColor { name: "brand red".into(), ..red() });
    colors.insert("S3".into(), ResolvedColor { name: "Grün".into(), ..red() });
    colors.insert("S4".into(), ResolvedColor { name: "Grau".into(), ..red() });

    assert_eq!(clashing_properties(&colors), ["--brand-red"]);
    let css = render_css(&colors).unwrap();
    assert!(css.contains("--grün: rgba(255, 0, 0, 1);"), "{css}");
  }

  #[test]
  fn writes_document_and_colors() {
    let dir = tempfile::tempdir().unwrap();
    let doc = json!({ "name": "Colors", "document": { "children": [] } });

    let doc_path = write_document(dir.path(), &doc).unwrap();
    assert_eq!(doc_path.file_name().unwrap(), DOCUMENT_FILE);
    let written: Value = serde_json::from_str(&fs::read_to_string(&doc_path).unwrap()).unwrap();
    assert_eq!(written, doc);

    let mut colors = ColorMap::new();
    colors.insert("S1".into(), red());
    let colors_path = export_colors(dir.path(), &colors, OutputFormat::Json).unwrap();
    assert_eq!(colors_path.file_name().unwrap(), "colors.json");
    let exported: Value = serde_json::from_str(&fs::read_to_string(&colors_path).unwrap()).unwrap();
    assert_eq!(exported["S1"]["name"], "Brand/Red");
    assert_eq!(exported["S1"]["r"], 1.0);
  }

  #[test]
  fn write_failures_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = write_document(&missing, &json!({})).unwrap_err();
    assert!(err.to_string().contains("figma-document.json"));
  }
}
