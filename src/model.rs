use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
  pub id: String,
  pub name: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct File {
  pub key: String,
  pub name: String
}

#[derive(Debug, Deserialize)]
pub struct ProjectsResponse {
  #[serde(default)]
  pub projects: Vec<Project>
}

#[derive(Debug, Deserialize)]
pub struct FilesResponse {
  #[serde(default)]
  pub files: Vec<File>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleType {
  Fill,
  Text,
  Effect,
  Grid,
  #[serde(other)]
  Other
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
  pub name: String,
  pub style_type: StyleType
}

/// Normalized color channels as Figma reports them, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
  pub r: f64,
  pub g: f64,
  pub b: f64,
  #[serde(default = "opaque")]
  pub a: f64
}

fn opaque() -> f64 {
  1.0
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Paint {
  #[serde(default)]
  pub color: Option<Rgba>
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleRefs {
  #[serde(default)]
  pub fill: Option<String>
}

/// A document tree entry. Anything carrying a `children` sequence is a
/// container; everything else (including nodes whose `children` is not a
/// sequence) is a leaf. Both may reference a fill style.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
  Container {
    children: Vec<Node>,
    #[serde(default)]
    styles: StyleRefs,
    #[serde(default)]
    fills: Vec<Paint>
  },
  Leaf {
    #[serde(default)]
    styles: StyleRefs,
    #[serde(default)]
    fills: Vec<Paint>
  }
}

impl Node {
  pub fn children(&self) -> &[Node] {
    match self {
      Node::Container { children, .. } => children,
      Node::Leaf { .. } => &[]
    }
  }

  pub fn fill_style(&self) -> Option<&str> {
    match self {
      Node::Container { styles, .. } | Node::Leaf { styles, .. } => styles.fill.as_deref()
    }
  }

  /// Color of the first fill entry, if that entry carries one.
  pub fn first_fill_color(&self) -> Option<Rgba> {
    match self {
      Node::Container { fills, .. } | Node::Leaf { fills, .. } => fills.first().and_then(|p| p.color)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileDocument {
  #[serde(default)]
  pub styles: IndexMap<String, Style>,
  pub document: Node
}
