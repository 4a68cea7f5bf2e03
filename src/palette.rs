use indexmap::IndexMap;
use serde::Serialize;

use crate::model::{FileDocument, Node, Rgba, StyleType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedColor {
  pub name: String,
  pub r: f64,
  pub g: f64,
  pub b: f64,
  pub a: f64
}

impl ResolvedColor {
  fn new(name: &str, color: Rgba) -> Self {
    Self {
      name: name.to_string(),
      r: color.r,
      g: color.g,
      b: color.b,
      a: color.a
    }
  }

  /// Red, green and blue scaled into `0..=255`. Alpha is not part of the triple.
  pub fn to_rgb8(&self) -> (u8, u8, u8) {
    (scale_channel(self.r), scale_channel(self.g), scale_channel(self.b))
  }
}

fn scale_channel(v: f64) -> u8 {
  (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub type ColorMap = IndexMap<String, ResolvedColor>;

/// Depth of the first nodes that can carry a color: canvas (0) → frame (1) → item (2).
pub const ITEM_DEPTH: usize = 2;

pub trait NodeVisitor {
  fn visit(&mut self, node: &Node, depth: usize);
}

/// Pre-order walk: a node is visited before its children, siblings in order.
/// `nodes` sit at `depth`; their children at `depth + 1`.
pub fn walk(nodes: &[Node], depth: usize, visitor: &mut impl NodeVisitor) {
  for node in nodes {
    visitor.visit(node, depth);
    walk(node.children(), depth + 1, visitor);
  }
}

/// Collects the first colored fill seen for each wanted style id.
struct FirstFill<'a> {
  wanted: &'a IndexMap<&'a str, &'a str>,
  found: ColorMap
}

impl NodeVisitor for FirstFill<'_> {
  fn visit(&mut self, node: &Node, depth: usize) {
    if depth < ITEM_DEPTH {
      return;
    }
    let Some(style_id) = node.fill_style() else {
      return;
    };
    if self.found.contains_key(style_id) {
      return;
    }
    let Some(name) = self.wanted.get(style_id) else {
      return;
    };
    if let Some(color) = node.first_fill_color() {
      self.found.insert(style_id.to_string(), ResolvedColor::new(name, color));
    }
  }
}

/// Resolves every FILL style of the document to the color of the first item
/// referencing it. Canvases and frames never match. Styles nothing references
/// are left out.
pub fn resolve_colors(doc: &FileDocument) -> ColorMap {
  let wanted: IndexMap<&str, &str> = doc.styles
    .iter()
    .filter(|(_, style)| style.style_type == StyleType::Fill)
    .map(|(id, style)| (id.as_str(), style.name.as_str()))
    .collect();

  if wanted.is_empty() {
    return ColorMap::new();
  }

  let mut collector = FirstFill { wanted: &wanted, found: ColorMap::new() };
  walk(doc.document.children(), 0, &mut collector);
  collector.found
}

/// Names of the FILL styles, in registry order, that `colors` has no entry for.
pub fn unresolved_fill_names<'a>(doc: &'a FileDocument, colors: &ColorMap) -> Vec<&'a str> {
  doc.styles
    .iter()
    .filter(|(id, style)| style.style_type == StyleType::Fill && !colors.contains_key(id.as_str()))
    .map(|(_, style)| style.name.as_str())
    .collect()
}
