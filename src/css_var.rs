/// Turns a Figma style name such as `Brand/Primary 500` into a CSS custom
/// property key (`--brand-primary-500`).
pub fn css_property_name(style_name: &str) -> String {
  let body = style_name
    .split(|ch: char| ch == '.' || ch == '/' || ch.is_whitespace())
    .map(normalize_segment)
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join("-");

  format!("--{body}")
}

fn normalize_segment(s: &str) -> String {
  let mut out = String::new();
  let mut prev_was_lower_or_digit = false;

  for ch in s.chars() {
    if ch.is_alphanumeric() {
      if ch.is_uppercase() && prev_was_lower_or_digit && !out.ends_with('-') {
        out.push('-');
      }
      out.extend(ch.to_lowercase());
      prev_was_lower_or_digit = !ch.is_uppercase();
    } else {
      if !out.ends_with('-') {
        out.push('-');
      }
      prev_was_lower_or_digit = false;
    }
  }

  out.trim_matches('-').to_string()
}
