/// Settings for a single parse call.
///
/// Both values only affect diagnostics: the label names the source in error
/// reports and the tab width decides how tabs count towards the reported
/// column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
  /// Name of the source, usually a file name.
  pub label: String,
  /// Distance between tab stops when computing columns. Zero is treated as one.
  pub tab_width: usize,
}

impl ParseOptions {
  /// Options with the default label `<input>` and a tab width of 4.
  pub fn new() -> Self {
    ParseOptions {
      label: "<input>".to_string(),
      tab_width: 4,
    }
  }

  /// Sets the source label used in diagnostics.
  pub fn label<S: Into<String>>(mut self, label: S) -> Self {
    self.label = label.into();
    self
  }

  /// Sets the tab stop distance used for column numbers.
  pub fn tab_width(mut self, tab_width: usize) -> Self {
    self.tab_width = tab_width;
    self
  }
}

impl Default for ParseOptions {
  fn default() -> Self {
    ParseOptions::new()
  }
}

#[cfg(test)]
mod tests {
  use super::ParseOptions;

  #[test]
  fn builder_overrides_defaults() {
    let options = ParseOptions::default().label("cube.obj").tab_width(8);
    assert_eq!(options.label, "cube.obj");
    assert_eq!(options.tab_width, 8);
    assert_eq!(ParseOptions::new().label, "<input>");
  }
}
