use std::fmt;
use std::io;

use thiserror::Error;

use crate::obj::RecordKind;

/// What went wrong during a parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
  /// A record keyword was matched but a mandatory real number did not follow.
  #[error("expected a real number in `{0}` record")]
  ExpectedReal(RecordKind),
  /// A record keyword was matched but a mandatory integer index did not follow.
  #[error("expected an integer index in `{0}` record")]
  ExpectedInteger(RecordKind),
  /// No record matched at this position and the input is not exhausted.
  #[error("expected a record or end of input")]
  TrailingInput,
}

/// Where a parse failed, resolved to human-readable coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
  /// Source label, see [`ParseOptions::label`](crate::ParseOptions).
  pub file: String,
  /// 1-based line number.
  pub line: usize,
  /// 1-based column number, with tabs expanded to the configured tab stops.
  pub column: usize,
  /// Full text of the offending line, without its terminator.
  pub line_text: String,
}

impl Location {
  /// 0-based offset of the caret within the rendered line.
  pub fn caret_offset(&self) -> usize {
    self.column.saturating_sub(1)
  }

  /// Renders the three-line report: header, quoted source line, caret.
  pub fn render(&self) -> String {
    format!(
      "Parse error at file '{}' line {} column {}\n'{}'\n{}^- here",
      self.file,
      self.line,
      self.column,
      self.line_text,
      // one extra space for the opening quote
      " ".repeat(self.caret_offset() + 1),
    )
  }
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "file '{}' line {} column {}", self.file, self.line, self.column)
  }
}

/// A positioned parse failure. There is at most one per parse call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("parse error at {location}: {kind}")]
pub struct ParseError {
  /// The failure category.
  pub kind: ErrorKind,
  /// The failure position.
  pub location: Location,
}

impl ParseError {
  /// Renders the failure together with the source line and a caret.
  pub fn render(&self) -> String {
    format!("{}\n{}", self.location.render(), self.kind)
  }
}

/// Errors from [`parse_reader`](crate::parse_reader), which also does I/O.
#[derive(Debug, Error)]
pub enum Error {
  /// Reading the source failed.
  #[error("I/O error: {0}")]
  Io(#[from] io::Error),
  /// The source was read but does not parse.
  #[error(transparent)]
  Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
  use super::*;

  fn location() -> Location {
    Location {
      file: "local".to_string(),
      line: 3,
      column: 7,
      line_text: "vn 1 2".to_string(),
    }
  }

  #[test]
  fn render_points_caret_at_column() {
    let rendered = location().render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Parse error at file 'local' line 3 column 7");
    assert_eq!(lines[1], "'vn 1 2'");
    assert_eq!(lines[2], "       ^- here");
    // the caret sits under the character at `column` of the quoted line
    assert_eq!(lines[2].find('^'), Some(location().column));
  }

  #[test]
  fn display_includes_kind() {
    let err = ParseError {
      kind: ErrorKind::ExpectedReal(RecordKind::Normal),
      location: location(),
    };
    assert_eq!(
      err.to_string(),
      "parse error at file 'local' line 3 column 7: expected a real number in `vn` record"
    );
    assert!(err.render().ends_with("expected a real number in `vn` record"));
  }
}
