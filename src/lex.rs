//! The cursor the grammar runs on, plus the trivia rules between tokens.
//!
//! A `Cursor` is a cheap-to-clone view over a fully materialized buffer, so
//! the parser backtracks by cloning it and only committing the clone once an
//! alternative has matched. Line and column are tracked as the cursor moves
//! so a failure position never needs a second pass over the input.

/// An input position. `line` and `column` are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
  pub(crate) offset: usize,
  pub(crate) line: usize,
  pub(crate) column: usize,
}

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
  input: &'a str,
  position: Position,
  tab_width: usize,
}

/// `isspace` in the C locale.
fn is_space(c: char) -> bool {
  c == ' ' || ('\t'..='\r').contains(&c)
}

fn is_line_break(c: char) -> bool {
  c == '\n' || c == '\r'
}

impl<'a> Cursor<'a> {
  pub(crate) fn new(input: &'a str, tab_width: usize) -> Cursor<'a> {
    Cursor {
      input,
      position: Position {
        offset: 0,
        line: 1,
        column: 1,
      },
      tab_width: tab_width.max(1),
    }
  }

  pub(crate) fn position(&self) -> Position {
    self.position
  }

  /// Everything not consumed yet.
  pub(crate) fn rest(&self) -> &'a str {
    &self.input[self.position.offset..]
  }

  pub(crate) fn is_at_end(&self) -> bool {
    self.position.offset == self.input.len()
  }

  pub(crate) fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  /// Consumes one character, keeping line and column in step.
  pub(crate) fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.position.offset += c.len_utf8();

    match c {
      '\n' => self.new_line(),
      // a lone CR ends the line; in CRLF the LF does
      '\r' if self.peek() != Some('\n') => self.new_line(),
      '\r' => {}
      '\t' => {
        let column = self.position.column;
        self.position.column += self.tab_width - (column - 1) % self.tab_width;
      }
      _ => self.position.column += 1,
    }

    Some(c)
  }

  fn new_line(&mut self) {
    self.position.line += 1;
    self.position.column = 1;
  }

  /// Consumes `len` bytes. `len` must end on a character boundary.
  pub(crate) fn advance(&mut self, len: usize) {
    let target = self.position.offset + len;
    while self.position.offset < target && self.bump().is_some() {}
  }

  /// Consumes `tag` if the input continues with it.
  pub(crate) fn eat_str(&mut self, tag: &str) -> bool {
    if self.rest().starts_with(tag) {
      self.advance(tag.len());
      true
    } else {
      false
    }
  }

  /// Consumes one `\r\n`, `\n` or `\r`.
  fn eat_line_break(&mut self) -> bool {
    self.eat_str("\r\n") || self.eat_str("\n") || self.eat_str("\r")
  }

  /// Skips whitespace, `\` line continuations and `#` comments.
  pub(crate) fn skip_trivia(&mut self) {
    loop {
      match self.peek() {
        Some(c) if is_space(c) => {
          self.bump();
        }
        Some('\\') => {
          let mut probe = self.clone();
          probe.bump();
          if !probe.eat_line_break() {
            return;
          }
          *self = probe;
        }
        Some('#') => {
          while let Some(c) = self.peek() {
            if is_line_break(c) {
              break;
            }
            self.bump();
          }
          // absent at end of input
          self.eat_line_break();
        }
        _ => return,
      }
    }
  }

  /// The full line containing `position`, without its terminator.
  pub(crate) fn line_text(&self, position: Position) -> &'a str {
    let start = self.input[..position.offset]
      .rfind(is_line_break)
      .map_or(0, |i| i + 1);
    let end = self.input[position.offset..]
      .find(is_line_break)
      .map_or(self.input.len(), |i| position.offset + i);
    &self.input[start..end]
  }
}
