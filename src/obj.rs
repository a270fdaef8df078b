//! Data model and grammar for the `.obj` polygon-mesh format.
//!
//! The grammar is a recursive-descent parser over a backtracking cursor.
//! Records are grouped into blocks of the same kind; blocks are tried in the
//! fixed order vertex, normal, texture coordinate, face. Once a record keyword
//! has matched, its mandatory fields are required and a missing one aborts the
//! whole parse with a positioned [`ParseError`].
use std::cmp::Ordering;
use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::context::Context;
use crate::error::{Error, ErrorKind, Location, ParseError};
use crate::lex::{Cursor, Position};
use crate::options::ParseOptions;
use crate::util::OrderingExt;

/// A geometric vertex. `w` is 1.0 unless the record gives it.
///
/// Equality is fuzzy (within 1e-5 per field), and a NaN field never compares
/// equal, so a vertex holding NaN is not equal to itself.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub struct Vertex {
  pub x: f64,
  pub y: f64,
  pub z: f64,
  pub w: f64,
}

/// A vertex normal. Compared like [`Vertex`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub struct Normal {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

/// A texture coordinate. `w` is 0.0 unless the record gives it. Compared
/// like [`Vertex`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug)]
pub struct TexCoord {
  pub u: f64,
  pub v: f64,
  pub w: f64,
}

/// One corner of a face, as written `v`, `v/vn`, `v//vt` or `v/vn/vt`.
///
/// The integer after the first `/` lands in `vn` and the one after the second
/// `/` in `vt`. Absent fields are 0. Indices are stored as written, without
/// checking that they refer to existing records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndexTriple {
  /// Vertex reference.
  pub v: i32,
  /// Reference written in the second slot.
  pub vn: i32,
  /// Reference written in the third slot.
  pub vt: i32,
}

/// A polygon with at least three corners. Never triangulated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Face {
  indices: Vec<IndexTriple>,
}

impl Face {
  /// Builds a face, or `None` if fewer than three corners are given.
  pub fn new(indices: Vec<IndexTriple>) -> Option<Face> {
    if indices.len() < 3 {
      None
    } else {
      Some(Face { indices })
    }
  }

  /// The corners in file order.
  pub fn indices(&self) -> &[IndexTriple] {
    &self.indices
  }
}

/// Everything a document defines, each list in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
  /// `v` records.
  pub vertices: Vec<Vertex>,
  /// `vn` records.
  pub normals: Vec<Normal>,
  /// `vt` records.
  pub tex_coords: Vec<TexCoord>,
  /// `f` records.
  pub faces: Vec<Face>,
}

/// The record kinds, named after their keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
  /// `v`
  Vertex,
  /// `vn`
  Normal,
  /// `vt`
  TexCoord,
  /// `f`
  Face,
}

impl RecordKind {
  /// The keyword that starts a record of this kind.
  pub fn keyword(self) -> &'static str {
    match self {
      RecordKind::Vertex => "v",
      RecordKind::Normal => "vn",
      RecordKind::TexCoord => "vt",
      RecordKind::Face => "f",
    }
  }
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.keyword())
  }
}

impl Vertex {
  #[allow(missing_docs)]
  pub fn new(x: f64, y: f64, z: f64, w: f64) -> Vertex {
    Vertex { x, y, z, w }
  }
}

impl Normal {
  #[allow(missing_docs)]
  pub fn new(x: f64, y: f64, z: f64) -> Normal {
    Normal { x, y, z }
  }
}

impl TexCoord {
  #[allow(missing_docs)]
  pub fn new(u: f64, v: f64, w: f64) -> TexCoord {
    TexCoord { u, v, w }
  }
}

impl IndexTriple {
  #[allow(missing_docs)]
  pub fn new(v: i32, vn: i32, vt: i32) -> IndexTriple {
    IndexTriple { v, vn, vt }
  }
}

fn fuzzy_cmp(a: f64, b: f64, delta: f64) -> Ordering {
  if (a - b).abs() <= delta {
    Equal
  } else if a < b {
    Less
  } else {
    Greater
  }
}

const DELTA: f64 = 0.00001;

impl PartialEq for Vertex {
  fn eq(&self, other: &Vertex) -> bool {
    self.partial_cmp(other) == Some(Equal)
  }
}

impl PartialOrd for Vertex {
  fn partial_cmp(&self, other: &Vertex) -> Option<Ordering> {
    Some(
      fuzzy_cmp(self.x, other.x, DELTA)
        .lexico(|| fuzzy_cmp(self.y, other.y, DELTA))
        .lexico(|| fuzzy_cmp(self.z, other.z, DELTA))
        .lexico(|| fuzzy_cmp(self.w, other.w, DELTA)),
    )
  }
}

impl PartialEq for Normal {
  fn eq(&self, other: &Normal) -> bool {
    self.partial_cmp(other) == Some(Equal)
  }
}

impl PartialOrd for Normal {
  fn partial_cmp(&self, other: &Normal) -> Option<Ordering> {
    Some(
      fuzzy_cmp(self.x, other.x, DELTA)
        .lexico(|| fuzzy_cmp(self.y, other.y, DELTA))
        .lexico(|| fuzzy_cmp(self.z, other.z, DELTA)),
    )
  }
}

impl PartialEq for TexCoord {
  fn eq(&self, other: &TexCoord) -> bool {
    self.partial_cmp(other) == Some(Equal)
  }
}

impl PartialOrd for TexCoord {
  fn partial_cmp(&self, other: &TexCoord) -> Option<Ordering> {
    Some(
      fuzzy_cmp(self.u, other.u, DELTA)
        .lexico(|| fuzzy_cmp(self.v, other.v, DELTA))
        .lexico(|| fuzzy_cmp(self.w, other.w, DELTA)),
    )
  }
}

/// Prints the model one record per line, grouped by kind.
impl fmt::Display for Model {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "vertex list:")?;
    for v in &self.vertices {
      writeln!(f, "{}, {}, {}, {}", v.x, v.y, v.z, v.w)?;
    }

    writeln!(f, "\nnormal list:")?;
    for n in &self.normals {
      writeln!(f, "{}, {}, {}", n.x, n.y, n.z)?;
    }

    writeln!(f, "\ntexcoord list:")?;
    for t in &self.tex_coords {
      writeln!(f, "{}, {}, {}", t.u, t.v, t.w)?;
    }

    writeln!(f, "\nface list:")?;
    for face in &self.faces {
      let corners: Vec<String> = face
        .indices()
        .iter()
        .map(|i| format!("{}/{}/{}", i.v, i.vn, i.vt))
        .collect();
      writeln!(f, "{}", corners.join(" "))?;
    }

    Ok(())
  }
}

/// Outcome of a rule that may not apply here. `Ok(None)` is a mismatch that
/// consumed nothing; `Err` is a failure after the rule committed.
type Rule<T> = Result<Option<T>, ParseError>;

/// Scans the longest real number at the start of `text`. A dangling exponent
/// such as the `e` in `3e` is left unconsumed.
fn scan_real(text: &str) -> Option<(f64, usize)> {
  match lexical::parse_partial::<f64, _>(text) {
    Ok((value, len)) if len > 0 => Some((value, len)),
    _ => {
      let mantissa = text.find(|c| c == 'e' || c == 'E')?;
      match lexical::parse_partial::<f64, _>(&text[..mantissa]) {
        Ok((value, len)) if len > 0 && len == mantissa => Some((value, len)),
        _ => None,
      }
    }
  }
}

#[derive(Clone)]
struct Parser<'a> {
  cursor: Cursor<'a>,
  label: &'a str,
}

impl<'a> Parser<'a> {
  fn new(input: &'a str, options: &'a ParseOptions) -> Parser<'a> {
    Parser {
      cursor: Cursor::new(input, options.tab_width),
      label: &options.label,
    }
  }

  fn error_at(&self, kind: ErrorKind, at: Position) -> ParseError {
    ParseError {
      kind,
      location: Location {
        file: self.label.to_owned(),
        line: at.line,
        column: at.column,
        line_text: self.cursor.line_text(at).to_owned(),
      },
    }
  }

  /// Runs `parse` on a copy of the parser and keeps its progress only if it
  /// produced a value.
  fn attempt<P, T>(&mut self, parse: P) -> Option<T>
  where
    P: FnOnce(&mut Self) -> Option<T>,
  {
    let mut tried = self.clone();

    let result = parse(&mut tried);
    if result.is_some() {
      *self = tried;
    }
    result
  }

  /// The line the next token starts on.
  fn next_line(&self) -> usize {
    let mut probe = self.cursor.clone();
    probe.skip_trivia();
    probe.position().line
  }

  /// Matches a record keyword. A keyword directly followed by a letter is a
  /// different word, so `vn` never matches as `v`.
  fn keyword(&mut self, kind: RecordKind) -> bool {
    self
      .attempt(|p| {
        p.cursor.skip_trivia();
        if !p.cursor.eat_str(kind.keyword()) {
          return None;
        }
        match p.cursor.peek() {
          Some(c) if c.is_ascii_alphabetic() => None,
          _ => Some(()),
        }
      })
      .is_some()
  }

  fn separator(&mut self) -> bool {
    self
      .attempt(|p| {
        p.cursor.skip_trivia();
        if p.cursor.eat_str("/") {
          Some(())
        } else {
          None
        }
      })
      .is_some()
  }

  fn real(&mut self) -> Option<f64> {
    self.attempt(|p| {
      p.cursor.skip_trivia();
      let (value, len) = scan_real(p.cursor.rest())?;
      p.cursor.advance(len);
      Some(value)
    })
  }

  fn integer(&mut self) -> Option<i32> {
    self.attempt(|p| {
      p.cursor.skip_trivia();
      let (value, len) = lexical::parse_partial::<i32, _>(p.cursor.rest()).ok()?;
      if len == 0 {
        return None;
      }
      p.cursor.advance(len);
      Some(value)
    })
  }

  // Failures are reported where the previous token ended, before any trivia.

  fn expect_real(&mut self, kind: RecordKind) -> Result<f64, ParseError> {
    let at = self.cursor.position();
    self
      .real()
      .ok_or_else(|| self.error_at(ErrorKind::ExpectedReal(kind), at))
  }

  fn expect_integer(&mut self) -> Result<i32, ParseError> {
    let at = self.cursor.position();
    self
      .integer()
      .ok_or_else(|| self.error_at(ErrorKind::ExpectedInteger(RecordKind::Face), at))
  }

  fn parse_vertex(&mut self) -> Rule<Vertex> {
    let kind = RecordKind::Vertex;
    if !self.keyword(kind) {
      return Ok(None);
    }

    let x = self.expect_real(kind)?;
    let y = self.expect_real(kind)?;
    let z = self.expect_real(kind)?;
    let w = self.real().unwrap_or(1.);

    Ok(Some(Vertex { x, y, z, w }))
  }

  fn parse_normal(&mut self) -> Rule<Normal> {
    let kind = RecordKind::Normal;
    if !self.keyword(kind) {
      return Ok(None);
    }

    let x = self.expect_real(kind)?;
    let y = self.expect_real(kind)?;
    let z = self.expect_real(kind)?;

    Ok(Some(Normal { x, y, z }))
  }

  fn parse_tex_coord(&mut self) -> Rule<TexCoord> {
    let kind = RecordKind::TexCoord;
    if !self.keyword(kind) {
      return Ok(None);
    }

    let u = self.expect_real(kind)?;
    let v = self.expect_real(kind)?;
    let w = self.real().unwrap_or(0.);

    Ok(Some(TexCoord { u, v, w }))
  }

  /// `INT ["/" [INT] ["/" INT]]`. Only a missing leading integer is a
  /// mismatch; a second `/` must be followed by an integer.
  fn parse_index(&mut self) -> Rule<IndexTriple> {
    let v = match self.integer() {
      Some(v) => v,
      None => return Ok(None),
    };
    let mut index = IndexTriple {
      v,
      ..IndexTriple::default()
    };

    if self.separator() {
      if let Some(vn) = self.integer() {
        index.vn = vn;
      }
      if self.separator() {
        index.vt = self.expect_integer()?;
      }
    }

    Ok(Some(index))
  }

  fn expect_index(&mut self) -> Result<IndexTriple, ParseError> {
    let at = self.cursor.position();
    match self.parse_index()? {
      Some(index) => Ok(index),
      None => Err(self.error_at(ErrorKind::ExpectedInteger(RecordKind::Face), at)),
    }
  }

  fn parse_face(&mut self) -> Rule<Face> {
    if !self.keyword(RecordKind::Face) {
      return Ok(None);
    }

    let mut indices = Vec::with_capacity(4);
    for _ in 0..3 {
      indices.push(self.expect_index()?);
    }
    while let Some(index) = self.parse_index()? {
      indices.push(index);
    }

    Ok(Some(Face { indices }))
  }

  /// One record followed by as many more of the same kind as match.
  fn parse_block<T, R>(&mut self, record: R) -> Rule<Vec<T>>
  where
    R: Fn(&mut Self) -> Rule<T>,
  {
    let first = match record(&mut *self)? {
      Some(first) => first,
      None => return Ok(None),
    };

    let mut block = vec![first];
    while let Some(next) = record(&mut *self)? {
      block.push(next);
    }
    Ok(Some(block))
  }

  fn parse_model(&mut self, context: &mut Context<'_>) -> Result<(), ParseError> {
    loop {
      let line = self.next_line();

      if let Some(block) = self.parse_block(Self::parse_vertex)? {
        context.set_vertices(block, line);
      } else if let Some(block) = self.parse_block(Self::parse_normal)? {
        context.set_normals(block, line);
      } else if let Some(block) = self.parse_block(Self::parse_tex_coord)? {
        context.set_tex_coords(block, line);
      } else if let Some(block) = self.parse_block(Self::parse_face)? {
        context.set_faces(block, line);
      } else {
        break;
      }
    }

    self.cursor.skip_trivia();
    if !self.cursor.is_at_end() {
      return Err(self.error_at(ErrorKind::TrailingInput, self.cursor.position()));
    }

    Ok(())
  }
}

/// Parses a whole document with default [`ParseOptions`].
pub fn parse<S: AsRef<str>>(input: S) -> Result<Model, ParseError> {
  parse_with(input, &ParseOptions::default())
}

/// Parses a whole document.
pub fn parse_with<S: AsRef<str>>(input: S, options: &ParseOptions) -> Result<Model, ParseError> {
  let mut model = Model::default();
  parse_into(input, options, &mut model)?;
  Ok(model)
}

/// Parses a whole document into `model`.
///
/// Each block found replaces the matching list of `model`; lists with no
/// block in the document are left as they were. On failure `model` keeps
/// every block assigned before the failing record, so it may be partially
/// filled.
pub fn parse_into<S: AsRef<str>>(
  input: S,
  options: &ParseOptions,
  model: &mut Model,
) -> Result<(), ParseError> {
  let mut parser = Parser::new(input.as_ref(), options);
  let mut context = Context::new(model);

  let result = parser.parse_model(&mut context);
  match &result {
    Ok(()) => log::debug!("parsed '{}': {} blocks", options.label, context.blocks()),
    Err(e) => log::debug!("{}", e.render()),
  }
  result
}

/// Reads `reader` to the end, then parses it.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so they pass
/// inside comments and are reported as trailing input anywhere else.
pub fn parse_reader<R: Read>(mut reader: R, options: &ParseOptions) -> Result<Model, Error> {
  let mut bytes = Vec::new();
  reader.read_to_end(&mut bytes)?;
  Ok(parse_with(String::from_utf8_lossy(&bytes), options)?)
}

impl FromStr for Model {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Model, ParseError> {
    parse(s)
  }
}
