//! Parser for the ASCII `.obj` polygon-mesh interchange format.
//!
//! The whole document is parsed in one call into a [`Model`] holding the
//! vertices, normals, texture coordinates and faces in file order. A failed
//! parse yields exactly one [`ParseError`] pointing at the first problem in
//! the document.
#![crate_type = "lib"]
#![deny(missing_docs)]
#![deny(unreachable_pub)]

pub use error::{Error, ErrorKind, Location, ParseError};
pub use obj::{
  parse, parse_into, parse_reader, parse_with, Face, IndexTriple, Model, Normal, RecordKind,
  TexCoord, Vertex,
};
pub use options::ParseOptions;

mod context;
mod error;
mod lex;
mod options;
mod util;

pub mod obj;
