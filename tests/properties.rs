//! Property-based tests for the `.obj` grammar.
//!
//! These check that formatted records read back to the values they were
//! written from, that trivia between tokens never changes the result, and
//! that arbitrary input fails cleanly instead of panicking.

use obj_mesh::{parse, IndexTriple, Model, Normal, TexCoord, Vertex};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f64> {
  prop_oneof![
    (-1000i32..1000).prop_map(f64::from),
    -1.0e4f64..1.0e4,
  ]
}

/// Separators that must be invisible to the grammar.
fn trivia() -> impl Strategy<Value = &'static str> {
  prop_oneof![
    Just(" "),
    Just("\t"),
    Just("\n"),
    Just("\r\n"),
    Just(" \\\n"),
    Just("\\\r\n"),
    Just(" # comment\n"),
    Just("\n\n# a whole comment line\n  "),
  ]
}

proptest! {
  #[test]
  fn vertex_reads_back(x in coordinate(), y in coordinate(), z in coordinate(), w in coordinate()) {
    let model = parse(format!("v {} {} {} {}\nv {} {} {}", x, y, z, w, z, y, x)).unwrap();
    prop_assert_eq!(model.vertices, vec![Vertex::new(x, y, z, w), Vertex::new(z, y, x, 1.)]);
  }

  #[test]
  fn normal_and_tex_coord_read_back(a in coordinate(), b in coordinate(), c in coordinate()) {
    let model = parse(format!("vn {} {} {}\nvt {} {}\n", a, b, c, c, a)).unwrap();
    prop_assert_eq!(model.normals, vec![Normal::new(a, b, c)]);
    prop_assert_eq!(model.tex_coords, vec![TexCoord::new(c, a, 0.)]);
  }

  #[test]
  fn face_corners_read_back(
    corners in prop::collection::vec((-1000i32..1000, -1000i32..1000, -1000i32..1000), 3..8)
  ) {
    let written: Vec<String> = corners
      .iter()
      .map(|&(v, vn, vt)| format!("{}/{}/{}", v, vn, vt))
      .collect();
    let model = parse(format!("f {}\n", written.join(" "))).unwrap();

    let expected: Vec<IndexTriple> =
      corners.iter().map(|&(v, vn, vt)| IndexTriple::new(v, vn, vt)).collect();
    prop_assert_eq!(model.faces.len(), 1);
    prop_assert_eq!(model.faces[0].indices(), &expected[..]);

    // the dump prints each corner exactly as written
    let dump = model.to_string();
    let face_line = dump.lines().last().unwrap();
    prop_assert_eq!(face_line, written.join(" "));
  }

  #[test]
  fn trivia_between_tokens_is_invisible(separators in prop::collection::vec(trivia(), 10)) {
    let tokens = ["v", "1", "2", "3", "vt", "4", "5", "f", "1/2/3", "4//6", "7"];
    let mut document = String::from(tokens[0]);
    for (token, separator) in tokens[1..].iter().zip(&separators) {
      document.push_str(separator);
      document.push_str(token);
    }

    let expected = parse("v 1 2 3\nvt 4 5\nf 1/2/3 4//6 7\n").unwrap();
    prop_assert_eq!(parse(&document).unwrap(), expected);
  }

  #[test]
  fn noise_fails_cleanly(input in "[vntf0-9 ./#\\\\\t\r\n-]{0,48}") {
    match parse(&input) {
      Ok(model) => {
        prop_assert!(model.faces.iter().all(|f| f.indices().len() >= 3));
      }
      Err(e) => {
        prop_assert!(e.location.line >= 1);
        prop_assert!(e.location.column >= 1);
        prop_assert!(!e.location.line_text.contains('\n'));
        prop_assert!(!e.location.line_text.contains('\r'));
      }
    }
  }

  #[test]
  fn any_text_never_panics(input in "\\PC{0,64}") {
    let _ = input.parse::<Model>();
  }
}
