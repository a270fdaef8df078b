use std::cmp::Ordering;

pub(crate) trait OrderingExt {
  /// Chains a tie-breaking comparison, evaluated only when `self` is `Equal`.
  fn lexico<F>(self, next: F) -> Ordering
  where
    F: FnOnce() -> Ordering;
}

impl OrderingExt for Ordering {
  #[inline]
  fn lexico<F>(self, next: F) -> Ordering
  where
    F: FnOnce() -> Ordering,
  {
    match self {
      Ordering::Equal => next(),
      other => other,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::OrderingExt;
  use std::cmp::Ordering::{Equal, Greater, Less};

  #[test]
  fn lexico_only_breaks_ties() {
    assert_eq!(Equal.lexico(|| Less), Less);
    assert_eq!(Greater.lexico(|| Less), Greater);
    assert_eq!(Less.lexico(|| panic!("not evaluated")), Less);
  }
}
