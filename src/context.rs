use crate::obj::{Face, Model, Normal, RecordKind, TexCoord, Vertex};

/// Assembles matched blocks into the model owned by the caller.
///
/// Every block replaces the slot of its kind instead of extending it, so a
/// document with two separate vertex runs keeps only the last one.
pub(crate) struct Context<'m> {
  model: &'m mut Model,
  blocks: usize,
}

fn replace<T>(slot: &mut Vec<T>, block: Vec<T>, kind: RecordKind, line: usize) {
  if !slot.is_empty() {
    log::warn!(
      "`{}` block at line {} replaces {} earlier records",
      kind,
      line,
      slot.len()
    );
  }
  log::debug!("assigned {} `{}` records from line {}", block.len(), kind, line);
  *slot = block;
}

impl<'m> Context<'m> {
  pub(crate) fn new(model: &'m mut Model) -> Self {
    Context { model, blocks: 0 }
  }

  pub(crate) fn set_vertices(&mut self, block: Vec<Vertex>, line: usize) {
    replace(&mut self.model.vertices, block, RecordKind::Vertex, line);
    self.blocks += 1;
  }

  pub(crate) fn set_normals(&mut self, block: Vec<Normal>, line: usize) {
    replace(&mut self.model.normals, block, RecordKind::Normal, line);
    self.blocks += 1;
  }

  pub(crate) fn set_tex_coords(&mut self, block: Vec<TexCoord>, line: usize) {
    replace(&mut self.model.tex_coords, block, RecordKind::TexCoord, line);
    self.blocks += 1;
  }

  pub(crate) fn set_faces(&mut self, block: Vec<Face>, line: usize) {
    replace(&mut self.model.faces, block, RecordKind::Face, line);
    self.blocks += 1;
  }

  /// Number of blocks assigned so far.
  pub(crate) fn blocks(&self) -> usize {
    self.blocks
  }
}

#[cfg(test)]
mod tests {
  use super::Context;
  use crate::obj::{Model, Vertex};

  #[test]
  fn later_block_overwrites_earlier_one() {
    let mut model = Model::default();
    {
      let mut context = Context::new(&mut model);
      context.set_vertices(vec![Vertex::new(1., 1., 1., 1.), Vertex::new(2., 2., 2., 1.)], 1);
      context.set_vertices(vec![Vertex::new(3., 3., 3., 1.)], 5);
      assert_eq!(context.blocks(), 2);
    }
    assert_eq!(model.vertices, vec![Vertex::new(3., 3., 3., 1.)]);
  }
}
