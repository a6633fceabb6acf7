//! Packing of the source set into the fragment stage's `vec3` array layout.
//!
//! Each source occupies three consecutive floats, `(x, y, strength)`, in
//! set order. The packed slice is what gets uploaded to the
//! [`METABALLS_UNIFORM`] slot every tick.

use crate::source::FieldSourceSet;

/// Floats per source in the packed array.
pub const FLOATS_PER_SOURCE: usize = 3;
/// Name of the `vec3` array uniform in the fragment stage.
pub const METABALLS_UNIFORM: &str = "metaballs";
/// Name of the quad's vertex attribute in the vertex stage.
pub const POSITION_ATTRIBUTE: &str = "position";

/// Packs the set into a fresh `Vec` of length `3 * N`.
pub fn pack_sources(set: &FieldSourceSet) -> Vec<f32> {
    let mut packed = Vec::with_capacity(set.len() * FLOATS_PER_SOURCE);
    pack_into(set, &mut packed);
    packed
}

fn pack_into(set: &FieldSourceSet, out: &mut Vec<f32>) {
    out.clear();
    out.extend(
        set.iter()
            .flat_map(|s| [s.position.x, s.position.y, s.strength()]),
    );
}

/// Reusable packing buffer.
///
/// Every call to [`pack`](Self::pack) rewrites the whole buffer; there is
/// no diffing against the previous tick.
#[derive(Debug, Default, Clone)]
pub struct UniformPacker {
    buffer: Vec<f32>,
}

impl UniformPacker {
    /// An empty buffer; grows on the first pack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-sized for `count` sources.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(count * FLOATS_PER_SOURCE),
        }
    }

    /// Repacks `set` as `[x, y, strength]` triples in slot order.
    pub fn pack(&mut self, set: &FieldSourceSet) -> &[f32] {
        pack_into(set, &mut self.buffer);
        &self.buffer
    }

    /// The most recently packed data.
    pub fn packed(&self) -> &[f32] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FieldSource;
    use crate::viewport::Viewport;
    use glam::Vec2;

    fn two_sources() -> FieldSourceSet {
        let vp = Viewport::new(100, 100).unwrap();
        FieldSourceSet::from_sources(
            vp,
            vec![
                FieldSource::new(Vec2::new(11.0, 22.0), Vec2::new(1.0, 1.0), 8.0).unwrap(),
                FieldSource::new(Vec2::new(33.0, 44.0), Vec2::new(-1.0, 0.0), 4.0).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn pack_sources_emits_position_and_strength_in_set_order() {
        let packed = pack_sources(&two_sources());
        assert_eq!(packed, vec![11.0, 22.0, 6.0, 33.0, 44.0, 3.0]);
    }

    #[test]
    fn packer_matches_free_function() {
        let set = two_sources();
        let mut packer = UniformPacker::with_capacity(set.len());
        assert_eq!(packer.pack(&set), pack_sources(&set).as_slice());
    }

    #[test]
    fn packer_rewrites_whole_buffer_after_update() {
        let mut set = two_sources();
        let mut packer = UniformPacker::new();
        packer.pack(&set);
        set.update();
        let packed = packer.pack(&set).to_vec();
        assert_eq!(packed.len(), 2 * FLOATS_PER_SOURCE);
        assert_eq!(packed, vec![12.0, 23.0, 6.0, 32.0, 44.0, 3.0]);
        assert_eq!(packer.packed(), packed.as_slice());
    }
}
