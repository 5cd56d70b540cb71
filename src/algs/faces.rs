//! Boundary face decomposition into CGNS surface elements.
//!
//! Quadrilaterals are kept, triangles are kept, and any larger polygon is fan
//! triangulated from its first vertex into `n - 2` triangles.
//!
//! # Limitations
//! The fan is only guaranteed valid for convex faces. A non-convex face whose
//! first vertex sees a reflex angle produces overlapping triangles; no
//! convexity check is made.

use itertools::Itertools;

use crate::algs::renumber::PointMap;
use crate::io::ElementBlock;
use crate::mesh_error::FoamCgnsError;
use crate::topology::cell_type::ElementType;
use crate::topology::patch::{Patch, PatchFilter};

/// Fixed-arity surface primitive, holding the face's own point indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Primitive {
    Tri([usize; 3]),
    Quad([usize; 4]),
}

impl Primitive {
    pub fn element_type(&self) -> ElementType {
        match self {
            Primitive::Tri(_) => ElementType::Tri3,
            Primitive::Quad(_) => ElementType::Quad4,
        }
    }

    pub fn points(&self) -> &[usize] {
        match self {
            Primitive::Tri(p) => p,
            Primitive::Quad(p) => p,
        }
    }
}

/// Decompose one face. Faces with fewer than three points yield nothing.
pub fn decompose_face(face: &[usize]) -> Vec<Primitive> {
    match face.len() {
        4 => vec![Primitive::Quad([face[0], face[1], face[2], face[3]])],
        n if n >= 3 => face[1..]
            .iter()
            .copied()
            .tuple_windows()
            .map(|(a, b)| Primitive::Tri([face[0], a, b]))
            .collect(),
        _ => Vec::new(),
    }
}

/// Surface element blocks of a boundary zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SurfaceConnectivity {
    /// `<zone>_Quads` then `<zone>_Tris`; empty blocks are omitted.
    pub blocks: Vec<ElementBlock>,
    /// Source faces visited.
    pub n_faces: usize,
}

impl SurfaceConnectivity {
    /// Number of emitted primitives (the zone cell count).
    pub fn n_elements(&self) -> usize {
        self.blocks.iter().map(|b| b.count).sum()
    }
}

/// Decompose the faces of every patch accepted by `filter` and renumber them
/// through `map`.
pub fn build_surface_blocks(
    zone_name: &str,
    patches: &[Patch],
    filter: &PatchFilter,
    map: &PointMap,
) -> Result<SurfaceConnectivity, FoamCgnsError> {
    let mut quads: (Vec<i64>, usize) = (Vec::new(), 0);
    let mut tris: (Vec<i64>, usize) = (Vec::new(), 0);
    let mut n_faces = 0;

    for (_, patch) in filter.included(patches) {
        for (face_index, face) in patch.faces().iter().enumerate() {
            n_faces += 1;
            let primitives = decompose_face(face);
            if primitives.is_empty() {
                log::warn!(
                    "Skipping face {face_index} of patch {}: {} vertices",
                    patch.name(),
                    face.len()
                );
                continue;
            }
            for primitive in primitives {
                let (buffer, count) = match primitive {
                    Primitive::Quad(_) => &mut quads,
                    Primitive::Tri(_) => &mut tris,
                };
                for &p in primitive.points() {
                    buffer.push(map.try_one_based(p)?);
                }
                *count += 1;
            }
        }
    }

    let mut blocks = Vec::new();
    let mut start = 1i64;
    for (ty, (connectivity, count)) in [(ElementType::Quad4, quads), (ElementType::Tri3, tris)] {
        if count == 0 {
            continue;
        }
        log::info!("Writing {count} {} faces", ty.cgns_name());
        blocks.push(ElementBlock {
            name: format!("{zone_name}_{}", ty.block_suffix()),
            element_type: ty,
            start,
            count,
            connectivity,
        });
        start += count as i64;
    }

    Ok(SurfaceConnectivity { blocks, n_faces })
}
