//! Volume cell classification and CGNS connectivity.
//!
//! Cells are classified by vertex count. A mesh whose cells all share the
//! first cell's arity is written as one `<zone>_Body` block; otherwise cells
//! are regrouped by type into hexahedra, prisms, pyramids and tetrahedra
//! blocks, in that order, numbered contiguously from 1. Boundary-condition
//! point lists and the zone cell count rely on this single flat numbering.

use crate::io::ElementBlock;
use crate::mesh_error::FoamCgnsError;
use crate::topology::cell_type::{ElementType, MIXED_BLOCK_ORDER};

/// Element blocks of a volume zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VolumeConnectivity {
    /// Uniform type, [`ElementType::Mixed`], or `None` for a mesh without cells.
    pub element_type: Option<ElementType>,
    pub blocks: Vec<ElementBlock>,
}

impl VolumeConnectivity {
    pub fn n_cells(&self) -> usize {
        self.blocks.iter().map(|b| b.count).sum()
    }
}

fn cell_type(index: usize, shape: &[usize]) -> Result<ElementType, FoamCgnsError> {
    ElementType::from_volume_arity(shape.len()).ok_or(FoamCgnsError::InvalidCellArity {
        cell: index,
        vertices: shape.len(),
    })
}

/// Detect whether all cells share one element type.
///
/// The first cell sets the reference arity and must be a valid volume type.
/// Scanning stops at the first cell of a different arity, which makes the mesh
/// [`ElementType::Mixed`].
pub fn detect_element_type(cells: &[Vec<usize>]) -> Result<Option<ElementType>, FoamCgnsError> {
    let Some(first) = cells.first() else {
        return Ok(None);
    };
    let reference = cell_type(0, first)?;
    if cells[1..].iter().any(|shape| shape.len() != first.len()) {
        return Ok(Some(ElementType::Mixed));
    }
    Ok(Some(reference))
}

/// Append the 1-based CGNS connectivity of one cell.
///
/// `shape` must have exactly `element_type.node_count()` entries.
pub fn reindex_cell(element_type: ElementType, shape: &[usize], out: &mut Vec<i64>) {
    out.extend(
        element_type
            .vertex_order()
            .iter()
            .map(|&slot| shape[slot] as i64 + 1),
    );
}

/// Classify `cells` and build the element blocks of zone `zone_name`.
///
/// Every cell is validated before any block is returned, so an invalid arity
/// anywhere in the mesh yields [`FoamCgnsError::InvalidCellArity`] and no
/// partial output.
pub fn build_volume_blocks(
    zone_name: &str,
    cells: &[Vec<usize>],
) -> Result<VolumeConnectivity, FoamCgnsError> {
    let Some(element_type) = detect_element_type(cells)? else {
        return Ok(VolumeConnectivity::default());
    };
    log::info!(
        "Processing mesh connectivity: {} cells of type {}",
        cells.len(),
        element_type.cgns_name()
    );

    if element_type != ElementType::Mixed {
        let mut connectivity = Vec::with_capacity(cells.len() * cells[0].len());
        for shape in cells {
            reindex_cell(element_type, shape, &mut connectivity);
        }
        let block = ElementBlock {
            name: format!("{zone_name}_Body"),
            element_type,
            start: 1,
            count: cells.len(),
            connectivity,
        };
        return Ok(VolumeConnectivity {
            element_type: Some(element_type),
            blocks: vec![block],
        });
    }

    let mut buffers: [(Vec<i64>, usize); 4] = Default::default();
    for (index, shape) in cells.iter().enumerate() {
        let ty = cell_type(index, shape)?;
        let slot = ty.mixed_slot().ok_or(FoamCgnsError::InvalidCellArity {
            cell: index,
            vertices: shape.len(),
        })?;
        let (connectivity, count) = &mut buffers[slot];
        reindex_cell(ty, shape, connectivity);
        *count += 1;
    }

    let mut start = 1i64;
    let mut blocks = Vec::new();
    for (ty, (connectivity, count)) in MIXED_BLOCK_ORDER.into_iter().zip(buffers) {
        if count == 0 {
            continue;
        }
        blocks.push(ElementBlock {
            name: format!("{zone_name}_{}", ty.block_suffix()),
            element_type: ty,
            start,
            count,
            connectivity,
        });
        start += count as i64;
    }

    Ok(VolumeConnectivity {
        element_type: Some(ElementType::Mixed),
        blocks,
    })
}
