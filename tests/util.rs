#![allow(dead_code)]
use foam_cgns::{
    algs::PointInterpolator,
    data::field::{DimensionSet, FieldSet, PatchField, VolScalarField, VolVectorField},
    io::{
        BaseDescription, BoundaryCondition, CgnsWriter, Coordinates, ElementBlock,
        GridConnectivity, GridLocation, SolutionField, ZoneDescription,
    },
    mesh_error::FoamCgnsError,
    topology::{FoamMesh, Patch, PeriodicTransform},
};

/// Names of the six sides of a structured block, in mesh patch order.
pub const BLOCK_PATCHES: [&str; 6] = ["xmin", "xmax", "ymin", "ymax", "zmin", "zmax"];

/// Structured `nx * ny * nz` block of unit hexahedra, one patch per side.
///
/// Point `(i, j, k)` has index `i + (nx + 1) * (j + (ny + 1) * k)`.
pub fn hex_block(nx: usize, ny: usize, nz: usize) -> FoamMesh {
    let id = |i: usize, j: usize, k: usize| i + (nx + 1) * (j + (ny + 1) * k);
    let mut points = Vec::new();
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                points.push([i as f64, j as f64, k as f64]);
            }
        }
    }
    let mut cells = Vec::new();
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                cells.push(vec![
                    id(i, j, k),
                    id(i + 1, j, k),
                    id(i + 1, j + 1, k),
                    id(i, j + 1, k),
                    id(i, j, k + 1),
                    id(i + 1, j, k + 1),
                    id(i + 1, j + 1, k + 1),
                    id(i, j + 1, k + 1),
                ]);
            }
        }
    }

    let mut sides: [Vec<Vec<usize>>; 6] = Default::default();
    for k in 0..nz {
        for j in 0..ny {
            for i in [0, nx] {
                let side = if i == 0 { 0 } else { 1 };
                sides[side].push(vec![
                    id(i, j, k),
                    id(i, j + 1, k),
                    id(i, j + 1, k + 1),
                    id(i, j, k + 1),
                ]);
            }
        }
    }
    for k in 0..nz {
        for i in 0..nx {
            for j in [0, ny] {
                let side = if j == 0 { 2 } else { 3 };
                sides[side].push(vec![
                    id(i, j, k),
                    id(i + 1, j, k),
                    id(i + 1, j, k + 1),
                    id(i, j, k + 1),
                ]);
            }
        }
    }
    for j in 0..ny {
        for i in 0..nx {
            for k in [0, nz] {
                let side = if k == 0 { 4 } else { 5 };
                sides[side].push(vec![
                    id(i, j, k),
                    id(i + 1, j, k),
                    id(i + 1, j + 1, k),
                    id(i, j + 1, k),
                ]);
            }
        }
    }
    let patches = BLOCK_PATCHES
        .iter()
        .zip(sides)
        .map(|(name, faces)| Patch::new(*name, "wall", faces))
        .collect();
    FoamMesh::new(points, cells, patches)
}

/// `mesh` with `patch` appended after its own patches.
pub fn with_patch(mesh: FoamMesh, patch: Patch) -> FoamMesh {
    let mut patches = mesh.patches().to_vec();
    patches.push(patch);
    FoamMesh::new(mesh.points().to_vec(), mesh.cells().to_vec(), patches)
}

/// Unit cube hexahedron with a tetrahedron on its top face. The tetrahedron
/// comes first in cell order.
pub fn tet_hex_mesh() -> FoamMesh {
    let points = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0],
        [0.5, 0.5, 2.0],
    ];
    let cells = vec![vec![4, 5, 6, 8], (0..8).collect()];
    let patches = vec![
        Patch::new("bottom", "wall", vec![vec![0, 3, 2, 1]]),
        Patch::new("roof", "patch", vec![vec![4, 8, 5], vec![5, 8, 6], vec![4, 6, 8]]),
        Patch::new("front", "empty", vec![vec![0, 1, 5, 4]]),
    ];
    FoamMesh::new(points, cells, patches)
}

/// One unit hexahedron whose x-faces form a translational cyclic patch and
/// whose remaining faces form a wall.
///
/// Cyclic patch points in first-appearance order are `[0, 2, 6, 4, 1, 3, 7, 5]`;
/// the pairing is `0-1, 2-3, 6-7, 4-5`.
pub fn cyclic_cube() -> FoamMesh {
    let mut points = Vec::new();
    for k in 0..2 {
        for j in 0..2 {
            for i in 0..2 {
                points.push([i as f64, j as f64, k as f64]);
            }
        }
    }
    let cells = vec![vec![0, 1, 3, 2, 4, 5, 7, 6]];
    let cyclic = Patch::cyclic(
        "periodic",
        vec![vec![0, 2, 6, 4], vec![1, 3, 7, 5]],
        vec![(0, 4), (1, 5), (2, 6), (3, 7)],
    )
    .with_transform(PeriodicTransform::translation([1.0, 0.0, 0.0]));
    let walls = Patch::new(
        "walls",
        "wall",
        vec![
            vec![0, 1, 5, 4],
            vec![2, 6, 7, 3],
            vec![0, 2, 3, 1],
            vec![4, 5, 7, 6],
        ],
    );
    FoamMesh::new(points, cells, vec![cyclic, walls])
}

/// Scalar field with one value on every cell and one value on every face of
/// every patch.
pub fn uniform_scalar(
    name: &str,
    mesh: &FoamMesh,
    internal: f64,
    boundary: f64,
) -> VolScalarField {
    let patch_fields = mesh
        .patches()
        .iter()
        .map(|p| PatchField::new("fixedValue", vec![boundary; p.n_faces()]))
        .collect();
    let dimensions = DimensionSet::new(1.0, -1.0, -2.0, 0.0);
    VolScalarField::new(name, dimensions, vec![internal; mesh.n_cells()])
        .with_boundary(patch_fields)
}

pub fn uniform_vector(name: &str, mesh: &FoamMesh, value: [f64; 3]) -> VolVectorField {
    let patch_fields = mesh
        .patches()
        .iter()
        .map(|p| PatchField::new("fixedValue", vec![value; p.n_faces()]))
        .collect();
    let dimensions = DimensionSet::new(0.0, 1.0, -1.0, 0.0);
    VolVectorField::new(name, dimensions, vec![value; mesh.n_cells()]).with_boundary(patch_fields)
}

pub fn pressure_and_velocity(mesh: &FoamMesh) -> FieldSet {
    FieldSet::new()
        .with_scalar(uniform_scalar("p", mesh, 1.0, 2.0))
        .with_vector(uniform_vector("U", mesh, [1.0, 2.0, 3.0]))
}

/// Averages the values of the cells around each point; points outside every
/// cell get zero.
pub struct CellAverage;

impl CellAverage {
    fn average<T: Copy>(
        mesh: &FoamMesh,
        values: &[T],
        zero: T,
        add: impl Fn(T, T) -> T,
        div: impl Fn(T, f64) -> T,
    ) -> Vec<T> {
        let mut sums = vec![zero; mesh.n_points()];
        let mut counts = vec![0usize; mesh.n_points()];
        for (cell, &value) in mesh.cells().iter().zip(values) {
            for &p in cell {
                sums[p] = add(sums[p], value);
                counts[p] += 1;
            }
        }
        sums.into_iter()
            .zip(counts)
            .map(|(s, c)| if c == 0 { zero } else { div(s, c as f64) })
            .collect()
    }
}

impl PointInterpolator for CellAverage {
    fn interpolate_scalar(&self, mesh: &FoamMesh, cell_values: &[f64]) -> Vec<f64> {
        Self::average(mesh, cell_values, 0.0, |a, b| a + b, |s, n| s / n)
    }

    fn interpolate_vector(&self, mesh: &FoamMesh, cell_values: &[[f64; 3]]) -> Vec<[f64; 3]> {
        Self::average(
            mesh,
            cell_values,
            [0.0; 3],
            |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]],
            |s, n| s.map(|v| v / n),
        )
    }
}

/// Interpolator that returns the wrong number of values.
pub struct Truncating;

impl PointInterpolator for Truncating {
    fn interpolate_scalar(&self, _: &FoamMesh, _: &[f64]) -> Vec<f64> {
        vec![0.0]
    }

    fn interpolate_vector(&self, _: &FoamMesh, _: &[[f64; 3]]) -> Vec<[f64; 3]> {
        vec![[0.0; 3]]
    }
}

/// Writer that records the order of calls as `kind:name` strings.
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub events: Vec<String>,
}

impl CgnsWriter for RecordingWriter {
    fn write_base(&mut self, base: &BaseDescription) -> Result<(), FoamCgnsError> {
        self.events.push(format!("base:{}", base.name));
        Ok(())
    }

    fn write_zone(&mut self, zone: &ZoneDescription) -> Result<(), FoamCgnsError> {
        self.events.push(format!("zone:{}", zone.name));
        Ok(())
    }

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<(), FoamCgnsError> {
        self.events.push(format!("coordinates:{}", coords.len()));
        Ok(())
    }

    fn write_elements(&mut self, block: &ElementBlock) -> Result<(), FoamCgnsError> {
        self.events.push(format!("elements:{}", block.name));
        Ok(())
    }

    fn write_flow_solution(
        &mut self,
        name: &str,
        _location: GridLocation,
    ) -> Result<(), FoamCgnsError> {
        self.events.push(format!("solution:{name}"));
        Ok(())
    }

    fn write_field(&mut self, field: &SolutionField) -> Result<(), FoamCgnsError> {
        self.events.push(format!("field:{}", field.name));
        Ok(())
    }

    fn write_bc(&mut self, bc: &BoundaryCondition) -> Result<(), FoamCgnsError> {
        self.events.push(format!("bc:{}", bc.name));
        Ok(())
    }

    fn write_grid_connectivity(&mut self, conn: &GridConnectivity) -> Result<(), FoamCgnsError> {
        self.events.push(format!("connectivity:{}", conn.name));
        Ok(())
    }
}

/// Sorted copy, for order-agnostic comparisons.
pub fn sorted<T: Ord + Clone>(values: &[T]) -> Vec<T> {
    let mut v = values.to_vec();
    v.sort();
    v
}
