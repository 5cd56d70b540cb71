//! Zone assembly: one mesh snapshot to one CGNS tree.
//!
//! [`ZoneAssembler`] runs the conversion stages for a single time step and
//! records the result into a [`CgnsTree`]. Two pipelines exist:
//!
//! - **Volume**: every mesh point and cell, cell connectivity grouped by
//!   element type, cell fields interpolated to the points.
//! - **Boundary**: only the points of exported patches, renumbered densely,
//!   boundary faces decomposed into quads and triangles, patch face values
//!   averaged onto the points.
//!
//! Failures confined to one field or one patch are logged and that unit is
//! skipped. A patch referencing a missing point is dropped from the step's
//! patch filter, so every stage skips it alike. A cell with an unsupported
//! vertex count or a missing point aborts the step before anything is
//! recorded.

use crate::algs::aggregate::{aggregate_patch_values, scale_values};
use crate::algs::boundary::build_boundary_point_map;
use crate::algs::connectivity::build_volume_blocks;
use crate::algs::faces::build_surface_blocks;
use crate::algs::interpolate::{check_point_count, PointInterpolator};
use crate::algs::renumber::PointMap;
use crate::data::bc::BcType;
use crate::data::field::{FieldSet, VolScalarField, VolVectorField};
use crate::data::quantity::{resolve_scalar, resolve_vector, ResolvedName};
use crate::io::tree::CgnsTree;
use crate::io::{
    BaseDescription, BoundaryCondition, CgnsWriter, Coordinates, ElementBlock,
    GridConnectivity, GridLocation, SimulationType, SolutionField, ZoneDescription,
};
use crate::mesh_error::FoamCgnsError;
use crate::topology::mesh::FoamMesh;
use crate::topology::patch::{Patch, PatchFilter};
use crate::topology::periodic::{pair_cyclic_patch, PairedBoundary, PeriodicTransform};

pub const VOLUME_BASE_NAME: &str = "base";
pub const BOUNDARY_BASE_NAME: &str = "BoundaryBase";
pub const VOLUME_ZONE_NAME: &str = "Zone_0";
pub const BOUNDARY_ZONE_NAME: &str = "BoundaryZone_0";
pub const VOLUME_SOLUTION_NAME: &str = "FlowSolution";
pub const BOUNDARY_SOLUTION_NAME: &str = "BoundaryFlowSolution";

/// Which geometry and fields a step exports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ExportMode {
    /// Full volume mesh with interpolated fields.
    #[default]
    Volume,
    /// Boundary patches with face values averaged onto their points.
    BoundaryOnly,
    /// Boundary geometry only; fields are not processed.
    BoundaryTest,
}

impl ExportMode {
    pub fn is_boundary(self) -> bool {
        !matches!(self, ExportMode::Volume)
    }
}

/// How cyclic patches are written.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CyclicExport {
    /// One boundary condition over all patch points, like any other patch.
    #[default]
    AsPatch,
    /// Two boundary conditions, `<name>_1` for the reference half and
    /// `<name>_2` for the periodic half.
    SplitBoundaryConditions,
    /// Two periodic 1-to-1 connectivities with opposite transforms.
    GridConnectivity,
}

/// Per-step export settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Density multiplied into pressure after averaging.
    pub rho: f64,
    /// Export fields without a canonical CGNS name under their own name.
    pub allow_user_defined_fields: bool,
    pub mode: ExportMode,
    pub patch_filter: PatchFilter,
    pub cyclic_export: CyclicExport,
    /// Write `NonTimeAccurate` instead of `TimeAccurate` bases.
    pub steady_state: bool,
    /// Transform for cyclic patches that carry none.
    pub default_periodic_transform: PeriodicTransform,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            allow_user_defined_fields: false,
            mode: ExportMode::default(),
            patch_filter: PatchFilter::all(),
            cyclic_export: CyclicExport::default(),
            steady_state: false,
            default_periodic_transform: PeriodicTransform::default(),
        }
    }
}

impl ExportOptions {
    pub fn with_rho(mut self, rho: f64) -> Self {
        self.rho = rho;
        self
    }

    pub fn with_user_defined_fields(mut self, allow: bool) -> Self {
        self.allow_user_defined_fields = allow;
        self
    }

    pub fn with_mode(mut self, mode: ExportMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_patch_filter(mut self, filter: PatchFilter) -> Self {
        self.patch_filter = filter;
        self
    }

    pub fn with_cyclic_export(mut self, cyclic_export: CyclicExport) -> Self {
        self.cyclic_export = cyclic_export;
        self
    }

    pub fn with_steady_state(mut self, steady_state: bool) -> Self {
        self.steady_state = steady_state;
        self
    }

    pub fn with_periodic_transform(mut self, transform: PeriodicTransform) -> Self {
        self.default_periodic_transform = transform;
        self
    }

    pub fn validate(&self) -> Result<(), FoamCgnsError> {
        if !self.rho.is_finite() {
            return Err(FoamCgnsError::InvalidOption(format!(
                "rho must be finite, got {}",
                self.rho
            )));
        }
        Ok(())
    }

    fn simulation_type(&self) -> SimulationType {
        if self.steady_state {
            SimulationType::NonTimeAccurate
        } else {
            SimulationType::TimeAccurate
        }
    }
}

/// Builds the CGNS tree of one time step.
#[derive(Clone, Debug)]
pub struct ZoneAssembler {
    options: ExportOptions,
}

impl ZoneAssembler {
    pub fn new(options: ExportOptions) -> Result<Self, FoamCgnsError> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Convert `mesh` and `fields` according to the configured mode.
    ///
    /// `interpolator` is only consulted by the volume pipeline.
    pub fn assemble<I: PointInterpolator + ?Sized>(
        &self,
        mesh: &FoamMesh,
        fields: &FieldSet,
        interpolator: &I,
    ) -> Result<CgnsTree, FoamCgnsError> {
        mesh.validate_cells()?;
        let filter = self.step_filter(mesh);
        match self.options.mode {
            ExportMode::Volume => self.assemble_volume(mesh, fields, &filter, interpolator),
            ExportMode::BoundaryOnly => self.assemble_boundary(mesh, &filter, Some(fields)),
            ExportMode::BoundaryTest => self.assemble_boundary(mesh, &filter, None),
        }
    }

    /// The configured filter minus the patches of `mesh` that reference
    /// missing points.
    fn step_filter(&self, mesh: &FoamMesh) -> PatchFilter {
        let mut filter = self.options.patch_filter.clone();
        for (_, patch) in self.options.patch_filter.included(mesh.patches()) {
            if let Err(err) = mesh.validate_patch(patch) {
                log::warn!("Skipping patch {}: {err}", patch.name());
                filter.exclude(patch.name());
            }
        }
        filter
    }

    fn assemble_volume<I: PointInterpolator + ?Sized>(
        &self,
        mesh: &FoamMesh,
        fields: &FieldSet,
        filter: &PatchFilter,
        interpolator: &I,
    ) -> Result<CgnsTree, FoamCgnsError> {
        // Classification validates every cell before the tree is touched.
        let connectivity = build_volume_blocks(VOLUME_ZONE_NAME, mesh.cells())?;
        let map = PointMap::identity(mesh.n_points());

        let mut tree = CgnsTree::new();
        self.write_header(
            &mut tree,
            VOLUME_BASE_NAME,
            3,
            ZoneDescription {
                name: VOLUME_ZONE_NAME.to_string(),
                vertex_count: mesh.n_points(),
                cell_count: connectivity.n_cells(),
            },
        )?;
        let [x, y, z] = mesh.coordinate_arrays(None)?;
        tree.write_coordinates(&Coordinates { x, y, z })?;
        write_blocks(&mut tree, &connectivity.blocks)?;

        let solution = self.volume_solution(mesh, fields, interpolator);
        write_solution(&mut tree, VOLUME_SOLUTION_NAME, solution)?;

        self.write_patches(&mut tree, VOLUME_ZONE_NAME, mesh.patches(), filter, &map)?;
        Ok(tree)
    }

    fn assemble_boundary(
        &self,
        mesh: &FoamMesh,
        filter: &PatchFilter,
        fields: Option<&FieldSet>,
    ) -> Result<CgnsTree, FoamCgnsError> {
        let map = build_boundary_point_map(mesh.patches(), filter, mesh.n_points())?;
        let surface = build_surface_blocks(BOUNDARY_ZONE_NAME, mesh.patches(), filter, &map)?;
        log::info!(
            "Boundary zone: {} points, {} faces, {} elements",
            map.len(),
            surface.n_faces,
            surface.n_elements()
        );

        let mut tree = CgnsTree::new();
        self.write_header(
            &mut tree,
            BOUNDARY_BASE_NAME,
            2,
            ZoneDescription {
                name: BOUNDARY_ZONE_NAME.to_string(),
                vertex_count: map.len(),
                cell_count: surface.n_elements(),
            },
        )?;
        let [x, y, z] = mesh.coordinate_arrays(Some(map.originals()))?;
        tree.write_coordinates(&Coordinates { x, y, z })?;
        write_blocks(&mut tree, &surface.blocks)?;

        if let Some(fields) = fields {
            let solution = self.boundary_solution(mesh, fields, filter, &map);
            write_solution(&mut tree, BOUNDARY_SOLUTION_NAME, solution)?;
        }

        self.write_patches(&mut tree, BOUNDARY_ZONE_NAME, mesh.patches(), filter, &map)?;
        Ok(tree)
    }

    fn write_header<W: CgnsWriter + ?Sized>(
        &self,
        writer: &mut W,
        base_name: &str,
        cell_dim: u8,
        zone: ZoneDescription,
    ) -> Result<(), FoamCgnsError> {
        log::info!(
            "Writing zone {} ({} vertices, {} cells)",
            zone.name,
            zone.vertex_count,
            zone.cell_count
        );
        writer.write_base(&BaseDescription {
            name: base_name.to_string(),
            cell_dim,
            phys_dim: 3,
            simulation_type: self.options.simulation_type(),
        })?;
        writer.write_zone(&zone)
    }

    fn volume_solution<I: PointInterpolator + ?Sized>(
        &self,
        mesh: &FoamMesh,
        fields: &FieldSet,
        interpolator: &I,
    ) -> Vec<SolutionField> {
        let mut out = Vec::new();
        for field in &fields.scalars {
            let Some(name) = self.resolve_scalar(field) else {
                continue;
            };
            let values = field
                .check_cell_count(mesh.n_cells())
                .map(|_| interpolator.interpolate_scalar(mesh, &field.internal))
                .and_then(|values| {
                    check_point_count(&field.name, &values, mesh.n_points()).map(|_| values)
                });
            match values {
                Ok(values) => self.push_scalar(&mut out, name, values),
                Err(err) => log::warn!("Skipping field {}: {err}", field.name),
            }
        }
        for field in &fields.vectors {
            let Some(names) = self.resolve_vector(field) else {
                continue;
            };
            let values = field
                .check_cell_count(mesh.n_cells())
                .map(|_| interpolator.interpolate_vector(mesh, &field.internal))
                .and_then(|values| {
                    check_point_count(&field.name, &values, mesh.n_points()).map(|_| values)
                });
            match values {
                Ok(values) => self.push_vector(&mut out, names, &values),
                Err(err) => log::warn!("Skipping field {}: {err}", field.name),
            }
        }
        out
    }

    fn boundary_solution(
        &self,
        mesh: &FoamMesh,
        fields: &FieldSet,
        filter: &PatchFilter,
        map: &PointMap,
    ) -> Vec<SolutionField> {
        let mut out = Vec::new();
        for field in &fields.scalars {
            let Some(name) = self.resolve_scalar(field) else {
                continue;
            };
            let values =
                aggregate_patch_values(&field.name, mesh.patches(), &field.boundary, filter, map);
            self.push_scalar(&mut out, name, values);
        }
        for field in &fields.vectors {
            let Some(names) = self.resolve_vector(field) else {
                continue;
            };
            let values =
                aggregate_patch_values(&field.name, mesh.patches(), &field.boundary, filter, map);
            self.push_vector(&mut out, names, &values);
        }
        out
    }

    fn resolve_scalar(&self, field: &VolScalarField) -> Option<ResolvedName> {
        let resolved = resolve_scalar(
            &field.name,
            &field.dimensions,
            self.options.allow_user_defined_fields,
        );
        if resolved.is_none() {
            log::warn!(
                "Field {} has no CGNS name; skipping (enable user-defined fields to export it)",
                field.name
            );
        }
        resolved
    }

    fn resolve_vector(&self, field: &VolVectorField) -> Option<[ResolvedName; 3]> {
        let resolved = resolve_vector(
            &field.name,
            &field.dimensions,
            self.options.allow_user_defined_fields,
        );
        if resolved.is_none() {
            log::warn!(
                "Field {} has no CGNS name; skipping (enable user-defined fields to export it)",
                field.name
            );
        }
        resolved
    }

    fn push_scalar(&self, out: &mut Vec<SolutionField>, name: ResolvedName, mut values: Vec<f64>) {
        if name.is_pressure() {
            scale_values(&mut values, self.options.rho);
        }
        log::info!("Writing field {}", name.output_name);
        out.push(SolutionField {
            name: name.output_name,
            values,
            exponents: name.exponents,
        });
    }

    fn push_vector(
        &self,
        out: &mut Vec<SolutionField>,
        names: [ResolvedName; 3],
        values: &[[f64; 3]],
    ) {
        for (axis, name) in names.into_iter().enumerate() {
            let component = values.iter().map(|v| v[axis]).collect();
            self.push_scalar(out, name, component);
        }
    }

    /// Boundary conditions (and cyclic connectivities) of every exported patch.
    fn write_patches<W: CgnsWriter + ?Sized>(
        &self,
        writer: &mut W,
        zone_name: &str,
        patches: &[Patch],
        filter: &PatchFilter,
        map: &PointMap,
    ) -> Result<(), FoamCgnsError> {
        for (index, patch) in filter.included(patches) {
            if patch.n_points() == 0 {
                log::warn!("Patch {} has no points; skipping", patch.name());
                continue;
            }
            let periodic = patch.is_cyclic() || patch.is_coupled();
            let records = match self.options.cyclic_export {
                CyclicExport::SplitBoundaryConditions if periodic => self
                    .paired(patch, map)
                    .map(|pair| PatchRecords::Split(split_bcs(patch, &pair))),
                CyclicExport::GridConnectivity if periodic => {
                    self.paired(patch, map).map(|pair| {
                        PatchRecords::Connectivity(connectivities(patch, zone_name, &pair))
                    })
                }
                _ => plain_bc(patch, map).map(PatchRecords::Plain),
            };
            match records {
                Ok(PatchRecords::Plain(bc)) => {
                    log::info!("{index} : Writing patch {}", bc.name);
                    writer.write_bc(&bc)?;
                }
                Ok(PatchRecords::Split(bcs)) => {
                    for bc in &bcs {
                        log::info!("{index} : Writing cyclic patch {}", bc.name);
                        writer.write_bc(bc)?;
                    }
                }
                Ok(PatchRecords::Connectivity(conns)) => {
                    for conn in &conns {
                        log::info!("{index} : Writing cyclic connectivity {}", conn.name);
                        writer.write_grid_connectivity(conn)?;
                    }
                }
                Err(err) => log::warn!("Skipping patch {}: {err}", patch.name()),
            }
        }
        Ok(())
    }

    fn paired(&self, patch: &Patch, map: &PointMap) -> Result<PairedBoundary, FoamCgnsError> {
        pair_cyclic_patch(patch, map, &self.options.default_periodic_transform)
    }
}

enum PatchRecords {
    Plain(BoundaryCondition),
    Split([BoundaryCondition; 2]),
    Connectivity([GridConnectivity; 2]),
}

fn write_blocks<W: CgnsWriter + ?Sized>(
    writer: &mut W,
    blocks: &[ElementBlock],
) -> Result<(), FoamCgnsError> {
    for block in blocks {
        log::debug!(
            "Writing section {} ({} {} elements from {})",
            block.name,
            block.count,
            block.element_type.cgns_name(),
            block.start
        );
        writer.write_elements(block)?;
    }
    Ok(())
}

/// Write a vertex-located solution; nothing is written without fields.
fn write_solution<W: CgnsWriter + ?Sized>(
    writer: &mut W,
    name: &str,
    fields: Vec<SolutionField>,
) -> Result<(), FoamCgnsError> {
    if fields.is_empty() {
        return Ok(());
    }
    writer.write_flow_solution(name, GridLocation::Vertex)?;
    for field in &fields {
        writer.write_field(field)?;
    }
    Ok(())
}

fn bc_type(patch: &Patch) -> BcType {
    BcType::from_physical_type(patch.bc_type_tag())
}

fn plain_bc(patch: &Patch, map: &PointMap) -> Result<BoundaryCondition, FoamCgnsError> {
    let points = patch
        .mesh_points()
        .iter()
        .map(|&p| map.try_one_based(p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BoundaryCondition {
        name: patch.name().to_string(),
        bc_type: bc_type(patch),
        points,
    })
}

fn split_bcs(patch: &Patch, pair: &PairedBoundary) -> [BoundaryCondition; 2] {
    [
        BoundaryCondition {
            name: format!("{}_1", patch.name()),
            bc_type: bc_type(patch),
            points: pair.reference_one_based(),
        },
        BoundaryCondition {
            name: format!("{}_2", patch.name()),
            bc_type: bc_type(patch),
            points: pair.periodic_one_based(),
        },
    ]
}

fn connectivities(patch: &Patch, zone_name: &str, pair: &PairedBoundary) -> [GridConnectivity; 2] {
    let connectivity = |suffix: &str, side: &PairedBoundary| GridConnectivity {
        name: format!("{}_{suffix}", patch.name()),
        donor_zone: zone_name.to_string(),
        points: side.reference_one_based(),
        donor_points: side.periodic_one_based(),
        periodic: side.transform,
    };
    [connectivity("1", pair), connectivity("2", &pair.swapped())]
}
