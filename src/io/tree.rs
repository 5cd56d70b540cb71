//! In-memory CGNS object tree.
//!
//! [`CgnsTree`] holds everything one conversion step produces for a single
//! base and zone. It is itself a [`CgnsWriter`], so an assembler can record
//! into it, and [`CgnsTree::write_to`] replays it into a real backend.

use super::{
    BaseDescription, BoundaryCondition, CgnsWriter, Coordinates, ElementBlock, FlowSolution,
    GridConnectivity, GridLocation, SolutionField, ZoneDescription,
};
use crate::mesh_error::FoamCgnsError;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CgnsTree {
    pub base: Option<BaseDescription>,
    pub zone: Option<ZoneDescription>,
    pub coordinates: Coordinates,
    pub element_blocks: Vec<ElementBlock>,
    pub flow_solutions: Vec<FlowSolution>,
    pub boundary_conditions: Vec<BoundaryCondition>,
    pub connectivities: Vec<GridConnectivity>,
}

impl CgnsTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay the tree in hierarchical order.
    pub fn write_to<W: CgnsWriter + ?Sized>(&self, writer: &mut W) -> Result<(), FoamCgnsError> {
        if let Some(base) = &self.base {
            writer.write_base(base)?;
        }
        if let Some(zone) = &self.zone {
            writer.write_zone(zone)?;
        }
        writer.write_coordinates(&self.coordinates)?;
        for block in &self.element_blocks {
            writer.write_elements(block)?;
        }
        for solution in &self.flow_solutions {
            writer.write_flow_solution(&solution.name, solution.location)?;
            for field in &solution.fields {
                writer.write_field(field)?;
            }
        }
        for bc in &self.boundary_conditions {
            writer.write_bc(bc)?;
        }
        for conn in &self.connectivities {
            writer.write_grid_connectivity(conn)?;
        }
        Ok(())
    }

    /// Total number of elements over all blocks.
    pub fn n_elements(&self) -> usize {
        self.element_blocks.iter().map(|b| b.count).sum()
    }

    pub fn flow_solution(&self, name: &str) -> Option<&FlowSolution> {
        self.flow_solutions.iter().find(|s| s.name == name)
    }

    /// Look up an array by name across all flow solutions.
    pub fn field(&self, name: &str) -> Option<&SolutionField> {
        self.flow_solutions
            .iter()
            .flat_map(|s| s.fields.iter())
            .find(|f| f.name == name)
    }

    pub fn bc(&self, name: &str) -> Option<&BoundaryCondition> {
        self.boundary_conditions.iter().find(|bc| bc.name == name)
    }

    pub fn connectivity(&self, name: &str) -> Option<&GridConnectivity> {
        self.connectivities.iter().find(|c| c.name == name)
    }
}

impl CgnsWriter for CgnsTree {
    fn write_base(&mut self, base: &BaseDescription) -> Result<(), FoamCgnsError> {
        self.base = Some(base.clone());
        Ok(())
    }

    fn write_zone(&mut self, zone: &ZoneDescription) -> Result<(), FoamCgnsError> {
        if self.base.is_none() {
            return Err(FoamCgnsError::Writer(format!(
                "zone {} written before its base",
                zone.name
            )));
        }
        self.zone = Some(zone.clone());
        Ok(())
    }

    fn write_coordinates(&mut self, coords: &Coordinates) -> Result<(), FoamCgnsError> {
        self.coordinates = coords.clone();
        Ok(())
    }

    fn write_elements(&mut self, block: &ElementBlock) -> Result<(), FoamCgnsError> {
        self.element_blocks.push(block.clone());
        Ok(())
    }

    fn write_flow_solution(
        &mut self,
        name: &str,
        location: GridLocation,
    ) -> Result<(), FoamCgnsError> {
        self.flow_solutions.push(FlowSolution {
            name: name.to_string(),
            location,
            fields: Vec::new(),
        });
        Ok(())
    }

    fn write_field(&mut self, field: &SolutionField) -> Result<(), FoamCgnsError> {
        let solution = self.flow_solutions.last_mut().ok_or_else(|| {
            FoamCgnsError::Writer(format!("field {} written outside a flow solution", field.name))
        })?;
        solution.fields.push(field.clone());
        Ok(())
    }

    fn write_bc(&mut self, bc: &BoundaryCondition) -> Result<(), FoamCgnsError> {
        self.boundary_conditions.push(bc.clone());
        Ok(())
    }

    fn write_grid_connectivity(&mut self, conn: &GridConnectivity) -> Result<(), FoamCgnsError> {
        self.connectivities.push(conn.clone());
        Ok(())
    }
}
