mod util;
use util::*;

use foam_cgns::data::bc::BcType;
use foam_cgns::data::field::{DimensionSet, FieldSet, VolVectorField};
use foam_cgns::io::{
    CgnsTree, ConversionDriver, ExportOptions, GridLocation, SimulationType, TimeStep,
    ZoneAssembler,
};
use foam_cgns::mesh_error::FoamCgnsError;
use foam_cgns::topology::{ElementType, FoamMesh, Patch, PatchFilter};

fn assemble(options: ExportOptions, mesh: &FoamMesh, fields: &FieldSet) -> CgnsTree {
    ZoneAssembler::new(options)
        .unwrap()
        .assemble(mesh, fields, &CellAverage)
        .unwrap()
}

#[test]
fn uniform_hex_block_is_one_body_section() {
    let mesh = hex_block(2, 2, 2);
    let tree = assemble(ExportOptions::default(), &mesh, &FieldSet::new());

    let zone = tree.zone.as_ref().unwrap();
    assert_eq!(zone.name, "Zone_0");
    assert_eq!((zone.vertex_count, zone.cell_count), (27, 8));
    assert_eq!(tree.coordinates.len(), 27);
    assert_eq!(tree.coordinates.x[1], 1.0);
    assert_eq!(tree.coordinates.z[26], 2.0);

    assert_eq!(tree.element_blocks.len(), 1);
    let body = &tree.element_blocks[0];
    assert_eq!(body.name, "Zone_0_Body");
    assert_eq!(body.element_type, ElementType::Hexa8);
    assert_eq!((body.start, body.count), (1, 8));
    assert_eq!(&body.connectivity[..8], &[1, 2, 5, 4, 10, 11, 14, 13]);
}

#[test]
fn tet_and_hex_become_mixed_blocks_hexa_first() {
    let tree = assemble(ExportOptions::default(), &tet_hex_mesh(), &FieldSet::new());

    let summary: Vec<_> = tree
        .element_blocks
        .iter()
        .map(|b| (b.name.as_str(), b.element_type, b.start, b.count))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Zone_0_Hexa", ElementType::Hexa8, 1, 1),
            ("Zone_0_Tetra", ElementType::Tetra4, 2, 1),
        ]
    );
    assert_eq!(tree.element_blocks[0].connectivity, (1..=8).collect::<Vec<i64>>());
    assert_eq!(tree.element_blocks[1].connectivity, vec![5, 6, 7, 9]);
    assert_eq!(tree.zone.as_ref().unwrap().cell_count, 2);
}

#[test]
fn invalid_cell_aborts_before_anything_is_written() {
    let mut cells = hex_block(1, 1, 1).cells().to_vec();
    cells.push(vec![0, 1, 2, 3, 4, 5, 6]);
    let mesh = FoamMesh::new(hex_block(1, 1, 1).points().to_vec(), cells, Vec::new());
    let step = TimeStep::new("1", mesh, FieldSet::new());

    let driver = ConversionDriver::new("case", ExportOptions::default()).unwrap();
    let mut writer = RecordingWriter::default();
    let err = driver
        .convert_step(&step, &CellAverage, &mut writer)
        .unwrap_err();
    assert_eq!(err, FoamCgnsError::InvalidCellArity { cell: 1, vertices: 7 });
    assert!(writer.events.is_empty());
}

#[test]
fn records_arrive_in_hierarchical_order() {
    let mesh = hex_block(1, 1, 1);
    let step = TimeStep::new("0", mesh.clone(), pressure_and_velocity(&mesh));
    let driver = ConversionDriver::new("case", ExportOptions::default()).unwrap();
    let mut writer = RecordingWriter::default();
    driver.convert_step(&step, &CellAverage, &mut writer).unwrap();

    let mut expected = vec![
        "base:base",
        "zone:Zone_0",
        "coordinates:8",
        "elements:Zone_0_Body",
        "solution:FlowSolution",
        "field:Pressure",
        "field:VelocityX",
        "field:VelocityY",
        "field:VelocityZ",
    ];
    expected.extend(["bc:xmin", "bc:xmax", "bc:ymin", "bc:ymax", "bc:zmin", "bc:zmax"]);
    assert_eq!(writer.events, expected);
}

#[test]
fn pressure_is_scaled_by_rho_and_velocity_is_split() {
    let mesh = hex_block(2, 1, 1);
    let fields = pressure_and_velocity(&mesh);
    let tree = assemble(ExportOptions::default().with_rho(2.0), &mesh, &fields);

    let solution = tree.flow_solution("FlowSolution").unwrap();
    assert_eq!(solution.location, GridLocation::Vertex);
    let pressure = tree.field("Pressure").unwrap();
    assert_eq!(pressure.values, vec![2.0; mesh.n_points()]);
    assert_eq!(pressure.exponents, None);
    assert_eq!(tree.field("VelocityX").unwrap().values, vec![1.0; mesh.n_points()]);
    assert_eq!(tree.field("VelocityZ").unwrap().values, vec![3.0; mesh.n_points()]);
}

#[test]
fn user_defined_vector_keeps_axis_names_and_units() {
    let mesh = hex_block(1, 1, 1);
    let w = VolVectorField::new("W", DimensionSet::new(0.0, 1.0, -1.0, 0.0), vec![[0.0; 3]]);
    let fields = FieldSet::new().with_vector(w);

    let strict = assemble(ExportOptions::default(), &mesh, &fields);
    assert!(strict.flow_solutions.is_empty());

    let lenient = assemble(
        ExportOptions::default().with_user_defined_fields(true),
        &mesh,
        &fields,
    );
    let names: Vec<_> = lenient.flow_solutions[0]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["W_X", "W_Y", "W_Z"]);
    assert_eq!(
        lenient.field("W_Y").unwrap().exponents,
        Some([0.0, 1.0, -1.0, 0.0, 0.0])
    );
}

#[test]
fn wrong_interpolation_length_skips_field_only() {
    let mesh = hex_block(1, 1, 1);
    let tree = ZoneAssembler::new(ExportOptions::default())
        .unwrap()
        .assemble(&mesh, &pressure_and_velocity(&mesh), &Truncating)
        .unwrap();
    assert!(tree.flow_solutions.is_empty());
    assert_eq!(tree.boundary_conditions.len(), 6);
}

#[test]
fn boundary_conditions_use_original_numbering() {
    let mesh = hex_block(2, 2, 2);
    let tree = assemble(ExportOptions::default(), &mesh, &FieldSet::new());
    let xmin = tree.bc("xmin").unwrap();
    assert_eq!(xmin.bc_type, BcType::BCWall);
    assert_eq!(sorted(&xmin.points), vec![1, 4, 7, 10, 13, 16, 19, 22, 25]);
}

#[test]
fn empty_patches_and_filtered_patches_get_no_bc() {
    let tree = assemble(ExportOptions::default(), &tet_hex_mesh(), &FieldSet::new());
    assert!(tree.bc("front").is_none());
    assert_eq!(tree.bc("roof").unwrap().bc_type, BcType::BCTypeUserDefined);

    let mesh = hex_block(1, 1, 1);
    let tree = assemble(
        ExportOptions::default().with_patch_filter(PatchFilter::from_comma_list(" xmin ,\tzmax")),
        &mesh,
        &FieldSet::new(),
    );
    let names: Vec<_> = tree.boundary_conditions.iter().map(|bc| bc.name.as_str()).collect();
    assert_eq!(names, vec!["xmin", "zmax"]);
}

#[test]
fn patch_without_points_is_skipped() {
    let base = hex_block(1, 1, 1);
    let mut patches = base.patches().to_vec();
    patches.push(Patch::new("ghost", "wall", Vec::new()));
    let mesh = FoamMesh::new(base.points().to_vec(), base.cells().to_vec(), patches);
    let tree = assemble(ExportOptions::default(), &mesh, &FieldSet::new());
    assert!(tree.bc("ghost").is_none());
    assert_eq!(tree.boundary_conditions.len(), 6);
}

#[test]
fn physical_type_selects_bc_type() {
    let base = hex_block(1, 1, 1);
    let mut patches = base.patches().to_vec();
    patches[0] = patches[0].clone().with_physical_type("inlet");
    let mesh = FoamMesh::new(base.points().to_vec(), base.cells().to_vec(), patches);
    let tree = assemble(ExportOptions::default(), &mesh, &FieldSet::new());
    assert_eq!(tree.bc("xmin").unwrap().bc_type, BcType::BCInflow);
}

#[test]
fn steady_state_base_is_not_time_accurate() {
    let mesh = hex_block(1, 1, 1);
    let tree = assemble(
        ExportOptions::default().with_steady_state(true),
        &mesh,
        &FieldSet::new(),
    );
    assert_eq!(
        tree.base.as_ref().unwrap().simulation_type,
        SimulationType::NonTimeAccurate
    );
}

#[test]
fn out_of_range_point_is_rejected() {
    let mesh = FoamMesh::new(vec![[0.0; 3]; 4], vec![vec![0, 1, 2, 9]], Vec::new());
    let err = ZoneAssembler::new(ExportOptions::default())
        .unwrap()
        .assemble(&mesh, &FieldSet::new(), &CellAverage)
        .unwrap_err();
    assert_eq!(err, FoamCgnsError::PointIndexOutOfRange { point: 9, n_points: 4 });
}

#[test]
fn patch_with_missing_point_is_skipped() {
    let mesh = with_patch(
        hex_block(1, 1, 1),
        Patch::new("broken", "wall", vec![vec![0, 1, 99]]),
    );
    let fields = pressure_and_velocity(&mesh);
    let tree = assemble(ExportOptions::default(), &mesh, &fields);

    let zone = tree.zone.as_ref().unwrap();
    assert_eq!((zone.vertex_count, zone.cell_count), (8, 1));
    assert_eq!(tree.element_blocks.len(), 1);
    assert_eq!(tree.field("Pressure").unwrap().values.len(), 8);
    assert!(tree.bc("broken").is_none());
    let names: Vec<_> = tree.boundary_conditions.iter().map(|bc| bc.name.as_str()).collect();
    assert_eq!(names, BLOCK_PATCHES.to_vec());
}

#[test]
fn broken_patch_does_not_stop_the_writer() {
    let mesh = with_patch(
        hex_block(1, 1, 1),
        Patch::new("broken", "wall", vec![vec![0, 1, 99]]),
    );
    let step = TimeStep::new("0", mesh, FieldSet::new());
    let driver = ConversionDriver::new("case", ExportOptions::default()).unwrap();
    let mut writer = RecordingWriter::default();
    driver.convert_step(&step, &CellAverage, &mut writer).unwrap();

    let bcs: Vec<_> = writer
        .events
        .iter()
        .filter_map(|e| e.strip_prefix("bc:"))
        .collect();
    assert_eq!(bcs, BLOCK_PATCHES.to_vec());
    assert!(writer.events.contains(&"elements:Zone_0_Body".to_string()));
}
