// tests/common/mod.rs
#![allow(dead_code)]

use pvd2tec::FieldKind;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One partition of a fixture time step
#[derive(Clone)]
pub struct Partition {
    pub points: Vec<[f64; 3]>,
    pub cells: Vec<[u32; 4]>,
    pub values: Vec<f64>,
}

impl Partition {
    /// Unit tetrahedron at `origin` with `values` (row-major, one row per point)
    pub fn unit_tet(origin: [f64; 3], values: Vec<f64>) -> Self {
        let [x, y, z] = origin;
        Partition {
            points: vec![[x, y, z], [x + 1.0, y, z], [x, y + 1.0, z], [x, y, z + 1.0]],
            cells: vec![[0, 1, 2, 3]],
            values,
        }
    }
}

/// Directory holding a synthetic solver time series
pub struct SeriesFixture {
    pub dir: TempDir,
}

impl SeriesFixture {
    pub fn new() -> Self {
        SeriesFixture {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Base name accepted by the batch driver (`<dir>/<field>.pvd`)
    pub fn base(&self, field: &str) -> PathBuf {
        self.path(&format!("{}.pvd", field))
    }

    /// Write index, descriptor and partition files of one step; returns the index path.
    pub fn write_step(&self, field: &str, kind: FieldKind, step: i64, partitions: &[Partition]) -> PathBuf {
        let stem = format!("{}{}", field, step);

        let sources: Vec<String> = (0..partitions.len())
            .map(|i| format!("{}_p{}_{:06}.vtu", field, i, step))
            .collect();
        for (source, partition) in sources.iter().zip(partitions) {
            fs::write(self.path(source), vtu_text(field, kind, partition)).unwrap();
        }

        fs::write(self.path(&format!("{}.pvtu", stem)), pvtu_text(field, kind, &sources)).unwrap();

        let index = self.path(&format!("{}.pvd", stem));
        fs::write(&index, pvd_text(&format!("{}.pvtu", stem))).unwrap();
        index
    }
}

pub fn pvd_text(descriptor: &str) -> String {
    format!(
        "<?xml version=\"1.0\"?>
<VTKFile type=\"Collection\" version=\"0.1\" byte_order=\"LittleEndian\">
  <Collection>
    <DataSet timestep=\"0\" group=\"\" part=\"0\" file=\"{}\"/>
  </Collection>
</VTKFile>
",
        descriptor
    )
}

pub fn pvtu_text(field: &str, kind: FieldKind, sources: &[String]) -> String {
    let mut text = format!(
        "<?xml version=\"1.0\"?>
<VTKFile type=\"PUnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">
  <PUnstructuredGrid GhostLevel=\"0\">
    <PPointData {keyword}=\"{field}\">
      <PDataArray type=\"Float64\" Name=\"{field}\" NumberOfComponents=\"{components}\"/>
    </PPointData>
    <PPoints>
      <PDataArray type=\"Float64\" NumberOfComponents=\"3\"/>
    </PPoints>
",
        keyword = kind.keyword(),
        field = field,
        components = kind.component_count(),
    );
    for source in sources {
        text.push_str(&format!("    <Piece Source=\"{}\"/>\n", source));
    }
    text.push_str("  </PUnstructuredGrid>\n</VTKFile>\n");
    text
}

pub fn vtu_text(field: &str, kind: FieldKind, partition: &Partition) -> String {
    let join = |values: &mut dyn Iterator<Item = String>| values.collect::<Vec<_>>().join(" ");

    let points = join(&mut partition.points.iter().flatten().map(|v| v.to_string()));
    let cells = join(&mut partition.cells.iter().flatten().map(|v| v.to_string()));
    let offsets = join(&mut (1..=partition.cells.len()).map(|i| (4 * i).to_string()));
    let types = join(&mut partition.cells.iter().map(|_| "10".to_string()));
    let values = join(&mut partition.values.iter().map(|v| v.to_string()));

    format!(
        "<?xml version=\"1.0\"?>
<VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">
  <UnstructuredGrid>
    <Piece NumberOfPoints=\"{npoints}\" NumberOfCells=\"{ncells}\">
      <Points>
        <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">{points}</DataArray>
      </Points>
      <Cells>
        <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">{cells}</DataArray>
        <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">{offsets}</DataArray>
        <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">{types}</DataArray>
      </Cells>
      <PointData {keyword}=\"{field}\">
        <DataArray type=\"Float64\" Name=\"{field}\" NumberOfComponents=\"{components}\" format=\"ascii\">{values}</DataArray>
      </PointData>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
",
        npoints = partition.points.len(),
        ncells = partition.cells.len(),
        points = points,
        cells = cells,
        offsets = offsets,
        types = types,
        keyword = kind.keyword(),
        field = field,
        components = kind.component_count(),
        values = values,
    )
}

/// Two unit tets sharing the point (1, 0, 0)
pub fn shared_point_partitions(values_a: Vec<f64>, values_b: Vec<f64>) -> Vec<Partition> {
    vec![
        Partition::unit_tet([0.0, 0.0, 0.0], values_a),
        Partition::unit_tet([1.0, 0.0, 0.0], values_b),
    ]
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(String::from).collect()
}
