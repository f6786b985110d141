// src/writer/tec_writer.rs
use crate::error::{ConvertError, Result};
use crate::mesh::GlobalMesh;
use crate::sampler::FieldSample;
use crate::writer::TecBuffer;
use log::debug;
use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

const ZONE_FORMAT: &str = "DATAPACKING=Point, ZONETYPE=FETETRAHEDRON";

/// Writer for Tecplot ASCII finite-element (tetrahedron) files.
///
/// Output is assembled in memory and the destination is replaced only
/// once the full file is ready.
pub struct TecWriter {
    path: PathBuf,
}

impl TecWriter {
    /// Create a writer for `path`. Nothing is written until [`write`](Self::write).
    pub fn create(path: impl AsRef<Path>) -> Self {
        TecWriter {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the mesh and every field, in order.
    pub fn write(&self, mesh: &GlobalMesh, fields: &[FieldSample]) -> Result<()> {
        let buffer = render(mesh, fields)?;
        persist(&self.path, buffer.as_bytes())?;

        debug!(
            "wrote {}: {} points, {} cells, {} bytes",
            self.path.display(),
            mesh.num_points(),
            mesh.num_cells(),
            buffer.byte_len()
        );
        Ok(())
    }

    /// Write the mesh with a single field
    pub fn write_single(&self, mesh: &GlobalMesh, field: &FieldSample) -> Result<()> {
        self.write(mesh, std::slice::from_ref(field))
    }
}

/// Write the mesh and fields to `path`.
pub fn write_tec(path: impl AsRef<Path>, mesh: &GlobalMesh, fields: &[FieldSample]) -> Result<()> {
    TecWriter::create(path).write(mesh, fields)
}

/// `VARIABLES = X Y Z "f0" ...` header line
pub fn variables_line(fields: &[FieldSample]) -> String {
    let mut line = String::from("VARIABLES = X Y Z");
    for field in fields {
        for name in field.descriptor().column_names() {
            line.push_str(" \"");
            line.push_str(&name);
            line.push('"');
        }
    }
    line
}

/// Render the complete file into memory.
///
/// Each point row holds the coordinates followed by, for every field, its
/// components and (for vectors) the Euclidean norm of those components.
/// Cells follow with 1-based point indices.
pub fn render(mesh: &GlobalMesh, fields: &[FieldSample]) -> Result<TecBuffer> {
    for field in fields {
        field.validate(mesh.num_points())?;
    }

    let columns = 3 + fields.iter().map(|f| f.descriptor().column_count()).sum::<usize>();
    let mut buffer = TecBuffer::with_capacity(mesh.num_points() * columns * 14 + mesh.num_cells() * 32 + 256);

    buffer.write_line(&variables_line(fields));
    buffer.write_line(&format!("ZONE N = {}, E = {}", mesh.num_points(), mesh.num_cells()));
    buffer.write_line(ZONE_FORMAT);

    let mut row: Vec<f64> = Vec::with_capacity(columns);
    for (i, point) in mesh.points().iter().enumerate() {
        row.clear();
        row.extend_from_slice(point);
        for field in fields {
            row.extend_from_slice(field.row(i));
            if field.descriptor().is_vector() {
                row.push(field.norm(i));
            }
        }
        buffer.write_values(&row);
    }

    for cell in mesh.cells() {
        buffer.write_cell(cell);
    }

    Ok(buffer)
}

fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // A replaced file keeps its mode; a new one gets the usual 0644 minus umask.
    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let mut builder = Builder::new();
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }
    let mut file = builder.tempfile_in(directory)?;
    if let Some(permissions) = existing {
        file.as_file().set_permissions(permissions)?;
    }

    file.write_all(bytes)?;
    file.flush()?;
    file.persist(path).map_err(|e| ConvertError::Io(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{LocalMesh, MeshMerger};
    use crate::metadata::FieldDescriptor;
    use tempfile::TempDir;

    fn single_tet() -> GlobalMesh {
        MeshMerger::merge_local(vec![LocalMesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            vec![[0, 1, 2, 3]],
        )])
        .unwrap()
    }

    #[test]
    fn test_variables_line() {
        let fields = vec![
            FieldSample::zeros(FieldDescriptor::scalar("tem"), 1),
            FieldSample::zeros(FieldDescriptor::vector("vel"), 1),
        ];
        assert_eq!(
            variables_line(&fields),
            r#"VARIABLES = X Y Z "tem0" "vel0" "vel1" "vel2" "|vel|""#
        );
        assert_eq!(variables_line(&[]), "VARIABLES = X Y Z");
    }

    #[test]
    fn test_render_layout() {
        let mesh = single_tet();
        let tem = FieldSample::new(FieldDescriptor::scalar("tem"), vec![1.0, 2.0, 3.0, 4.0]);
        let text = String::from_utf8(render(&mesh, &[tem]).unwrap().as_bytes().to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3 + 4 + 1);
        assert_eq!(lines[0], r#"VARIABLES = X Y Z "tem0""#);
        assert_eq!(lines[1], "ZONE N = 4, E = 1");
        assert_eq!(lines[2], "DATAPACKING=Point, ZONETYPE=FETETRAHEDRON");
        assert_eq!(lines[3], "0.000000e+00 0.000000e+00 0.000000e+00 1.000000e+00");
        assert_eq!(lines[4], "1.000000e+00 0.000000e+00 0.000000e+00 2.000000e+00");
        assert_eq!(lines[7], "1 2 3 4");
    }

    #[test]
    fn test_vector_row_has_norm() {
        let mesh = single_tet();
        let mut values = vec![0.0; 12];
        values[..3].copy_from_slice(&[3.0, 4.0, 0.0]);
        let vel = FieldSample::new(FieldDescriptor::vector("vel"), values);

        let buffer = render(&mesh, &[vel]).unwrap();
        let text = std::str::from_utf8(buffer.as_bytes()).unwrap();
        let row: Vec<f64> = text
            .lines()
            .nth(3)
            .unwrap()
            .split_whitespace()
            .map(|t| t.parse().unwrap())
            .collect();

        assert_eq!(row.len(), 7);
        assert_eq!(&row[3..6], &[3.0, 4.0, 0.0]);
        assert!((row[6] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_field_is_rejected_before_writing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.tec");
        let mesh = single_tet();
        let short = FieldSample::new(FieldDescriptor::scalar("tem"), vec![1.0]);

        let err = TecWriter::create(&path).write_single(&mesh, &short).unwrap_err();
        assert!(matches!(err, ConvertError::FieldTypeMismatch { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.tec");
        std::fs::write(&path, "stale").unwrap();

        write_tec(&path, &single_tet(), &[]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("VARIABLES = X Y Z\nZONE N = 4, E = 1\n"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mode = |path: &Path| std::fs::metadata(path).unwrap().permissions().mode() & 0o777;

        let fresh = dir.path().join("fresh.tec");
        write_tec(&fresh, &single_tet(), &[]).unwrap();
        assert_ne!(mode(&fresh), 0o600);
        assert_ne!(mode(&fresh) & 0o040, 0);

        let existing = dir.path().join("existing.tec");
        std::fs::write(&existing, "stale").unwrap();
        std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o640)).unwrap();
        write_tec(&existing, &single_tet(), &[]).unwrap();
        assert_eq!(mode(&existing), 0o640);
        assert!(std::fs::read_to_string(&existing).unwrap().starts_with("VARIABLES"));
    }
}
