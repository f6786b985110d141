// src/reader/partition.rs
use crate::error::{ConvertError, Result};
use crate::types::{FieldSet, Point3, Tetra};
use crate::utils::{decode_attributes, parse_tokens, reshape, tag_payload};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "mmap")]
use memmap2::Mmap;

/// Line holding `<Piece NumberOfPoints=".." NumberOfCells="..">`
pub const PIECE_HEADER_LINE: usize = 3;
/// Line holding the point coordinate array
pub const POINTS_LINE: usize = 5;
/// Line holding the tetrahedron connectivity array (0-based local indices)
pub const CONNECTIVITY_LINE: usize = 8;
/// Line holding the point field values
pub const VALUES_LINE: usize = 13;

/// Blocks read from one partition data file
///
/// A block that was not requested is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionData {
    pub points: Option<Vec<Point3>>,
    pub connectivity: Option<Vec<Tetra>>,
    /// Row-major values, `component_count` per point
    pub values: Option<Vec<f64>>,
}

impl PartitionData {
    pub fn point_count(&self) -> usize {
        self.points.as_ref().map_or(0, Vec::len)
    }

    pub fn cell_count(&self) -> usize {
        self.connectivity.as_ref().map_or(0, Vec::len)
    }
}

enum Content {
    Text(String),
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
}

/// One partition data file of the solver's unstructured-grid output.
///
/// The file is read by fixed line position, not parsed as XML. Every
/// requested block must sit at its line offset (see [`POINTS_LINE`],
/// [`CONNECTIVITY_LINE`], [`VALUES_LINE`]) as `<tag ...>payload</tag>`.
pub struct PartitionFile {
    path: PathBuf,
    content: Content,
}

impl PartitionFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Ok(PartitionFile {
            path: path.to_path_buf(),
            content: Content::Text(content),
        })
    }

    /// Open the file through a memory map (requires "mmap" feature)
    #[cfg(feature = "mmap")]
    pub fn open_mmap(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(PartitionFile {
            path: path.to_path_buf(),
            content: Content::Mapped(mmap),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn text(&self) -> Result<&str> {
        match &self.content {
            Content::Text(text) => Ok(text),
            #[cfg(feature = "mmap")]
            Content::Mapped(mmap) => {
                std::str::from_utf8(mmap).map_err(|_| ConvertError::InvalidUtf8(self.path.clone()))
            }
        }
    }

    /// Read the requested blocks.
    ///
    /// `component_count` is the row width of the value block and is only
    /// used when values are requested.
    pub fn read(&self, fields: FieldSet, component_count: usize) -> Result<PartitionData> {
        let lines: Vec<&str> = self.text()?.lines().collect();

        let required = [
            (fields.has_points(), POINTS_LINE),
            (fields.has_connectivity(), CONNECTIVITY_LINE),
            (fields.has_values(), VALUES_LINE),
        ]
        .iter()
        .filter(|(requested, _)| *requested)
        .map(|(_, line)| *line)
        .max();

        if let Some(line) = required {
            if lines.len() <= line {
                return Err(ConvertError::UnexpectedFileShape {
                    path: self.path.clone(),
                    required: line + 1,
                    found: lines.len(),
                });
            }
        }

        let header = PieceHeader::parse(&lines);
        let mut data = PartitionData::default();

        if fields.has_points() {
            let flat: Vec<f64> = parse_tokens(self.payload(lines[POINTS_LINE])?, &self.path)?;
            let points: Vec<Point3> = reshape(&flat, &self.path)?;
            self.check_count("points", header.points, points.len())?;
            data.points = Some(points);
        }

        if fields.has_connectivity() {
            let flat: Vec<u32> = parse_tokens(self.payload(lines[CONNECTIVITY_LINE])?, &self.path)?;
            let cells: Vec<Tetra> = reshape(&flat, &self.path)?;
            self.check_count("cells", header.cells, cells.len())?;
            data.connectivity = Some(cells);
        }

        if fields.has_values() {
            let width = component_count.max(1);
            let values: Vec<f64> = parse_tokens(self.payload(lines[VALUES_LINE])?, &self.path)?;
            if values.len() % width != 0 {
                return Err(ConvertError::RaggedPayload {
                    path: self.path.clone(),
                    count: values.len(),
                    width,
                });
            }
            self.check_count("value rows", header.points, values.len() / width)?;
            data.values = Some(values);
        }

        debug!(
            "{}: {} points, {} cells",
            self.path.display(),
            data.point_count(),
            data.cell_count()
        );

        Ok(data)
    }

    fn payload<'a>(&self, line: &'a str) -> Result<&'a str> {
        tag_payload(line).ok_or_else(|| ConvertError::MalformedLine {
            line: line.trim_end().to_string(),
        })
    }

    fn check_count(&self, what: &'static str, expected: Option<usize>, found: usize) -> Result<()> {
        match expected {
            Some(expected) if expected != found => Err(ConvertError::CountMismatch {
                path: self.path.clone(),
                what,
                expected,
                found,
            }),
            _ => Ok(()),
        }
    }
}

/// Read the requested blocks of one partition data file.
pub fn read_partition(
    path: impl AsRef<Path>,
    fields: FieldSet,
    component_count: usize,
) -> Result<PartitionData> {
    PartitionFile::open(path)?.read(fields, component_count)
}

/// Declared counts of the piece header, when the file carries them
#[derive(Debug, Default)]
struct PieceHeader {
    points: Option<usize>,
    cells: Option<usize>,
}

impl PieceHeader {
    fn parse(lines: &[&str]) -> Self {
        let attributes = match lines.get(PIECE_HEADER_LINE).map(|line| decode_attributes(line)) {
            Some(Ok(attributes)) => attributes,
            _ => return PieceHeader::default(),
        };
        let count = |key: &str| attributes.get(key).and_then(|value| value.parse().ok());
        PieceHeader {
            points: count("NumberOfPoints"),
            cells: count("NumberOfCells"),
        }
    }
}
