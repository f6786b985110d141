// src/metadata/index_file.rs
use crate::error::{ConvertError, Result};
use crate::metadata::{FieldDescriptor, PartitionReference};
use crate::types::FieldKind;
use crate::utils::decode_attributes;
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

const FILE_MARKER: &str = "file";
const SOURCE_MARKER: &str = "Source";
const COMPONENTS_KEY: &str = "NumberOfComponents";

/// A time-step index file resolved down to its partition data files
#[derive(Debug, Clone)]
pub struct IndexFile {
    pub path: PathBuf,
    pub descriptor_path: PathBuf,
    pub field: FieldDescriptor,
    pub partitions: PartitionReference,
}

impl IndexFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let directory = path.parent().unwrap_or_else(|| Path::new(""));

        let descriptor_name = find_descriptor_name(path)?;
        let descriptor_path = directory.join(descriptor_name);
        let (field, partitions) = read_descriptor(&descriptor_path, directory)?;

        debug!(
            "{}: field {:?} ({} components), {} partitions",
            path.display(),
            field.name,
            field.component_count,
            partitions.len()
        );
        if partitions.is_empty() {
            warn!("{} lists no partition files", descriptor_path.display());
        }

        Ok(IndexFile {
            path: path.to_path_buf(),
            descriptor_path,
            field,
            partitions,
        })
    }
}

/// Resolve an index file to its field descriptor and partition files.
///
/// Referenced names are resolved relative to the index file's directory.
pub fn read_index(path: impl AsRef<Path>) -> Result<(FieldDescriptor, PartitionReference)> {
    let index = IndexFile::open(path)?;
    Ok((index.field, index.partitions))
}

fn find_descriptor_name(path: &Path) -> Result<String> {
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        if !line.contains(FILE_MARKER) {
            continue;
        }
        let mut attributes = decode_attributes(&line)?;
        return attributes
            .remove(FILE_MARKER)
            .ok_or_else(|| ConvertError::PartitionDescriptorNotFound(path.to_path_buf()));
    }

    Err(ConvertError::PartitionDescriptorNotFound(path.to_path_buf()))
}

fn read_descriptor(path: &Path, directory: &Path) -> Result<(FieldDescriptor, PartitionReference)> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();

    let kind = if lines.iter().any(|line| line.contains(FieldKind::Scalars.keyword())) {
        FieldKind::Scalars
    } else if lines.iter().any(|line| line.contains(FieldKind::Vectors.keyword())) {
        FieldKind::Vectors
    } else {
        return Err(ConvertError::UnknownFieldKind(path.to_path_buf()));
    };
    let keyword = kind.keyword();

    let mut name: Option<String> = None;
    let mut declared_components: Option<usize> = None;
    let mut partitions = PartitionReference::new();

    for (i, line) in lines.iter().enumerate() {
        if line.contains(keyword) {
            // The first declaration is authoritative.
            if name.is_some() {
                continue;
            }
            if let Some(field_name) = decode_attributes(line)?.remove(keyword) {
                name = Some(field_name);
                if let Some(next) = lines.get(i + 1) {
                    declared_components = declared_component_count(next, path)?;
                }
            }
        } else if line.contains(SOURCE_MARKER) {
            match decode_attributes(line)?.remove(SOURCE_MARKER) {
                Some(source) => partitions.push(directory.join(source)),
                None => debug!("{}: ignoring line without Source attribute", path.display()),
            }
        }
    }

    let name = name.ok_or_else(|| ConvertError::UnknownFieldKind(path.to_path_buf()))?;

    if let Some(declared) = declared_components {
        if declared != kind.component_count() {
            return Err(ConvertError::FieldTypeMismatch {
                expected: format!("{} with {} components", keyword, kind.component_count()),
                found: format!("{} = {}", COMPONENTS_KEY, declared),
            });
        }
    }

    Ok((FieldDescriptor::new(name, kind), partitions))
}

/// `NumberOfComponents` of the data array line following the field
/// declaration, if present. A declared 0 means one component.
fn declared_component_count(line: &str, path: &Path) -> Result<Option<usize>> {
    if !line.contains(COMPONENTS_KEY) {
        return Ok(None);
    }
    match decode_attributes(line)?.remove(COMPONENTS_KEY) {
        Some(value) => {
            let count: usize = value.parse().map_err(|_| ConvertError::InvalidNumber {
                path: path.to_path_buf(),
                token: value.clone(),
            })?;
            Ok(Some(count.max(1)))
        }
        None => Ok(None),
    }
}
