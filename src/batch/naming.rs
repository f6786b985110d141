// src/batch/naming.rs
use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};

const INDEX_EXTENSION: &str = ".pvd";

/// Index file of time step `step`: `results/tem.pvd` becomes `results/tem<step>.pvd`.
pub fn step_path(base: &Path, step: i64) -> Result<PathBuf> {
    let stem = base
        .to_str()
        .and_then(|name| name.strip_suffix(INDEX_EXTENSION))
        .ok_or_else(|| ConvertError::InvalidBaseName(base.to_path_buf()))?;
    Ok(PathBuf::from(format!("{}{}{}", stem, step, INDEX_EXTENSION)))
}

/// Output file of time step `step`: `<base>.<step>.tec`
pub fn output_path(base: &Path, step: i64) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!(".{}.tec", step));
    PathBuf::from(name)
}
