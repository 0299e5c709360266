//! Copy job parser
//!
//! Reads copy jobs from YAML or JSON files (JSON is valid YAML).

use crate::error::{Error, Result};
use crate::loader::types::CopyJob;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load and validate a copy job from a file
pub fn load_copy_job(path: impl AsRef<Path>) -> Result<CopyJob> {
    let path = path.as_ref();
    debug!("Loading copy job from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    load_copy_job_from_str(&content)
}

/// Load and validate a copy job from a YAML or JSON string
pub fn load_copy_job_from_str(text: &str) -> Result<CopyJob> {
    let job: CopyJob = serde_yaml::from_str(text)?;
    job.validate()?;

    info!(
        "Loaded copy job '{}': {} to {}",
        job.pipeline_name, job.source.connector_type, job.sink.connector_type
    );
    Ok(job)
}
