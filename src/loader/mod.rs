//! Document loading for both pipelines
//!
//! Reads the practice-inspection and claim-readiness document sets from
//! disk. Required files missing or syntactically broken JSON are hard
//! errors with the offending path; a file that parses but has an unexpected
//! shape degrades to defaults for that document only, so one bad document
//! cannot take down a whole scan.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::claim::docs::ClaimData;
use crate::inspection::docs::{FirmDocuments, FirmProfile};

/// Errors that can occur while loading a document set
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Required file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Everything the practice-inspection scan reads
#[derive(Debug, Clone, Default)]
pub struct PracticeData {
    pub firm_profile: FirmProfile,
    pub documents: FirmDocuments,
    pub engagement_files: Vec<Value>,
}

/// Load the practice document set rooted at `dir`.
///
/// Layout: `firm_profile.json` at the root (required),
/// `documents/firm_level/*.json` keyed by their `document_type` field with
/// the file stem as fallback, and `documents/engagement_files/*.json` in
/// file-name order. Missing directories load as empty; the rules then
/// report the absent documents.
pub fn load_practice_data(dir: &Path) -> LoadResult<PracticeData> {
    let profile_path = dir.join("firm_profile.json");
    let firm_profile = typed_or_default(&profile_path, read_json(&profile_path)?);

    let mut documents = FirmDocuments::default();
    for path in json_files(&dir.join("documents").join("firm_level"))? {
        let doc = read_json(&path)?;
        let key = doc
            .get("document_type")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| file_stem(&path));
        documents.insert(key, doc);
    }

    let mut engagement_files = Vec::new();
    for path in json_files(&dir.join("documents").join("engagement_files"))? {
        engagement_files.push(read_json(&path)?);
    }

    debug!(
        "Loaded {} firm documents and {} engagement files from {}",
        documents.len(),
        engagement_files.len(),
        dir.display()
    );

    Ok(PracticeData {
        firm_profile,
        documents,
        engagement_files,
    })
}

/// Load the claim document set rooted at `dir`.
///
/// All five files are required: `client_profile.json`, `projects.json`,
/// `expenditures.json`, `documentation_log.json`, `t661_form_data.json`.
pub fn load_claim_data(dir: &Path) -> LoadResult<ClaimData> {
    let client_path = dir.join("client_profile.json");
    let projects_path = dir.join("projects.json");
    let expenditures_path = dir.join("expenditures.json");
    let documentation_path = dir.join("documentation_log.json");
    let form_path = dir.join("t661_form_data.json");

    let data = ClaimData {
        client: typed_or_default(&client_path, read_json(&client_path)?),
        projects: typed_or_default(&projects_path, read_json(&projects_path)?),
        expenditures: typed_or_default(&expenditures_path, read_json(&expenditures_path)?),
        documentation: typed_or_default(&documentation_path, read_json(&documentation_path)?),
        t661_form: typed_or_default(&form_path, read_json(&form_path)?),
    };

    debug!(
        "Loaded claim set for {} ({} projects) from {}",
        data.client.company_name,
        data.projects.len(),
        dir.display()
    );

    Ok(data)
}

fn read_json(path: &Path) -> LoadResult<Value> {
    if !path.is_file() {
        return Err(LoadError::Missing {
            path: path.to_path_buf(),
        });
    }
    let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON paths directly under `dir`, sorted by file name. A missing
/// directory is an empty listing, not an error.
fn json_files(dir: &Path) -> LoadResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let entries = std::fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn typed_or_default<T: DeserializeOwned + Default>(path: &Path, value: Value) -> T {
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!(
                "Unexpected shape in {}: {}; using defaults",
                path.display(),
                err
            );
            T::default()
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
