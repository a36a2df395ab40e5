//! Donation centres loaded from a JSON file into the in-memory store.
//!
//! The persistence adapters never create centres, so without a database this
//! file is the only source of centre reference data.
//!
//! ```json
//! [{"centerName": "Central", "location": "Gaborone"}]
//! ```

use std::path::{Path, PathBuf};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Deserialize;
use thiserror::Error;

use bloodbank::outbound::memory::{InMemoryStore, StoreError};

/// One centre entry in the seed file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CenterSeed {
    pub center_name: String,
    pub location: String,
}

/// Failures while loading the centre seed file.
#[derive(Debug, Error)]
pub enum CenterSeedError {
    #[error("failed to read centre seeds from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid centre seeds in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<CenterSeedError> for std::io::Error {
    fn from(value: CenterSeedError) -> Self {
        Self::other(value)
    }
}

/// Read and parse the centre seed file at `path`.
///
/// # Errors
///
/// Returns [`CenterSeedError::Read`] when the file cannot be opened or is not
/// UTF-8, and [`CenterSeedError::Parse`] when it is not a JSON array of
/// centres.
pub fn load_center_seeds(path: &Path) -> Result<Vec<CenterSeed>, CenterSeedError> {
    let read_error = |source: std::io::Error| CenterSeedError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "centre seed path must name a file",
        ))
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let payload = dir.read(Path::new(file_name)).map_err(read_error)?;
    let contents = String::from_utf8(payload).map_err(|err| {
        read_error(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })?;
    serde_json::from_str(&contents).map_err(|source| CenterSeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Insert every seed into `store`, returning how many were added.
pub(super) fn seed_centers(
    store: &InMemoryStore,
    seeds: &[CenterSeed],
) -> Result<usize, StoreError> {
    for seed in seeds {
        store.insert_center(seed.center_name.as_str(), seed.location.as_str())?;
    }
    Ok(seeds.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use bloodbank::domain::CenterFilter;
    use bloodbank::domain::ports::DonationCenterRepository;
    use tempfile::NamedTempFile;

    fn seed_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write seeds");
        file
    }

    #[test]
    fn seeds_parse_from_camel_case_json() {
        let file = seed_file(
            r#"[
                {"centerName": "Central", "location": "Gaborone"},
                {"centerName": "North", "location": "Francistown"}
            ]"#,
        );

        let seeds = load_center_seeds(file.path()).expect("seeds load");
        assert_eq!(
            seeds,
            vec![
                CenterSeed {
                    center_name: "Central".to_owned(),
                    location: "Gaborone".to_owned(),
                },
                CenterSeed {
                    center_name: "North".to_owned(),
                    location: "Francistown".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = seed_file(r#"[{"centerName": "Central", "location": "Gaborone", "id": 1}]"#);
        let error = load_center_seeds(file.path()).expect_err("strict schema");
        assert!(matches!(error, CenterSeedError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("centres.json");
        let error = load_center_seeds(&path).expect_err("file absent");
        assert!(matches!(error, CenterSeedError::Read { .. }));
        assert!(error.to_string().contains("centres.json"));
    }

    #[tokio::test]
    async fn seeded_centres_are_listed_by_the_store() {
        let store = InMemoryStore::default();
        let seeds = [CenterSeed {
            center_name: "Central".to_owned(),
            location: "Gaborone".to_owned(),
        }];

        let added = seed_centers(&store, &seeds).expect("seeding succeeds");
        assert_eq!(added, 1);
        let centers = store
            .list_centers(&CenterFilter::default())
            .await
            .expect("centres listed");
        assert_eq!(centers.len(), 1);
        assert_eq!(centers[0].center_name, "Central");
    }
}
