use std::path::PathBuf;

use tracing::debug;

use crate::{
    error::{PlannerError, Result},
    types::Place,
};

pub const DEFAULT_CATALOG_PATH: &str = "data/places.json";

/// Static place catalog stored as a JSON array on disk.
///
/// The file is read again on every [`PlaceCatalog::load`]; edits show up on
/// the next request without a restart.
#[derive(Debug, Clone)]
pub struct PlaceCatalog {
    path: PathBuf,
}

impl Default for PlaceCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_PATH)
    }
}

impl PlaceCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Vec<Place>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            PlannerError::CatalogUnavailable(format!("{}: {}", self.path.display(), err))
        })?;

        let places: Vec<Place> = serde_json::from_str(&raw).map_err(|err| {
            PlannerError::CatalogUnavailable(format!(
                "{} is not a JSON array of places: {}",
                self.path.display(),
                err
            ))
        })?;

        debug!(path = %self.path.display(), count = places.len(), "loaded place catalog");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "ISKCON Temple", "category": "Temple"}}, {{"name": "Chandragiri Fort"}}]"#
        )
        .unwrap();

        let places = PlaceCatalog::new(file.path()).load().await.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].name, "Chandragiri Fort");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlaceCatalog::new(dir.path().join("nope.json"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::CatalogUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "not an array"}}"#).unwrap();

        let err = PlaceCatalog::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, PlannerError::CatalogUnavailable(_)));
    }

    #[tokio::test]
    async fn test_entry_without_name() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "ISKCON Temple"}}, {{"category": "Temple"}}]"#).unwrap();

        let err = PlaceCatalog::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, PlannerError::CatalogUnavailable(_)));
    }
}
