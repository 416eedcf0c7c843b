//! Station directory lookup.
//!
//! Maps a free-text location name onto a DataPoint observation station id
//! using the site list stored on disk.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One observation site from the directory file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Station {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
struct DirectoryFile {
    #[serde(rename = "Locations", default)]
    locations: LocationList,
}

#[derive(Debug, Default, Deserialize)]
struct LocationList {
    #[serde(rename = "Location", default)]
    location: Vec<Station>,
}

/// Snapshot of the station directory, in file order.
#[derive(Debug, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
}

impl StationDirectory {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Reads and parses the directory file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read station directory: {}", path.display()))?;

        let file: DirectoryFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse station directory: {}", path.display()))?;

        Ok(Self::new(file.locations.location))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Finds a station by name, ignoring case.
    ///
    /// An exact match anywhere in the directory beats a substring match; among
    /// equally good matches the first in file order wins.
    pub fn resolve(&self, query: &str) -> Option<&Station> {
        let query = query.to_lowercase();

        self.stations
            .iter()
            .find(|s| s.name.to_lowercase() == query)
            .or_else(|| {
                self.stations
                    .iter()
                    .find(|s| s.name.to_lowercase().contains(&query))
            })
    }
}

/// Loads the directory at `path` and resolves `query` to a station id.
///
/// An unreadable or malformed directory is logged and treated as "no match".
pub fn resolve_station_id(path: &Path, query: &str) -> Option<String> {
    let directory = match StationDirectory::load(path) {
        Ok(directory) => directory,
        Err(e) => {
            tracing::warn!("Station lookup unavailable: {:#}", e);
            return None;
        }
    };

    if directory.is_empty() {
        tracing::warn!("Station directory {} has no locations", path.display());
        return None;
    }
    tracing::debug!(
        "Loaded {} stations from {}",
        directory.len(),
        path.display()
    );

    let station = directory.resolve(query)?;
    tracing::debug!("Resolved '{}' to {} ({})", query, station.name, station.id);
    Some(station.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn station(name: &str, id: &str) -> Station {
        Station {
            name: name.to_string(),
            id: id.to_string(),
        }
    }

    fn directory_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let dir = StationDirectory::new(vec![station("Cardinham", "3823")]);
        assert_eq!(dir.resolve("CARDINHAM").map(|s| s.id.as_str()), Some("3823"));
    }

    #[test]
    fn exact_match_beats_earlier_substring_match() {
        let dir = StationDirectory::new(vec![
            station("Heathrow Airport", "1"),
            station("Heathrow", "3772"),
        ]);
        assert_eq!(dir.resolve("heathrow").map(|s| s.id.as_str()), Some("3772"));
    }

    #[test]
    fn substring_match_takes_first_in_file_order() {
        let dir = StationDirectory::new(vec![
            station("North Wyke", "3840"),
            station("Wyke Regis", "9999"),
        ]);
        assert_eq!(dir.resolve("wyke").map(|s| s.id.as_str()), Some("3840"));
    }

    #[test]
    fn duplicate_names_resolve_to_the_first() {
        let dir = StationDirectory::new(vec![station("Valley", "3302"), station("Valley", "0000")]);
        assert_eq!(dir.resolve("valley").map(|s| s.id.as_str()), Some("3302"));
    }

    #[test]
    fn no_match_yields_none() {
        let dir = StationDirectory::new(vec![station("Lerwick", "3005")]);
        assert!(dir.resolve("Atlantis").is_none());
    }

    #[test]
    fn empty_directory_yields_none() {
        assert!(StationDirectory::default().resolve("Lerwick").is_none());
    }

    #[test]
    fn resolves_from_directory_file() {
        let file = directory_file(
            r#"{"Locations": {"Location": [
                {"name": "Baltasound", "id": "3002"},
                {"name": "Lerwick", "id": "3005"}
            ]}}"#,
        );
        assert_eq!(
            resolve_station_id(file.path(), "lerwick"),
            Some("3005".to_string())
        );
    }

    #[test]
    fn missing_file_yields_none() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_station_id(&dir.path().join("stations.json"), "Lerwick").is_none());
    }

    #[test]
    fn malformed_file_yields_none() {
        let file = directory_file("{ not json");
        assert!(resolve_station_id(file.path(), "Lerwick").is_none());
    }

    #[test]
    fn missing_structural_keys_is_an_empty_directory() {
        let file = directory_file(r#"{"Sites": []}"#);
        assert!(StationDirectory::load(file.path()).unwrap().is_empty());
        assert!(resolve_station_id(file.path(), "Lerwick").is_none());
    }

    #[test]
    fn record_without_id_yields_none() {
        let file = directory_file(r#"{"Locations": {"Location": [{"name": "Lerwick"}]}}"#);
        assert!(resolve_station_id(file.path(), "Lerwick").is_none());
    }

    #[test]
    fn directory_is_reread_on_every_call() {
        let file = directory_file(r#"{"Locations": {"Location": []}}"#);
        assert!(resolve_station_id(file.path(), "Lerwick").is_none());

        std::fs::write(
            file.path(),
            r#"{"Locations": {"Location": [{"name": "Lerwick", "id": "3005"}]}}"#,
        )
        .unwrap();
        assert_eq!(
            resolve_station_id(file.path(), "Lerwick"),
            Some("3005".to_string())
        );
    }
}
