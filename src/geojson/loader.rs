//! Lädt Park-Daten (Regionen + Pfad-Bündel) aus einem Datenverzeichnis.
//!
//! Erwartetes Layout wie im Web-Export: `<dir>/*.geojson` für Regionen,
//! `<dir>/paths/*.geojson` für Pfad-Bündel; der Bündel-Name ist der
//! Dateiname ohne Endung.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;

use super::parser::{parse_path_collection, parse_region_collection};
use crate::core::{PathFeature, Region};

/// Alle `.geojson`-Dateien eines Verzeichnisses, alphabetisch sortiert
/// (stabile Knoten-Reihenfolge unabhängig vom Dateisystem).
fn geojson_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Datenverzeichnis '{}' nicht lesbar", dir.display()))?;

    let mut files: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().map_or(false, |ext| ext == "geojson")
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Lädt alle Regions-Features aus `dir`.
///
/// Einzelne unlesbare Dateien werden geloggt und übersprungen.
pub fn load_regions(dir: &Path) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    for file in geojson_files(dir)? {
        let json = match fs::read_to_string(&file) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Regions-Datei '{}' nicht lesbar: {err}", file.display());
                continue;
            }
        };
        match parse_region_collection(&json) {
            Ok(mut parsed) => regions.append(&mut parsed),
            Err(err) => {
                log::warn!("Regions-Datei '{}' übersprungen: {err:#}", file.display());
            }
        }
    }

    log::info!("{} Regionen geladen", regions.len());
    Ok(regions)
}

/// Lädt alle Pfad-Bündel aus `dir` (eine Datei = ein Bündel).
pub fn load_path_collections(dir: &Path) -> Result<IndexMap<String, Vec<PathFeature>>> {
    let mut collections = IndexMap::new();
    for file in geojson_files(dir)? {
        let Some(name) = file.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let json = match fs::read_to_string(&file) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Pfad-Datei '{}' nicht lesbar: {err}", file.display());
                continue;
            }
        };
        match parse_path_collection(&json) {
            Ok(features) => {
                collections.insert(name.to_string(), features);
            }
            Err(err) => {
                log::warn!("Pfad-Datei '{}' übersprungen: {err:#}", file.display());
            }
        }
    }

    log::info!("{} Pfad-Bündel geladen", collections.len());
    Ok(collections)
}

/// Komplettes Datenverzeichnis: Regionen plus Pfad-Bündel aus `paths/`.
pub fn load_park_data(dir: &Path) -> Result<(Vec<Region>, IndexMap<String, Vec<PathFeature>>)> {
    let regions = load_regions(dir)?;
    let paths_dir = dir.join("paths");
    let paths = if paths_dir.is_dir() {
        load_path_collections(&paths_dir)?
    } else {
        log::warn!("Kein Pfad-Verzeichnis '{}'", paths_dir.display());
        IndexMap::new()
    };
    Ok((regions, paths))
}
