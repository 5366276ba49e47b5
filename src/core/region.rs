//! Regionen und Pfad-Features: die geladenen Rohdaten des Parks.

use super::geometry::{PathGeometry, RegionGeometry};

/// Eine benannte Parkzone. Unveränderlich nach dem Laden; Identität ist das Label.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Eindeutiges Label der Region
    pub id: String,
    /// Polygon- oder Multipolygon-Geometrie
    pub geometry: RegionGeometry,
    /// Optionales Titelbild für Panels
    pub hero_image: Option<String>,
    /// Optionale Freitext-Beschreibung
    pub description: Option<String>,
    /// Auf dem Feature deklarierte Nachbar-Kanten-Labels (`"<from>_to_<to>"`)
    pub neighbours: Vec<String>,
}

/// Ein Linien-Feature eines benannten Pfad-Bündels.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFeature {
    /// Linien-Geometrie des physischen Wegs
    pub geometry: PathGeometry,
    /// Deklarierte Länge in Kilometern (fehlend/nicht-numerisch zählt als 0)
    pub length: Option<f64>,
    /// Ursprüngliche Länge in Grad, falls die Quelle sie mitführt
    pub degree_length: Option<f64>,
}

/// Summierte deklarierte Länge eines Pfad-Bündels in Kilometern.
pub fn collection_length_km(features: &[PathFeature]) -> f64 {
    features.iter().filter_map(|f| f.length).sum()
}
