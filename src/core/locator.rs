//! Positionszuordnung: Welche Region ist am nächsten, bin ich drin,
//! wie weit ist die Kontur entfernt?
//!
//! Läuft auf jedem neuen Live-Fix, unabhängig von laufenden
//! Routenberechnungen. O(Regionen), kein Graph-Zugriff.

use glam::DVec2;

use super::geometry::{distance_to_boundary_km, haversine_km, point_in_region, region_centroid};
use super::region::Region;

/// Ein Sample des Positions-Feeds. Wird pro Update komplett ersetzt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveFix {
    /// Längengrad
    pub lon: f64,
    /// Breitengrad
    pub lat: f64,
    /// Genauigkeitsradius in Metern, falls der Feed ihn liefert
    pub accuracy: Option<f64>,
}

impl LiveFix {
    /// Position als Lon/Lat-Vektor.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.lon, self.lat)
    }
}

/// Ergebnis der Zuordnung eines Punkts zu den Regionen.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFix {
    /// Label der Region mit dem geodätisch nächsten Schwerpunkt
    pub nearest_id: Option<String>,
    /// Liegt der Punkt innerhalb der nächsten Region?
    pub is_inside: bool,
    /// Distanz zur Außenkontur der nächsten Region in Kilometern;
    /// `None` wenn keine Kontur ableitbar ist
    pub boundary_distance_km: Option<f64>,
}

impl RegionFix {
    /// Konturdistanz in Metern, wie die Anzeige sie erwartet.
    pub fn boundary_distance_m(&self) -> Option<f64> {
        self.boundary_distance_km.map(|km| km * 1000.0)
    }
}

/// Ordnet einen Punkt der nächsten Region zu.
///
/// "Nächste" heißt: geodätisch kürzeste Distanz zum flächengewichteten
/// Schwerpunkt; bei Gleichstand gewinnt die zuerst gesehene Region.
pub fn locate(point: DVec2, regions: &[Region]) -> RegionFix {
    let mut nearest: Option<(&Region, f64)> = None;

    for region in regions {
        let Some(centroid) = region_centroid(&region.geometry) else {
            log::warn!("Region '{}' ohne Schwerpunkt (leere Geometrie)", region.id);
            continue;
        };
        let distance = haversine_km(point, centroid);
        match nearest {
            Some((_, best)) if distance >= best => {}
            _ => nearest = Some((region, distance)),
        }
    }

    let Some((region, _)) = nearest else {
        return RegionFix {
            nearest_id: None,
            is_inside: false,
            boundary_distance_km: None,
        };
    };

    RegionFix {
        nearest_id: Some(region.id.clone()),
        is_inside: point_in_region(point, &region.geometry),
        boundary_distance_km: distance_to_boundary_km(point, &region.geometry),
    }
}
