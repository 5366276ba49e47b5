//! Getaggte Geometrie-Varianten und geodätische Hilfsfunktionen.
//!
//! Alle Koordinaten sind Lon/Lat-Paare in Grad (`DVec2 { x: lon, y: lat }`),
//! alle Distanzen Kilometer.

use glam::DVec2;

/// Mittlerer Erdradius in Kilometern (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Polygon-Geometrie einer Region.
///
/// Explizite Variante statt Duck-Typing: pro Kind genau eine
/// Ring-Extraktionsfunktion.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    /// Ein Polygon: äußerer Ring zuerst, danach optionale Löcher.
    Polygon(Vec<Vec<DVec2>>),
    /// Mehrere Teilpolygone, jeweils mit äußerem Ring zuerst.
    MultiPolygon(Vec<Vec<Vec<DVec2>>>),
}

impl RegionGeometry {
    /// Äußerer Ring des ersten Teilpolygons. Liefert die Knoten-Koordinaten
    /// für den Graphen; leer bei degenerierter Geometrie.
    pub fn outer_ring(&self) -> &[DVec2] {
        match self {
            RegionGeometry::Polygon(rings) => rings.first().map_or(&[], Vec::as_slice),
            RegionGeometry::MultiPolygon(polygons) => polygons
                .first()
                .and_then(|rings| rings.first())
                .map_or(&[], Vec::as_slice),
        }
    }

    /// Alle äußeren Ringe (ein Ring pro Teilpolygon), ohne Löcher.
    pub fn outer_rings(&self) -> Vec<&[DVec2]> {
        match self {
            RegionGeometry::Polygon(rings) => {
                rings.first().map(Vec::as_slice).into_iter().collect()
            }
            RegionGeometry::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|rings| rings.first().map(Vec::as_slice))
                .collect(),
        }
    }
}

/// Linien-Geometrie eines Pfad-Features.
#[derive(Debug, Clone, PartialEq)]
pub enum PathGeometry {
    LineString(Vec<DVec2>),
    MultiLineString(Vec<Vec<DVec2>>),
}

impl PathGeometry {
    /// Alle Linienzüge des Features.
    pub fn lines(&self) -> Vec<&[DVec2]> {
        match self {
            PathGeometry::LineString(line) => vec![line.as_slice()],
            PathGeometry::MultiLineString(lines) => {
                lines.iter().map(Vec::as_slice).collect()
            }
        }
    }
}

/// Großkreis-Distanz zwischen zwei Lon/Lat-Punkten in Kilometern (Haversine).
pub fn haversine_km(a: DVec2, b: DVec2) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Flächengewichteter Schwerpunkt eines Rings (Shoelace-Formel).
///
/// Degeneriert der Ring zu einer Linie oder einem Punkt, fällt das Ergebnis
/// auf den ersten Eckpunkt zurück; leere Ringe liefern `None`.
pub fn ring_centroid(ring: &[DVec2]) -> Option<DVec2> {
    let first = *ring.first()?;

    let mut cx = 0.0f64;
    let mut cy = 0.0f64;
    let mut area = 0.0f64;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        let cross = ring[i].x * ring[j].y - ring[j].x * ring[i].y;
        area += cross;
        cx += (ring[i].x + ring[j].x) * cross;
        cy += (ring[i].y + ring[j].y) * cross;
    }
    let area = area * 0.5;
    if area.abs() < f64::EPSILON {
        return Some(first);
    }
    Some(DVec2::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Ring-Flächeninhalt nach Shoelace (vorzeichenbehaftet, in Grad²).
fn ring_area(ring: &[DVec2]) -> f64 {
    let mut area = 0.0f64;
    for i in 0..ring.len() {
        let j = (i + 1) % ring.len();
        area += ring[i].x * ring[j].y - ring[j].x * ring[i].y;
    }
    area * 0.5
}

/// Flächengewichteter Schwerpunkt einer Region über alle Teilpolygone.
pub fn region_centroid(geometry: &RegionGeometry) -> Option<DVec2> {
    let rings = geometry.outer_rings();

    let mut weighted = DVec2::ZERO;
    let mut total_area = 0.0f64;
    for ring in &rings {
        let area = ring_area(ring).abs();
        let centroid = ring_centroid(ring)?;
        weighted += centroid * area;
        total_area += area;
    }

    if total_area < f64::EPSILON {
        // Alles degeneriert: erster verfügbarer Eckpunkt
        return rings.first().and_then(|ring| ring_centroid(ring));
    }
    Some(weighted / total_area)
}

/// Punkt-in-Ring-Test per Ray-Casting.
pub fn point_in_ring(point: DVec2, ring: &[DVec2]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        if (a.y > point.y) != (b.y > point.y) {
            let t = (point.y - a.y) / (b.y - a.y);
            if point.x < a.x + t * (b.x - a.x) {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Punkt-in-Region: innerhalb irgendeines äußeren Rings.
pub fn point_in_region(point: DVec2, geometry: &RegionGeometry) -> bool {
    geometry
        .outer_rings()
        .iter()
        .any(|ring| point_in_ring(point, ring))
}

/// Projiziert Lon/Lat in eine lokale äquirektangulare Ebene um `origin`
/// (Kilometer-Einheiten). Für die kurzen Distanzen innerhalb eines Parks
/// ausreichend genau.
fn to_local_km(point: DVec2, origin: DVec2) -> DVec2 {
    let lat_scale = EARTH_RADIUS_KM.to_radians();
    let lon_scale = lat_scale * origin.y.to_radians().cos();
    DVec2::new(
        (point.x - origin.x) * lon_scale,
        (point.y - origin.y) * lat_scale,
    )
}

/// Kürzeste Distanz vom Punkt zu einem Segment in der lokalen Ebene (km).
fn distance_to_segment_km(point: DVec2, a: DVec2, b: DVec2) -> f64 {
    let a_local = to_local_km(a, point);
    let b_local = to_local_km(b, point);
    let ab = b_local - a_local;

    let t = if ab.length_squared() < f64::EPSILON {
        0.0
    } else {
        (-a_local).dot(ab) / ab.length_squared()
    };
    let nearest = a_local + ab * t.clamp(0.0, 1.0);
    nearest.length()
}

/// Geodätische Distanz vom Punkt zur Ring-Kontur in Kilometern.
///
/// `None` wenn der Ring kein Segment hergibt (weniger als zwei Punkte).
pub fn distance_to_ring_km(point: DVec2, ring: &[DVec2]) -> Option<f64> {
    if ring.len() < 2 {
        return None;
    }

    let mut best = f64::INFINITY;
    for window in ring.windows(2) {
        best = best.min(distance_to_segment_km(point, window[0], window[1]));
    }
    // Kontur schließen, falls der Ring nicht explizit geschlossen ist
    let first = ring[0];
    let last = ring[ring.len() - 1];
    if first != last {
        best = best.min(distance_to_segment_km(point, last, first));
    }
    Some(best)
}

/// Distanz zur nächsten Außenkontur der Region in Kilometern.
pub fn distance_to_boundary_km(point: DVec2, geometry: &RegionGeometry) -> Option<f64> {
    geometry
        .outer_rings()
        .iter()
        .filter_map(|ring| distance_to_ring_km(point, ring))
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Quadratischer Ring mit 0.01° Kantenlänge um den Ursprung.
    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.01, 0.0),
            DVec2::new(0.01, 0.01),
            DVec2::new(0.0, 0.01),
            DVec2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_haversine_bekannte_distanz() {
        // Toronto → Ottawa, grob 352 km
        let toronto = DVec2::new(-79.3832, 43.6532);
        let ottawa = DVec2::new(-75.6972, 45.4215);
        let d = haversine_km(toronto, ottawa);
        assert!((d - 352.0).abs() < 5.0, "Distanz war {d} km");
    }

    #[test]
    fn test_haversine_identischer_punkt_ist_null() {
        let p = DVec2::new(-79.5, 43.7);
        assert_relative_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_ring_centroid_quadrat() {
        let c = ring_centroid(&unit_square()).expect("Schwerpunkt erwartet");
        assert_relative_eq!(c.x, 0.005, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.005, epsilon = 1e-12);
    }

    #[test]
    fn test_ring_centroid_degeneriert_faellt_auf_ersten_punkt_zurueck() {
        let line = vec![DVec2::new(1.0, 2.0), DVec2::new(3.0, 4.0)];
        assert_eq!(ring_centroid(&line), Some(DVec2::new(1.0, 2.0)));
        assert_eq!(ring_centroid(&[]), None);
    }

    #[test]
    fn test_point_in_ring() {
        let square = unit_square();
        assert!(point_in_ring(DVec2::new(0.005, 0.005), &square));
        assert!(!point_in_ring(DVec2::new(0.02, 0.005), &square));
        assert!(!point_in_ring(DVec2::new(-0.001, 0.005), &square));
    }

    #[test]
    fn test_point_in_multipolygon_beliebiger_teilring() {
        let far_square: Vec<DVec2> = unit_square()
            .iter()
            .map(|p| *p + DVec2::new(1.0, 1.0))
            .collect();
        let geometry = RegionGeometry::MultiPolygon(vec![vec![unit_square()], vec![far_square]]);

        assert!(point_in_region(DVec2::new(1.005, 1.005), &geometry));
        assert!(point_in_region(DVec2::new(0.005, 0.005), &geometry));
        assert!(!point_in_region(DVec2::new(0.5, 0.5), &geometry));
    }

    #[test]
    fn test_distance_to_ring_im_zentrum_positiv() {
        let square = unit_square();
        let d = distance_to_ring_km(DVec2::new(0.005, 0.005), &square)
            .expect("Distanz erwartet");
        // Halbe Kantenlänge: 0.005° Breite ≈ 0.556 km
        assert!(d > 0.5 && d < 0.6, "Distanz war {d} km");
    }

    #[test]
    fn test_distance_to_ring_zu_wenig_punkte() {
        assert_eq!(distance_to_ring_km(DVec2::ZERO, &[DVec2::ZERO]), None);
        assert_eq!(distance_to_ring_km(DVec2::ZERO, &[]), None);
    }

    #[test]
    fn test_outer_ring_leer_bei_degenerierter_geometrie() {
        let empty = RegionGeometry::Polygon(vec![]);
        assert!(empty.outer_ring().is_empty());
        assert!(empty.outer_rings().is_empty());
    }
}
