//! Aufbau des gewichteten, ungerichteten Regions-Graphen.
//!
//! Knoten entstehen strikt aus den Regionen; Kanten aus den auf den Features
//! deklarierten Nachbar-Labels der Form `"<from>_to_<to>"`. Der Graph ist
//! nach Konstruktion symmetrisch und danach read-only.

use glam::DVec2;
use indexmap::IndexMap;

use super::region::{collection_length_km, PathFeature, Region};

/// Gerichtete Kante auf der Adjazenzliste des `from`-Knotens.
///
/// Der Zielknoten steckt im Label-Suffix; ein separates Zielfeld gibt es
/// bewusst nicht, damit Kantengewichts-Lookups über dasselbe Label laufen.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Kanten-Label (`"<from>_to_<to>"`), benennt zugleich das Pfad-Bündel
    pub label: String,
    /// Aufgelöste Pfadlänge in Kilometern; `+∞` wenn kein Bündel passt
    pub weight: f64,
}

impl Edge {
    /// Zielknoten-ID aus dem Label-Suffix.
    pub fn target(&self) -> Option<&str> {
        split_edge_label(&self.label).map(|(_, to)| to)
    }
}

/// Zerlegt ein Kanten-Label in seine Endpunkte.
pub fn split_edge_label(label: &str) -> Option<(&str, &str)> {
    label.split_once("_to_")
}

/// Ein Knoten des Regions-Graphen.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionNode {
    /// Region-Label
    pub id: String,
    /// Äußerer Ring der Region (Rendering-Hinweis für den Aufrufer)
    pub coordinates: Vec<DVec2>,
    /// Ausgehende Kanten in Deklarationsreihenfolge
    pub neighbours: Vec<Edge>,
    /// Optionales Titelbild
    pub hero_image: Option<String>,
    /// Optionale Beschreibung
    pub description: Option<String>,
}

/// Gewichteter Regions-Graph; nach dem Aufbau unveränderlich.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionGraph {
    nodes: IndexMap<String, RegionNode>,
}

impl RegionGraph {
    /// Knoten per Label nachschlagen.
    pub fn node(&self, id: &str) -> Option<&RegionNode> {
        self.nodes.get(id)
    }

    /// Prüft ob ein Label ein Knoten des Graphen ist.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Alle Knoten-Labels in Einfüge-Reihenfolge.
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.keys().cloned().collect()
    }

    /// Iterator über alle Knoten (read-only).
    pub fn nodes_iter(&self) -> impl Iterator<Item = &RegionNode> {
        self.nodes.values()
    }

    /// Anzahl der Knoten.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Baut den Regions-Graphen aus Regionen und benannten Pfad-Bündeln.
///
/// Fehlertoleranz: einzelne fehlerhafte Deklarationen werden geloggt und
/// übersprungen, der Aufbau selbst schlägt nie fehl. Strukturell falsche
/// Container sind durch die Typen der Argumente bereits ausgeschlossen.
pub fn build_region_graph(
    regions: &[Region],
    path_collections: &IndexMap<String, Vec<PathFeature>>,
) -> RegionGraph {
    // Längentabelle: Bündel-Name → summierte deklarierte Länge
    let mut lengths: IndexMap<String, f64> = IndexMap::new();
    for (name, features) in path_collections {
        lengths.insert(name.clone(), collection_length_km(features));
    }

    // Knoten strikt aus den Regionen
    let mut nodes: IndexMap<String, RegionNode> = IndexMap::new();
    for region in regions {
        nodes.insert(
            region.id.clone(),
            RegionNode {
                id: region.id.clone(),
                coordinates: region.geometry.outer_ring().to_vec(),
                neighbours: Vec::new(),
                hero_image: region.hero_image.clone(),
                description: region.description.clone(),
            },
        );
    }

    // Kanten: vorwärts auf `from`, rückwärts auf `to`, je per Label dedupliziert
    for region in regions {
        for label in &region.neighbours {
            let Some((from, to)) = split_edge_label(label) else {
                log::warn!(
                    "Region '{}': Nachbar-Label '{}' folgt nicht dem Schema '<from>_to_<to>'",
                    region.id,
                    label
                );
                continue;
            };
            if !nodes.contains_key(from) || !nodes.contains_key(to) {
                log::warn!(
                    "Überspringe Pfad '{}': mindestens ein Endpunkt ist keine Region",
                    label
                );
                continue;
            }

            let weight = resolve_weight(&lengths, label);

            push_edge(&mut nodes, from, label.clone(), weight);
            let reverse_label = format!("{to}_to_{from}");
            push_edge(&mut nodes, to, reverse_label, weight);
        }
    }

    RegionGraph { nodes }
}

/// Hängt eine Kante an die Adjazenzliste an, sofern das Label dort noch
/// nicht vorkommt.
///
/// Die Deduplizierung vergleicht bewusst Labels, nicht aufgelöste
/// Endpunkt-Paare: zwei unterschiedlich geschriebene Labels für dasselbe
/// Paar bleiben beide erhalten.
fn push_edge(nodes: &mut IndexMap<String, RegionNode>, node_id: &str, label: String, weight: f64) {
    let Some(node) = nodes.get_mut(node_id) else {
        return;
    };
    if node.neighbours.iter().any(|e| e.label == label) {
        return;
    }
    node.neighbours.push(Edge { label, weight });
}

/// Löst das Kantengewicht über die dokumentierte Prioritätskette auf:
/// exakter Name → Kleinschreibung → case-insensitiver Scan gegen Name und
/// umgedrehten Namen → `+∞`.
fn resolve_weight(lengths: &IndexMap<String, f64>, label: &str) -> f64 {
    if let Some(weight) = lengths.get(label) {
        return *weight;
    }

    let lower = label.to_lowercase();
    if let Some(weight) = lengths.get(&lower) {
        return *weight;
    }

    let reversed_lower =
        split_edge_label(&lower).map(|(from, to)| format!("{to}_to_{from}"));
    for (name, weight) in lengths {
        let name_lower = name.to_lowercase();
        if name_lower == lower || Some(&name_lower) == reversed_lower.as_ref() {
            return *weight;
        }
    }

    f64::INFINITY
}
