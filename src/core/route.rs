//! Single-Source-Kürzeste-Wege (Dijkstra) und Pfad-Rekonstruktion.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::graph::RegionGraph;

/// Solver-Eintrag pro Knoten: beste bekannte Distanz plus Vorgänger.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep {
    /// Distanz vom Startknoten in Kilometern; `+∞` = (noch) unerreichbar
    pub distance: f64,
    /// Vorgänger auf dem kürzesten Pfad; `None` am Start und bei Unerreichbarkeit
    pub previous: Option<String>,
}

/// Fertige Route zwischen zwei Regionen.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub start_id: String,
    pub end_id: String,
    /// Knotenfolge inklusive beider Endpunkte; leer wenn kein Pfad existiert
    pub node_sequence: Vec<String>,
    /// Gesamtdistanz in Kilometern; `None` wenn kein Pfad existiert
    pub total_distance: Option<f64>,
}

/// Frontier-Eintrag; `Ord` invertiert die Distanz, damit der Max-Heap der
/// Standardbibliothek als Min-Heap arbeitet.
#[derive(Debug)]
struct FrontierEntry {
    distance: f64,
    node_id: String,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

/// Klassischer Dijkstra über den Regions-Graphen.
///
/// Kanten mit Gewicht `+∞` sind strukturell traversierbar, verbessern aber
/// nie eine Distanz. Ein unbekannter `start_id` liefert eine Karte, in der
/// jeder Knoten auf `+∞` steht — kein Fehler.
pub fn shortest_paths(graph: &RegionGraph, start_id: &str) -> HashMap<String, PathStep> {
    let mut steps: HashMap<String, PathStep> = graph
        .nodes_iter()
        .map(|node| {
            (
                node.id.clone(),
                PathStep {
                    distance: f64::INFINITY,
                    previous: None,
                },
            )
        })
        .collect();
    if let Some(step) = steps.get_mut(start_id) {
        step.distance = 0.0;
    }

    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        distance: 0.0,
        node_id: start_id.to_string(),
    });
    let mut settled: HashSet<String> = HashSet::new();

    while let Some(entry) = frontier.pop() {
        // Bereits fixierte Knoten: veralteter Heap-Eintrag, überspringen
        if !settled.insert(entry.node_id.clone()) {
            continue;
        }
        let Some(node) = graph.node(&entry.node_id) else {
            continue;
        };
        let base = steps[&entry.node_id].distance;

        for edge in &node.neighbours {
            // Zielknoten steckt im Label-Suffix
            let Some(target) = edge.target() else {
                continue;
            };
            let candidate = base + edge.weight;
            let Some(target_step) = steps.get_mut(target) else {
                continue;
            };
            if candidate < target_step.distance {
                target_step.distance = candidate;
                target_step.previous = Some(entry.node_id.clone());
                frontier.push(FrontierEntry {
                    distance: candidate,
                    node_id: target.to_string(),
                });
            }
        }
    }

    steps
}

/// Rekonstruiert die Knotenfolge bis `end_id` aus den Vorgänger-Zeigern.
///
/// Unerreichbare oder unbekannte Endknoten liefern `[end_id]`. Die Schleife
/// ist durch die Knotenzahl begrenzt, ein (fehlerhafter) Zyklus in der
/// Vorgänger-Kette kann sie also nicht einfrieren.
pub fn reconstruct_path(steps: &HashMap<String, PathStep>, end_id: &str) -> Vec<String> {
    let mut sequence = vec![end_id.to_string()];
    let mut current = end_id;
    let mut hops = 0usize;

    while let Some(previous) = steps.get(current).and_then(|s| s.previous.as_deref()) {
        hops += 1;
        if hops > steps.len() {
            log::warn!("Vorgänger-Kette zu '{end_id}' zyklisch, Rekonstruktion abgebrochen");
            break;
        }
        sequence.insert(0, previous.to_string());
        current = previous;
    }

    sequence
}

/// Komplettlauf: Kürzeste-Wege-Suche plus Rekonstruktion.
pub fn find_route(graph: &RegionGraph, start_id: &str, end_id: &str) -> RouteResult {
    let steps = shortest_paths(graph, start_id);

    let distance = steps.get(end_id).map(|s| s.distance);
    match distance {
        Some(d) if d.is_finite() => RouteResult {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            node_sequence: reconstruct_path(&steps, end_id),
            total_distance: Some(d),
        },
        _ => RouteResult {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            node_sequence: Vec::new(),
            total_distance: None,
        },
    }
}
