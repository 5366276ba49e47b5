//! Sitzungskontext: unveränderlicher Graph plus veränderlicher
//! Routen- und Positionszustand.
//!
//! Kein ambienter Singleton: der Kontext wird einmal pro Sitzung gebaut und
//! explizit an Controller und Aufrufer gereicht. Der Graph ist nach dem
//! Aufbau read-only; ein neuer Datenstand heißt neuer Kontext.

use std::sync::Arc;

use indexmap::IndexMap;

use super::coordinator::RouteCoordinator;
use super::state::{FeedStatus, RouteFinderState};
use crate::core::{
    build_region_graph, find_route, LiveFix, PathFeature, Region, RegionFix, RegionGraph,
    RouteResult,
};

/// Zustand einer Navigations-Sitzung.
pub struct SessionState {
    /// Geladene Regionen (für den Locator; unveränderlich)
    pub regions: Vec<Region>,
    /// Benannte Pfad-Bündel (für Gewichts- und Geometrie-Lookups)
    pub paths: IndexMap<String, Vec<PathFeature>>,
    /// Der aus den Daten gebaute Regions-Graph
    pub graph: Arc<RegionGraph>,
    /// Routen-Zustandsautomat
    pub coordinator: RouteCoordinator,
    /// Jüngstes Feed-Sample (wird pro Update komplett ersetzt)
    pub live_fix: Option<LiveFix>,
    /// Zuordnung des jüngsten Samples zu den Regionen
    pub position: Option<RegionFix>,
    /// Statusflagge des Positions-Feeds
    pub feed_status: FeedStatus,
}

impl SessionState {
    /// Baut den Sitzungskontext; der Graph entsteht genau einmal hier.
    pub fn new(regions: Vec<Region>, paths: IndexMap<String, Vec<PathFeature>>) -> Self {
        let graph = Arc::new(build_region_graph(&regions, &paths));
        log::info!(
            "Sitzung gestartet: {} Regionen, {} Pfad-Bündel, {} Graph-Knoten",
            regions.len(),
            paths.len(),
            graph.node_count()
        );
        Self {
            regions,
            paths,
            graph,
            coordinator: RouteCoordinator::new(),
            live_fix: None,
            position: None,
            feed_status: FeedStatus::default(),
        }
    }

    /// Direkte Routen-Abfrage am Query-Surface, ohne den Zustandsautomaten
    /// anzufassen.
    pub fn find_route(&self, start_id: &str, end_id: &str) -> RouteResult {
        find_route(&self.graph, start_id, end_id)
    }

    /// Alle Knoten-Labels des Graphen in stabiler Reihenfolge.
    pub fn list_node_ids(&self) -> Vec<String> {
        self.graph.node_ids()
    }

    /// Aktueller Routenfinder-Zustand als read-only Snapshot.
    pub fn route(&self) -> &RouteFinderState {
        self.coordinator.state()
    }
}
