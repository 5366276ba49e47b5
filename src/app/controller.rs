//! Session-Controller: verarbeitet Intents zentral auf dem SessionState.

use anyhow::Result;

use super::coordinator::ResolvedRoute;
use super::events::SessionIntent;
use super::session::SessionState;
use super::state::FeedStatus;
use crate::core::{find_route, locate, LiveFix, PathFeature, PathGeometry};
use indexmap::IndexMap;

/// Orchestriert Feed-Samples und Routen-Anfragen auf den SessionState.
#[derive(Default)]
pub struct SessionController;

impl SessionController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent. Positions-Intents bleiben unabhängig von
    /// laufenden Routenberechnungen; sie blockieren nie.
    pub fn handle_intent(&mut self, state: &mut SessionState, intent: SessionIntent) -> Result<()> {
        match intent {
            SessionIntent::FixReceived { fix } => handle_fix(state, fix),
            SessionIntent::FeedFailed { message } => {
                log::warn!("Positions-Feed meldet Fehler: {message}");
                state.feed_status = FeedStatus::Failed { message };
            }
            SessionIntent::RouteRequested { start_id, end_id } => {
                handle_route_request(state, start_id, end_id);
            }
            SessionIntent::RouteCleared => state.coordinator.clear(),
            SessionIntent::RouteSaved => state.coordinator.save(),
            SessionIntent::RouteRestored => state.coordinator.restore(),
        }

        Ok(())
    }
}

/// Jedes Sample ersetzt den Fix komplett und stößt die Zuordnung neu an.
fn handle_fix(state: &mut SessionState, fix: LiveFix) {
    state.feed_status = FeedStatus::Healthy;
    state.position = Some(locate(fix.position(), &state.regions));
    state.live_fix = Some(fix);
}

fn handle_route_request(
    state: &mut SessionState,
    start_id: Option<String>,
    end_id: Option<String>,
) {
    let (Some(start_id), Some(end_id)) = (start_id, end_id) else {
        // Ein Endpunkt wurde abgewählt: Anzeige zurücksetzen
        state.coordinator.unset_endpoints();
        return;
    };

    let Some(ticket) = state.coordinator.request_route(&start_id, &end_id) else {
        return;
    };

    let route = find_route(&state.graph, ticket.start_id(), ticket.end_id());
    let leg_geometries = collect_leg_geometries(&state.paths, &route.node_sequence);
    state.coordinator.complete(
        ticket,
        Ok(ResolvedRoute {
            route,
            leg_geometries,
        }),
    );
}

/// Sucht für jedes aufeinanderfolgende Knotenpaar die konkrete
/// Linien-Geometrie, probiert dabei `"a_to_b"` und `"b_to_a"` (jeweils auch
/// in Kleinschreibung, wie die Gewichtsauflösung).
fn collect_leg_geometries(
    paths: &IndexMap<String, Vec<PathFeature>>,
    node_sequence: &[String],
) -> Vec<PathGeometry> {
    let mut geometries = Vec::new();

    for pair in node_sequence.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let candidates = [
            format!("{a}_to_{b}"),
            format!("{b}_to_{a}"),
            format!("{a}_to_{b}").to_lowercase(),
            format!("{b}_to_{a}").to_lowercase(),
        ];

        let Some(features) = candidates.iter().find_map(|name| paths.get(name)) else {
            log::warn!("Keine Pfad-Geometrie für Abschnitt {a} → {b}");
            continue;
        };
        geometries.extend(features.iter().map(|f| f.geometry.clone()));
    }

    geometries
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn line(points: &[(f64, f64)]) -> Vec<PathFeature> {
        vec![PathFeature {
            geometry: PathGeometry::LineString(
                points.iter().map(|(x, y)| DVec2::new(*x, *y)).collect(),
            ),
            length: Some(1.0),
            degree_length: None,
        }]
    }

    #[test]
    fn test_leg_geometrie_probiert_beide_richtungen() {
        let mut paths: IndexMap<String, Vec<PathFeature>> = IndexMap::new();
        // Nur das umgedrehte Bündel existiert
        paths.insert("B_to_A".to_string(), line(&[(0.0, 0.0), (0.01, 0.0)]));

        let sequence = vec!["A".to_string(), "B".to_string()];
        let geometries = collect_leg_geometries(&paths, &sequence);
        assert_eq!(geometries.len(), 1);
    }

    #[test]
    fn test_leg_geometrie_kleinschreibung() {
        let mut paths: IndexMap<String, Vec<PathFeature>> = IndexMap::new();
        paths.insert("a_to_b".to_string(), line(&[(0.0, 0.0), (0.01, 0.0)]));

        let sequence = vec!["A".to_string(), "B".to_string()];
        let geometries = collect_leg_geometries(&paths, &sequence);
        assert_eq!(geometries.len(), 1);
    }

    #[test]
    fn test_fehlender_abschnitt_wird_uebersprungen() {
        let paths: IndexMap<String, Vec<PathFeature>> = IndexMap::new();
        let sequence = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert!(collect_leg_geometries(&paths, &sequence).is_empty());
    }
}
