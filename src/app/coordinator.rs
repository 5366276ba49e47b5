//! Der Routen-Koordinator: serialisiert und dedupliziert Routen-Anfragen.
//!
//! Höchstens eine Berechnung ist gleichzeitig unterwegs. Ein neuer Request
//! für ein anderes Paar überholt die laufende Berechnung (cancel-and-replace);
//! deren Ergebnis wird beim Eintreffen verworfen statt angewendet.

use anyhow::Result;

use super::state::{RouteFinderState, RoutePhase};
use crate::core::{PathGeometry, RouteResult};

/// Ticket für eine angestoßene Berechnung. Nur das Ticket der jüngsten
/// Anfrage darf sein Ergebnis anwenden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTicket {
    start_id: String,
    end_id: String,
    generation: u64,
}

impl RouteTicket {
    /// Startpunkt, für den dieses Ticket rechnet.
    pub fn start_id(&self) -> &str {
        &self.start_id
    }

    /// Zielpunkt, für den dieses Ticket rechnet.
    pub fn end_id(&self) -> &str {
        &self.end_id
    }
}

/// Fertig berechnete Route samt Abschnitts-Geometrien.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoute {
    pub route: RouteResult,
    pub leg_geometries: Vec<PathGeometry>,
}

/// Zustandsautomat über [`RouteFinderState`].
#[derive(Debug, Default)]
pub struct RouteCoordinator {
    state: RouteFinderState,
    phase: RoutePhase,
    generation: u64,
    saved: Option<RouteFinderState>,
}

impl RouteCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Anzeigezustand (read-only Snapshot).
    pub fn state(&self) -> &RouteFinderState {
        &self.state
    }

    /// Aktuelle Phase des Automaten.
    pub fn phase(&self) -> &RoutePhase {
        &self.phase
    }

    /// Stößt eine Routenberechnung an.
    ///
    /// No-op (`None`) wenn Start gleich Ziel ist, einer der Endpunkte leer
    /// ist, das identische Paar bereits unterwegs ist oder es das zuletzt
    /// aufgelöste Paar ist. Andernfalls überholt die Anfrage eine eventuell
    /// laufende Berechnung.
    pub fn request_route(&mut self, start_id: &str, end_id: &str) -> Option<RouteTicket> {
        if start_id.is_empty() || end_id.is_empty() || start_id == end_id {
            return None;
        }

        match &self.phase {
            RoutePhase::Pending { start_id: s, end_id: e }
            | RoutePhase::Resolved { start_id: s, end_id: e }
                if s == start_id && e == end_id =>
            {
                log::debug!("Routen-Anfrage {start_id} → {end_id} dedupliziert");
                return None;
            }
            _ => {}
        }

        if matches!(self.phase, RoutePhase::Pending { .. }) {
            log::info!("Laufende Routenberechnung wird durch {start_id} → {end_id} überholt");
        }

        self.generation += 1;
        self.phase = RoutePhase::Pending {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
        };
        self.state.is_active = true;
        self.state.start_id = Some(start_id.to_string());
        self.state.end_id = Some(end_id.to_string());

        Some(RouteTicket {
            start_id: start_id.to_string(),
            end_id: end_id.to_string(),
            generation: self.generation,
        })
    }

    /// Wendet ein Berechnungsergebnis an.
    ///
    /// Tickets, die nicht mehr zur jüngsten Anfrage gehören, werden
    /// verworfen. Fehlgeschlagene Berechnungen führen zurück nach `Idle`;
    /// der Automat bleibt nie in `Pending` hängen.
    pub fn complete(&mut self, ticket: RouteTicket, outcome: Result<ResolvedRoute>) {
        if ticket.generation != self.generation {
            log::info!(
                "Verwerfe überholtes Routenergebnis {} → {}",
                ticket.start_id,
                ticket.end_id
            );
            return;
        }

        match outcome {
            Ok(resolved) => {
                self.phase = RoutePhase::Resolved {
                    start_id: ticket.start_id.clone(),
                    end_id: ticket.end_id.clone(),
                };
                self.state = RouteFinderState {
                    is_active: true,
                    start_id: Some(ticket.start_id),
                    end_id: Some(ticket.end_id),
                    node_sequence: resolved.route.node_sequence,
                    path_geometries: resolved.leg_geometries,
                    total_distance: resolved.route.total_distance,
                };
            }
            Err(err) => {
                log::error!(
                    "Routenberechnung {} → {} fehlgeschlagen: {err:#}",
                    ticket.start_id,
                    ticket.end_id
                );
                self.phase = RoutePhase::Idle;
                self.state = RouteFinderState::default();
            }
        }
    }

    /// Expliziter Reset durch den Nutzer; verwirft auch den Checkpoint.
    pub fn clear(&mut self) {
        self.generation += 1; // laufende Tickets entwerten
        self.phase = RoutePhase::Cleared;
        self.state = RouteFinderState::default();
        self.saved = None;
    }

    /// Ein Endpunkt wurde abgewählt: Anzeige zurücksetzen, Checkpoint
    /// aber behalten (transienter UI-Zustand, kein Nutzer-Reset).
    pub fn unset_endpoints(&mut self) {
        self.generation += 1;
        self.phase = RoutePhase::Cleared;
        self.state = RouteFinderState::default();
    }

    /// Checkpointet die zuletzt aufgelöste Route.
    pub fn save(&mut self) {
        if matches!(self.phase, RoutePhase::Resolved { .. }) {
            self.saved = Some(self.state.clone());
        }
    }

    /// Stellt den Checkpoint wieder her; No-op ohne Checkpoint.
    pub fn restore(&mut self) {
        let Some(saved) = self.saved.clone() else {
            return;
        };
        self.phase = match (saved.start_id.clone(), saved.end_id.clone()) {
            (Some(start_id), Some(end_id)) => RoutePhase::Resolved { start_id, end_id },
            _ => RoutePhase::Idle,
        };
        self.state = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn resolved(sequence: &[&str], distance: f64) -> ResolvedRoute {
        let start = sequence.first().copied().unwrap_or_default();
        let end = sequence.last().copied().unwrap_or_default();
        ResolvedRoute {
            route: RouteResult {
                start_id: start.to_string(),
                end_id: end.to_string(),
                node_sequence: sequence.iter().map(|s| s.to_string()).collect(),
                total_distance: Some(distance),
            },
            leg_geometries: Vec::new(),
        }
    }

    #[test]
    fn test_request_mit_gleichen_endpunkten_ist_noop() {
        let mut coordinator = RouteCoordinator::new();
        assert!(coordinator.request_route("A", "A").is_none());
        assert!(coordinator.request_route("", "B").is_none());
        assert!(coordinator.request_route("A", "").is_none());
        assert_eq!(*coordinator.phase(), RoutePhase::Idle);
    }

    #[test]
    fn test_identische_anfrage_wird_nur_einmal_gerechnet() {
        let mut coordinator = RouteCoordinator::new();

        let ticket = coordinator.request_route("A", "D").expect("Ticket erwartet");
        // Identisches Paar während Pending: No-op
        assert!(coordinator.request_route("A", "D").is_none());

        coordinator.complete(ticket, Ok(resolved(&["A", "B", "D"], 3.0)));
        // Identisches Paar nach Resolved: weiterhin No-op
        assert!(coordinator.request_route("A", "D").is_none());
    }

    #[test]
    fn test_ueberholte_berechnung_wird_verworfen() {
        let mut coordinator = RouteCoordinator::new();

        let stale = coordinator.request_route("A", "D").expect("Ticket erwartet");
        let fresh = coordinator.request_route("A", "B").expect("Ticket erwartet");

        // Das alte Ergebnis trifft zu spät ein
        coordinator.complete(stale, Ok(resolved(&["A", "C", "D"], 9.0)));
        assert!(
            matches!(coordinator.phase(), RoutePhase::Pending { .. }),
            "verspätetes Ergebnis darf nicht angewendet werden"
        );
        assert!(coordinator.state().node_sequence.is_empty());

        coordinator.complete(fresh, Ok(resolved(&["A", "B"], 1.0)));
        assert_eq!(
            *coordinator.phase(),
            RoutePhase::Resolved {
                start_id: "A".to_string(),
                end_id: "B".to_string()
            }
        );
        assert_eq!(coordinator.state().node_sequence, vec!["A", "B"]);
    }

    #[test]
    fn test_fehlschlag_fuehrt_nach_idle() {
        let mut coordinator = RouteCoordinator::new();
        let ticket = coordinator.request_route("A", "B").expect("Ticket erwartet");

        coordinator.complete(ticket, Err(anyhow!("Testfehler")));
        assert_eq!(*coordinator.phase(), RoutePhase::Idle);
        assert!(!coordinator.state().is_active);
    }

    #[test]
    fn test_save_restore_roundtrip() {
        let mut coordinator = RouteCoordinator::new();
        let ticket = coordinator.request_route("A", "B").expect("Ticket erwartet");
        coordinator.complete(ticket, Ok(resolved(&["A", "B"], 1.5)));

        coordinator.save();
        let snapshot = coordinator.state().clone();

        // Transienter UI-Zustand wählt die Endpunkte ab
        coordinator.unset_endpoints();
        assert_eq!(*coordinator.phase(), RoutePhase::Cleared);
        assert!(coordinator.state().node_sequence.is_empty());

        coordinator.restore();
        assert_eq!(*coordinator.state(), snapshot);
        assert!(matches!(coordinator.phase(), RoutePhase::Resolved { .. }));
    }

    #[test]
    fn test_restore_ohne_checkpoint_ist_noop() {
        let mut coordinator = RouteCoordinator::new();
        coordinator.restore();
        assert_eq!(*coordinator.phase(), RoutePhase::Idle);
    }

    #[test]
    fn test_clear_verwirft_checkpoint() {
        let mut coordinator = RouteCoordinator::new();
        let ticket = coordinator.request_route("A", "B").expect("Ticket erwartet");
        coordinator.complete(ticket, Ok(resolved(&["A", "B"], 1.5)));
        coordinator.save();

        coordinator.clear();
        assert_eq!(*coordinator.phase(), RoutePhase::Cleared);

        coordinator.restore();
        assert!(coordinator.state().node_sequence.is_empty());
    }

    #[test]
    fn test_clear_entwertet_laufende_tickets() {
        let mut coordinator = RouteCoordinator::new();
        let ticket = coordinator.request_route("A", "B").expect("Ticket erwartet");

        coordinator.clear();
        coordinator.complete(ticket, Ok(resolved(&["A", "B"], 1.0)));
        assert_eq!(*coordinator.phase(), RoutePhase::Cleared);
        assert!(coordinator.state().node_sequence.is_empty());
    }
}
