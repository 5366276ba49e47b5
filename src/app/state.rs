//! Zustandstypen des Routenfinders.

use crate::core::PathGeometry;

/// Phase des Routen-Zustandsautomaten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoutePhase {
    /// Keine aktive Route
    #[default]
    Idle,
    /// Eine Berechnung für dieses Paar ist unterwegs
    Pending { start_id: String, end_id: String },
    /// Zuletzt fertiggestellte Route, weiterhin angezeigt
    Resolved { start_id: String, end_id: String },
    /// Explizit zurückgesetzt; wie Idle, für die UI aber unterscheidbar
    Cleared,
}

/// Anzeigezustand des Routenfinders.
///
/// Wird ausschließlich über die Übergänge des Koordinators mutiert und an
/// die Rendering-Schicht nur als read-only Snapshot herausgegeben.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteFinderState {
    /// Gibt es aktuell eine angeforderte oder aufgelöste Route?
    pub is_active: bool,
    /// Start-Region der aktuellen Anfrage
    pub start_id: Option<String>,
    /// Ziel-Region der aktuellen Anfrage
    pub end_id: Option<String>,
    /// Knotenfolge der aufgelösten Route (leer solange Pending/ohne Pfad)
    pub node_sequence: Vec<String>,
    /// Konkrete Linien-Geometrien je Routen-Abschnitt
    pub path_geometries: Vec<PathGeometry>,
    /// Gesamtdistanz in Kilometern; `None` ohne Pfad
    pub total_distance: Option<f64>,
}

/// Zustand des Positions-Feeds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedStatus {
    /// Feed liefert Samples
    #[default]
    Healthy,
    /// Letztes Ereignis war ein Fehler; das Abo bleibt bestehen
    Failed { message: String },
}
