//! Session-Intents: die einzigen Eingänge, die Session-Zustand mutieren.
//!
//! Genau zwei Familien: Positions-Feed (`FixReceived`/`FeedFailed`) und
//! Routenfinder (`RouteRequested`/`RouteCleared`/`RouteSaved`/`RouteRestored`).
//! Keine impliziten Neuberechnungen über Framework-Zyklen.

use crate::core::LiveFix;

/// Eingaben aus UI und Positions-Feed ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionIntent {
    /// Neues Sample des Positions-Feeds
    FixReceived { fix: LiveFix },
    /// Der Feed hat einen Fehler statt eines Samples geliefert;
    /// das Abo bleibt bestehen
    FeedFailed { message: String },
    /// Route zwischen zwei Regionen anfordern. Ein abgewählter Endpunkt
    /// (`None`) setzt die Anzeige zurück.
    RouteRequested {
        start_id: Option<String>,
        end_id: Option<String>,
    },
    /// Route explizit verwerfen (Nutzer-Reset)
    RouteCleared,
    /// Aktuelle Route checkpointen (z.B. vor einem Panel-Wechsel)
    RouteSaved,
    /// Checkpoint wiederherstellen
    RouteRestored,
}
