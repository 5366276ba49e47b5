//! Parkguide CLI.
//!
//! Lädt ein Park-Datenverzeichnis und beantwortet eine Routen-Anfrage oder
//! listet die Regionen. Das eigentliche Rendering übernimmt die umgebende
//! Anwendung; hier gibt es nur die Query-Surface der Engine.

use std::path::Path;
use std::process::ExitCode;

use parkguide::{geojson, SessionController, SessionIntent, SessionState};

fn main() -> ExitCode {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<()> {
    let (data_dir, query) = match args {
        [_, dir] => (dir, None),
        [_, dir, start, end] => (dir, Some((start.clone(), end.clone()))),
        _ => {
            eprintln!("Aufruf: parkguide <datenverzeichnis> [<start> <ziel>]");
            anyhow::bail!("Ungültige Argumente");
        }
    };

    let (regions, paths) = geojson::load_park_data(Path::new(data_dir))?;
    let mut state = SessionState::new(regions, paths);

    let Some((start_id, end_id)) = query else {
        println!("Regionen:");
        for id in state.list_node_ids() {
            println!("  {id}");
        }
        return Ok(());
    };

    let mut controller = SessionController::new();
    controller.handle_intent(
        &mut state,
        SessionIntent::RouteRequested {
            start_id: Some(start_id.clone()),
            end_id: Some(end_id.clone()),
        },
    )?;

    let route = state.route();
    if route.node_sequence.is_empty() {
        println!("Kein Pfad von {start_id} nach {end_id}");
        return Ok(());
    }

    println!("Route: {}", route.node_sequence.join(" → "));
    if let Some(km) = route.total_distance {
        // Anzeige in Metern, intern Kilometer
        println!("Distanz: {:.2} m", km * 1000.0);
    }

    Ok(())
}
