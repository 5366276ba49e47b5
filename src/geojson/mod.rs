//! GeoJSON-Eingabeschicht: Parser und Verzeichnis-Loader.

pub mod loader;
pub mod parser;

pub use loader::{load_park_data, load_path_collections, load_regions};
pub use parser::{parse_path_collection, parse_region_collection};
