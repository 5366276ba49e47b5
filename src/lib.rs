//! Parkguide Library.
//! Regions-Graph, Kürzeste-Wege-Suche und Routen-Zustandsautomat für
//! GPS-gestützte Park-Navigation; als Library exportiert für Tests und
//! Wiederverwendung.

pub mod app;
pub mod core;
pub mod geojson;

pub use app::{
    FeedStatus, ResolvedRoute, RouteCoordinator, RouteFinderState, RoutePhase, RouteTicket,
    SessionController, SessionIntent, SessionState,
};
pub use core::{
    build_region_graph, find_route, locate, reconstruct_path, shortest_paths, Edge, LiveFix,
    PathFeature, PathGeometry, PathStep, Region, RegionFix, RegionGeometry, RegionGraph,
    RegionNode, RouteResult,
};
pub use geojson::{load_park_data, parse_path_collection, parse_region_collection};
