//! Core-Domäne: Regionen, Graph, Kürzeste Wege, Positionszuordnung.

pub mod geometry;
pub mod graph;
pub mod locator;
pub mod region;
pub mod route;

pub use geometry::{
    distance_to_boundary_km, haversine_km, point_in_region, region_centroid, PathGeometry,
    RegionGeometry, EARTH_RADIUS_KM,
};
pub use graph::{build_region_graph, split_edge_label, Edge, RegionGraph, RegionNode};
pub use locator::{locate, LiveFix, RegionFix};
pub use region::{collection_length_km, PathFeature, Region};
pub use route::{find_route, reconstruct_path, shortest_paths, PathStep, RouteResult};
