use std::collections::HashMap;

use itertools::Itertools;
use once_cell::sync::{Lazy, OnceCell};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::coords::{CornerPoint, CubeCoord, hex_corners};
use crate::types::Resource;

mod ports;

pub use ports::{PORT_COUNT, PORT_TYPES, PortError, PortSite, assign_ports};

pub type HexId = u8;
pub type VertexId = u16;
pub type EdgeId = u16;

/// A board layout: the hex coordinates in id order plus the exact entity
/// counts the generated topology must produce.
#[derive(Debug, Clone)]
pub struct Layout {
    pub coords: Vec<CubeCoord>,
    pub vertex_count: usize,
    pub edge_count: usize,
}

impl Layout {
    pub fn standard() -> &'static Layout {
        &STANDARD_LAYOUT
    }

    pub fn hex_count(&self) -> usize {
        self.coords.len()
    }
}

/// The classic 19-hex 3-4-5-4-3 board: center tile, inner ring, outer ring.
static STANDARD_LAYOUT: Lazy<Layout> = Lazy::new(|| Layout {
    coords: vec![
        CubeCoord::new(0, 0, 0),
        CubeCoord::new(1, -1, 0),
        CubeCoord::new(0, -1, 1),
        CubeCoord::new(-1, 0, 1),
        CubeCoord::new(-1, 1, 0),
        CubeCoord::new(0, 1, -1),
        CubeCoord::new(1, 0, -1),
        CubeCoord::new(2, -2, 0),
        CubeCoord::new(1, -2, 1),
        CubeCoord::new(0, -2, 2),
        CubeCoord::new(-1, -1, 2),
        CubeCoord::new(-2, 0, 2),
        CubeCoord::new(-2, 1, 1),
        CubeCoord::new(-2, 2, 0),
        CubeCoord::new(-1, 2, -1),
        CubeCoord::new(0, 2, -2),
        CubeCoord::new(1, 1, -2),
        CubeCoord::new(2, 0, -2),
        CubeCoord::new(2, -1, -1),
    ],
    vertex_count: 54,
    edge_count: 72,
});

/// Fatal board construction failure. There is no recovery path; callers
/// abort rather than degrade.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error(transparent)]
    Ports(#[from] PortError),
}

#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("expected {expected} vertices, derived {actual}")]
    VertexCount { expected: usize, actual: usize },
    #[error("expected {expected} edges, derived {actual}")]
    EdgeCount { expected: usize, actual: usize },
    #[error("vertex {vertex} has degree {degree}, at most 3 edges may meet")]
    VertexDegree { vertex: VertexId, degree: usize },
    #[error("edge {edge} does not join two distinct vertices")]
    DegenerateEdge { edge: EdgeId },
}

/// The static hex/vertex/edge graph of a board.
///
/// Built once per game by deduplicating exact integer corner points; ids are
/// assigned in first-encounter order over the layout's hex list and never
/// change afterwards. Generation rejects the whole board if the counts do
/// not match the layout.
#[derive(Debug, Clone)]
pub struct BoardTopology {
    coords: Vec<CubeCoord>,
    vertex_points: Vec<CornerPoint>,
    hex_vertices: Vec<[VertexId; 6]>,
    hex_edges: Vec<[EdgeId; 6]>,
    vertex_edges: Vec<Vec<EdgeId>>,
    vertex_neighbors: Vec<Vec<VertexId>>,
    vertex_hexes: Vec<Vec<HexId>>,
    edge_vertices: Vec<(VertexId, VertexId)>,
    edge_hexes: Vec<Vec<HexId>>,
    edge_lookup: HashMap<(VertexId, VertexId), EdgeId>,
    border_edges: Vec<EdgeId>,
}

impl BoardTopology {
    pub fn generate(layout: &Layout) -> Result<Self, TopologyError> {
        let mut vertex_ids: HashMap<CornerPoint, VertexId> = HashMap::new();
        let mut vertex_points: Vec<CornerPoint> = Vec::new();
        let mut edge_lookup: HashMap<(VertexId, VertexId), EdgeId> = HashMap::new();
        let mut edge_vertices: Vec<(VertexId, VertexId)> = Vec::new();
        let mut hex_vertices: Vec<[VertexId; 6]> = Vec::new();
        let mut hex_edges: Vec<[EdgeId; 6]> = Vec::new();

        for &coord in &layout.coords {
            let corners = hex_corners(coord).map(|point| {
                *vertex_ids.entry(point).or_insert_with(|| {
                    vertex_points.push(point);
                    (vertex_points.len() - 1) as VertexId
                })
            });

            let mut edges = [0 as EdgeId; 6];
            for (slot, (a, b)) in corners.iter().copied().circular_tuple_windows().enumerate() {
                let key = normalize_pair(a, b);
                let id = *edge_lookup.entry(key).or_insert_with(|| {
                    edge_vertices.push(key);
                    (edge_vertices.len() - 1) as EdgeId
                });
                edges[slot] = id;
            }
            hex_vertices.push(corners);
            hex_edges.push(edges);
        }

        let mut vertex_edges: Vec<Vec<EdgeId>> = vec![Vec::new(); vertex_points.len()];
        let mut vertex_neighbors: Vec<Vec<VertexId>> = vec![Vec::new(); vertex_points.len()];
        for (id, &(a, b)) in edge_vertices.iter().enumerate() {
            vertex_edges[a as usize].push(id as EdgeId);
            vertex_edges[b as usize].push(id as EdgeId);
            vertex_neighbors[a as usize].push(b);
            vertex_neighbors[b as usize].push(a);
        }

        let mut vertex_hexes: Vec<Vec<HexId>> = vec![Vec::new(); vertex_points.len()];
        let mut edge_hexes: Vec<Vec<HexId>> = vec![Vec::new(); edge_vertices.len()];
        for (hex, corners) in hex_vertices.iter().enumerate() {
            for &vertex in corners {
                vertex_hexes[vertex as usize].push(hex as HexId);
            }
            for &edge in &hex_edges[hex] {
                edge_hexes[edge as usize].push(hex as HexId);
            }
        }

        let border_edges: Vec<EdgeId> = edge_hexes
            .iter()
            .enumerate()
            .filter(|(_, hexes)| hexes.len() == 1)
            .map(|(id, _)| id as EdgeId)
            .collect();

        let topology = Self {
            coords: layout.coords.clone(),
            vertex_points,
            hex_vertices,
            hex_edges,
            vertex_edges,
            vertex_neighbors,
            vertex_hexes,
            edge_vertices,
            edge_hexes,
            edge_lookup,
            border_edges,
        };
        topology.validate(layout)?;
        Ok(topology)
    }

    fn validate(&self, layout: &Layout) -> Result<(), TopologyError> {
        if self.vertex_points.len() != layout.vertex_count {
            return Err(TopologyError::VertexCount {
                expected: layout.vertex_count,
                actual: self.vertex_points.len(),
            });
        }
        if self.edge_vertices.len() != layout.edge_count {
            return Err(TopologyError::EdgeCount {
                expected: layout.edge_count,
                actual: self.edge_vertices.len(),
            });
        }
        for (vertex, edges) in self.vertex_edges.iter().enumerate() {
            if edges.len() > 3 {
                return Err(TopologyError::VertexDegree {
                    vertex: vertex as VertexId,
                    degree: edges.len(),
                });
            }
        }
        for (edge, &(a, b)) in self.edge_vertices.iter().enumerate() {
            if a == b {
                return Err(TopologyError::DegenerateEdge {
                    edge: edge as EdgeId,
                });
            }
        }
        Ok(())
    }

    pub fn hex_count(&self) -> usize {
        self.coords.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_points.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_vertices.len()
    }

    pub fn hex_coord(&self, hex: HexId) -> CubeCoord {
        self.coords[hex as usize]
    }

    pub fn contains_hex(&self, hex: HexId) -> bool {
        (hex as usize) < self.coords.len()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        (vertex as usize) < self.vertex_points.len()
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        (edge as usize) < self.edge_vertices.len()
    }

    pub fn hex_vertices(&self, hex: HexId) -> &[VertexId; 6] {
        &self.hex_vertices[hex as usize]
    }

    pub fn hex_edges(&self, hex: HexId) -> &[EdgeId; 6] {
        &self.hex_edges[hex as usize]
    }

    pub fn vertex_point(&self, vertex: VertexId) -> CornerPoint {
        self.vertex_points[vertex as usize]
    }

    pub fn vertex_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.vertex_edges[vertex as usize]
    }

    pub fn vertex_neighbors(&self, vertex: VertexId) -> &[VertexId] {
        &self.vertex_neighbors[vertex as usize]
    }

    pub fn vertex_hexes(&self, vertex: VertexId) -> &[HexId] {
        &self.vertex_hexes[vertex as usize]
    }

    pub fn edge_vertices(&self, edge: EdgeId) -> (VertexId, VertexId) {
        self.edge_vertices[edge as usize]
    }

    pub fn edge_hexes(&self, edge: EdgeId) -> &[HexId] {
        &self.edge_hexes[edge as usize]
    }

    /// Edges sharing a vertex with the given edge.
    pub fn edge_adjacent_edges(&self, edge: EdgeId) -> impl Iterator<Item = EdgeId> + '_ {
        let (a, b) = self.edge_vertices(edge);
        self.vertex_edges(a)
            .iter()
            .chain(self.vertex_edges(b).iter())
            .copied()
            .filter(move |&other| other != edge)
    }

    pub fn edge_between(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&normalize_pair(a, b)).copied()
    }

    /// Edges incident to exactly one hex, in id order.
    pub fn border_edges(&self) -> &[EdgeId] {
        &self.border_edges
    }

    /// Midpoint of an edge, doubled again so it stays integral.
    pub fn edge_midpoint(&self, edge: EdgeId) -> CornerPoint {
        let (a, b) = self.edge_vertices(edge);
        let pa = self.vertex_point(a);
        let pb = self.vertex_point(b);
        CornerPoint::new(pa.x + pb.x, pa.y + pb.y)
    }
}

fn normalize_pair(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// The fixed tile multiset: 3 brick, 4 wood, 4 sheep, 4 wheat, 3 ore and one
/// desert (`None`).
pub const TILE_RESOURCES: [Option<Resource>; 19] = [
    Some(Resource::Brick),
    Some(Resource::Brick),
    Some(Resource::Brick),
    Some(Resource::Wood),
    Some(Resource::Wood),
    Some(Resource::Wood),
    Some(Resource::Wood),
    Some(Resource::Sheep),
    Some(Resource::Sheep),
    Some(Resource::Sheep),
    Some(Resource::Sheep),
    Some(Resource::Wheat),
    Some(Resource::Wheat),
    Some(Resource::Wheat),
    Some(Resource::Wheat),
    Some(Resource::Ore),
    Some(Resource::Ore),
    Some(Resource::Ore),
    None,
];

/// The fixed number-token multiset for the 18 non-desert hexes.
pub const NUMBER_TOKENS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Mutable per-hex state layered over the static topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileState {
    pub resource: Option<Resource>,
    pub number: Option<u8>,
    pub has_robber: bool,
}

/// Fixed slices standing in for the shuffles, for deterministic setups.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOverrides<'a> {
    pub resources: Option<&'a [Option<Resource>]>,
    pub numbers: Option<&'a [u8]>,
    pub ports: Option<&'a [Option<Resource>]>,
}

/// Shuffle resources onto the hexes and number tokens onto the non-desert
/// hexes in assignment order. The desert starts with the robber.
fn assign_tiles(
    hex_count: usize,
    overrides: LayoutOverrides<'_>,
    rng: &mut impl rand::Rng,
) -> Vec<TileState> {
    let mut resources = overrides
        .resources
        .map(|slice| slice.to_vec())
        .unwrap_or_else(|| TILE_RESOURCES.to_vec());
    if overrides.resources.is_none() {
        resources.shuffle(rng);
    }

    let mut numbers = overrides
        .numbers
        .map(|slice| slice.to_vec())
        .unwrap_or_else(|| NUMBER_TOKENS.to_vec());
    if overrides.numbers.is_none() {
        numbers.shuffle(rng);
    }

    let mut number_iter = numbers.into_iter();
    resources
        .into_iter()
        .take(hex_count)
        .map(|resource| match resource {
            Some(res) => TileState {
                resource: Some(res),
                number: number_iter.next(),
                has_robber: false,
            },
            None => TileState {
                resource: None,
                number: None,
                has_robber: true,
            },
        })
        .collect()
}

/// The full board: static topology, shuffled tiles and (once assigned) ports.
#[derive(Debug, Clone)]
pub struct Board {
    topology: BoardTopology,
    pub tiles: Vec<TileState>,
    ports: OnceCell<Vec<PortSite>>,
}

impl Board {
    pub fn generate(rng: &mut impl rand::Rng) -> Result<Self, TopologyError> {
        Self::generate_with(LayoutOverrides::default(), rng)
    }

    pub fn generate_with(
        overrides: LayoutOverrides<'_>,
        rng: &mut impl rand::Rng,
    ) -> Result<Self, TopologyError> {
        let layout = Layout::standard();
        let topology = BoardTopology::generate(layout)?;
        let tiles = assign_tiles(layout.hex_count(), overrides, rng);
        Ok(Self {
            topology,
            tiles,
            ports: OnceCell::new(),
        })
    }

    pub fn topology(&self) -> &BoardTopology {
        &self.topology
    }

    pub fn desert_hex(&self) -> Option<HexId> {
        self.tiles
            .iter()
            .position(|tile| tile.resource.is_none())
            .map(|idx| idx as HexId)
    }

    /// Ports, if they have been assigned yet.
    pub fn ports(&self) -> Option<&[PortSite]> {
        self.ports.get().map(Vec::as_slice)
    }

    /// One-shot port assignment. Calling this twice is a programming error.
    pub fn assign_ports(
        &self,
        occupied_edges: impl Fn(EdgeId) -> bool,
        types: Option<&[Option<Resource>]>,
        rng: &mut impl rand::Rng,
    ) -> Result<&[PortSite], PortError> {
        let sites = assign_ports(&self.topology, occupied_edges, types, rng)?;
        assert!(
            self.ports.set(sites).is_ok(),
            "ports were already assigned for this board"
        );
        Ok(self.ports.get().expect("just assigned").as_slice())
    }
}
