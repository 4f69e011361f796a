use itertools::Itertools;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::board::{BoardTopology, EdgeId};
use crate::types::Resource;

pub const PORT_COUNT: usize = 9;

/// The fixed port multiset: one port per resource plus four generic
/// any-resource ports (`None`).
pub const PORT_TYPES: [Option<Resource>; PORT_COUNT] = [
    Some(Resource::Brick),
    Some(Resource::Wood),
    Some(Resource::Sheep),
    Some(Resource::Wheat),
    Some(Resource::Ore),
    None,
    None,
    None,
    None,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSite {
    pub edge: EdgeId,
    pub resource: Option<Resource>,
}

#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("need at least {PORT_COUNT} road-free border edges, found {found}")]
    NotEnoughBorderEdges { found: usize },
}

/// Assign the nine ports to evenly spaced border edges.
///
/// Eligible border edges are ordered by angle around the perimeter centroid,
/// clockwise starting from north, so the positions are stable regardless of
/// edge id enumeration order. Port positions are every `floor(count / 9)`-th
/// edge of that ordering; the port types are shuffled independently.
pub fn assign_ports(
    topology: &BoardTopology,
    occupied_edges: impl Fn(EdgeId) -> bool,
    types: Option<&[Option<Resource>]>,
    rng: &mut impl rand::Rng,
) -> Result<Vec<PortSite>, PortError> {
    let eligible: Vec<EdgeId> = topology
        .border_edges()
        .iter()
        .copied()
        .filter(|&edge| !occupied_edges(edge))
        .collect();
    if eligible.len() < PORT_COUNT {
        return Err(PortError::NotEnoughBorderEdges {
            found: eligible.len(),
        });
    }

    let centroid_x = eligible
        .iter()
        .map(|&edge| topology.edge_midpoint(edge).x as f64)
        .sum::<f64>()
        / eligible.len() as f64;
    let centroid_y = eligible
        .iter()
        .map(|&edge| topology.edge_midpoint(edge).y as f64)
        .sum::<f64>()
        / eligible.len() as f64;

    let ordered: Vec<EdgeId> = eligible
        .into_iter()
        .sorted_by(|&a, &b| {
            let ka = clockwise_angle(topology, a, centroid_x, centroid_y);
            let kb = clockwise_angle(topology, b, centroid_x, centroid_y);
            ka.total_cmp(&kb)
        })
        .collect();

    let mut port_types = types
        .map(|slice| slice.to_vec())
        .unwrap_or_else(|| PORT_TYPES.to_vec());
    if types.is_none() {
        port_types.shuffle(rng);
    }

    let stride = ordered.len() / PORT_COUNT;
    Ok(port_types
        .into_iter()
        .take(PORT_COUNT)
        .enumerate()
        .map(|(slot, resource)| PortSite {
            edge: ordered[slot * stride],
            resource,
        })
        .collect())
}

/// Angle of an edge midpoint around the centroid, clockwise from north
/// (screen coordinates, y grows downward), normalized to [0, 2*pi).
fn clockwise_angle(topology: &BoardTopology, edge: EdgeId, cx: f64, cy: f64) -> f64 {
    let midpoint = topology.edge_midpoint(edge);
    let dx = midpoint.x as f64 - cx;
    let dy = midpoint.y as f64 - cy;
    let angle = dx.atan2(-dy);
    if angle < 0.0 {
        angle + std::f64::consts::TAU
    } else {
        angle
    }
}
