use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, HexId, TileState, VertexId};
use crate::types::{BuildingKind, Color, Resource};

use super::state::{ArmyAward, GamePhase, GameState, RoadAward, Structure, TurnStage};

/// A serializable view of the full public game state. Collections are sorted
/// by id so two snapshots of identical states serialize byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: PhaseSnapshot,
    pub stage: TurnStage,
    pub current_player: usize,
    pub turn: u32,
    pub last_roll: Option<(u8, u8)>,
    pub roll_counts: [u32; 11],
    pub robber_hex: HexId,
    pub tiles: Vec<TileState>,
    pub ports: Vec<PortSnapshot>,
    pub buildings: Vec<BuildingSnapshot>,
    pub roads: Vec<RoadSnapshot>,
    pub players: Vec<PlayerSnapshot>,
    pub bank: [u8; 5],
    pub longest_road: Option<RoadAward>,
    pub largest_army: Option<ArmyAward>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseSnapshot {
    Setup { round: u8 },
    Playing,
    Completed { winner: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSnapshot {
    pub edge: EdgeId,
    pub resource: Option<Resource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSnapshot {
    pub vertex: VertexId,
    pub seat: usize,
    pub kind: BuildingKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadSnapshot {
    pub edge: EdgeId,
    pub seat: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub color: Color,
    pub resources: [u8; 5],
    pub points: u8,
    pub has_longest_road: bool,
    pub has_largest_army: bool,
}

impl GameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let phase = match &state.phase {
            GamePhase::Setup(setup) => PhaseSnapshot::Setup {
                round: setup.round(),
            },
            GamePhase::Playing => PhaseSnapshot::Playing,
            GamePhase::Completed { winner } => PhaseSnapshot::Completed { winner: *winner },
        };

        let ports = state
            .board
            .ports()
            .unwrap_or_default()
            .iter()
            .map(|site| PortSnapshot {
                edge: site.edge,
                resource: site.resource,
            })
            .collect();

        let buildings = state
            .vertex_occupancy
            .iter()
            .map(|(&vertex, &structure)| match structure {
                Structure::Settlement { seat } => BuildingSnapshot {
                    vertex,
                    seat,
                    kind: BuildingKind::Settlement,
                },
                Structure::City { seat } => BuildingSnapshot {
                    vertex,
                    seat,
                    kind: BuildingKind::City,
                },
            })
            .sorted_by_key(|building| building.vertex)
            .collect();

        let roads = state
            .road_occupancy
            .iter()
            .map(|(&edge, &seat)| RoadSnapshot { edge, seat })
            .sorted_by_key(|road| road.edge)
            .collect();

        let players = state
            .players
            .iter()
            .map(|player| PlayerSnapshot {
                color: player.color,
                resources: player.resources.counts(),
                points: player.total_points(),
                has_longest_road: player.has_longest_road,
                has_largest_army: player.has_largest_army,
            })
            .collect();

        Self {
            phase,
            stage: state.stage,
            current_player: state.current_player,
            turn: state.turn,
            last_roll: state.last_roll,
            roll_counts: state.roll_counts,
            robber_hex: state.robber_hex,
            tiles: state.board.tiles.clone(),
            ports,
            buildings,
            roads,
            players,
            bank: state.bank.resources().counts(),
            longest_road: state.longest_road,
            largest_army: state.largest_army,
        }
    }
}

impl GameState {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}
