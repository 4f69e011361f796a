use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, HexId, VertexId};
use crate::game::resources::ResourceBundle;
use crate::types::{BuildingKind, Resource};

/// A command submitted by a seat. `Roll` may carry forced dice (clamped to
/// 1..=6) so tests can drive exact sums; normal play passes `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerCommand {
    Roll { dice: Option<(u8, u8)> },
    BuildSettlement { vertex: VertexId },
    BuildCity { vertex: VertexId },
    BuildRoad { edge: EdgeId },
    MoveRobber { hex: HexId },
    EndTurn,
}

/// The placement callback the UI layer invokes. `target` is a vertex id for
/// settlements and cities, an edge id for roads; `anchor`, when given for a
/// road, must be an endpoint of the target edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementIntent {
    pub kind: BuildingKind,
    pub target: u16,
    pub anchor: Option<VertexId>,
}

/// A cell a UI can ask placement options for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellTarget {
    Vertex(VertexId),
    Edge(EdgeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    DiceRolled {
        seat: usize,
        dice: (u8, u8),
        sum: u8,
    },
    ResourcesDistributed {
        seat: usize,
        bundle: ResourceBundle,
    },
    BankExhausted {
        resource: Resource,
    },
    DiscardedToBank {
        seat: usize,
        bundle: ResourceBundle,
    },
    RobberMoved {
        from: HexId,
        to: HexId,
    },
    BuiltSettlement {
        seat: usize,
        vertex: VertexId,
    },
    BuiltCity {
        seat: usize,
        vertex: VertexId,
    },
    BuiltRoad {
        seat: usize,
        edge: EdgeId,
    },
    LongestRoadClaimed {
        seat: usize,
        length: usize,
    },
    TurnAdvanced {
        next_seat: usize,
    },
    GameWon {
        winner: usize,
    },
}
