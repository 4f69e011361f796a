#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod board;
pub mod coords;
pub mod game;
pub mod types;

pub use board::{Board, BoardTopology, EdgeId, HexId, Layout, PortSite, TileState, VertexId};
pub use game::{
    DiscardPolicy, Game, GameConfig, GameEvent, GamePhase, GameSnapshot, GameState,
    PlacementIntent, PlayerCommand, RandomDiscard, RuleViolation, TurnStage,
};
pub use types::{BuildingKind, Color, Resource};
