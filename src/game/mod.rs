mod action;
mod bank;
mod game;
mod longest_road;
mod players;
mod resources;
mod setup;
mod snapshot;
mod state;

pub use action::{CellTarget, GameEvent, PlacementIntent, PlayerCommand};
pub use bank::Bank;
pub use game::{Agent, Game, RandomAgent, TURNS_LIMIT};
pub use longest_road::longest_trail;
pub use players::{MAX_CITIES, MAX_ROADS, MAX_SETTLEMENTS, PlayerState};
pub use resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle, ResourceError};
pub use setup::{SetupCounts, SetupState, SetupStep};
pub use snapshot::{
    BuildingSnapshot, GameSnapshot, PhaseSnapshot, PlayerSnapshot, PortSnapshot, RoadSnapshot,
};
pub use state::{
    ArmyAward, DiscardPolicy, GameConfig, GamePhase, GameState, RandomDiscard, RoadAward,
    RuleViolation, Structure, TurnStage,
};
