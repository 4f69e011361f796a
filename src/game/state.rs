use std::collections::{HashMap, HashSet};

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, EdgeId, HexId, LayoutOverrides, VertexId};
use crate::types::{BuildingKind, Color, Resource};

use super::action::{CellTarget, GameEvent, PlacementIntent, PlayerCommand};
use super::bank::Bank;
use super::longest_road::longest_trail;
use super::players::PlayerState;
use super::resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle};
use super::setup::{SetupCounts, SetupState, SetupStep};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub num_players: usize,
    pub vps_to_win: u8,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            vps_to_win: 10,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
pub enum GamePhase {
    Setup(SetupState),
    Playing,
    Completed { winner: Option<usize> },
}

/// Stage within a turn while the phase is `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    AwaitingRoll,
    MoveRobber,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    Settlement { seat: usize },
    City { seat: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadAward {
    pub seat: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyAward {
    pub seat: usize,
    pub size: u8,
}

/// Every way a command can be rejected. All are caller-recoverable; a
/// rejected command never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("command not valid in the current phase")]
    WrongPhase,
    #[error("not this seat's turn")]
    NotCurrentPlayer,
    #[error("dice were already rolled this turn")]
    AlreadyRolled,
    #[error("target cell is already occupied")]
    CellOccupied,
    #[error("an adjacent vertex is already occupied")]
    DistanceRuleViolation,
    #[error("placement does not connect to the player's network")]
    NotConnected,
    #[error("player cannot afford the cost")]
    InsufficientResources,
    #[error("target id does not name a usable cell")]
    InvalidTarget,
    #[error("no pieces of that kind remain")]
    PieceLimitReached,
}

/// How a player over the hand limit picks the cards to discard on a 7.
///
/// The engine applies the selection immediately; the default policy discards
/// uniformly at random without offering a choice. A selection that does not
/// match the required count or exceeds the hand falls back to the default.
pub trait DiscardPolicy {
    fn select(&mut self, hand: &ResourceBundle, required: u8, rng: &mut StdRng) -> ResourceBundle;
}

pub struct RandomDiscard;

impl DiscardPolicy for RandomDiscard {
    fn select(&mut self, hand: &ResourceBundle, required: u8, rng: &mut StdRng) -> ResourceBundle {
        let mut remaining = hand.counts();
        let mut bundle = ResourceBundle::zero();
        for _ in 0..required {
            let mut bag = Vec::new();
            for (idx, &amount) in remaining.iter().enumerate() {
                for _ in 0..amount {
                    bag.push(idx);
                }
            }
            if bag.is_empty() {
                break;
            }
            let idx = bag[rng.gen_range(0..bag.len())];
            bundle.add(Resource::ALL[idx], 1);
            remaining[idx] -= 1;
        }
        bundle
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub board: Board,
    pub players: Vec<PlayerState>,
    pub bank: Bank,
    pub phase: GamePhase,
    pub stage: TurnStage,
    pub current_player: usize,
    pub turn: u32,
    pub last_roll: Option<(u8, u8)>,
    /// Counts of rolled sums, indexed by sum - 2 (keys 2..=12).
    pub roll_counts: [u32; 11],
    pub robber_hex: HexId,
    pub longest_road: Option<RoadAward>,
    /// Extension point: nothing changes this without development cards.
    pub largest_army: Option<ArmyAward>,
    pub vertex_occupancy: HashMap<VertexId, Structure>,
    pub road_occupancy: HashMap<EdgeId, usize>,
    setup_anchors: HashMap<usize, VertexId>,
    rng: StdRng,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self::new_with(config, LayoutOverrides::default())
            .expect("standard board generation must validate")
    }

    pub fn new_with(
        config: GameConfig,
        overrides: LayoutOverrides<'_>,
    ) -> Result<Self, BoardError> {
        assert!(
            (2..=4).contains(&config.num_players),
            "between 2 and 4 seats are supported"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let board = Board::generate_with(overrides, &mut rng)?;
        board.assign_ports(|_| false, overrides.ports, &mut rng)?;
        let robber_hex = board.desert_hex().unwrap_or(0);
        let players = Color::ORDERED
            .iter()
            .take(config.num_players)
            .map(|color| PlayerState::new(*color))
            .collect::<Vec<_>>();
        let setup = SetupState::new(config.num_players);
        let current_player = setup.current_seat().unwrap_or(0);

        Ok(Self {
            config,
            board,
            players,
            bank: Bank::standard(),
            phase: GamePhase::Setup(setup),
            stage: TurnStage::AwaitingRoll,
            current_player,
            turn: 0,
            last_roll: None,
            roll_counts: [0; 11],
            robber_hex,
            longest_road: None,
            largest_army: None,
            vertex_occupancy: HashMap::new(),
            road_occupancy: HashMap::new(),
            setup_anchors: HashMap::new(),
            rng,
        })
    }

    /// Submit a command with the default random discard policy.
    pub fn submit(
        &mut self,
        seat: usize,
        command: PlayerCommand,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        self.submit_with_policy(seat, command, &mut RandomDiscard)
    }

    pub fn submit_with_policy(
        &mut self,
        seat: usize,
        command: PlayerCommand,
        policy: &mut dyn DiscardPolicy,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        if seat >= self.players.len() {
            return Err(RuleViolation::InvalidTarget);
        }
        let mut events = Vec::new();
        if matches!(self.phase, GamePhase::Completed { .. }) {
            return Err(RuleViolation::WrongPhase);
        }
        if matches!(self.phase, GamePhase::Setup(_)) {
            self.handle_setup(seat, command, &mut events)?;
        } else {
            self.handle_play(seat, command, policy, &mut events)?;
        }
        Ok(events)
    }

    /// Map a UI placement intent onto the command surface.
    pub fn place(
        &mut self,
        seat: usize,
        intent: PlacementIntent,
    ) -> Result<Vec<GameEvent>, RuleViolation> {
        let command = match intent.kind {
            BuildingKind::Settlement => PlayerCommand::BuildSettlement {
                vertex: intent.target,
            },
            BuildingKind::City => PlayerCommand::BuildCity {
                vertex: intent.target,
            },
            BuildingKind::Road => {
                let edge = intent.target;
                if let Some(anchor) = intent.anchor {
                    if !self.board.topology().contains_edge(edge) {
                        return Err(RuleViolation::InvalidTarget);
                    }
                    let (a, b) = self.board.topology().edge_vertices(edge);
                    if a != anchor && b != anchor {
                        return Err(RuleViolation::InvalidTarget);
                    }
                }
                PlayerCommand::BuildRoad { edge }
            }
        };
        self.submit(seat, command)
    }

    fn handle_setup(
        &mut self,
        seat: usize,
        command: PlayerCommand,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), RuleViolation> {
        let (current, step, second_round_settlement, round) = match &self.phase {
            GamePhase::Setup(setup) => (
                setup.current_seat().ok_or(RuleViolation::WrongPhase)?,
                setup.current_step().ok_or(RuleViolation::WrongPhase)?,
                setup.is_second_round_settlement(),
                setup.round(),
            ),
            _ => unreachable!(),
        };
        if seat != current {
            return Err(RuleViolation::NotCurrentPlayer);
        }

        match (step, command) {
            (SetupStep::Settlement, PlayerCommand::BuildSettlement { vertex }) => {
                self.validate_setup_settlement(vertex)?;
                self.place_settlement(seat, vertex);
                events.push(GameEvent::BuiltSettlement { seat, vertex });
                if second_round_settlement {
                    self.grant_starting_resources(seat, vertex, events);
                }
                self.setup_anchors.insert(seat, vertex);
            }
            (SetupStep::Road, PlayerCommand::BuildRoad { edge }) => {
                self.validate_setup_road(seat, edge, round)?;
                events.push(GameEvent::BuiltRoad { seat, edge });
                self.place_road(seat, edge, events);
                self.setup_anchors.remove(&seat);
            }
            _ => return Err(RuleViolation::WrongPhase),
        }

        let complete = match &mut self.phase {
            GamePhase::Setup(setup) => {
                setup.advance();
                setup.is_complete()
            }
            _ => unreachable!(),
        };
        if complete {
            self.phase = GamePhase::Playing;
            self.current_player = 0;
            self.stage = TurnStage::AwaitingRoll;
        } else if let GamePhase::Setup(setup) = &self.phase {
            self.current_player = setup.current_seat().unwrap_or(0);
        }
        Ok(())
    }

    fn handle_play(
        &mut self,
        seat: usize,
        command: PlayerCommand,
        policy: &mut dyn DiscardPolicy,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), RuleViolation> {
        if seat != self.current_player {
            return Err(RuleViolation::NotCurrentPlayer);
        }

        match command {
            PlayerCommand::Roll { dice } => {
                if self.players[seat].has_rolled {
                    return Err(RuleViolation::AlreadyRolled);
                }
                let (d1, d2) = match dice {
                    Some((a, b)) => (a.clamp(1, 6), b.clamp(1, 6)),
                    None => (self.roll_die(), self.roll_die()),
                };
                let sum = d1 + d2;
                self.last_roll = Some((d1, d2));
                self.roll_counts[(sum - 2) as usize] += 1;
                self.players[seat].has_rolled = true;
                events.push(GameEvent::DiceRolled {
                    seat,
                    dice: (d1, d2),
                    sum,
                });
                if sum == 7 {
                    self.apply_discards(policy, events);
                    self.stage = TurnStage::MoveRobber;
                } else {
                    self.distribute_resources(sum, events);
                    self.stage = TurnStage::Main;
                }
            }
            PlayerCommand::MoveRobber { hex } => {
                if self.stage != TurnStage::MoveRobber {
                    return Err(RuleViolation::WrongPhase);
                }
                if !self.board.topology().contains_hex(hex) || hex == self.robber_hex {
                    return Err(RuleViolation::InvalidTarget);
                }
                let from = self.robber_hex;
                self.board.tiles[from as usize].has_robber = false;
                // A desert target keeps its display flag unset; robber_hex
                // stays authoritative for production blocking.
                if self.board.tiles[hex as usize].resource.is_some() {
                    self.board.tiles[hex as usize].has_robber = true;
                }
                self.robber_hex = hex;
                self.stage = TurnStage::Main;
                events.push(GameEvent::RobberMoved { from, to: hex });
            }
            PlayerCommand::BuildSettlement { vertex } => {
                self.ensure_main_stage()?;
                self.validate_build_settlement(seat, vertex)?;
                self.pay(seat, &COST_SETTLEMENT)?;
                self.place_settlement(seat, vertex);
                events.push(GameEvent::BuiltSettlement { seat, vertex });
                self.check_victory(events);
            }
            PlayerCommand::BuildCity { vertex } => {
                self.ensure_main_stage()?;
                self.validate_build_city(seat, vertex)?;
                self.pay(seat, &COST_CITY)?;
                self.players[seat].settlements.remove(&vertex);
                self.players[seat].cities.insert(vertex);
                self.vertex_occupancy.insert(vertex, Structure::City { seat });
                events.push(GameEvent::BuiltCity { seat, vertex });
                self.check_victory(events);
            }
            PlayerCommand::BuildRoad { edge } => {
                self.ensure_main_stage()?;
                self.validate_build_road(seat, edge)?;
                self.pay(seat, &COST_ROAD)?;
                events.push(GameEvent::BuiltRoad { seat, edge });
                self.place_road(seat, edge, events);
                self.check_victory(events);
            }
            PlayerCommand::EndTurn => {
                self.ensure_main_stage()?;
                self.players[seat].reset_for_new_turn();
                self.last_roll = None;
                self.current_player = (self.current_player + 1) % self.players.len();
                self.turn += 1;
                self.stage = TurnStage::AwaitingRoll;
                events.push(GameEvent::TurnAdvanced {
                    next_seat: self.current_player,
                });
                self.check_victory(events);
            }
        }
        Ok(())
    }

    fn ensure_main_stage(&self) -> Result<(), RuleViolation> {
        if self.stage == TurnStage::Main {
            Ok(())
        } else {
            Err(RuleViolation::WrongPhase)
        }
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn pay(&mut self, seat: usize, cost: &ResourceBundle) -> Result<(), RuleViolation> {
        self.players[seat]
            .remove_resources(cost)
            .map_err(|_| RuleViolation::InsufficientResources)?;
        self.bank.receive(cost);
        Ok(())
    }

    fn validate_setup_settlement(&self, vertex: VertexId) -> Result<(), RuleViolation> {
        if !self.board.topology().contains_vertex(vertex) {
            return Err(RuleViolation::InvalidTarget);
        }
        if self.vertex_occupancy.contains_key(&vertex) {
            return Err(RuleViolation::CellOccupied);
        }
        for &neighbor in self.board.topology().vertex_neighbors(vertex) {
            if self.vertex_occupancy.contains_key(&neighbor) {
                return Err(RuleViolation::DistanceRuleViolation);
            }
        }
        Ok(())
    }

    fn validate_setup_road(
        &self,
        seat: usize,
        edge: EdgeId,
        round: u8,
    ) -> Result<(), RuleViolation> {
        if !self.board.topology().contains_edge(edge) {
            return Err(RuleViolation::InvalidTarget);
        }
        if self.road_occupancy.contains_key(&edge) {
            return Err(RuleViolation::CellOccupied);
        }
        let (a, b) = self.board.topology().edge_vertices(edge);
        if round == 1 {
            // Must extend the settlement placed moments ago.
            let anchor = self
                .setup_anchors
                .get(&seat)
                .copied()
                .ok_or(RuleViolation::WrongPhase)?;
            if a != anchor && b != anchor {
                return Err(RuleViolation::NotConnected);
            }
        } else {
            let settlements = &self.players[seat].settlements;
            if !settlements.contains(&a) && !settlements.contains(&b) {
                return Err(RuleViolation::NotConnected);
            }
        }
        Ok(())
    }

    fn validate_build_settlement(&self, seat: usize, vertex: VertexId) -> Result<(), RuleViolation> {
        if self.players[seat].settlement_limit_reached() {
            return Err(RuleViolation::PieceLimitReached);
        }
        self.validate_setup_settlement(vertex)?;
        let connected = self
            .board
            .topology()
            .vertex_edges(vertex)
            .iter()
            .any(|edge| self.players[seat].roads.contains(edge));
        if !connected {
            return Err(RuleViolation::NotConnected);
        }
        if !self.players[seat].resources.can_afford(&COST_SETTLEMENT) {
            return Err(RuleViolation::InsufficientResources);
        }
        Ok(())
    }

    fn validate_build_city(&self, seat: usize, vertex: VertexId) -> Result<(), RuleViolation> {
        if !self.board.topology().contains_vertex(vertex) {
            return Err(RuleViolation::InvalidTarget);
        }
        if self.players[seat].city_limit_reached() {
            return Err(RuleViolation::PieceLimitReached);
        }
        if !self.players[seat].settlements.contains(&vertex) {
            return Err(RuleViolation::InvalidTarget);
        }
        if !self.players[seat].resources.can_afford(&COST_CITY) {
            return Err(RuleViolation::InsufficientResources);
        }
        Ok(())
    }

    fn validate_build_road(&self, seat: usize, edge: EdgeId) -> Result<(), RuleViolation> {
        if self.players[seat].road_limit_reached() {
            return Err(RuleViolation::PieceLimitReached);
        }
        if !self.board.topology().contains_edge(edge) {
            return Err(RuleViolation::InvalidTarget);
        }
        if self.road_occupancy.contains_key(&edge) {
            return Err(RuleViolation::CellOccupied);
        }
        let (a, b) = self.board.topology().edge_vertices(edge);
        let player = &self.players[seat];
        let connected = player.owns_vertex(a)
            || player.owns_vertex(b)
            || self
                .board
                .topology()
                .edge_adjacent_edges(edge)
                .any(|other| player.roads.contains(&other));
        if !connected {
            return Err(RuleViolation::NotConnected);
        }
        if !player.resources.can_afford(&COST_ROAD) {
            return Err(RuleViolation::InsufficientResources);
        }
        Ok(())
    }

    fn place_settlement(&mut self, seat: usize, vertex: VertexId) {
        self.players[seat].settlements.insert(vertex);
        self.vertex_occupancy
            .insert(vertex, Structure::Settlement { seat });
    }

    fn place_road(&mut self, seat: usize, edge: EdgeId, events: &mut Vec<GameEvent>) {
        self.players[seat].roads.insert(edge);
        self.road_occupancy.insert(edge, seat);
        self.update_longest_road(events);
    }

    /// One of each adjacent non-desert resource for a second-round settlement.
    fn grant_starting_resources(
        &mut self,
        seat: usize,
        vertex: VertexId,
        events: &mut Vec<GameEvent>,
    ) {
        let mut bundle = ResourceBundle::zero();
        for &hex in self.board.topology().vertex_hexes(vertex) {
            if let Some(resource) = self.board.tiles[hex as usize].resource {
                bundle.add(resource, 1);
            }
        }
        if !bundle.is_empty() && self.bank.dispense(&bundle).is_ok() {
            self.players[seat].add_resources(&bundle);
            events.push(GameEvent::ResourcesDistributed { seat, bundle });
        }
    }

    fn distribute_resources(&mut self, sum: u8, events: &mut Vec<GameEvent>) {
        let mut exhausted: HashSet<Resource> = HashSet::new();
        for hex in 0..self.board.tiles.len() {
            let tile = self.board.tiles[hex];
            if tile.number != Some(sum) || hex as HexId == self.robber_hex {
                continue;
            }
            let Some(resource) = tile.resource else {
                continue;
            };
            let vertices = *self.board.topology().hex_vertices(hex as HexId);
            for vertex in vertices {
                let Some(structure) = self.vertex_occupancy.get(&vertex).copied() else {
                    continue;
                };
                if exhausted.contains(&resource) {
                    continue;
                }
                let (owner, amount) = match structure {
                    Structure::Settlement { seat } => (seat, 1),
                    Structure::City { seat } => (seat, 2),
                };
                let bundle = ResourceBundle::single(resource, amount);
                if self.bank.dispense(&bundle).is_ok() {
                    self.players[owner].add_resources(&bundle);
                    events.push(GameEvent::ResourcesDistributed {
                        seat: owner,
                        bundle,
                    });
                } else {
                    exhausted.insert(resource);
                    events.push(GameEvent::BankExhausted { resource });
                }
            }
        }
    }

    /// Everyone over seven cards loses half, rounded down, back to the bank.
    fn apply_discards(&mut self, policy: &mut dyn DiscardPolicy, events: &mut Vec<GameEvent>) {
        for seat in 0..self.players.len() {
            let total = self.players[seat].resources.total();
            if total <= 7 {
                continue;
            }
            let required = (total / 2) as u8;
            let hand = self.players[seat].resources;
            let mut bundle = policy.select(&hand, required, &mut self.rng);
            if bundle.total() != required as u32 || !hand.can_afford(&bundle) {
                bundle = RandomDiscard.select(&hand, required, &mut self.rng);
            }
            if self.players[seat].remove_resources(&bundle).is_ok() {
                self.bank.receive(&bundle);
                events.push(GameEvent::DiscardedToBank { seat, bundle });
            }
        }
    }

    fn update_longest_road(&mut self, events: &mut Vec<GameEvent>) {
        let lengths: Vec<usize> = self
            .players
            .iter()
            .map(|player| longest_trail(self.board.topology(), &player.roads))
            .collect();
        let best = lengths.iter().copied().max().unwrap_or(0);
        let candidates: Vec<usize> = if best >= 5 {
            lengths
                .iter()
                .enumerate()
                .filter(|&(_, &len)| len == best)
                .map(|(seat, _)| seat)
                .collect()
        } else {
            Vec::new()
        };

        let previous = self.longest_road;
        let new_holder = match previous {
            Some(award) => {
                if candidates.contains(&award.seat) {
                    Some(award.seat)
                } else if candidates.len() == 1 && lengths[candidates[0]] > lengths[award.seat] {
                    Some(candidates[0])
                } else {
                    // Ties never transfer the award.
                    Some(award.seat)
                }
            }
            None => {
                if candidates.len() == 1 {
                    Some(candidates[0])
                } else {
                    None
                }
            }
        };

        self.longest_road = new_holder.map(|seat| RoadAward {
            seat,
            length: lengths[seat],
        });
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.has_longest_road = new_holder == Some(seat);
        }
        if new_holder != previous.map(|award| award.seat) {
            if let Some(seat) = new_holder {
                events.push(GameEvent::LongestRoadClaimed {
                    seat,
                    length: lengths[seat],
                });
            }
        }
    }

    fn check_victory(&mut self, events: &mut Vec<GameEvent>) {
        if matches!(self.phase, GamePhase::Completed { .. }) {
            return;
        }
        for (seat, player) in self.players.iter().enumerate() {
            if player.total_points() >= self.config.vps_to_win {
                self.phase = GamePhase::Completed { winner: Some(seat) };
                events.push(GameEvent::GameWon { winner: seat });
                break;
            }
        }
    }
}

impl GameState {
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// Placement counts for a seat while the setup phase is running.
    pub fn setup_counts(&self, seat: usize) -> Option<SetupCounts> {
        match &self.phase {
            GamePhase::Setup(setup) => Some(setup.counts_for_seat(seat)),
            _ => None,
        }
    }

    pub fn setup_round(&self) -> Option<u8> {
        match &self.phase {
            GamePhase::Setup(setup) if !setup.is_complete() => Some(setup.round()),
            _ => None,
        }
    }

    /// What the given seat could legally place on a cell right now. Drives
    /// the UI's context menu.
    pub fn placement_options(&self, seat: usize, cell: CellTarget) -> Vec<BuildingKind> {
        if seat >= self.players.len() {
            return Vec::new();
        }
        match &self.phase {
            GamePhase::Setup(setup) => {
                if setup.current_seat() != Some(seat) {
                    return Vec::new();
                }
                match (setup.current_step(), cell) {
                    (Some(SetupStep::Settlement), CellTarget::Vertex(vertex))
                        if self.validate_setup_settlement(vertex).is_ok() =>
                    {
                        vec![BuildingKind::Settlement]
                    }
                    (Some(SetupStep::Road), CellTarget::Edge(edge))
                        if self.validate_setup_road(seat, edge, setup.round()).is_ok() =>
                    {
                        vec![BuildingKind::Road]
                    }
                    _ => Vec::new(),
                }
            }
            GamePhase::Playing => {
                if seat != self.current_player || self.stage != TurnStage::Main {
                    return Vec::new();
                }
                match cell {
                    CellTarget::Vertex(vertex) => {
                        let mut options = Vec::new();
                        if self.validate_build_settlement(seat, vertex).is_ok() {
                            options.push(BuildingKind::Settlement);
                        }
                        if self.validate_build_city(seat, vertex).is_ok() {
                            options.push(BuildingKind::City);
                        }
                        options
                    }
                    CellTarget::Edge(edge) => {
                        if self.validate_build_road(seat, edge).is_ok() {
                            vec![BuildingKind::Road]
                        } else {
                            Vec::new()
                        }
                    }
                }
            }
            GamePhase::Completed { .. } => Vec::new(),
        }
    }

    /// Every command the current seat could submit successfully.
    pub fn legal_commands(&self) -> Vec<PlayerCommand> {
        let seat = self.current_player;
        match &self.phase {
            GamePhase::Setup(setup) => match setup.current_step() {
                Some(SetupStep::Settlement) => (0..self.board.topology().vertex_count())
                    .map(|vertex| vertex as VertexId)
                    .filter(|&vertex| self.validate_setup_settlement(vertex).is_ok())
                    .map(|vertex| PlayerCommand::BuildSettlement { vertex })
                    .collect(),
                Some(SetupStep::Road) => (0..self.board.topology().edge_count())
                    .map(|edge| edge as EdgeId)
                    .filter(|&edge| self.validate_setup_road(seat, edge, setup.round()).is_ok())
                    .map(|edge| PlayerCommand::BuildRoad { edge })
                    .collect(),
                None => Vec::new(),
            },
            GamePhase::Playing => match self.stage {
                TurnStage::AwaitingRoll => vec![PlayerCommand::Roll { dice: None }],
                TurnStage::MoveRobber => (0..self.board.tiles.len())
                    .map(|hex| hex as HexId)
                    .filter(|&hex| hex != self.robber_hex)
                    .map(|hex| PlayerCommand::MoveRobber { hex })
                    .collect(),
                TurnStage::Main => {
                    let mut commands = vec![PlayerCommand::EndTurn];
                    commands.extend(
                        (0..self.board.topology().vertex_count())
                            .map(|vertex| vertex as VertexId)
                            .filter(|&vertex| self.validate_build_settlement(seat, vertex).is_ok())
                            .map(|vertex| PlayerCommand::BuildSettlement { vertex }),
                    );
                    commands.extend(
                        self.players[seat]
                            .settlements
                            .iter()
                            .copied()
                            .filter(|&vertex| self.validate_build_city(seat, vertex).is_ok())
                            .map(|vertex| PlayerCommand::BuildCity { vertex }),
                    );
                    commands.extend(
                        (0..self.board.topology().edge_count())
                            .map(|edge| edge as EdgeId)
                            .filter(|&edge| self.validate_build_road(seat, edge).is_ok())
                            .map(|edge| PlayerCommand::BuildRoad { edge }),
                    );
                    commands
                }
            },
            GamePhase::Completed { .. } => Vec::new(),
        }
    }
}
