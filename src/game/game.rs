use rand::{Rng, SeedableRng, rngs::StdRng};
use uuid::Uuid;

use crate::types::Color;

use super::action::PlayerCommand;
use super::state::{GameConfig, GamePhase, GameState};

pub const TURNS_LIMIT: u32 = 1000;

/// A seat controller: picks one of the legal commands for the current state.
/// Returning `None` forfeits the tick (the driver ends the turn if it can).
pub trait Agent {
    fn decide(&mut self, state: &GameState, legal: &[PlayerCommand]) -> Option<PlayerCommand>;
}

/// Picks uniformly among the legal commands. Good enough to finish games and
/// to exercise every rule path in simulation.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn decide(&mut self, _state: &GameState, legal: &[PlayerCommand]) -> Option<PlayerCommand> {
        if legal.is_empty() {
            None
        } else {
            Some(legal[self.rng.gen_range(0..legal.len())])
        }
    }
}

/// One full game driven by agents, one per seat.
pub struct Game {
    pub id: Uuid,
    pub seed: u64,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed;
        Self {
            id: Uuid::new_v4(),
            seed,
            state: GameState::new(config),
        }
    }

    /// Run until someone wins or the turn limit trips. Returns the winning
    /// seat, if any.
    pub fn play(&mut self, agents: &mut [Box<dyn Agent>]) -> Option<usize> {
        assert_eq!(
            agents.len(),
            self.state.players.len(),
            "one agent per seat"
        );
        while !matches!(self.state.phase, GamePhase::Completed { .. })
            && self.state.turn < TURNS_LIMIT
        {
            self.play_tick(agents);
        }
        match self.state.phase {
            GamePhase::Completed { winner } => winner,
            _ => None,
        }
    }

    /// Let the current seat's agent act once.
    pub fn play_tick(&mut self, agents: &mut [Box<dyn Agent>]) {
        let seat = self.state.current_player();
        let legal = self.state.legal_commands();
        let command = agents[seat]
            .decide(&self.state, &legal)
            .unwrap_or(PlayerCommand::EndTurn);
        // Agents choose from legal_commands, so a rejection means the agent
        // went off-menu; drop the command and let the next tick retry.
        let _ = self.state.submit(seat, command);
    }

    pub fn winner_color(&self) -> Option<Color> {
        match self.state.phase {
            GamePhase::Completed {
                winner: Some(seat),
            } => Some(self.state.players[seat].color),
            _ => None,
        }
    }
}
