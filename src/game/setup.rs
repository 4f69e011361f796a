use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupStep {
    Settlement,
    Road,
}

/// The two-round initial placement sequence: every seat in forward order
/// places a settlement then a road, then every seat in reverse order places a
/// second settlement and road. Precomputed as a step list walked by a cursor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupState {
    steps: Vec<StepSlot>,
    cursor: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StepSlot {
    seat: usize,
    step: SetupStep,
    round: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupCounts {
    pub settlements: usize,
    pub roads: usize,
}

impl SetupState {
    pub fn new(num_players: usize) -> Self {
        let mut steps = Vec::with_capacity(num_players * 4);
        for seat in 0..num_players {
            steps.push(StepSlot {
                seat,
                step: SetupStep::Settlement,
                round: 1,
            });
            steps.push(StepSlot {
                seat,
                step: SetupStep::Road,
                round: 1,
            });
        }
        for seat in (0..num_players).rev() {
            steps.push(StepSlot {
                seat,
                step: SetupStep::Settlement,
                round: 2,
            });
            steps.push(StepSlot {
                seat,
                step: SetupStep::Road,
                round: 2,
            });
        }
        Self { steps, cursor: 0 }
    }

    pub fn current_seat(&self) -> Option<usize> {
        self.steps.get(self.cursor).map(|slot| slot.seat)
    }

    pub fn current_step(&self) -> Option<SetupStep> {
        self.steps.get(self.cursor).map(|slot| slot.step)
    }

    /// 1 or 2; stays at 2 once the sequence is complete.
    pub fn round(&self) -> u8 {
        self.steps.get(self.cursor).map(|slot| slot.round).unwrap_or(2)
    }

    pub fn is_second_round_settlement(&self) -> bool {
        self.steps
            .get(self.cursor)
            .map(|slot| slot.round == 2 && slot.step == SetupStep::Settlement)
            .unwrap_or(false)
    }

    pub fn advance(&mut self) {
        if self.cursor < self.steps.len() {
            self.cursor += 1;
        }
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Placements a seat has completed so far in this phase.
    pub fn counts_for_seat(&self, seat: usize) -> SetupCounts {
        let mut counts = SetupCounts::default();
        for slot in &self.steps[..self.cursor] {
            if slot.seat != seat {
                continue;
            }
            match slot.step {
                SetupStep::Settlement => counts.settlements += 1,
                SetupStep::Road => counts.roads += 1,
            }
        }
        counts
    }
}
