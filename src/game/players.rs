use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::{EdgeId, VertexId};
use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::Color;

pub const MAX_ROADS: usize = 15;
pub const MAX_SETTLEMENTS: usize = 5;
pub const MAX_CITIES: usize = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub resources: ResourceBundle,
    pub roads: HashSet<EdgeId>,
    pub settlements: HashSet<VertexId>,
    pub cities: HashSet<VertexId>,
    pub knights_played: u8,
    pub has_longest_road: bool,
    pub has_largest_army: bool,
    pub has_rolled: bool,
}

impl PlayerState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            resources: ResourceBundle::zero(),
            roads: HashSet::new(),
            settlements: HashSet::new(),
            cities: HashSet::new(),
            knights_played: 0,
            has_longest_road: false,
            has_largest_army: false,
            has_rolled: false,
        }
    }

    pub fn reset_for_new_turn(&mut self) {
        self.has_rolled = false;
    }

    pub fn add_resources(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn remove_resources(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    pub fn owns_vertex(&self, vertex: VertexId) -> bool {
        self.settlements.contains(&vertex) || self.cities.contains(&vertex)
    }

    pub fn settlement_limit_reached(&self) -> bool {
        self.settlements.len() >= MAX_SETTLEMENTS
    }

    pub fn city_limit_reached(&self) -> bool {
        self.cities.len() >= MAX_CITIES
    }

    pub fn road_limit_reached(&self) -> bool {
        self.roads.len() >= MAX_ROADS
    }

    /// 1 per settlement, 2 per city, plus bonus awards.
    pub fn total_points(&self) -> u8 {
        let settlement_points = self.settlements.len() as u8;
        let city_points = (self.cities.len() as u8) * 2;
        settlement_points + city_points + self.bonus_points()
    }

    pub fn bonus_points(&self) -> u8 {
        let mut bonus = 0;
        if self.has_longest_road {
            bonus += 2;
        }
        if self.has_largest_army {
            bonus += 2;
        }
        bonus
    }
}
