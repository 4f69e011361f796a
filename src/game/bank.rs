use crate::game::resources::{ResourceBundle, ResourceError};
use crate::types::Resource;

/// The shared resource supply. Never goes negative: `dispense` is
/// all-or-nothing, so a distribution credit the bank cannot cover in full is
/// skipped by the caller rather than partially paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    resources: ResourceBundle,
}

impl Bank {
    pub fn standard() -> Self {
        Self {
            resources: ResourceBundle::from_counts([19, 19, 19, 19, 19]),
        }
    }

    pub fn resources(&self) -> &ResourceBundle {
        &self.resources
    }

    pub fn receive(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn dispense(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        let mut updated = self.resources;
        updated.subtract_bundle(bundle)?;
        self.resources = updated;
        Ok(())
    }

    pub fn available(&self, resource: Resource) -> u8 {
        self.resources.get(resource)
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::standard()
    }
}
