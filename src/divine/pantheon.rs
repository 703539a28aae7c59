//! The fixed trio of deities and the divine phase

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::divine::deity::{Deity, Intervention};
use crate::encounter::narration::NarrationSink;
use crate::entity::Combatant;

/// Restorer, balancer and punisher, always acting in that order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pantheon {
    pub restorer: Deity,
    pub balancer: Deity,
    pub punisher: Deity,
}

impl Default for Pantheon {
    fn default() -> Self {
        Self::new()
    }
}

impl Pantheon {
    pub fn new() -> Self {
        Self {
            restorer: Deity::restorer(),
            balancer: Deity::balancer(),
            punisher: Deity::punisher(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deity> {
        [&self.restorer, &self.balancer, &self.punisher].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Deity> {
        [&mut self.restorer, &mut self.balancer, &mut self.punisher].into_iter()
    }

    pub fn reset_cost_multipliers(&mut self) {
        for deity in self.iter_mut() {
            deity.cost_multiplier = 1.0;
        }
    }

    pub fn set_cost_multiplier(&mut self, multiplier: f32) {
        for deity in self.iter_mut() {
            deity.cost_multiplier = multiplier;
        }
    }

    /// Let every deity act once against the same pair
    pub fn divine_phase(
        &mut self,
        favored: &mut Combatant,
        other: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut dyn NarrationSink,
    ) -> [Intervention; 3] {
        [
            self.restorer.influence(favored, other, rng, log),
            self.balancer.influence(favored, other, rng, log),
            self.punisher.influence(favored, other, rng, log),
        ]
    }

    pub fn all_exhausted(&self) -> bool {
        self.iter().all(Deity::is_exhausted)
    }

    pub fn narrate_summary(&self, log: &mut dyn NarrationSink) {
        log.narrate("Divine Intervention Summary:");
        for deity in self.iter() {
            log.narrate(&deity.summary());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::narration::{NarrationLog, Silent};
    use crate::entity::{ArchetypeKind, StatBlock};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_cost_multiplier_reset() {
        let mut pantheon = Pantheon::new();
        pantheon.set_cost_multiplier(0.5);
        assert!(pantheon.iter().all(|d| d.cost_multiplier == 0.5));
        pantheon.reset_cost_multipliers();
        assert!(pantheon.iter().all(|d| d.cost_multiplier == 1.0));
    }

    #[test]
    fn test_divine_phase_acts_in_order() {
        let mut pantheon = Pantheon::new();
        let mut a = Combatant::new("A", ArchetypeKind::Generic, &StatBlock::default());
        let mut b = Combatant::new("B", ArchetypeKind::Generic, &StatBlock::default());
        a.health = 20.0;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut log = NarrationLog::new();

        let results = pantheon.divine_phase(&mut a, &mut b, &mut rng, &mut log);

        assert!(matches!(results[0], Intervention::Healed { .. }));
        assert!(matches!(results[1], Intervention::Healed { .. }));
        assert!(matches!(results[2], Intervention::Decay { .. }));
        let brahma = log.lines.iter().position(|l| l.starts_with("Brahma")).unwrap();
        let vishnu = log.lines.iter().position(|l| l.starts_with("Vishnu")).unwrap();
        let shiva = log.lines.iter().position(|l| l.starts_with("Shiva")).unwrap();
        assert!(brahma < vishnu && vishnu < shiva);
    }

    #[test]
    fn test_exhausted_pantheon_is_inert() {
        let mut pantheon = Pantheon::new();
        for deity in pantheon.iter_mut() {
            deity.energy = 0.0;
        }
        assert!(pantheon.all_exhausted());
        let mut a = Combatant::new("A", ArchetypeKind::Generic, &StatBlock::default());
        let mut b = Combatant::new("B", ArchetypeKind::Generic, &StatBlock::default());
        a.health = 5.0;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let results = pantheon.divine_phase(&mut a, &mut b, &mut rng, &mut Silent);
        assert_eq!(results, [Intervention::Idle; 3]);
        assert_eq!(a.health, 5.0);
    }

    #[test]
    fn test_summary_lists_every_deity() {
        let pantheon = Pantheon::new();
        let mut log = NarrationLog::new();
        pantheon.narrate_summary(&mut log);
        assert_eq!(log.lines.len(), 4);
        assert!(log.contains("Brahma: Interventions = 0"));
        assert!(log.contains("Total Decay Inflicted"));
    }
}
