//! Encounter - the turn orchestrator
//!
//! Owns the roster, the pantheon, the random source and the narration
//! sink. Each call to [`Encounter::step`] runs one full turn:
//!
//! 1. Reset the primaries' modifiers and apply a cosmic event
//! 2. Every living combatant acts against a random living opponent
//! 3. The three deities act on a favored primary and one other combatant
//! 4. On trade turns, the first primary may buy a health potion
//! 5. The status table is narrated and termination is checked

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::behavior::{self, TurnContext};
use crate::core::{CombatantId, EncounterConfig, Result, Turn, WarError};
use crate::cosmic::{self, CosmicEvent};
use crate::divine::Pantheon;
use crate::encounter::narration::{NarrationLog, NarrationSink};
use crate::encounter::status::{
    format_status_table, CombatantStatus, DeityStatus, EncounterOutcome, EncounterPhase,
    EncounterReport, EncounterStatus,
};
use crate::entity::{Combatant, ItemKind};

const TRADE_OFFER: [(ItemKind, u32); 1] = [(ItemKind::ManaPotion, 1)];
const TRADE_REQUEST: [(ItemKind, u32); 1] = [(ItemKind::HealthPotion, 1)];

pub struct Encounter<S: NarrationSink = NarrationLog> {
    config: EncounterConfig,
    roster: Vec<Combatant>,
    pantheon: Pantheon,

    turn: Turn,
    phase: EncounterPhase,
    outcome: EncounterOutcome,
    current_event: Option<CosmicEvent>,

    seed: u64,
    rng: ChaCha8Rng,
    sink: S,
}

impl Encounter<NarrationLog> {
    /// Encounter that keeps its narration in memory
    pub fn with_log(config: EncounterConfig) -> Result<Self> {
        Self::new(config, NarrationLog::new())
    }
}

impl<S: NarrationSink> Encounter<S> {
    /// Validate the configuration and build the roster
    pub fn new(config: EncounterConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let roster = config.build_roster();
        Ok(Self {
            config,
            roster,
            pantheon: Pantheon::new(),
            turn: 0,
            phase: EncounterPhase::Idle,
            outcome: EncounterOutcome::Undecided,
            current_event: None,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            sink,
        })
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn outcome(&self) -> &EncounterOutcome {
        &self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase == EncounterPhase::Ended
    }

    pub fn current_event(&self) -> Option<CosmicEvent> {
        self.current_event
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id.index())
    }

    pub fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.get_mut(id.index())
    }

    /// Look a combatant up by name
    pub fn find(&self, name: &str) -> Result<CombatantId> {
        self.roster
            .iter()
            .position(|c| c.name == name)
            .map(CombatantId)
            .ok_or_else(|| WarError::UnknownCombatant(name.to_string()))
    }

    pub fn pantheon(&self) -> &Pantheon {
        &self.pantheon
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn living_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    /// Advance exactly one turn. Returns true once the encounter has ended;
    /// calling it after that changes nothing.
    pub fn step(&mut self) -> bool {
        match self.phase {
            EncounterPhase::Ended => return true,
            EncounterPhase::Idle => {
                self.phase = EncounterPhase::Running;
                tracing::info!(
                    seed = self.seed,
                    combatants = self.roster.len(),
                    max_turns = self.config.max_turns,
                    "encounter started"
                );
                if self.check_termination() {
                    return true;
                }
            }
            EncounterPhase::Running => {}
        }

        self.turn += 1;
        tracing::debug!(turn = self.turn, "turn started");
        self.sink.narrate(&format!(
            "{} Turn {} {}",
            "-".repeat(20),
            self.turn,
            "-".repeat(20)
        ));

        self.phase_cosmic();
        self.phase_combatants();
        self.phase_divine();
        self.phase_trade();
        self.phase_status_report();
        self.debug_check_invariants();

        self.check_termination()
    }

    /// Step until the encounter ends
    pub fn run(&mut self) -> &EncounterOutcome {
        while !self.step() {}
        &self.outcome
    }

    // ===== PHASE 1: COSMIC =====

    fn phase_cosmic(&mut self) {
        let Self {
            roster,
            pantheon,
            rng,
            sink,
            ..
        } = self;
        let [first, second] = primaries_mut(roster);
        behavior::reset_modifiers(first, sink);
        behavior::reset_modifiers(second, sink);
        let event = cosmic::begin_turn([first, second], pantheon, rng, sink);
        self.current_event = Some(event);
    }

    // ===== PHASE 2: COMBATANTS =====

    fn phase_combatants(&mut self) {
        let Self {
            config,
            roster,
            pantheon,
            rng,
            sink,
            turn,
            ..
        } = self;

        for actor in 0..roster.len() {
            if !roster[actor].is_alive() {
                continue;
            }
            let Some(opponent) = pick_living(roster, &[actor], rng) else {
                continue;
            };
            let (actor, opponent) = pair_mut(roster, actor, opponent);
            let mut ctx = TurnContext {
                turn: *turn,
                priest_ability_interval: config.priest_ability_interval,
                pantheon: &mut *pantheon,
            };
            behavior::take_turn(actor, opponent, &mut ctx, rng, sink);
        }
    }

    // ===== PHASE 3: DIVINE =====

    fn phase_divine(&mut self) {
        let Some(favored) = self.pick_favored() else {
            tracing::debug!(turn = self.turn, "no living primary, divine phase skipped");
            return;
        };
        let Self {
            roster,
            pantheon,
            rng,
            sink,
            ..
        } = self;
        let Some(other) = pick_living(roster, &[favored], rng) else {
            return;
        };
        let (favored, other) = pair_mut(roster, favored, other);
        pantheon.divine_phase(favored, other, rng, sink);
    }

    /// Weighted pick between the primaries, among those still alive
    fn pick_favored(&mut self) -> Option<usize> {
        match (self.roster[0].is_alive(), self.roster[1].is_alive()) {
            (true, true) => {
                if self.rng.gen::<f32>() < self.config.favored_weight {
                    Some(0)
                } else {
                    Some(1)
                }
            }
            (true, false) => Some(0),
            (false, true) => Some(1),
            (false, false) => None,
        }
    }

    // ===== PHASE 4: TRADE =====

    fn phase_trade(&mut self) {
        if self.turn % self.config.trade_interval != 0 {
            return;
        }
        let threshold = self.config.trade_health_threshold;
        let sink = &mut self.sink;
        let [buyer, seller] = primaries_mut(&mut self.roster);
        if !buyer.is_alive() || !seller.is_alive() {
            return;
        }
        if buyer.health >= threshold
            || buyer.inventory.has(ItemKind::HealthPotion)
            || !seller.inventory.has(ItemKind::HealthPotion)
        {
            return;
        }
        if buyer.propose_trade(seller, &TRADE_OFFER, &TRADE_REQUEST, sink) {
            let traded = seller.accept_trade(buyer, &TRADE_OFFER, &TRADE_REQUEST, sink);
            tracing::debug!(turn = self.turn, traded, "trade phase");
        }
    }

    // ===== PHASE 5: STATUS =====

    fn phase_status_report(&mut self) {
        let table = format_status_table(self.turn, &self.roster);
        self.sink.narrate(&table);
    }

    fn debug_check_invariants(&self) {
        for combatant in &self.roster {
            combatant.debug_check_invariants();
        }
        for deity in self.pantheon.iter() {
            debug_assert!(deity.energy >= 0.0, "{} has negative energy", deity.name);
        }
    }

    /// End the encounter when at most one combatant stands or the turn
    /// bound is reached. Returns true when ended.
    fn check_termination(&mut self) -> bool {
        let mut living = self
            .roster
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive());
        let first = living.next();
        let more = living.next().is_some();

        if more && self.turn < self.config.max_turns {
            return false;
        }

        self.outcome = match first {
            Some((index, survivor)) if !more => {
                self.sink.narrate(&format!(
                    "{} wins after {} turns!",
                    survivor.name, self.turn
                ));
                EncounterOutcome::Victory {
                    winner: CombatantId(index),
                    name: survivor.name.clone(),
                }
            }
            _ => {
                self.sink.narrate(&format!(
                    "After {} turns, the war ends in a stalemate!",
                    self.turn
                ));
                EncounterOutcome::Stalemate
            }
        };
        self.phase = EncounterPhase::Ended;
        self.pantheon.narrate_summary(&mut self.sink);
        tracing::info!(turns = self.turn, outcome = ?self.outcome, "encounter ended");
        true
    }

    pub fn status(&self) -> EncounterStatus {
        EncounterStatus {
            turn: self.turn,
            phase: self.phase,
            current_event: self.current_event,
            combatants: self.roster.iter().map(CombatantStatus::from).collect(),
            deities: self.pantheon.iter().map(DeityStatus::from).collect(),
        }
    }

    pub fn report(&self) -> EncounterReport {
        EncounterReport {
            seed: self.seed,
            turns: self.turn,
            max_turns: self.config.max_turns,
            outcome: self.outcome.clone(),
            combatants: self.roster.iter().map(CombatantStatus::from).collect(),
            deities: self.pantheon.iter().map(DeityStatus::from).collect(),
        }
    }
}

/// The two designated primaries, mutably
fn primaries_mut(roster: &mut [Combatant]) -> [&mut Combatant; 2] {
    let (first, rest) = roster.split_at_mut(1);
    [&mut first[0], &mut rest[0]]
}

/// Two distinct roster entries, mutably
fn pair_mut(roster: &mut [Combatant], a: usize, b: usize) -> (&mut Combatant, &mut Combatant) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = roster.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = roster.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Uniform pick among living combatants not in `exclude`
fn pick_living(roster: &[Combatant], exclude: &[usize], rng: &mut impl Rng) -> Option<usize> {
    let candidates: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(i, c)| c.is_alive() && !exclude.contains(i))
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.gen_range(0..candidates.len())])
    }
}
