//! Core data models for Slot Quest.
//! Progression state, the phase machine and the reducer that the UI dispatches into.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::battle::{Battle, Side};
use crate::resolver::{self, BattleConclusion, Resolution, UpgradeOutcome};
use crate::util::clog;

pub const BASE_ATTACK: i64 = 10;
pub const BASE_DEFENSE: i64 = 5;
pub const BASE_MAX_HEALTH: i64 = 100;
pub const BASE_UPGRADE_COST: u64 = 50;
/// Attack/defense gained per purchase.
pub const STAT_UPGRADE_STEP: i64 = 5;
/// Max health (and current health) gained per purchase.
pub const HEALTH_UPGRADE_STEP: i64 = 50;
pub const HEAL_PERCENT: i64 = 20;
pub const TREASURE_GOLD_MIN: u64 = 10;
pub const TREASURE_GOLD_MAX: u64 = 59;

pub const REEL_COUNT: usize = 3;
/// Reel symbol changes before the result is shown.
pub const REEL_CHANGES: u32 = 11;
pub const TICKS_PER_REEL_CHANGE: u32 = 5;
pub const WALK_TICKS: u32 = 40;
/// Background scroll per walk tick, in pixels.
pub const WALK_SPEED_PX: i32 = 5;
pub const BACKGROUND_TILE_PX: i32 = 20;
pub const LUNGE_TICKS: u32 = 20;
pub const STRIKE_PAUSE_TICKS: u32 = 5;
pub const TREASURE_TICKS: u32 = 25;
pub const LOG_CAPACITY: usize = 100;

pub const fn reel_ticks() -> u32 {
    REEL_CHANGES * TICKS_PER_REEL_CHANGE
}

pub const fn spin_ticks() -> u32 {
    reel_ticks() + WALK_TICKS
}

pub const fn strike_ticks() -> u32 {
    STRIKE_PAUSE_TICKS + LUNGE_TICKS
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Character {
    pub attack: i64,
    pub defense: i64,
    pub health: i64,
    pub max_health: i64,
}

impl Character {
    pub fn new(attack: i64, defense: i64, max_health: i64) -> Self {
        Self { attack, defense, health: max_health, max_health }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Restores health up to max; returns the amount actually gained.
    pub fn heal(&mut self, amount: i64) -> i64 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
        self.health - before
    }

    pub fn restore(&mut self) {
        self.health = self.max_health;
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        (self.health.max(0) as f64 / self.max_health as f64).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub stats: Character,
    pub gold: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            stats: Character::new(BASE_ATTACK, BASE_DEFENSE, BASE_MAX_HEALTH),
            gold: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    Attack,
    Defense,
    Health,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 3] = [UpgradeKind::Attack, UpgradeKind::Defense, UpgradeKind::Health];

    pub fn label(self) -> &'static str {
        match self {
            UpgradeKind::Attack => "Attack",
            UpgradeKind::Defense => "Defense",
            UpgradeKind::Health => "Health",
        }
    }
}

/// Current gold price per stat. Each purchase scales its price by 1.5, floored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCosts {
    pub attack: u64,
    pub defense: u64,
    pub health: u64,
}

impl Default for UpgradeCosts {
    fn default() -> Self {
        Self { attack: BASE_UPGRADE_COST, defense: BASE_UPGRADE_COST, health: BASE_UPGRADE_COST }
    }
}

impl UpgradeCosts {
    pub fn cost(&self, kind: UpgradeKind) -> u64 {
        match kind {
            UpgradeKind::Attack => self.attack,
            UpgradeKind::Defense => self.defense,
            UpgradeKind::Health => self.health,
        }
    }

    pub fn record_purchase(&mut self, kind: UpgradeKind) {
        let slot = match kind {
            UpgradeKind::Attack => &mut self.attack,
            UpgradeKind::Defense => &mut self.defense,
            UpgradeKind::Health => &mut self.health,
        };
        *slot = next_cost(*slot);
    }

    pub fn is_valid(&self) -> bool {
        UpgradeKind::ALL.iter().all(|&k| self.cost(k) > 0)
    }
}

/// floor(cost * 1.5), saturating at u64::MAX. Always above `cost` below the cap.
pub fn next_cost(cost: u64) -> u64 {
    let scaled = u64::try_from(cost as u128 * 3 / 2).unwrap_or(u64::MAX);
    scaled.max(cost.saturating_add(1))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub stage: u32,
    pub max_stage: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self { stage: 1, max_stage: 1 }
    }
}

impl Progress {
    /// Moves one stage forward; returns true when a new best was set.
    pub fn advance(&mut self) -> bool {
        self.stage = self.stage.saturating_add(1);
        if self.stage > self.max_stage {
            self.max_stage = self.stage;
            return true;
        }
        false
    }

    pub fn reset_stage(&mut self) {
        self.stage = 1;
    }
}

/// Everything the resolver mutates and the save record mirrors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    pub player: Player,
    pub progress: Progress,
    pub upgrades: UpgradeCosts,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Advance,
    Battle,
    Treasure,
    Heal,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [Outcome::Advance, Outcome::Battle, Outcome::Treasure, Outcome::Heal];

    pub fn symbol(self) -> &'static str {
        match self {
            Outcome::Advance => "⬆",
            Outcome::Battle => "⚔",
            Outcome::Treasure => "💰",
            Outcome::Heal => "❤",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Advance => "Move",
            Outcome::Battle => "Battle",
            Outcome::Treasure => "Treasure",
            Outcome::Heal => "Heal",
        }
    }
}

/// A battle plus its animation cursor within the current strike.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleScene {
    pub battle: Battle,
    /// 0..strike_ticks(); the strike lands when the cursor wraps.
    pub tick: u32,
}

impl BattleScene {
    /// Attacker currently lunging and how far out it is (0.0..=1.0).
    pub fn lunge(&self) -> Option<(Side, f64)> {
        if self.tick < STRIKE_PAUSE_TICKS || self.battle.is_over() {
            return None;
        }
        let frame = self.tick - STRIKE_PAUSE_TICKS;
        let half = LUNGE_TICKS / 2;
        let out = if frame < half { frame + 1 } else { LUNGE_TICKS - frame - 1 };
        Some((self.battle.next_attacker(), out as f64 / half as f64))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Spinning { outcome: Outcome, tick: u32 },
    Battling(BattleScene),
    ShowingTreasure { ticks_left: u32 },
}

impl Phase {
    /// Spin and upgrade inputs are ignored while busy.
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Spinning { .. } | Phase::Battling(_))
    }

    pub fn enemy(&self) -> Option<&Character> {
        match self {
            Phase::Battling(scene) => Some(&scene.battle.enemy),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinOutcome {
    Started,
    Busy,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub progression: Progression,
    pub phase: Phase,
    pub reels: [Outcome; REEL_COUNT],
    /// Result of the last finished reel animation.
    pub slot_result: Option<Outcome>,
    /// Scrolling background offset in pixels, kept within (-BACKGROUND_TILE_PX, 0].
    pub background_x: i32,
    /// User-visible battle log, oldest first.
    pub log: Vec<String>,
    /// Bumped on every visible change; the canvas redraws on it.
    pub version: u64,
    /// Bumped on every change that must survive a reload.
    pub save_revision: u64,
    rng: StdRng,
}

// The RNG stream is not part of what the UI observes.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.save_revision == other.save_revision
            && self.progression == other.progression
            && self.phase == other.phase
            && self.reels == other.reels
            && self.slot_result == other.slot_result
            && self.background_x == other.background_x
            && self.log == other.log
    }
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::restored(seed, Progression::default())
    }

    pub fn restored(seed: u64, progression: Progression) -> Self {
        Self {
            progression,
            phase: Phase::Idle,
            reels: [Outcome::Advance; REEL_COUNT],
            slot_result: None,
            background_x: 0,
            log: Vec::new(),
            version: 0,
            save_revision: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    fn mark_saved(&mut self) {
        self.save_revision = self.save_revision.wrapping_add(1);
    }

    /// Rolls an outcome and starts the reel animation.
    pub fn spin(&mut self) -> SpinOutcome {
        if self.phase.is_busy() {
            return self.reject_busy_spin();
        }
        let outcome = resolver::roll_outcome(&mut self.rng);
        self.start_spin(outcome)
    }

    pub fn start_spin(&mut self, outcome: Outcome) -> SpinOutcome {
        if self.phase.is_busy() {
            return self.reject_busy_spin();
        }
        clog(&format!("[spin] stage={} outcome={:?}", self.progression.progress.stage, outcome));
        self.phase = Phase::Spinning { outcome, tick: 0 };
        self.slot_result = None;
        self.mark_dirty();
        SpinOutcome::Started
    }

    /// Rolls and resolves immediately, battles included, skipping every animation.
    pub fn spin_instant(&mut self) -> SpinOutcome {
        if self.phase.is_busy() {
            return self.reject_busy_spin();
        }
        let resolution = resolver::spin(&mut self.progression, &mut self.rng);
        let outcome = resolution.outcome();
        self.reels = [outcome; REEL_COUNT];
        self.slot_result = Some(outcome);
        self.phase = Phase::Idle;
        self.record_resolution(resolution);
        SpinOutcome::Started
    }

    fn reject_busy(&mut self) {
        self.push_log("Busy! Wait for the current action to finish.");
        self.mark_dirty();
    }

    fn reject_busy_spin(&mut self) -> SpinOutcome {
        self.reject_busy();
        SpinOutcome::Busy
    }

    pub fn upgrade(&mut self, kind: UpgradeKind) -> UpgradeOutcome {
        if self.phase.is_busy() {
            self.reject_busy();
            return UpgradeOutcome::Busy;
        }
        let result = resolver::purchase(&mut self.progression, kind);
        match result {
            UpgradeOutcome::Purchased { cost } => {
                self.push_log(format!("{} upgraded for {} gold.", kind.label(), cost));
                self.mark_saved();
            }
            UpgradeOutcome::NotEnoughGold { .. } => self.push_log("Not enough gold!"),
            UpgradeOutcome::Busy => {}
        }
        self.mark_dirty();
        result
    }

    /// Advances every running animation by one scheduler step.
    pub fn tick(&mut self) -> bool {
        match self.phase.clone() {
            Phase::Idle => false,
            Phase::Spinning { outcome, tick } => {
                self.tick_spin(outcome, tick + 1);
                true
            }
            Phase::Battling(scene) => {
                self.tick_battle(scene);
                true
            }
            Phase::ShowingTreasure { ticks_left } => {
                self.phase = if ticks_left <= 1 {
                    Phase::Idle
                } else {
                    Phase::ShowingTreasure { ticks_left: ticks_left - 1 }
                };
                self.mark_dirty();
                true
            }
        }
    }

    fn tick_spin(&mut self, outcome: Outcome, tick: u32) {
        if tick < reel_ticks() {
            if tick % TICKS_PER_REEL_CHANGE == 0 {
                for reel in self.reels.iter_mut() {
                    *reel = Outcome::ALL[self.rng.gen_range(0..Outcome::ALL.len())];
                }
            }
            self.phase = Phase::Spinning { outcome, tick };
        } else if tick == reel_ticks() {
            self.reels = [outcome; REEL_COUNT];
            self.slot_result = Some(outcome);
            self.phase = Phase::Spinning { outcome, tick };
        } else {
            self.background_x -= WALK_SPEED_PX;
            if self.background_x <= -BACKGROUND_TILE_PX {
                self.background_x += BACKGROUND_TILE_PX;
            }
            if tick >= spin_ticks() {
                self.finish_spin(outcome);
            } else {
                self.phase = Phase::Spinning { outcome, tick };
            }
        }
        self.mark_dirty();
    }

    fn finish_spin(&mut self, outcome: Outcome) {
        let resolution = resolver::resolve(&mut self.progression, outcome, &mut self.rng);
        self.phase = Phase::Idle;
        self.record_resolution(resolution);
    }

    fn tick_battle(&mut self, mut scene: BattleScene) {
        scene.tick += 1;
        if scene.tick >= strike_ticks() {
            scene.tick = 0;
            if let Some(strike) = scene.battle.strike(&mut self.progression.player.stats) {
                self.push_log(strike.describe());
            }
        }
        self.mark_dirty();
        if scene.battle.is_over() {
            self.end_battle(&scene.battle);
        } else {
            self.phase = Phase::Battling(scene);
        }
    }

    fn end_battle(&mut self, battle: &Battle) {
        self.phase = Phase::Idle;
        if let Some(conclusion) = resolver::conclude_battle(&mut self.progression, battle) {
            self.log_conclusion(conclusion);
            self.mark_saved();
        }
        self.mark_dirty();
    }

    fn record_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Advanced => {
                self.push_log(format!("Moved on to stage {}.", self.progression.progress.stage));
                self.mark_saved();
            }
            Resolution::Treasure { gold } => {
                self.push_log(format!("Found {} gold!", gold));
                self.phase = Phase::ShowingTreasure { ticks_left: TREASURE_TICKS };
                self.mark_saved();
            }
            Resolution::Healed { amount } => {
                self.push_log(format!("Recovered {} health.", amount));
            }
            Resolution::BattleStarted(battle) => {
                self.push_log(format!(
                    "A stage {} enemy appears! (ATK {} / DEF {} / HP {})",
                    battle.stage, battle.enemy.attack, battle.enemy.defense, battle.enemy.health
                ));
                if battle.is_over() {
                    self.end_battle(&battle);
                } else {
                    self.phase = Phase::Battling(BattleScene { battle, tick: 0 });
                }
            }
            Resolution::Fought { report, conclusion } => {
                for strike in &report.strikes {
                    self.push_log(strike.describe());
                }
                if let Some(conclusion) = conclusion {
                    self.log_conclusion(conclusion);
                }
                self.mark_saved();
            }
        }
        self.mark_dirty();
    }

    fn log_conclusion(&mut self, conclusion: BattleConclusion) {
        match conclusion {
            BattleConclusion::Victory { gold } => {
                self.push_log(format!("Enemy defeated! Earned {} gold.", gold));
            }
            BattleConclusion::Defeat => {
                self.push_log("Defeated. Starting over from stage 1.");
            }
        }
    }

    /// Back to a fresh game; the RNG stream is kept.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let version = self.version;
        *self = Self::restored(0, Progression::default());
        self.rng = rng;
        self.version = version;
        self.mark_dirty();
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    Spin,
    /// Spin that resolves at once (fast mode).
    SpinInstant,
    Upgrade(UpgradeKind),
    Tick, // one scheduler step
    Reset,
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            Spin => {
                new.spin();
            }
            SpinInstant => {
                new.spin_instant();
            }
            Upgrade(kind) => {
                new.upgrade(kind);
            }
            Tick => {
                if !new.tick() {
                    return self;
                }
            }
            Reset => new.reset(),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_idle(state: &mut GameState) -> u32 {
        let mut ticks = 0;
        while state.phase != Phase::Idle {
            state.tick();
            ticks += 1;
            assert!(ticks < 100_000, "scheduler never returned to idle");
        }
        ticks
    }

    #[test]
    fn upgrade_cost_floors_after_every_purchase() {
        let mut costs = UpgradeCosts::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(costs.cost(UpgradeKind::Attack));
            costs.record_purchase(UpgradeKind::Attack);
        }
        // 168 * 1.5 = 252 exactly; the closed form would give 253
        assert_eq!(seen, vec![50, 75, 112, 168, 252, 378]);
        assert_eq!(costs.cost(UpgradeKind::Defense), 50);
        assert_eq!(costs.cost(UpgradeKind::Health), 50);
    }

    #[test]
    fn next_cost_saturates_and_keeps_rising() {
        assert_eq!(next_cost(u64::MAX), u64::MAX);
        assert_eq!(next_cost(u64::MAX - 1), u64::MAX);
        assert_eq!(next_cost(1), 2);
        let mut c = BASE_UPGRADE_COST;
        for _ in 0..200 {
            let n = next_cost(c);
            assert!(n > c || c == u64::MAX);
            c = n;
        }
        assert_eq!(c, u64::MAX);
    }

    #[test]
    fn heal_near_the_integer_limit_does_not_overflow() {
        let mut c = Character::new(10, 5, i64::MAX);
        c.health = i64::MAX - 3;
        assert_eq!(c.heal(i64::MAX), 3);
        assert_eq!(c.health, i64::MAX);
    }

    #[test]
    fn heal_is_clamped() {
        let mut c = Character::new(10, 5, 100);
        c.health = 95;
        assert_eq!(c.heal(20), 5);
        assert_eq!(c.health, 100);
        assert_eq!(c.heal(20), 0);
    }

    #[test]
    fn advance_raises_best_stage_only_when_exceeded() {
        let mut p = Progress { stage: 2, max_stage: 5 };
        assert!(!p.advance());
        assert_eq!(p.max_stage, 5);
        p.stage = 5;
        assert!(p.advance());
        assert_eq!((p.stage, p.max_stage), (6, 6));
        p.reset_stage();
        assert_eq!((p.stage, p.max_stage), (1, 6));
    }

    #[test]
    fn advance_spin_walks_then_moves_on() {
        let mut state = GameState::new(7);
        assert_eq!(state.start_spin(Outcome::Advance), SpinOutcome::Started);
        let ticks = run_until_idle(&mut state);
        assert_eq!(ticks, spin_ticks());
        assert_eq!(state.progression.progress.stage, 2);
        assert_eq!(state.progression.progress.max_stage, 2);
        assert_eq!(state.slot_result, Some(Outcome::Advance));
        assert_eq!(state.reels, [Outcome::Advance; REEL_COUNT]);
        assert_eq!(state.save_revision, 1);
        assert!(state.background_x > -BACKGROUND_TILE_PX && state.background_x <= 0);
    }

    #[test]
    fn treasure_shows_chest_then_goes_idle() {
        let mut state = GameState::new(3);
        state.start_spin(Outcome::Treasure);
        for _ in 0..spin_ticks() {
            state.tick();
        }
        assert_eq!(state.phase, Phase::ShowingTreasure { ticks_left: TREASURE_TICKS });
        let gold = state.progression.player.gold;
        assert!((TREASURE_GOLD_MIN..=TREASURE_GOLD_MAX).contains(&gold));
        assert_eq!(state.progression.progress.stage, 2);
        // not busy: another spin is accepted while the chest is shown
        assert_eq!(state.start_spin(Outcome::Heal), SpinOutcome::Started);
    }

    #[test]
    fn inputs_are_ignored_while_spinning() {
        let mut state = GameState::new(1);
        state.progression.player.gold = 1_000;
        state.start_spin(Outcome::Heal);
        let before = state.progression;
        assert_eq!(state.spin(), SpinOutcome::Busy);
        assert_eq!(state.log.last().map(String::as_str), Some("Busy! Wait for the current action to finish."));
        assert_eq!(state.spin_instant(), SpinOutcome::Busy);
        assert_eq!(state.upgrade(UpgradeKind::Attack), UpgradeOutcome::Busy);
        assert_eq!(state.log.len(), 3);
        assert_eq!(state.progression, before);
        assert!(matches!(state.phase, Phase::Spinning { tick: 0, .. }));
    }

    #[test]
    fn animated_battle_matches_instant_resolution() {
        let mut animated = GameState::new(11);
        animated.start_spin(Outcome::Battle);
        for _ in 0..spin_ticks() {
            animated.tick();
        }
        assert!(matches!(animated.phase, Phase::Battling(_)));
        let mut busy_gold = animated.clone();
        busy_gold.progression.player.gold = 10_000;
        assert_eq!(busy_gold.upgrade(UpgradeKind::Health), UpgradeOutcome::Busy);
        run_until_idle(&mut animated);

        let mut instant = Progression::default();
        let mut battle = Battle::new(1, &instant.player.stats);
        battle.resolve(&mut instant.player.stats);
        resolver::conclude_battle(&mut instant, &battle);

        assert_eq!(animated.progression, instant);
        assert_eq!(animated.phase, Phase::Idle);
    }

    #[test]
    fn lunge_goes_out_and_back() {
        let player = Character::new(10, 5, 100);
        let mut scene = BattleScene { battle: Battle::new(1, &player), tick: 0 };
        assert_eq!(scene.lunge(), None);
        scene.tick = STRIKE_PAUSE_TICKS + LUNGE_TICKS / 2 - 1;
        assert_eq!(scene.lunge(), Some((Side::Player, 1.0)));
        scene.tick = strike_ticks() - 1;
        assert_eq!(scene.lunge(), Some((Side::Player, 0.0)));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut state = GameState::new(5);
        state.progression.player.gold = 500;
        state.upgrade(UpgradeKind::Attack);
        state.upgrade(UpgradeKind::Health);
        state.progression.progress = Progress { stage: 7, max_stage: 9 };
        state.reset();
        let p = &state.progression;
        assert_eq!(p.player.stats.attack, 10);
        assert_eq!(p.player.stats.defense, 5);
        assert_eq!(p.player.stats.max_health, 100);
        assert_eq!(p.player.gold, 0);
        assert_eq!((p.progress.stage, p.progress.max_stage), (1, 1));
        for kind in UpgradeKind::ALL {
            assert_eq!(p.upgrades.cost(kind), 50);
        }
        assert!(state.log.is_empty());
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn log_keeps_most_recent_lines() {
        let mut state = GameState::new(0);
        for i in 0..(LOG_CAPACITY + 5) {
            state.push_log(format!("line {i}"));
        }
        assert_eq!(state.log.len(), LOG_CAPACITY);
        assert_eq!(state.log[0], "line 5");
    }

    #[test]
    fn reducer_returns_same_rc_when_idle_tick() {
        let state = Rc::new(GameState::new(0));
        let next = state.clone().reduce(GameAction::Tick);
        assert!(Rc::ptr_eq(&state, &next));
        let spun = state.clone().reduce(GameAction::Spin);
        assert!(!Rc::ptr_eq(&state, &spun));
        assert!(matches!(spun.phase, Phase::Spinning { .. }));
        let rejected = spun.clone().reduce(GameAction::Spin);
        assert!(matches!(rejected.phase, Phase::Spinning { tick: 0, .. }));
        assert_eq!(rejected.log.len(), 1);
    }

    #[test]
    fn instant_spin_never_leaves_busy_phase() {
        let mut state = GameState::new(42);
        for _ in 0..200 {
            assert_eq!(state.spin_instant(), SpinOutcome::Started);
            assert!(!state.phase.is_busy());
            let p = &state.progression;
            assert!(p.progress.max_stage >= p.progress.stage);
            assert!(p.player.stats.health <= p.player.stats.max_health);
            if let Phase::ShowingTreasure { .. } = state.phase {
                run_until_idle(&mut state);
            }
        }
    }
}
