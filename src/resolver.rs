//! Applies slot outcomes and upgrade purchases to the progression record.
//! Nothing here knows about time or the browser; the scheduler in `model` calls in.

use rand::Rng;

use crate::battle::{Battle, BattleOutcome, BattleReport};
use crate::model::{
    Outcome, Progression, UpgradeKind, HEALTH_UPGRADE_STEP, HEAL_PERCENT, STAT_UPGRADE_STEP,
    TREASURE_GOLD_MAX, TREASURE_GOLD_MIN,
};
use crate::util::clog;

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Advanced,
    Treasure { gold: u64 },
    Healed { amount: i64 },
    /// Battle created but not yet fought (animated path).
    BattleStarted(Battle),
    /// Battle fought to completion in one go.
    Fought { report: BattleReport, conclusion: Option<BattleConclusion> },
}

impl Resolution {
    pub fn outcome(&self) -> Outcome {
        match self {
            Resolution::Advanced => Outcome::Advance,
            Resolution::Treasure { .. } => Outcome::Treasure,
            Resolution::Healed { .. } => Outcome::Heal,
            Resolution::BattleStarted(_) | Resolution::Fought { .. } => Outcome::Battle,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleConclusion {
    Victory { gold: u64 },
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Purchased { cost: u64 },
    NotEnoughGold { cost: u64, gold: u64 },
    Busy,
}

/// Uniform pick over the four slot outcomes.
pub fn roll_outcome<R: Rng + ?Sized>(rng: &mut R) -> Outcome {
    Outcome::ALL[rng.gen_range(0..Outcome::ALL.len())]
}

pub fn advance(p: &mut Progression) {
    if p.progress.advance() {
        clog(&format!("[stage] new best {}", p.progress.max_stage));
    }
}

/// Grants random gold, then advances. Returns the gold found.
pub fn treasure<R: Rng + ?Sized>(p: &mut Progression, rng: &mut R) -> u64 {
    let gold = rng.gen_range(TREASURE_GOLD_MIN..=TREASURE_GOLD_MAX);
    p.player.gold = p.player.gold.saturating_add(gold);
    advance(p);
    gold
}

/// Restores HEAL_PERCENT of max health, clamped.
pub fn heal(p: &mut Progression) -> i64 {
    let stats = &mut p.player.stats;
    // i128 keeps the product exact for any stored max health
    let amount = (stats.max_health as i128 * HEAL_PERCENT as i128 / 100) as i64;
    stats.heal(amount)
}

/// Applies one outcome. Battles are only set up; the caller fights them.
pub fn resolve<R: Rng + ?Sized>(p: &mut Progression, outcome: Outcome, rng: &mut R) -> Resolution {
    match outcome {
        Outcome::Advance => {
            advance(p);
            Resolution::Advanced
        }
        Outcome::Treasure => Resolution::Treasure { gold: treasure(p, rng) },
        Outcome::Heal => Resolution::Healed { amount: heal(p) },
        Outcome::Battle => Resolution::BattleStarted(Battle::new(p.progress.stage, &p.player.stats)),
    }
}

/// Rolls and fully resolves one spin, fighting any battle to the end.
pub fn spin<R: Rng + ?Sized>(p: &mut Progression, rng: &mut R) -> Resolution {
    let outcome = roll_outcome(rng);
    match resolve(p, outcome, rng) {
        Resolution::BattleStarted(mut battle) => {
            let report = battle.resolve(&mut p.player.stats);
            let conclusion = conclude_battle(p, &battle);
            Resolution::Fought { report, conclusion }
        }
        other => other,
    }
}

/// Applies rewards or the defeat penalty. None while the battle is still running.
pub fn conclude_battle(p: &mut Progression, battle: &Battle) -> Option<BattleConclusion> {
    match battle.outcome? {
        BattleOutcome::PlayerWin => {
            let gold = 20 + 5 * battle.stage as u64;
            p.player.gold = p.player.gold.saturating_add(gold);
            advance(p);
            Some(BattleConclusion::Victory { gold })
        }
        BattleOutcome::PlayerLoss => {
            p.player.stats.restore();
            p.progress.reset_stage();
            Some(BattleConclusion::Defeat)
        }
    }
}

/// Buys one level of `kind` if affordable. Busy checks belong to the caller.
pub fn purchase(p: &mut Progression, kind: UpgradeKind) -> UpgradeOutcome {
    let cost = p.upgrades.cost(kind);
    if p.player.gold < cost {
        return UpgradeOutcome::NotEnoughGold { cost, gold: p.player.gold };
    }
    let stats = &mut p.player.stats;
    match kind {
        UpgradeKind::Attack => stats.attack = stats.attack.saturating_add(STAT_UPGRADE_STEP),
        UpgradeKind::Defense => stats.defense = stats.defense.saturating_add(STAT_UPGRADE_STEP),
        UpgradeKind::Health => {
            stats.max_health = stats.max_health.saturating_add(HEALTH_UPGRADE_STEP);
            stats.health = stats.health.saturating_add(HEALTH_UPGRADE_STEP).min(stats.max_health);
        }
    }
    p.player.gold -= cost;
    p.upgrades.record_purchase(kind);
    clog(&format!("[upgrade] {:?} cost={} next={}", kind, cost, p.upgrades.cost(kind)));
    UpgradeOutcome::Purchased { cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::enemy_for_stage;
    use crate::model::{Character, Progress};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn treasure_grants_gold_in_range_and_advances() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut p = Progression::default();
        for _ in 0..500 {
            let before = p.player.gold;
            let gold = treasure(&mut p, &mut rng);
            assert!((10..=59).contains(&gold));
            assert_eq!(p.player.gold, before + gold);
        }
        assert_eq!(p.progress.stage, 501);
        assert_eq!(p.progress.max_stage, 501);
    }

    #[test]
    fn repeated_heal_never_exceeds_max() {
        let mut p = Progression::default();
        p.player.stats.health = 1;
        let first = heal(&mut p);
        assert_eq!(first, 20);
        for _ in 0..10 {
            heal(&mut p);
            assert!(p.player.stats.health <= p.player.stats.max_health);
        }
        assert_eq!(p.player.stats.health, 100);
    }

    #[test]
    fn heal_amount_is_floored() {
        let mut p = Progression::default();
        p.player.stats = Character::new(10, 5, 157);
        p.player.stats.health = 1;
        assert_eq!(heal(&mut p), 31);
    }

    #[test]
    fn heal_with_huge_max_health_does_not_overflow() {
        let mut p = Progression::default();
        p.player.stats = Character::new(10, 5, i64::MAX / 10);
        p.player.stats.health = 1;
        let expected = (i64::MAX / 10) / 5;
        assert_eq!(heal(&mut p), expected);
        assert_eq!(p.player.stats.health, 1 + expected);
    }

    #[test]
    fn roll_outcome_hits_every_outcome() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [0u32; 4];
        for _ in 0..4_000 {
            let rolled = roll_outcome(&mut rng);
            let idx = Outcome::ALL.iter().position(|o| *o == rolled).unwrap();
            seen[idx] += 1;
        }
        // roughly uniform
        assert!(seen.iter().all(|&n| n > 800 && n < 1_200), "{seen:?}");
    }

    #[test]
    fn stage_one_victory_pays_and_advances() {
        let mut p = Progression::default();
        let enemy = Character::new(7, 4, 60);
        let mut battle = Battle::against(1, enemy, &p.player.stats);
        battle.resolve(&mut p.player.stats);
        let conclusion = conclude_battle(&mut p, &battle);
        assert_eq!(conclusion, Some(BattleConclusion::Victory { gold: 25 }));
        assert_eq!(p.player.gold, 25);
        assert_eq!(p.progress.stage, 2);
        assert!(p.progress.max_stage >= p.progress.stage);
    }

    #[test]
    fn defeat_resets_stage_and_restores_health() {
        let mut p = Progression::default();
        p.player.gold = 33;
        p.progress = Progress { stage: 12, max_stage: 12 };
        let mut battle = Battle::new(12, &p.player.stats);
        assert_eq!(battle.enemy, enemy_for_stage(12));
        battle.resolve(&mut p.player.stats);
        assert_eq!(conclude_battle(&mut p, &battle), Some(BattleConclusion::Defeat));
        assert_eq!(p.progress.stage, 1);
        assert_eq!(p.progress.max_stage, 12);
        assert_eq!(p.player.stats.health, p.player.stats.max_health);
        assert_eq!(p.player.gold, 33);
    }

    #[test]
    fn unfinished_battle_concludes_nothing() {
        let mut p = Progression::default();
        let battle = Battle::new(1, &p.player.stats);
        let before = p;
        assert_eq!(conclude_battle(&mut p, &battle), None);
        assert_eq!(p, before);
    }

    #[test]
    fn upgrade_rejected_without_gold() {
        let mut p = Progression::default();
        p.player.gold = 40;
        let result = purchase(&mut p, UpgradeKind::Attack);
        assert_eq!(result, UpgradeOutcome::NotEnoughGold { cost: 50, gold: 40 });
        assert_eq!(p.player.gold, 40);
        assert_eq!(p.player.stats.attack, 10);
        assert_eq!(p.upgrades.cost(UpgradeKind::Attack), 50);
    }

    #[test]
    fn upgrades_apply_stat_and_raise_price() {
        let mut p = Progression::default();
        p.player.gold = 1_000;
        p.player.stats.health = 60;

        assert_eq!(purchase(&mut p, UpgradeKind::Attack), UpgradeOutcome::Purchased { cost: 50 });
        assert_eq!(p.player.stats.attack, 15);
        assert_eq!(purchase(&mut p, UpgradeKind::Defense), UpgradeOutcome::Purchased { cost: 50 });
        assert_eq!(p.player.stats.defense, 10);
        assert_eq!(purchase(&mut p, UpgradeKind::Health), UpgradeOutcome::Purchased { cost: 50 });
        assert_eq!((p.player.stats.health, p.player.stats.max_health), (110, 150));
        assert_eq!(purchase(&mut p, UpgradeKind::Attack), UpgradeOutcome::Purchased { cost: 75 });

        assert_eq!(p.player.gold, 1_000 - 50 * 3 - 75);
        assert_eq!(p.upgrades.cost(UpgradeKind::Attack), 112);
        assert_eq!(p.upgrades.cost(UpgradeKind::Defense), 75);
    }

    #[test]
    fn upgrades_saturate_stats_at_the_integer_limit() {
        let mut p = Progression::default();
        p.player.gold = 1_000;
        p.player.stats = Character::new(i64::MAX - 1, i64::MAX, i64::MAX - 10);
        purchase(&mut p, UpgradeKind::Attack);
        purchase(&mut p, UpgradeKind::Defense);
        purchase(&mut p, UpgradeKind::Health);
        let s = p.player.stats;
        assert_eq!((s.attack, s.defense, s.max_health, s.health), (i64::MAX, i64::MAX, i64::MAX, i64::MAX));
    }

    #[test]
    fn fifth_purchase_uses_floored_chain() {
        let mut p = Progression::default();
        p.player.gold = 10_000;
        let paid: Vec<u64> = (0..6)
            .map(|_| match purchase(&mut p, UpgradeKind::Attack) {
                UpgradeOutcome::Purchased { cost } => cost,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(paid, vec![50, 75, 112, 168, 252, 378]);
        assert_eq!(p.player.gold, 10_000 - paid.iter().sum::<u64>());
    }

    #[test]
    fn prices_strictly_increase() {
        let mut p = Progression::default();
        p.player.gold = u64::MAX / 2;
        let mut last = 0;
        for _ in 0..30 {
            let cost = p.upgrades.cost(UpgradeKind::Defense);
            assert!(cost > last);
            last = cost;
            assert!(matches!(purchase(&mut p, UpgradeKind::Defense), UpgradeOutcome::Purchased { .. }));
        }
    }

    #[test]
    fn spin_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut p = Progression::default();
        for _ in 0..1_000 {
            let gold_before = p.player.gold;
            let resolution = spin(&mut p, &mut rng);
            assert!(p.progress.stage >= 1);
            assert!(p.progress.max_stage >= p.progress.stage);
            assert!(p.player.stats.health <= p.player.stats.max_health);
            if let Resolution::Fought { conclusion: Some(BattleConclusion::Defeat), .. } = &resolution {
                assert_eq!(p.progress.stage, 1);
                assert_eq!(p.player.gold, gold_before);
                assert_eq!(p.player.stats.health, p.player.stats.max_health);
            }
            assert!(!matches!(resolution, Resolution::BattleStarted(_)));
        }
    }
}
