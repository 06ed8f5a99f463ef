use crate::model::Character;
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    PlayerWin,
    PlayerLoss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strike {
    pub attacker: Side,
    pub damage: i64,
}

impl Strike {
    pub fn describe(&self) -> String {
        match self.attacker {
            Side::Player => format!("You hit the enemy for {} damage.", self.damage),
            Side::Enemy => format!("The enemy hits you for {} damage.", self.damage),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub strikes: Vec<Strike>,
}

/// Damage per strike, floored at zero.
pub fn damage(attacker: &Character, defender: &Character) -> i64 {
    (attacker.attack - defender.defense).max(0)
}

pub fn enemy_for_stage(stage: u32) -> Character {
    let stage = stage as i64;
    Character::new(5 + 2 * stage, 3 + stage, 50 + 10 * stage)
}

/// Strictly alternating exchange, player first.
#[derive(Clone, Debug, PartialEq)]
pub struct Battle {
    pub stage: u32,
    pub enemy: Character,
    next: Side,
    pub outcome: Option<BattleOutcome>,
}

impl Battle {
    pub fn new(stage: u32, player: &Character) -> Self {
        Self::against(stage, enemy_for_stage(stage), player)
    }

    pub fn against(stage: u32, enemy: Character, player: &Character) -> Self {
        let mut battle = Self { stage, enemy, next: Side::Player, outcome: None };
        // Neither side can wound the other: the exchange would never end.
        if damage(player, &enemy) == 0 && damage(&enemy, player) == 0 {
            clog(&format!("[battle:deadlock] stage={} => loss", stage));
            battle.outcome = Some(BattleOutcome::PlayerLoss);
        }
        battle
    }

    pub fn next_attacker(&self) -> Side {
        self.next
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Lands the next strike. Returns None once the battle is decided.
    pub fn strike(&mut self, player: &mut Character) -> Option<Strike> {
        if self.is_over() {
            return None;
        }
        let strike = match self.next {
            Side::Player => {
                let dmg = damage(player, &self.enemy);
                self.enemy.health -= dmg;
                if !self.enemy.is_alive() {
                    self.outcome = Some(BattleOutcome::PlayerWin);
                }
                self.next = Side::Enemy;
                Strike { attacker: Side::Player, damage: dmg }
            }
            Side::Enemy => {
                let dmg = damage(&self.enemy, player);
                player.health -= dmg;
                if !player.is_alive() {
                    self.outcome = Some(BattleOutcome::PlayerLoss);
                }
                self.next = Side::Player;
                Strike { attacker: Side::Enemy, damage: dmg }
            }
        };
        if let Some(outcome) = self.outcome {
            clog(&format!("[battle:end] stage={} => {:?}", self.stage, outcome));
        }
        Some(strike)
    }

    /// Runs the exchange to its terminal state.
    pub fn resolve(&mut self, player: &mut Character) -> BattleReport {
        let mut strikes = Vec::new();
        while let Some(strike) = self.strike(player) {
            strikes.push(strike);
        }
        BattleReport {
            // strike() only stops once an outcome is set
            outcome: self.outcome.unwrap_or(BattleOutcome::PlayerLoss),
            strikes,
        }
    }
}
