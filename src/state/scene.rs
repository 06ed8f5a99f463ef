// Canvas scene geometry derived from the game state.
use crate::battle::Side;
use crate::model::{GameState, Phase};

pub const GROUND_Y: f64 = 150.0;
pub const PLAYER_X: f64 = 100.0;
pub const ENEMY_INSET: f64 = 150.0;
pub const FIGURE_SIZE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLayout {
    pub player_x: f64,
    pub enemy_x: Option<f64>,
    pub show_treasure: bool,
}

impl SceneLayout {
    /// Figure positions for a canvas `width` px wide. The lunging side
    /// moves up to half the gap toward its target.
    pub fn compute(state: &GameState, width: f64) -> Self {
        let mut player_x = PLAYER_X;
        let mut enemy_x = None;
        if let Phase::Battling(scene) = &state.phase {
            let base_enemy_x = (width - ENEMY_INSET).max(PLAYER_X + FIGURE_SIZE);
            let half_gap = (base_enemy_x - PLAYER_X) / 2.0;
            let mut ex = base_enemy_x;
            match scene.lunge() {
                Some((Side::Player, t)) => player_x += half_gap * t,
                Some((Side::Enemy, t)) => ex -= half_gap * t,
                None => {}
            }
            enemy_x = Some(ex);
        }
        Self {
            player_x,
            enemy_x,
            show_treasure: matches!(state.phase, Phase::ShowingTreasure { .. }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BattleScene, STRIKE_PAUSE_TICKS, LUNGE_TICKS};
    use crate::battle::Battle;

    #[test]
    fn idle_scene_has_no_enemy() {
        let state = GameState::new(0);
        let layout = SceneLayout::compute(&state, 800.0);
        assert_eq!(layout, SceneLayout { player_x: PLAYER_X, enemy_x: None, show_treasure: false });
    }

    #[test]
    fn player_lunge_moves_halfway() {
        let mut state = GameState::new(0);
        let battle = Battle::new(1, &state.progression.player.stats);
        let tick = STRIKE_PAUSE_TICKS + LUNGE_TICKS / 2 - 1;
        state.phase = Phase::Battling(BattleScene { battle, tick });
        let layout = SceneLayout::compute(&state, 800.0);
        assert_eq!(layout.enemy_x, Some(650.0));
        assert_eq!(layout.player_x, PLAYER_X + 275.0);
    }
}
