use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::model::{Character, GameState, BACKGROUND_TILE_PX};
use crate::state::scene::{FIGURE_SIZE, GROUND_Y};
use crate::state::SceneLayout;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 300;
const HEALTH_BAR_WIDTH: f64 = 50.0;

#[derive(Properties, PartialEq, Clone)]
pub struct StageCanvasProps {
    pub game: UseReducerHandle<GameState>,
}

/// Render collaborator: redraws the whole scene whenever the state version moves.
#[function_component(StageCanvas)]
pub fn stage_canvas(props: &StageCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    {
        let canvas_ref = canvas_ref.clone();
        let game = props.game.clone();
        use_effect_with(props.game.version, move |_| {
            if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                refresh(&canvas, &game);
            }
            || ()
        });
    }
    html! {
        <canvas ref={canvas_ref} id="game-canvas"
            width={CANVAS_WIDTH.to_string()} height={CANVAS_HEIGHT.to_string()}
            style="display:block; border:1px solid #30363d; border-radius:8px;"></canvas>
    }
}

fn refresh(canvas: &HtmlCanvasElement, state: &GameState) {
    let ctx = match canvas.get_context("2d").ok().flatten() {
        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        None => return,
    };
    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    let layout = SceneLayout::compute(state, w);

    ctx.clear_rect(0.0, 0.0, w, h);
    // Dotted background scrolls while walking
    ctx.set_fill_style_str("#e0e0e0");
    ctx.fill_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str("#a0a0a0");
    let step = BACKGROUND_TILE_PX as f64;
    let mut x = (state.background_x % BACKGROUND_TILE_PX) as f64;
    while x < w {
        let mut y = 0.0;
        while y < h {
            ctx.fill_rect(x, y, 2.0, 2.0);
            y += step;
        }
        x += step;
    }

    draw_figure(&ctx, layout.player_x, &state.progression.player.stats, "blue");
    if let (Some(ex), Some(enemy)) = (layout.enemy_x, state.phase.enemy()) {
        draw_figure(&ctx, ex, enemy, "red");
    }
    if layout.show_treasure {
        ctx.set_font("30px Arial");
        ctx.set_text_align("center");
        ctx.fill_text("💰", w / 2.0, GROUND_Y - 40.0).ok();
    }
}

fn draw_figure(ctx: &CanvasRenderingContext2d, x: f64, who: &Character, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(x, GROUND_Y - FIGURE_SIZE, FIGURE_SIZE, FIGURE_SIZE);
    let bar_x = x + FIGURE_SIZE / 2.0 - HEALTH_BAR_WIDTH / 2.0;
    let bar_y = GROUND_Y - FIGURE_SIZE - 15.0;
    ctx.set_fill_style_str("red");
    ctx.fill_rect(bar_x, bar_y, HEALTH_BAR_WIDTH, 5.0);
    ctx.set_fill_style_str("green");
    ctx.fill_rect(bar_x, bar_y, HEALTH_BAR_WIDTH * who.health_fraction(), 5.0);
}
