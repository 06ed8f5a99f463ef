use super::{
    battle_log::BattleLog, settings_modal::SettingsModal, slot_panel::SlotPanel,
    stage_canvas::StageCanvas, stats_panel::StatsPanel, upgrade_panel::UpgradePanel,
};
use crate::model::{GameAction, GameState, UpgradeKind};
use crate::state::Settings;
use crate::storage::{self, LocalStore};
use crate::util::{browser_seed, clog};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

/// Scheduler step length.
pub const TICK_MS: i32 = 20;

#[function_component(App)]
pub fn app() -> Html {
    let game = use_reducer(|| {
        let seed = browser_seed();
        match storage::load_progression(&LocalStore) {
            Some(p) => GameState::restored(seed, p),
            None => GameState::new(seed),
        }
    });
    let settings = use_state(|| Settings::load(&LocalStore));
    let open_settings = use_state(|| false);

    // Single scheduler tick driving every animation
    {
        let game = game.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let tick = Closure::wrap(Box::new(move || {
                game.dispatch(GameAction::Tick);
            }) as Box<dyn FnMut()>);
            let tick_id = window.as_ref().and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    TICK_MS,
                )
                .ok()
            });
            move || {
                if let (Some(w), Some(id)) = (window, tick_id) {
                    w.clear_interval_with_handle(id);
                }
                drop(tick);
            }
        });
    }
    // Persist whenever the resolver marks a durable change
    {
        let game = game.clone();
        use_effect_with(game.save_revision, move |rev| {
            if *rev > 0 {
                if let Err(e) = storage::save_progression(&LocalStore, &game.progression) {
                    clog(&format!("[storage] save failed: {}", e));
                }
            }
            || ()
        });
    }

    let on_spin = {
        let game = game.clone();
        let fast = settings.fast_mode;
        Callback::from(move |()| {
            game.dispatch(if fast { GameAction::SpinInstant } else { GameAction::Spin });
        })
    };
    let on_upgrade = {
        let game = game.clone();
        Callback::from(move |kind: UpgradeKind| game.dispatch(GameAction::Upgrade(kind)))
    };
    let update_settings = |f: fn(&mut Settings)| {
        let settings = settings.clone();
        Callback::from(move |()| {
            let mut next = *settings;
            f(&mut next);
            if let Err(e) = next.save(&LocalStore) {
                clog(&format!("[storage] settings not saved: {}", e));
            }
            settings.set(next);
        })
    };
    let on_toggle_fast = update_settings(|s| s.fast_mode = !s.fast_mode);
    let on_toggle_log = update_settings(|s| s.show_log = !s.show_log);
    let on_hard_reset = {
        let game = game.clone();
        let settings = settings.clone();
        let open_settings = open_settings.clone();
        Callback::from(move |()| {
            if let Err(e) = storage::clear_all(&LocalStore) {
                clog(&format!("[storage] clear failed: {}", e));
            }
            settings.set(Settings::default());
            game.dispatch(GameAction::Reset);
            open_settings.set(false);
        })
    };
    let open_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |_| open_settings.set(true))
    };
    let close_settings_cb = {
        let open_settings = open_settings.clone();
        Callback::from(move |()| open_settings.set(false))
    };

    let p = game.progression;
    let busy = game.phase.is_busy();
    let costs = UpgradeKind::ALL.map(|k| (k, p.upgrades.cost(k)));

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#e6edf3; display:flex; flex-direction:column; align-items:center; gap:12px; padding:16px; font-family:sans-serif;">
            <div style="display:flex; width:800px; justify-content:space-between; align-items:center;">
                <h2 style="margin:0;">{"Slot Quest"}</h2>
                <button onclick={open_settings_cb}>{"Settings"}</button>
            </div>
            <StageCanvas game={game.clone()} />
            <div style="display:flex; gap:12px; width:800px; align-items:flex-start;">
                <StatsPanel
                    stage={p.progress.stage}
                    max_stage={p.progress.max_stage}
                    attack={p.player.stats.attack}
                    defense={p.player.stats.defense}
                    health={p.player.stats.health}
                    max_health={p.player.stats.max_health}
                    gold={p.player.gold}
                />
                <SlotPanel reels={game.reels.to_vec()} result={game.slot_result} busy={busy} on_spin={on_spin} />
                <UpgradePanel costs={costs.to_vec()} gold={p.player.gold} busy={busy} on_upgrade={on_upgrade} />
            </div>
            { if settings.show_log { html!{ <BattleLog lines={game.log.clone()} version={game.version} /> } } else { html!{} } }
            <SettingsModal
                show={*open_settings}
                on_close={close_settings_cb}
                fast_mode={settings.fast_mode}
                on_toggle_fast_mode={on_toggle_fast}
                show_log={settings.show_log}
                on_toggle_log={on_toggle_log}
                on_hard_reset={on_hard_reset}
            />
        </div>
    }
}
