use crate::model::UpgradeKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UpgradePanelProps {
    /// Current price per stat.
    pub costs: Vec<(UpgradeKind, u64)>,
    pub gold: u64,
    pub busy: bool,
    pub on_upgrade: Callback<UpgradeKind>,
}

#[function_component]
pub fn UpgradePanel(props: &UpgradePanelProps) -> Html {
    let button = |kind: UpgradeKind, cost: u64| {
        let cb = props.on_upgrade.clone();
        let onclick = Callback::from(move |_| cb.emit(kind));
        let affordable = props.gold >= cost;
        let gain = match kind {
            UpgradeKind::Health => "+50",
            UpgradeKind::Attack | UpgradeKind::Defense => "+5",
        };
        // Clicks while short on gold still go through so the log explains the rejection.
        html! {
            <button onclick={onclick} disabled={props.busy}
                style={format!("display:flex; justify-content:space-between; gap:12px; opacity:{};", if affordable { "1" } else { "0.6" })}>
                <span>{ format!("{} {}", kind.label(), gain) }</span>
                <span style="color:#d4af37;">{ format!("🪙 {}", cost) }</span>
            </button>
        }
    };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
            <div style="font-weight:600;">{"Upgrades"}</div>
            { for props.costs.iter().map(|(kind, cost)| button(*kind, *cost)) }
        </div>
    }
}
