use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub stage: u32,
    pub max_stage: u32,
    pub attack: i64,
    pub defense: i64,
    pub health: i64,
    pub max_health: i64,
    pub gold: u64,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let row = |icon: &str, label: &str, value: String, color: &str| {
        html! {
            <div style={row_style}>
                <span style={format!("{} color:{};", icon_style, color)}>{ icon.to_string() }</span>
                <span style={format!("{} color:{};", label_style, color)}>{ label.to_string() }</span>
                <span style={format!("{} color:{};", value_style, color)}>{ value }</span>
            </div>
        }
    };
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
            { row("🏁", "Stage", props.stage.to_string(), "#e6edf3") }
            { row("🏆", "Best", props.max_stage.to_string(), "#a371f7") }
            { row("⚔", "Attack", props.attack.to_string(), "#f0883e") }
            { row("🛡", "Defense", props.defense.to_string(), "#58a6ff") }
            { row("❤", "Health", format!("{}/{}", props.health.max(0), props.max_health), "#f85149") }
            { row("🪙", "Gold", props.gold.to_string(), "#d4af37") }
        </div>
    }
}
