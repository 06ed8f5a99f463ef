use crate::model::Outcome;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SlotPanelProps {
    pub reels: Vec<Outcome>,
    pub result: Option<Outcome>,
    pub busy: bool,
    pub on_spin: Callback<()>,
}

#[function_component]
pub fn SlotPanel(props: &SlotPanelProps) -> Html {
    let spin_cb = {
        let cb = props.on_spin.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reel_style = "width:56px; height:56px; display:flex; align-items:center; justify-content:center; font-size:30px; background:#0d1117; border:1px solid #30363d; border-radius:6px;";
    let result_text = match props.result {
        Some(o) => format!("Result: {} {}", o.symbol(), o.label()),
        None => String::new(),
    };
    html! {
        <div style="flex:1; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; display:flex; flex-direction:column; align-items:center; gap:10px;">
            <div style="display:flex; gap:8px;">
                { for props.reels.iter().map(|r| html!{ <div style={reel_style}>{ r.symbol() }</div> }) }
            </div>
            <div style="min-height:18px; font-size:14px;">{ result_text }</div>
            <button onclick={spin_cb} disabled={props.busy} style="min-width:120px; font-size:16px;">{"Spin"}</button>
        </div>
    }
}
