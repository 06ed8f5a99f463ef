use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BattleLogProps {
    pub lines: Vec<String>,
    /// Game state version; the view scrolls when it moves.
    pub version: u64,
}

#[function_component]
pub fn BattleLog(props: &BattleLogProps) -> Html {
    let log_ref = use_node_ref();
    // Keep the newest line in view
    {
        let log_ref = log_ref.clone();
        use_effect_with(props.version, move |_| {
            if let Some(el) = log_ref.cast::<web_sys::Element>() {
                el.set_scroll_top(el.scroll_height());
            }
            || ()
        });
    }
    html! {
        <div ref={log_ref} style="width:800px; height:160px; overflow-y:auto; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px 12px; font-size:13px; line-height:1.5;">
            { for props.lines.iter().map(|l| html!{ <p style="margin:0;">{ l.clone() }</p> }) }
        </div>
    }
}
