use crate::achievements::{SessionBadge, SessionBadges};
use crate::model::GameKind;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub kind: GameKind,
    pub grade: u32,
    pub level: u32,
    pub score: u32,
    pub streak: u32,
    pub badges: SessionBadges,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let earned = SessionBadge::ALL
        .into_iter()
        .filter(|b| props.badges.is_unlocked(*b))
        .map(|b| {
            let title = b.title(props.kind);
            html! { <span key={b.id(props.kind)} title={title.clone()} style="font-size:12px; background:#1c2128; border-radius:6px; padding:2px 6px;">{ title }</span> }
        })
        .collect::<Html>();
    html! {
        <div style="position:absolute; top:12px; left:12px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={icon_style}>{"🎯"}</span>
                <span style={label_style}>{ props.kind.display_name() }</span>
                <span style={value_style}>{ format!("G{} · L{}", props.grade, props.level) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", icon_style)}>{"⭐"}</span>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Score"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ props.score }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#f0883e;", icon_style)}>{"🔥"}</span>
                <span style={format!("{} color:#f0883e;", label_style)}>{"Streak"}</span>
                <span style={format!("{} color:#f0883e;", value_style)}>{ props.streak }</span>
            </div>
            <div style="display:flex; gap:4px; flex-wrap:wrap; max-width:230px;">{ earned }</div>
        </div>
    }
}
