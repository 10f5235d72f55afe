use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct TimeDisplayProps {
    pub remaining: u32,
    pub limit: u32,
    pub pause_label: String,
    pub on_toggle_pause: Callback<()>,
}

#[function_component(TimeDisplay)]
pub fn time_display(props: &TimeDisplayProps) -> Html {
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // Amber under 30s, red under 10s.
    let color = match props.remaining {
        0..=10 => "#f85149",
        11..=30 => "#d29922",
        _ => "inherit",
    };
    html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); display:flex; flex-direction:column; align-items:center; gap:6px;">
        <div style={format!("font-size:20px; font-weight:600; color:{color};")}>{ format_time(u64::from(props.remaining)) }</div>
        <div style="font-size:11px; opacity:0.6;">{ format!("of {}", format_time(u64::from(props.limit))) }</div>
        <button onclick={pause_cb} style="padding:4px 10px; font-size:12px;">{ props.pause_label.clone() }</button>
    </div>}
}
