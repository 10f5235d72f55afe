use crate::model::GameKind;
use crate::session::{LossReason, Phase};
use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LevelCompleteOverlayProps {
    pub phase: Phase,
    pub kind: GameKind,
    pub score: u32,
    pub last_points: u32,
    pub time_used: u32,
    pub has_next: bool,
    pub on_next: Callback<()>,
    pub on_restart: Callback<()>,
    pub on_exit: Callback<()>,
}

#[function_component]
pub fn LevelCompleteOverlay(props: &LevelCompleteOverlayProps) -> Html {
    let (title, accent) = match props.phase {
        Phase::Won if props.has_next => ("🎉 Level Complete!".to_string(), "#2ea043"),
        Phase::Won => (format!("👑 Every {} level complete!", props.kind.display_name()), "#d4af37"),
        Phase::Lost(LossReason::Timeout) => ("⏰ Time's up".to_string(), "#f85149"),
        Phase::Lost(LossReason::Incorrect) => ("❌ Incorrect answer".to_string(), "#f85149"),
        Phase::Lost(LossReason::Skipped) => ("⏭️ Level skipped".to_string(), "#8b949e"),
        _ => return html! {},
    };
    let won = props.phase == Phase::Won;
    let next_btn = {
        let cb = props.on_next.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let restart_btn = {
        let cb = props.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let exit_btn = {
        let cb = props.on_exit.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style={format!("position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.85); border:2px solid {accent}; padding:24px 32px; border-radius:12px; text-align:center; min-width:320px;")}>
            <h2 style={format!("margin:0 0 12px 0; color:{accent};")}>{ title }</h2>
            { if won {
                html!{ <>
                    <p style="margin:4px 0;">{ format!("+{} points", props.last_points) }</p>
                    <p style="margin:4px 0;">{ format!("Score: {}", props.score) }</p>
                    <p style="margin:4px 0;">{ format!("Time: {}", format_time(u64::from(props.time_used))) }</p>
                </> }
            } else {
                html!{ <p style="margin:4px 0;">{"Don't give up! Every try helps you learn."}</p> }
            } }
            <div style="margin-top:16px; display:flex; gap:12px; justify-content:center;">
                { if won && props.has_next { html!{ <button onclick={next_btn}>{"Next Level"}</button> } } else { html!{} } }
                <button onclick={restart_btn}>{ if won { "Play Again" } else { "Try Again" } }</button>
                <button onclick={exit_btn}>{"Levels"}</button>
            </div>
        </div>
    }
}
