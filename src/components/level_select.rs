use super::StoreHandle;
use crate::model::{GameKind, LevelSpec};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LevelSelectProps {
    pub store: StoreHandle,
    pub version: u32,
    pub game: GameKind,
    pub on_select_game: Callback<GameKind>,
    pub on_play: Callback<LevelSpec>,
    pub on_open_settings: Callback<()>,
}

#[function_component]
pub fn LevelSelect(props: &LevelSelectProps) -> Html {
    let store = props.store.0.borrow();
    let kind = props.game;
    let summary = store.game_progress(kind);

    let tabs = GameKind::ALL.iter().map(|k| {
        let k = *k;
        let cb = props.on_select_game.clone();
        let active = if k == kind { "background:#1f6feb; color:#fff;" } else { "" };
        html! { <button style={active} onclick={Callback::from(move |_| cb.emit(k))}>{ k.display_name() }</button> }
    });

    let grades = store.catalog().grades(kind).into_iter().map(|grade| {
        let grade_summary = store.grade_progress(kind, grade);
        let levels = store.catalog().levels_in_grade(kind, grade).map(|l| {
            let done = store.is_level_completed(kind, l.grade, l.level);
            let record = store.record(kind, l.grade, l.level);
            let level = l.clone();
            let cb = props.on_play.clone();
            let border = if done { "#2ea043" } else { "#30363d" };
            html! {
                <button
                    onclick={Callback::from(move |_| cb.emit(level.clone()))}
                    style={format!("border:1px solid {border}; border-radius:8px; padding:8px 12px; min-width:110px; text-align:left;")}
                >
                    <div style="font-weight:600;">{ format!("Level {}", l.level) }{ if done { " ✔" } else { "" } }</div>
                    <div style="font-size:11px; opacity:0.75;">{ format!("{}–{} · {}", l.target_min, l.target_max, l.difficulty.label()) }</div>
                    { if let Some(r) = record { html!{ <div style="font-size:11px; opacity:0.6;">{ format!("{} pts · {} plays", r.score, r.attempts) }</div> } } else { html!{} } }
                </button>
            }
        });
        html! {
            <div style="display:flex; flex-direction:column; gap:6px;">
                <h3 style="margin:8px 0 0 0; font-size:16px;">{ format!("Grade {grade} · {}%", grade_summary.percentage) }</h3>
                <div style="display:flex; gap:8px; flex-wrap:wrap;">{ for levels }</div>
            </div>
        }
    });

    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let resume = store.resume_point(kind).cloned().map(|level| {
        let cb = props.on_play.clone();
        let label = format!("Continue: Grade {} · Level {}", level.grade, level.level);
        html! { <button style="align-self:flex-start;" onclick={Callback::from(move |_| cb.emit(level.clone()))}>{ label }</button> }
    });
    let badges = store.achievements().iter().map(|a| {
        html! { <span title={a.description.clone()} style="background:#1c2128; border:1px solid #30363d; border-radius:6px; padding:2px 6px; font-size:12px;">{ format!("{} {}", a.icon, a.name) }</span> }
    });

    html! {
        <div style="max-width:760px; margin:0 auto; padding:24px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h2 style="margin:0;">{ format!("Hello, {}", store.user().name) }</h2>
                <button onclick={settings_cb}>{"Settings"}</button>
            </div>
            <div style="display:flex; gap:8px;">{ for tabs }</div>
            <div style="font-size:13px; opacity:0.8;">{ format!("{} of {} levels complete ({}%)", summary.completed, summary.total, summary.percentage) }</div>
            { for resume }
            { for grades }
            <div style="display:flex; gap:6px; flex-wrap:wrap;">{ for badges }</div>
        </div>
    }
}
