use super::{
    achievement_toast::AchievementToast, level_complete_overlay::LevelCompleteOverlay,
    stats_panel::StatsPanel, time_display::TimeDisplay, StoreHandle,
};
use crate::messages::{khipu_place_hint, YupanaPieces};
use crate::model::{ExplanationKind, GameKind, LevelSpec};
use crate::question::generate_question;
use crate::session::{GameSession, Phase, SessionAction};
use crate::timer::Ticker;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub store: StoreHandle,
    pub level: LevelSpec,
    pub on_exit: Callback<()>,
    /// Fired after the store records a completion.
    pub on_progress: Callback<()>,
}

fn hint_for(session: &GameSession) -> Option<String> {
    let q = session.question.as_ref()?;
    Some(match session.kind {
        GameKind::Khipu => khipu_place_hint(q.correct_answer),
        GameKind::Yupana => {
            let p = YupanaPieces::for_target(q.correct_answer).available(session.level.difficulty);
            format!(
                "{} Pieces on hand: {} large, {} medium, {} small.",
                session.kind.hint(),
                p.large,
                p.medium,
                p.small
            )
        }
        GameKind::Chacana => session.kind.hint().to_string(),
    })
}

#[function_component]
pub fn GameView(props: &GameViewProps) -> Html {
    let session = use_reducer(|| GameSession::new(props.level.clone()));
    let ticker = use_memo((), |_| Ticker::new());
    let error = use_state(|| None::<String>);
    let hint = use_state(|| None::<String>);
    let toasts = use_state(Vec::<String>::new);
    let has_next = use_state(|| true);

    // Dispatches a fresh question with the given constructor, or reports why not.
    let start_with = {
        let session = session.clone();
        let error = error.clone();
        let hint = hint.clone();
        move |level: &LevelSpec, make: &dyn Fn(crate::model::Question) -> SessionAction| {
            hint.set(None);
            match generate_question(level) {
                Ok(q) => {
                    error.set(None);
                    session.dispatch(make(q));
                }
                Err(e) => {
                    log::error!("no question for {} G{}L{}: {e}", level.kind, level.grade, level.level);
                    error.set(Some(e.to_string()));
                }
            }
        }
    };

    // Start on mount; stop ticking on unmount.
    {
        let start_with = start_with.clone();
        let level = props.level.clone();
        let ticker = ticker.clone();
        use_effect_with((), move |_| {
            start_with(&level, &|question| SessionAction::Start { question });
            move || ticker.stop()
        });
    }

    // Drive the clock only while playing; record wins exactly once per phase change.
    {
        let ticker = ticker.clone();
        let session_h = session.clone();
        let store = props.store.clone();
        let on_progress = props.on_progress.clone();
        let toasts = toasts.clone();
        let has_next = has_next.clone();
        let deps = (session.phase, session.level.grade, session.level.level);
        use_effect_with(deps, move |(phase, _, _)| {
            match phase {
                Phase::Playing => {
                    if !ticker.is_running() {
                        let s = session_h.clone();
                        ticker.start(1000, move || s.dispatch(SessionAction::Tick));
                    }
                }
                Phase::Won => {
                    ticker.stop();
                    let s = &*session_h;
                    let mut store = store.0.borrow_mut();
                    let unlocked = store.complete_level(
                        s.kind,
                        s.level.grade,
                        s.level.level,
                        s.score,
                        s.elapsed_secs,
                    );
                    has_next.set(store.next_level(s.kind, s.level.grade, s.level.level).is_some());
                    let mut msgs: Vec<String> = s.new_badges.iter().map(|b| b.title(s.kind)).collect();
                    msgs.extend(unlocked.iter().map(|a| format!("{} {}", a.icon, a.name)));
                    toasts.set(msgs);
                    on_progress.emit(());
                }
                _ => ticker.stop(),
            }
            || ()
        });
    }

    let on_answer = |value: i64| {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::Answer { value }))
    };
    let on_key = {
        let session = session.clone();
        Callback::from(move |e: KeyboardEvent| {
            let key = e.key();
            if key == " " || key.eq_ignore_ascii_case("p") {
                let action = if session.phase == Phase::Paused { SessionAction::Resume } else { SessionAction::Pause };
                session.dispatch(action);
                return;
            }
            if let (Ok(n), Some(q)) = (key.parse::<usize>(), session.question.as_ref()) {
                if let Some(value) = n.checked_sub(1).and_then(|i| q.options.get(i)) {
                    session.dispatch(SessionAction::Answer { value: *value });
                }
            }
        })
    };
    let on_toggle_pause = {
        let session = session.clone();
        Callback::from(move |_| {
            let action = if session.phase == Phase::Paused { SessionAction::Resume } else { SessionAction::Pause };
            session.dispatch(action);
        })
    };
    let on_hint = {
        let hint = hint.clone();
        let text = hint_for(&session);
        Callback::from(move |_| hint.set(text.clone()))
    };
    let on_retry_question = {
        let start_with = start_with.clone();
        let level = session.level.clone();
        Callback::from(move |_| start_with(&level, &|question| SessionAction::NewQuestion { question }))
    };
    let on_skip = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::Skip))
    };
    let on_restart = {
        let start_with = start_with.clone();
        let level = session.level.clone();
        let toasts = toasts.clone();
        Callback::from(move |_| {
            toasts.set(Vec::new());
            start_with(&level, &|question| SessionAction::Start { question });
        })
    };
    let on_next = {
        let start_with = start_with.clone();
        let store = props.store.clone();
        let level = session.level.clone();
        let toasts = toasts.clone();
        Callback::from(move |_| {
            toasts.set(Vec::new());
            let next = store.0.borrow().next_level(level.kind, level.grade, level.level).cloned();
            if let Some(next) = next {
                let carried = next.clone();
                start_with(&next, &move |question| SessionAction::NextLevel {
                    level: carried.clone(),
                    question,
                });
            }
        })
    };
    let on_exit = {
        let cb = props.on_exit.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let options = session.question.iter().flat_map(|q| q.options.iter().copied()).enumerate().map(|(i, v)| {
        html! {
            <button onclick={on_answer(v)} disabled={!session.is_playing()} style="font-size:22px; min-width:72px; padding:10px 16px;">
                <span style="font-size:11px; opacity:0.5; margin-right:6px;">{ i + 1 }</span>{ v }
            </button>
        }
    });
    let feedback = session.last_result.as_ref().map(|r| {
        let color = if r.explanation.kind == ExplanationKind::Success { "#2ea043" } else { "#f85149" };
        html! {
            <div style={format!("border:1px solid {color}; border-radius:8px; padding:10px 14px; max-width:520px;")}>
                <div style="font-weight:600;">{ r.explanation.message.clone() }</div>
                <div style="font-size:13px; opacity:0.85;">{ r.explanation.details.clone() }</div>
                { if let Some(h) = &r.explanation.hint { html!{ <div style="font-size:12px; font-style:italic; margin-top:4px;">{ h.clone() }</div> } } else { html!{} } }
                { if session.is_playing() { html!{ <button style="margin-top:8px;" onclick={on_retry_question.clone()}>{"Try another"}</button> } } else { html!{} } }
            </div>
        }
    });
    let pause_label = if session.phase == Phase::Paused { "Resume" } else { "Pause" };
    let level = &session.level;

    html! {
        <div tabindex="0" onkeydown={on_key} style="position:relative; min-height:100vh; outline:none; display:flex; flex-direction:column; align-items:center; gap:18px; padding-top:110px;">
            <StatsPanel kind={session.kind} grade={level.grade} level={level.level} score={session.score} streak={session.streak} badges={session.badges.clone()} />
            { if session.countdown.is_timed() {
                html!{ <TimeDisplay remaining={session.time_remaining()} limit={session.countdown.limit()} pause_label={pause_label.to_string()} on_toggle_pause={on_toggle_pause} /> }
            } else { html!{} } }
            <div style="font-size:15px; opacity:0.85;">{ level.description.clone().unwrap_or_else(|| "Complete the challenge".to_string()) }</div>
            { if let Some(q) = &session.question {
                html!{ <div style="font-size:13px; opacity:0.6;">{ q.concepts.join(" · ") }</div> }
            } else { html!{} } }
            { if let Some(e) = &*error { html!{ <div style="color:#f85149;">{ e.clone() }</div> } } else { html!{} } }
            <div style="display:flex; gap:12px;">{ for options }</div>
            { for feedback }
            { if let Some(h) = &*hint { html!{ <div style="font-size:13px; background:#1c2128; padding:6px 10px; border-radius:6px;">{ h.clone() }</div> } } else { html!{} } }
            <div style="display:flex; gap:8px;">
                <button onclick={on_hint}>{"Hint"}</button>
                <button onclick={on_skip}>{"Skip"}</button>
                <button onclick={on_exit}>{"Levels"}</button>
            </div>
            <AchievementToast messages={(*toasts).clone()} />
            <LevelCompleteOverlay
                phase={session.phase}
                score={session.score}
                last_points={session.last_points}
                time_used={session.elapsed_secs}
                has_next={*has_next}
                kind={session.kind}
                on_next={on_next}
                on_restart={on_restart}
                on_exit={props.on_exit.clone()}
            />
        </div>
    }
}
