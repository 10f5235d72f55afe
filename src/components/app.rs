use super::{
    game_view::GameView, level_select::LevelSelect, settings_modal::SettingsModal, StoreHandle,
};
use crate::catalog::LevelCatalog;
use crate::model::{GameKind, LevelSpec};
use crate::progress::ProgressStore;
use crate::storage::Backend;
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(PartialEq, Clone)]
enum View {
    Select,
    Play(LevelSpec),
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_memo((), |_| {
        let catalog = LevelCatalog::embedded().unwrap_or_else(|e| {
            log::error!("{e}; starting with an empty catalog");
            LevelCatalog::default()
        });
        StoreHandle(Rc::new(RefCell::new(ProgressStore::load(
            Backend::detect(),
            Rc::new(catalog),
        ))))
    });
    let store = (*store).clone();
    let view = use_state(|| View::Select);
    let selected_game = use_state(|| GameKind::Khipu);
    let show_settings = use_state(|| false);
    // Bumped after every store mutation so children re-render.
    let version = use_state(|| 0u32);

    let bump = {
        let version = version.clone();
        Callback::from(move |_| version.set(*version + 1))
    };
    let on_play = {
        let view = view.clone();
        Callback::from(move |level: LevelSpec| view.set(View::Play(level)))
    };
    let on_exit = {
        let view = view.clone();
        let bump = bump.clone();
        Callback::from(move |_| {
            view.set(View::Select);
            bump.emit(());
        })
    };
    let on_select_game = {
        let selected_game = selected_game.clone();
        Callback::from(move |kind: GameKind| selected_game.set(kind))
    };
    let open_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(true))
    };
    let close_settings = {
        let show_settings = show_settings.clone();
        Callback::from(move |_| show_settings.set(false))
    };

    let content = match &*view {
        View::Select => html! { <LevelSelect
            store={store.clone()}
            version={*version}
            game={*selected_game}
            on_select_game={on_select_game}
            on_play={on_play.clone()}
            on_open_settings={open_settings}
        /> },
        View::Play(level) => html! { <GameView
            key={format!("{}-{}-{}", level.kind, level.grade, level.level)}
            store={store.clone()}
            level={level.clone()}
            on_exit={on_exit}
            on_progress={bump.clone()}
        /> },
    };

    html! {
        <div style="position:relative; min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            { content }
            <SettingsModal
                show={*show_settings}
                store={store}
                version={*version}
                on_close={close_settings}
                on_changed={bump}
            />
        </div>
    }
}
