use super::StoreHandle;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub store: StoreHandle,
    pub version: u32,
    pub on_close: Callback<()>,
    /// Fired after anything in the store changed.
    pub on_changed: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    let backup_ref = use_node_ref();
    let status = use_state(|| None::<String>);

    if !props.show {
        return html! {};
    }

    let sound_enabled = props.store.0.borrow().user().sound_enabled;

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let toggle_sound_cb = {
        let store = props.store.clone();
        let changed = props.on_changed.clone();
        Callback::from(move |_| {
            store.0.borrow_mut().update_user(|u| u.sound_enabled = !u.sound_enabled);
            changed.emit(());
        })
    };
    let export_cb = {
        let store = props.store.clone();
        let backup_ref = backup_ref.clone();
        let status = status.clone();
        Callback::from(move |_| match store.0.borrow().export_json() {
            Ok(json) => {
                if let Some(area) = backup_ref.cast::<HtmlTextAreaElement>() {
                    area.set_value(&json);
                }
                status.set(Some("Backup written below. Copy it somewhere safe.".to_string()));
            }
            Err(e) => status.set(Some(format!("Export failed: {e}"))),
        })
    };
    let import_cb = {
        let store = props.store.clone();
        let backup_ref = backup_ref.clone();
        let status = status.clone();
        let changed = props.on_changed.clone();
        Callback::from(move |_| {
            let Some(area) = backup_ref.cast::<HtmlTextAreaElement>() else { return };
            let result = store.0.borrow_mut().import_progress(&area.value());
            match result {
                Ok(()) => {
                    status.set(Some("Progress imported.".to_string()));
                    changed.emit(());
                }
                Err(e) => status.set(Some(e.to_string())),
            }
        })
    };
    let reset_cb = {
        let store = props.store.clone();
        let changed = props.on_changed.clone();
        let status = status.clone();
        Callback::from(move |_| {
            let confirmed = web_sys::window()
                .map(|win| {
                    win.confirm_with_message(
                        "This will WIPE all level progress and achievements. Are you sure?",
                    )
                    .unwrap_or(false)
                })
                .unwrap_or(true);
            if confirmed {
                store.0.borrow_mut().reset_progress();
                status.set(Some("Progress reset.".to_string()));
                changed.emit(());
            }
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                <input type="checkbox" checked={sound_enabled} onclick={toggle_sound_cb} />
                <span>{"Sound"}</span>
            </label>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <textarea ref={backup_ref} rows="6" placeholder="Paste a backup here to import it" style="font-family:monospace; font-size:11px;" />
                <div style="display:flex; gap:8px;">
                    <button onclick={export_cb} style="flex:1;">{"Export Backup"}</button>
                    <button onclick={import_cb} style="flex:1;">{"Import Backup"}</button>
                </div>
            </div>
            { if let Some(msg) = &*status { html!{ <div style="font-size:12px; opacity:0.85;">{ msg.clone() }</div> } } else { html!{} } }
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Reset Progress"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Progress is saved in this browser only. Export a backup before clearing site data."}</div>
        </div>
    </div>}
}
