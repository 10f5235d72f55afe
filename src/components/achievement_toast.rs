use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AchievementToastProps {
    pub messages: Vec<String>,
}

#[function_component]
pub fn AchievementToast(props: &AchievementToastProps) -> Html {
    if props.messages.is_empty() {
        return html! {};
    }
    let items = props.messages.iter().map(|m| {
        html! { <div style="background:linear-gradient(135deg, #FFD700, #FFA500); color:#8B4513; padding:12px 16px; border-radius:10px; box-shadow:0 6px 18px rgba(0,0,0,0.4); font-weight:600;">{ m.clone() }</div> }
    });
    html! {
        <div style="position:fixed; top:20px; right:20px; display:flex; flex-direction:column; gap:8px; z-index:60; max-width:300px;">
            { for items }
        </div>
    }
}
