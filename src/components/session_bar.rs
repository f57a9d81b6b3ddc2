use yew::prelude::*;

use super::app::SessionContext;

#[function_component]
pub fn SessionBar() -> Html {
    let Some(ctx) = use_context::<SessionContext>() else {
        return html! {};
    };
    let sign_out = {
        let cb = ctx.sign_out.clone();
        Callback::from(move |_| cb.emit(()))
    };
    match &ctx.session.user {
        Some(user) => html! {<div style="display:flex; align-items:center; gap:10px; font-size:13px;">
            <span style="opacity:0.8;">{ user.email.clone() }</span>
            <button onclick={sign_out}>{"Sign out"}</button>
        </div>},
        None => html! {<span style="font-size:13px; opacity:0.7;">{"Not signed in"}</span>},
    }
}
