use yew::prelude::*;

use crate::state::{ChannelState, ProgressLog};

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressPanelProps {
    pub log: ProgressLog,
}

#[function_component]
pub fn ProgressPanel(props: &ProgressPanelProps) -> Html {
    let log = &props.log;
    let (dot, status) = match (log.channel, log.processing) {
        (ChannelState::Closed, _) => ("#8b949e", "Offline"),
        (ChannelState::Connected, true) => ("#d29922", "Processing"),
        (ChannelState::Connected, false) => ("#3fb950", "Ready"),
    };
    html! {<div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:12px 16px; display:flex; flex-direction:column; gap:8px; font-size:14px;">
        <div style="display:flex; align-items:center; gap:8px;">
            <span style={format!("width:8px; height:8px; border-radius:50%; background:{};", dot)}></span>
            <span style="font-weight:600;">{ status }</span>
        </div>
        { if let Some(err) = &log.error {
            html!{ <div style="color:#f85149; background:#1c2128; border:1px solid #b62324; padding:6px 8px; border-radius:6px;">{ err.clone() }</div> }
        } else { html!{} } }
        { if log.messages.is_empty() { html!{} } else { html!{
            <ul style="margin:0; padding-left:18px; font-size:13px; line-height:1.5; opacity:0.85;">
                { for log.messages.iter().map(|m| html!{ <li>{ m.clone() }</li> }) }
            </ul>
        } } }
    </div>}
}
