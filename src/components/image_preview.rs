use web_sys::{File, Url};
use yew::prelude::*;

use super::pannable_preview::PannableSvgPreview;
use crate::state::ViewportConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Original,
    Embroidery,
}

#[derive(Properties, PartialEq, Clone)]
pub struct ImagePreviewProps {
    pub file: Option<File>,
    pub kind: PreviewKind,
    pub markup: Option<AttrValue>,
    #[prop_or_default]
    pub viewport: ViewportConfig,
}

/// Object URL for the picked file, revoked when the file changes or the preview unmounts.
#[hook]
fn use_object_url(file: Option<File>) -> Option<String> {
    let url = use_state(|| None::<String>);
    {
        let url = url.clone();
        use_effect_with(file, move |file| {
            let created = file
                .as_ref()
                .and_then(|f| match Url::create_object_url_with_blob(f) {
                    Ok(u) => Some(u),
                    Err(e) => {
                        log::warn!("object url: {}", crate::util::js_error_message(&e));
                        None
                    }
                });
            url.set(created.clone());
            move || {
                if let Some(u) = created {
                    let _ = Url::revoke_object_url(&u);
                }
            }
        });
    }
    (*url).clone()
}

#[function_component]
pub fn ImagePreview(props: &ImagePreviewProps) -> Html {
    let object_url = use_object_url(props.file.clone());
    if props.file.is_none() {
        return html! {};
    }
    let body = match props.kind {
        PreviewKind::Original => match object_url {
            Some(src) => html! {
                <img src={src} alt="Preview" style="max-width:100%; max-height:100%; object-fit:contain;" />
            },
            None => html! {},
        },
        PreviewKind::Embroidery => match &props.markup {
            Some(markup) => html! {
                <PannableSvgPreview markup={markup.clone()} config={props.viewport} />
            },
            None => html! { <div style="opacity:0.6;">{"Loading DST preview..."}</div> },
        },
    };
    html! {<div style="aspect-ratio:1 / 1; border:2px dashed #30363d; border-radius:10px; display:flex; align-items:center; justify-content:center; overflow:hidden;">
        { body }
    </div>}
}
