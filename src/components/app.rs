use web_sys::File;
use yew::prelude::*;

use super::{
    file_picker::FilePicker,
    image_preview::{ImagePreview, PreviewKind},
    progress_panel::ProgressPanel,
    session_bar::SessionBar,
    settings_panel::SettingsPanel,
};
use crate::api;
use crate::channel::ProgressChannel;
use crate::config::{AppConfig, ws_url};
use crate::model::ConversionSettings;
use crate::state::{PreviewAction, ProgressAction, ProgressLog, Session, StitchPreview, User};

// Session handed to descendants instead of a global client object
#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub sign_out: Callback<()>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct AppProps {
    pub config: AppConfig,
    #[prop_or_default]
    pub user: Option<User>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let session = {
        let config = props.config.clone();
        let user = props.user.clone();
        use_state(move || Session::start(&config, user))
    };
    let settings = use_state(ConversionSettings::load);
    let progress = use_reducer(ProgressLog::default);
    let file = use_state(|| None::<File>);
    let kind = use_state(|| PreviewKind::Original);
    let download_url = use_state(|| None::<String>);
    let preview = use_reducer(StitchPreview::default);

    // Persist settings changes
    use_effect_with((*settings).clone(), move |s| {
        if let Err(e) = s.save() {
            log::warn!("could not persist settings: {}", e);
        }
        || ()
    });

    // One progress socket per client id; replaced on sign-out
    {
        let dispatcher = progress.dispatcher();
        let api_base = session.api_base.clone();
        use_effect_with(session.client_id.clone(), move |client_id| {
            let sink = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |action: ProgressAction| dispatcher.dispatch(action))
            };
            let channel = match ProgressChannel::open(&ws_url(&api_base, client_id), sink) {
                Ok(c) => Some(c),
                Err(e) => {
                    log::error!("progress channel unavailable: {}", e);
                    None
                }
            };
            move || {
                drop(channel);
                dispatcher.dispatch(ProgressAction::Closed);
            }
        });
    }

    // Fetch the stitched preview once the job has finished
    {
        let session = (*session).clone();
        let dispatcher = preview.dispatcher();
        let needs_fetch = preview.needs_fetch();
        let deps = ((*download_url).clone(), *kind, progress.processing, preview.job);
        use_effect_with(deps, move |(url, kind, processing, job)| {
            if let (Some(url), PreviewKind::Embroidery, false) = (url.clone(), *kind, *processing) {
                if needs_fetch {
                    let job = *job;
                    wasm_bindgen_futures::spawn_local(async move {
                        match api::fetch_preview(&session, &url).await {
                            Ok(svg) => dispatcher.dispatch(PreviewAction::Loaded {
                                job,
                                markup: AttrValue::from(svg),
                            }),
                            Err(e) => log::error!("preview fetch failed: {}", e),
                        }
                    });
                }
            }
            || ()
        });
    }

    let start_job = {
        let session = session.clone();
        let settings = settings.clone();
        let progress = progress.dispatcher();
        let file = file.clone();
        let kind = kind.clone();
        let download_url = download_url.clone();
        let preview = preview.dispatcher();
        Callback::from(move |picked: File| {
            file.set(Some(picked.clone()));
            kind.set(PreviewKind::Original);
            preview.dispatch(PreviewAction::NewJob);
            download_url.set(None);
            let session = (*session).clone();
            if let Err(e) = session.require_user() {
                progress.dispatch(ProgressAction::UploadFailed(e.to_string()));
                return;
            }
            progress.dispatch(ProgressAction::JobStarted);
            let settings = (*settings).clone();
            let progress = progress.clone();
            let download_url = download_url.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::upload(&session, &picked, &settings).await {
                    Ok(resp) => {
                        log::info!("upload accepted: {}", resp.download_url);
                        download_url.set(Some(resp.download_url));
                        progress.dispatch(ProgressAction::UploadFinished);
                    }
                    Err(e) => {
                        log::error!("upload failed: {}", e);
                        progress.dispatch(ProgressAction::UploadFailed(e.to_string()));
                    }
                }
            });
        })
    };

    let regenerate = {
        let file = file.clone();
        let start_job = start_job.clone();
        Callback::from(move |_| {
            if let Some(f) = (*file).clone() {
                start_job.emit(f);
            }
        })
    };
    let toggle_kind = {
        let kind = kind.clone();
        Callback::from(move |_| {
            kind.set(match *kind {
                PreviewKind::Original => PreviewKind::Embroidery,
                PreviewKind::Embroidery => PreviewKind::Original,
            })
        })
    };
    let on_settings = {
        let settings = settings.clone();
        Callback::from(move |s: ConversionSettings| settings.set(s))
    };
    let sign_out = {
        let session = session.clone();
        Callback::from(move |()| {
            Session::forget_stored_user();
            session.set(session.signed_out());
        })
    };

    let ctx = SessionContext {
        session: (*session).clone(),
        sign_out,
    };
    let processing = progress.processing;

    let preview_controls = match &*download_url {
        Some(url) => html! {<div style="display:flex; gap:8px;">
            <button onclick={toggle_kind}>
                { if *kind == PreviewKind::Original { "Show DST" } else { "Show Original" } }
            </button>
            <button onclick={regenerate} disabled={processing}>{"Regenerate"}</button>
            <a href={api::download_href(&session, url)} download="">
                <button disabled={processing}>{"Download"}</button>
            </a>
        </div>},
        None => html! {},
    };

    html! { <ContextProvider<SessionContext> context={ctx}>
        <div style="max-width:1100px; margin:0 auto; padding:24px; display:flex; flex-direction:column; gap:20px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h1 style="margin:0; font-size:24px;">{"Convert Your Images"}</h1>
                <SessionBar />
            </div>
            <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(320px, 1fr)); gap:20px;">
                <div style="display:flex; flex-direction:column; gap:16px;">
                    <FilePicker on_file={start_job} disabled={processing} />
                    { if file.is_some() { html!{
                        <div style="display:flex; flex-direction:column; gap:10px;">
                            <div style="display:flex; justify-content:space-between; align-items:center;">
                                <h3 style="margin:0;">{"Preview"}</h3>
                                { preview_controls }
                            </div>
                            <ImagePreview file={(*file).clone()} kind={*kind} markup={preview.markup.clone()} viewport={props.config.viewport} />
                        </div>
                    } } else { html!{} } }
                </div>
                <div style="display:flex; flex-direction:column; gap:16px;">
                    <SettingsPanel settings={(*settings).clone()} on_change={on_settings} disabled={processing} />
                    <ProgressPanel log={(*progress).clone()} />
                </div>
            </div>
        </div>
    </ContextProvider<SessionContext>> }
}
