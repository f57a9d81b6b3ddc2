use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, WheelEvent};
use yew::prelude::*;

use crate::markup::sanitize_svg;
use crate::state::{Vec2, ViewportAction, ViewportConfig, ViewportState};
use crate::util::format_zoom_percent;

#[derive(Properties, PartialEq, Clone)]
pub struct PannableSvgPreviewProps {
    /// Vector markup shown inside the viewport.
    pub markup: AttrValue,
    #[prop_or_default]
    pub config: ViewportConfig,
    /// Inject `markup` verbatim. The caller vouches that it is safe to render as live DOM.
    #[prop_or_default]
    pub trusted: bool,
}

#[function_component(PannableSvgPreview)]
pub fn pannable_svg_preview(props: &PannableSvgPreviewProps) -> Html {
    let container_ref = use_node_ref();
    let viewport = {
        let initial = props.config;
        use_reducer(move || ViewportState::new(initial))
    };

    let content = use_memo((props.markup.clone(), props.trusted), |(markup, trusted)| {
        if *trusted {
            return markup.clone();
        }
        match sanitize_svg(markup) {
            Ok(clean) => AttrValue::from(clean),
            Err(e) => {
                log::warn!("preview markup rejected: {}", e);
                AttrValue::Static("")
            }
        }
    });

    // Wheel zoom. Attached by hand because it must be non-passive to suppress page
    // scrolling. The listener guard is dropped on unmount and whenever the config changes.
    {
        let container_ref = container_ref.clone();
        let dispatcher = viewport.dispatcher();
        use_effect_with(props.config, move |config| {
            let config = match config.validate() {
                Ok(()) => *config,
                Err(e) => {
                    log::warn!("{}; using default zoom settings", e);
                    ViewportConfig::default()
                }
            };
            dispatcher.dispatch(ViewportAction::Reconfigure(config));
            let listener = container_ref.cast::<HtmlElement>().map(|el| {
                let dispatcher = dispatcher.clone();
                EventListener::new_with_options(
                    &el,
                    "wheel",
                    EventListenerOptions::enable_prevent_default(),
                    move |e: &Event| {
                        e.prevent_default();
                        if let Some(wheel) = e.dyn_ref::<WheelEvent>() {
                            // scrolling up (negative deltaY) zooms in
                            dispatcher.dispatch(ViewportAction::Zoom(-wheel.delta_y()));
                        }
                    },
                )
            });
            if listener.is_none() {
                log::warn!("preview container not mounted; wheel zoom disabled");
            }
            move || drop(listener)
        });
    }

    let onmousedown = {
        let dispatcher = viewport.dispatcher();
        Callback::from(move |e: MouseEvent| {
            if e.button() != 0 {
                return;
            }
            e.prevent_default();
            dispatcher.dispatch(ViewportAction::BeginDrag(Vec2::new(
                e.client_x() as f64,
                e.client_y() as f64,
            )));
        })
    };
    let onmousemove = {
        let dispatcher = viewport.dispatcher();
        // the reducer ignores moves while idle without re-rendering
        Callback::from(move |e: MouseEvent| {
            dispatcher.dispatch(ViewportAction::ContinueDrag(Vec2::new(
                e.client_x() as f64,
                e.client_y() as f64,
            )));
        })
    };
    // Shared by mouseup and mouseleave so a release outside the container cannot
    // leave the drag stuck.
    let end_drag = {
        let dispatcher = viewport.dispatcher();
        Callback::from(move |_e: MouseEvent| dispatcher.dispatch(ViewportAction::EndDrag))
    };

    let cursor = if viewport.is_dragging() {
        "grabbing"
    } else {
        "grab"
    };
    let container_style = format!(
        "position:relative; width:100%; height:100%; overflow:hidden; cursor:{}; user-select:none;",
        cursor
    );

    html! {<div ref={container_ref} class="pannable-preview" style={container_style}
        onmousedown={onmousedown}
        onmousemove={onmousemove}
        onmouseup={end_drag.clone()}
        onmouseleave={end_drag}
    >
        <div class="pannable-preview__content" style={viewport.wrapper_style()}>
            { Html::from_html_unchecked((*content).clone()) }
        </div>
        <span style="position:absolute; right:8px; bottom:6px; font-size:11px; opacity:0.6; pointer-events:none;">
            { format_zoom_percent(viewport.scale) }
        </span>
    </div>}
}
