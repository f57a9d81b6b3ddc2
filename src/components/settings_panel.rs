use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::model::{
    ColorMode, ConversionSettings, PATH_SIMPLIFICATION, Range, STITCH_DENSITY, STROKE_DEPTH,
    StitchType, VECTOR_QUALITY,
};

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPanelProps {
    pub settings: ConversionSettings,
    pub on_change: Callback<ConversionSettings>,
    #[prop_or_default]
    pub disabled: bool,
}

#[derive(Properties, PartialEq, Clone)]
struct SliderProps {
    label: AttrValue,
    value: f64,
    range: Range,
    low: AttrValue,
    high: AttrValue,
    on_input: Callback<f64>,
    disabled: bool,
}

#[function_component]
fn Slider(props: &SliderProps) -> Html {
    let oninput = {
        let cb = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                cb.emit(v);
            }
        })
    };
    html! {<div>
        <label style="display:flex; justify-content:space-between; font-size:13px; font-weight:500; margin-bottom:4px;">
            <span>{ props.label.clone() }</span>
            <span style="font-variant-numeric:tabular-nums; opacity:0.8;">{ props.value.to_string() }</span>
        </label>
        <input type="range" style="width:100%;"
            min={props.range.min.to_string()}
            max={props.range.max.to_string()}
            step={props.range.step.to_string()}
            value={props.value.to_string()}
            disabled={props.disabled}
            {oninput} />
        <div style="display:flex; justify-content:space-between; font-size:11px; opacity:0.6;">
            <span>{ props.low.clone() }</span>
            <span>{ props.high.clone() }</span>
        </div>
    </div>}
}

#[function_component]
pub fn SettingsPanel(props: &SettingsPanelProps) -> Html {
    let s = props.settings.clone();
    let emit = |f: fn(ConversionSettings, f64) -> ConversionSettings| {
        let cb = props.on_change.clone();
        let s = s.clone();
        Callback::from(move |v: f64| cb.emit(f(s.clone(), v)))
    };

    let on_stitch_type = {
        let cb = props.on_change.clone();
        let s = s.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(t) = StitchType::parse(&select.value()) {
                cb.emit(s.clone().with_stitch_type(t));
            }
        })
    };
    let on_color_mode = {
        let cb = props.on_change.clone();
        let s = s.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(m) = ColorMode::parse(&select.value()) {
                cb.emit(s.clone().with_color_mode(m));
            }
        })
    };

    let select_style = "width:100%; padding:4px 6px; background:#0d1117; color:inherit; border:1px solid #30363d; border-radius:6px;";
    html! {<div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; display:flex; flex-direction:column; gap:14px;">
        <h3 style="margin:0; font-size:18px;">{"Conversion Settings"}</h3>
        <Slider label="Stitch Density" value={s.stitch_density} range={STITCH_DENSITY}
            low="Sparse" high="Dense" disabled={props.disabled}
            on_input={emit(ConversionSettings::with_stitch_density)} />
        <div>
            <label style="display:block; font-size:13px; font-weight:500; margin-bottom:4px;">{"Stitch Type"}</label>
            <select style={select_style} disabled={props.disabled} onchange={on_stitch_type}>
                { for StitchType::ALL.iter().map(|t| html! {
                    <option value={t.as_str()} selected={*t == s.stitch_type}>{ t.label() }</option>
                }) }
            </select>
        </div>
        <Slider label="Stroke Depth" value={s.stroke_depth} range={STROKE_DEPTH}
            low="Shallow" high="Deep" disabled={props.disabled}
            on_input={emit(ConversionSettings::with_stroke_depth)} />
        <div>
            <label style="display:block; font-size:13px; font-weight:500; margin-bottom:4px;">{"Color Mode"}</label>
            <select style={select_style} disabled={props.disabled} onchange={on_color_mode}>
                { for ColorMode::ALL.iter().map(|m| html! {
                    <option value={m.as_str()} selected={*m == s.color_mode}>{ m.label() }</option>
                }) }
            </select>
        </div>
        <Slider label="Vectorization Quality" value={s.vector_quality} range={VECTOR_QUALITY}
            low="Fast" high="Detailed" disabled={props.disabled}
            on_input={emit(ConversionSettings::with_vector_quality)} />
        <Slider label="Path Simplification" value={s.path_simplification} range={PATH_SIMPLIFICATION}
            low="Simple" high="Complex" disabled={props.disabled}
            on_input={emit(ConversionSettings::with_path_simplification)} />
    </div>}
}
