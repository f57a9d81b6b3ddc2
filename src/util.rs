use wasm_bindgen::{JsCast, JsValue};

pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn format_zoom_percent(scale: f64) -> String {
    format!("{}%", (scale * 100.0).round() as i64)
}
