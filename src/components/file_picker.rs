use web_sys::{File, HtmlInputElement};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct FilePickerProps {
    pub on_file: Callback<File>,
    #[prop_or_default]
    pub disabled: bool,
}

#[function_component]
pub fn FilePicker(props: &FilePickerProps) -> Html {
    let onchange = {
        let cb = props.on_file.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(file) = input.files().and_then(|list| list.get(0)) {
                cb.emit(file);
            }
            // allow picking the same file again
            input.set_value("");
        })
    };
    html! {<label style="display:flex; flex-direction:column; align-items:center; gap:6px; padding:24px; border:2px dashed #30363d; border-radius:10px; cursor:pointer;">
        <span style="font-weight:600;">{"Choose an image"}</span>
        <span style="font-size:12px; opacity:0.7;">{"PNG or JPEG, up to 10MB"}</span>
        <input type="file" accept="image/png,image/jpeg" style="display:none;"
            disabled={props.disabled} {onchange} />
    </label>}
}
