// WebSocket carrying job progress. Dropping the channel detaches its handlers and closes it.
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use yew::Callback;

use crate::error::AppError;
use crate::state::{ProgressAction, ProgressEvent};

pub struct ProgressChannel {
    socket: WebSocket,
    _on_open: Closure<dyn FnMut(Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl ProgressChannel {
    pub fn open(url: &str, sink: Callback<ProgressAction>) -> Result<Self, AppError> {
        let socket = WebSocket::new(url)?;
        log::info!("opening progress channel {}", url);

        let on_open = {
            let sink = sink.clone();
            Closure::wrap(Box::new(move |_e: Event| {
                log::debug!("progress channel connected");
                sink.emit(ProgressAction::Connected);
            }) as Box<dyn FnMut(_)>)
        };
        let on_message = {
            let sink = sink.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| {
                // binary frames are not part of the protocol
                let Some(text) = e.data().as_string() else {
                    log::warn!("ignoring non-text progress frame");
                    return;
                };
                sink.emit(ProgressAction::Event(ProgressEvent::decode(&text)));
            }) as Box<dyn FnMut(_)>)
        };
        let on_close = {
            let sink = sink.clone();
            Closure::wrap(Box::new(move |e: CloseEvent| {
                log::info!("progress channel closed ({})", e.code());
                sink.emit(ProgressAction::Closed);
            }) as Box<dyn FnMut(_)>)
        };
        let on_error = Closure::wrap(Box::new(move |_e: Event| {
            log::warn!("progress channel error");
        }) as Box<dyn FnMut(_)>);

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            socket,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }
}

impl Drop for ProgressChannel {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        let _ = self.socket.close();
    }
}
