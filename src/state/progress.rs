// Typed job progress pushed by the conversion backend.
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::Reducible;

const LEGACY_COMPLETE: &str = "Digitization complete.";
const LEGACY_ERROR_PREFIXES: [&str; 2] = ["Error during digitization:", "Digitization failed:"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    Progress { message: String },
    Complete,
    Error { message: String },
}

impl ProgressEvent {
    /// Decode one socket frame. JSON frames carry the event type; plain text frames from
    /// older backends are classified by their fixed completion and failure wording.
    pub fn decode(frame: &str) -> ProgressEvent {
        let trimmed = frame.trim();
        if trimmed.starts_with('{') {
            if let Ok(ev) = serde_json::from_str::<ProgressEvent>(trimmed) {
                return ev;
            }
        }
        if trimmed.starts_with(LEGACY_COMPLETE) {
            return ProgressEvent::Complete;
        }
        for prefix in LEGACY_ERROR_PREFIXES {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return ProgressEvent::Error {
                    message: rest.trim().to_string(),
                };
            }
        }
        ProgressEvent::Progress {
            message: trimmed.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChannelState {
    Connected,
    #[default]
    Closed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProgressLog {
    pub channel: ChannelState,
    pub messages: Vec<String>,
    pub processing: bool,
    pub error: Option<String>,
}

pub enum ProgressAction {
    Connected,
    Closed,
    Event(ProgressEvent),
    /// A new upload went out; clears the previous job's output.
    JobStarted,
    /// The upload request returned, which the backend only does once the job is done.
    UploadFinished,
    UploadFailed(String),
}

impl Reducible for ProgressLog {
    type Action = ProgressAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ProgressAction::*;
        let mut new = (*self).clone();
        match action {
            Connected => new.channel = ChannelState::Connected,
            Closed => new.channel = ChannelState::Closed,
            Event(_) if self.channel == ChannelState::Closed => {
                log::debug!("dropping progress event on closed channel");
                return self;
            }
            Event(ProgressEvent::Progress { message }) => new.messages.push(message),
            Event(ProgressEvent::Complete) => {
                new.messages.push("Digitization complete.".into());
                new.processing = false;
            }
            Event(ProgressEvent::Error { message }) => {
                new.processing = false;
                new.error = Some(message);
            }
            JobStarted => {
                new.messages.clear();
                new.error = None;
                new.processing = true;
            }
            UploadFinished if !self.processing => return self,
            UploadFinished => new.processing = false,
            UploadFailed(message) => {
                new.processing = false;
                new.error = Some(message);
            }
        }
        Rc::new(new)
    }
}
