// Stitched preview markup, tagged with the upload job that produced it.
use std::rc::Rc;

use yew::{AttrValue, Reducible};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StitchPreview {
    /// Incremented for every upload; loads started for an older job are ignored.
    pub job: u64,
    pub markup: Option<AttrValue>,
}

impl StitchPreview {
    /// A fetch is due once per job.
    pub fn needs_fetch(&self) -> bool {
        self.markup.is_none()
    }
}

pub enum PreviewAction {
    /// A new upload went out; forget the previous job's markup.
    NewJob,
    Loaded { job: u64, markup: AttrValue },
}

impl Reducible for StitchPreview {
    type Action = PreviewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PreviewAction::NewJob => Rc::new(Self {
                job: self.job + 1,
                markup: None,
            }),
            PreviewAction::Loaded { job, .. } if job != self.job => {
                log::debug!("dropping preview for superseded job {}", job);
                self
            }
            PreviewAction::Loaded { job, markup } => Rc::new(Self {
                job,
                markup: Some(markup),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(job: u64, svg: &'static str) -> PreviewAction {
        PreviewAction::Loaded {
            job,
            markup: AttrValue::Static(svg),
        }
    }

    #[test]
    fn current_job_markup_is_kept() {
        let p = Rc::new(StitchPreview::default()).reduce(PreviewAction::NewJob);
        assert!(p.needs_fetch());
        let p = p.reduce(loaded(1, "<svg/>"));
        assert_eq!(p.markup.as_deref(), Some("<svg/>"));
        assert!(!p.needs_fetch());
    }

    #[test]
    fn late_load_from_previous_job_is_dropped() {
        // first job's fetch is still in flight when the user regenerates
        let first = Rc::new(StitchPreview::default()).reduce(PreviewAction::NewJob);
        let second = first.reduce(PreviewAction::NewJob);
        let after = second.clone().reduce(loaded(1, "<svg id=\"old\"/>"));
        assert!(Rc::ptr_eq(&second, &after));
        assert!(after.needs_fetch());

        let after = after.reduce(loaded(2, "<svg id=\"new\"/>"));
        assert_eq!(after.markup.as_deref(), Some("<svg id=\"new\"/>"));
    }

    #[test]
    fn new_job_clears_markup() {
        let p = Rc::new(StitchPreview::default())
            .reduce(PreviewAction::NewJob)
            .reduce(loaded(1, "<svg/>"))
            .reduce(PreviewAction::NewJob);
        assert_eq!(p.job, 2);
        assert_eq!(p.markup, None);
    }
}
