// Pan/zoom state for the vector preview. Pure; no DOM access.
use std::ops::Sub;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::Reducible;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Zoom tuning. The defaults match the shipped preview; none of them are load-bearing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Scale change per unit of wheel delta.
    pub sensitivity: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.01,
            min_scale: 0.1,
            max_scale: 4.0,
        }
    }
}

impl ViewportConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !self.sensitivity.is_finite() {
            return Err(AppError::InvalidConfig(format!(
                "sensitivity must be finite, got {}",
                self.sensitivity
            )));
        }
        if !(self.min_scale.is_finite() && self.max_scale.is_finite()) {
            return Err(AppError::InvalidConfig("scale bounds must be finite".into()));
        }
        if self.min_scale <= 0.0 {
            return Err(AppError::InvalidConfig(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.min_scale > self.max_scale {
            return Err(AppError::InvalidConfig(format!(
                "min_scale {} exceeds max_scale {}",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }

    /// Never panics, unlike `f64::clamp` with inverted bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    pub offset: Vec2,
    pub scale: f64,
    /// Pointer position minus offset at drag start. `Some` only while dragging.
    drag: Option<Vec2>,
    pub config: ViewportConfig,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl ViewportState {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: config.clamp_scale(1.0),
            drag: None,
            config,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[cfg(test)]
    pub fn drag_anchor(&self) -> Option<Vec2> {
        self.drag
    }

    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.drag = Some(pointer - self.offset);
    }

    pub fn continue_drag(&mut self, pointer: Vec2) {
        if let Some(anchor) = self.drag {
            self.offset = pointer - anchor;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn apply_zoom(&mut self, wheel_delta: f64) {
        if !wheel_delta.is_finite() {
            return;
        }
        self.scale = self
            .config
            .clamp_scale(self.scale + wheel_delta * self.config.sensitivity);
    }

    /// Swap tuning in place, keeping pan state and re-clamping the scale.
    pub fn reconfigure(&mut self, config: ViewportConfig) {
        self.config = config;
        self.scale = config.clamp_scale(self.scale);
    }

    pub fn transform(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.offset.x, self.offset.y, self.scale
        )
    }

    /// Inline style for the wrapper around the injected markup.
    pub fn wrapper_style(&self) -> String {
        let transition = if self.is_dragging() {
            "none"
        } else {
            "transform 0.1s"
        };
        format!(
            "transform: {}; transform-origin: center; transition: {};",
            self.transform(),
            transition
        )
    }
}

pub enum ViewportAction {
    BeginDrag(Vec2),
    ContinueDrag(Vec2),
    EndDrag,
    Zoom(f64),
    Reconfigure(ViewportConfig),
}

impl Reducible for ViewportState {
    type Action = ViewportAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ViewportAction::*;
        // Returning the same Rc skips the re-render.
        match action {
            ContinueDrag(_) | EndDrag if !self.is_dragging() => return self,
            Reconfigure(config) if config == self.config => return self,
            _ => {}
        }
        let mut new = (*self).clone();
        match action {
            BeginDrag(p) => new.begin_drag(p),
            ContinueDrag(p) => new.continue_drag(p),
            EndDrag => new.end_drag(),
            Zoom(delta) => new.apply_zoom(delta),
            Reconfigure(config) => new.reconfigure(config),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn starts_idle_at_identity() {
        let vp = ViewportState::default();
        assert_eq!(vp.offset, Vec2::ZERO);
        assert_eq!(vp.scale, 1.0);
        assert!(!vp.is_dragging());
        assert_eq!(vp.drag_anchor(), None);
    }

    #[test]
    fn drag_zoom_scenario() {
        let mut vp = ViewportState::default();
        vp.begin_drag(Vec2::new(100.0, 100.0));
        assert_eq!(vp.drag_anchor(), Some(Vec2::new(100.0, 100.0)));
        vp.continue_drag(Vec2::new(130.0, 115.0));
        assert_eq!(vp.offset, Vec2::new(30.0, 15.0));
        vp.apply_zoom(3.0);
        assert!(approx(vp.scale, 1.03));
        vp.end_drag();
        assert!(!vp.is_dragging());
        assert_eq!(vp.offset, Vec2::new(30.0, 15.0));
    }

    #[test]
    fn zoom_clamps_at_max() {
        let mut vp = ViewportState::default();
        for _ in 0..14 {
            vp.apply_zoom(50.0);
            assert!(vp.scale <= 4.0);
        }
        assert_eq!(vp.scale, 4.0);
    }

    #[test]
    fn zoom_stays_in_bounds_for_mixed_sequence() {
        let mut vp = ViewportState::default();
        let deltas = [-30.0, -500.0, 7.5, 1e6, -1e6, 0.0, 120.0, -3.0, 400.0, -90.0];
        let mut prev = vp.scale;
        for d in deltas {
            vp.apply_zoom(d);
            assert!((0.1..=4.0).contains(&vp.scale), "scale {} escaped", vp.scale);
            if d > 0.0 {
                assert!(vp.scale >= prev);
            } else if d < 0.0 {
                assert!(vp.scale <= prev);
            }
            prev = vp.scale;
        }
    }

    #[test]
    fn zoom_ignores_non_finite_delta() {
        let mut vp = ViewportState::default();
        vp.apply_zoom(f64::NAN);
        vp.apply_zoom(f64::INFINITY);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn zero_pointer_movement_keeps_offset() {
        let mut vp = ViewportState::default();
        vp.begin_drag(Vec2::new(10.0, 10.0));
        vp.continue_drag(Vec2::new(40.0, -5.0));
        vp.end_drag();
        let before = vp.offset;
        vp.begin_drag(Vec2::new(77.0, 12.0));
        vp.continue_drag(Vec2::new(77.0, 12.0));
        assert_eq!(vp.offset, before);
    }

    #[test]
    fn drag_is_path_independent() {
        let p0 = Vec2::new(5.0, 8.0);
        let p1 = Vec2::new(-200.0, 340.0);
        let p2 = Vec2::new(61.0, 19.0);

        let mut a = ViewportState::default();
        a.begin_drag(p0);
        a.continue_drag(p1);
        a.continue_drag(p2);

        let mut b = ViewportState::default();
        b.begin_drag(p0);
        b.continue_drag(p2);

        assert_eq!(a.offset, b.offset);
    }

    #[test]
    fn end_drag_is_idempotent_and_freezes_offset() {
        let mut vp = ViewportState::default();
        vp.begin_drag(Vec2::new(0.0, 0.0));
        vp.continue_drag(Vec2::new(12.0, 4.0));
        vp.end_drag();
        let once = vp.clone();
        vp.end_drag();
        assert_eq!(vp, once);
        vp.continue_drag(Vec2::new(500.0, 500.0));
        assert_eq!(vp.offset, Vec2::new(12.0, 4.0));
    }

    #[test]
    fn continue_drag_while_idle_is_noop() {
        let mut vp = ViewportState::default();
        vp.continue_drag(Vec2::new(3.0, 3.0));
        assert_eq!(vp.offset, Vec2::ZERO);
    }

    #[test]
    fn pointer_leave_ends_drag_like_pointer_up() {
        let state = Rc::new(ViewportState::default());
        let state = state.reduce(ViewportAction::BeginDrag(Vec2::new(50.0, 50.0)));
        let state = state.reduce(ViewportAction::ContinueDrag(Vec2::new(60.0, 70.0)));
        // mouseleave dispatches the same action as mouseup
        let state = state.reduce(ViewportAction::EndDrag);
        assert!(!state.is_dragging());
        let state = state.reduce(ViewportAction::ContinueDrag(Vec2::new(0.0, 0.0)));
        assert_eq!(state.offset, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn second_drag_continues_from_current_offset() {
        let mut vp = ViewportState::default();
        vp.begin_drag(Vec2::new(0.0, 0.0));
        vp.continue_drag(Vec2::new(30.0, 15.0));
        vp.end_drag();
        vp.begin_drag(Vec2::new(100.0, 100.0));
        vp.continue_drag(Vec2::new(90.0, 110.0));
        assert_eq!(vp.offset, Vec2::new(20.0, 25.0));
    }

    #[test]
    fn idle_moves_do_not_allocate_new_state() {
        let state = Rc::new(ViewportState::default());
        let next = state.clone().reduce(ViewportAction::ContinueDrag(Vec2::new(1.0, 1.0)));
        assert!(Rc::ptr_eq(&state, &next));
        let next = state.clone().reduce(ViewportAction::EndDrag);
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn transform_and_transition_follow_drag_state() {
        let mut vp = ViewportState::default();
        assert_eq!(vp.transform(), "translate(0px, 0px) scale(1)");
        vp.begin_drag(Vec2::new(0.0, 0.0));
        vp.continue_drag(Vec2::new(30.0, -15.0));
        vp.apply_zoom(50.0);
        assert_eq!(vp.transform(), "translate(30px, -15px) scale(1.5)");
        assert!(vp.wrapper_style().contains("transition: none;"));
        assert!(vp.wrapper_style().contains("transform-origin: center;"));
        vp.end_drag();
        assert!(vp.wrapper_style().contains("transition: transform 0.1s;"));
    }

    #[test]
    fn reconfigure_reclamps_scale() {
        let mut vp = ViewportState::default();
        vp.apply_zoom(200.0);
        assert_eq!(vp.scale, 3.0);
        vp.reconfigure(ViewportConfig {
            max_scale: 2.0,
            ..ViewportConfig::default()
        });
        assert_eq!(vp.scale, 2.0);
    }

    #[test]
    fn config_validation() {
        assert!(ViewportConfig::default().validate().is_ok());
        let inverted = ViewportConfig {
            min_scale: 5.0,
            max_scale: 1.0,
            ..ViewportConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(AppError::InvalidConfig(_))));
        let zero = ViewportConfig {
            min_scale: 0.0,
            ..ViewportConfig::default()
        };
        assert!(zero.validate().is_err());
        let nan = ViewportConfig {
            sensitivity: f64::NAN,
            ..ViewportConfig::default()
        };
        assert!(nan.validate().is_err());
        // inverted bounds still clamp without panicking
        let _ = inverted.clamp_scale(2.0);
    }
}
