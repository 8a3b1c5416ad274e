//! Count-up stat display and the stat card presentation model.
//!
//! A [`CountUp`] owns a [`ValueAnimator`], drives it one frame at a time
//! through a [`FrameScheduler`] and pushes every formatted frame into a sink.
//! State is shared with the pending frame callback through `Rc<RefCell<_>>`;
//! the callback holds only a weak reference plus the run generation it was
//! scheduled for, so a callback that outlives a cancel or an unmount does
//! nothing.

use crate::animation::{Easing, ValueAnimator, DEFAULT_DURATION_MS};
use crate::error::AnimationError;
use crate::format::{format_trend, format_value, DisplayFormat};
use crate::scheduler::{FrameHandle, FrameScheduler};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Receives each rendered display string.
pub type DisplaySink = Box<dyn FnMut(&str)>;

/// Value shown by a stat: a number to animate, or text shown as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    /// Render without animation.
    #[must_use]
    pub fn render(&self, format: DisplayFormat) -> String {
        match self {
            Self::Number(v) => format_value(*v, format),
            Self::Text(t) => t.clone(),
        }
    }
}

impl From<f64> for StatValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for StatValue {
    fn from(t: &str) -> Self {
        Self::Text(t.to_string())
    }
}

impl From<String> for StatValue {
    fn from(t: String) -> Self {
        Self::Text(t)
    }
}

/// Count-up behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountUpOptions {
    pub format: DisplayFormat,
    pub duration_ms: f64,
    pub easing: Easing,
    /// When false, values are shown immediately.
    pub animate: bool,
}

impl Default for CountUpOptions {
    fn default() -> Self {
        Self {
            format: DisplayFormat::Number,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::CubicOut,
            animate: true,
        }
    }
}

impl CountUpOptions {
    /// Format used for every emitted number.
    #[must_use]
    pub const fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Length of a run. Rejected at mount when negative or not finite.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// When `false`, numbers jump straight to the target.
    #[must_use]
    pub const fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }
}

struct CountUpState {
    animator: ValueAnimator,
    format: DisplayFormat,
    animate: bool,
    text: String,
    showing_text: bool,
    pending: Option<FrameHandle>,
    generation: u64,
    mounted: bool,
    /// Taken out while it runs.
    sink: Option<DisplaySink>,
}

impl CountUpState {
    /// Record `text` as shown. Returns it when it should reach the sink.
    fn show(&mut self, text: String) -> Option<String> {
        self.text.clone_from(&text);
        self.mounted.then_some(text)
    }

    fn show_number(&mut self, value: f64) -> Option<String> {
        self.showing_text = false;
        self.show(format_value(value, self.format))
    }

    /// Drop the pending frame and invalidate any callback already handed out.
    fn halt(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        let pending = self.pending.take();
        if let Some(handle) = pending {
            scheduler.cancel_frame(handle);
        }
        self.generation += 1;
        self.animator.cancel();
        pending.is_some()
    }
}

/// Hand `text` to the sink with no borrow of the state held.
///
/// Text shown from inside the sink updates [`CountUp::text`] but is not
/// delivered again.
fn deliver(shared: &Rc<RefCell<CountUpState>>, text: &str) {
    let taken = shared.borrow_mut().sink.take();
    let Some(mut sink) = taken else {
        return;
    };
    sink(text);

    let mut state = shared.borrow_mut();
    if state.mounted && state.sink.is_none() {
        state.sink = Some(sink);
    }
}

/// Animated numeric display bound to an output sink.
pub struct CountUp {
    state: Rc<RefCell<CountUpState>>,
}

impl fmt::Debug for CountUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CountUp")
            .field("text", &state.text)
            .field("current", &state.animator.current())
            .field("target", &state.animator.target())
            .field("format", &state.format)
            .field("pending", &state.pending)
            .field("mounted", &state.mounted)
            .finish()
    }
}

impl CountUp {
    /// Mount the display and show `initial`.
    ///
    /// When animating, a numeric initial value counts up from 0; otherwise it
    /// is shown immediately. The first text is emitted before returning.
    pub fn mount(
        initial: StatValue,
        options: CountUpOptions,
        sink: impl FnMut(&str) + 'static,
        now_ms: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<Self, AnimationError> {
        let animator = ValueAnimator::new(0.0)
            .with_duration_ms(options.duration_ms)?
            .with_easing(options.easing);

        let count_up = Self {
            state: Rc::new(RefCell::new(CountUpState {
                animator,
                format: options.format,
                animate: options.animate,
                text: String::new(),
                showing_text: false,
                pending: None,
                generation: 0,
                mounted: true,
                sink: Some(Box::new(sink)),
            })),
        };

        if options.animate && matches!(initial, StatValue::Number(_)) {
            let zero = count_up.state.borrow_mut().show_number(0.0);
            if let Some(text) = zero {
                deliver(&count_up.state, &text);
            }
        }
        count_up.set_value(initial, now_ms, scheduler);
        Ok(count_up)
    }

    /// Show a new value.
    ///
    /// Numbers start a run from the value currently on screen; text and
    /// non-finite numbers stop any run and are shown verbatim.
    pub fn set_value(&self, value: StatValue, now_ms: f64, scheduler: &mut dyn FrameScheduler) {
        if let Some(text) = self.apply_value(value, now_ms, scheduler) {
            deliver(&self.state, &text);
        }
    }

    fn apply_value(
        &self,
        value: StatValue,
        now_ms: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<String> {
        let mut state = self.state.borrow_mut();
        if !state.mounted {
            return None;
        }

        let target = match value {
            StatValue::Number(v) if v.is_finite() => v,
            StatValue::Number(v) => {
                state.halt(scheduler);
                state.showing_text = true;
                return state.show(v.to_string());
            }
            StatValue::Text(text) => {
                state.halt(scheduler);
                state.showing_text = true;
                return state.show(text);
            }
        };

        if !state.animate {
            state.halt(scheduler);
            return match state.animator.jump_to(target) {
                Ok(()) => state.show_number(target),
                Err(_) => None,
            };
        }

        match state.animator.set_target(target, now_ms) {
            Ok(true) => {
                log::debug!("count-up retarget to {target} at {now_ms}ms");
                if state.pending.is_none() {
                    schedule(&self.state, &mut state, scheduler);
                }
                None
            }
            // Same target: only redraw if text replaced the number.
            Ok(false) if state.showing_text => {
                let shown = state.animator.current();
                if state.animator.is_running() {
                    schedule(&self.state, &mut state, scheduler);
                }
                state.show_number(shown)
            }
            Ok(false) | Err(_) => None,
        }
    }

    /// Stop animating, leaving the current text on screen.
    ///
    /// If a run was in progress its frozen text is emitted once more before
    /// returning; nothing is emitted after. Returns whether a frame was
    /// pending.
    pub fn cancel(&self, scheduler: &mut dyn FrameScheduler) -> bool {
        let frozen = {
            let mut state = self.state.borrow_mut();
            if !state.halt(scheduler) {
                return false;
            }
            let text = state.text.clone();
            state.show(text)
        };
        log::debug!("count-up cancelled");
        if let Some(text) = frozen {
            deliver(&self.state, &text);
        }
        true
    }

    /// Cancel and release the sink. Later calls do nothing.
    pub fn unmount(&self, scheduler: &mut dyn FrameScheduler) {
        let mut state = self.state.borrow_mut();
        state.halt(scheduler);
        state.mounted = false;
        state.sink = None;
    }

    /// Text most recently emitted.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    /// Numeric value on screen.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.state.borrow().animator.current()
    }

    /// Whether a frame is pending.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.borrow().pending.is_some()
    }

    /// `false` once [`CountUp::unmount`] has run.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }
}

fn schedule(
    shared: &Rc<RefCell<CountUpState>>,
    state: &mut CountUpState,
    scheduler: &mut dyn FrameScheduler,
) {
    let weak = Rc::downgrade(shared);
    let generation = state.generation;
    let handle = scheduler.request_frame(Box::new(move |now_ms, scheduler| {
        on_frame(&weak, generation, now_ms, scheduler);
    }));
    state.pending = Some(handle);
}

fn on_frame(
    weak: &Weak<RefCell<CountUpState>>,
    generation: u64,
    now_ms: f64,
    scheduler: &mut dyn FrameScheduler,
) {
    let Some(shared) = weak.upgrade() else {
        return;
    };

    let shown = {
        let mut state = shared.borrow_mut();
        if state.generation != generation || !state.mounted {
            log::trace!("stale count-up frame at {now_ms}ms ignored");
            return;
        }

        state.pending = None;
        let value = state.animator.tick(now_ms);
        let shown = state.show_number(value);

        if state.animator.is_running() {
            schedule(&shared, &mut state, scheduler);
        } else {
            log::debug!("count-up settled on {}", state.text);
        }
        shown
    };

    if let Some(text) = shown {
        deliver(&shared, &text);
    }
}

// =============================================================================
// StatCard
// =============================================================================

/// Change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub value: f64,
    pub is_positive: bool,
}

impl Trend {
    /// `↑ 12.5% vs last period`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} vs last period", format_trend(self.value, self.is_positive))
    }
}

/// Dashboard stat card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub trend: Option<Trend>,
    #[serde(default)]
    pub format: DisplayFormat,
}

/// Strings a stat card draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedStatCard {
    pub title: String,
    pub value: String,
    pub subtitle: Option<String>,
    pub trend: Option<String>,
    pub trend_positive: Option<bool>,
}

impl StatCard {
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<StatValue>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: None,
            prefix: String::new(),
            suffix: String::new(),
            trend: None,
            format: DisplayFormat::Number,
        }
    }

    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub const fn with_trend(mut self, value: f64, is_positive: bool) -> Self {
        self.trend = Some(Trend { value, is_positive });
        self
    }

    #[must_use]
    pub const fn with_format(mut self, format: DisplayFormat) -> Self {
        self.format = format;
        self
    }

    /// Wrap a display string in the card's prefix and suffix.
    #[must_use]
    pub fn decorate(&self, shown: &str) -> String {
        format!("{}{shown}{}", self.prefix, self.suffix)
    }

    /// Render with `shown` as the value text, typically a count-up frame.
    #[must_use]
    pub fn render_with(&self, shown: &str) -> RenderedStatCard {
        RenderedStatCard {
            title: self.title.clone(),
            value: self.decorate(shown),
            subtitle: self.subtitle.clone(),
            trend: self.trend.map(|t| t.label()),
            trend_positive: self.trend.map(|t| t.is_positive),
        }
    }

    /// Render with the final value.
    #[must_use]
    pub fn render(&self) -> RenderedStatCard {
        self.render_with(&self.value.render(self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FrameCallback, FrameLoop};

    type Emitted = Rc<RefCell<Vec<String>>>;

    fn recorder() -> (Emitted, impl FnMut(&str) + 'static) {
        let seen: Emitted = Rc::new(RefCell::new(Vec::new()));
        let sink_seen = seen.clone();
        (seen, move |s: &str| sink_seen.borrow_mut().push(s.to_string()))
    }

    fn linear(duration_ms: f64) -> CountUpOptions {
        CountUpOptions::default()
            .with_easing(Easing::Linear)
            .with_duration_ms(duration_ms)
    }

    /// Scheduler that ignores cancellation, so stale callbacks still fire.
    #[derive(Default)]
    struct IgnoresCancel(FrameLoop);

    impl FrameScheduler for IgnoresCancel {
        fn request_frame(&mut self, callback: FrameCallback) -> FrameHandle {
            self.0.request_frame(callback)
        }

        fn cancel_frame(&mut self, _handle: FrameHandle) -> bool {
            false
        }
    }

    #[test]
    fn test_mount_counts_up_from_zero() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(2_500_000.0),
            CountUpOptions::default().with_format(DisplayFormat::Compact),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        assert_eq!(seen.borrow().first().map(String::as_str), Some("0"));
        assert!(count_up.is_animating());

        frames.run_until_idle(0.0, 16.0, 200);
        assert!(!count_up.is_animating());
        assert_eq!(seen.borrow().last().map(String::as_str), Some("2.5M"));
        assert_eq!(count_up.text(), "2.5M");
        assert!(seen.borrow().len() > 10);
    }

    #[test]
    fn test_frames_never_overshoot() {
        let mut frames = FrameLoop::new();
        let (_, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            CountUpOptions::default(),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        let mut now = 0.0;
        let mut last = 0.0;
        while frames.has_pending() {
            frames.run_frame(now);
            let v = count_up.current();
            assert!(v >= last && v <= 100.0);
            last = v;
            now += 7.0;
        }
        assert_eq!(count_up.current(), 100.0);
    }

    #[test]
    fn test_no_animation_shows_value_immediately() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(1234.6),
            CountUpOptions::default().with_animate(false),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        assert_eq!(*seen.borrow(), vec!["1,235".to_string()]);
        assert!(!frames.has_pending());

        count_up.set_value(StatValue::Number(75_000.0), 10.0, &mut frames);
        assert_eq!(count_up.text(), "75,000");
    }

    #[test]
    fn test_text_bypasses_animation() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(50.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        frames.run_frame(0.0);
        frames.run_frame(500.0);

        count_up.set_value(StatValue::from("N/A"), 500.0, &mut frames);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("N/A"));
        assert!(!frames.has_pending());

        let emitted = seen.borrow().len();
        frames.run_until_idle(600.0, 16.0, 100);
        assert_eq!(seen.borrow().len(), emitted);
    }

    #[test]
    fn test_non_finite_rendered_verbatim() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(0.0),
            CountUpOptions::default(),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        count_up.set_value(StatValue::Number(f64::NAN), 0.0, &mut frames);
        assert_eq!(count_up.text(), "NaN");
        count_up.set_value(StatValue::Number(f64::INFINITY), 0.0, &mut frames);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("inf"));
    }

    #[test]
    fn test_number_after_text_redraws_same_target() {
        let mut frames = FrameLoop::new();
        let (_, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(10.0),
            linear(100.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        frames.run_until_idle(0.0, 50.0, 10);
        assert_eq!(count_up.text(), "10");

        count_up.set_value(StatValue::from("loading"), 200.0, &mut frames);
        count_up.set_value(StatValue::Number(10.0), 210.0, &mut frames);
        assert_eq!(count_up.text(), "10");
    }

    #[test]
    fn test_retarget_starts_from_displayed_value() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        frames.run_frame(0.0);
        frames.run_frame(500.0);
        assert_eq!(count_up.text(), "50");

        count_up.set_value(StatValue::Number(200.0), 500.0, &mut frames);
        assert_eq!(frames.pending_count(), 1);

        frames.run_frame(1000.0);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("125"));

        frames.run_until_idle(1500.0, 16.0, 100);
        assert_eq!(count_up.text(), "200");
    }

    #[test]
    fn test_equal_target_is_noop() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(5.0),
            linear(10.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        frames.run_until_idle(0.0, 16.0, 10);
        let emitted = seen.borrow().len();

        count_up.set_value(StatValue::Number(5.0), 100.0, &mut frames);
        assert!(!frames.has_pending());
        assert_eq!(seen.borrow().len(), emitted);
    }

    #[test]
    fn test_cancel_stops_emissions() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        frames.run_frame(250.0);
        let before = seen.borrow().len();

        assert!(count_up.cancel(&mut frames));
        assert!(!count_up.cancel(&mut frames));
        assert_eq!(seen.borrow().len(), before + 1);
        assert_eq!(seen.borrow().last().map(String::as_str), Some("25"));
        let emitted = seen.borrow().clone();

        frames.run_until_idle(300.0, 16.0, 100);
        assert_eq!(*seen.borrow(), emitted);
        assert_eq!(count_up.text(), "25");
    }

    #[test]
    fn test_cancel_when_idle_emits_nothing() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(10.0),
            linear(100.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        frames.run_until_idle(0.0, 50.0, 10);
        let emitted = seen.borrow().len();

        assert!(!count_up.cancel(&mut frames));
        assert_eq!(seen.borrow().len(), emitted);
    }

    #[test]
    fn test_sink_can_read_count_up() {
        let slot: Rc<RefCell<Weak<CountUp>>> = Rc::new(RefCell::new(Weak::new()));
        let reads: Rc<RefCell<Vec<(bool, String)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let slot = slot.clone();
            let reads = reads.clone();
            move |_: &str| {
                if let Some(count_up) = slot.borrow().upgrade() {
                    reads
                        .borrow_mut()
                        .push((count_up.is_animating(), count_up.text()));
                }
            }
        };

        let mut frames = FrameLoop::new();
        let count_up = Rc::new(
            CountUp::mount(StatValue::Number(100.0), linear(100.0), sink, 0.0, &mut frames)
                .unwrap(),
        );
        *slot.borrow_mut() = Rc::downgrade(&count_up);

        frames.run_frame(0.0);
        frames.run_frame(50.0);
        count_up.set_value(StatValue::from("N/A"), 50.0, &mut frames);
        count_up.set_value(StatValue::Number(200.0), 60.0, &mut frames);
        frames.run_until_idle(60.0, 50.0, 10);

        let reads = reads.borrow();
        assert_eq!(reads[0], (true, "0".to_string()));
        assert_eq!(reads[1], (true, "50".to_string()));
        assert_eq!(reads[2], (false, "N/A".to_string()));
        assert_eq!(reads.last(), Some(&(false, "200".to_string())));
        assert!(count_up.is_mounted());
    }

    #[test]
    fn test_stale_callback_after_cancel_does_nothing() {
        let mut frames = IgnoresCancel::default();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        count_up.cancel(&mut frames);
        assert_eq!(frames.0.pending_count(), 1);
        let emitted = seen.borrow().len();

        frames.0.run_frame(500.0);
        assert_eq!(seen.borrow().len(), emitted);
        assert!(!frames.0.has_pending());
    }

    #[test]
    fn test_unmount_is_inert() {
        let mut frames = IgnoresCancel::default();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();

        count_up.unmount(&mut frames);
        assert!(!count_up.is_mounted());
        let emitted = seen.borrow().len();

        frames.0.run_frame(500.0);
        count_up.set_value(StatValue::Number(3.0), 600.0, &mut frames);
        assert_eq!(seen.borrow().len(), emitted);
    }

    #[test]
    fn test_dropped_count_up_ignores_frame() {
        let mut frames = FrameLoop::new();
        let (seen, sink) = recorder();
        let count_up = CountUp::mount(
            StatValue::Number(100.0),
            linear(1000.0),
            sink,
            0.0,
            &mut frames,
        )
        .unwrap();
        drop(count_up);

        frames.run_frame(500.0);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_invalid_duration_rejected() {
        let mut frames = FrameLoop::new();
        let result = CountUp::mount(
            StatValue::Number(1.0),
            CountUpOptions::default().with_duration_ms(-1.0),
            |_: &str| {},
            0.0,
            &mut frames,
        );
        assert_eq!(result.err(), Some(AnimationError::InvalidDuration(-1.0)));
    }

    #[test]
    fn test_stat_card_render() {
        let card = StatCard::new("Total Views", 2_500_000.0)
            .with_format(DisplayFormat::Compact)
            .with_subtitle("across all campaigns")
            .with_trend(12.5, true);

        let rendered = card.render();
        assert_eq!(rendered.value, "2.5M");
        assert_eq!(rendered.subtitle.as_deref(), Some("across all campaigns"));
        assert_eq!(rendered.trend.as_deref(), Some("↑ 12.5% vs last period"));
        assert_eq!(rendered.trend_positive, Some(true));
    }

    #[test]
    fn test_stat_card_prefix_suffix_and_text() {
        let card = StatCard::new("Rate", "Pending").with_prefix("~").with_suffix(" avg");
        assert_eq!(card.render().value, "~Pending avg");
        assert_eq!(card.render_with("42").value, "~42 avg");

        let down = StatCard::new("Churn", 3.0).with_trend(-8.2, false);
        assert_eq!(down.render().trend.as_deref(), Some("↓ 8.2% vs last period"));
    }

    #[test]
    fn test_stat_value_deserializes_untagged() {
        let n: StatValue = serde_yaml_ng::from_str("12").unwrap();
        assert_eq!(n, StatValue::Number(12.0));
        let t: StatValue = serde_yaml_ng::from_str("\"N/A\"").unwrap();
        assert_eq!(t, StatValue::Text("N/A".to_string()));
    }
}
