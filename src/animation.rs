//! Keyed enter/exit transitions of month views.
//!
//! Every displayed month gets its own [`Instance`] running through
//! `Entering -> Settled -> Exiting -> Removed`. The [`Presence`] registry
//! owns the instances, feeds them time and reports when the last exiting
//! instance is gone.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::month::{DisplayedMonth, Direction};

/// Horizontal offset (percent of the view width) and opacity of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f64,
    pub opacity: f64,
}

impl Pose {
    pub const CENTER: Pose = Pose { x: 0.0, opacity: 1.0 };

    /// Where a view entering in `direction` starts.
    pub fn enter(direction: Direction) -> Self {
        Pose {
            x: 100.0 * direction.sign() as f64,
            opacity: 0.0,
        }
    }

    /// Where a view leaving in `direction` ends.
    pub fn exit(direction: Direction) -> Self {
        Pose {
            x: -100.0 * direction.sign() as f64,
            opacity: 0.0,
        }
    }

    fn lerp(&self, to: &Pose, progress: f64) -> Pose {
        Pose {
            x: self.x + (to.x - self.x) * progress,
            opacity: self.opacity + (to.opacity - self.opacity) * progress,
        }
    }
}

/// Critically damped spring normalized to move from 0 to 1.
///
/// The angular frequency is chosen so that the remaining displacement is
/// below [`Spring::REST_DELTA`] once `duration` has elapsed, at which point
/// the motion snaps to rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    duration: Duration,
}

impl Spring {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);
    pub const REST_DELTA: f64 = 1e-3;

    // solves (1 + x) * e^-x = REST_DELTA
    const SETTLE_RATIO: f64 = 9.233_4;

    pub fn new(duration: Duration) -> Self {
        Spring { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Progress in `[0, 1]` after `elapsed`. Monotonic, never overshoots.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if elapsed >= self.duration {
            return 1.0;
        }

        let omega = Self::SETTLE_RATIO / self.duration.as_secs_f64();
        let t = omega * elapsed.as_secs_f64();

        (1.0 - (1.0 + t) * (-t).exp()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

impl Default for Spring {
    fn default() -> Self {
        Spring::new(Self::DEFAULT_DURATION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Settled,
    Exiting,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The running motion reached its target.
    Arrived,
    /// Another month became active.
    Replaced,
}

impl Phase {
    pub fn transition(self, event: PhaseEvent) -> Phase {
        match (self, event) {
            (Phase::Entering, PhaseEvent::Arrived) => Phase::Settled,
            (Phase::Entering, PhaseEvent::Replaced) | (Phase::Settled, PhaseEvent::Replaced) => {
                Phase::Exiting
            }
            (Phase::Exiting, PhaseEvent::Arrived) => Phase::Removed,
            (phase, _) => phase,
        }
    }

    pub fn is_live(self) -> bool {
        matches!(self, Phase::Entering | Phase::Settled)
    }
}

/// A single animated month view.
#[derive(Debug, Clone)]
pub struct Instance {
    key: DisplayedMonth,
    phase: Phase,
    from: Pose,
    to: Pose,
    elapsed: Duration,
}

impl Instance {
    fn entering(key: DisplayedMonth, direction: Direction) -> Self {
        Instance {
            key,
            phase: Phase::Entering,
            from: Pose::enter(direction),
            to: Pose::CENTER,
            elapsed: Duration::ZERO,
        }
    }

    fn settled(key: DisplayedMonth) -> Self {
        Instance {
            key,
            phase: Phase::Settled,
            from: Pose::CENTER,
            to: Pose::CENTER,
            elapsed: Duration::ZERO,
        }
    }

    pub fn key(&self) -> DisplayedMonth {
        self.key
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pose(&self, spring: &Spring) -> Pose {
        match self.phase {
            Phase::Settled => Pose::CENTER,
            Phase::Removed => self.to,
            Phase::Entering | Phase::Exiting => {
                self.from.lerp(&self.to, spring.progress(self.elapsed))
            }
        }
    }

    fn replace(&mut self, direction: Direction, spring: &Spring) {
        let current = self.pose(spring);
        self.phase = self.phase.transition(PhaseEvent::Replaced);
        self.from = current;
        self.to = Pose::exit(direction);
        self.elapsed = Duration::ZERO;
    }

    fn advance(&mut self, dt: Duration, spring: &Spring) {
        if !matches!(self.phase, Phase::Entering | Phase::Exiting) {
            return;
        }

        self.elapsed += dt;
        if spring.is_done(self.elapsed) {
            self.phase = self.phase.transition(PhaseEvent::Arrived);
        }
    }

    fn finish(&mut self) {
        self.phase = self.phase.transition(PhaseEvent::Arrived);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// All exiting instances have been removed.
    ExitComplete,
}

/// Registry of animated month views keyed by month.
#[derive(Debug, Clone)]
pub struct Presence {
    spring: Spring,
    instances: BTreeMap<DisplayedMonth, Instance>,
}

impl Presence {
    pub fn new(spring: Spring) -> Self {
        Presence {
            spring,
            instances: BTreeMap::new(),
        }
    }

    /// Presence whose first view is mounted without an entrance animation.
    pub fn with_initial(spring: Spring, key: DisplayedMonth) -> Self {
        let mut presence = Presence::new(spring);
        presence.instances.insert(key, Instance::settled(key));
        presence
    }

    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    /// Makes `key` the active view. Every other live view starts exiting
    /// towards `-direction`, the new one enters from `direction`.
    pub fn present(&mut self, key: DisplayedMonth, direction: Direction) {
        if self.instances.get(&key).map_or(false, |i| i.phase.is_live()) {
            return;
        }

        let spring = self.spring;
        for instance in self.instances.values_mut() {
            if instance.phase.is_live() {
                log::trace!("{} exiting", instance.key);
                instance.replace(direction, &spring);
            }
        }

        // a month that is still on its way out gets remounted
        self.instances.insert(key, Instance::entering(key, direction));
        log::trace!("{} entering", key);
    }

    /// Feeds `dt` of time to every instance and drops finished exits.
    pub fn advance(&mut self, dt: Duration) -> Option<Notification> {
        let spring = self.spring;
        let had_exits = self.is_exiting();

        for instance in self.instances.values_mut() {
            instance.advance(dt, &spring);
        }

        self.collect(had_exits)
    }

    /// Completes every running motion at once.
    pub fn finish(&mut self) -> Option<Notification> {
        let had_exits = self.is_exiting();

        for instance in self.instances.values_mut() {
            instance.finish();
        }

        self.collect(had_exits)
    }

    fn collect(&mut self, had_exits: bool) -> Option<Notification> {
        self.instances
            .retain(|_, instance| instance.phase != Phase::Removed);

        if had_exits && !self.is_exiting() {
            Some(Notification::ExitComplete)
        } else {
            None
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.instances
            .values()
            .any(|instance| instance.phase == Phase::Exiting)
    }

    pub fn is_idle(&self) -> bool {
        self.instances
            .values()
            .all(|instance| instance.phase == Phase::Settled)
    }

    pub fn get(&self, key: &DisplayedMonth) -> Option<&Instance> {
        self.instances.get(key)
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.instances.values()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
