// Fire-and-forget numeric tweens, stepped from the frame loop.
//
// Each animated property is a [`Tweened`] value. Starting a new tween on a
// property replaces the running one and starts from the current value, so
// enter/leave transitions can interrupt each other without jumps.

use instant::Instant;

/// Easing curves, named after the usual `powerN.out` family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out.
    #[default]
    Power1Out,
    /// Cubic ease-out.
    Power2Out,
    /// Quartic ease-out.
    Power3Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - inv * inv,
            Ease::Power2Out => 1.0 - inv * inv * inv,
            Ease::Power3Out => 1.0 - inv * inv * inv * inv,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: f32,
    to: f32,
    start: f64,
    duration: f64,
    ease: Ease,
}

#[derive(Clone, Debug)]
pub struct Tweened {
    value: f32,
    active: Option<Tween>,
}

impl Tweened {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            active: None,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Start animating toward `to`. Non-positive durations snap immediately.
    pub fn animate_to(&mut self, to: f32, now: f64, duration: f64, ease: Ease) {
        if duration.is_nan() || duration <= 0.0 {
            self.set(to);
            return;
        }
        self.active = Some(Tween {
            from: self.value,
            to,
            start: now,
            duration,
            ease,
        });
    }

    /// Jump to `value`, cancelling any running tween.
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.active = None;
    }

    /// Advance to time `now` (seconds). Returns whether a tween is still running.
    pub fn step(&mut self, now: f64) -> bool {
        let Some(tw) = self.active else {
            return false;
        };
        let progress = ((now - tw.start) / tw.duration).clamp(0.0, 1.0) as f32;
        self.value = tw.from + (tw.to - tw.from) * tw.ease.apply(progress);
        if progress >= 1.0 {
            self.value = tw.to;
            self.active = None;
        }
        self.active.is_some()
    }
}

/// Monotonic seconds since the owning controller was created.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    origin: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    pub fn now_ms(&self) -> f64 {
        self.now() * 1000.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
