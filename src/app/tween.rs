//! Easing curves and a small tween engine.
//!
//! Every animated value in the app (marquee entrances, bobs, click pulses,
//! the gallery reveal glow) is a [`Tween`] evaluated once per frame with
//! that frame's `dt`. A tween is a plain value container: it never touches
//! the UI, which keeps all timing logic testable off-screen.

/// Easing curve applied to a tween's linear progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    /// Decelerating, gentle. Quadratic.
    QuadOut,
    /// Symmetric in/out, quadratic. Good for perpetual yoyo motion.
    QuadInOut,
    /// Decelerating, cubic.
    CubicOut,
    /// Symmetric in/out, cubic.
    CubicInOut,
    /// Decelerating, quartic. Pronounced snap at the start.
    QuartOut,
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t).powi(2),
            Ease::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::QuartOut => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// What happens when a tween's forward pass completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    /// Play once and hold the end value.
    Once,
    /// Restart from the beginning, forever.
    Loop,
    /// Play forward then backward. `Some(n)` stops after `n` round trips,
    /// `None` keeps going forever.
    Yoyo(Option<u32>),
}

/// A time-driven interpolation between two values.
///
/// The accumulator pattern follows the rest of the app's animation code:
/// `tick(dt)` advances an elapsed-time counter, `value()` folds that time
/// through delay, repeat mode and easing. Pausing simply stops the counter,
/// so resuming continues from the exact in-progress value.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds before the first pass starts moving.
    pub delay: f32,
    /// Seconds per pass. Must be positive.
    pub duration: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    elapsed: f32,
    paused: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        debug_assert!(duration > 0.0, "tween duration must be positive");
        Self {
            from,
            to,
            delay: 0.0,
            duration,
            ease,
            repeat: Repeat::Once,
            elapsed: 0.0,
            paused: false,
        }
    }

    /// A tween already sitting at a fixed value. Used as the rest state of
    /// retargetable transitions such as the hover glow.
    pub fn fixed(value: f32) -> Self {
        let mut t = Self::new(value, value, 1.0, Ease::Linear);
        t.elapsed = t.duration;
        t
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.paused {
            self.elapsed += dt.max(0.0);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Restarts toward `to` from the current in-flight value over
    /// `duration` seconds, playing once. This is how enter/leave
    /// transitions reverse mid-flight without snapping.
    pub fn retarget(&mut self, to: f32, duration: f32, ease: Ease) {
        debug_assert!(duration > 0.0, "tween duration must be positive");
        self.from = self.value();
        self.to = to;
        self.duration = duration;
        self.ease = ease;
        self.delay = 0.0;
        self.repeat = Repeat::Once;
        self.elapsed = 0.0;
        self.paused = false;
    }

    /// Linear phase of the current pass in `[0, 1]`, after folding delay
    /// and repeat mode. Backward yoyo passes run the phase in reverse.
    fn phase(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        let passes = active / self.duration;
        match self.repeat {
            Repeat::Once => passes.min(1.0),
            Repeat::Loop => passes.fract(),
            Repeat::Yoyo(cycles) => {
                if let Some(n) = cycles {
                    // A round trip is two passes; after the last one the
                    // value rests back at `from`.
                    if passes >= (2 * n) as f32 {
                        return 0.0;
                    }
                }
                let t = passes.fract();
                if (passes as u64) % 2 == 0 { t } else { 1.0 - t }
            }
        }
    }

    pub fn value(&self) -> f32 {
        let k = self.ease.apply(self.phase());
        self.from + (self.to - self.from) * k
    }

    /// True once the tween can no longer change. Unbounded repeats never
    /// finish.
    pub fn finished(&self) -> bool {
        let active = self.elapsed - self.delay;
        match self.repeat {
            Repeat::Once => active >= self.duration,
            Repeat::Loop | Repeat::Yoyo(None) => false,
            Repeat::Yoyo(Some(n)) => active >= self.duration * (2 * n) as f32,
        }
    }
}
