//! Per-item visual effects for the marquee strip.
//!
//! Each strip slot owns at most one live tween per effect kind, held in an
//! arena indexed by slot position. Spawning a kind that is already running
//! replaces it, so overlapping triggers (rapid clicks, a restart while an
//! entrance is mid-flight) resolve deterministically instead of stacking.
//! The arena is rebuilt explicitly whenever the image list changes, which
//! keeps stale slot indices from surviving a re-render.

use crate::app::tween::{Ease, Repeat, Tween};

// Entrance: fade/scale/rise per item, staggered along the strip.
const ENTRANCE_SECS: f32 = 0.8;
const ENTRANCE_STAGGER_SECS: f32 = 0.1;
const ENTRANCE_LEAD_SECS: f32 = 0.5;
const ENTRANCE_RISE_PX: f32 = 30.0;
const ENTRANCE_START_SCALE: f32 = 0.8;

// Perpetual bob. Periods cycle over three lengths so neighbors drift out
// of phase instead of moving in lockstep.
const BOB_PX: f32 = -5.0;
const BOB_BASE_SECS: f32 = 2.0;
const BOB_STEP_SECS: f32 = 0.5;
const BOB_PERIOD_CYCLE: usize = 3;
const BOB_STAGGER_SECS: f32 = 0.2;

// Click response: a pulse up and back, then one full turn.
const PULSE_SCALE: f32 = 1.2;
const PULSE_SECS: f32 = 0.2;
const SPIN_SECS: f32 = 0.8;
const FULL_TURN: f32 = std::f32::consts::TAU;

/// The effect kinds a slot can run. One live tween per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Entrance,
    Bob,
    Pulse,
    Spin,
}

/// Composite transform sampled from a slot's live effects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Vertical offset in points.
    pub dy: f32,
    /// Scale factor around the item center.
    pub scale: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

impl Default for Sprite {
    fn default() -> Self {
        Self {
            dy: 0.0,
            scale: 1.0,
            rotation: 0.0,
            alpha: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct Slot {
    entrance: Option<Tween>,
    bob: Option<Tween>,
    pulse: Option<Tween>,
    spin: Option<Tween>,
}

/// Arena of per-slot effects, indexed by strip position.
#[derive(Clone, Debug, Default)]
pub struct EffectArena {
    slots: Vec<Slot>,
}

impl EffectArena {
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::default(); len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resizes the arena for a new image list. Effects on slots past the
    /// new length are dropped, new slots start idle.
    pub fn resize(&mut self, len: usize) {
        self.slots.resize(len, Slot::default());
    }

    /// Cancels every live effect without changing the slot count.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::default();
        }
    }

    /// Starts the one-time entrance for `slot`, staggered by its position
    /// along the strip.
    pub fn start_entrance(&mut self, slot: usize) {
        let Some(s) = self.slots.get_mut(slot) else {
            return;
        };
        let delay = ENTRANCE_LEAD_SECS + slot as f32 * ENTRANCE_STAGGER_SECS;
        s.entrance =
            Some(Tween::new(0.0, 1.0, ENTRANCE_SECS, Ease::QuartOut).with_delay(delay));
    }

    /// Starts the perpetual bob for `slot`. Period and phase derive from
    /// the slot index.
    pub fn start_bob(&mut self, slot: usize) {
        let Some(s) = self.slots.get_mut(slot) else {
            return;
        };
        let period = BOB_BASE_SECS + (slot % BOB_PERIOD_CYCLE) as f32 * BOB_STEP_SECS;
        s.bob = Some(
            Tween::new(0.0, BOB_PX, period, Ease::QuadInOut)
                .with_delay(slot as f32 * BOB_STAGGER_SECS)
                .with_repeat(Repeat::Yoyo(None)),
        );
    }

    /// Click response: pulse now, spin chained when the pulse lands. A
    /// second click mid-pulse restarts the pulse and drops the old chain.
    pub fn click(&mut self, slot: usize) {
        let Some(s) = self.slots.get_mut(slot) else {
            return;
        };
        s.pulse = Some(
            Tween::new(1.0, PULSE_SCALE, PULSE_SECS, Ease::CubicOut)
                .with_repeat(Repeat::Yoyo(Some(1))),
        );
        s.spin = None;
    }

    pub fn is_active(&self, slot: usize, kind: EffectKind) -> bool {
        self.slots.get(slot).is_some_and(|s| match kind {
            EffectKind::Entrance => s.entrance.is_some(),
            EffectKind::Bob => s.bob.is_some(),
            EffectKind::Pulse => s.pulse.is_some(),
            EffectKind::Spin => s.spin.is_some(),
        })
    }

    /// Total number of live tweens across the arena.
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .map(|s| {
                s.entrance.is_some() as usize
                    + s.bob.is_some() as usize
                    + s.pulse.is_some() as usize
                    + s.spin.is_some() as usize
            })
            .sum()
    }

    /// Advances every live effect and runs completion transitions:
    /// finished entrances are retired (their end state is the default
    /// sprite), a finished pulse chains exactly one spin.
    pub fn tick(&mut self, dt: f32) {
        for slot in &mut self.slots {
            if let Some(t) = &mut slot.entrance {
                t.tick(dt);
                if t.finished() {
                    slot.entrance = None;
                }
            }
            if let Some(t) = &mut slot.bob {
                t.tick(dt);
            }
            if let Some(t) = &mut slot.pulse {
                t.tick(dt);
                if t.finished() {
                    slot.pulse = None;
                    slot.spin = Some(Tween::new(0.0, FULL_TURN, SPIN_SECS, Ease::CubicInOut));
                }
            }
            if let Some(t) = &mut slot.spin {
                t.tick(dt);
                if t.finished() {
                    slot.spin = None;
                }
            }
        }
    }

    /// Samples the composite transform for `slot`.
    pub fn sample(&self, slot: usize) -> Sprite {
        let mut sprite = Sprite::default();
        let Some(s) = self.slots.get(slot) else {
            return sprite;
        };
        if let Some(t) = &s.entrance {
            let k = t.value();
            sprite.alpha = k;
            sprite.scale *= ENTRANCE_START_SCALE + (1.0 - ENTRANCE_START_SCALE) * k;
            sprite.dy += ENTRANCE_RISE_PX * (1.0 - k);
        }
        if let Some(t) = &s.bob {
            sprite.dy += t.value();
        }
        if let Some(t) = &s.pulse {
            sprite.scale *= t.value();
        }
        if let Some(t) = &s.spin {
            sprite.rotation += t.value();
        }
        sprite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_slot_samples_identity() {
        let arena = EffectArena::new(4);
        assert_eq!(arena.sample(2), Sprite::default());
        // Out-of-range slots sample identity too.
        assert_eq!(arena.sample(99), Sprite::default());
    }

    #[test]
    fn entrance_starts_hidden_and_retires_at_rest() {
        let mut arena = EffectArena::new(1);
        arena.start_entrance(0);
        let s = arena.sample(0);
        assert_eq!(s.alpha, 0.0);
        assert_eq!(s.scale, ENTRANCE_START_SCALE);
        assert_eq!(s.dy, ENTRANCE_RISE_PX);

        // Lead delay plus the pass itself.
        arena.tick(ENTRANCE_LEAD_SECS + ENTRANCE_SECS + 0.01);
        assert!(!arena.is_active(0, EffectKind::Entrance));
        assert_eq!(arena.sample(0), Sprite::default());
    }

    #[test]
    fn entrance_stagger_orders_slots() {
        let mut arena = EffectArena::new(3);
        for slot in 0..3 {
            arena.start_entrance(slot);
        }
        arena.tick(ENTRANCE_LEAD_SECS + 0.15);
        let a = arena.sample(0).alpha;
        let b = arena.sample(1).alpha;
        let c = arena.sample(2).alpha;
        assert!(a > b && b > c, "later slots lag: {a} {b} {c}");
    }

    #[test]
    fn bob_periods_differ_within_cycle() {
        let mut arena = EffectArena::new(3);
        for slot in 0..3 {
            arena.start_bob(slot);
        }
        // Sample well past every stagger delay; with distinct periods the
        // offsets diverge.
        arena.tick(5.3);
        let values: Vec<f32> = (0..3).map(|i| arena.sample(i).dy).collect();
        assert!(
            values[0] != values[1] || values[1] != values[2],
            "bobs stayed in sync: {values:?}"
        );
        for v in values {
            assert!((BOB_PX..=0.0).contains(&v), "bob out of range: {v}");
        }
    }

    #[test]
    fn pulse_chains_exactly_one_spin() {
        let mut arena = EffectArena::new(1);
        arena.click(0);
        assert!(arena.is_active(0, EffectKind::Pulse));
        assert!(!arena.is_active(0, EffectKind::Spin));

        // Pulse is a single round trip.
        arena.tick(PULSE_SECS * 2.0 + 0.01);
        assert!(!arena.is_active(0, EffectKind::Pulse));
        assert!(arena.is_active(0, EffectKind::Spin));

        arena.tick(SPIN_SECS + 0.01);
        assert!(!arena.is_active(0, EffectKind::Spin));
        assert_eq!(arena.active_count(), 0);
    }

    #[test]
    fn reclick_supersedes_running_pulse() {
        let mut arena = EffectArena::new(1);
        arena.click(0);
        arena.tick(PULSE_SECS); // at the top of the pulse
        assert!((arena.sample(0).scale - PULSE_SCALE).abs() < 1e-4);

        arena.click(0);
        // Fresh pulse starts back at scale 1.
        assert!((arena.sample(0).scale - 1.0).abs() < 1e-4);
        // Still only one pulse and no spin pending from the first click.
        assert_eq!(arena.active_count(), 1);
    }

    #[test]
    fn resize_drops_stale_slots() {
        let mut arena = EffectArena::new(4);
        arena.click(3);
        arena.resize(2);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.active_count(), 0);
        // Growing again yields idle slots, not resurrected effects.
        arena.resize(4);
        assert!(!arena.is_active(3, EffectKind::Pulse));
    }

    #[test]
    fn clear_cancels_everything() {
        let mut arena = EffectArena::new(2);
        arena.start_entrance(0);
        arena.start_bob(1);
        arena.click(1);
        assert!(arena.active_count() > 0);
        arena.clear();
        assert_eq!(arena.active_count(), 0);
        assert_eq!(arena.len(), 2);
    }
}
