//! Behavior tests for the marquee contract, driven through the same
//! public methods the per-frame UI pass uses, so no window or GPU is
//! needed.

use forno::app::effects::EffectKind;
use forno::app::images::{ImageSpec, LoadState, SETTLE_TIMEOUT_SECS};
use forno::app::marquee::{ConfigError, Marquee, MarqueeConfig, ScrollDirection};

fn menu_pair() -> Vec<ImageSpec> {
    vec![
        ImageSpec::new("https://menu.test/margherita.jpg", "Margherita Pizza", 268.0),
        ImageSpec::new("https://menu.test/lemonade.jpg", "Lemonade", 268.0),
    ]
}

fn config_with(images: Vec<ImageSpec>, speed: f32) -> MarqueeConfig {
    MarqueeConfig {
        images,
        speed,
        ..Default::default()
    }
}

fn settle_all(marquee: &mut Marquee) {
    for slot in 0..marquee.settlement().len() {
        marquee.record_load(slot, LoadState::Loaded);
    }
}

#[test]
fn both_copies_show_identical_content() {
    let marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    let n = marquee.config().images.len();
    for i in 0..n {
        let first = marquee.slot_spec(i).expect("copy A slot");
        let second = marquee.slot_spec(i + n).expect("copy B slot");
        assert_eq!(first, second, "slot {i} and {} must match", i + n);
    }
    assert!(marquee.slot_spec(2 * n).is_none());
}

#[test]
fn scroll_starts_only_after_every_slot_settles() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    let slots = marquee.settlement().len();
    assert_eq!(slots, 4, "two copies of two images");

    for slot in 0..slots - 1 {
        marquee.record_load(slot, LoadState::Loaded);
        assert!(
            marquee.scroll().is_none(),
            "loop must not start with slot {} unsettled",
            slots - 1
        );
    }
    marquee.record_load(slots - 1, LoadState::Loaded);
    assert!(marquee.is_scrolling());
}

#[test]
fn failed_loads_still_count_as_settled() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    marquee.record_load(0, LoadState::Loaded);
    marquee.record_load(1, LoadState::Failed);
    marquee.record_load(2, LoadState::Loaded);
    assert!(marquee.scroll().is_none());
    marquee.record_load(3, LoadState::Failed);
    assert!(marquee.is_scrolling(), "failures settle the strip too");
    assert_eq!(marquee.settlement().state(1), LoadState::Failed);
}

#[test]
fn settlement_deadline_unsticks_a_hung_fetch() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    for slot in 0..3 {
        marquee.record_load(slot, LoadState::Loaded);
    }

    // Slot 3 never reports. The first poll arms the deadline.
    marquee.poll_settle_deadline(50.0);
    assert!(marquee.scroll().is_none());
    marquee.poll_settle_deadline(50.0 + SETTLE_TIMEOUT_SECS - 0.5);
    assert!(marquee.scroll().is_none());

    marquee.poll_settle_deadline(50.0 + SETTLE_TIMEOUT_SECS + 0.5);
    assert!(marquee.is_scrolling());
    assert_eq!(marquee.settlement().state(3), LoadState::Failed);
}

#[test]
fn loop_arithmetic_matches_the_measured_strip() {
    // images = [A, B] at 268pt with a 32pt trailing gap each: the strip
    // measures 1200pt in total.
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);

    let scroll = marquee.scroll().expect("loop is running");
    assert!((scroll.half_width() - 600.0).abs() < 1e-3);
    assert!((scroll.period_secs() - 6.0).abs() < 1e-4);
    assert!((scroll.target_translation() + 600.0).abs() < 1e-3);
}

#[test]
fn hover_pauses_in_place_and_resumes_from_the_same_offset() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);

    for _ in 0..15 {
        marquee.advance(0.1);
    }
    let offset = marquee.scroll().unwrap().offset();
    assert!(offset > 0.0);

    marquee.set_hovered(true);
    assert!(!marquee.is_scrolling());
    for _ in 0..10 {
        marquee.advance(0.1);
    }
    assert_eq!(marquee.scroll().unwrap().offset(), offset);

    marquee.set_hovered(false);
    marquee.advance(0.1);
    let resumed = marquee.scroll().unwrap().offset();
    assert!((resumed - (offset + 10.0)).abs() < 1e-3, "resume, not restart");
}

#[test]
fn pointer_parked_during_load_starts_the_loop_paused() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    marquee.set_hovered(true);
    settle_all(&mut marquee);
    assert!(marquee.scroll().is_some());
    assert!(!marquee.is_scrolling());
    marquee.set_hovered(false);
    assert!(marquee.is_scrolling());
}

#[test]
fn settlement_spawns_entrance_and_bob_for_every_slot() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);
    for slot in 0..4 {
        assert!(marquee.effects().is_active(slot, EffectKind::Entrance));
        assert!(marquee.effects().is_active(slot, EffectKind::Bob));
    }
}

#[test]
fn click_effects_leave_the_loop_untouched() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);

    // Click the second copy of the first image.
    marquee.trigger_click(2);
    assert!(marquee.effects().is_active(2, EffectKind::Pulse));

    let before = marquee.scroll().unwrap().offset();
    marquee.advance(0.1);
    let after = marquee.scroll().unwrap().offset();
    assert!((after - before - 10.0).abs() < 1e-3, "scroll keeps moving");

    // Pulse lands, spin takes over, then everything one-shot retires.
    for _ in 0..30 {
        marquee.advance(0.1);
    }
    assert!(!marquee.effects().is_active(2, EffectKind::Pulse));
    assert!(!marquee.effects().is_active(2, EffectKind::Spin));
}

#[test]
fn out_of_range_click_is_ignored() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);
    marquee.trigger_click(99);
    assert_eq!(
        marquee.effects().active_count(),
        8,
        "entrance and bob per slot, nothing extra"
    );
}

#[test]
fn empty_image_list_sets_up_no_animation() {
    let mut marquee = Marquee::new(MarqueeConfig::default()).unwrap();
    assert!(marquee.scroll().is_none());
    assert_eq!(marquee.settlement().len(), 0);
    assert_eq!(marquee.effects().len(), 0);
    marquee.advance(1.0);
    marquee.poll_settle_deadline(1_000.0);
    assert!(marquee.scroll().is_none());
}

#[test]
fn reconfigure_cancels_the_running_animation_first() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    settle_all(&mut marquee);
    marquee.trigger_click(0);
    assert!(marquee.is_scrolling());
    assert!(marquee.effects().active_count() > 0);

    let single = vec![ImageSpec::new("https://menu.test/calzone.jpg", "Calzone", 300.0)];
    marquee.set_config(config_with(single, 40.0)).unwrap();

    assert!(marquee.scroll().is_none(), "old loop cancelled");
    assert_eq!(marquee.effects().active_count(), 0, "old effects cancelled");
    assert_eq!(marquee.settlement().len(), 2, "settlement restarts for 2N");
    assert!(!marquee.settlement().all_settled());

    // The new strip runs once its own images settle.
    settle_all(&mut marquee);
    let scroll = marquee.scroll().expect("new loop running");
    assert!((scroll.half_width() - 332.0).abs() < 1e-3);
}

#[test]
fn rejected_configuration_reports_a_descriptive_error() {
    let err = Marquee::new(config_with(menu_pair(), 0.0)).err().unwrap();
    assert_eq!(err, ConfigError::NonPositiveSpeed(0.0));
    assert!(err.to_string().contains("positive"));

    let mut bad_height = config_with(menu_pair(), 60.0);
    bad_height.height = -10.0;
    assert!(matches!(
        Marquee::new(bad_height),
        Err(ConfigError::NonPositiveHeight(_))
    ));
}

#[test]
fn right_direction_is_an_explicit_branch() {
    let mut config = config_with(menu_pair(), 100.0);
    config.direction = ScrollDirection::Right;
    let mut marquee = Marquee::new(config).unwrap();
    settle_all(&mut marquee);

    let scroll = marquee.scroll().unwrap();
    assert!((scroll.start_translation() + 600.0).abs() < 1e-3);
    assert_eq!(scroll.target_translation(), 0.0);

    let before = scroll.translation();
    marquee.advance(0.1);
    let after = marquee.scroll().unwrap().translation();
    assert!(after > before, "right direction moves the strip rightward");
}

#[test]
fn reduced_motion_skips_decoration_but_keeps_scrolling() {
    let mut marquee = Marquee::new(config_with(menu_pair(), 100.0)).unwrap();
    marquee.set_reduced_motion(true);
    settle_all(&mut marquee);
    assert!(marquee.is_scrolling());
    assert_eq!(marquee.effects().active_count(), 0);

    // Turning decoration back on picks the bobs up again.
    marquee.set_reduced_motion(false);
    for slot in 0..4 {
        assert!(marquee.effects().is_active(slot, EffectKind::Bob));
    }
}
