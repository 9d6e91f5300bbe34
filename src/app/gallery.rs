//! The "Featured Dishes & Drinks" section: a scroll-triggered staggered
//! reveal over the image marquee, plus a slow perpetual bob of the whole
//! section.
//!
//! The reveal is a single timeline with one shared head. Scrolling the
//! section past the trigger runs the head forward, scrolling back above the
//! trigger runs it backward from wherever it currently is, so a reversal
//! mid-reveal rewinds smoothly instead of snapping.

use egui::{Align2, Color32, FontId};

use crate::app::images;
use crate::app::marquee::{ConfigError, Marquee, MarqueeConfig, MarqueeStyle, ScrollDirection};
use crate::app::tween::{Ease, Repeat, Tween};

const SECTION_VPAD: f32 = 64.0;
const HEADING_BLOCK: f32 = 76.0;
const SUBHEADING_BLOCK: f32 = 70.0;
const CTA_BLOCK: f32 = 76.0;
const HEADING_SIZE: f32 = 44.0;
const SUBHEADING_SIZE: f32 = 18.0;

/// Hidden elements sit this far below their resting position.
const HIDDEN_RISE_PX: f32 = 50.0;
/// The marquee container also scales in from this factor.
const CONTAINER_START_SCALE: f32 = 0.9;

const SECTION_BOB_PX: f32 = -10.0;
const SECTION_BOB_SECS: f32 = 3.0;

const EDGE_FADE_PX: f32 = 128.0;

/// One staged element of the reveal: when it starts after the timeline
/// head begins moving, and how long it takes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
}

pub const HEADING_STAGE: Stage = Stage {
    delay: 0.2,
    duration: 1.0,
    ease: Ease::QuartOut,
};
pub const SUBHEADING_STAGE: Stage = Stage {
    delay: 0.5,
    duration: 0.8,
    ease: Ease::CubicOut,
};
pub const STRIP_STAGE: Stage = Stage {
    delay: 0.8,
    duration: 1.2,
    ease: Ease::QuartOut,
};

/// Scroll thresholds for the reveal, as fractions of the visible viewport
/// height measured from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTrigger {
    /// The reveal plays while the section's top edge sits above this line.
    pub enter_frac: f32,
    /// Far end of the trigger region. Scrolling past it downward keeps the
    /// reveal played; only rising back above the entry line reverses.
    pub end_frac: f32,
}

impl Default for ViewportTrigger {
    fn default() -> Self {
        Self {
            enter_frac: 0.8,
            end_frac: 0.2,
        }
    }
}

impl ViewportTrigger {
    pub fn entered(&self, viewport: egui::Rect, section_top: f32) -> bool {
        section_top <= viewport.top() + viewport.height() * self.enter_frac
    }
}

/// Shared-head staggered timeline driving the three reveal stages.
#[derive(Clone, Debug, Default)]
pub struct RevealTimeline {
    head: f32,
    forward: bool,
}

impl RevealTimeline {
    /// Head position at which the last stage has fully played.
    pub const TOTAL: f32 = STRIP_STAGE.delay + STRIP_STAGE.duration;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_forward(&mut self, forward: bool) {
        self.forward = forward;
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn head(&self) -> f32 {
        self.head
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.head = if self.forward {
            (self.head + dt).min(Self::TOTAL)
        } else {
            (self.head - dt).max(0.0)
        };
    }

    pub fn jump_to_end(&mut self) {
        self.head = Self::TOTAL;
        self.forward = true;
    }

    /// Eased progress of one stage at the current head, in `[0, 1]`.
    pub fn progress(&self, stage: Stage) -> f32 {
        let t = (self.head - stage.delay) / stage.duration;
        stage.ease.apply(t.clamp(0.0, 1.0))
    }

    pub fn fully_hidden(&self) -> bool {
        self.head <= 0.0
    }

    pub fn fully_shown(&self) -> bool {
        self.head >= Self::TOTAL
    }
}

/// The gallery section. Owns the marquee and all section-level animation.
pub struct Gallery {
    marquee: Marquee,
    reveal: RevealTimeline,
    trigger: ViewportTrigger,
    bob: Tween,
    reduced_motion: bool,
}

impl Gallery {
    pub fn new() -> Result<Self, ConfigError> {
        let config = MarqueeConfig {
            images: images::featured_menu(),
            speed: 60.0,
            direction: ScrollDirection::Left,
            height: 320.0,
            style: MarqueeStyle::default(),
        };
        Ok(Self {
            marquee: Marquee::new(config)?,
            reveal: RevealTimeline::new(),
            trigger: ViewportTrigger::default(),
            bob: Tween::new(0.0, SECTION_BOB_PX, SECTION_BOB_SECS, Ease::QuadInOut)
                .with_repeat(Repeat::Yoyo(None)),
            reduced_motion: false,
        })
    }

    pub fn marquee(&self) -> &Marquee {
        &self.marquee
    }

    pub fn marquee_mut(&mut self) -> &mut Marquee {
        &mut self.marquee
    }

    pub fn reveal(&self) -> &RevealTimeline {
        &self.reveal
    }

    /// With reduced motion the section holds its revealed layout and stops
    /// bobbing; content stays visible rather than hidden-and-never-shown.
    pub fn set_reduced_motion(&mut self, on: bool) {
        self.reduced_motion = on;
        self.marquee.set_reduced_motion(on);
        if on {
            self.reveal.jump_to_end();
            self.bob.pause();
        } else {
            self.bob.resume();
        }
    }

    pub fn section_height(&self) -> f32 {
        2.0 * SECTION_VPAD
            + HEADING_BLOCK
            + SUBHEADING_BLOCK
            + self.marquee.config().height
            + CTA_BLOCK
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let dt = ui.input(|i| i.stable_dt).clamp(0.0, 0.1);
        let viewport = ui.clip_rect();

        let size = egui::vec2(ui.available_width(), self.section_height());
        let (section, _) = ui.allocate_exact_size(size, egui::Sense::hover());

        let entered = self.trigger.entered(viewport, section.top());
        self.reveal.set_forward(entered || self.reduced_motion);
        self.reveal.tick(dt);
        self.bob.tick(dt);

        // The whole section drifts up and down around its allocated rect.
        let rect = section.translate(egui::vec2(0.0, self.bob.value()));
        self.paint_backdrop(ui, rect);

        let center_x = rect.center().x;
        let mut y = rect.top() + SECTION_VPAD;

        let heading_k = self.reveal.progress(HEADING_STAGE);
        paint_heading(
            ui.painter(),
            center_x,
            y + HIDDEN_RISE_PX * (1.0 - heading_k),
            heading_k,
        );
        y += HEADING_BLOCK;

        let sub_k = self.reveal.progress(SUBHEADING_STAGE);
        ui.painter().text(
            egui::pos2(center_x, y + HIDDEN_RISE_PX * (1.0 - sub_k)),
            Align2::CENTER_TOP,
            "Discover our delicious pizzas and refreshing beverages \
             crafted with love and finest ingredients",
            FontId::proportional(SUBHEADING_SIZE),
            Color32::from_gray(90).gamma_multiply(sub_k),
        );
        y += SUBHEADING_BLOCK;

        let strip_k = self.reveal.progress(STRIP_STAGE);
        let strip_h = self.marquee.config().height;
        let scale = CONTAINER_START_SCALE + (1.0 - CONTAINER_START_SCALE) * strip_k;
        let container = egui::Rect::from_center_size(
            egui::pos2(
                center_x,
                y + strip_h / 2.0 + HIDDEN_RISE_PX * (1.0 - strip_k),
            ),
            egui::vec2(rect.width() * scale, strip_h * scale),
        );
        let mut strip_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(container)
                .layout(egui::Layout::top_down(egui::Align::Min)),
        );
        strip_ui.multiply_opacity(strip_k);
        self.marquee.ui(&mut strip_ui);

        // Fade the strip's cut edges into the page background.
        let page = super::PAGE_FILL;
        let clear = Color32::from_rgba_unmultiplied(page.r(), page.g(), page.b(), 0);
        let fade = page.gamma_multiply(strip_k.max(0.01));
        horizontal_fade(
            ui.painter(),
            egui::Rect::from_min_size(
                container.left_top(),
                egui::vec2(EDGE_FADE_PX, container.height()),
            ),
            fade,
            clear,
        );
        horizontal_fade(
            ui.painter(),
            egui::Rect::from_min_size(
                egui::pos2(container.right() - EDGE_FADE_PX, container.top()),
                egui::vec2(EDGE_FADE_PX, container.height()),
            ),
            clear,
            fade,
        );
        y += strip_h + 32.0;

        self.paint_cta(ui, egui::pos2(center_x, y + 22.0));
    }

    fn paint_backdrop(&self, ui: &egui::Ui, rect: egui::Rect) {
        let painter = ui.painter();
        // Soft decorative blobs, barely above the page tint.
        painter.circle_filled(
            rect.left_top() + egui::vec2(60.0, 60.0),
            44.0,
            Color32::from_rgb(255, 107, 53).gamma_multiply(0.05),
        );
        painter.circle_filled(
            rect.right_bottom() - egui::vec2(80.0, 80.0),
            64.0,
            Color32::from_rgb(22, 101, 52).gamma_multiply(0.05),
        );
        painter.circle_filled(
            egui::pos2(rect.left() + rect.width() * 0.25, rect.center().y),
            32.0,
            Color32::from_rgb(255, 199, 44).gamma_multiply(0.05),
        );
    }

    fn paint_cta(&self, ui: &mut egui::Ui, center: egui::Pos2) {
        let rect = egui::Rect::from_center_size(center, egui::vec2(200.0, 44.0));
        let response = ui.interact(rect, ui.id().with("view_full_menu"), egui::Sense::click());
        let fill = if response.hovered() {
            Color32::from_rgb(220, 70, 20)
        } else {
            Color32::from_rgb(255, 107, 53)
        };
        ui.painter().rect_filled(rect, 22.0, fill);
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "View Full Menu",
            FontId::proportional(16.0),
            Color32::WHITE,
        );
        if response.clicked() {
            log::info!("full menu requested");
        }
    }
}

fn paint_heading(painter: &egui::Painter, center_x: f32, top_y: f32, alpha: f32) {
    let font = FontId::proportional(HEADING_SIZE);
    let orange = Color32::from_rgb(234, 88, 12).gamma_multiply(alpha);
    let green = Color32::from_rgb(22, 101, 52).gamma_multiply(alpha);
    let first = painter.layout_no_wrap("Our Featured ".to_owned(), font.clone(), orange);
    let second = painter.layout_no_wrap("Dishes & Drinks".to_owned(), font, green);
    let left = center_x - (first.size().x + second.size().x) / 2.0;
    let second_x = left + first.size().x;
    painter.galley(egui::pos2(left, top_y), first, orange);
    painter.galley(egui::pos2(second_x, top_y), second, green);
}

/// A single-quad horizontal gradient between two colors.
fn horizontal_fade(painter: &egui::Painter, rect: egui::Rect, left: Color32, right: Color32) {
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(rect.left_top(), left);
    mesh.colored_vertex(rect.right_top(), right);
    mesh.colored_vertex(rect.right_bottom(), right);
    mesh.colored_vertex(rect.left_bottom(), left);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1280.0, 1000.0))
    }

    #[test]
    fn trigger_fires_at_eighty_percent_line() {
        let trigger = ViewportTrigger::default();
        let vp = viewport();
        // Section top below the 80% line: not yet entered.
        assert!(!trigger.entered(vp, 900.0));
        // Crossing the line (800.0 for a 1000-tall viewport) enters.
        assert!(trigger.entered(vp, 800.0));
        assert!(trigger.entered(vp, 100.0));
    }

    #[test]
    fn trigger_reverses_when_scrolled_back_below_line() {
        let trigger = ViewportTrigger::default();
        let vp = viewport();
        assert!(trigger.entered(vp, 700.0));
        // Scrolling up pushes the section back down past the line.
        assert!(!trigger.entered(vp, 820.0));
    }

    #[test]
    fn stages_play_in_order_at_every_head() {
        let mut timeline = RevealTimeline::new();
        timeline.set_forward(true);
        let mut last = (0.0, 0.0, 0.0);
        for _ in 0..40 {
            timeline.tick(0.05);
            let h = timeline.progress(HEADING_STAGE);
            let s = timeline.progress(SUBHEADING_STAGE);
            let c = timeline.progress(STRIP_STAGE);
            assert!(h >= s && s >= c, "stage order broken: {h} {s} {c}");
            // Forward play never regresses any stage.
            assert!(h >= last.0 && s >= last.1 && c >= last.2);
            last = (h, s, c);
        }
        timeline.tick(0.5); // absorb float drift from the small steps
        assert!(timeline.fully_shown());
        assert_eq!(timeline.progress(STRIP_STAGE), 1.0);
    }

    #[test]
    fn reversal_resumes_from_current_head() {
        let mut timeline = RevealTimeline::new();
        timeline.set_forward(true);
        timeline.tick(0.9);
        let mid_heading = timeline.progress(HEADING_STAGE);
        assert!(mid_heading > 0.0 && mid_heading < 1.0);

        timeline.set_forward(false);
        timeline.tick(0.1);
        let after = timeline.progress(HEADING_STAGE);
        assert!(after < mid_heading, "reverse should rewind, not snap");
        assert!(after > 0.0);

        timeline.tick(10.0);
        assert!(timeline.fully_hidden());
        assert_eq!(timeline.progress(STRIP_STAGE), 0.0);
    }

    #[test]
    fn head_clamps_at_both_ends() {
        let mut timeline = RevealTimeline::new();
        timeline.set_forward(true);
        timeline.tick(100.0);
        assert_eq!(timeline.head(), RevealTimeline::TOTAL);
        timeline.set_forward(false);
        timeline.tick(100.0);
        assert_eq!(timeline.head(), 0.0);
    }

    #[test]
    fn timeline_total_covers_last_stage() {
        assert_eq!(
            RevealTimeline::TOTAL,
            STRIP_STAGE.delay + STRIP_STAGE.duration
        );
        let mut timeline = RevealTimeline::new();
        timeline.jump_to_end();
        assert_eq!(timeline.progress(HEADING_STAGE), 1.0);
        assert_eq!(timeline.progress(SUBHEADING_STAGE), 1.0);
        assert_eq!(timeline.progress(STRIP_STAGE), 1.0);
    }

    #[test]
    fn gallery_defaults_follow_the_storefront() {
        let gallery = Gallery::new().expect("default gallery config is valid");
        assert_eq!(gallery.marquee().config().speed, 60.0);
        assert_eq!(gallery.marquee().config().height, 320.0);
        assert!(!gallery.marquee().config().images.is_empty());
        assert!(gallery.section_height() > gallery.marquee().config().height);
    }

    #[test]
    fn reduced_motion_holds_revealed_layout() {
        let mut gallery = Gallery::new().expect("valid config");
        gallery.set_reduced_motion(true);
        assert!(gallery.reveal().fully_shown());
    }
}
