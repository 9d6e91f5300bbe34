//! The seamless image marquee.
//!
//! The strip renders every configured image twice, back to back. Once all
//! fetches settle it scrolls continuously; because copy B is pixel-identical
//! to copy A, wrapping the offset after exactly one copy's width lands on an
//! indistinguishable frame, so the loop never shows a seam. Hovering pauses
//! the scroll in place, clicking an item pulses and spins it, and a failed
//! fetch swaps in the shared placeholder without holding the strip back.

use egui::load::SizedTexture;
use egui::{Color32, TextureHandle};

use crate::app::effects::{EffectArena, Sprite};
use crate::app::images::{self, ImageSpec, LoadState, Settlement};
use crate::app::tween::{Ease, Tween};

/// Inner padding between the card edge and the strip items.
const STRIP_PADDING: f32 = 16.0;
/// Enter/leave duration of the hover glow.
const GLOW_SECS: f32 = 0.3;
const ITEM_CORNER: f32 = 12.0;

/// Which way the strip travels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollDirection {
    #[default]
    Left,
    Right,
}

/// Rejected marquee configuration. Construction fails fast instead of
/// producing a degenerate animation (a non-positive speed would make the
/// loop period infinite or negative).
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("scroll speed must be a positive number of px/s (got {0})")]
    NonPositiveSpeed(f32),
    #[error("strip height must be a positive number of points (got {0})")]
    NonPositiveHeight(f32),
}

/// Styling passthroughs for the strip container and its items.
#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeStyle {
    pub corner_radius: f32,
    /// Horizontal gap trailing each item. Part of the loop period.
    pub item_gap: f32,
    pub fill: Color32,
    /// Halo color while the pointer rests on the strip.
    pub glow_color: Color32,
    /// Resting halo color.
    pub shadow_color: Color32,
    /// Accent for the hovered item's outline and sparkle.
    pub highlight: Color32,
}

impl Default for MarqueeStyle {
    fn default() -> Self {
        Self {
            corner_radius: 16.0,
            item_gap: 32.0,
            fill: Color32::from_rgba_unmultiplied(255, 255, 255, 210),
            glow_color: Color32::from_rgb(255, 107, 53),
            shadow_color: Color32::from_rgb(20, 20, 20),
            highlight: Color32::from_rgb(255, 199, 44),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarqueeConfig {
    pub images: Vec<ImageSpec>,
    /// Scroll speed in px/s.
    pub speed: f32,
    pub direction: ScrollDirection,
    /// Container height in points.
    pub height: f32,
    pub style: MarqueeStyle,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            speed: 50.0,
            direction: ScrollDirection::Left,
            height: 200.0,
            style: MarqueeStyle::default(),
        }
    }
}

impl MarqueeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed(self.speed));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ConfigError::NonPositiveHeight(self.height));
        }
        Ok(())
    }
}

/// Laid-out widths of the 2N strip slots: copy A then copy B, identical.
pub fn strip_slot_widths(images: &[ImageSpec]) -> Vec<f32> {
    images
        .iter()
        .chain(images.iter())
        .map(|img| img.width)
        .collect()
}

/// Total strip width: every slot plus its trailing gap. With the trailing
/// gap included, the distance from copy A's origin to copy B's origin is
/// exactly half of this.
pub fn strip_width(slot_widths: &[f32], gap: f32) -> f32 {
    slot_widths.iter().sum::<f32>() + gap * slot_widths.len() as f32
}

/// UV sub-rectangle cropping a texture of size `tex` so it fills `target`
/// edge to edge without distortion.
pub fn cover_uv(tex: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if tex.x <= 0.0 || tex.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }
    let tex_aspect = tex.x / tex.y;
    let target_aspect = target.x / target.y;
    if tex_aspect > target_aspect {
        // Texture is wider than the slot: crop the sides.
        let used = target_aspect / tex_aspect;
        let margin = (1.0 - used) / 2.0;
        egui::Rect::from_min_max(egui::pos2(margin, 0.0), egui::pos2(1.0 - margin, 1.0))
    } else {
        let used = tex_aspect / target_aspect;
        let margin = (1.0 - used) / 2.0;
        egui::Rect::from_min_max(egui::pos2(0.0, margin), egui::pos2(1.0, 1.0 - margin))
    }
}

/// The running loop animation: an offset in `[0, half_width)` advanced at
/// `speed` px/s. Pausing freezes the offset in place, so resuming never
/// restarts the pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollLoop {
    half_width: f32,
    speed: f32,
    direction: ScrollDirection,
    offset: f32,
    paused: bool,
}

impl ScrollLoop {
    pub fn new(half_width: f32, speed: f32, direction: ScrollDirection) -> Self {
        debug_assert!(half_width > 0.0 && speed > 0.0);
        Self {
            half_width,
            speed,
            direction,
            offset: 0.0,
            paused: false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.paused && self.half_width > 0.0 {
            self.offset = (self.offset + self.speed * dt.max(0.0)) % self.half_width;
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

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Seconds one pass takes to cover a single copy of the strip.
    pub fn period_secs(&self) -> f32 {
        self.half_width / self.speed
    }

    /// Horizontal translation applied to the strip origin this frame.
    pub fn translation(&self) -> f32 {
        match self.direction {
            ScrollDirection::Left => -self.offset,
            ScrollDirection::Right => self.offset - self.half_width,
        }
    }

    /// Translation at the start of a pass.
    pub fn start_translation(&self) -> f32 {
        match self.direction {
            ScrollDirection::Left => 0.0,
            ScrollDirection::Right => -self.half_width,
        }
    }

    /// Translation each pass sweeps toward before wrapping.
    pub fn target_translation(&self) -> f32 {
        match self.direction {
            ScrollDirection::Left => -self.half_width,
            ScrollDirection::Right => 0.0,
        }
    }
}

/// The marquee widget. All contract logic (settlement, loop arithmetic,
/// hover pause, click effects) lives in public methods driven by [`ui`]
/// each frame, so behavior is exercisable without a UI context.
///
/// [`ui`]: Marquee::ui
pub struct Marquee {
    config: MarqueeConfig,
    settlement: Settlement,
    scroll: Option<ScrollLoop>,
    effects: EffectArena,
    glow: Tween,
    hovered: bool,
    reduced_motion: bool,
    placeholder: Option<TextureHandle>,
}

impl Marquee {
    pub fn new(config: MarqueeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let slots = config.images.len() * 2;
        Ok(Self {
            config,
            settlement: Settlement::new(slots),
            scroll: None,
            effects: EffectArena::new(slots),
            glow: Tween::fixed(0.0),
            hovered: false,
            reduced_motion: false,
            placeholder: None,
        })
    }

    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    pub fn scroll(&self) -> Option<&ScrollLoop> {
        self.scroll.as_ref()
    }

    pub fn effects(&self) -> &EffectArena {
        &self.effects
    }

    pub fn settlement(&self) -> &Settlement {
        &self.settlement
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.as_ref().is_some_and(|s| !s.is_paused())
    }

    /// The image rendered at a strip slot. Slots `i` and `i + N` show the
    /// same content; that identity is what makes the wrap seamless.
    pub fn slot_spec(&self, slot: usize) -> Option<&ImageSpec> {
        let n = self.config.images.len();
        if n == 0 || slot >= 2 * n {
            return None;
        }
        self.config.images.get(slot % n)
    }

    /// Replaces the configuration. The running loop and every effect are
    /// cancelled before any new state is established, then settlement
    /// starts over for the new image set.
    pub fn set_config(&mut self, config: MarqueeConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.scroll = None;
        self.effects.resize(config.images.len() * 2);
        self.effects.clear();
        self.settlement = Settlement::new(config.images.len() * 2);
        self.glow = Tween::fixed(0.0);
        self.hovered = false;
        self.config = config;
        log::debug!("marquee reconfigured, waiting for images to settle");
        Ok(())
    }

    /// When on, the entrance stagger and perpetual bobs are skipped; the
    /// strip still scrolls since that is the content itself.
    pub fn set_reduced_motion(&mut self, on: bool) {
        if self.reduced_motion == on {
            return;
        }
        self.reduced_motion = on;
        if on {
            self.effects.clear();
        } else if self.scroll.is_some() {
            for slot in 0..self.effects.len() {
                self.effects.start_bob(slot);
            }
        }
    }

    /// Records one slot's fetch outcome. Settlement is terminal per slot;
    /// when the last slot settles the scroll loop starts. Driven by the
    /// per-frame poll in [`Marquee::ui`].
    pub fn record_load(&mut self, slot: usize, state: LoadState) {
        if !self.settlement.record(slot, state) {
            return;
        }
        if state == LoadState::Failed {
            if let Some(spec) = self.slot_spec(slot) {
                log::warn!("image failed to load: {}", spec.uri);
            }
        }
        if self.settlement.all_settled() {
            self.start_scroll();
        }
    }

    /// Applies the bounded settlement wait. Slots still pending once the
    /// deadline passes are treated as failed so the loop can start.
    pub fn poll_settle_deadline(&mut self, now: f64) {
        if self.scroll.is_some() || self.config.images.is_empty() {
            return;
        }
        let forced = self.settlement.poll_deadline(now);
        if forced > 0 {
            log::warn!(
                "{forced} image(s) unsettled after {:.0}s, scrolling with placeholders",
                images::SETTLE_TIMEOUT_SECS
            );
            if self.settlement.all_settled() {
                self.start_scroll();
            }
        }
    }

    /// Pointer entered or left the container. Entering pauses the loop
    /// where it stands and brightens the glow; leaving resumes from the
    /// same offset.
    pub fn set_hovered(&mut self, hovered: bool) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        if let Some(scroll) = &mut self.scroll {
            if hovered {
                scroll.pause();
            } else {
                scroll.resume();
            }
        }
        let target = if hovered { 1.0 } else { 0.0 };
        self.glow.retarget(target, GLOW_SECS, Ease::CubicOut);
    }

    /// One-shot click response for a strip slot, either copy.
    pub fn trigger_click(&mut self, slot: usize) {
        let Some(spec) = self.slot_spec(slot) else {
            return;
        };
        log::debug!("menu item clicked: {}", spec.alt);
        self.effects.click(slot);
    }

    /// Advances every owned animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.clamp(0.0, 0.1);
        self.glow.tick(dt);
        self.effects.tick(dt);
        if let Some(scroll) = &mut self.scroll {
            scroll.tick(dt);
        }
    }

    fn start_scroll(&mut self) {
        if self.config.images.is_empty() || self.scroll.is_some() {
            return;
        }
        let widths = strip_slot_widths(&self.config.images);
        let total = strip_width(&widths, self.config.style.item_gap);
        let mut scroll = ScrollLoop::new(total / 2.0, self.config.speed, self.config.direction);
        if self.hovered {
            // Pointer was already parked on the strip while it loaded.
            scroll.pause();
        }
        log::info!(
            "marquee scrolling: {} items, strip {total:.0}pt, loop {:.1}s",
            widths.len(),
            scroll.period_secs()
        );
        self.scroll = Some(scroll);
        if !self.reduced_motion {
            for slot in 0..self.effects.len() {
                self.effects.start_entrance(slot);
                self.effects.start_bob(slot);
            }
        }
    }

    /// Renders the strip. An empty image list renders nothing at all and
    /// returns `None`.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<egui::Response> {
        if self.config.images.is_empty() {
            return None;
        }

        let size = egui::vec2(ui.available_width(), self.config.height);
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

        let (dt, now) = ui.input(|i| (i.stable_dt, i.time));
        self.poll_loads(ui.ctx());
        self.poll_settle_deadline(now);
        self.set_hovered(ui.rect_contains_pointer(rect));
        self.advance(dt);

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }
        Some(response)
    }

    fn poll_loads(&mut self, ctx: &egui::Context) {
        if self.scroll.is_some() {
            return;
        }
        let n = self.config.images.len();
        for slot in 0..2 * n {
            if self.settlement.state(slot).settled() {
                continue;
            }
            let uri = self.config.images[slot % n].uri.clone();
            let (state, _) = images::poll_uri(ctx, &uri);
            self.record_load(slot, state);
        }
    }

    fn paint(&mut self, ui: &mut egui::Ui, rect: egui::Rect) {
        self.paint_frame(ui, rect);

        if self.placeholder.is_none()
            && (0..self.settlement.len()).any(|s| self.settlement.state(s) == LoadState::Failed)
        {
            self.placeholder = Some(images::placeholder_texture(ui.ctx()));
        }

        let style = self.config.style.clone();
        let item_h = (rect.height() - 2.0 * STRIP_PADDING).max(1.0);
        let translation = self.scroll.as_ref().map_or(0.0, ScrollLoop::translation);
        let mut x = rect.left() + STRIP_PADDING + translation;
        let center_y = rect.center().y;

        let painter = ui.painter().with_clip_rect(rect);
        let n = self.config.images.len();
        let mut clicked = None;

        for slot in 0..2 * n {
            let spec = &self.config.images[slot % n];
            let sprite = self.effects.sample(slot);
            let item_rect = egui::Rect::from_center_size(
                egui::pos2(x + spec.width / 2.0, center_y + sprite.dy),
                egui::vec2(spec.width * sprite.scale, item_h * sprite.scale),
            );
            x += spec.width + style.item_gap;

            if item_rect.right() < rect.left() || item_rect.left() > rect.right() {
                continue;
            }

            let id = ui.id().with(("marquee_item", slot));
            let item_response = ui
                .interact(item_rect.intersect(rect), id, egui::Sense::click())
                .on_hover_text(spec.alt.as_str());
            if item_response.clicked() {
                clicked = Some(slot);
            }

            paint_item(
                &painter,
                ui.ctx(),
                spec,
                self.settlement.state(slot),
                self.placeholder.as_ref(),
                item_rect,
                sprite,
                item_response.hovered(),
                &style,
            );
        }

        if let Some(slot) = clicked {
            self.trigger_click(slot);
        }
    }

    fn paint_frame(&self, ui: &egui::Ui, rect: egui::Rect) {
        let style = &self.config.style;
        let glow = self.glow.value();
        let halo = blend_color(style.shadow_color, style.glow_color, glow);
        let painter = ui.painter();
        for layer in (1..=4).rev() {
            let spread = layer as f32 * 3.0;
            let alpha = (0.10 + 0.10 * glow) / layer as f32;
            painter.rect_filled(
                rect.translate(egui::vec2(0.0, layer as f32 * 2.0))
                    .expand(spread),
                style.corner_radius + spread,
                halo.gamma_multiply(alpha),
            );
        }
        painter.rect_filled(rect, style.corner_radius, style.fill);
    }
}

#[allow(clippy::too_many_arguments)]
fn paint_item(
    painter: &egui::Painter,
    ctx: &egui::Context,
    spec: &ImageSpec,
    state: LoadState,
    placeholder: Option<&TextureHandle>,
    rect: egui::Rect,
    sprite: Sprite,
    hovered: bool,
    style: &MarqueeStyle,
) {
    let tint = Color32::WHITE.gamma_multiply(sprite.alpha);
    let texture: Option<SizedTexture> = match state {
        LoadState::Failed => placeholder.map(SizedTexture::from_handle),
        _ => images::poll_uri(ctx, &spec.uri).1,
    };

    match texture {
        Some(texture) => {
            let mut mesh = egui::Mesh::with_texture(texture.id);
            mesh.add_rect_with_uv(rect, cover_uv(texture.size, rect.size()), tint);
            if sprite.rotation != 0.0 {
                mesh.rotate(egui::emath::Rot2::from_angle(sprite.rotation), rect.center());
            }
            painter.add(egui::Shape::mesh(mesh));
        }
        None => {
            // Still fetching: a quiet skeleton card keeps the layout stable.
            painter.rect_filled(
                rect,
                ITEM_CORNER,
                Color32::from_gray(222).gamma_multiply(sprite.alpha),
            );
        }
    }

    if hovered {
        painter.rect_stroke(
            rect,
            ITEM_CORNER,
            (3.0, style.glow_color),
            egui::StrokeKind::Inside,
        );
        painter.circle_filled(
            egui::pos2(rect.right() - 10.0, rect.top() + 10.0),
            4.0,
            style.highlight,
        );
    }
}

fn blend_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_unmultiplied(
        ch(a.r(), b.r()),
        ch(a.g(), b.g()),
        ch(a.b(), b.b()),
        ch(a.a(), b.a()),
    )
}
