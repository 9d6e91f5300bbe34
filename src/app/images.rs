//! Image descriptors, load settlement, and the shared placeholder.

use egui::load::{SizeHint, SizedTexture, TexturePoll};
use egui::{ColorImage, Context, TextureHandle, TextureOptions};

/// Longest time the strip waits for images before it starts moving.
/// Slots still pending at the deadline are treated as failed so a fetch
/// that never reports cannot stall the loop forever.
pub const SETTLE_TIMEOUT_SECS: f64 = 8.0;

/// Pixel size of the generated placeholder bitmap.
pub const PLACEHOLDER_SIZE: [usize; 2] = [300, 240];

/// One image in a showcase strip: where to fetch it, alt text shown on
/// hover, and its laid-out width in points.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSpec {
    pub uri: String,
    pub alt: String,
    pub width: f32,
}

impl ImageSpec {
    pub fn new(uri: impl Into<String>, alt: impl Into<String>, width: f32) -> Self {
        Self {
            uri: uri.into(),
            alt: alt.into(),
            width,
        }
    }
}

/// Terminal-or-not state of one strip slot's fetch. `Loaded` and `Failed`
/// both count as settled; only `Pending` gates the scroll start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

impl LoadState {
    pub fn settled(self) -> bool {
        !matches!(self, LoadState::Pending)
    }
}

/// Load bookkeeping for a rendered strip. One entry per strip slot, so
/// both copies of an image settle independently of each other's slot
/// index even though they share a fetch.
#[derive(Clone, Debug)]
pub struct Settlement {
    states: Vec<LoadState>,
    deadline: Option<f64>,
}

impl Settlement {
    pub fn new(len: usize) -> Self {
        Self {
            states: vec![LoadState::Pending; len],
            deadline: None,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn state(&self, slot: usize) -> LoadState {
        self.states.get(slot).copied().unwrap_or_default()
    }

    /// Records a poll result. Settlement is terminal: once a slot has
    /// settled, later polls cannot move it back to pending or flip its
    /// outcome. Returns true when this call settled the slot.
    pub fn record(&mut self, slot: usize, state: LoadState) -> bool {
        let Some(current) = self.states.get_mut(slot) else {
            return false;
        };
        if current.settled() || !state.settled() {
            return false;
        }
        *current = state;
        true
    }

    pub fn all_settled(&self) -> bool {
        self.states.iter().all(|s| s.settled())
    }

    /// Arms the bounded wait on first call and reports expiry. Once the
    /// deadline passes, every still-pending slot is forced to `Failed` and
    /// the method returns how many were forced.
    pub fn poll_deadline(&mut self, now: f64) -> usize {
        let deadline = *self.deadline.get_or_insert(now + SETTLE_TIMEOUT_SECS);
        if now < deadline {
            return 0;
        }
        let mut forced = 0;
        for s in &mut self.states {
            if !s.settled() {
                *s = LoadState::Failed;
                forced += 1;
            }
        }
        forced
    }
}

/// Asks the context's image loaders for `uri`. Fetching, decoding and
/// caching all live behind the loader registry; this is just the per-frame
/// poll that drives settlement.
pub fn poll_uri(ctx: &Context, uri: &str) -> (LoadState, Option<SizedTexture>) {
    match ctx.try_load_texture(uri, TextureOptions::LINEAR, SizeHint::default()) {
        Ok(TexturePoll::Ready { texture }) => (LoadState::Loaded, Some(texture)),
        Ok(TexturePoll::Pending { .. }) => (LoadState::Pending, None),
        Err(_) => (LoadState::Failed, None),
    }
}

/// Uploads the shared placeholder texture. Every failed slot shows this
/// same bitmap.
pub fn placeholder_texture(ctx: &Context) -> TextureHandle {
    ctx.load_texture("menu_placeholder", placeholder_bitmap(), TextureOptions::LINEAR)
}

/// A flat brand-orange card with a pale plate circle in the middle.
fn placeholder_bitmap() -> ColorImage {
    let (w, h) = (PLACEHOLDER_SIZE[0] as u32, PLACEHOLDER_SIZE[1] as u32);
    let mut img = image::RgbImage::from_pixel(w, h, image::Rgb([255, 107, 53]));
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let radius = h as f32 * 0.32;
    for (x, y, px) in img.enumerate_pixels_mut() {
        let d = ((x as f32 - cx).powi(2) + (y as f32 - cy).powi(2)).sqrt();
        if d < radius {
            *px = image::Rgb([255, 241, 230]);
        } else if d < radius + 3.0 {
            *px = image::Rgb([255, 210, 180]);
        }
    }
    ColorImage::from_rgb([w as usize, h as usize], img.as_raw())
}

/// The storefront's featured dishes and drinks.
pub fn featured_menu() -> Vec<ImageSpec> {
    [
        ("https://picsum.photos/300/240?random=1", "Margherita Pizza"),
        ("https://picsum.photos/300/240?random=2", "Fresh Orange Juice"),
        ("https://picsum.photos/300/240?random=3", "Pepperoni Pizza"),
        ("https://picsum.photos/300/240?random=4", "Iced Coffee"),
        ("https://picsum.photos/300/240?random=5", "Gourmet Pizza"),
        ("https://picsum.photos/300/240?random=6", "Fresh Smoothie"),
        ("https://picsum.photos/300/240?random=7", "Cheese Pizza"),
        ("https://picsum.photos/300/240?random=8", "Lemonade"),
    ]
    .into_iter()
    .map(|(uri, alt)| ImageSpec::new(uri, alt, 300.0))
    .collect()
}
