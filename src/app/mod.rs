//! Application shell for the Forno storefront showcase.

pub mod effects;
pub mod gallery;
mod gui;
pub mod images;
pub mod marquee;
pub mod tween;

use crate::app::gallery::Gallery;

pub const APP_NAME: &str = "Forno";

/// Warm page tint behind every section.
pub const PAGE_FILL: egui::Color32 = egui::Color32::from_rgb(255, 250, 240);

/// Small user preferences persisted across runs.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct UiPrefs {
    pub reduced_motion: bool,
}

pub struct FornoApp {
    gallery: Option<Gallery>,
    prefs: UiPrefs,
    error_message: Option<String>,
}

impl FornoApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Image loader registration is process-wide capability setup; it
        // happens once here and is a no-op if this context already has
        // the loaders installed.
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let prefs: UiPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let (gallery, error_message) = match Gallery::new() {
            Ok(mut gallery) => {
                gallery.set_reduced_motion(prefs.reduced_motion);
                (Some(gallery), None)
            }
            Err(err) => {
                log::error!("gallery configuration rejected: {err}");
                (None, Some(err.to_string()))
            }
        };

        Self {
            gallery,
            prefs,
            error_message,
        }
    }

    fn hide_error(&mut self) {
        self.error_message = None;
    }
}
