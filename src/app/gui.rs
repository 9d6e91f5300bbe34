use super::FornoApp;
use super::PAGE_FILL;
use eframe::App;
use eframe::Frame;
use egui::Align2;
use egui::Color32;
use egui::FontId;
use egui::RichText;

impl App for FornoApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🍕").size(20.0));
                ui.label(RichText::new("Forno").strong().size(16.0));
                ui.separator();
                ui.label("Wood-fired pizza, delivered fast");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut reduced = self.prefs.reduced_motion;
                    if ui
                        .checkbox(&mut reduced, "Reduce motion")
                        .on_hover_text("Skip the decorative animations")
                        .changed()
                    {
                        self.prefs.reduced_motion = reduced;
                        if let Some(gallery) = &mut self.gallery {
                            gallery.set_reduced_motion(reduced);
                        }
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(PAGE_FILL))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink(false)
                    .show(ui, |ui| {
                        hero(ui);
                        if let Some(gallery) = &mut self.gallery {
                            gallery.ui(ui);
                        }
                        footer(ui);
                    });
            });

        if let Some(msg) = self.error_message.clone() {
            egui::Window::new("configuration error")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(msg);
                    if ui.button("close").clicked() {
                        self.hide_error();
                    }
                });
        }

        // continuous repaint for animation
        ctx.request_repaint();
    }
}

fn hero(ui: &mut egui::Ui) {
    let size = egui::vec2(ui.available_width(), 440.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

    let button = egui::Rect::from_center_size(
        rect.center() + egui::vec2(0.0, 90.0),
        egui::vec2(180.0, 48.0),
    );
    let response = ui.interact(button, ui.id().with("order_now"), egui::Sense::click());
    let time = ui.input(|i| i.time);

    let painter = ui.painter();
    painter.text(
        rect.center() - egui::vec2(0.0, 60.0),
        Align2::CENTER_CENTER,
        "Hot from the wood-fired oven",
        FontId::proportional(56.0),
        Color32::from_rgb(40, 30, 25),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 6.0),
        Align2::CENTER_CENTER,
        "Neapolitan pies and fresh-squeezed drinks, made to order",
        FontId::proportional(20.0),
        Color32::from_gray(95),
    );

    // The order button pulses a warm stroke until it gets attention.
    let pulse = ((time * 2.0).sin() * 0.5 + 0.5) as f32;
    let glow = Color32::from_rgb(
        255,
        (140.0 + pulse * 60.0) as u8,
        (60.0 + pulse * 40.0) as u8,
    );
    let fill = if response.hovered() {
        Color32::from_rgb(220, 70, 20)
    } else {
        Color32::from_rgb(255, 107, 53)
    };
    painter.rect_filled(button, 24.0, fill);
    painter.rect_stroke(button, 24.0, (3.0, glow), egui::StrokeKind::Outside);
    painter.text(
        button.center(),
        Align2::CENTER_CENTER,
        "Order Now",
        FontId::proportional(18.0),
        Color32::WHITE,
    );
    if response.clicked() {
        log::info!("order flow requested");
    }
}

fn footer(ui: &mut egui::Ui) {
    let size = egui::vec2(ui.available_width(), 160.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Color32::from_rgb(40, 30, 25));
    painter.text(
        rect.center() - egui::vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        "Forno · Via del Forno 12 · Open 11:00–23:00",
        FontId::proportional(14.0),
        Color32::from_gray(220),
    );
    painter.text(
        rect.center() + egui::vec2(0.0, 12.0),
        Align2::CENTER_CENTER,
        "© 2026 Forno. All dough reserved.",
        FontId::proportional(12.0),
        Color32::from_gray(150),
    );
}
