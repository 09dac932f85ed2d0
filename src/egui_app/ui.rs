//! egui renderer for the detector window.

pub mod preview;
pub mod style;

use eframe::egui::{self, Button, RichText, TextureHandle, TextureId, TextureOptions, Ui, Vec2};

use crate::egui_app::controller::DetectorController;
use crate::egui_app::state::PreviewState;
use preview::{NO_IMAGE_TEXT, PREVIEW_UNAVAILABLE_TEXT, PreviewContent};

/// Title bar text.
pub const WINDOW_TITLE: &str = "Deepfake Detection";
/// Initial inner size of the window.
pub const WINDOW_SIZE: Vec2 = Vec2::new(600.0, 400.0);
/// Initial top-left corner of the window.
pub const WINDOW_POSITION: [f32; 2] = [100.0, 100.0];
/// Room for the preview region, both buttons and the result line.
pub const MIN_WINDOW_SIZE: Vec2 = Vec2::new(420.0, 520.0);
const BUTTON_HEIGHT: f32 = 28.0;

struct PreviewTexture {
    generation: u64,
    handle: TextureHandle,
}

/// Renders the window from the controller's state and forwards clicks to it.
pub struct EguiApp {
    controller: DetectorController,
    visuals_set: bool,
    preview_tex: Option<PreviewTexture>,
}

impl EguiApp {
    /// Wrap `controller`; visuals are applied on the first frame.
    pub fn new(controller: DetectorController) -> Self {
        Self {
            controller,
            visuals_set: false,
            preview_tex: None,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    /// Upload the preview once per selection and hand back its texture id.
    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<(TextureId, [u32; 2])> {
        let PreviewState::Loaded(preview) = &self.controller.ui.preview else {
            self.preview_tex = None;
            return None;
        };
        let stale = self
            .preview_tex
            .as_ref()
            .is_none_or(|tex| tex.generation != preview.generation);
        if stale {
            let handle = ctx.load_texture(
                "preview_image",
                preview.image.clone(),
                TextureOptions::LINEAR,
            );
            self.preview_tex = Some(PreviewTexture {
                generation: preview.generation,
                handle,
            });
        }
        let natural_size = preview.natural_size;
        self.preview_tex
            .as_ref()
            .map(|tex| (tex.handle.id(), natural_size))
    }

    fn render_preview(&mut self, ui: &mut Ui) {
        let content = match self.preview_texture(ui.ctx()) {
            Some((id, natural_size)) => PreviewContent::Texture { id, natural_size },
            None => match self.controller.ui.preview {
                PreviewState::Unavailable { .. } => {
                    PreviewContent::Placeholder(PREVIEW_UNAVAILABLE_TEXT)
                }
                _ => PreviewContent::Placeholder(NO_IMAGE_TEXT),
            },
        };
        preview::render_preview(ui, content);
    }

    fn render_buttons(&mut self, ui: &mut Ui) {
        let size = [ui.available_width(), BUTTON_HEIGHT];
        if ui.add_sized(size, Button::new("Select Image")).clicked() {
            self.controller.select_image_via_dialog();
        }
        if ui.add_sized(size, Button::new("Predict")).clicked() {
            self.controller.predict_image();
        }
    }

    fn render_result(&self, ui: &mut Ui) {
        let Some(result) = &self.controller.ui.result else {
            ui.label("");
            return;
        };
        ui.label(RichText::new(&result.text).color(style::result_color(result.tone)));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                self.render_preview(ui);
                self.render_buttons(ui);
                self.render_result(ui);
            });
        });
    }
}
