//! Bordered preview region and the aspect-preserving fit.

use eframe::egui::{
    Align2, Color32, FontId, Rect, Sense, StrokeKind, TextureId, Ui, Vec2, pos2,
};

use super::style;

/// Fixed size of the bordered preview region.
pub const PREVIEW_REGION: Vec2 = Vec2::new(400.0, 400.0);
/// Placeholder before any selection.
pub const NO_IMAGE_TEXT: &str = "No image selected.";
/// Placeholder when the selected file cannot be decoded.
pub const PREVIEW_UNAVAILABLE_TEXT: &str = "Preview unavailable.";

/// Largest size with the image's aspect ratio that fits inside `region`.
///
/// Small images are scaled up, large ones down.
pub fn fit_within(natural_size: [u32; 2], region: Vec2) -> Vec2 {
    let [width, height] = natural_size;
    if width == 0 || height == 0 {
        return Vec2::ZERO;
    }
    let (width, height) = (width as f32, height as f32);
    let scale = (region.x / width).min(region.y / height);
    Vec2::new(width * scale, height * scale)
}

/// What to draw inside the region.
pub enum PreviewContent<'a> {
    /// Uploaded image, fitted to the region by its natural size.
    Texture {
        /// Uploaded texture.
        id: TextureId,
        /// Width and height before downscaling.
        natural_size: [u32; 2],
    },
    /// Centred text instead of an image.
    Placeholder(&'a str),
}

/// Paint the bordered region with `content` inside.
pub fn render_preview(ui: &mut Ui, content: PreviewContent<'_>) {
    let palette = style::palette();
    let (rect, _) = ui.allocate_exact_size(PREVIEW_REGION, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, palette.bg_primary);
    match content {
        PreviewContent::Texture { id, natural_size } => {
            let inner = rect.shrink(style::preview_border().width);
            let image_rect =
                Rect::from_center_size(inner.center(), fit_within(natural_size, inner.size()));
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(id, image_rect, uv, Color32::WHITE);
        }
        PreviewContent::Placeholder(text) => {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                text,
                FontId::proportional(14.0),
                palette.text_muted,
            );
        }
    }
    painter.rect_stroke(rect, 0.0, style::preview_border(), StrokeKind::Inside);
}
