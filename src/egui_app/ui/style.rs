//! Dark rectilinear palette for the window.

use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

use crate::egui_app::state::ResultTone;

/// Colours shared by the window chrome and the result line.
#[derive(Clone, Copy)]
pub struct Palette {
    /// Window and preview background.
    pub bg_primary: Color32,
    /// Panel background.
    pub bg_secondary: Color32,
    /// Button fill.
    pub bg_tertiary: Color32,
    /// Widget outline.
    pub panel_outline: Color32,
    /// Default text.
    pub text_primary: Color32,
    /// Hints and placeholders.
    pub text_muted: Color32,
    /// Selection highlight.
    pub accent_ice: Color32,
    /// Fake verdicts and errors.
    pub warning: Color32,
    /// Real verdicts.
    pub success: Color32,
}

/// The dark palette.
pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        bg_tertiary: Color32::from_rgb(42, 44, 48),
        panel_outline: Color32::from_rgb(38, 42, 48),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(200, 128, 96),
        success: Color32::from_rgb(102, 176, 136),
    }
}

/// Recolour `visuals` with square widgets and the dark palette.
pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.error_fg_color = palette.warning;
    visuals.warn_fg_color = palette.warning;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        set_rectilinear(widget, palette);
    }
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

/// Thin frame drawn around the preview region.
pub fn preview_border() -> Stroke {
    Stroke::new(1.0, palette().text_muted)
}

/// Text colour for a result line.
pub fn result_color(tone: ResultTone) -> Color32 {
    let palette = palette();
    match tone {
        ResultTone::Hint => palette.text_muted,
        ResultTone::Real => palette.success,
        ResultTone::Fake | ResultTone::Error => palette.warning,
    }
}
