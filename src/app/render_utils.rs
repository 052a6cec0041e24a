use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke};

use crate::corpus::Gender;

pub(super) const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
pub(super) const TRACK: Color32 = Color32::from_rgb(52, 60, 72);
pub(super) const EDGE_BASE: Color32 = Color32::from_rgb(148, 163, 184);

pub(super) fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

pub(super) fn gender_tint(gender: Gender) -> Color32 {
    match gender {
        Gender::Female => Color32::from_rgb(198, 40, 40),
        Gender::Male => Color32::from_rgb(29, 78, 216),
        Gender::Unknown => Color32::from_rgb(75, 85, 99),
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

    let step = 56.0;
    let stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(60, 70, 80, 70));

    let mut x = rect.left() + step;
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
        x += step;
    }

    let mut y = rect.top() + step;
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
        y += step;
    }
}
