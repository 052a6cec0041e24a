use eframe::egui::Color32;

pub fn display_title(raw: &str) -> String {
    raw.replace('_', " ")
}

pub fn hsl_color(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hue = hue.rem_euclid(360.0);
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let secondary = chroma * (1.0 - ((hue / 60.0).rem_euclid(2.0) - 1.0).abs());

    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };

    let offset = lightness - chroma / 2.0;
    Color32::from_rgb(
        ((r + offset) * 255.0).clamp(0.0, 255.0) as u8,
        ((g + offset) * 255.0).clamp(0.0, 255.0) as u8,
        ((b + offset) * 255.0).clamp(0.0, 255.0) as u8,
    )
}
