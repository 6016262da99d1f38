use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const BG_PANEL: Color32 = Color32::from_rgb(24, 25, 28);
pub const BG_WIDGET: Color32 = Color32::from_rgb(38, 40, 45);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(50, 53, 60);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(205, 207, 210);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(130, 133, 140);

pub const ACCENT_TEAL: Color32 = Color32::from_rgb(64, 170, 160);
pub const ACCENT_AMBER: Color32 = Color32::from_rgb(212, 158, 60);
pub const ACCENT_RED: Color32 = Color32::from_rgb(190, 70, 70);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(60, 63, 72);

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.faint_bg_color = BG_WIDGET;
    visuals.extreme_bg_color = Color32::from_rgb(16, 17, 19);
    visuals.warn_fg_color = ACCENT_AMBER;
    visuals.error_fg_color = ACCENT_RED;
    visuals.hyperlink_color = ACCENT_TEAL;
    visuals.slider_trailing_fill = true;
    visuals.window_rounding = Rounding::same(6.0);

    visuals.widgets.noninteractive.bg_fill = BG_WIDGET;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT_TEAL);
    visuals.widgets.active.bg_stroke = Stroke::new(2.0, ACCENT_TEAL);

    visuals.selection = egui::style::Selection {
        bg_fill: ACCENT_TEAL.gamma_multiply(0.4),
        stroke: Stroke::new(1.0, ACCENT_TEAL),
    };

    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 180.0;

    style.text_styles = [
        (
            TextStyle::Small,
            FontId::new(11.0, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Heading,
            FontId::new(18.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();

    ctx.set_style(style);
}
