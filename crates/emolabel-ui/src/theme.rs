//! Dark annotation theme.

use egui::{Color32, Rounding, Stroke};
use emolabel_core::Rgb;

pub struct Theme;

impl Theme {
    pub const FONT_XS: f32 = 11.0;
    pub const FONT_SM: f32 = 13.0;
    pub const FONT_LG: f32 = 18.0;

    pub const SPACE_XS: f32 = 4.0;
    pub const SPACE_SM: f32 = 8.0;
    pub const SPACE_MD: f32 = 16.0;

    pub const RADIUS: f32 = 6.0;

    pub const fn bg() -> Color32 {
        Color32::from_rgb(20, 21, 26)
    }
    pub const fn bg1() -> Color32 {
        Color32::from_rgb(30, 32, 38)
    }
    pub const fn bg2() -> Color32 {
        Color32::from_rgb(42, 44, 52)
    }
    pub const fn t1() -> Color32 {
        Color32::from_rgb(232, 232, 236)
    }
    pub const fn t2() -> Color32 {
        Color32::from_rgb(150, 152, 160)
    }
    pub const fn accent() -> Color32 {
        Color32::from_rgb(86, 130, 255)
    }
    pub const fn playhead() -> Color32 {
        Color32::from_rgb(255, 88, 85)
    }
    pub const fn warning() -> Color32 {
        Color32::from_rgb(255, 184, 48)
    }

    /// Catalog color as an egui color.
    pub const fn emotion(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb.r, rgb.g, rgb.b)
    }

    /// Return a color with replaced alpha.
    pub const fn with_alpha(c: Color32, a: u8) -> Color32 {
        Color32::from_rgba_premultiplied(
            (c.r() as u16 * a as u16 / 255) as u8,
            (c.g() as u16 * a as u16 / 255) as u8,
            (c.b() as u16 * a as u16 / 255) as u8,
            a,
        )
    }

    /// Black or white text, whichever reads better on `fill`.
    pub fn text_on(fill: Color32) -> Color32 {
        let luma = 0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
        if luma > 150.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }

    pub fn panel_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::bg1())
            .inner_margin(egui::Margin::same(Self::SPACE_SM))
    }

    pub fn apply(ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = egui::Visuals::dark();

        visuals.panel_fill = Self::bg1();
        visuals.window_fill = Self::bg2();
        visuals.extreme_bg_color = Self::bg();

        for widget in [
            &mut visuals.widgets.inactive,
            &mut visuals.widgets.hovered,
            &mut visuals.widgets.active,
        ] {
            widget.rounding = Rounding::same(Self::RADIUS);
        }
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, Self::accent());
        visuals.selection.stroke = Stroke::new(1.0, Self::accent());

        style.interaction.tooltip_delay = 0.2;
        ctx.set_style(style);
    }
}
