use crate::config::PaletteConfig;
use crate::gui::diagram::{BEAM_ALPHA, GLOW_ALPHA, SHADOW_ALPHA};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub sun: Srgba<f64>,
    pub sun_glow: Srgba<f64>,
    pub object: Srgba<f64>,
    pub shadow: Srgba<f64>,
    pub ground: Srgba<f64>,
    pub beam: Srgba<f64>,
    pub background: Srgba<f64>,
}

impl ThemeColors {
    /// The configured palette is the only colour source for the diagram; the
    /// GTK theme only styles the widgets around it.
    pub fn from_palette(palette: &PaletteConfig) -> Self {
        Self {
            sun: palette.sun.with_alpha(1.0),
            sun_glow: palette.sun.with_alpha(GLOW_ALPHA),
            object: palette.object.with_alpha(1.0),
            shadow: palette.shadow.with_alpha(SHADOW_ALPHA),
            ground: palette.ground.with_alpha(1.0),
            beam: palette.beam.with_alpha(BEAM_ALPHA),
            background: palette.background.with_alpha(1.0),
        }
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.shadowcast-window {
    background-color: #0f172a;
    color: #e2e8f0;
}
.shadowcast-panel, .shadowcast-drawing-area {
    background-color: rgba(30, 41, 59, 0.5);
    border: 1px solid #334155;
    border-radius: 16px;
    padding: 24px;
}
.shadowcast-title {
    font-size: 1.8em;
    font-weight: bold;
    color: #22d3ee;
}
.shadowcast-value {
    font-weight: 600;
    color: #22d3ee;
}
.shadowcast-result {
    background-color: rgba(15, 23, 42, 0.7);
    border: 1px solid #334155;
    border-radius: 8px;
    padding: 16px;
}
.shadowcast-caption {
    font-size: 0.85em;
    letter-spacing: 1px;
    color: #94a3b8;
}
.shadowcast-readout {
    font-size: 1.6em;
    font-weight: 600;
    color: #67e8f9;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
