use super::model::{Point, Rect, SceneLayout, State};
use super::{BEAM_WIDTH, SUN_GLOW_RADIUS, SUN_RADIUS, SUN_RAY_COUNT, SUN_RAY_LENGTH};
use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface};
use palette::Srgba;
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

struct SceneRenderer<'a> {
    layout: &'a SceneLayout,
    colors: &'a ThemeColors,
}

impl<'a> SceneRenderer<'a> {
    fn new(layout: &'a SceneLayout, colors: &'a ThemeColors) -> Self {
        Self { layout, colors }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_sun(cr)?;
        self.draw_ground(cr)?;
        self.draw_shadow(cr)?;
        self.draw_beam(cr)?;
        self.draw_object(cr)?;
        Ok(())
    }

    fn draw_sun(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Point { x, y } = self.layout.sun;

        set_color(cr, self.colors.sun_glow);
        cr.arc(x, y, SUN_GLOW_RADIUS, 0.0, 2.0 * PI);
        cr.fill()?;

        set_color(cr, self.colors.sun);
        cr.arc(x, y, SUN_RADIUS * 0.6, 0.0, 2.0 * PI);
        cr.fill()?;

        cr.set_line_width(2.0);
        cr.set_line_cap(cairo::LineCap::Round);
        let (inner, outer) = (SUN_RADIUS * 0.8, SUN_RADIUS * 0.8 + SUN_RAY_LENGTH);
        for i in 0..SUN_RAY_COUNT {
            let angle = i as f64 * 2.0 * PI / SUN_RAY_COUNT as f64;
            let (dx, dy) = (angle.cos(), angle.sin());
            cr.move_to(x + inner * dx, y + inner * dy);
            cr.line_to(x + outer * dx, y + outer * dy);
        }
        cr.stroke()
    }

    fn draw_ground(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, self.colors.ground);
        let ground = self.layout.ground;
        rounded_rect(cr, ground, ground.height / 2.0);
        cr.fill()
    }

    fn draw_shadow(&self, cr: &Context) -> Result<(), cairo::Error> {
        let shadow = self.layout.shadow;
        if shadow.width <= 0.0 {
            return Ok(());
        }
        set_color(cr, self.colors.shadow);
        rounded_rect(cr, shadow, shadow.height / 2.0);
        cr.fill()
    }

    fn draw_beam(&self, cr: &Context) -> Result<(), cairo::Error> {
        let Some((from, to)) = self.layout.beam else {
            return Ok(());
        };
        set_color(cr, self.colors.beam);
        cr.set_line_width(BEAM_WIDTH);
        cr.move_to(from.x, from.y);
        cr.line_to(to.x, to.y);
        cr.stroke()
    }

    fn draw_object(&self, cr: &Context) -> Result<(), cairo::Error> {
        set_color(cr, self.colors.object);

        let body = self.layout.body;
        rounded_rect(cr, body, body.width / 2.0);
        cr.fill()?;

        let head = self.layout.head;
        cr.arc(head.x, head.y, self.layout.head_radius, 0.0, 2.0 * PI);
        cr.fill()
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let radius = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    cr.new_sub_path();
    cr.arc(right - radius, top + radius, radius, -PI / 2.0, 0.0);
    cr.arc(right - radius, bottom - radius, radius, 0.0, PI / 2.0);
    cr.arc(left + radius, bottom - radius, radius, PI / 2.0, PI);
    cr.arc(left + radius, top + radius, radius, PI, 3.0 * PI / 2.0);
    cr.close_path();
}

pub fn draw(cr: &Context, layout: &SceneLayout, colors: &ThemeColors) -> Result<(), cairo::Error> {
    SceneRenderer::new(layout, colors).draw(cr)
}

/// Renders the diagram for the current state off-screen.
pub fn render_png(
    state: &State,
    colors: &ThemeColors,
    width: i32,
    height: i32,
    path: &Path,
) -> Result<(), SnapshotError> {
    let surface = render_surface(state, colors, width, height)?;
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}x{} snapshot to {}", width, height, path.display());
    Ok(())
}

fn render_surface(
    state: &State,
    colors: &ThemeColors,
    width: i32,
    height: i32,
) -> Result<ImageSurface, cairo::Error> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&surface)?;
        set_color(&cr, colors.background);
        cr.paint()?;

        let layout = state.layout(width as f64, height as f64);
        draw(&cr, &layout, colors)?;
    }
    surface.flush();
    Ok(surface)
}
