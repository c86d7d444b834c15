use crate::config::{Config, PaletteConfig};
use crate::gui::diagram::{
    GLYPH_BODY_HEIGHT, GLYPH_BODY_WIDTH, GLYPH_HEAD_RADIUS, GLYPH_HEIGHT, GLYPH_WIDTH,
    GROUND_THICKNESS, GROUND_WIDTH_FACTOR, OBJECT_OFFSET_FACTOR, SHADOW_THICKNESS,
    SUN_ORBIT_RADIUS, SUN_RADIUS,
};
use crate::gui::theme::ThemeColors;
use gnomon::{GeometryError, Inputs, Scene, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Canvas-space positions of everything in the diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLayout {
    pub sun: Point,
    pub ground: Rect,
    /// Box the person glyph is fitted into; its height is the display height.
    pub object: Rect,
    pub head: Point,
    pub head_radius: f64,
    pub body: Rect,
    pub shadow: Rect,
    /// From the top of the head to the tip of the shadow.
    pub beam: Option<(Point, Point)>,
}

impl SceneLayout {
    /// The object stands on the ground a tenth of the way in and casts its
    /// shadow to the right. The sun travels an elliptical arc that stays left
    /// of the object's axis: overhead at noon, level with the left edge at
    /// the horizon.
    pub fn calculate(scene: &Scene, viewport: &Viewport, width: f64, height: f64) -> Self {
        let ground_width = width * GROUND_WIDTH_FACTOR;
        let ground_left = (width - ground_width) / 2.0;
        let ground = Rect::new(
            ground_left,
            height - GROUND_THICKNESS,
            ground_width,
            GROUND_THICKNESS,
        );
        let feet_y = ground.y;

        let object_width = *viewport.object_width;
        let display_height = *scene.display_height;
        let object = Rect::new(
            ground_left + ground_width * OBJECT_OFFSET_FACTOR,
            feet_y - display_height,
            object_width,
            display_height,
        );
        let axis_x = object.x + object_width / 2.0;

        // glyph is stretched vertically to the display height
        let unit = display_height / GLYPH_HEIGHT;
        let head_radius = (GLYPH_HEAD_RADIUS * unit).min(object_width / 2.0);
        let body_width = object_width * GLYPH_BODY_WIDTH / GLYPH_WIDTH;
        let body_height = GLYPH_BODY_HEIGHT * unit;
        let body = Rect::new(
            axis_x - body_width / 2.0,
            feet_y - body_height,
            body_width,
            body_height,
        );

        let shadow = Rect::new(
            axis_x,
            feet_y - SHADOW_THICKNESS,
            *scene.display_shadow_length,
            SHADOW_THICKNESS,
        );

        let beam = scene
            .casts_sunbeam()
            .then(|| (Point::new(axis_x, object.y), Point::new(shadow.right(), feet_y)));

        let reach_x = (axis_x - SUN_RADIUS).max(0.0);
        let reach_y = SUN_ORBIT_RADIUS.min(height / 2.0 - SUN_RADIUS).max(0.0);
        let rotation = scene.sun_rotation.to_radians();
        let sun = Point::new(
            axis_x - reach_x * rotation.sin(),
            height / 2.0 - reach_y * rotation.cos(),
        );

        Self {
            sun,
            ground,
            object,
            head: Point::new(axis_x, object.y + head_radius),
            head_radius,
            body,
            shadow,
            beam,
        }
    }
}

/// Everything the window shows. The two inputs are the only values the user
/// changes; `scene` is recomputed from them on every mutation.
pub struct State {
    pub inputs: Inputs,
    pub defaults: Inputs,
    pub viewport: Viewport,
    pub zone: String,
    pub palette: PaletteConfig,
    pub scene: Scene,
}

impl State {
    pub fn new(config: &Config) -> Result<Self, GeometryError> {
        let inputs = config.inputs();
        let viewport = config.viewport();
        let zone = config.clock.zone.clone();
        let scene = Scene::compute(&inputs, &viewport, &zone)?;

        Ok(Self {
            inputs,
            defaults: inputs,
            viewport,
            zone,
            palette: config.palette,
            scene,
        })
    }

    pub fn set_height(&mut self, height: f64) {
        self.inputs.set_height(height);
        self.recompute();
    }

    pub fn set_time(&mut self, time: f64) {
        self.inputs.set_time(time);
        self.recompute();
    }

    pub fn reset(&mut self) {
        self.inputs = self.defaults;
        self.recompute();
    }

    /// Takes new defaults, viewport, zone and palette. The current inputs are
    /// kept.
    pub fn apply_config(&mut self, config: &Config) {
        self.defaults = config.inputs();
        self.viewport = config.viewport();
        self.zone = config.clock.zone.clone();
        self.palette = config.palette;
        self.recompute();
    }

    pub fn layout(&self, width: f64, height: f64) -> SceneLayout {
        SceneLayout::calculate(&self.scene, &self.viewport, width, height)
    }

    pub fn colors(&self) -> ThemeColors {
        ThemeColors::from_palette(&self.palette)
    }

    fn recompute(&mut self) {
        match Scene::compute(&self.inputs, &self.viewport, &self.zone) {
            Ok(scene) => self.scene = scene,
            Err(e) => log::error!("Failed to recompute scene: {}", e),
        }
    }
}
