//! Screen to world coordinate mapping.

/// Integer world (tile grid) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldCoord {
    pub x: i32,
    pub y: i32,
}

impl WorldCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, x: i32, y: i32) -> f64 {
        let dx = f64::from(self.x - x);
        let dy = f64::from(self.y - y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Maps screen pixels to world coordinates.
pub trait ScreenTransform {
    fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> WorldCoord;
}

/// Pan and zoom viewport over the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// World coordinate shown at the top-left screen pixel.
    pub offset: (f64, f64),
    /// Screen pixels per world unit (1.0 = one tile per pixel).
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: (0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(offset: (f64, f64), scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Zooms around a screen point, keeping the world point under it fixed.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        let world_x = self.offset.0 + screen_x / self.scale;
        let world_y = self.offset.1 + screen_y / self.scale;
        self.scale = (self.scale * factor).clamp(0.1, 64.0);
        self.offset = (
            world_x - screen_x / self.scale,
            world_y - screen_y / self.scale,
        );
    }

    pub fn pan(&mut self, dx_pixels: f64, dy_pixels: f64) {
        self.offset.0 -= dx_pixels / self.scale;
        self.offset.1 -= dy_pixels / self.scale;
    }

    /// Moves the viewport so the world point sits at the middle of a
    /// `screen_width` x `screen_height` surface.
    pub fn center_on(&mut self, world_x: f64, world_y: f64, screen_width: f64, screen_height: f64) {
        self.offset = (
            world_x - screen_width / 2.0 / self.scale,
            world_y - screen_height / 2.0 / self.scale,
        );
    }
}

impl ScreenTransform for Viewport {
    #[allow(clippy::cast_possible_truncation)]
    fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> WorldCoord {
        let x = (self.offset.0 + screen_x / self.scale).floor() as i32;
        let y = (self.offset.1 + screen_y / self.scale).floor() as i32;
        WorldCoord { x, y }
    }
}
