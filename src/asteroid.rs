use crate::Coords;
use crate::config::{ASTEROID_MAX_SPEED, ASTEROID_MIN_SPEED, ASTEROID_SIZE, GRAY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::render::{Canvas, Rect};
use log::debug;
use rand::Rng;

/// Falling obstacle. Purely scenery: the snake never collides with it.
pub struct Asteroid {
    x: f32,
    y: f32,
    speed: f32,
}

impl Asteroid {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (x, y) = entry_point(rng);
        let speed = rng.gen_range(ASTEROID_MIN_SPEED..ASTEROID_MAX_SPEED);
        Asteroid { x, y, speed }
    }

    pub fn position(&self) -> Coords {
        (self.x, self.y)
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Falls by `speed * dt`. Once below the bottom edge it re-enters from
    /// somewhere above the top, keeping its speed.
    pub fn move_step<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.y += self.speed * dt;

        if self.y > VIEWPORT_HEIGHT as f32 {
            let (x, y) = entry_point(rng);
            debug!("Asteroid left the screen, re-entering at ({}, {})", x, y);
            self.x = x;
            self.y = y;
        }
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.fill_rect(Rect::new(self.x as i32, self.y as i32, ASTEROID_SIZE, ASTEROID_SIZE), GRAY);
    }

    #[cfg(test)]
    pub fn at(x: f32, y: f32, speed: f32) -> Self {
        Asteroid { x, y, speed }
    }
}

// Whole-pixel position anywhere across the width, up to one screen above the top
fn entry_point<R: Rng + ?Sized>(rng: &mut R) -> Coords {
    let x = rng.gen_range(0..=VIEWPORT_WIDTH);
    let y = rng.gen_range(-VIEWPORT_HEIGHT..=0);
    (x as f32, y as f32)
}
