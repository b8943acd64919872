use crate::Coords;
use crate::config::{GREEN, SNAKE_SIZE, SNAKE_SPEED, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::render::{Canvas, Rect};
use log::debug;
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit vector in screen space (y grows downwards)
    pub fn unit(self) -> (f32, f32) {
        match self {
            Up => (0.0, -1.0),
            Down => (0.0, 1.0),
            Left => (-1.0, 0.0),
            Right => (1.0, 0.0),
        }
    }
}

pub struct Snake {
    body: Vec<Coords>, // head first
    direction: Direction,
    next_direction: Direction,
    speed: f32,
}

impl Snake {
    pub fn new() -> Self {
        let center = ((VIEWPORT_WIDTH / 2) as f32, (VIEWPORT_HEIGHT / 2) as f32);
        Snake { body: vec![center], direction: Right, next_direction: Right, speed: SNAKE_SPEED }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    /// Advances the head by `speed * dt` pixels along the pending direction.
    /// Movement is continuous, the body keeps its length.
    pub fn move_step(&mut self, dt: f32) {
        self.direction = self.next_direction;

        let (ux, uy) = self.direction.unit();
        let distance = self.speed * dt;
        let (hx, hy) = self.head();

        self.body.insert(0, (hx + ux * distance, hy + uy * distance));
        self.body.pop();
    }

    pub fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }

    /// Queues a turn for the next step. Turning straight back is ignored,
    /// checked against the direction of the last step, not the queued one.
    pub fn change_direction(&mut self, new_direction: Direction) {
        match (&new_direction, &self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {
                debug!("Ignoring turn {:?} while heading {:?}", new_direction, self.direction);
            },
            _ => self.next_direction = new_direction,
        };
    }

    pub fn check_collision(&self) -> bool {
        let (hx, hy) = self.head();
        let size = SNAKE_SIZE as f32;

        let out_of_bounds = hx < 0.0 || hx >= VIEWPORT_WIDTH as f32 ||
                            hy < 0.0 || hy >= VIEWPORT_HEIGHT as f32;

        out_of_bounds || self.body[1..].iter()
            .any(|(x, y)| (hx - x).abs() < size && (hy - y).abs() < size)
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        for (x, y) in &self.body {
            canvas.fill_rect(Rect::new(*x as i32, *y as i32, SNAKE_SIZE, SNAKE_SIZE), GREEN);
        }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, direction: Direction) -> Self {
        Snake { body, direction, next_direction: direction, speed: SNAKE_SPEED }
    }
}
