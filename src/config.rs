//! Fixed tuning values. There is a single difficulty and a single viewport,
//! so everything here is a compile-time constant.

use crate::render::Color;

pub const TITLE: &str = "Space Snake";

// Logical viewport, in pixels
pub const VIEWPORT_WIDTH: i32 = 800;
pub const VIEWPORT_HEIGHT: i32 = 600;

pub const TARGET_FPS: u32 = 120;

pub const SNAKE_SIZE: i32 = 20;
pub const SNAKE_SPEED: f32 = 150.0; // px/s

pub const ASTEROID_SIZE: i32 = 30;
pub const ASTEROID_COUNT: usize = 5;
pub const ASTEROID_MIN_SPEED: f32 = 50.0; // px/s
pub const ASTEROID_MAX_SPEED: f32 = 100.0;

pub const STARTING_LIVES: u32 = 3;
pub const SCORE_PER_SECOND: f32 = 60.0;

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const GRAY: Color = Color::new(128, 128, 128);
pub const MENU_GRAY: Color = Color::new(50, 50, 50);

// HUD and menu layout, in pixels
pub const LIVES_POS: (i32, i32) = (VIEWPORT_WIDTH - 120, 10);
pub const SCORE_POS: (i32, i32) = (VIEWPORT_WIDTH - 120, 50);
pub const PAUSED_TITLE_POS: (i32, i32) = (VIEWPORT_WIDTH / 2 - 50, VIEWPORT_HEIGHT / 2 - 50);
pub const GAME_OVER_TITLE_POS: (i32, i32) = (VIEWPORT_WIDTH / 2 - 70, VIEWPORT_HEIGHT / 2 - 50);
pub const RESUME_PROMPT_POS: (i32, i32) = (VIEWPORT_WIDTH / 2 - 100, VIEWPORT_HEIGHT / 2);
pub const QUIT_PROMPT_POS: (i32, i32) = (VIEWPORT_WIDTH / 2 - 80, VIEWPORT_HEIGHT / 2 + 50);
