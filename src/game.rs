use std::{thread::sleep, time::{Duration, Instant}};

use crate::asteroid::Asteroid;
use crate::config::*;
use crate::error::GameError;
use crate::render::{Canvas, Rect};
use crate::snake::{Snake, Direction};
use crate::term::TermManager;

use log::info;
use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

/// What the player asked for, already decoded from the raw key events
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Close,
    TogglePause,
    Quit,
    Restart,
    Steer(Direction),
}

pub struct SpaceSnakeGame<R: Rng> {
    snake: Snake,
    asteroids: Vec<Asteroid>,
    score: u64,
    lives: u32,
    state: GameState,
    exit: bool,
    rng: R,
}

impl<R: Rng> SpaceSnakeGame<R> {
    pub fn new(mut rng: R) -> Self {
        let asteroids = (0..ASTEROID_COUNT).map(|_| Asteroid::new(&mut rng)).collect();

        SpaceSnakeGame {
            snake: Snake::new(),
            asteroids,
            score: 0,
            lives: STARTING_LIVES,
            state: GameState::Running,
            exit: false,
            rng,
        }
    }

    /// Frame loop: input, simulation, drawing, then sleep out the rest of
    /// the frame. The simulation step uses the measured wall-clock delta.
    pub fn run(&mut self, term: &mut TermManager) -> Result<(), GameError> {
        let frame_budget = Duration::from_secs(1) / TARGET_FPS;
        let mut last_time = Instant::now();

        info!("Game started");

        loop {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last_time).as_secs_f32();
            last_time = frame_start;

            for input in term.poll_inputs()? {
                self.handle_input(input);
            }

            if self.should_exit() {
                break;
            }

            self.update(dt);
            self.draw(term);
            term.present()?;

            if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                sleep(rest);
            }
        }

        info!("Exiting with score {}", self.score);
        Ok(())
    }

    pub fn handle_input(&mut self, input: Input) {
        use GameState::*;

        match (input, self.state) {
            (Input::Close, _) => self.exit = true,
            (Input::TogglePause, Running) => {
                info!("Paused");
                self.state = Paused;
            },
            (Input::TogglePause, Paused) => {
                info!("Resumed");
                self.state = Running;
            },
            (Input::Quit, Paused | GameOver) => self.exit = true,
            (Input::Restart, Paused | GameOver) => self.restart(),
            (Input::Steer(dir), Running) => self.snake.change_direction(dir),
            _ => {}
        }
    }

    /// One simulation step. Does nothing unless the game is running.
    pub fn update(&mut self, dt: f32) {
        if self.state != GameState::Running {
            return;
        }

        self.snake.move_step(dt);
        for asteroid in &mut self.asteroids {
            asteroid.move_step(dt, &mut self.rng);
        }

        if self.snake.check_collision() {
            self.lives -= 1;
            if self.lives == 0 {
                info!("Game over, final score {}", self.score);
                self.state = GameState::GameOver;
            } else {
                info!("Life lost, {} left", self.lives);
                self.snake = Snake::new();
            }
        }

        // Truncated per frame, so very short frames earn nothing
        self.score += (SCORE_PER_SECOND * dt).floor().max(0.0) as u64;
    }

    pub fn restart(&mut self) {
        info!("Restarting");
        self.snake = Snake::new();
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.state = GameState::Running;
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.clear(BLACK);

        self.snake.draw(canvas);
        for asteroid in &self.asteroids {
            asteroid.draw(canvas);
        }

        draw_text(canvas, &format!("Lives: {}", self.lives), LIVES_POS);
        draw_text(canvas, &format!("Score: {}", self.score), SCORE_POS);

        if self.state != GameState::Running {
            self.draw_menu(canvas);
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_menu(&self, canvas: &mut impl Canvas) {
        let panel = Rect::new(VIEWPORT_WIDTH / 4, VIEWPORT_HEIGHT / 4, VIEWPORT_WIDTH / 2, VIEWPORT_HEIGHT / 2);
        canvas.fill_rect(panel, MENU_GRAY);

        if self.state == GameState::Paused {
            draw_text(canvas, "PAUSED", PAUSED_TITLE_POS);
        } else {
            draw_text(canvas, "GAME OVER", GAME_OVER_TITLE_POS);
        }

        draw_text(canvas, "Press R to Resume", RESUME_PROMPT_POS);
        draw_text(canvas, "Press Q to Quit", QUIT_PROMPT_POS);
    }
}

fn draw_text(canvas: &mut impl Canvas, text: &str, (x, y): (i32, i32)) {
    canvas.draw_text(text, x, y, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawOp, RecordingCanvas};
    use crate::snake::Direction::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn new_game() -> SpaceSnakeGame<StdRng> {
        SpaceSnakeGame::new(StdRng::seed_from_u64(42))
    }

    // Far enough to leave the screen from the center in one step
    const CRASH_DT: f32 = 3.0;

    #[test]
    fn fresh_game() {
        let game = new_game();
        assert_eq!(game.lives(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().body(), &[(400.0, 300.0)]);
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.asteroids.len(), 5);
        assert!(!game.should_exit());
    }

    #[test]
    fn score_is_truncated_per_frame() {
        let mut game = new_game();
        for _ in 0..8 {
            game.update(0.025);
        }
        assert_eq!(game.score(), 8);

        let mut fast = new_game();
        for _ in 0..120 {
            fast.update(1.0 / 120.0);
        }
        assert_eq!(fast.score(), 0);
    }

    #[test]
    fn steering_within_one_frame() {
        let mut game = new_game();
        game.handle_input(Input::Steer(Up));
        game.handle_input(Input::Steer(Down));
        assert_eq!(game.snake().next_direction(), Down);
        assert_eq!(game.snake().direction(), Right);
    }

    #[test]
    fn steering_is_ignored_unless_running() {
        let mut game = new_game();
        game.handle_input(Input::TogglePause);
        game.handle_input(Input::Steer(Up));
        assert_eq!(game.snake().next_direction(), Right);
    }

    #[test]
    fn crash_costs_a_life_and_resets_the_snake() {
        let mut game = new_game();
        game.handle_input(Input::Steer(Up));
        game.update(CRASH_DT);

        assert_eq!(game.lives(), 2);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().body(), &[(400.0, 300.0)]);
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.score(), 180);
    }

    #[test]
    fn last_life_ends_the_game_and_restart_resets() {
        let mut game = new_game();
        for _ in 0..3 {
            game.update(CRASH_DT);
        }
        assert_eq!(game.lives(), 0);
        assert_eq!(game.state(), GameState::GameOver);

        // Frozen while the game is over
        let score = game.score();
        let head = game.snake().head();
        game.update(1.0);
        assert_eq!(game.score(), score);
        assert_eq!(game.snake().head(), head);

        game.handle_input(Input::Restart);
        assert_eq!(game.lives(), 3);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.snake().body(), &[(400.0, 300.0)]);
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut game = new_game();
        game.handle_input(Input::TogglePause);
        assert_eq!(game.state(), GameState::Paused);

        let positions: Vec<_> = game.asteroids.iter().map(|a| a.position()).collect();
        game.update(0.5);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), (400.0, 300.0));
        assert_eq!(game.asteroids.iter().map(|a| a.position()).collect::<Vec<_>>(), positions);

        game.handle_input(Input::TogglePause);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn pause_toggle_is_ignored_after_game_over() {
        let mut game = new_game();
        for _ in 0..3 {
            game.update(CRASH_DT);
        }
        game.handle_input(Input::TogglePause);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn quit_and_restart_only_work_from_the_menu() {
        let mut game = new_game();
        game.update(0.1);
        game.handle_input(Input::Quit);
        game.handle_input(Input::Restart);
        assert!(!game.should_exit());
        assert_eq!(game.score(), 6);

        game.handle_input(Input::TogglePause);
        game.handle_input(Input::Restart);
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);

        game.handle_input(Input::TogglePause);
        game.handle_input(Input::Quit);
        assert!(game.should_exit());
    }

    #[test]
    fn restart_keeps_the_asteroids() {
        let mut game = new_game();
        game.update(0.5);
        let positions: Vec<_> = game.asteroids.iter().map(|a| a.position()).collect();

        game.handle_input(Input::TogglePause);
        game.handle_input(Input::Restart);
        assert_eq!(game.asteroids.iter().map(|a| a.position()).collect::<Vec<_>>(), positions);
    }

    #[test]
    fn close_exits_from_any_state() {
        let mut running = new_game();
        running.handle_input(Input::Close);
        assert!(running.should_exit());

        let mut paused = new_game();
        paused.handle_input(Input::TogglePause);
        paused.handle_input(Input::Close);
        assert!(paused.should_exit());

        let mut over = new_game();
        for _ in 0..3 {
            over.update(CRASH_DT);
        }
        assert_eq!(over.state(), GameState::GameOver);
        over.handle_input(Input::Close);
        assert!(over.should_exit());
    }

    #[test]
    fn negative_dt_never_lowers_the_score() {
        let mut game = new_game();
        game.update(0.1);
        assert_eq!(game.score(), 6);

        game.update(-0.5);
        assert_eq!(game.score(), 6);
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn asteroids_never_hurt_the_snake() {
        let mut game = new_game();
        for a in &mut game.asteroids {
            *a = Asteroid::at(400.0, 300.0, 0.0);
        }
        game.update(0.01);
        assert_eq!(game.lives(), 3);
    }

    #[test]
    fn running_frame_has_no_menu() {
        let game = new_game();
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        assert_eq!(canvas.ops[0], DrawOp::Clear(BLACK));
        assert_eq!(canvas.ops[1], DrawOp::Rect(Rect::new(400, 300, 20, 20), GREEN));
        assert_eq!(canvas.rects().iter().filter(|(_, c)| *c == GRAY).count(), 5);
        assert_eq!(canvas.texts(), vec!["Lives: 3", "Score: 0"]);
        assert!(canvas.ops.contains(&DrawOp::Text("Lives: 3".into(), 680, 10, WHITE)));
        assert!(canvas.ops.contains(&DrawOp::Text("Score: 0".into(), 680, 50, WHITE)));
    }

    #[test]
    fn paused_frame_shows_menu() {
        let mut game = new_game();
        game.handle_input(Input::TogglePause);
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        assert!(canvas.rects().contains(&(Rect::new(200, 150, 400, 300), MENU_GRAY)));
        assert_eq!(&canvas.texts()[2..], &["PAUSED", "Press R to Resume", "Press Q to Quit"]);
    }

    #[test]
    fn game_over_frame_shows_menu() {
        let mut game = new_game();
        for _ in 0..3 {
            game.update(CRASH_DT);
        }
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        assert_eq!(&canvas.texts()[2..], &["GAME OVER", "Press R to Resume", "Press Q to Quit"]);
        assert!(canvas.ops.contains(&DrawOp::Text("GAME OVER".into(), 330, 250, WHITE)));
    }
}
