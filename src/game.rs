use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, GridSize};
use crate::error::InitializationError;
use crate::food::Food;
use crate::input::{Direction, GameInput, direction_change_is_valid};
use crate::snake::{Position, Snake};
use crate::timer::{IntervalTimer, TickTimer};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// What ended the round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

/// Read-only view handed to the renderer once per redraw.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Position,
    pub score: u32,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
    pub grid: GridSize,
}

/// The game engine: all mutable state for one session plus its tick timer.
///
/// State changes only through [`Game::initialize`], [`Game::restart`],
/// [`Game::advance_tick`] and [`Game::handle_input`].
#[derive(Debug)]
pub struct Game<T: TickTimer = IntervalTimer> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    current_direction: Direction,
    input_direction: Direction,
    status: GameStatus,
    death_reason: Option<DeathReason>,
    score: u32,
    tick_count: u64,
    rng: StdRng,
    timer: T,
}

impl<T: TickTimer> Game<T> {
    /// Creates and initializes a game with an entropy-seeded food sequence.
    pub fn new(config: GameConfig, timer: T) -> Result<Self, InitializationError> {
        Self::with_rng(config, timer, StdRng::from_entropy())
    }

    /// Creates a deterministic game for tests and reproducible sessions.
    pub fn new_with_seed(
        config: GameConfig,
        timer: T,
        seed: u64,
    ) -> Result<Self, InitializationError> {
        Self::with_rng(config, timer, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, timer: T, rng: StdRng) -> Result<Self, InitializationError> {
        config.validate()?;

        let snake = starting_snake(&config);
        let food = Food::new(snake.head());
        let mut game = Self {
            config,
            snake,
            food,
            current_direction: Direction::Right,
            input_direction: Direction::Right,
            status: GameStatus::Running,
            death_reason: None,
            score: 0,
            tick_count: 0,
            rng,
            timer,
        };

        game.initialize()?;
        Ok(game)
    }

    /// Lays out a fresh round and re-arms the tick timer.
    ///
    /// The snake is placed horizontally with its head a quarter of the way
    /// across the middle row, heading right. Fails only when the timer
    /// cannot be armed.
    pub fn initialize(&mut self) -> Result<(), InitializationError> {
        self.snake = starting_snake(&self.config);
        self.current_direction = Direction::Right;
        self.input_direction = Direction::Right;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.score = 0;
        self.tick_count = 0;
        self.food = Food::spawn(&mut self.rng, self.config.grid, &self.snake);

        if self.timer.is_armed() {
            self.timer.cancel();
        }
        self.timer.arm(self.config.tick_interval)?;

        info!(
            "round initialized: {}x{} grid, snake length {}, food at ({}, {})",
            self.config.grid.width,
            self.config.grid.height,
            self.snake.len(),
            self.food.position.x,
            self.food.position.y,
        );
        Ok(())
    }

    /// Resets score, length, directions and the game-over flag, then re-initializes.
    pub fn restart(&mut self) -> Result<(), InitializationError> {
        info!("restarting after score {}", self.score);
        self.initialize()
    }

    /// Advances simulation by one gameplay tick.
    pub fn advance_tick(&mut self) {
        if self.status == GameStatus::GameOver {
            return;
        }

        if direction_change_is_valid(self.current_direction, self.input_direction) {
            self.current_direction = self.input_direction;
        }

        let Some(new_head) = self.snake.head().step(self.current_direction) else {
            return;
        };

        if !new_head.is_within_bounds(self.config.grid) {
            self.end_round(DeathReason::WallCollision);
            return;
        }

        // The tail cell counts even though it is vacated this tick.
        if self.snake.occupies(new_head) {
            self.end_round(DeathReason::SelfCollision);
            return;
        }

        let ate = new_head == self.food.position;
        if ate {
            self.score = self.score.saturating_add(self.config.food_score);
        }

        let grew = self.snake.advance(new_head, ate);
        self.tick_count += 1;

        if ate {
            self.food = Food::spawn(&mut self.rng, self.config.grid, &self.snake);
            debug!(
                "food eaten at ({}, {}): score {}, length {}{}, next food at ({}, {})",
                new_head.x,
                new_head.y,
                self.score,
                self.snake.len(),
                if grew { "" } else { " (at capacity)" },
                self.food.position.x,
                self.food.position.y,
            );
        }
    }

    /// Applies one external input event.
    ///
    /// While the game is over only [`GameInput::Restart`] does anything. While
    /// running, a direction is buffered for the next tick unless it reverses
    /// the current heading. Errors only come from re-arming the timer on restart.
    pub fn handle_input(&mut self, input: GameInput) -> Result<(), InitializationError> {
        match (self.status, input) {
            (GameStatus::GameOver, GameInput::Restart) => self.restart(),
            (GameStatus::Running, GameInput::Direction(direction)) => {
                if direction != Direction::None
                    && direction_change_is_valid(self.current_direction, direction)
                {
                    self.input_direction = direction;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food.position,
            score: self.score,
            game_over: self.is_game_over(),
            death_reason: self.death_reason,
            grid: self.config.grid,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Food {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_direction(&self) -> Direction {
        self.current_direction
    }

    #[must_use]
    pub fn input_direction(&self) -> Direction {
        self.input_direction
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Mutable timer access for the host loop that polls it.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    fn end_round(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        info!(
            "game over ({reason:?}) after {} ticks: score {}, length {}",
            self.tick_count,
            self.score,
            self.snake.len(),
        );
    }
}

fn starting_snake(config: &GameConfig) -> Snake {
    let head = Position {
        x: i32::from(config.start_head_x()),
        y: i32::from(config.start_row()),
    };
    Snake::horizontal(head, config.initial_length, config.grid.snake_capacity())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::time::Duration;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use crate::config::{GameConfig, GridSize};
    use crate::error::{ConfigError, InitializationError, TimerError};
    use crate::food::Food;
    use crate::input::{Direction, GameInput};
    use crate::snake::{Position, Snake};
    use crate::timer::TickTimer;

    use super::{DeathReason, Game, GameStatus};

    /// Counts arm/cancel calls instead of scheduling anything.
    #[derive(Debug, Default)]
    struct RecordingTimer {
        interval: Option<Duration>,
        arms: u32,
        cancels: u32,
        unavailable: bool,
    }

    impl TickTimer for RecordingTimer {
        fn arm(&mut self, interval: Duration) -> Result<(), TimerError> {
            if self.unavailable {
                return Err(TimerError::Unavailable);
            }
            self.arms += 1;
            self.interval = Some(interval);
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
            self.interval = None;
        }

        fn is_armed(&self) -> bool {
            self.interval.is_some()
        }
    }

    fn pos(x: i32, y: i32) -> Position {
        Position { x, y }
    }

    fn new_game(seed: u64) -> Game<RecordingTimer> {
        Game::new_with_seed(GameConfig::default(), RecordingTimer::default(), seed)
            .expect("default config initializes")
    }

    fn body(game: &Game<RecordingTimer>) -> Vec<Position> {
        game.snake().segments().copied().collect()
    }

    #[test]
    fn initial_layout_matches_defaults() {
        let game = new_game(1);

        assert_eq!(
            body(&game),
            vec![pos(7, 10), pos(6, 10), pos(5, 10), pos(4, 10), pos(3, 10)]
        );
        assert_eq!(game.current_direction(), Direction::Right);
        assert_eq!(game.input_direction(), Direction::Right);
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.score(), 0);
        assert!(!game.snake().occupies(game.food().position));
        assert!(game.food().position.is_within_bounds(game.config().grid));
    }

    #[test]
    fn initialize_arms_timer_and_cancels_previous_schedule() {
        let mut game = new_game(2);
        assert_eq!(game.timer().arms, 1);
        assert_eq!(game.timer().cancels, 0);
        assert_eq!(game.timer().interval, Some(Duration::from_millis(150)));

        game.initialize().expect("re-initialize succeeds");

        assert_eq!(game.timer().arms, 2);
        assert_eq!(game.timer().cancels, 1);
    }

    #[test]
    fn unavailable_timer_fails_initialization() {
        let timer = RecordingTimer {
            unavailable: true,
            ..RecordingTimer::default()
        };

        let result = Game::new_with_seed(GameConfig::default(), timer, 3);

        assert_eq!(
            result.err(),
            Some(InitializationError::Timer(TimerError::Unavailable))
        );
    }

    #[test]
    fn invalid_config_fails_initialization() {
        let config = GameConfig::with_grid(GridSize {
            width: 30,
            height: 0,
        });

        let result = Game::new_with_seed(config, RecordingTimer::default(), 4);

        assert_eq!(
            result.err(),
            Some(InitializationError::InvalidConfig(ConfigError::EmptyGrid))
        );
    }

    #[test]
    fn tick_moves_head_and_drops_tail() {
        let mut game = new_game(5);
        game.food = Food::new(pos(0, 0));

        game.advance_tick();

        assert_eq!(
            body(&game),
            vec![pos(8, 10), pos(7, 10), pos(6, 10), pos(5, 10), pos(4, 10)]
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_count(), 1);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut game = new_game(6);
        game.snake = Snake::from_segments(vec![pos(0, 10)], 599);
        game.current_direction = Direction::Left;
        game.input_direction = Direction::Left;

        game.advance_tick();

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.death_reason(), Some(DeathReason::WallCollision));
        assert_eq!(game.score(), 0);
        assert_eq!(body(&game), vec![pos(0, 10)]);
    }

    #[test]
    fn eating_food_scores_grows_and_relocates_food() {
        let mut game = new_game(7);
        game.food = Food::new(pos(8, 10));

        game.advance_tick();

        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 6);
        assert_eq!(game.snake().head(), pos(8, 10));
        assert_eq!(game.snake().tail(), pos(3, 10));
        assert!(!game.snake().occupies(game.food().position));
    }

    #[test]
    fn growth_stops_at_capacity_but_score_accrues() {
        let config = GameConfig {
            initial_length: 1,
            ..GameConfig::with_grid(GridSize {
                width: 4,
                height: 1,
            })
        };
        let mut game = Game::new_with_seed(config, RecordingTimer::default(), 8)
            .expect("small grid initializes");
        game.snake = Snake::from_segments(vec![pos(2, 0), pos(1, 0), pos(0, 0)], 3);
        game.food = Food::new(pos(3, 0));

        game.advance_tick();

        assert_eq!(game.score(), 10);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(body(&game), vec![pos(3, 0), pos(2, 0), pos(1, 0)]);
        assert_eq!(game.food().position, pos(0, 0));
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut game = new_game(9);
        game.snake = Snake::from_segments(
            vec![
                pos(2, 2),
                pos(1, 2),
                pos(1, 3),
                pos(2, 3),
                pos(3, 3),
                pos(3, 2),
            ],
            599,
        );
        game.current_direction = Direction::Down;
        game.input_direction = Direction::Down;

        game.advance_tick();

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.death_reason(), Some(DeathReason::SelfCollision));
    }

    // Current, possibly unintended, behaviour: the cell the tail is about to
    // leave still counts as occupied.
    #[test]
    fn moving_into_vacating_tail_cell_is_a_collision() {
        let mut game = new_game(10);
        game.snake = Snake::from_segments(vec![pos(1, 0), pos(0, 0), pos(0, 1), pos(1, 1)], 599);
        game.food = Food::new(pos(9, 9));
        game.current_direction = Direction::Right;
        game.input_direction = Direction::Down;

        game.advance_tick();

        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.death_reason(), Some(DeathReason::SelfCollision));
        assert_eq!(game.snake().head(), pos(1, 0));
    }

    #[test]
    fn reversal_input_is_ignored() {
        let mut game = new_game(11);
        game.food = Food::new(pos(0, 0));

        game.handle_input(GameInput::Direction(Direction::Left))
            .expect("direction input never fails");

        assert_eq!(game.input_direction(), Direction::Right);
        game.advance_tick();
        assert_eq!(game.snake().head(), pos(8, 10));
    }

    #[test]
    fn reversal_buffered_past_the_input_filter_is_dropped_at_tick() {
        let mut game = new_game(12);
        game.food = Food::new(pos(0, 0));
        game.input_direction = Direction::Left;

        game.advance_tick();

        assert_eq!(game.current_direction(), Direction::Right);
        assert_eq!(game.snake().head(), pos(8, 10));
    }

    #[test]
    fn latest_buffered_direction_wins() {
        let mut game = new_game(13);
        game.food = Food::new(pos(0, 0));

        game.handle_input(GameInput::Direction(Direction::Up))
            .expect("direction input never fails");
        game.handle_input(GameInput::Direction(Direction::Down))
            .expect("direction input never fails");
        game.advance_tick();

        assert_eq!(game.current_direction(), Direction::Down);
        assert_eq!(game.snake().head(), pos(7, 11));
    }

    #[test]
    fn missing_direction_does_not_move() {
        let mut game = new_game(14);
        game.current_direction = Direction::None;
        game.input_direction = Direction::None;
        let before = body(&game);

        game.advance_tick();

        assert_eq!(body(&game), before);
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.tick_count(), 0);
    }

    #[test]
    fn game_over_is_idempotent() {
        let mut game = new_game(15);
        game.snake = Snake::from_segments(vec![pos(29, 0)], 599);

        game.advance_tick();
        assert!(game.is_game_over());
        let frozen = (body(&game), game.food(), game.score(), game.death_reason());

        for _ in 0..10 {
            game.advance_tick();
        }

        assert_eq!(
            (body(&game), game.food(), game.score(), game.death_reason()),
            frozen
        );
    }

    #[test]
    fn only_restart_is_accepted_while_game_over() {
        let mut game = new_game(16);
        game.snake = Snake::from_segments(vec![pos(29, 4)], 599);
        game.score = 30;
        game.advance_tick();
        assert!(game.is_game_over());

        game.handle_input(GameInput::Direction(Direction::Up))
            .expect("ignored input never fails");
        assert!(game.is_game_over());
        assert_eq!(game.input_direction(), Direction::Right);
        assert_eq!(game.score(), 30);

        game.handle_input(GameInput::Restart)
            .expect("restart re-arms the timer");
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.death_reason(), None);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.snake().head(), pos(7, 10));
        assert_eq!(game.timer().arms, 2);
    }

    #[test]
    fn restart_key_is_ignored_while_running() {
        let mut game = new_game(17);
        game.score = 20;

        game.handle_input(GameInput::Restart)
            .expect("ignored input never fails");

        assert_eq!(game.score(), 20);
        assert_eq!(game.timer().arms, 1);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut game = new_game(18);
        let mut rng = StdRng::seed_from_u64(18);
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        let grid = game.config().grid;

        for _ in 0..5_000 {
            if game.is_game_over() {
                game.handle_input(GameInput::Restart)
                    .expect("restart re-arms the timer");
                continue;
            }

            if let Some(direction) = directions.choose(&mut rng) {
                game.handle_input(GameInput::Direction(*direction))
                    .expect("direction input never fails");
            }

            let before = game.snake().len();
            game.advance_tick();
            let after = game.snake().len();

            assert!(after == before || after == before + 1);
            assert!(after <= grid.snake_capacity());

            if !game.is_game_over() {
                let cells: HashSet<Position> = game.snake().segments().copied().collect();
                assert_eq!(cells.len(), after);
                assert!(cells.iter().all(|cell| cell.is_within_bounds(grid)));
                assert!(!cells.contains(&game.food().position));
            }
        }
    }
}
