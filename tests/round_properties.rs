//! Whole-round behaviour driven through the public engine API.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use wrap_snake::game::{
    Cell, Direction, FoodManager, GameConfig, GameEngine, Grid, RoundState, Snake, TickOutcome,
};

#[derive(Debug, Clone)]
enum Step {
    Turn(Direction),
    Tick,
    Spawn,
    Expire,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => prop::sample::select(Direction::ALL.to_vec()).prop_map(Step::Turn),
        4 => Just(Step::Tick),
        1 => Just(Step::Spawn),
        1 => Just(Step::Expire),
    ]
}

fn assert_board_consistent(engine: &GameEngine) {
    let grid = engine.grid();
    let body: HashSet<Cell> = engine.snake().cells().iter().copied().collect();
    assert_eq!(body.len(), engine.snake().len(), "snake overlaps itself");
    assert!(engine.snake().cells().iter().all(|cell| grid.contains(*cell)));

    let mut food_cells = HashSet::new();
    for food in engine.foods().iter() {
        assert!(food_cells.insert(food.cell), "two foods share {:?}", food.cell);
        assert!(!body.contains(&food.cell), "food under the snake at {:?}", food.cell);
    }
}

#[test]
fn default_round_eats_food_in_front() {
    let now = Instant::now();
    let config = GameConfig::default();
    let grid = Grid::new(config.width, config.height);
    let state = RoundState::new(
        Snake::starting(&grid),
        Direction::Right,
        FoodManager::with_seed(grid, 0),
    );
    let mut engine = GameEngine::from_round(config, state).unwrap();
    engine.place_food(Cell::new(9, 12), now).unwrap();

    assert_eq!(engine.apply_tick(now), TickOutcome::Fed { score: 1 });
    assert_eq!(
        engine.snake().cells(),
        &[
            Cell::new(9, 12),
            Cell::new(8, 12),
            Cell::new(7, 12),
            Cell::new(6, 12)
        ]
    );
    assert_eq!(engine.score(), 1);
    assert!(!engine.foods().contains(Cell::new(9, 12)));
}

#[test]
fn self_collision_yields_default_round() {
    let config = GameConfig::default();
    let grid = Grid::new(config.width, config.height);
    let state = RoundState::new(
        Snake::from_cells(vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]),
        Direction::Left,
        FoodManager::with_seed(grid, 0),
    );
    let mut engine = GameEngine::from_round(config, state).unwrap();

    let outcome = engine.apply_tick(Instant::now());
    assert!(matches!(outcome, TickOutcome::RoundOver { .. }));
    assert_eq!(
        engine.snake().cells(),
        &[Cell::new(8, 12), Cell::new(7, 12), Cell::new(6, 12)]
    );
    assert_eq!(engine.heading(), Direction::Right);
    assert_eq!(engine.score(), 0);
    assert_eq!(engine.foods().len(), 1);
}

#[test]
fn food_outlives_ttl_by_less_than_one_millisecond() {
    let t0 = Instant::now();
    let mut engine = GameEngine::with_seed(GameConfig::default(), 8, t0).unwrap();
    let food = engine.foods().oldest().unwrap().cell;

    assert_eq!(engine.expire_tick(t0 + Duration::from_millis(9_999)), None);
    assert!(engine.foods().contains(food));
    assert_eq!(engine.expire_tick(t0 + Duration::from_millis(10_000)), Some(food));
    assert!(!engine.foods().contains(food));
}

#[test]
fn crowded_board_keeps_spawning_until_full() {
    let now = Instant::now();
    let mut engine = GameEngine::with_seed(GameConfig::new(4, 3), 21, now).unwrap();
    // 12 cells, 3 taken by the snake, 1 by the opening food
    for _ in 0..8 {
        assert!(engine.spawn_tick(now).is_some());
    }
    assert_eq!(engine.foods().len(), 9);
    assert_eq!(engine.spawn_tick(now), None);
    assert_board_consistent(&engine);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn invariants_hold_through_random_play(
        seed in any::<u64>(),
        steps in prop::collection::vec(step(), 1..300),
    ) {
        let start = Instant::now();
        let config = GameConfig::small();
        let ttl = config.food_ttl();
        let mut engine = GameEngine::with_seed(config, seed, start).unwrap();
        let mut clock = Duration::ZERO;
        let mut previous_heading = Direction::Right;

        for step in steps {
            clock += Duration::from_millis(250);
            let now = start + clock;
            match step {
                Step::Turn(direction) => {
                    engine.request_turn(direction);
                }
                Step::Tick => {
                    let length = engine.snake().len();
                    let score = engine.score();
                    match engine.apply_tick(now) {
                        TickOutcome::Moved => {
                            prop_assert_eq!(engine.snake().len(), length);
                            prop_assert_eq!(engine.score(), score);
                            prop_assert!(!previous_heading.is_opposite(engine.heading()));
                        }
                        TickOutcome::Fed { score: fed } => {
                            prop_assert_eq!(engine.snake().len(), length + 1);
                            prop_assert_eq!(fed, score + 1);
                            prop_assert!(!previous_heading.is_opposite(engine.heading()));
                        }
                        TickOutcome::RoundOver { final_score, .. } => {
                            prop_assert_eq!(final_score, score);
                            prop_assert_eq!(engine.score(), 0);
                            prop_assert_eq!(engine.snake().len(), 3);
                        }
                    }
                    previous_heading = engine.heading();
                }
                Step::Spawn => {
                    engine.spawn_tick(now);
                }
                Step::Expire => {
                    if let Some(oldest) = engine.foods().oldest().copied() {
                        let expired = engine.expire_tick(now);
                        prop_assert_eq!(expired.is_some(), now - oldest.spawned_at >= ttl);
                    }
                }
            }
            assert_board_consistent(&engine);
        }
    }
}
