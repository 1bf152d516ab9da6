use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::time::Duration;

use term_snake::game::{
    CollisionType, Direction, GameConfig, GameEngine, GameState, Position, RandomCells,
    ScriptedCells, Snake,
};

fn scripted(width: usize, height: usize, cells: &[Position]) -> GameEngine<ScriptedCells> {
    GameEngine::with_picker(
        GameConfig::new(width, height),
        ScriptedCells::new(cells.iter().copied()),
    )
    .unwrap()
}

fn resumed(snake: Snake, food: Position, width: usize, height: usize) -> GameEngine<ScriptedCells> {
    let state = GameState::new(snake, food, width, height, Duration::from_millis(100));
    GameEngine::resume(GameConfig::default(), ScriptedCells::default(), state).unwrap()
}

fn assert_invariants(state: &GameState) {
    let body = &state.snake.body;
    assert!(!body.is_empty());

    let unique: HashSet<_> = body.iter().collect();
    assert_eq!(unique.len(), body.len(), "duplicate segment in {body:?}");

    for pair in body.windows(2) {
        assert_eq!(
            pair[0].manhattan_distance(pair[1]),
            1,
            "segments not adjacent in {body:?}"
        );
    }

    for pos in body {
        assert!(state.is_in_bounds(*pos));
    }

    if state.is_running() {
        assert!(state.is_in_bounds(state.food));
        assert!(!state.snake.occupies(state.food), "food on snake");
    }
}

#[test]
fn straight_step_keeps_length() {
    let mut engine = scripted(5, 5, &[Position::new(0, 0)]);
    assert_eq!(engine.state().snake.body, vec![Position::new(2, 2)]);

    engine.step();

    let state = engine.state();
    assert_eq!(state.snake.body, vec![Position::new(3, 2)]);
    assert_eq!(state.score, 0);
    assert!(state.is_running());
}

#[test]
fn eating_grows_and_replaces_food() {
    let mut engine = scripted(5, 5, &[Position::new(3, 2), Position::new(0, 4)]);
    assert_eq!(engine.state().food, Position::new(3, 2));

    let result = engine.step();

    assert!(result.info.ate_food);
    let state = engine.state();
    assert_eq!(
        state.snake.body,
        vec![Position::new(3, 2), Position::new(2, 2)]
    );
    assert_eq!(state.score, 1);
    assert_eq!(state.food, Position::new(0, 4));
    assert!(!state.snake.occupies(state.food));
}

#[test]
fn leaving_the_grid_ends_the_game() {
    let mut engine = resumed(
        Snake::new(Position::new(2, 1), Direction::Right, 1),
        Position::new(0, 0),
        3,
        3,
    );

    let result = engine.step();

    assert!(result.terminated);
    assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    assert!(engine.state().is_game_over());
    assert_eq!(engine.state().snake.body, vec![Position::new(2, 1)]);
}

#[test]
fn reversal_request_is_ignored() {
    // Head (2,3) trailing (2,2): moving down
    let mut engine = resumed(
        Snake::new(Position::new(2, 3), Direction::Down, 2),
        Position::new(0, 0),
        5,
        5,
    );

    engine.set_direction(Direction::Up);
    engine.step();

    let state = engine.state();
    assert!(state.is_running());
    assert_eq!(state.snake.direction, Direction::Down);
    assert_eq!(
        state.snake.body,
        vec![Position::new(2, 4), Position::new(2, 3)]
    );
}

#[test]
fn game_over_freezes_state() {
    let mut engine = resumed(
        Snake::new(Position::new(0, 1), Direction::Left, 3),
        Position::new(2, 2),
        4,
        4,
    );
    engine.step();
    let frozen = engine.state().clone();

    for direction in Direction::ALL {
        engine.set_direction(direction);
        engine.step();
        assert_eq!(engine.state(), &frozen);
    }
}

/// Picks a random direction that does not run straight into trouble, if any
fn cautious_direction(state: &GameState, rng: &mut StdRng) -> Direction {
    let current = state.snake.direction;
    let mut options: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| !current.is_opposite(*direction))
        .collect();
    options.shuffle(rng);

    options
        .iter()
        .copied()
        .find(|direction| {
            let next = state.snake.head().moved_in_direction(*direction);
            state.is_in_bounds(next) && !state.snake.occupies(next)
        })
        .unwrap_or(options[0])
}

#[test]
fn random_walks_preserve_invariants() {
    for seed in 0..25u64 {
        let picker = RandomCells::new(StdRng::seed_from_u64(seed));
        let mut engine = GameEngine::with_picker(GameConfig::new(8, 6), picker).unwrap();
        let mut steering = StdRng::seed_from_u64(seed + 1_000);

        assert_invariants(engine.state());

        for _ in 0..600 {
            let before = engine.state().clone();
            if before.is_game_over() {
                break;
            }

            let direction = cautious_direction(&before, &mut steering);
            engine.set_direction(direction);
            let result = engine.step();
            let after = engine.state();

            assert_invariants(after);
            assert!(after.score >= before.score);

            if result.info.ate_food {
                assert_eq!(after.snake.head(), before.food);
                assert_eq!(after.score, before.score + 1);
                assert_eq!(after.snake.len(), before.snake.len() + 1);
            } else {
                assert_eq!(after.score, before.score);
                assert_eq!(after.snake.len(), before.snake.len());
            }

            if result.terminated && !result.info.ate_food {
                assert_eq!(after.snake, before.snake);
                assert_eq!(after.food, before.food);
            }
        }

        let settled = engine.state().clone();
        for _ in 0..3 {
            engine.step();
        }
        if settled.is_game_over() {
            assert_eq!(engine.state(), &settled);
        }
    }
}

#[test]
fn random_walks_eat_sometimes() {
    let picker = RandomCells::new(StdRng::seed_from_u64(99));
    let mut engine = GameEngine::with_picker(GameConfig::new(6, 6), picker).unwrap();
    let mut steering = StdRng::seed_from_u64(7);
    let mut best = 0;

    for _ in 0..5_000 {
        if engine.state().is_game_over() {
            best = best.max(engine.state().score);
            engine.restart();
        }
        let direction = cautious_direction(engine.state(), &mut steering);
        engine.set_direction(direction);
        engine.step();
    }
    best = best.max(engine.state().score);

    assert!(best > 0);
}
