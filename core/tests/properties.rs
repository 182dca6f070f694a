use std::collections::{BTreeSet, VecDeque};

use minefield_core::*;
use proptest::prelude::*;

/// Arbitrary valid config: up to 16x16 with at least one safe tile.
fn configs() -> impl Strategy<Value = GameConfig> {
    (1..=16u8, 1..=16u8).prop_flat_map(|(width, height)| {
        let total = u16::from(width) * u16::from(height);
        (0..total).prop_map(move |mines| GameConfig::new(width, height, mines).unwrap())
    })
}

fn neighbors(pos: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(pos, size)
}

/// Tiles a fill from `start` must open: the connected zero region and its numbered border.
fn expected_region(layout: &MineLayout, start: Coord2) -> BTreeSet<Coord2> {
    let mut region = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        if layout.adjacent_mine_count(pos) != 0 {
            continue;
        }
        for next in neighbors(pos, layout.size()) {
            if region.insert(next) {
                queue.push_back(next);
            }
        }
    }
    region
}

fn revealed_positions(engine: &BoardEngine) -> BTreeSet<Coord2> {
    let snapshot = BoardSnapshot::from_engine(engine);
    snapshot
        .tiles
        .iter()
        .filter(|tile| tile.revealed)
        .map(|tile| tile.position)
        .collect()
}

proptest! {
    #[test]
    fn generated_layout_has_exact_unique_mines(config in configs(), seed in any::<u64>()) {
        let layout = RandomLayoutGenerator::new(seed).generate(&config).unwrap();

        let mines: BTreeSet<_> = layout.mine_positions().collect();
        prop_assert_eq!(layout.mine_count(), config.mines);
        prop_assert_eq!(mines.len(), usize::from(config.mines));
        prop_assert!(mines.iter().all(|&(row, col)| row < config.height && col < config.width));
    }

    #[test]
    fn reveal_opens_zero_region_and_border(config in configs(), seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let layout = RandomLayoutGenerator::new(seed).generate(&config).unwrap();
        let safe: Vec<Coord2> = (0..config.height)
            .flat_map(|row| (0..config.width).map(move |col| (row, col)))
            .filter(|&pos| !layout.contains_mine(pos))
            .collect();
        let start = *pick.get(&safe);
        let expected = expected_region(&layout, start);

        let mut engine = BoardEngine::new(layout, WinRule::AllSafeRevealed);
        engine.reveal(start).unwrap();

        prop_assert_eq!(revealed_positions(&engine), expected);
        prop_assert_ne!(engine.status(), GameStatus::Lost);
    }

    #[test]
    fn flood_fill_never_crosses_flags(seed in any::<u64>(), flag_col in 1..7u8) {
        // empty 5x8 board split by a column of flags
        let config = GameConfig::new(8, 5, 0).unwrap();
        let mut engine = BoardEngine::initialize(&config, RandomLayoutGenerator::new(seed)).unwrap();
        for row in 0..5 {
            engine.toggle_flag((row, flag_col)).unwrap();
        }

        engine.reveal((2, 0)).unwrap();

        for (row, col) in revealed_positions(&engine) {
            prop_assert!(col < flag_col, "revealed ({}, {}) past flags at {}", row, col, flag_col);
        }
        prop_assert_eq!(engine.revealed_count(), 5 * u16::from(flag_col));
    }

    #[test]
    fn flagging_all_mines_wins(config in configs(), seed in any::<u64>()) {
        prop_assume!(config.mines > 0);
        let mut engine = BoardEngine::initialize(&config, RandomLayoutGenerator::new(seed)).unwrap();
        let mines: Vec<_> = engine.mine_layout().mine_positions().collect();

        let (last, rest) = mines.split_last().unwrap();
        for &pos in rest {
            prop_assert_eq!(engine.toggle_flag(pos), Ok(FlagOutcome::Changed));
        }
        prop_assert_eq!(engine.toggle_flag(*last), Ok(FlagOutcome::Won));
        prop_assert_eq!(engine.status(), GameStatus::Won);
    }

    #[test]
    fn one_wrong_flag_blocks_win(config in configs(), seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        prop_assume!(config.mines > 0);
        let mut engine = BoardEngine::initialize(&config, RandomLayoutGenerator::new(seed)).unwrap();
        let layout = engine.mine_layout().clone();
        let mines: Vec<_> = layout.mine_positions().collect();
        let safe: Vec<Coord2> = (0..config.height)
            .flat_map(|row| (0..config.width).map(move |col| (row, col)))
            .filter(|&pos| !layout.contains_mine(pos))
            .collect();

        // swap one mine for a safe tile, keeping the flag count equal to the mine count
        for &pos in &mines[1..] {
            engine.toggle_flag(pos).unwrap();
        }
        engine.toggle_flag(*pick.get(&safe)).unwrap();

        prop_assert_eq!(engine.flagged_count(), config.mines);
        prop_assert_eq!(engine.status(), GameStatus::Ongoing);
    }

    #[test]
    fn double_toggle_is_neutral(config in configs(), seed in any::<u64>(), row in any::<u8>(), col in any::<u8>()) {
        let pos = (row % config.height, col % config.width);
        // with no mines, clearing the last flag satisfies the flag rule
        prop_assume!(config.mines > 0);
        let mut engine = BoardEngine::initialize(&config, RandomLayoutGenerator::new(seed)).unwrap();
        prop_assume!(config.mines != 1 || !engine.mine_layout().contains_mine(pos));
        let before = engine.clone();

        engine.toggle_flag(pos).unwrap();
        engine.toggle_flag(pos).unwrap();

        prop_assert_eq!(engine, before);
    }

    #[test]
    fn moves_after_loss_do_not_mutate(config in configs(), seed in any::<u64>(), row in any::<u8>(), col in any::<u8>()) {
        prop_assume!(config.mines > 0);
        let mut game = Game::with_config(config, seed).unwrap();
        let mine = game.engine().mine_layout().mine_positions().next().unwrap();
        prop_assert_eq!(game.reveal(mine).unwrap().status, GameStatus::Lost);

        let before = game.snapshot();
        let pos = (row % config.height, col % config.width);
        prop_assert_eq!(game.reveal(pos), Err(GameError::AlreadyEnded));
        prop_assert_eq!(game.toggle_flag(pos), Err(GameError::AlreadyEnded));
        prop_assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn moves_after_win_do_not_mutate(config in configs(), seed in any::<u64>(), row in any::<u8>(), col in any::<u8>()) {
        prop_assume!(config.mines > 0);
        let mut game = Game::with_config(config, seed).unwrap();
        let mines: Vec<_> = game.engine().mine_layout().mine_positions().collect();
        for &pos in &mines {
            game.toggle_flag(pos).unwrap();
        }
        prop_assert_eq!(game.status(), GameStatus::Won);

        let before = game.snapshot();
        let pos = (row % config.height, col % config.width);
        prop_assert_eq!(game.reveal(pos), Err(GameError::AlreadyEnded));
        prop_assert_eq!(game.toggle_flag(pos), Err(GameError::AlreadyEnded));
        prop_assert_eq!(game.snapshot(), before);
    }
}
