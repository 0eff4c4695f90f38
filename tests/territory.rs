use ghost_ai_rs::{
    a_star::{self, PathResult},
    territory::{controlled_area, distance_field, DistanceField},
    Agent, Board, GameState, Position,
};

/// A 7x7 board whose only walkable cells are its outer ring.
fn ring_board() -> Board {
    "
    .......
    .#####.
    .#####.
    .#####.
    .#####.
    .#####.
    .......
    "
    .parse()
    .unwrap()
}

#[test]
fn controlled_area_shrinks_as_ghost_advances_along_corridor() {
    let board: Board = "
        .......
        #######
        #######
        #######
        #######
        #######
        #######
    "
    .parse()
    .unwrap();
    let pacman = (0, 5);

    let mut previous = usize::MAX;
    for col in 0..5 {
        let size = controlled_area(pacman, &[(0, col), (0, 0), (0, 0)], &board).size();
        assert!(size <= previous, "area grew to {size} with ghost at column {col}");
        previous = size;
    }
    assert_eq!(previous, 2);
}

#[test]
fn controlled_area_shrinks_as_ghost_advances_around_ring() {
    let board = ring_board();
    let pacman = (0, 3);
    let others = (6, 3);

    let PathResult::Path(path) = a_star::search(&board, others, pacman) else {
        panic!("ring should connect the ghost to the pacman");
    };

    let mut previous = controlled_area(pacman, &[others, others, others], &board).size();
    assert_eq!(previous, 11);
    for &step in path.iter().filter(|&&pos| pos != pacman) {
        let size = controlled_area(pacman, &[step, others, others], &board).size();
        assert!(size <= previous, "area grew to {size} with ghost at {step:?}");
        previous = size;
    }
}

#[test]
fn distance_field_distinguishes_source_from_unvisited() {
    let board: Board = "
        ...#.
        ...#.
        ####.
        .....
        .....
    "
    .parse()
    .unwrap();
    let state = GameState::new(board, (0, 0), &[(4, 4), (3, 0), (0, 4)]).unwrap();
    let field = distance_field(Agent::Pacman, &state.positions(), state.board());

    assert_eq!(field.get((0, 0)), Some(0));
    assert_eq!(field.get((1, 2)), Some(3));
    assert_eq!(field.get((2, 2)), None);
    assert_eq!(field.get((4, 4)), None);
    assert_eq!(field.raw()[[4, 4]], DistanceField::UNREACHABLE);
    assert_ne!(DistanceField::UNREACHABLE, 0);

    // the pacman's pocket is its own territory
    let map = controlled_area(state.pacman(), state.ghosts(), state.board());
    assert_eq!(map.size(), 6);
}

#[test]
fn path_lengths_on_ring() {
    let board = ring_board();
    let cases: [(Position, Position, usize); 3] =
        [((0, 0), (6, 6), 12), ((0, 3), (6, 3), 12), ((3, 0), (0, 1), 4)];
    for (start, goal, expected) in cases {
        let result = a_star::search(&board, start, goal);
        assert_eq!(result.distance(), Some(expected), "{start:?} -> {goal:?}");
    }
    assert_eq!(a_star::search(&board, (0, 0), (3, 3)), PathResult::Unreachable);
}
