use pawnstorm::{
    check, square::retain_on_board, Board, Game, Move, Opponent, Outcome, Phase, Piece,
    PlayError, Role, SearchConfig, Side, Square,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

#[test]
fn test_king_pawn_steps() {
    let mut game = Game::new();
    assert_eq!(game.legal_moves(sq("e1")).expect("kings").as_slice(), &[sq("e2"), sq("e3")]);

    game.play_str("e1", "e2").expect("legal");
    game.play_str("h6", "h5").expect("legal");
    assert_eq!(game.legal_moves(sq("e2")).expect("kings").as_slice(), &[sq("e3")]);
}

#[test]
fn test_file_attack_is_blocked() {
    let mut board: Board = "7r/8/8/8/8/8/8/7K".parse().expect("valid placement");
    assert_eq!(check::is_king_attacked(&board, Side::First), Ok(true));

    for role in Role::ALL {
        for side in Side::ALL {
            let mut blocked = board.clone();
            blocked.set(sq("h4"), Some(Piece::new(50, side, role)));
            assert_eq!(
                check::is_king_attacked(&blocked, Side::First),
                Ok(false),
                "{side} {role} on h4"
            );
        }
    }

    board.set(sq("h7"), None);
    assert_eq!(check::is_king_attacked(&board, Side::First), Ok(false));
}

#[test]
fn test_lone_king_against_knight() {
    let game = Game::from_placement("8/8/8/8/5n2/2k5/8/K7", Side::First).expect("valid");
    assert_eq!(game.check_status().map(|s| s.in_check), Ok(false));
    assert_eq!(game.terminal_status(), Ok(Some(Outcome::InsufficientMaterial)));
}

#[test]
fn test_bare_kings_are_not_stalemate() {
    let game = Game::from_placement("8/8/8/8/8/8/2k5/K7", Side::First).expect("valid");
    assert_eq!(game.terminal_status(), Ok(Some(Outcome::InsufficientMaterial)));
}

#[test]
fn test_cannot_expose_own_king() {
    let mut game = Game::from_placement("4r1k1/8/8/8/8/8/4N3/4K3", Side::First).expect("valid");
    let before = game.board().clone();
    assert_eq!(
        game.play_str("e1", "c2"),
        Err(PlayError::IllegalMove {
            from: sq("e1"),
            to: sq("c2")
        })
    );
    assert_eq!(game.board(), &before);
}

#[test]
fn test_check_must_be_answered() {
    let mut game = Game::new();
    for (from, to) in [("f1", "f2"), ("e6", "e4"), ("g1", "g3")] {
        game.play_str(from, to).expect("legal");
    }
    // The queen mates on h3.
    game.play_str("d7", "h3").expect("legal");
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Side::Second
        })
    );
}

#[test]
fn test_repetition_is_attributed() {
    // A lone knight draws at once.
    let game = Game::from_placement("k7/8/8/8/8/8/8/K1N5", Side::First).expect("valid");
    assert_eq!(game.outcome(), Some(Outcome::InsufficientMaterial));

    let mut game = Game::from_placement("k7/8/8/8/8/8/p7/K1R5", Side::Second).expect("valid");
    let moves = [
        ("a7", "b7"),
        ("c0", "c3"),
        ("b7", "a7"),
        ("c3", "c0"),
        ("a7", "b7"),
        ("c0", "c3"),
        ("b7", "a7"),
        ("c3", "c0"),
        ("a7", "b7"),
    ];
    for (from, to) in moves {
        assert_eq!(game.phase(), Phase::Idle);
        game.play_str(from, to).expect("legal");
    }

    match game.outcome() {
        Some(Outcome::RepetitionDraw(repetition)) => {
            assert_eq!(repetition.side, Side::Second);
            assert_eq!(repetition.piece.role, Role::King);
            assert_eq!(repetition.to, sq("b7"));
        }
        other => panic!("expected repetition draw, got {other:?}"),
    }
    assert!(matches!(
        game.play_str("c3", "c0"),
        Err(PlayError::GameOver(Outcome::RepetitionDraw(_)))
    ));
}

#[test]
fn test_opponent_does_not_touch_live_board() {
    init_tracing();

    let mut game = Game::new();
    game.play_str("d1", "d3").expect("legal");
    let before = game.clone();

    let m = game.compute_opponent_move().expect("has moves");
    assert_eq!(game.board(), before.board());
    assert_eq!(game.history(), before.history());

    let played = game.play_opponent(&Opponent::default()).expect("has moves");
    assert_eq!(played, m);
    assert_eq!(game.turn(), Side::First);
}

#[test]
fn test_opponent_escapes_check() {
    init_tracing();

    let mut game = Game::from_placement("4k3/8/8/8/8/8/8/R3K3", Side::First).expect("valid");
    game.play_str("a0", "a7").expect("legal");
    assert_eq!(game.check_status().map(|s| s.in_check), Ok(true));

    let escapes = game
        .check_escapes()
        .expect("kings")
        .expect("in check");
    let m = game.play_opponent(&Opponent::default()).expect("has moves");
    assert!(escapes
        .moves_from(m.from)
        .is_some_and(|to| to.contains(&m.to)));
    assert_eq!(check::is_king_attacked(game.board(), Side::Second), Ok(false));
}

#[test]
fn test_opponent_auto_promotes() {
    init_tracing();

    // Taking the knight on g0 crowns the pawn.
    let mut game = Game::from_placement("K7/8/8/8/8/k7/7p/6N1", Side::Second).expect("valid");
    let m = game.play_opponent(&Opponent::default()).expect("has moves");
    assert_eq!(m, Move::new(sq("h1"), sq("g0")));

    let queen = game.board().get(sq("g0")).expect("crowned");
    assert_eq!(queen.role, Role::Queen);
    assert_eq!(queen.side, Side::Second);
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.turn(), Side::First);
}

fn self_play(half_moves: usize) -> (Vec<Move>, Option<Outcome>) {
    let mut game = Game::new();
    let opponent = Opponent::new(SearchConfig::default().with_max_plies(8));
    let mut moves = Vec::new();

    for _ in 0..half_moves {
        if game.outcome().is_some() {
            break;
        }
        let mover = game.turn();
        let m = game.play_opponent(&opponent).expect("game in progress");
        assert_eq!(
            check::is_king_attacked(game.board(), mover),
            Ok(false),
            "{m} exposed the king of the {mover} side\n{:?}",
            game.board()
        );
        assert_eq!(game.board().get(m.to).map(|p| p.side), Some(mover));
        moves.push(m);
    }

    (moves, game.outcome())
}

#[test]
fn test_self_play() {
    init_tracing();

    let (moves, outcome) = self_play(60);
    assert!(!moves.is_empty());
    assert!(moves.len() == 60 || outcome.is_some());

    // Deterministic.
    assert_eq!(self_play(60), (moves, outcome));
}

#[test]
fn test_move_string_gate() {
    let squares = retain_on_board(["a0", "h7", "e8", "i0", "e", "e-1", "e10", "E1"]);
    assert_eq!(squares, vec![sq("a0"), sq("h7")]);

    let mut game = Game::new();
    assert_eq!(game.play_str("e1", "e"), Err(PlayError::InvalidMoveFormat));
    assert_eq!(game.play_str("z1", "e3"), Err(PlayError::InvalidMoveFormat));
}
