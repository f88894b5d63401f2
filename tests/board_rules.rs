//! Integration tests for the board rules engine.
//!
//! These mirror the upstream `board_test.cpp` scenarios (capture by
//! surrounding, suicide-then-capture, simple ko, eye classification,
//! legal-move enumeration, and training-vector shape), exercised only
//! through the public `Board` API.

use michi_rust::board::Board;
use michi_rust::error::{BoardError, PosStatus};
use michi_rust::grid::Player;
use michi_rust::point::GridPoint;

fn gp(x: usize, y: usize) -> GridPoint {
    GridPoint::new(x, y)
}

fn init_logging() {
    let _ = env_logger::try_init();
}

#[test]
fn capture_by_surrounding_removes_the_group_and_credits_liberties() {
    init_logging();
    // A 2x2 block of White stones surrounded by Black on a 19x19 board.
    let mut b = Board::new_square(19);
    let white_block = [gp(5, 5), gp(5, 6), gp(6, 5), gp(6, 6)];
    for &p in &white_block {
        b.place(p, Player::White);
    }
    let ring = [
        gp(4, 5),
        gp(4, 6),
        gp(5, 4),
        gp(5, 7),
        gp(6, 4),
        gp(6, 7),
        gp(7, 5),
        gp(7, 6),
    ];
    for &p in &ring {
        b.place(p, Player::Black);
    }
    for &p in &white_block {
        assert!(b.point_state(p).is_empty(), "expected {p:?} captured");
    }
    // Each ring stone should now see at least the vacated block as a liberty.
    let ring_handle = b.point_group(gp(4, 5));
    assert!(b.group(ring_handle).unwrap().liberty >= 1);
}

#[test]
fn suicide_is_rejected_without_mutating_the_board() {
    init_logging();
    let mut b = Board::new_square(9);
    b.place(gp(0, 1), Player::Black);
    b.place(gp(1, 0), Player::Black);
    assert_eq!(b.pos_status(gp(0, 0), Player::White), PosStatus::Suicide);

    let err = b.try_place(gp(0, 0), Player::White).unwrap_err();
    assert_eq!(
        err,
        BoardError::IllegalMove {
            point: gp(0, 0),
            status: PosStatus::Suicide
        }
    );
    // The rejected move must not have touched the board.
    assert!(b.point_state(gp(0, 0)).is_empty());
}

#[test]
fn full_ring_suicide_captures_the_surrounded_color() {
    init_logging();
    // On a 3x3 board, Black rings a lone White stone at the center, with
    // White's stone placed mid-sequence (before the ring closes). White is
    // captured the instant its last liberty is filled, regardless of move
    // order among the ring stones.
    let mut b = Board::new(3, 3);
    let moves = [
        (gp(0, 0), Player::Black),
        (gp(0, 1), Player::Black),
        (gp(0, 2), Player::Black),
        (gp(1, 0), Player::Black),
        (gp(1, 1), Player::White),
        (gp(1, 2), Player::Black),
        (gp(2, 0), Player::Black),
        (gp(2, 1), Player::Black),
        (gp(2, 2), Player::Black),
    ];
    for (p, player) in moves {
        b.try_place(p, player).expect("every move in this sequence is legal");
    }
    assert!(b.point_state(gp(1, 1)).is_empty());
    assert_eq!(b.all_valid_positions(Player::White), vec![gp(1, 1)]);
}

#[test]
fn white_played_last_into_the_ring_captures_instead_of_committing_suicide() {
    init_logging();
    // TestBoardClassPlace2's actual move order: Black closes a complete
    // 8-stone ring around a 3x3 board first (its own group left with
    // exactly one liberty, the center), then White plays that center point
    // last. The move has every hallmark of suicide (all four orthogonal
    // neighbors are opposing stones, the new stone's own group would have
    // zero liberties) but captures Black's whole ring instead, since the
    // capture check runs before the zero-liberties-and-no-capture rule.
    let mut b = Board::new(3, 3);
    let black_ring = [
        gp(0, 0),
        gp(0, 1),
        gp(0, 2),
        gp(1, 0),
        gp(1, 2),
        gp(2, 0),
        gp(2, 1),
        gp(2, 2),
    ];
    for &p in &black_ring {
        b.try_place(p, Player::Black)
            .expect("each ring stone still has a liberty when it is placed");
    }
    assert_eq!(b.pos_status(gp(1, 1), Player::White), PosStatus::Ok);

    b.try_place(gp(1, 1), Player::White)
        .expect("filling Black's last liberty captures instead of committing suicide");

    for &p in &black_ring {
        assert!(b.point_state(p).is_empty(), "expected {p:?} captured");
    }
    let white_handle = b.point_group(gp(1, 1));
    let white = b.group(white_handle).unwrap();
    assert_eq!(white.stone_count, 1);
    assert_eq!(white.liberty, 4);
}

#[test]
fn simple_ko_point_is_recorded_and_enforced() {
    init_logging();
    let mut b = Board::new(5, 5);
    let moves = [
        (gp(0, 1), Player::Black),
        (gp(0, 2), Player::White),
        (gp(1, 0), Player::Black),
        (gp(1, 2), Player::Black),
        (gp(1, 3), Player::White),
        (gp(2, 1), Player::Black),
        (gp(2, 2), Player::White),
        (gp(1, 1), Player::White),
    ];
    for (p, player) in moves {
        b.place(p, player);
    }

    assert_eq!(b.simple_ko_point(), Some(gp(1, 2)));
    assert_eq!(b.pos_status(gp(1, 2), Player::Black), PosStatus::Ko);

    let err = b.try_place(gp(1, 2), Player::Black).unwrap_err();
    assert_eq!(
        err,
        BoardError::IllegalMove {
            point: gp(1, 2),
            status: PosStatus::Ko
        }
    );

    // The other color may fill it freely: it is not a ko violation for them.
    assert!(b.try_place(gp(1, 2), Player::White).is_ok());
    assert!(b.simple_ko_point().is_none());
}

#[test]
fn true_eye_classification_on_the_reference_shape() {
    init_logging();
    let mut b = Board::new(5, 5);
    let moves = [
        (gp(0, 1), Player::White),
        (gp(1, 0), Player::White),
        (gp(1, 1), Player::White),
        (gp(1, 2), Player::White),
        (gp(1, 3), Player::White),
        (gp(1, 4), Player::White),
        (gp(0, 4), Player::White),
        (gp(2, 0), Player::White),
        (gp(2, 2), Player::Black),
        (gp(3, 0), Player::Black),
        (gp(3, 1), Player::Black),
        (gp(3, 2), Player::Black),
        (gp(3, 3), Player::Black),
    ];
    for (p, player) in moves {
        b.place(p, player);
    }

    assert!(b.is_true_eye(gp(0, 0), Player::White));
    assert!(!b.is_true_eye(gp(0, 0), Player::Black));
    assert!(!b.is_eye(gp(0, 2), Player::White));
    assert!(!b.is_semi_eye(gp(0, 3), Player::White));
    assert!(b.is_fake_eye(gp(2, 1), Player::Black));
    assert!(b.is_fake_eye(gp(2, 1), Player::White));

    // A true eye of White's own color should be excluded from White's good
    // moves, but remains a legal (if bad) move.
    assert!(b.all_valid_positions(Player::White).contains(&gp(0, 0)));
    assert!(!b.all_good_positions(Player::White).contains(&gp(0, 0)));
}

#[test]
fn training_vector_matches_the_pinned_shape() {
    init_logging();
    let mut b = Board::new_square(19);
    // A Black stone in a corner has two liberties; filling one of them
    // leaves it in atari without capturing it.
    b.place(gp(0, 0), Player::Black);
    b.place(gp(0, 1), Player::White);

    let req = b.generate_request_v1(Player::Black);
    assert_eq!(req.our_group_lib1_size(), 19 * 19);
    assert_eq!(req.their_group_lib1.len(), 19 * 19);
    assert_eq!(req.empty.len(), 19 * 19);

    let black_idx = 0 * 19 + 0;
    let white_idx = 0 * 19 + 1;
    assert_eq!(req.our_group_lib1[black_idx], 1, "the cornered Black stone is in atari");
    assert_eq!(req.their_group_lib1[white_idx], 0, "the White stone still has a liberty");
}

#[test]
fn clone_produces_an_independent_board() {
    init_logging();
    let mut b = Board::new_square(9);
    b.place(gp(4, 4), Player::Black);
    let mut clone = b.clone();
    clone.place(gp(4, 5), Player::White);

    assert!(b.point_state(gp(4, 5)).is_empty());
    assert_eq!(
        clone.point_state(gp(4, 4)),
        michi_rust::grid::PointState::Black
    );
}

#[test]
fn legal_move_counts_on_the_pinned_5x5_graph() {
    init_logging();
    // TestBoardClassLegalMove1's actual graph and move order (row, col;
    // numeric labels denote play order): nine empty points remain once all
    // sixteen stones are down, and only seven of those are legal for each
    // color (a different two points are suicide for Black vs. White).
    //
    //     O    1_b  2_w  3_w  O
    //     O    4_b  5_w  O    6_w
    //     7_b  8_b  9_b  10_w 11_w
    //     O    12_b O    13_b 14_b
    //     O    O    15_b 16_w O
    let mut b = Board::new(5, 5);
    let moves = [
        (gp(0, 1), Player::Black),
        (gp(0, 2), Player::White),
        (gp(0, 3), Player::White),
        (gp(1, 1), Player::Black),
        (gp(1, 2), Player::White),
        (gp(1, 4), Player::White),
        (gp(2, 0), Player::Black),
        (gp(2, 1), Player::Black),
        (gp(2, 2), Player::Black),
        (gp(2, 3), Player::White),
        (gp(2, 4), Player::White),
        (gp(3, 1), Player::Black),
        (gp(3, 3), Player::Black),
        (gp(3, 4), Player::Black),
        (gp(4, 2), Player::Black),
        (gp(4, 3), Player::White),
    ];
    for (p, player) in moves {
        b.try_place(p, player).expect("every move in this graph is legal");
    }

    let black_valid = b.all_valid_positions(Player::Black);
    let white_valid = b.all_valid_positions(Player::White);
    assert_eq!(black_valid.len(), 7);
    assert_eq!(white_valid.len(), 7);
}
