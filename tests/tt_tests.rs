use chess_core::tt::{Bound, TranspositionTable};
use chess_core::types::{Move, Square};

#[test]
fn deeper_store_replaces_the_depth_preferred_slot() {
    let tt = TranspositionTable::new(1);
    let key = 0xdead_beef_u64;
    let mv = Move::quiet(Square::new(0, 0), Square::new(1, 0));

    tt.store(key, 1, 100, Bound::Exact, mv, 0);
    let entry = tt.probe(key, 0).expect("entry missing after first store");
    assert_eq!(entry.depth, 1);

    tt.store(key, 0, 50, Bound::Exact, mv, 0);
    let entry = tt.probe(key, 0).expect("entry missing after shallower store");
    assert_eq!(entry.depth, 1, "a shallower store must not evict the depth-preferred slot");

    tt.store(key, 5, 200, Bound::Exact, mv, 0);
    let entry = tt.probe(key, 0).expect("entry missing after deeper store");
    assert_eq!(entry.depth, 5);
}

#[test]
fn a_new_generation_lets_a_shallower_store_overwrite_the_depth_preferred_slot() {
    let tt = TranspositionTable::new(1);
    let mv = Move::quiet(Square::new(0, 0), Square::new(1, 0));
    let key = 12345u64;
    tt.store(key, 4, 10, Bound::Exact, mv, 0);
    tt.new_generation();

    // Same key, shallower depth, but a new generation: unlike the
    // same-generation case this must win the depth-preferred slot.
    tt.store(key, 1, 20, Bound::Exact, mv, 0);
    let entry = tt.probe(key, 0).expect("entry missing");
    assert_eq!(entry.depth, 1);
}

#[test]
fn clear_empties_every_bucket() {
    let tt = TranspositionTable::new(1);
    let mv = Move::quiet(Square::new(0, 0), Square::new(1, 0));
    tt.store(42, 3, 5, Bound::Exact, mv, 0);
    assert!(tt.probe(42, 0).is_some());
    tt.clear();
    assert!(tt.probe(42, 0).is_none());
}

#[test]
fn mate_scores_are_adjusted_relative_to_the_probing_ply() {
    let tt = TranspositionTable::new(1);
    let mv = Move::null();
    let mate_score = chess_core::tt::MATE_SCORE - 3;
    tt.store(777, 10, mate_score, Bound::Exact, mv, 2);
    let entry = tt.probe(777, 2).expect("entry missing");
    assert_eq!(entry.score, mate_score);
}
