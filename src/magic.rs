//! Precomputed attack tables: magic bitboards for sliding pieces, plus
//! plain lookup tables for knights, kings and pawns.
//!
//! For each square the rook/bishop table stores a relevant-occupancy mask,
//! a magic multiplier, a shift, and an attack table; the lookup is
//! `table[((occ & mask) * magic) >> shift]`. Magic numbers are not
//! hardcoded: each square's magic is found once, at process start, by
//! trial multiplication against every occupancy subset of its mask (the
//! standard approach when a published magic-number table isn't being
//! carried verbatim). The result is immutable process-wide storage.

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Bitboard, Color, Square};

const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

fn sliding_mask(sq: usize, dirs: [(i32, i32); 4], edge_exclusive: bool) -> u64 {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let mut mask = 0u64;
    for (dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let at_edge = r == 0 || r == 7 || f == 0 || f == 7;
            if edge_exclusive && at_edge {
                break;
            }
            mask |= 1u64 << (r * 8 + f);
            r += dr;
            f += df;
        }
    }
    mask
}

fn sliding_attacks(sq: usize, dirs: [(i32, i32); 4], occupancy: u64) -> u64 {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let mut attacks = 0u64;
    for (dr, df) in dirs {
        let mut r = rank + dr;
        let mut f = file + df;
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if occupancy & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Enumerate every occupancy subset of `mask` (the "carry-rippler" trick).
fn subsets_of(mask: u64) -> Vec<u64> {
    let mut subsets = Vec::with_capacity(1 << mask.count_ones());
    let mut subset = 0u64;
    loop {
        subsets.push(subset);
        subset = subset.wrapping_sub(mask) & mask;
        if subset == 0 {
            break;
        }
    }
    subsets
}

struct MagicEntry {
    mask: u64,
    magic: u64,
    shift: u32,
    offset: usize,
}

fn find_magic(sq: usize, mask: u64, dirs: [(i32, i32); 4], rng: &mut StdRng) -> (u64, u32, Vec<u64>) {
    let bits = mask.count_ones();
    let shift = 64 - bits;
    let subsets = subsets_of(mask);
    let reference: Vec<u64> = subsets
        .iter()
        .map(|&occ| sliding_attacks(sq, dirs, occ))
        .collect();

    loop {
        let candidate: u64 = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if (candidate.wrapping_mul(mask)) >> 56 < 6 {
            continue; // heuristic: reject magics with poor top-byte spread
        }
        let mut table = vec![u64::MAX; 1 << bits];
        let mut ok = true;
        for (occ, &attacks) in subsets.iter().zip(reference.iter()) {
            let index = ((occ.wrapping_mul(candidate)) >> shift) as usize;
            if table[index] == u64::MAX {
                table[index] = attacks;
            } else if table[index] != attacks {
                ok = false;
                break;
            }
        }
        if ok {
            return (candidate, shift, table);
        }
    }
}

struct SliderTables {
    entries: [MagicEntry; 64],
    attacks: Vec<u64>,
}

impl SliderTables {
    #[inline]
    fn attacks(&self, sq: usize, occupancy: u64) -> u64 {
        let e = &self.entries[sq];
        let index = ((occupancy & e.mask).wrapping_mul(e.magic)) >> e.shift;
        self.attacks[e.offset + index as usize]
    }
}

fn build_slider_tables(dirs: [(i32, i32); 4], seed: u64) -> SliderTables {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut flat = Vec::new();
    let entries: Vec<MagicEntry> = (0..64)
        .map(|sq| {
            let mask = sliding_mask(sq, dirs, true);
            let (magic, shift, table) = find_magic(sq, mask, dirs, &mut rng);
            let offset = flat.len();
            flat.extend_from_slice(&table);
            MagicEntry {
                mask,
                magic,
                shift,
                offset,
            }
        })
        .collect();
    SliderTables {
        entries: entries.try_into().unwrap_or_else(|_| unreachable!()),
        attacks: flat,
    }
}

static ROOK_TABLES: Lazy<SliderTables> = Lazy::new(|| build_slider_tables(ROOK_DIRS, 0x526F_6F6B_4D61_6769));
static BISHOP_TABLES: Lazy<SliderTables> =
    Lazy::new(|| build_slider_tables(BISHOP_DIRS, 0x4269_7368_6F70_4D61));

static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut table = [0u64; 64];
    const DELTAS: [(i32, i32); 8] = [
        (1, 2), (2, 1), (2, -1), (1, -2),
        (-1, -2), (-2, -1), (-2, 1), (-1, 2),
    ];
    for sq in 0..64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        let mut bb = 0u64;
        for (dr, df) in DELTAS {
            let r = rank + dr;
            let f = file + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                bb |= 1u64 << (r * 8 + f);
            }
        }
        table[sq] = bb;
    }
    table
});

static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    let mut table = [0u64; 64];
    for sq in 0..64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        let mut bb = 0u64;
        for dr in -1..=1 {
            for df in -1..=1 {
                if dr == 0 && df == 0 {
                    continue;
                }
                let r = rank + dr;
                let f = file + df;
                if (0..8).contains(&r) && (0..8).contains(&f) {
                    bb |= 1u64 << (r * 8 + f);
                }
            }
        }
        table[sq] = bb;
    }
    table
});

/// `PAWN_ATTACKS[color.index()][square]`
static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut table = [[0u64; 64]; 2];
    for sq in 0..64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        for (color_idx, dr) in [(0usize, 1i32), (1usize, -1i32)] {
            let r = rank + dr;
            let mut bb = 0u64;
            if (0..8).contains(&r) {
                for df in [-1, 1] {
                    let f = file + df;
                    if (0..8).contains(&f) {
                        bb |= 1u64 << (r * 8 + f);
                    }
                }
            }
            table[color_idx][sq] = bb;
        }
    }
    table
});

#[inline]
#[must_use]
pub(crate) fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(ROOK_TABLES.attacks(sq.index(), occupancy.0))
}

#[inline]
#[must_use]
pub(crate) fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    Bitboard(BISHOP_TABLES.attacks(sq.index(), occupancy.0))
}

#[inline]
#[must_use]
pub(crate) fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy) | bishop_attacks(sq, occupancy)
}

#[inline]
#[must_use]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.index()])
}

#[inline]
#[must_use]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.index()])
}

#[inline]
#[must_use]
pub(crate) fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_attacks_match_ray_cast_on_random_occupancies() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let sq = rng.gen_range(0..64);
            let occ: u64 = rng.gen();
            let expected = sliding_attacks(sq, ROOK_DIRS, occ);
            let got = rook_attacks(Square::from_index(sq), Bitboard(occ));
            assert_eq!(got.0, expected, "square {sq} occ {occ:#x}");
        }
    }

    #[test]
    fn bishop_attacks_match_ray_cast_on_random_occupancies() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let sq = rng.gen_range(0..64);
            let occ: u64 = rng.gen();
            let expected = sliding_attacks(sq, BISHOP_DIRS, occ);
            let got = bishop_attacks(Square::from_index(sq), Bitboard(occ));
            assert_eq!(got.0, expected, "square {sq} occ {occ:#x}");
        }
    }

    #[test]
    fn knight_attacks_corner() {
        let a1 = Square::new(0, 0);
        let attacks = knight_attacks(a1);
        assert_eq!(attacks.popcount(), 2);
    }

    #[test]
    fn king_attacks_center_count() {
        let e4 = Square::new(3, 4);
        assert_eq!(king_attacks(e4).popcount(), 8);
    }

    #[test]
    fn pawn_attacks_are_color_dependent() {
        let e4 = Square::new(3, 4);
        let white = pawn_attacks(e4, Color::White);
        let black = pawn_attacks(e4, Color::Black);
        assert_ne!(white, black);
        assert_eq!(white.popcount(), 2);
    }
}
