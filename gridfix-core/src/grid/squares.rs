//! National Grid 100 km square table
//!
//! Every 100 km square of the OSGB36 grid inside the 700 km x 1300 km
//! national grid box, keyed by its two-letter code. The first letter names
//! the 500 km square (S, T, N, O, H, J), the second the 100 km square inside
//! it, lettered A-Z without I from the north-west corner.

/// One 100 km x 100 km square of the national grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSquare {
    /// Two upper-case letters, e.g. "SX"
    pub letters: &'static str,
    /// Index of the square's west edge in 100 km units
    pub east: u8,
    /// Index of the square's south edge in 100 km units
    pub north: u8,
}

impl GridSquare {
    /// Easting of the square's south-west corner in meters
    pub fn false_easting(&self) -> u32 {
        self.east as u32 * super::SQUARE_SIZE
    }

    /// Northing of the square's south-west corner in meters
    pub fn false_northing(&self) -> u32 {
        self.north as u32 * super::SQUARE_SIZE
    }
}

impl std::fmt::Display for GridSquare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters)
    }
}

const fn sq(letters: &'static str, east: u8, north: u8) -> GridSquare {
    GridSquare {
        letters,
        east,
        north,
    }
}

/// All squares, north to south and west to east
#[rustfmt::skip]
pub static SQUARES: &[GridSquare] = &[
    sq("HL", 0, 12), sq("HM", 1, 12), sq("HN", 2, 12), sq("HO", 3, 12),
    sq("HP", 4, 12), sq("JL", 5, 12), sq("JM", 6, 12),
    sq("HQ", 0, 11), sq("HR", 1, 11), sq("HS", 2, 11), sq("HT", 3, 11),
    sq("HU", 4, 11), sq("JQ", 5, 11), sq("JR", 6, 11),
    sq("HV", 0, 10), sq("HW", 1, 10), sq("HX", 2, 10), sq("HY", 3, 10),
    sq("HZ", 4, 10), sq("JV", 5, 10), sq("JW", 6, 10),
    sq("NA", 0, 9), sq("NB", 1, 9), sq("NC", 2, 9), sq("ND", 3, 9),
    sq("NE", 4, 9), sq("OA", 5, 9), sq("OB", 6, 9),
    sq("NF", 0, 8), sq("NG", 1, 8), sq("NH", 2, 8), sq("NJ", 3, 8),
    sq("NK", 4, 8), sq("OF", 5, 8), sq("OG", 6, 8),
    sq("NL", 0, 7), sq("NM", 1, 7), sq("NN", 2, 7), sq("NO", 3, 7),
    sq("NP", 4, 7), sq("OL", 5, 7), sq("OM", 6, 7),
    sq("NQ", 0, 6), sq("NR", 1, 6), sq("NS", 2, 6), sq("NT", 3, 6),
    sq("NU", 4, 6), sq("OQ", 5, 6), sq("OR", 6, 6),
    sq("NV", 0, 5), sq("NW", 1, 5), sq("NX", 2, 5), sq("NY", 3, 5),
    sq("NZ", 4, 5), sq("OV", 5, 5), sq("OW", 6, 5),
    sq("SA", 0, 4), sq("SB", 1, 4), sq("SC", 2, 4), sq("SD", 3, 4),
    sq("SE", 4, 4), sq("TA", 5, 4), sq("TB", 6, 4),
    sq("SF", 0, 3), sq("SG", 1, 3), sq("SH", 2, 3), sq("SJ", 3, 3),
    sq("SK", 4, 3), sq("TF", 5, 3), sq("TG", 6, 3),
    sq("SL", 0, 2), sq("SM", 1, 2), sq("SN", 2, 2), sq("SO", 3, 2),
    sq("SP", 4, 2), sq("TL", 5, 2), sq("TM", 6, 2),
    sq("SQ", 0, 1), sq("SR", 1, 1), sq("SS", 2, 1), sq("ST", 3, 1),
    sq("SU", 4, 1), sq("TQ", 5, 1), sq("TR", 6, 1),
    sq("SV", 0, 0), sq("SW", 1, 0), sq("SX", 2, 0), sq("SY", 3, 0),
    sq("SZ", 4, 0), sq("TV", 5, 0), sq("TW", 6, 0),
];

/// Look up a square by its exact two-letter code.
///
/// Matching is case sensitive; callers upper-case user input first.
pub fn by_letters(letters: &str) -> Option<&'static GridSquare> {
    SQUARES.iter().find(|s| s.letters == letters)
}

/// Look up the square covering a 100 km block
pub fn by_block(east: u32, north: u32) -> Option<&'static GridSquare> {
    SQUARES
        .iter()
        .find(|s| s.east as u32 == east && s.north as u32 == north)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_squares() {
        assert_eq!(by_letters("SX").map(|s| (s.east, s.north)), Some((2, 0)));
        assert_eq!(by_letters("NS").map(|s| (s.east, s.north)), Some((2, 6)));
        assert_eq!(by_letters("HP").map(|s| (s.east, s.north)), Some((4, 12)));
        assert_eq!(by_letters("TG").map(|s| (s.east, s.north)), Some((6, 3)));
        assert_eq!(by_letters("SV").map(|s| (s.east, s.north)), Some((0, 0)));
    }

    #[test]
    fn test_exact_match_only() {
        assert!(by_letters("sx").is_none());
        assert!(by_letters("ZZ").is_none());
        assert!(by_letters("S").is_none());
        assert!(by_letters("SXX").is_none());
    }

    #[test]
    fn test_no_duplicates() {
        let letters: HashSet<_> = SQUARES.iter().map(|s| s.letters).collect();
        let blocks: HashSet<_> = SQUARES.iter().map(|s| (s.east, s.north)).collect();
        assert_eq!(letters.len(), SQUARES.len());
        assert_eq!(blocks.len(), SQUARES.len());
    }

    #[test]
    fn test_covers_whole_box() {
        assert_eq!(SQUARES.len(), 7 * 13);
        for east in 0..7 {
            for north in 0..13 {
                assert!(by_block(east, north).is_some(), "{},{}", east, north);
            }
        }
        assert!(by_block(7, 0).is_none());
        assert!(by_block(0, 13).is_none());
    }

    #[test]
    fn test_block_and_letters_agree() {
        for square in SQUARES {
            let found = by_block(square.east as u32, square.north as u32).unwrap();
            assert_eq!(found.letters, square.letters);
        }
    }
}
