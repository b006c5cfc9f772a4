//! Verhoeff check-digit validation for 12-digit identifiers.

/// Dihedral group D5 multiplication table.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position-dependent permutation table.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

const INV: [u8; 10] = [0, 4, 3, 2, 1, 5, 6, 7, 8, 9];

/// Digit count of a national identifier.
pub const IDENTIFIER_DIGITS: usize = 12;

/// True iff `input` carries exactly 12 ASCII digits (other characters are
/// ignored) and they satisfy the Verhoeff check. Never panics.
pub fn verhoeff_valid(input: &str) -> bool {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    if digits.len() != IDENTIFIER_DIGITS {
        return false;
    }

    let check = digits
        .iter()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, &d)| D[c as usize][P[i % 8][d as usize] as usize]);
    check == 0
}

/// Check digit to append to an all-digit `payload`.
///
/// Returns `None` for an empty payload or one containing non-digits.
pub fn verhoeff_check_digit(payload: &str) -> Option<u8> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Offset by one: the check digit itself will occupy position 0.
    let c = payload
        .bytes()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, b)| D[c as usize][P[(i + 1) % 8][(b - b'0') as usize] as usize]);
    Some(INV[c as usize])
}
