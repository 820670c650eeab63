//! Natural ordering for row numbers: numeric prefix first, lexical tiebreak,
//! so "2" < "10" and "10" < "10A".

use std::cmp::Ordering;

fn leading_number(s: &str) -> Option<u64> {
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (leading_number(a), leading_number(b)) {
        (Some(na), Some(nb)) if na != nb => na.cmp(&nb),
        _ => a.cmp(b),
    }
}
