//! Prefix-free hint labels of minimal length.
//!
//! Labels are grown breadth-first: each consumed label spawns one longer label
//! per alphabet character. Since every label is an extension of a consumed
//! (and therefore unused) shorter label, no emitted label prefixes another.

use tracing::trace;

use crate::error::{LabelError, Result};

/// Default hint characters, home row first.
pub const DEFAULT_ALPHABET: &str = "sadfjklewcmpgh";

/// Lower-cased alphabet with duplicates removed, in first-seen order.
///
/// Whitespace is skipped. Characters whose case mapping is not a single
/// character (`ß` upper-cases to `SS`) are rejected, since labels are shown
/// and matched upper-cased one character at a time. Characters sharing an
/// upper-case form count once.
pub fn normalize_alphabet(alphabet: &str) -> Result<Vec<char>> {
    let mut out: Vec<char> = Vec::new();
    let mut seen: Vec<char> = Vec::new();
    for c in alphabet.chars().filter(|c| !c.is_whitespace()) {
        let (Some(lower), Some(upper)) = (single(c.to_lowercase()), single(c.to_uppercase()))
        else {
            return Err(LabelError::UnsupportedCharacter(c));
        };
        if single(lower.to_uppercase()) != Some(upper) {
            return Err(LabelError::UnsupportedCharacter(c));
        }
        if !seen.contains(&upper) {
            seen.push(upper);
            out.push(lower);
        }
    }
    Ok(out)
}

/// The only item of `it`, if it has exactly one.
fn single(mut it: impl Iterator<Item = char>) -> Option<char> {
    match (it.next(), it.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Generate `count` pairwise prefix-free upper-case labels from `alphabet`.
pub fn generate_labels(count: usize, alphabet: &str) -> Result<Vec<String>> {
    let chars = normalize_alphabet(alphabet)?;
    if chars.len() < 2 {
        return Err(LabelError::AlphabetTooSmall {
            alphabet: alphabet.to_string(),
            unique: chars.len(),
        });
    }
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut pool: Vec<String> = vec![String::new()];
    let mut consumed = 0;
    while pool.len() - consumed < count || pool.len() == 1 {
        let stem = pool[consumed].clone();
        consumed += 1;
        for c in &chars {
            let mut label = String::with_capacity(stem.len() + 1);
            label.push(*c);
            label.push_str(&stem);
            pool.push(label);
        }
    }

    let mut labels: Vec<String> = pool.drain(consumed..consumed + count).collect();
    labels.sort();
    let labels: Vec<String> = labels
        .iter()
        .map(|l| l.chars().rev().collect::<String>().to_uppercase())
        .collect();
    trace!(count, width = labels.last().map_or(0, String::len), "labels_generated");
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example() {
        assert_eq!(generate_labels(3, "ab").unwrap(), vec!["AA", "B", "AB"]);
    }

    #[test]
    fn zero_and_one() {
        assert!(generate_labels(0, "ab").unwrap().is_empty());
        assert_eq!(generate_labels(1, "ab").unwrap(), vec!["A"]);
        assert_eq!(generate_labels(2, "abc").unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn single_width_when_alphabet_suffices() {
        let labels = generate_labels(14, DEFAULT_ALPHABET).unwrap();
        assert!(labels.iter().all(|l| l.len() == 1));
        let labels = generate_labels(15, DEFAULT_ALPHABET).unwrap();
        assert!(labels.iter().any(|l| l.len() == 2));
    }

    #[test]
    fn small_alphabets_are_rejected() {
        assert_eq!(
            generate_labels(3, "aAa"),
            Err(LabelError::AlphabetTooSmall {
                alphabet: "aAa".into(),
                unique: 1
            })
        );
        assert!(generate_labels(0, "").is_err());
    }

    #[test]
    fn alphabet_normalisation() {
        assert_eq!(normalize_alphabet("AbBa c").unwrap(), vec!['a', 'b', 'c']);
        assert_eq!(normalize_alphabet("éÉ\u{3c3}\u{3c2}").unwrap(), vec!['é', '\u{3c3}']);
    }

    #[test]
    fn multi_char_case_mappings_are_rejected() {
        assert_eq!(
            normalize_alphabet("asß"),
            Err(LabelError::UnsupportedCharacter('ß'))
        );
        assert_eq!(
            generate_labels(3, "a\u{130}b"),
            Err(LabelError::UnsupportedCharacter('\u{130}'))
        );
    }

    #[test]
    fn labels_from_accented_alphabets_stay_prefix_free() {
        let labels = generate_labels(5, "éa").unwrap();
        assert_eq!(labels.len(), 5);
        for a in &labels {
            assert_eq!(a.chars().count(), a.to_uppercase().chars().count());
            for b in &labels {
                assert!(a == b || !b.starts_with(a.as_str()), "{a} prefixes {b}");
            }
        }
    }
}
