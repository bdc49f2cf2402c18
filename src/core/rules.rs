// src/core/rules.rs
//! Lexical rule set: pure shape predicates over a single normalized word.
//!
//! Rules run in a fixed order and the first failure names the rejection:
//! alphabet, length, vowels present, consonants present, consonant runs,
//! vowel runs, tripled letters, doubled opening.

use crate::config::LexicalLimits;
use crate::core::types::{is_vowel, RejectionReason};

pub fn is_alphabetic(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_lowercase())
}

pub fn is_length_in_range(word: &str, limits: &LexicalLimits) -> bool {
    let len = word.chars().count();
    len >= limits.min_length && len <= limits.max_length
}

pub fn has_vowel(word: &str) -> bool {
    word.chars().any(is_vowel)
}

pub fn has_consonant(word: &str) -> bool {
    word.chars().any(|c| !is_vowel(c))
}

/// Length of the longest run of characters satisfying `pred`.
fn longest_run(word: &str, pred: impl Fn(char) -> bool) -> usize {
    let mut best = 0;
    let mut current = 0;
    for c in word.chars() {
        if pred(c) {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

pub fn longest_consonant_run(word: &str) -> usize {
    longest_run(word, |c| !is_vowel(c))
}

pub fn longest_vowel_run(word: &str) -> usize {
    longest_run(word, is_vowel)
}

/// True when any letter appears three or more times in a row.
pub fn has_triple_letter(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

/// True when the word opens with the same letter twice and that pair is not
/// allow-listed.
pub fn has_unusual_opening(word: &str, allow_list: &[String]) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == b => {
            let pair: String = [a, b].iter().collect();
            !allow_list.iter().any(|allowed| *allowed == pair)
        }
        _ => false,
    }
}

/// The guard applied to foundation words: rules 1 and 2 only.
pub fn is_legal_shape(word: &str, limits: &LexicalLimits) -> bool {
    is_alphabetic(word) && is_length_in_range(word, limits)
}

/// Runs every lexical rule in order and returns the first failure.
/// `word` must already be normalized.
pub fn check_lexical(word: &str, limits: &LexicalLimits) -> Option<RejectionReason> {
    if !is_alphabetic(word) {
        return Some(RejectionReason::NonAlphabetic);
    }
    if !is_length_in_range(word, limits) {
        return Some(RejectionReason::LengthOutOfRange);
    }
    if !has_vowel(word) {
        return Some(RejectionReason::NoVowels);
    }
    if !has_consonant(word) {
        return Some(RejectionReason::NoConsonants);
    }
    if longest_consonant_run(word) > limits.max_consecutive_consonants {
        return Some(RejectionReason::TooManyConsecutiveConsonants);
    }
    if longest_vowel_run(word) > limits.max_consecutive_vowels {
        return Some(RejectionReason::TooManyConsecutiveVowels);
    }
    if has_triple_letter(word) {
        return Some(RejectionReason::TripleLetterPattern);
    }
    if has_unusual_opening(word, &limits.doubled_opening_allow_list) {
        return Some(RejectionReason::UnusualStartingPattern);
    }
    None
}
