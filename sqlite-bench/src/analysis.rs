//! In-process statistics over the fixtures, computed before the database
//! phase.

use std::collections::BTreeMap;

/// Word lengths at or above this are left out of the distribution.
pub const LENGTH_DISTRIBUTION_LIMIT: usize = 20;
pub const MAX_PALINDROMES: usize = 10;
/// Prime gaps below this are considered for the common-gap list.
pub const PRIME_GAP_LIMIT: u32 = 50;
/// A gap must occur more often than this to be listed.
pub const COMMON_GAP_THRESHOLD: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryStats {
    pub words: usize,
    pub total_chars: usize,
    pub average_len: f64,
    pub longest: usize,
    pub shortest: usize,
    /// Word length -> number of words, for lengths `1..LENGTH_DISTRIBUTION_LIMIT`.
    pub length_distribution: BTreeMap<usize, usize>,
}

pub fn dictionary_stats(words: &[String]) -> DictionaryStats {
    let mut length_distribution = BTreeMap::new();
    let mut total_chars = 0;
    let mut longest = 0;
    let mut shortest = usize::MAX;

    for word in words {
        let len = word.len();
        total_chars += len;
        longest = longest.max(len);
        shortest = shortest.min(len);
        if (1..LENGTH_DISTRIBUTION_LIMIT).contains(&len) {
            *length_distribution.entry(len).or_insert(0) += 1;
        }
    }

    DictionaryStats {
        words: words.len(),
        total_chars,
        average_len: if words.is_empty() {
            0.0
        } else {
            total_chars as f64 / words.len() as f64
        },
        longest,
        shortest: if words.is_empty() { 0 } else { shortest },
        length_distribution,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPatterns {
    /// Words per starting letter, `A` at index 0. Case-insensitive.
    pub letter_counts: [usize; 26],
    /// Up to [`MAX_PALINDROMES`] palindromes longer than 3 characters, in
    /// dictionary order.
    pub palindromes: Vec<String>,
}

pub fn word_patterns(words: &[String]) -> WordPatterns {
    let mut letter_counts = [0usize; 26];
    for word in words {
        if let Some(first) = word.bytes().next() {
            if first.is_ascii_alphabetic() {
                letter_counts[(first.to_ascii_lowercase() - b'a') as usize] += 1;
            }
        }
    }

    let palindromes = words
        .iter()
        .filter(|w| w.len() > 3 && is_palindrome(w))
        .take(MAX_PALINDROMES)
        .cloned()
        .collect();

    WordPatterns {
        letter_counts,
        palindromes,
    }
}

fn is_palindrome(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.iter().eq(bytes.iter().rev())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

pub fn constant_stats(values: &[f64]) -> ConstantStats {
    if values.is_empty() {
        return ConstantStats {
            count: 0,
            sum: 0.0,
            mean: 0.0,
            min: 0.0,
            max: 0.0,
            std_dev: 0.0,
        };
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    ConstantStats {
        count,
        sum,
        mean,
        min,
        max,
        std_dev: variance.sqrt(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrimeStats {
    pub count: usize,
    pub sum: u64,
    pub mean: f64,
    pub largest: u32,
    /// `(gap, occurrences)` for common small gaps, by gap size.
    pub common_gaps: Vec<(u32, usize)>,
}

pub fn prime_stats(primes: &[u32]) -> PrimeStats {
    let sum: u64 = primes.iter().map(|&p| p as u64).sum();

    let mut gaps: BTreeMap<u32, usize> = BTreeMap::new();
    for pair in primes.windows(2) {
        let gap = pair[1] - pair[0];
        if gap < PRIME_GAP_LIMIT {
            *gaps.entry(gap).or_insert(0) += 1;
        }
    }

    PrimeStats {
        count: primes.len(),
        sum,
        mean: if primes.is_empty() {
            0.0
        } else {
            sum as f64 / primes.len() as f64
        },
        largest: primes.last().copied().unwrap_or(0),
        common_gaps: gaps
            .into_iter()
            .filter(|&(_, n)| n > COMMON_GAP_THRESHOLD)
            .collect(),
    }
}

/// Trigonometric checksum over the constants: `Σ sin(c)·cos(c)`.
pub fn trig_checksum(values: &[f64]) -> f64 {
    values.iter().map(|c| c.sin() * c.cos()).sum()
}

/// All fixture statistics, as printed before the database phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureAnalysis {
    pub dictionary: DictionaryStats,
    pub patterns: WordPatterns,
    pub constants: ConstantStats,
    pub primes: PrimeStats,
}

pub fn analyze(fixtures: &crate::fixtures::Fixtures) -> FixtureAnalysis {
    FixtureAnalysis {
        dictionary: dictionary_stats(&fixtures.dictionary),
        patterns: word_patterns(&fixtures.dictionary),
        constants: constant_stats(&fixtures.constants),
        primes: prime_stats(&fixtures.primes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::numeric::primes_by_trial_division;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn dictionary_stats_basic() {
        let stats = dictionary_stats(&strings(&["ab", "abcd", "xyz", "abcdefghijklmnopqrstuvwxyz"]));
        assert_eq!(stats.words, 4);
        assert_eq!(stats.total_chars, 2 + 4 + 3 + 26);
        assert_eq!(stats.longest, 26);
        assert_eq!(stats.shortest, 2);
        assert!((stats.average_len - 35.0 / 4.0).abs() < 1e-12);
        // The 26-char word is past the distribution limit.
        assert_eq!(stats.length_distribution.values().sum::<usize>(), 3);
        assert_eq!(stats.length_distribution.get(&3), Some(&1));
    }

    #[test]
    fn dictionary_stats_empty() {
        let stats = dictionary_stats(&[]);
        assert_eq!(stats.shortest, 0);
        assert_eq!(stats.average_len, 0.0);
    }

    #[test]
    fn word_patterns_counts_letters_and_finds_palindromes() {
        let words = strings(&["Level", "level", "noon", "abba", "radar", "bob", "zebra", "9lives"]);
        let patterns = word_patterns(&words);
        assert_eq!(patterns.letter_counts[(b'l' - b'a') as usize], 2);
        assert_eq!(patterns.letter_counts[(b'z' - b'a') as usize], 1);
        assert_eq!(patterns.letter_counts.iter().sum::<usize>(), 7);
        // "Level" is case-sensitive not a palindrome, "bob" is too short.
        assert_eq!(patterns.palindromes, strings(&["level", "noon", "abba", "radar"]));
    }

    #[test]
    fn palindromes_are_capped() {
        let words: Vec<String> = (0..20).map(|i| format!("ab{}{}ba", i % 10, i % 10)).collect();
        assert_eq!(word_patterns(&words).palindromes.len(), MAX_PALINDROMES);
    }

    #[test]
    fn constant_stats_population_std_dev() {
        let stats = constant_stats(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.count, 8);
        assert_eq!(stats.sum, 40.0);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn prime_stats_first_thousand() {
        let primes = primes_by_trial_division(1_000);
        let stats = prime_stats(&primes);
        assert_eq!(stats.largest, 7_919);
        assert_eq!(stats.sum, 3_682_913);
        // Gap 1 (2 -> 3) occurs once and is filtered out; gap 2 is common.
        assert!(stats.common_gaps.iter().all(|&(gap, _)| gap != 1));
        assert!(stats.common_gaps.iter().any(|&(gap, n)| gap == 2 && n > 100));
    }

    #[test]
    fn trig_checksum_of_zero_is_zero() {
        assert_eq!(trig_checksum(&[0.0, 0.0]), 0.0);
    }
}
