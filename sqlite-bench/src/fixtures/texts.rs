//! Sample text generation for the full-text tables.

/// Longest sentence (in bytes) built from dictionary words.
pub const MAX_SENTENCE_LEN: usize = 800;
pub const MAX_WORDS_PER_SENTENCE: usize = 10;

pub const BASE_TEXTS: &[&str] = &[
    "The quick brown fox jumps over the lazy dog. This pangram contains every letter of the English alphabet at least once.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "SQLite is a C-language library that implements a small, fast, self-contained, high-reliability, full-featured, SQL database engine.",
    "WebAssembly (abbreviated Wasm) is a binary instruction format for a stack-based virtual machine.",
    "Container technology has revolutionized software deployment and distribution across different architectures.",
];

pub const VARIANT_TEXTS: &[&str] = &[
    "Systems programming languages give direct control over memory layout and resource lifetimes.",
    "Object-oriented programming provides better code organization and reusability.",
    "Standard library containers like vectors, maps and sets provide powerful data structures.",
    "Ownership rules help manage memory automatically and prevent leaks.",
    "Compile-time generics enable code generation without runtime cost.",
];

/// One sentence per row, built from dictionary words picked with a fixed
/// stride: word `j` of sentence `i` is `dictionary[(i*7 + j*13) % len]`.
pub fn from_dictionary(dictionary: &[String], count: usize) -> Vec<String> {
    if dictionary.is_empty() {
        return vec![String::new(); count];
    }

    (0..count)
        .map(|i| {
            let mut sentence = String::new();
            for j in 0..MAX_WORDS_PER_SENTENCE {
                if sentence.len() >= MAX_SENTENCE_LEN {
                    break;
                }
                let word = &dictionary[(i * 7 + j * 13) % dictionary.len()];
                if !sentence.is_empty() {
                    sentence.push(' ');
                }
                sentence.push_str(word);
            }
            sentence
        })
        .collect()
}

/// The base texts, then the variant texts, then numbered copies of the
/// variant texts until `count` is reached.
pub fn base_variants(count: usize) -> Vec<String> {
    let mut texts: Vec<String> = BASE_TEXTS
        .iter()
        .chain(VARIANT_TEXTS.iter())
        .take(count)
        .map(|t| t.to_string())
        .collect();

    let mut variants = VARIANT_TEXTS.iter().cycle();
    while texts.len() < count {
        if let Some(base) = variants.next() {
            let numbered = format!("{base} (variant {})", texts.len());
            texts.push(numbered);
        }
    }
    texts
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("w{i:03}")).collect()
    }

    #[test]
    fn dictionary_sentences_use_fixed_stride() {
        let dict = words(100);
        let texts = from_dictionary(&dict, 3);
        assert_eq!(texts.len(), 3);
        assert_eq!(
            texts[1],
            "w007 w020 w033 w046 w059 w072 w085 w098 w011 w024"
        );
        assert_eq!(word_count(&texts[0]), MAX_WORDS_PER_SENTENCE);
    }

    #[test]
    fn empty_dictionary_gives_empty_sentences() {
        assert_eq!(from_dictionary(&[], 2), vec![String::new(), String::new()]);
    }

    #[test]
    fn base_variants_are_numbered_after_the_fixed_texts() {
        let texts = base_variants(13);
        assert_eq!(texts.len(), 13);
        assert_eq!(texts[0], BASE_TEXTS[0]);
        assert_eq!(texts[9], VARIANT_TEXTS[4]);
        assert_eq!(texts[10], format!("{} (variant 10)", VARIANT_TEXTS[0]));
        assert_eq!(texts[12], format!("{} (variant 12)", VARIANT_TEXTS[2]));
    }

    #[test]
    fn base_variants_truncates_small_requests() {
        assert_eq!(base_variants(2), vec![BASE_TEXTS[0], BASE_TEXTS[1]]);
    }
}
