//! Seeded synthesis of English-looking dictionary words.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const DICTIONARY_SEED: u64 = 0x5EED_D1C7_0000_2710;

pub const MIN_WORD_LEN: usize = 3;
pub const MAX_WORD_LEN: usize = 20;

const PREFIXES: &[&str] = &[
    "un", "re", "in", "dis", "en", "non", "over", "mis", "sub", "pre", "inter", "fore", "de",
    "anti", "semi", "micro", "mini", "multi", "auto", "co", "counter", "out", "up", "under",
    "super", "trans", "extra", "ultra", "meta", "proto", "pseudo",
];

const MIDDLE_PARTS: &[&str] = &[
    "able", "ible", "tion", "sion", "ness", "ment", "ship", "hood", "ward", "wise", "like",
    "some", "full", "less", "most", "ever", "what", "where", "when", "which", "work", "play",
    "make", "take", "give", "come", "know", "think", "look", "want", "use", "find", "tell",
    "ask", "seem", "feel", "try", "leave", "call", "move", "live", "believe", "hold", "bring",
    "happen", "write", "provide", "paper", "system", "program", "question", "social",
    "economic", "medical", "political", "natural", "global", "personal", "digital", "technical",
];

const SUFFIXES: &[&str] = &[
    "ing", "ed", "er", "est", "ly", "tion", "sion", "ness", "ment", "ful", "less", "able",
    "ible", "ous", "ive", "ent", "ant", "ary", "ory", "ic", "al", "ial", "ure", "age", "ism",
    "ist", "ite", "ize", "ise", "fy", "en", "ward", "wise", "like", "some", "fold", "teen", "ty",
    "th", "ship", "hood", "dom", "craft", "let", "ling",
];

const BASE_WORDS: &[&str] = &[
    "action", "activity", "area", "book", "business", "case", "child", "company", "country",
    "course", "day", "development", "education", "end", "example", "experience", "fact",
    "family", "government", "group", "growth", "hand", "health", "history", "home", "house",
    "information", "interest", "job", "level", "life", "line", "management", "market", "member",
    "money", "name", "nation", "nature", "news", "number", "office", "order", "organization",
    "part", "party", "people", "person", "place", "plan", "point", "policy", "position", "power",
    "price", "problem", "process", "program", "project", "property", "public", "question",
    "reason", "report", "research", "result", "right", "room", "school", "science", "service",
    "side", "society", "something", "space", "special", "state", "story", "student", "study",
    "system", "technology", "term", "theory", "thing", "time", "trade", "training", "travel",
    "treatment", "university", "value", "water", "way", "week", "word", "work", "world", "year",
    "young", "design", "computer", "network", "software", "internet", "website", "application",
    "database", "security", "mobile", "device", "platform", "solution", "innovation",
    "strategy", "analysis", "communication", "integration", "performance", "efficiency",
    "quality", "standard", "framework", "architecture", "maintenance", "support", "interface",
    "protocol", "algorithm", "structure", "function", "operation", "procedure", "method",
    "approach", "technique", "model", "pattern", "concept", "principle", "foundation", "element",
    "component", "feature", "attribute", "parameter", "variable", "constant", "resource",
    "material", "equipment", "tool", "instrument", "machine", "engine", "motor", "circuit",
    "sensor", "controller", "processor", "memory", "storage", "display", "screen", "monitor",
    "keyboard", "printer", "scanner", "camera", "speaker", "cable", "adapter", "battery",
    "energy", "signal", "wave", "light", "color", "sound", "music", "video", "image", "text",
];

fn pick<'a, R: Rng>(rng: &mut R, parts: &[&'a str]) -> &'a str {
    parts[rng.gen_range(0..parts.len())]
}

fn synthesize_word<R: Rng>(rng: &mut R) -> String {
    match rng.gen_range(0..5) {
        0 => pick(rng, BASE_WORDS).to_string(),
        1 => format!("{}{}", pick(rng, PREFIXES), pick(rng, BASE_WORDS)),
        2 => format!("{}{}", pick(rng, BASE_WORDS), pick(rng, SUFFIXES)),
        3 => format!("{}{}", pick(rng, BASE_WORDS), pick(rng, BASE_WORDS)),
        _ => {
            let mut word = String::new();
            if rng.gen_bool(0.5) {
                word.push_str(pick(rng, PREFIXES));
            }
            word.push_str(pick(rng, MIDDLE_PARTS));
            if rng.gen_bool(0.5) {
                word.push_str(pick(rng, SUFFIXES));
            }
            word
        }
    }
}

/// Returns `count` unique, sorted words of 3..=20 lowercase ASCII letters.
///
/// Every base word is always part of the candidate set, so for counts below
/// the base vocabulary size the result is a sorted prefix of it.
pub fn generate(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(DICTIONARY_SEED);
    let mut words: BTreeSet<String> = BASE_WORDS.iter().map(|w| w.to_string()).collect();

    // The combination space is far larger than any size we ask for; the cap
    // only stops a runaway loop on absurd requests.
    let max_attempts = count.saturating_mul(100).max(1_000);
    let mut attempts = 0;
    while words.len() < count && attempts < max_attempts {
        attempts += 1;
        let word = synthesize_word(&mut rng);
        if (MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()) {
            words.insert(word);
        }
    }

    if words.len() < count {
        log::warn!(
            "Dictionary generation stopped at {} of {} words",
            words.len(),
            count
        );
    }

    words.into_iter().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_of_unique_sorted_words() {
        let words = generate(2_000);
        assert_eq!(words.len(), 2_000);
        assert!(words.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn words_are_lowercase_and_bounded() {
        for word in generate(1_000) {
            assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()), "{word}");
            assert!(word.bytes().all(|b| b.is_ascii_lowercase()), "{word}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(500), generate(500));
    }

    #[test]
    fn small_request_is_a_prefix_of_the_base_vocabulary() {
        let words = generate(5);
        let mut base: Vec<&str> = BASE_WORDS.to_vec();
        base.sort_unstable();
        base.dedup();
        assert_eq!(words, base[..5]);
    }

    #[test]
    fn zero_words() {
        assert!(generate(0).is_empty());
    }
}
