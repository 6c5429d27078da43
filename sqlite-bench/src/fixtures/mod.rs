//! Synthetic benchmark input: dictionary words, numeric constants, primes and
//! sample texts.
//!
//! Everything is generated once at startup from a [`FixtureRecipe`] and then
//! only read. Generation is deterministic: the dictionary uses a fixed seed and
//! the other datasets are pure functions of their size.

pub mod dictionary;
pub mod numeric;
pub mod texts;

/// Dataset sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureParams {
    pub dictionary_words: usize,
    pub constants: usize,
    pub primes: usize,
    pub texts: usize,
}

impl FixtureParams {
    /// The sizes every variant binary runs with.
    pub fn standard() -> Self {
        Self {
            dictionary_words: 10_000,
            constants: 50_000,
            primes: 10_000,
            texts: 5_000,
        }
    }
}

/// How the numeric constants past the named seeds are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantFormula {
    /// 10 named seeds, then `sin(i)·cos(i/2) + ln(i+1)·√i`.
    DampedTrig,
    /// 19 named seeds (adds ln 2..=ln 10), then `sin(i)·cos(i) + √i`.
    TrigPlusRoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeMethod {
    TrialDivision,
    Sieve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Sentences stitched together from dictionary words.
    Dictionary,
    /// A handful of fixed texts plus numbered variants.
    BaseVariants,
}

/// Which generator each dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureRecipe {
    pub constants: ConstantFormula,
    pub primes: PrimeMethod,
    pub texts: TextSource,
}

/// All generated datasets. Built once, then passed around by reference.
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub dictionary: Vec<String>,
    pub constants: Vec<f64>,
    pub primes: Vec<u32>,
    pub texts: Vec<String>,
}

pub fn generate(params: &FixtureParams, recipe: &FixtureRecipe) -> Fixtures {
    log::info!(
        "Generating fixtures: {} words, {} constants, {} primes, {} texts",
        params.dictionary_words,
        params.constants,
        params.primes,
        params.texts
    );

    let dictionary = dictionary::generate(params.dictionary_words);
    log::debug!("Dictionary ready ({} words)", dictionary.len());

    let constants = numeric::generate_constants(params.constants, recipe.constants);
    log::debug!("Constants ready ({})", constants.len());

    let primes = match recipe.primes {
        PrimeMethod::TrialDivision => numeric::primes_by_trial_division(params.primes),
        PrimeMethod::Sieve => numeric::primes_by_sieve(params.primes),
    };
    log::debug!("Primes ready ({})", primes.len());

    let texts = match recipe.texts {
        TextSource::Dictionary => texts::from_dictionary(&dictionary, params.texts),
        TextSource::BaseVariants => texts::base_variants(params.texts),
    };

    Fixtures {
        dictionary,
        constants,
        primes,
        texts,
    }
}
