//! Corpus workload: flat tables for every fixture dataset, secondary indexes,
//! and external-content FTS5 indexes over the words and texts.

use super::{count_rows, TableLoad, Workload};
use crate::fixtures::texts::word_count;
use crate::fixtures::{ConstantFormula, FixtureRecipe, Fixtures, PrimeMethod, TextSource};
use crate::query::QuerySpec;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Transaction};

const CREATE_SQL: &str = "
    CREATE TABLE dictionary_words(id INTEGER PRIMARY KEY, word TEXT UNIQUE, length INTEGER, first_char TEXT);
    CREATE INDEX idx_word_length ON dictionary_words(length);
    CREATE INDEX idx_first_char ON dictionary_words(first_char);

    CREATE TABLE mathematical_data(id INTEGER PRIMARY KEY, value REAL, category TEXT, computed_at INTEGER);
    CREATE INDEX idx_math_category ON mathematical_data(category);
    CREATE INDEX idx_math_value ON mathematical_data(value);

    CREATE TABLE prime_data(id INTEGER PRIMARY KEY, prime_number INTEGER UNIQUE, nth_prime INTEGER, gap_to_next INTEGER);
    CREATE INDEX idx_prime_number ON prime_data(prime_number);

    CREATE TABLE text_corpus(id INTEGER PRIMARY KEY, content TEXT, word_count INTEGER, char_count INTEGER);
    CREATE INDEX idx_word_count ON text_corpus(word_count);

    CREATE VIRTUAL TABLE dictionary_fts USING fts5(word, content='dictionary_words', content_rowid='id');
    CREATE VIRTUAL TABLE text_fts USING fts5(content, content='text_corpus', content_rowid='id');
";

const QUERIES: &[QuerySpec] = &[
    QuerySpec::all(
        "Word Length Distribution (Top 10)",
        "SELECT length,
                COUNT(*) AS word_count,
                ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM dictionary_words), 2) AS percentage,
                GROUP_CONCAT(word, ', ') AS sample_words
         FROM dictionary_words
         GROUP BY length
         ORDER BY word_count DESC
         LIMIT 10",
    ),
    QuerySpec::all(
        "Mathematical Data Analysis by Category",
        "SELECT category,
                COUNT(*) AS count,
                ROUND(AVG(value), 4) AS avg_value,
                ROUND(MIN(value), 4) AS min_value,
                ROUND(MAX(value), 4) AS max_value,
                ROUND(SUM(value), 2) AS total_value
         FROM mathematical_data
         GROUP BY category
         ORDER BY count DESC",
    ),
    QuerySpec::all(
        "Prime Gap Analysis (Most Frequent Gaps)",
        "SELECT gap_to_next,
                COUNT(*) AS frequency,
                MIN(prime_number) AS first_occurrence,
                MAX(prime_number) AS last_occurrence
         FROM prime_data
         WHERE gap_to_next > 0
         GROUP BY gap_to_next
         ORDER BY frequency DESC
         LIMIT 15",
    ),
    QuerySpec::all(
        "Dictionary words matching 'program*'",
        "SELECT word FROM dictionary_fts WHERE dictionary_fts MATCH 'program*' LIMIT 10",
    ),
    QuerySpec::all(
        "Texts matching 'system'",
        "SELECT COUNT(*) AS matches FROM text_fts WHERE text_fts MATCH 'system'",
    ),
    QuerySpec::all(
        "Analysis by First Character (letters with >50 words)",
        "SELECT d.first_char,
                COUNT(d.id) AS word_count,
                AVG(d.length) AS avg_length,
                COUNT(CASE WHEN d.length > 7 THEN 1 END) AS long_words
         FROM dictionary_words d
         GROUP BY d.first_char
         HAVING word_count > 50
         ORDER BY word_count DESC",
    ),
];

/// Category of the `i`-th constant.
pub fn constant_category(i: usize) -> &'static str {
    match i {
        0..=9 => "fundamental_constants",
        10..=999 => "computed_values",
        1_000..=9_999 => "trigonometric",
        10_000..=24_999 => "logarithmic",
        _ => "mixed_functions",
    }
}

pub struct CorpusWorkload;

impl CorpusWorkload {
    pub fn new() -> Self {
        Self
    }

    fn populate_dictionary(tx: &Transaction, words: &[String]) -> Result<usize> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO dictionary_words (word, length, first_char) VALUES (?1, ?2, ?3)",
        )?;
        for (i, word) in words.iter().enumerate() {
            let first_char: String = word.chars().take(1).collect();
            stmt.execute(params![word, word.len() as i64, first_char])?;
            if i % 1_000 == 0 {
                log::debug!("  Inserted {i} dictionary words");
            }
        }
        Ok(words.len())
    }

    fn populate_constants(tx: &Transaction, values: &[f64]) -> Result<usize> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO mathematical_data (value, category, computed_at) VALUES (?1, ?2, ?3)",
        )?;
        for (i, value) in values.iter().enumerate() {
            // The index stands in for a computation timestamp.
            stmt.execute(params![value, constant_category(i), i as i64])?;
            if i % 5_000 == 0 {
                log::debug!("  Inserted {i} mathematical values");
            }
        }
        Ok(values.len())
    }

    fn populate_primes(tx: &Transaction, primes: &[u32]) -> Result<usize> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO prime_data (prime_number, nth_prime, gap_to_next) VALUES (?1, ?2, ?3)",
        )?;
        for (i, &prime) in primes.iter().enumerate() {
            let gap_to_next = primes.get(i + 1).map_or(0, |&next| next - prime);
            stmt.execute(params![prime, (i + 1) as i64, gap_to_next])?;
            if i % 1_000 == 0 {
                log::debug!("  Inserted {i} prime numbers");
            }
        }
        Ok(primes.len())
    }

    fn populate_texts(tx: &Transaction, texts: &[String]) -> Result<usize> {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO text_corpus (content, word_count, char_count) VALUES (?1, ?2, ?3)",
        )?;
        for (i, text) in texts.iter().enumerate() {
            stmt.execute(params![text, word_count(text) as i64, text.len() as i64])?;
            if i % 500 == 0 {
                log::debug!("  Generated {i} text samples");
            }
        }
        Ok(texts.len())
    }

    fn load<F>(conn: &Connection, table: &'static str, fill: F) -> Result<TableLoad>
    where
        F: FnOnce(&Transaction) -> Result<usize>,
    {
        log::info!("Inserting {table}...");
        let tx = conn.unchecked_transaction()?;
        let rows = fill(&tx).with_context(|| format!("populating {table}"))?;
        tx.commit()?;
        Ok(TableLoad { table, rows })
    }
}

impl Default for CorpusWorkload {
    fn default() -> Self {
        Self::new()
    }
}

impl Workload for CorpusWorkload {
    fn name(&self) -> &'static str {
        "corpus"
    }

    fn recipe(&self) -> FixtureRecipe {
        FixtureRecipe {
            constants: ConstantFormula::DampedTrig,
            primes: PrimeMethod::TrialDivision,
            texts: TextSource::Dictionary,
        }
    }

    fn create_tables(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch(CREATE_SQL)
            .context("Table creation error")?;
        log::info!("Tables and indexes created successfully");
        Ok(())
    }

    fn populate(&self, conn: &Connection, fixtures: &Fixtures) -> Result<Vec<TableLoad>> {
        let mut loads = Vec::with_capacity(6);

        loads.push(Self::load(conn, "dictionary_words", |tx| {
            Self::populate_dictionary(tx, &fixtures.dictionary)
        })?);
        conn.execute("INSERT INTO dictionary_fts(dictionary_fts) VALUES('rebuild')", [])?;
        loads.push(TableLoad {
            table: "dictionary_fts",
            rows: count_rows(conn, "dictionary_fts")?,
        });

        loads.push(Self::load(conn, "mathematical_data", |tx| {
            Self::populate_constants(tx, &fixtures.constants)
        })?);
        loads.push(Self::load(conn, "prime_data", |tx| {
            Self::populate_primes(tx, &fixtures.primes)
        })?);
        loads.push(Self::load(conn, "text_corpus", |tx| {
            Self::populate_texts(tx, &fixtures.texts)
        })?);

        conn.execute("INSERT INTO text_fts(text_fts) VALUES('rebuild')", [])?;
        loads.push(TableLoad {
            table: "text_fts",
            rows: count_rows(conn, "text_fts")?,
        });

        Ok(loads)
    }

    fn queries(&self) -> &'static [QuerySpec] {
        QUERIES
    }
}
