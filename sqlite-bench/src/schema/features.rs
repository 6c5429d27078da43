//! Feature workload: exercises FTS5, R-Tree, JSON functions and stored
//! generated columns on modest data sets.

use super::{TableLoad, Workload};
use crate::fixtures::numeric::NAMED_CONSTANTS;
use crate::fixtures::{ConstantFormula, FixtureRecipe, Fixtures, PrimeMethod, TextSource};
use crate::query::QuerySpec;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Transaction};

pub const PRIME_ROWS: usize = 1_000;
pub const TEXT_ROWS: usize = 100;
pub const LOCATION_ROWS: usize = 100;
pub const JSON_ROWS: usize = 100;

/// Categories assigned to `sample_texts` rows, in rotation.
pub const TEXT_CATEGORIES: [&str; 3] = ["technical", "general", "scientific"];

const CREATE_SQL: &str = "
    CREATE TABLE IF NOT EXISTS math_constants(id INTEGER PRIMARY KEY, name TEXT, value REAL, description TEXT);
    CREATE TABLE IF NOT EXISTS prime_numbers(id INTEGER PRIMARY KEY, number INTEGER UNIQUE, is_twin_prime BOOLEAN, gap_to_next INTEGER);
    CREATE VIRTUAL TABLE IF NOT EXISTS sample_texts USING fts5(content, category);
    CREATE TABLE IF NOT EXISTS dictionary(id INTEGER PRIMARY KEY, word TEXT UNIQUE, length INTEGER, first_letter TEXT);
    CREATE VIRTUAL TABLE IF NOT EXISTS locations USING rtree(id, min_x, max_x, min_y, max_y);
    CREATE TABLE IF NOT EXISTS json_data(
        id INTEGER PRIMARY KEY,
        data JSON,
        extracted_value TEXT GENERATED ALWAYS AS (json_extract(data, '$.key')) STORED
    );
";

const QUERIES: &[QuerySpec] = &[
    QuerySpec::first("Total constants", "SELECT COUNT(*) AS total_constants FROM math_constants"),
    QuerySpec::first("Total primes", "SELECT COUNT(*) AS total_primes FROM prime_numbers"),
    QuerySpec::first(
        "Average prime below 1000",
        "SELECT AVG(number) AS avg_prime FROM prime_numbers WHERE number < 1000",
    ),
    QuerySpec::first(
        "Texts matching 'sqlite'",
        "SELECT content FROM sample_texts WHERE sample_texts MATCH 'sqlite' LIMIT 5",
    ),
    QuerySpec::first(
        "Texts matching 'programming'",
        "SELECT COUNT(*) FROM sample_texts WHERE sample_texts MATCH 'programming'",
    ),
    QuerySpec::first(
        "JSON documents of type 'test'",
        "SELECT COUNT(*) FROM json_data WHERE json_extract(data, '$.type') = 'test'",
    ),
    QuerySpec::first(
        "Squared constants",
        "SELECT name, value, ROUND(value * value, 4) AS squared FROM math_constants LIMIT 10",
    ),
    QuerySpec::first(
        "Squared small primes",
        "SELECT number, number * number AS squared FROM prime_numbers WHERE number < 100",
    ),
    QuerySpec::first(
        "Words by first letter",
        "SELECT first_letter, COUNT(*) AS word_count FROM dictionary
         GROUP BY first_letter ORDER BY word_count DESC LIMIT 10",
    ),
    QuerySpec::first(
        "Twin primes below 100",
        "SELECT p1.number, p2.number FROM prime_numbers p1
         JOIN prime_numbers p2 ON p2.number = p1.number + 2
         WHERE p1.number < 100",
    ),
    QuerySpec::first(
        "Locations overlapping the centre",
        "SELECT COUNT(*) FROM locations
         WHERE min_x <= 55.0 AND max_x >= 45.0 AND min_y <= 55.0 AND max_y >= 45.0",
    ),
    QuerySpec::first(
        "Generated column lookup",
        "SELECT id, extracted_value FROM json_data WHERE extracted_value = 'key_42'",
    ),
];

/// Whether `primes[i]` has a neighbour two apart.
pub fn is_twin_prime(primes: &[u32], i: usize) -> bool {
    let below = i > 0 && primes[i] - primes[i - 1] == 2;
    let above = primes.get(i + 1).is_some_and(|&next| next - primes[i] == 2);
    below || above
}

/// Bounding box of the `i`-th generated location: squares of side 5 laid out
/// on a 10-wide grid with spacing 10.
pub fn location_box(i: usize) -> (f64, f64, f64, f64) {
    let x = (i % 10) as f64 * 10.0;
    let y = (i / 10) as f64 * 10.0;
    (x, x + 5.0, y, y + 5.0)
}

/// JSON document for the `i`-th `json_data` row. Every third row has type
/// `test`.
pub fn json_document(i: usize) -> String {
    let kind = if i % 3 == 0 { "test" } else { "sample" };
    format!(r#"{{"key":"key_{i}","type":"{kind}","value":{}}}"#, i * i)
}

pub struct FeatureWorkload;

impl FeatureWorkload {
    pub fn new() -> Self {
        Self
    }

    fn load<F>(conn: &Connection, table: &'static str, fill: F) -> Result<TableLoad>
    where
        F: FnOnce(&Transaction) -> rusqlite::Result<usize>,
    {
        log::debug!("Populating {table}");
        let tx = conn.unchecked_transaction()?;
        let rows = fill(&tx).with_context(|| format!("populating {table}"))?;
        tx.commit()?;
        Ok(TableLoad { table, rows })
    }
}

impl Default for FeatureWorkload {
    fn default() -> Self {
        Self::new()
    }
}

impl Workload for FeatureWorkload {
    fn name(&self) -> &'static str {
        "features"
    }

    fn recipe(&self) -> FixtureRecipe {
        FixtureRecipe {
            constants: ConstantFormula::TrigPlusRoot,
            primes: PrimeMethod::Sieve,
            texts: TextSource::BaseVariants,
        }
    }

    fn create_tables(&self, conn: &Connection) -> Result<()> {
        conn.execute_batch(CREATE_SQL)
            .context("Failed to create table")
    }

    fn populate(&self, conn: &Connection, fixtures: &Fixtures) -> Result<Vec<TableLoad>> {
        log::info!("Creating and populating feature test tables...");
        let mut loads = Vec::with_capacity(6);

        loads.push(Self::load(conn, "math_constants", |tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO math_constants (name, value, description) VALUES (?1, ?2, ?3)",
            )?;
            for c in &NAMED_CONSTANTS {
                stmt.execute(params![c.name, c.value, c.description])?;
            }
            Ok(NAMED_CONSTANTS.len())
        })?);

        loads.push(Self::load(conn, "prime_numbers", |tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO prime_numbers (number, is_twin_prime, gap_to_next) VALUES (?1, ?2, ?3)",
            )?;
            let primes = &fixtures.primes;
            let rows = primes.len().min(PRIME_ROWS);
            for i in 0..rows {
                let gap = primes.get(i + 1).map_or(0, |&next| next - primes[i]);
                stmt.execute(params![primes[i], is_twin_prime(primes, i), gap])?;
            }
            Ok(rows)
        })?);

        loads.push(Self::load(conn, "sample_texts", |tx| {
            let mut stmt = tx
                .prepare_cached("INSERT INTO sample_texts (content, category) VALUES (?1, ?2)")?;
            let texts = &fixtures.texts[..fixtures.texts.len().min(TEXT_ROWS)];
            for (i, text) in texts.iter().enumerate() {
                stmt.execute(params![text, TEXT_CATEGORIES[i % TEXT_CATEGORIES.len()]])?;
            }
            Ok(texts.len())
        })?);

        loads.push(Self::load(conn, "dictionary", |tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO dictionary (word, length, first_letter) VALUES (?1, ?2, ?3)",
            )?;
            for word in &fixtures.dictionary {
                let first: String = word.chars().take(1).collect();
                stmt.execute(params![word, word.len() as i64, first])?;
            }
            Ok(fixtures.dictionary.len())
        })?);

        loads.push(Self::load(conn, "locations", |tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO locations (id, min_x, max_x, min_y, max_y) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for i in 0..LOCATION_ROWS {
                let (min_x, max_x, min_y, max_y) = location_box(i);
                stmt.execute(params![(i + 1) as i64, min_x, max_x, min_y, max_y])?;
            }
            Ok(LOCATION_ROWS)
        })?);

        loads.push(Self::load(conn, "json_data", |tx| {
            let mut stmt = tx.prepare_cached("INSERT INTO json_data (data) VALUES (?1)")?;
            for i in 0..JSON_ROWS {
                stmt.execute([json_document(i)])?;
            }
            Ok(JSON_ROWS)
        })?);

        log::info!("Database populated with feature test data");
        Ok(loads)
    }

    fn queries(&self) -> &'static [QuerySpec] {
        QUERIES
    }
}
