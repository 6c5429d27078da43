//! Running the fixed query batteries and holding their results.

use rusqlite::types::{Value, ValueRef};
use rusqlite::Connection;

/// How many rows of a query's result are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    All,
    First,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuerySpec {
    pub title: &'static str,
    pub sql: &'static str,
    pub rows: RowMode,
}

impl QuerySpec {
    pub const fn all(title: &'static str, sql: &'static str) -> Self {
        Self {
            title,
            sql,
            rows: RowMode::All,
        }
    }

    pub const fn first(title: &'static str, sql: &'static str) -> Self {
        Self {
            title,
            sql,
            rows: RowMode::First,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

#[derive(Debug)]
pub struct QueryOutcome {
    pub spec: QuerySpec,
    pub result: Result<QueryRows, rusqlite::Error>,
}

impl QueryOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Prepares, steps and finalizes one query.
pub fn run_query(conn: &Connection, spec: &QuerySpec) -> rusqlite::Result<QueryRows> {
    let mut stmt = conn.prepare(spec.sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let mut rows = Vec::new();
    let mut cursor = stmt.query([])?;
    while let Some(row) = cursor.next()? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(Value::from(row.get_ref(i)?));
        }
        rows.push(values);
        if spec.rows == RowMode::First {
            break;
        }
    }

    Ok(QueryRows { columns, rows })
}

/// Runs every query in order. A failing query is recorded and the battery
/// moves on.
pub fn run_battery(conn: &Connection, specs: &[QuerySpec]) -> Vec<QueryOutcome> {
    specs
        .iter()
        .map(|spec| {
            log::debug!("Executing: {}", spec.title);
            let result = run_query(conn, spec);
            if let Err(err) = &result {
                log::error!("Query '{}' failed: {err}", spec.title);
            }
            QueryOutcome {
                spec: *spec,
                result,
            }
        })
        .collect()
}

/// Renders a value the way the reports print it.
pub fn render_value(value: &Value) -> String {
    match ValueRef::from(value) {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => format!("{f:.4}"),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE t(id INTEGER PRIMARY KEY, name TEXT, score REAL);
             INSERT INTO t(name, score) VALUES ('a', 1.5), ('b', NULL), ('c', 3.25);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn all_rows_are_kept() {
        let spec = QuerySpec::all("all", "SELECT id, name, score FROM t ORDER BY id");
        let rows = run_query(&conn(), &spec).unwrap();
        assert_eq!(rows.columns, vec!["id", "name", "score"]);
        assert_eq!(rows.rows.len(), 3);
        assert_eq!(rows.rows[1][2], Value::Null);
    }

    #[test]
    fn first_mode_keeps_one_row() {
        let spec = QuerySpec::first("first", "SELECT name FROM t ORDER BY id DESC");
        let rows = run_query(&conn(), &spec).unwrap();
        assert_eq!(rows.rows, vec![vec![Value::Text("c".to_string())]]);
    }

    #[test]
    fn battery_continues_past_failures() {
        let specs = [
            QuerySpec::all("bad", "SELECT * FROM missing_table"),
            QuerySpec::all("good", "SELECT COUNT(*) FROM t"),
        ];
        let outcomes = run_battery(&conn(), &specs);
        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_ok());
        let good = outcomes[1].result.as_ref().unwrap();
        assert_eq!(good.rows[0][0], Value::Integer(3));
    }

    #[test]
    fn render_values() {
        assert_eq!(render_value(&Value::Null), "NULL");
        assert_eq!(render_value(&Value::Integer(-4)), "-4");
        assert_eq!(render_value(&Value::Real(2.5)), "2.5000");
        assert_eq!(render_value(&Value::Text("fox".into())), "fox");
        assert_eq!(render_value(&Value::Blob(vec![1, 2, 3])), "<3 bytes>");
    }
}
