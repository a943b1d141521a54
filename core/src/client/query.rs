// vitrine_core/src/client/query.rs

//! Builder for the REST endpoint's filter grammar.
//!
//! Renders to a flat parameter list (`select`, `<column>=eq.<value>`,
//! `or=(...)`, `order`, `limit`, `offset`) in a fixed canonical order, so a
//! given query always produces the same request and tests can assert on the
//! exact rendering.

use std::fmt::Display;

/// Sort direction for an `order` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
  Asc,
  Desc,
}

impl Direction {
  fn suffix(&self) -> &'static str {
    match self {
      Direction::Asc => "asc",
      Direction::Desc => "desc",
    }
  }
}

/// A single read (or row-targeting) query against one table.
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
  columns: Option<String>,
  filters: Vec<(String, String)>,
  or_groups: Vec<String>,
  order: Vec<String>,
  limit: Option<usize>,
  offset: Option<usize>,
}

impl SelectQuery {
  pub fn new() -> Self {
    Self::default()
  }

  /// Restricts the returned columns. Whitespace is stripped so callers can
  /// write readable comma lists.
  pub fn columns(mut self, columns: &str) -> Self {
    let cleaned: String = columns.chars().filter(|c| !c.is_whitespace()).collect();
    self.columns = Some(cleaned);
    self
  }

  pub fn eq(mut self, column: &str, value: impl Display) -> Self {
    self.filters.push((column.to_string(), format!("eq.{}", value)));
    self
  }

  pub fn neq(mut self, column: &str, value: impl Display) -> Self {
    self.filters.push((column.to_string(), format!("neq.{}", value)));
    self
  }

  /// Case-insensitive substring match of `term` against any of `columns`,
  /// rendered as one `or=(col.ilike.*term*,...)` group.
  pub fn search_any(mut self, columns: &[&str], term: &str) -> Self {
    let term = sanitize_term(term);
    let clauses: Vec<String> = columns
      .iter()
      .map(|column| format!("{}.ilike.*{}*", column, term))
      .collect();
    self.or_groups.push(format!("({})", clauses.join(",")));
    self
  }

  pub fn order(mut self, column: &str, direction: Direction) -> Self {
    self.order.push(format!("{}.{}", column, direction.suffix()));
    self
  }

  pub fn limit(mut self, n: usize) -> Self {
    self.limit = Some(n);
    self
  }

  /// Row window by inclusive bounds, matching the `from`/`to` convention of
  /// hosted client SDKs: `range(12, 23)` is the second page of twelve.
  pub fn range(mut self, from: usize, to: usize) -> Self {
    self.offset = Some(from);
    self.limit = Some(to.saturating_sub(from) + 1);
    self
  }

  /// Renders the canonical parameter list: `select`, equality filters in
  /// insertion order, `or` groups, `order`, `limit`, `offset`.
  pub fn into_params(self) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(columns) = self.columns {
      params.push(("select".to_string(), columns));
    }
    for (column, condition) in self.filters {
      params.push((column, condition));
    }
    for group in self.or_groups {
      params.push(("or".to_string(), group));
    }
    if !self.order.is_empty() {
      params.push(("order".to_string(), self.order.join(",")));
    }
    if let Some(limit) = self.limit {
      params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = self.offset {
      params.push(("offset".to_string(), offset.to_string()));
    }

    params
  }
}

// The characters that delimit the or-group grammar cannot appear inside a
// pattern, so they are dropped from user-typed terms.
fn sanitize_term(term: &str) -> String {
  term
    .trim()
    .chars()
    .filter(|c| !matches!(c, '(' | ')' | ','))
    .collect()
}
