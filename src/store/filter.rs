// src/store/filter.rs

use std::fmt::Display;

/// Builder for items API query strings: equality filters
/// (`filter[field][_eq]=v`), containment filters (`filter[field][_in]=a,b`),
/// field selection and limits.
#[derive(Debug, Clone, Default)]
pub struct Query {
  params: Vec<(String, String)>,
}

impl Query {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn eq(mut self, field: &str, value: impl Display) -> Self {
    self
      .params
      .push((format!("filter[{}][_eq]", field), value.to_string()));
    self
  }

  /// Containment filter. Callers must not pass an empty id set; the items
  /// API treats an empty `_in` list as malformed.
  pub fn is_in<I, V>(mut self, field: &str, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Display,
  {
    let joined = values
      .into_iter()
      .map(|v| v.to_string())
      .collect::<Vec<_>>()
      .join(",");
    self.params.push((format!("filter[{}][_in]", field), joined));
    self
  }

  pub fn fields(mut self, fields: &[&str]) -> Self {
    self.params.push(("fields".to_string(), fields.join(",")));
    self
  }

  pub fn limit(mut self, limit: u32) -> Self {
    self.params.push(("limit".to_string(), limit.to_string()));
    self
  }

  pub fn params(&self) -> &[(String, String)] {
    &self.params
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_equality_and_containment_params() {
    let q = Query::new()
      .eq("user_id", "u1")
      .eq("status", "pending")
      .is_in("id", ["a", "b", "c"])
      .fields(&["id", "name"])
      .limit(4);

    assert_eq!(
      q.params(),
      &[
        ("filter[user_id][_eq]".to_string(), "u1".to_string()),
        ("filter[status][_eq]".to_string(), "pending".to_string()),
        ("filter[id][_in]".to_string(), "a,b,c".to_string()),
        ("fields".to_string(), "id,name".to_string()),
        ("limit".to_string(), "4".to_string()),
      ]
    );
  }
}
