//! Named groupings of states.

use serde::{Deserialize, Serialize};

/// A named group of states used for membership queries.
///
/// Sets carry no transition semantics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSet {
    name: String,
    members: Vec<String>,
}

/// How [`StateSet::to_sql_list`] renders member names.
///
/// Missing fields take their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqlListOptions {
    /// Placed around each name; doubled when it occurs inside a name
    pub quotes: String,
    /// Placed between names
    pub join: String,
    /// Opening and closing text around the whole list
    pub surround: (String, String),
}

impl Default for SqlListOptions {
    fn default() -> Self {
        Self {
            quotes: "'".to_string(),
            join: ",".to_string(),
            surround: ("(".to_string(), ")".to_string()),
        }
    }
}

impl StateSet {
    pub(crate) fn new(name: String, members: Vec<String>) -> Self {
        Self { name, members }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member state names in declaration order, without duplicates.
    pub fn state_names(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, state: &str) -> bool {
        self.members.iter().any(|m| m == state)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Render the member names as a list for a SQL `IN` clause.
    ///
    /// Pairs with [`RecordStore::write_initial_state`](crate::store::RecordStore::write_initial_state),
    /// which makes every stored record carry its state name.
    ///
    /// ```rust
    /// use stateline::core::{Specification, SqlListOptions};
    ///
    /// let spec = Specification::<()>::builder()
    ///     .state("pending")
    ///     .state("active")
    ///     .state("closed")
    ///     .state_set("open", ["pending", "active"])
    ///     .build()
    ///     .unwrap();
    ///
    /// let open = spec.state_set("open").unwrap();
    /// let sql = format!("current_state IN {}", open.to_sql_list(&SqlListOptions::default()));
    /// assert_eq!(sql, "current_state IN ('pending','active')");
    /// ```
    pub fn to_sql_list(&self, options: &SqlListOptions) -> String {
        let escaped = format!("{0}{0}", options.quotes);
        let items: Vec<String> = self
            .members
            .iter()
            .map(|name| {
                let name = if options.quotes.is_empty() {
                    name.clone()
                } else {
                    name.replace(&options.quotes, &escaped)
                };
                format!("{0}{1}{0}", options.quotes, name)
            })
            .collect();
        format!(
            "{}{}{}",
            options.surround.0,
            items.join(&options.join),
            options.surround.1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> StateSet {
        StateSet::new(
            "open".to_string(),
            vec!["pending".to_string(), "active".to_string()],
        )
    }

    #[test]
    fn default_sql_list() {
        assert_eq!(open().to_sql_list(&SqlListOptions::default()), "('pending','active')");
    }

    #[test]
    fn custom_sql_list() {
        let options = SqlListOptions {
            quotes: "\"".to_string(),
            join: ", ".to_string(),
            surround: ("[".to_string(), "]".to_string()),
        };
        assert_eq!(open().to_sql_list(&options), r#"["pending", "active"]"#);
    }

    #[test]
    fn partial_options_keep_defaults() {
        let options: SqlListOptions = serde_json::from_str(r#"{"join": " , "}"#).unwrap();
        assert_eq!(open().to_sql_list(&options), "('pending' , 'active')");
    }

    #[test]
    fn embedded_quote_is_doubled() {
        let set = StateSet::new("odd".to_string(), vec!["o'clock".to_string()]);
        assert_eq!(set.to_sql_list(&SqlListOptions::default()), "('o''clock')");
    }

    #[test]
    fn empty_set_renders_empty_list() {
        let set = StateSet::new("none".to_string(), Vec::new());
        assert_eq!(set.to_sql_list(&SqlListOptions::default()), "()");
    }
}
