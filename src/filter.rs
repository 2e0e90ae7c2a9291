//! Filter and sort expression builder
//!
//! Builds the filter/sort strings the backend's list endpoints understand,
//! e.g. `(status = 'active' && age > 21)` and `-created,title`.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Compile `(field, direction)` pairs into a sort expression.
pub fn sort_expr(specs: &[(&str, SortDir)]) -> String {
    specs
        .iter()
        .map(|(field, dir)| match dir {
            SortDir::Asc => field.to_string(),
            SortDir::Desc => format!("-{}", field),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Filter condition
#[derive(Debug, Clone)]
pub enum Filter {
    Eq(String, Value),
    Ne(String, Value),
    Gt(String, Value),
    Gte(String, Value),
    Lt(String, Value),
    Lte(String, Value),
    Like(String, String),
    NotLike(String, String),
    AnyEq(String, Value),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Raw(String),
}

impl Filter {
    pub fn compile(&self) -> String {
        match self {
            Filter::Eq(field, value) => format!("{} = {}", field, literal(value)),
            Filter::Ne(field, value) => format!("{} != {}", field, literal(value)),
            Filter::Gt(field, value) => format!("{} > {}", field, literal(value)),
            Filter::Gte(field, value) => format!("{} >= {}", field, literal(value)),
            Filter::Lt(field, value) => format!("{} < {}", field, literal(value)),
            Filter::Lte(field, value) => format!("{} <= {}", field, literal(value)),
            Filter::Like(field, value) => {
                format!("{} ~ {}", field, literal(&Value::String(value.clone())))
            }
            Filter::NotLike(field, value) => {
                format!("{} !~ {}", field, literal(&Value::String(value.clone())))
            }
            Filter::AnyEq(field, value) => format!("{} ?= {}", field, literal(value)),
            Filter::And(conditions) => group(conditions, " && "),
            Filter::Or(conditions) => group(conditions, " || "),
            Filter::Raw(expr) => expr.clone(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.compile())
    }
}

/// Empty groups compile to an empty string and are dropped from their parent.
fn group(conditions: &[Filter], joiner: &str) -> String {
    let parts: Vec<String> = conditions
        .iter()
        .map(|c| c.compile())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return String::new();
    }
    format!("({})", parts.join(joiner))
}

/// Render a JSON value as a filter literal.
///
/// Strings are single-quoted with `'` escaped; arrays and objects are quoted
/// JSON text.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        other => quote(&other.to_string()),
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "\\'"))
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{:(\w+)\}").expect("placeholder pattern is valid"))
}

/// Substitute `{:name}` placeholders with escaped literals.
///
/// Unknown placeholders are left untouched.
///
/// # Example
/// ```
/// use baseguard::filter::bind;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let params = HashMap::from([("title".to_string(), json!("it's"))]);
/// assert_eq!(bind("title ~ {:title}", &params), r"title ~ 'it\'s'");
/// ```
pub fn bind(expr: &str, params: &HashMap<String, Value>) -> String {
    placeholder()
        .replace_all(expr, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => literal(value),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Field expression builder for fluent filter construction
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn eq(self, value: impl Into<Value>) -> Filter {
        Filter::Eq(self.name, value.into())
    }

    pub fn ne(self, value: impl Into<Value>) -> Filter {
        Filter::Ne(self.name, value.into())
    }

    pub fn gt(self, value: impl Into<Value>) -> Filter {
        Filter::Gt(self.name, value.into())
    }

    pub fn gte(self, value: impl Into<Value>) -> Filter {
        Filter::Gte(self.name, value.into())
    }

    pub fn lt(self, value: impl Into<Value>) -> Filter {
        Filter::Lt(self.name, value.into())
    }

    pub fn lte(self, value: impl Into<Value>) -> Filter {
        Filter::Lte(self.name, value.into())
    }

    pub fn like(self, value: impl Into<String>) -> Filter {
        Filter::Like(self.name, value.into())
    }

    pub fn not_like(self, value: impl Into<String>) -> Filter {
        Filter::NotLike(self.name, value.into())
    }

    /// Matches when any element of a multi-value field equals `value`.
    pub fn any_eq(self, value: impl Into<Value>) -> Filter {
        Filter::AnyEq(self.name, value.into())
    }
}

/// Create a field expression
pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

/// Combine filters with AND
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::And(filters)
}

/// Combine filters with OR
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::Or(filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_comparison() {
        assert_eq!(field("age").gt(21).compile(), "age > 21");
        assert_eq!(field("name").eq("Alice").compile(), "name = 'Alice'");
        assert_eq!(field("verified").ne(true).compile(), "verified != true");
        assert_eq!(field("parent").eq(Value::Null).compile(), "parent = null");
    }

    #[test]
    fn test_quotes_are_escaped() {
        assert_eq!(field("title").like("it's").compile(), r"title ~ 'it\'s'");
    }

    #[test]
    fn test_grouping() {
        let f = and(vec![
            field("status").eq("active"),
            or(vec![field("age").gte(18), field("guardian").ne("")]),
        ]);
        assert_eq!(
            f.compile(),
            "(status = 'active' && (age >= 18 || guardian != ''))"
        );
    }

    #[test]
    fn test_empty_groups_compile_to_nothing() {
        assert_eq!(and(vec![]).compile(), "");
        assert_eq!(or(vec![]).compile(), "");
        assert_eq!(
            and(vec![field("status").eq("active"), or(vec![])]).compile(),
            "(status = 'active')"
        );
    }

    #[test]
    fn test_any_eq_and_raw() {
        assert_eq!(field("tags").any_eq("rust").compile(), "tags ?= 'rust'");
        assert_eq!(Filter::Raw("created > @now".into()).to_string(), "created > @now");
    }

    #[test]
    fn test_sort_expr() {
        assert_eq!(
            sort_expr(&[("created", SortDir::Desc), ("title", SortDir::Asc)]),
            "-created,title"
        );
        assert_eq!(sort_expr(&[]), "");
    }

    #[test]
    fn test_bind() {
        let params = HashMap::from([
            ("min".to_string(), json!(10)),
            ("name".to_string(), json!("O'Neil")),
        ]);
        assert_eq!(
            bind("total > {:min} && name = {:name} && x = {:missing}", &params),
            r"total > 10 && name = 'O\'Neil' && x = {:missing}"
        );
    }
}
