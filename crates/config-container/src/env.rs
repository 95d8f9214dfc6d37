//! Environment variable lookup with boolean coercion

use std::collections::HashMap;

use tracing::debug;

use crate::value::Value;

/// A read-only source of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                debug!(key, "Ignoring non-unicode environment variable");
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Read `key` from the process environment.
///
/// See [`env_from`] for the coercion rules.
pub fn env(key: &str, default: Option<Value>) -> Option<Value> {
    env_from(&ProcessEnv, key, default)
}

/// Read `key` from `source`.
///
/// `"true"` and `"false"` (any case) become booleans, anything else is
/// returned as a string. An unset variable yields `default`.
///
/// ```
/// use std::collections::HashMap;
/// use config_container::{Value, env_from};
///
/// let vars = HashMap::from([("DEBUG".to_string(), "TRUE".to_string())]);
/// assert_eq!(env_from(&vars, "DEBUG", None), Some(Value::Bool(true)));
/// assert_eq!(env_from(&vars, "MISSING", Some(Value::from("x"))), Some(Value::from("x")));
/// ```
pub fn env_from<S>(source: &S, key: &str, default: Option<Value>) -> Option<Value>
where
    S: EnvSource + ?Sized,
{
    match source.var(key) {
        Some(raw) => Some(coerce(raw)),
        None => default,
    }
}

fn coerce(raw: String) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[rstest]
    #[case("true", Value::Bool(true))]
    #[case("TRUE", Value::Bool(true))]
    #[case("False", Value::Bool(false))]
    #[case("hello", Value::String("hello".into()))]
    #[case("1", Value::String("1".into()))]
    #[case("", Value::String(String::new()))]
    fn test_coercion(#[case] raw: &str, #[case] expected: Value) {
        let source = vars(&[("KEY", raw)]);
        assert_eq!(env_from(&source, "KEY", None), Some(expected));
    }

    #[test]
    fn test_unset_returns_default() {
        let source = vars(&[]);
        assert_eq!(env_from(&source, "KEY", None), None);
        assert_eq!(
            env_from(&source, "KEY", Some(Value::Integer(7))),
            Some(Value::Integer(7))
        );
    }

    #[test]
    fn test_process_env_reads_existing_variable() {
        // PATH is set in every test environment this crate runs in.
        assert!(env("PATH", None).is_some());
        assert_eq!(
            env("CONFIG_CONTAINER_SURELY_UNSET_VAR", Some(Value::Null)),
            Some(Value::Null)
        );
    }
}
