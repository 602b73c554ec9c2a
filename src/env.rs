use std::collections::HashMap;

use serde_json::Value;

/// Variable bindings that directive expressions evaluate against. Frozen
/// from the scanner's point of view: evaluation only ever borrows it.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Snapshot of the process environment, every value a string. This is
    /// the host's default policy; the core never calls it on its own.
    pub fn from_process_env() -> Self {
        let vars = std::env::vars()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        Self { vars }
    }

    pub fn define(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

/// Parse one `NAME=VALUE` define spec. The value side is taken as a JSON
/// scalar when it parses as one (`1`, `true`, `"quoted"`), otherwise as a
/// plain string; a bare `NAME` defines `true`.
pub fn parse_define(spec: &str) -> (String, Value) {
    match spec.split_once('=') {
        Some((name, raw)) => {
            let value =
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            (name.to_string(), value)
        }
        None => (spec.to_string(), Value::Bool(true)),
    }
}

/// Split a whole define list (shell-style quoting) into parsed pairs.
pub fn parse_define_list(specs: &str) -> Vec<(String, Value)> {
    shlex::Shlex::new(specs)
        .map(|word| parse_define(&word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn define_specs_parse_as_json_scalars() {
        assert_eq!(parse_define("RETRIES=3"), ("RETRIES".to_string(), json!(3)));
        assert_eq!(
            parse_define("DEBUG=true"),
            ("DEBUG".to_string(), json!(true))
        );
        assert_eq!(
            parse_define("NAME=alice"),
            ("NAME".to_string(), json!("alice"))
        );
        assert_eq!(parse_define("DEBUG"), ("DEBUG".to_string(), json!(true)));
        assert_eq!(parse_define("EMPTY="), ("EMPTY".to_string(), json!("")));
    }

    #[test]
    fn define_lists_respect_quoting() {
        let defs = parse_define_list(r#"A=1 GREETING="hello world" FLAG"#);
        assert_eq!(defs.len(), 3, "should split into 3 defines");
        assert_eq!(defs[0], ("A".to_string(), json!(1)));
        assert_eq!(defs[1], ("GREETING".to_string(), json!("hello world")));
        assert_eq!(defs[2], ("FLAG".to_string(), json!(true)));
    }

    #[test]
    fn process_snapshot_sees_real_variables() {
        std::env::set_var("IFDEF_SNAPSHOT_PROBE", "yes");
        let env = Environment::from_process_env();
        assert!(env.contains("IFDEF_SNAPSHOT_PROBE"));
        assert_eq!(
            env.get("IFDEF_SNAPSHOT_PROBE"),
            Some(&Value::String("yes".to_string()))
        );
    }

    #[test]
    fn defines_overwrite_earlier_values() {
        let mut env = Environment::new();
        env.define("MODE", "debug");
        env.define("MODE", "release");
        assert_eq!(env.get("MODE"), Some(&json!("release")));
        assert_eq!(env.len(), 1);
    }
}
