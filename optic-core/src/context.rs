//! Per-invocation execution state.
//!
//! A `Context` is created once per top-level run and passed by mutable
//! reference through the whole recursive dispatch: the token cursor, the
//! accumulated option values, the stack of visited command nodes (for usage
//! and error reporting) and the last error encountered.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::arguments::Arguments;
use crate::command::Command;
use crate::error::{Error, Result};

/// A single stored option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<String>),
}

/// Option values accumulated during one parse, keyed by option long name.
/// Entries are created lazily on first match; list options append across
/// repeated occurrences.
#[derive(Debug, Default)]
pub struct OptionValues {
    values: HashMap<String, OptionValue>,
}

impl OptionValues {
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: OptionValue) {
        self.values.insert(name.into(), value);
    }

    /// Stored boolean for `name`, or `false` when absent or not a boolean.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(OptionValue::Bool(true)))
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(OptionValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(OptionValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(OptionValue::List(items)) => Some(items),
            _ => None,
        }
    }

    /// Appends to the list stored under `name`, creating it on first use. A
    /// non-list value under the same name is replaced.
    pub(crate) fn push_list(&mut self, name: &str, value: String) {
        match self.values.get_mut(name) {
            Some(OptionValue::List(items)) => items.push(value),
            _ => {
                self.values.insert(name.to_string(), OptionValue::List(vec![value]));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub struct Context<'a> {
    pub arguments: Arguments,
    pub options: OptionValues,
    /// Visited command nodes, root first. The top of the stack is the node
    /// currently executing.
    pub stack: Vec<&'a Command>,
    /// Last error encountered, stored for error handlers to inspect.
    pub error: Option<Error>,
}

impl<'a> Context<'a> {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Context {
            arguments: Arguments::new(args),
            options: OptionValues::default(),
            stack: Vec::new(),
            error: None,
        }
    }

    /// The visited command names joined with spaces, e.g. `optic count`.
    /// Used as the program name in usage text.
    pub fn command_path(&self) -> String {
        let names: Vec<&str> = self.stack.iter().map(|cmd| cmd.name.as_str()).collect();
        names.join(" ")
    }

    /// Populates a struct from the accumulated option values.
    ///
    /// The value map is lowered to a JSON object keyed by option long names
    /// and deserialized into `T`; a disagreement between a stored value's
    /// kind and the destination field's type surfaces as `Error::Mapping`.
    pub fn map_into<T: DeserializeOwned>(&self) -> Result<T> {
        let mut object = serde_json::Map::new();
        for (name, value) in self.options.iter() {
            object.insert(name.clone(), serde_json::to_value(value)?);
        }
        let mapped = serde_json::from_value(Value::Object(object))?;
        Ok(mapped)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[test]
    fn list_values_accumulate_in_order() {
        let mut options = OptionValues::default();
        options.push_list("exclude", "a".to_string());
        options.push_list("exclude", "b".to_string());
        options.push_list("exclude", "c".to_string());
        assert_eq!(
            options.list("exclude").unwrap(),
            ["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn push_list_replaces_a_non_list_value() {
        let mut options = OptionValues::default();
        options.set("exclude", OptionValue::Bool(true));
        options.push_list("exclude", "a".to_string());
        assert_eq!(options.list("exclude").unwrap(), ["a".to_string()]);
    }

    #[test]
    fn map_into_populates_a_struct() {
        #[derive(Debug, Deserialize, Default)]
        #[serde(default)]
        struct Target {
            verbose: bool,
            file: Option<String>,
            jobs: i64,
            exclude: Vec<String>,
        }

        let mut ctx = Context::new(Vec::<String>::new());
        ctx.options.set("verbose", OptionValue::Bool(true));
        ctx.options.set("file", OptionValue::String("out.txt".to_string()));
        ctx.options.set("jobs", OptionValue::Int(4));
        ctx.options.push_list("exclude", "target".to_string());

        let target: Target = ctx.map_into().unwrap();
        assert!(target.verbose);
        assert_eq!(target.file.as_deref(), Some("out.txt"));
        assert_eq!(target.jobs, 4);
        assert_eq!(target.exclude, ["target".to_string()]);
    }

    #[test]
    fn map_into_reports_kind_disagreement() {
        #[derive(Debug, Deserialize)]
        struct Target {
            #[allow(dead_code)]
            jobs: i64,
        }

        let mut ctx = Context::new(Vec::<String>::new());
        ctx.options.set("jobs", OptionValue::String("not a number".to_string()));

        let result = ctx.map_into::<Target>();
        assert!(matches!(result, Err(Error::Mapping(_))));
    }

    #[test]
    fn unknown_keys_are_ignored_when_mapping() {
        #[derive(Debug, Deserialize, Default)]
        #[serde(default)]
        struct Target {
            verbose: bool,
        }

        let mut ctx = Context::new(Vec::<String>::new());
        ctx.options.set("verbose", OptionValue::Bool(true));
        ctx.options.set("unrelated", OptionValue::Int(9));

        let target: Target = ctx.map_into().unwrap();
        assert!(target.verbose);
    }
}
