//! The data tree handed to the template engine.
//!
//! The tree's root keys are fixed: `Env`, `Var`, `CSV`, `JSON` and `YML`.
//! Templates address data through these names, so they are part of the
//! public contract and never change with flag spelling.

use serde::Serialize;
use serde_json::{Map, Value};

use super::Namespace;
use super::binder::{Bindings, NamespaceBinder};
use crate::core::TmplxError;

/// Process environment captured once, as `KEY=value` tokens.
///
/// Capturing into tokens lets the environment flow through the same
/// splitting and binding path as `--var`. Non-UTF-8 names and values are
/// converted lossily.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    tokens: Vec<String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self::from_pairs(
            std::env::vars_os()
                .map(|(k, v)| (k.to_string_lossy().into_owned(), v.to_string_lossy().into_owned())),
        )
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            tokens: pairs
                .into_iter()
                .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
                .collect(),
        }
    }

    /// The captured `KEY=value` tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

/// Reference tokens per namespace, in command-line order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    /// `--var` tokens
    pub vars: Vec<String>,
    /// `--csv` tokens
    pub csvs: Vec<String>,
    /// `--json` tokens
    pub jsons: Vec<String>,
    /// `--yml` tokens
    pub ymls: Vec<String>,
}

/// Combined data of all namespaces for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataTree {
    /// Captured environment
    #[serde(rename = "Env")]
    pub env: Bindings,
    /// `--var` values
    #[serde(rename = "Var")]
    pub var: Bindings,
    /// `--csv` record lists
    #[serde(rename = "CSV")]
    pub csv: Bindings,
    /// `--json` documents
    #[serde(rename = "JSON")]
    pub json: Bindings,
    /// `--yml` documents
    #[serde(rename = "YML")]
    pub yml: Bindings,
}

impl DataTree {
    /// Combine already bound namespaces.
    #[must_use]
    pub fn assemble(env: Bindings, var: Bindings, csv: Bindings, json: Bindings, yml: Bindings) -> Self {
        Self {
            env,
            var,
            csv,
            json,
            yml,
        }
    }

    /// Bind every namespace in order (Var, CSV, JSON, YML, Env) and assemble
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns the first binding failure; no partial tree is produced.
    pub fn bind(
        references: &References,
        env: &EnvSnapshot,
        binder: &mut NamespaceBinder<'_>,
    ) -> Result<Self, TmplxError> {
        let var = binder.bind(&references.vars, Namespace::Var)?;
        let csv = binder.bind(&references.csvs, Namespace::Csv)?;
        let json = binder.bind(&references.jsons, Namespace::Json)?;
        let yml = binder.bind(&references.ymls, Namespace::Yml)?;
        let env = binder.bind(env.tokens(), Namespace::Env)?;
        Ok(Self::assemble(env, var, csv, json, yml))
    }

    /// The bindings of one namespace.
    #[must_use]
    pub const fn namespace(&self, namespace: Namespace) -> &Bindings {
        match namespace {
            Namespace::Env => &self.env,
            Namespace::Var => &self.var,
            Namespace::Csv => &self.csv,
            Namespace::Json => &self.json,
            Namespace::Yml => &self.yml,
        }
    }

    /// The tree as a JSON object keyed by namespace root key.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut root = Map::new();
        for namespace in Namespace::ALL {
            let bindings = self.namespace(namespace);
            let object: Map<String, Value> =
                bindings.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            root.insert(namespace.root_key().to_string(), Value::Object(object));
        }
        Value::Object(root)
    }

    /// Dotted paths of all object members up to `max_depth` levels deep,
    /// starting with the namespace keys themselves.
    ///
    /// Arrays are not descended into. Used to suggest alternatives for
    /// misspelled template variables.
    #[must_use]
    pub fn paths(&self, max_depth: usize) -> Vec<String> {
        let mut paths = Vec::new();
        if let Value::Object(root) = self.to_value() {
            collect_paths(&root, "", max_depth, &mut paths);
        }
        paths
    }
}

fn collect_paths(object: &Map<String, Value>, prefix: &str, depth: usize, out: &mut Vec<String>) {
    if depth == 0 {
        return;
    }
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        if let Value::Object(child) = value {
            collect_paths(child, &path, depth - 1, out);
        }
        out.push(path);
    }
}
