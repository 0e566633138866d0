// src/core/remapper.rs

use std::collections::BTreeMap;

/// Built-in Gradle task names for the shared lifecycle vocabulary.
pub const GRADLE_DEFAULTS: &[(&str, &str)] = &[
    ("compile", "classes"),
    ("package", "assemble"),
    ("verify", "build"),
    ("install", "publishToMavenLocal"),
    ("exec:java", "run"),
    ("dependency:tree", "dependencies"),
];

/// Built-in Maven goals for the shared lifecycle vocabulary.
pub const MAVEN_DEFAULTS: &[(&str, &str)] = &[
    ("classes", "compile"),
    ("jar", "package"),
    ("assemble", "package"),
    ("build", "verify"),
    ("publishToMavenLocal", "install"),
    ("puTML", "install"),
    ("check", "verify"),
    ("run", "exec:java"),
    ("dependencies", "dependency:tree"),
];

/// How a token may match a mapping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The whole token must equal the key.
    Exact,
    /// Also try the part after the last `:`, keeping the prefix verbatim
    /// (`:sub:verify` becomes `:sub:build`).
    SubPath,
}

/// Rewrites each token through `mappings`. Tokens without a mapping, and
/// tokens mapped to an empty value, pass through unchanged.
pub fn remap_goals(args: &[String], mappings: &BTreeMap<String, String>, mode: MatchMode) -> Vec<String> {
    args.iter()
        .map(|token| remap_one(token, mappings, mode))
        .collect()
}

fn remap_one(token: &str, mappings: &BTreeMap<String, String>, mode: MatchMode) -> String {
    if let Some(mapped) = lookup(mappings, token) {
        return mapped.to_string();
    }

    if mode == MatchMode::SubPath
        && let Some((prefix, suffix)) = token.rsplit_once(':')
        && let Some(mapped) = lookup(mappings, suffix)
    {
        return format!("{}:{}", prefix, mapped);
    }

    token.to_string()
}

fn lookup<'a>(mappings: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    mappings
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Turns one of the default tables into an owned mapping.
pub fn default_mappings(table: &[(&str, &str)]) -> BTreeMap<String, String> {
    table
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}
