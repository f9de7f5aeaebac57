// SPDX-License-Identifier: Apache-2.0
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::Config;

const ENV_PREFIX: &str = "MEMORYD_";

/// Ordered list of config file locations searched from lowest to highest
/// priority. Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("/etc/memoryd/config.yaml"));
    paths.push(PathBuf::from("/etc/memoryd/config.yml"));

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/memoryd/config.yaml"));
        paths.push(home.join(".config/memoryd/config.yml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("memoryd/config.yaml"));
        paths.push(cfg.join("memoryd/config.yml"));
    }

    paths.push(PathBuf::from(".memoryd/config.yaml"));
    paths.push(PathBuf::from(".memoryd/config.yml"));
    paths.push(PathBuf::from("memoryd.yaml"));
    paths.push(PathBuf::from("memoryd.yml"));

    paths
}

/// Load configuration by merging discovered YAML files, an optional
/// explicit `--config`/`MEMORYD_CONFIG` path, and `MEMORYD_`-prefixed
/// environment variable overrides, in that priority order.
pub fn load(extra: Option<&Path>) -> anyhow::Result<Config> {
    let mut merged = serde_yaml::Value::Mapping(serde_yaml::Mapping::new());

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            let layer = read_yaml_file(&path)?;
            merge_yaml(&mut merged, layer);
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        let layer = read_yaml_file(p)?;
        merge_yaml(&mut merged, layer);
    }

    let env_layer = env_overrides();
    merge_yaml(&mut merged, env_layer);

    let config: Config = if matches!(merged, serde_yaml::Value::Mapping(ref m) if m.is_empty()) {
        Config::default()
    } else {
        serde_yaml::from_value(merged).context("deserializing merged configuration")?
    };
    Ok(config)
}

fn read_yaml_file(path: &Path) -> anyhow::Result<serde_yaml::Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Build a nested YAML mapping from every `MEMORYD_<SECTION>__<FIELD>`
/// environment variable, applied as the final, highest-priority layer
/// (the one deviation from the reference file-only loader: operators
/// overriding a checked-in config in a container need this without
/// editing the file).
fn env_overrides() -> serde_yaml::Value {
    let mut root = serde_yaml::Mapping::new();
    for (key, value) in std::env::vars() {
        let Some(rest) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        if rest.is_empty() || rest == "CONFIG" {
            continue;
        }
        let path: Vec<String> = rest.split("__").map(|s| s.to_lowercase()).collect();
        set_nested(&mut root, &path, scalar_from_env(&value));
    }
    serde_yaml::Value::Mapping(root)
}

fn scalar_from_env(value: &str) -> serde_yaml::Value {
    serde_yaml::from_str(value).unwrap_or_else(|_| serde_yaml::Value::String(value.to_string()))
}

fn set_nested(map: &mut serde_yaml::Mapping, path: &[String], value: serde_yaml::Value) {
    let Some((head, tail)) = path.split_first() else {
        return;
    };
    let key = serde_yaml::Value::String(head.clone());
    if tail.is_empty() {
        map.insert(key, value);
        return;
    }
    let entry = map
        .entry(key)
        .or_insert_with(|| serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    if let serde_yaml::Value::Mapping(nested) = entry {
        set_nested(nested, tail, value);
    }
}

/// Deep-merge `src` into `dst`; `src` wins on scalar conflicts.
fn merge_yaml(dst: &mut serde_yaml::Value, src: serde_yaml::Value) {
    match (dst, src) {
        (serde_yaml::Value::Mapping(d), serde_yaml::Value::Mapping(s)) => {
            for (k, v) in s {
                let entry = d
                    .entry(k)
                    .or_insert(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
                merge_yaml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
