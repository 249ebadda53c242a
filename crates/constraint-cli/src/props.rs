//! Assembling the property environment from the command line

use std::fs;

use anyhow::Context;
use fabric_constraint::Environment;
use tracing::debug;

use crate::cli::PropArgs;

/// Split `NAME=VALUE`. The value may itself contain `=`.
pub fn parse_prop(text: &str) -> Result<(String, String), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", text))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("property name is empty in `{}`", text));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Load the properties file, if any, then apply `--prop` overrides.
pub fn load_environment(args: &PropArgs) -> anyhow::Result<Environment> {
    let mut env = match &args.props_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("cannot read properties file {}", path.display()))?;
            let env = parse_props_json(&text)
                .with_context(|| format!("invalid properties file {}", path.display()))?;
            debug!(path = %path.display(), count = env.len(), "loaded properties file");
            env
        }
        None => Environment::new(),
    };

    env.extend(args.props.iter().cloned());
    Ok(env)
}

/// Parse a JSON object of string properties.
pub fn parse_props_json(text: &str) -> anyhow::Result<Environment> {
    serde_json::from_str(text).context("expected a JSON object mapping names to string values")
}
