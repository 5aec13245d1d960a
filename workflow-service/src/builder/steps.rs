// Step constructors
// Shared by the job graph builder and the built-in catalog

use crate::workflow::models::Step;

use serde_yaml::Value;

use std::collections::BTreeMap;

/// Action step: `{uses: action}`
pub fn uses(action: impl Into<String>) -> Step {
    Step {
        uses: Some(action.into()),
        ..Default::default()
    }
}

/// Shell step: `{run: command}`
pub fn run(command: impl Into<String>) -> Step {
    Step {
        run: Some(command.into()),
        ..Default::default()
    }
}

/// Shell step scoped to a working directory
pub fn run_in_dir(command: impl Into<String>, dir: impl Into<String>) -> Step {
    Step {
        run: Some(command.into()),
        working_directory: Some(dir.into()),
        ..Default::default()
    }
}

/// Install system packages without recommended extras
pub fn install(packages: &[&str]) -> Step {
    run(format!(
        "sudo apt-get install -y --no-install-recommends {}",
        packages.join(" ")
    ))
}

/// Configure the runtime for one axis value.
///
/// `extra` is merged over the version input, so an axis may override it.
pub fn setup_runtime(
    action: &str,
    version_input: &str,
    version: &str,
    extra: &BTreeMap<String, Value>,
) -> Step {
    let mut with = BTreeMap::new();
    with.insert(
        version_input.to_string(),
        Value::String(version.to_string()),
    );
    with.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    Step {
        uses: Some(action.to_string()),
        with,
        ..Default::default()
    }
}

/// Run a suite command through `prefix` inside `dir`
pub fn exec_in_dir(prefix: &str, command: &str, dir: &str) -> Step {
    let command = if prefix.trim().is_empty() {
        command.to_string()
    } else {
        format!("{} {}", prefix.trim(), command)
    };
    run_in_dir(command, dir)
}

/// Cache installed gems between runs, keyed on runner and axis value
pub fn dependency_cache(runs_on: &str, version: &str) -> Step {
    let mut with = BTreeMap::new();
    with.insert(
        "path".to_string(),
        Value::String("vendor/bundle".to_string()),
    );
    with.insert(
        "key".to_string(),
        Value::String(format!(
            "{}-{}-gems-${{{{hashFiles('**/Gemfile.lock')}}}}",
            runs_on, version
        )),
    );
    with.insert(
        "restore-keys".to_string(),
        Value::String(format!("{}-{}-gems-", runs_on, version)),
    );
    Step {
        uses: Some("actions/cache@v2".to_string()),
        with,
        ..Default::default()
    }
}
