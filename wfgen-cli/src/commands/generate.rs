use crate::output;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::Result;

use workflow_service::{
    build_workflow, default_descriptor, Descriptor, DescriptorLoader, OutputFormat,
    WorkflowRenderer,
};

/// Generate the workflow document
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Descriptor YAML file (default: built-in Rails catalog)
    #[arg(long, short = 'd', value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Write the workflow to a file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: yaml, json
    #[arg(long, short = 'f', default_value = "yaml")]
    pub format: String,

    /// Generate jobs only for this suite (can be repeated)
    #[arg(long, value_name = "SUITE")]
    pub only: Vec<String>,

    /// Leave this suite out (can be repeated)
    #[arg(long, value_name = "SUITE")]
    pub skip: Vec<String>,
}

/// Load the descriptor file, or the built-in catalog when none is given.
pub fn load_descriptor(path: Option<&Path>) -> Result<Descriptor> {
    match path {
        Some(path) => {
            if !path.exists() {
                color_eyre::eyre::bail!("Descriptor file not found: {}", path.display());
            }
            output::status("Loading", &format!("{}", path.display()));
            Ok(DescriptorLoader::from_file(path)?)
        }
        None => Ok(default_descriptor()),
    }
}

/// Apply `--only` / `--skip` and render the document into memory.
pub fn render(args: &GenerateArgs) -> Result<String> {
    let format: OutputFormat = if args.format.is_empty() {
        OutputFormat::default()
    } else {
        args.format
            .parse()
            .map_err(|e: String| color_eyre::eyre::eyre!("{}", e))?
    };

    let mut descriptor = load_descriptor(args.descriptor.as_deref())?;
    if !args.only.is_empty() {
        descriptor.retain_suites(&args.only)?;
    }
    if !args.skip.is_empty() {
        descriptor.skip_suites(&args.skip)?;
    }

    if descriptor.active_suites().next().is_none() {
        output::warning("No suites selected; only setup jobs will be generated");
    }

    let workflow = build_workflow(&descriptor)?;
    tracing::debug!(jobs = workflow.jobs.len(), %format, "rendering workflow");
    Ok(WorkflowRenderer::render(&workflow, format)?)
}

pub fn execute(args: GenerateArgs) -> Result<()> {
    let rendered = render(&args)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            output::check(&format!("Wrote {}", path.display()));
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTOR: &str = r#"
name: Smoke
axes:
  - id: "3.3"
services:
  redis:
    config:
      image: redis
suites:
  - name: actioncable
    dir: actioncable
    command: rake test
    services: [redis]
  - name: activemodel
    dir: activemodel
    command: rake test
"#;

    fn write_descriptor(dir: &Path) -> PathBuf {
        let path = dir.join("descriptor.yml");
        fs::write(&path, DESCRIPTOR).unwrap();
        path
    }

    #[test]
    fn test_render_builtin_catalog() {
        let rendered = render(&GenerateArgs::default()).unwrap();
        assert!(rendered.starts_with("name: Test Rails\n"));
        assert!(rendered.contains("Bundle_Install_-truffleruby-head_-_ubuntu-latest-:"));
    }

    #[test]
    fn test_render_only_and_skip() {
        let temp = tempfile::tempdir().unwrap();
        let args = GenerateArgs {
            descriptor: Some(write_descriptor(temp.path())),
            skip: vec!["activemodel".to_string()],
            ..Default::default()
        };

        let rendered = render(&args).unwrap();
        assert!(rendered.contains("actioncable_-3-3_-_ubuntu-latest-:"));
        assert!(!rendered.contains("activemodel_-3-3"));

        let args = GenerateArgs {
            descriptor: Some(write_descriptor(temp.path())),
            only: vec!["activemodel".to_string()],
            ..Default::default()
        };
        let rendered = render(&args).unwrap();
        assert!(!rendered.contains("actioncable_-3-3"));
        assert!(rendered.contains("activemodel_-3-3_-_ubuntu-latest-:"));
    }

    #[test]
    fn test_render_json() {
        let temp = tempfile::tempdir().unwrap();
        let args = GenerateArgs {
            descriptor: Some(write_descriptor(temp.path())),
            format: "json".to_string(),
            ..Default::default()
        };

        let rendered = render(&args).unwrap();
        assert!(rendered.trim_start().starts_with('{'));
        assert!(rendered.contains("\"name\": \"Smoke\""));
    }

    #[test]
    fn test_unknown_suite_filter_fails() {
        let args = GenerateArgs {
            only: vec!["nope".to_string()],
            ..Default::default()
        };
        assert!(render(&args).is_err());
    }

    #[test]
    fn test_missing_descriptor_fails() {
        let args = GenerateArgs {
            descriptor: Some(PathBuf::from("/nonexistent/descriptor.yml")),
            ..Default::default()
        };
        let err = render(&args).unwrap_err();
        assert!(err.to_string().contains("Descriptor file not found"));
    }

    #[test]
    fn test_execute_writes_output_file() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("test.yml");
        let args = GenerateArgs {
            descriptor: Some(write_descriptor(temp.path())),
            output: Some(out.clone()),
            ..Default::default()
        };

        execute(args).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("name: Smoke\n"));
    }

    #[test]
    fn test_failed_build_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let descriptor = temp.path().join("bad.yml");
        fs::write(
            &descriptor,
            "axes:\n  - id: \"3.3\"\nsuites:\n  - name: a\n    dir: a\n    command: rake\n    services: [missing]\n",
        )
        .unwrap();
        let out = temp.path().join("test.yml");

        let args = GenerateArgs {
            descriptor: Some(descriptor),
            output: Some(out.clone()),
            ..Default::default()
        };
        assert!(execute(args).is_err());
        assert!(!out.exists());
    }
}
