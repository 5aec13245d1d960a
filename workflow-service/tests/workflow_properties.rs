use pretty_assertions::assert_eq;
use serde_yaml::Value;

use workflow_service::{
    build_workflow, default_descriptor, normalize_key, DescriptorLoader, OutputFormat,
    ServiceError, WorkflowRenderer,
};

const SETUP_KEY: &str = "Bundle_Install_-truffleruby-head_-_ubuntu-latest-";

fn rendered_catalog() -> Value {
    let workflow = build_workflow(&default_descriptor()).unwrap();
    let yaml = WorkflowRenderer::render(&workflow, OutputFormat::Yaml).unwrap();
    serde_yaml::from_str(&yaml).unwrap()
}

#[test]
fn test_document_header() {
    let doc = rendered_catalog();
    assert_eq!(doc["name"], Value::from("Test Rails"));
    assert_eq!(doc["on"], Value::from("push"));
    assert!(doc["jobs"].is_mapping());
}

#[test]
fn test_one_job_per_suite_and_axis() {
    let descriptor = default_descriptor();
    let workflow = build_workflow(&descriptor).unwrap();

    let suites = descriptor.active_suites().count();
    assert_eq!(workflow.jobs.len(), descriptor.axes.len() * (suites + 1));

    for suite in descriptor.active_suites() {
        let key = normalize_key(&format!("{} (truffleruby-head / ubuntu-latest)", suite.name));
        let job = workflow.jobs.get(&key).unwrap();
        assert_eq!(job.needs.as_deref(), Some(SETUP_KEY));
    }
}

#[test]
fn test_rendered_keys_are_normalized() {
    let doc = rendered_catalog();
    for key in doc["jobs"].as_mapping().unwrap().keys() {
        let key = key.as_str().unwrap();
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }
}

#[test]
fn test_activesupport_services_verbatim() {
    let descriptor = default_descriptor();
    let doc = rendered_catalog();
    let job = &doc["jobs"]["activesupport_-truffleruby-head_-_ubuntu-latest-"];

    let services = job["services"].as_mapping().unwrap();
    assert_eq!(services.len(), 2);
    assert_eq!(job["services"]["redis"], descriptor.services["redis"].config);
    assert_eq!(
        job["services"]["memcached"],
        descriptor.services["memcached"].config
    );
}

#[test]
fn test_axis_and_service_env_merge() {
    let doc = rendered_catalog();
    let job = &doc["jobs"]["activerecord_mysql2_-truffleruby-head_-_ubuntu-latest-"];

    let expected: Value = serde_yaml::from_str(
        r#"
MT_CPU: "1"
MYSQL_HOST: 127.0.0.1
PARALLEL_WORKERS: "1"
"#,
    )
    .unwrap();
    assert_eq!(job["env"], expected);
}

#[test]
fn test_setup_job_has_no_needs_services_or_env() {
    let doc = rendered_catalog();
    let job = doc["jobs"][SETUP_KEY].as_mapping().unwrap();

    let keys: Vec<_> = job.keys().map(|k| k.as_str().unwrap()).collect();
    assert_eq!(keys, vec!["name", "runs-on", "steps"]);
}

#[test]
fn test_final_step_runs_suite_command() {
    let doc = rendered_catalog();
    let steps = doc["jobs"]["actionpack_isolated_-truffleruby-head_-_ubuntu-latest-"]["steps"]
        .as_sequence()
        .unwrap();

    let last = steps.last().unwrap();
    assert_eq!(last["run"], Value::from("bundle exec rake test:isolated"));
    assert_eq!(last["working-directory"], Value::from("actionpack"));
    assert_eq!(steps[0]["uses"], Value::from("actions/checkout@master"));
    assert_eq!(steps[1]["with"]["ruby-version"], Value::from("truffleruby-head"));
    assert_eq!(steps[1]["with"]["bundler-cache"], Value::Bool(true));
    assert_eq!(steps[2]["run"], Value::from("bundle install"));
}

#[test]
fn test_rendering_is_byte_identical() {
    let first = WorkflowRenderer::render(
        &build_workflow(&default_descriptor()).unwrap(),
        OutputFormat::Yaml,
    )
    .unwrap();
    let second = WorkflowRenderer::render(
        &build_workflow(&default_descriptor()).unwrap(),
        OutputFormat::Yaml,
    )
    .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_removing_a_suite_removes_only_its_jobs() {
    let mut descriptor = default_descriptor();
    let before = build_workflow(&descriptor).unwrap();

    descriptor.suites.retain(|s| s.name != "actiontext");
    let after = build_workflow(&descriptor).unwrap();

    let missing: Vec<_> = before
        .jobs
        .keys()
        .filter(|k| !after.jobs.contains_key(k))
        .collect();
    assert_eq!(missing, vec!["actiontext_-truffleruby-head_-_ubuntu-latest-"]);
    for (key, job) in after.jobs.iter() {
        assert_eq!(before.jobs.get(key), Some(job));
    }
}

#[test]
fn test_descriptor_file_with_unknown_service_fails() {
    let yaml = r#"
axes:
  - id: "3.3"
suites:
  - name: actioncable
    dir: actioncable
    command: rake test
    services: [redis]
"#;
    let descriptor = DescriptorLoader::parse(yaml).unwrap();
    let err = build_workflow(&descriptor).unwrap_err();
    assert!(matches!(err, ServiceError::UnknownService { .. }));
}
