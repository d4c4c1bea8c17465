//! Sets de inputs con nombre: guardado, override explícito y aplicación.

use serde_json::{json, Map, Value};

use task_adapters::ProbeTask;
use task_core::model::{FieldSpec, FieldType, RecordSpec};
use task_core::{Task, TaskError};

fn probe_task() -> Task {
    let output_spec = RecordSpec::new(vec![FieldSpec::required("out", FieldType::Json)]).unwrap();
    Task::new(Box::new(ProbeTask::new()), ProbeTask::input_spec().unwrap(), output_spec).unwrap()
}

fn values(x: i64) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert("x".into(), json!(x));
    m
}

#[test]
fn apply_set_replaces_the_input_record() {
    let mut task = probe_task();
    task.save_set("chico", values(1), false).unwrap();
    task.save_set("grande", values(100), false).unwrap();

    task.apply_set("grande").unwrap();
    assert_eq!(task.inputs().get("x"), Some(&json!(100)));

    task.apply_set("chico").unwrap();
    assert_eq!(task.inputs().get("x"), Some(&json!(1)));
}

#[test]
fn unknown_set_is_a_configuration_error() {
    let mut task = probe_task();
    let err = task.apply_set("no-existe").unwrap_err();
    assert!(matches!(err, TaskError::Configuration(_)));
}

#[test]
fn overwriting_a_saved_set_requires_force() {
    let mut task = probe_task();
    task.save_set("base", values(1), false).unwrap();

    let err = task.save_set("base", values(2), false).unwrap_err();
    assert!(matches!(err, TaskError::Conflict(_)));

    task.save_set("base", values(2), true).unwrap();
    task.apply_set("base").unwrap();
    assert_eq!(task.inputs().get("x"), Some(&json!(2)));
}

#[test]
fn set_with_unknown_field_fails_on_apply() {
    let mut task = probe_task();
    let mut bad = Map::new();
    bad.insert("zzz".into(), json!(1));
    task.save_set("malo", bad, false).unwrap();
    assert!(matches!(task.apply_set("malo"), Err(TaskError::Configuration(_))));
}
