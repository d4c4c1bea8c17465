//! Smoke end-to-end: SumTask a través del envelope completo.

use serde_json::json;

use task_adapters::SumTask;
use task_core::{ResultStatus, Task, TaskRunner};

#[test]
fn sum_task_runs_once_and_then_hits_cache() {
    let cache = tempfile::tempdir().unwrap();
    let mut task = Task::new(Box::new(SumTask::new()),
                             SumTask::input_spec().unwrap(),
                             SumTask::output_spec().unwrap())
        .unwrap()
        .cache_dir(cache.path().to_path_buf());
    task.replace_inputs_from(json!({"a": 19, "b": 23})).unwrap();

    let mut runner = TaskRunner::new();
    let first = runner.run(&mut task, &[]).unwrap();
    assert_eq!(first.status, ResultStatus::Ok);
    let output = first.output.clone().unwrap();
    assert_eq!(output["total"], json!(42));
    assert_eq!(output["label"], json!("sum=42"));

    // La traza quedó dentro del workdir del fingerprint.
    let fp = task.fingerprint().unwrap();
    let trace = cache.path().join(&fp).join("sum.txt");
    assert_eq!(std::fs::read_to_string(trace).unwrap(), "42");

    // Segunda corrida: mismo resultado vía cache.
    let second = runner.run(&mut task, &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn different_operands_produce_different_fingerprints_and_results() {
    let cache = tempfile::tempdir().unwrap();
    let mut a = Task::new(Box::new(SumTask::new()),
                          SumTask::input_spec().unwrap(),
                          SumTask::output_spec().unwrap())
        .unwrap()
        .cache_dir(cache.path().to_path_buf());
    a.replace_inputs_from(json!({"a": 1, "b": 2})).unwrap();

    let mut b = Task::new(Box::new(SumTask::new()),
                          SumTask::input_spec().unwrap(),
                          SumTask::output_spec().unwrap())
        .unwrap()
        .cache_dir(cache.path().to_path_buf());
    b.replace_inputs_from(json!({"a": 2, "b": 1})).unwrap();

    assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

    let mut runner = TaskRunner::new();
    let ra = runner.run(&mut a, &[]).unwrap();
    let rb = runner.run(&mut b, &[]).unwrap();
    assert_eq!(ra.output.unwrap()["total"], json!(3));
    assert_eq!(rb.output.unwrap()["total"], json!(3));
}
