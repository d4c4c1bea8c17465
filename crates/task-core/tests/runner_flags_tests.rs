//! Gating por flags: provenance y monitoreo sólo con su bit presente.

use serde_json::json;

use task_adapters::{ProbeTask, ScriptedSamplerFactory};
use task_core::model::{FieldSpec, FieldType, RecordSpec};
use task_core::{AuditFlag, ContextSource, MemoryMessenger, Task, TaskError, TaskRunner};

fn output_spec() -> RecordSpec {
    RecordSpec::new(vec![FieldSpec::required("count", FieldType::Integer)]).unwrap()
}

fn base_task(probe: ProbeTask, cache: &std::path::Path, flags: AuditFlag, sink: &MemoryMessenger) -> Task {
    let mut task = Task::new(Box::new(probe), ProbeTask::input_spec().unwrap(), output_spec())
        .unwrap()
        .cache_dir(cache.to_path_buf())
        .audit_flags(flags)
        .add_messenger(Box::new(sink.clone()));
    task.replace_inputs_from(json!({"x": 3})).unwrap();
    task
}

#[test]
fn without_prov_bit_zero_events_are_observed() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::NONE,
                             &sink);
    TaskRunner::new().run(&mut task, &[]).unwrap();
    assert!(sink.is_empty());
}

#[test]
fn without_resource_bit_runtime_stays_null() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::PROV,
                             &sink);
    let result = TaskRunner::new()
        .context_source(ContextSource::Bundled)
        .run(&mut task, &[])
        .unwrap();
    assert!(result.runtime.is_none());
}

#[test]
fn resource_bit_attaches_peak_stats() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::RESOURCE,
                             &sink);
    let rows = vec![[0.0, 10.0, 512.0, 1024.0], [0.1, 55.5, 2048.0, 4096.0]];
    let result = TaskRunner::new()
        .sampler_factory(Box::new(ScriptedSamplerFactory::new(rows)))
        .run(&mut task, &[])
        .unwrap();
    let stats = result.runtime.unwrap();
    assert_eq!(stats.cpu_peak_percent, Some(55.5));
    assert_eq!(stats.rss_peak_gb, Some(2.0));
    assert_eq!(stats.vms_peak_gb, Some(4.0));
    // Sin PROV, el monitoreo no produce eventos.
    assert!(sink.is_empty());
}

#[test]
fn resource_with_empty_log_yields_null_stats_not_error() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::RESOURCE,
                             &sink);
    let result = TaskRunner::new()
        .sampler_factory(Box::new(ScriptedSamplerFactory::empty()))
        .run(&mut task, &[])
        .unwrap();
    let stats = result.runtime.unwrap();
    assert!(stats.is_empty());
}

#[test]
fn resource_without_factory_aborts_before_execution() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let probe = ProbeTask::new();
    let runs = probe.runs_handle();
    let mut task = base_task(probe, cache.path(), AuditFlag::RESOURCE, &sink);
    let err = TaskRunner::new().run(&mut task, &[]).unwrap_err();
    assert!(matches!(err, TaskError::Configuration(_)));
    assert_eq!(*runs.borrow(), 0);
}

#[test]
fn prov_and_resource_emit_the_full_event_chain() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::PROV | AuditFlag::RESOURCE,
                             &sink);
    let rows = vec![[0.0, 10.0, 1024.0, 1024.0]];
    TaskRunner::new()
        .context_source(ContextSource::Bundled)
        .sampler_factory(Box::new(ScriptedSamplerFactory::new(rows)))
        .run(&mut task, &[])
        .unwrap();

    let events = sink.messages();
    assert_eq!(events.len(), 6, "task-start, monitor-start, monitor-end, entity, generation, task-end");
    for e in &events {
        assert!(e.get("@context").is_some(), "todo evento lleva contexto: {e}");
    }

    let task_id = events[0]["@id"].as_str().unwrap().to_string();
    assert_eq!(events[0]["@type"], json!("task"));
    assert!(events[0].get("startedAtTime").is_some());

    let monitor_id = events[1]["@id"].as_str().unwrap().to_string();
    assert_eq!(events[1]["@type"], json!("monitor"));

    // monitor-end referencia la misma actividad de monitoreo
    assert_eq!(events[2]["@id"], json!(monitor_id));
    assert!(events[2].get("endedAtTime").is_some());

    // la entidad runtime liga stats -> actividad del task
    assert_eq!(events[3]["@type"], json!("runtime"));
    assert_eq!(events[3]["prov:wasGeneratedBy"], json!(task_id));
    assert_eq!(events[3]["rss_peak_gb"], json!(1.0));
    let entity_id = events[3]["@id"].as_str().unwrap().to_string();

    // generation liga entidad -> actividad de monitoreo
    assert_eq!(events[4]["@type"], json!("prov:Generation"));
    assert_eq!(events[4]["entity_generated"], json!(entity_id));
    assert_eq!(events[4]["hadActivity"], json!(monitor_id));

    // cierre del task, después de persistir
    assert_eq!(events[5]["@id"], json!(task_id));
    assert!(events[5].get("endedAtTime").is_some());
}

#[test]
fn cache_hit_emits_no_events_at_all() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::PROV,
                             &sink);
    let mut runner = TaskRunner::new().context_source(ContextSource::Bundled);
    runner.run(&mut task, &[]).unwrap();
    let after_first = sink.len();
    runner.run(&mut task, &[]).unwrap();
    assert_eq!(sink.len(), after_first, "un hit no vuelve a auditar");
}

#[test]
fn cleanup_failure_travels_with_the_primary_error() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().failing("boom"),
                             cache.path(),
                             AuditFlag::RESOURCE,
                             &sink);
    let err = TaskRunner::new()
        .sampler_factory(Box::new(ScriptedSamplerFactory::failing_stop()))
        .run(&mut task, &[])
        .unwrap_err();
    match err {
        TaskError::Cleanup { primary, details } => {
            assert!(matches!(*primary, TaskError::Execution(_)));
            assert!(!details.is_empty());
        }
        other => panic!("se esperaba Cleanup agregando el fallo del sampler, llegó {other:?}"),
    }
}

#[test]
fn sampler_stop_failure_on_success_path_is_an_error() {
    let cache = tempfile::tempdir().unwrap();
    let sink = MemoryMessenger::new();
    let mut task = base_task(ProbeTask::new().with_outputs(vec![json!(1)]),
                             cache.path(),
                             AuditFlag::RESOURCE,
                             &sink);
    let err = TaskRunner::new()
        .sampler_factory(Box::new(ScriptedSamplerFactory::failing_stop()))
        .run(&mut task, &[])
        .unwrap_err();
    assert!(matches!(err, TaskError::Storage(_)));
}
