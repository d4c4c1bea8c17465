/// Validación A: idempotencia del envelope (misma identidad ejecuta una vez).
fn run_idempotence_validation() {
    use serde_json::json;
    use task_adapters::ProbeTask;
    use task_core::model::{FieldSpec, FieldType, RecordSpec};
    use task_core::{Task, TaskRunner};

    let cache = std::env::temp_dir().join("taskflow-validation-idem");
    let _ = std::fs::remove_dir_all(&cache);

    let probe = ProbeTask::new().with_outputs(vec![json!(7), json!("ok")]);
    let runs = probe.runs_handle();
    let output_spec = RecordSpec::new(vec![FieldSpec::required("count", FieldType::Integer),
                                           FieldSpec::required("label", FieldType::Text)])
        .expect("spec de outputs");
    let mut task = Task::new(Box::new(probe), ProbeTask::input_spec().expect("spec de inputs"), output_spec)
        .expect("task")
        .cache_dir(cache.clone());
    task.replace_inputs_from(json!({"x": 10})).expect("inputs");

    let mut runner = TaskRunner::new();
    let first = runner.run(&mut task, &[]).expect("primera corrida");
    let second = runner.run(&mut task, &[]).expect("segunda corrida");

    println!("[A] fingerprint: {}", task.fingerprint().expect("fingerprint"));
    println!("[A] ejecuciones reales: {} (esperado 1)", runs.borrow());
    println!("[A] resultados iguales: {}", first == second);
}

/// Validación B: cadena completa de provenance + monitoreo sobre SumTask.
fn run_provenance_validation() {
    use serde_json::json;
    use task_adapters::{ScriptedSamplerFactory, SumTask};
    use task_core::{AuditFlag, ContextSource, MemoryMessenger, Task, TaskRunner};

    let cache = std::env::temp_dir().join("taskflow-validation-prov");
    let _ = std::fs::remove_dir_all(&cache);

    let sink = MemoryMessenger::new();
    let mut task = Task::new(Box::new(SumTask::new()),
                             SumTask::input_spec().expect("spec de inputs"),
                             SumTask::output_spec().expect("spec de outputs"))
        .expect("task")
        .cache_dir(cache.clone())
        .audit_flags(AuditFlag::PROV | AuditFlag::RESOURCE)
        .add_messenger(Box::new(sink.clone()));
    task.replace_inputs_from(json!({"a": 20, "b": 22})).expect("inputs");

    let rows = vec![[0.0, 15.0, 512.0, 1024.0], [0.1, 60.0, 1024.0, 2048.0]];
    let mut runner = TaskRunner::new()
        .context_source(ContextSource::Bundled)
        .sampler_factory(Box::new(ScriptedSamplerFactory::new(rows)));

    let result = runner.run(&mut task, &[]).expect("corrida monitoreada");
    let output = result.output.as_ref().expect("outputs");
    let stats = result.runtime.as_ref().expect("runtime stats");

    println!("[B] total: {}", output["total"]);
    println!("[B] picos: cpu={:?} rss_gb={:?} vms_gb={:?}",
             stats.cpu_peak_percent, stats.rss_peak_gb, stats.vms_peak_gb);
    println!("[B] eventos emitidos: {} (esperado 6)", sink.len());
    for event in sink.messages() {
        let kind = event.get("@type").cloned().unwrap_or(json!("(cierre)"));
        println!("[B]   evento {kind}");
    }
}

/// Validación C: un fallo deja artefacto de diagnóstico y no envenena la cache.
fn run_failure_validation() {
    use serde_json::json;
    use task_adapters::ProbeTask;
    use task_core::model::{FieldSpec, FieldType, RecordSpec};
    use task_core::{Task, TaskRunner};

    let cache = std::env::temp_dir().join("taskflow-validation-fail");
    let _ = std::fs::remove_dir_all(&cache);

    let probe = ProbeTask::new().failing("fallo simulado").resumable(true);
    let runs = probe.runs_handle();
    let output_spec = RecordSpec::new(vec![FieldSpec::required("count", FieldType::Integer)])
        .expect("spec de outputs");
    let mut task = Task::new(Box::new(probe), ProbeTask::input_spec().expect("spec de inputs"), output_spec)
        .expect("task")
        .cache_dir(cache.clone());
    task.replace_inputs_from(json!({"x": 1})).expect("inputs");

    let mut runner = TaskRunner::new();
    let first = runner.run(&mut task, &[]);
    let second = runner.run(&mut task, &[]);

    let fp = task.fingerprint().expect("fingerprint");
    let artifact = cache.join(&fp).join(task_core::constants::RESULT_FILE);
    println!("[C] primera corrida falló: {}", first.is_err());
    println!("[C] artefacto de diagnóstico presente: {}", artifact.exists());
    println!("[C] la segunda corrida volvió a ejecutar: {} (ejecuciones: {})",
             second.is_err() && *runs.borrow() == 2,
             runs.borrow());
}

fn main() {
    run_idempotence_validation();
    run_provenance_validation();
    run_failure_validation();
}
