use std::path::PathBuf;

use serde_json::json;
use task_adapters::{ScriptedSamplerFactory, SumTask};
use task_core::{AuditFlag, FileMessenger, Task, TaskRunner};

fn main() {
    // Cargar .env si existe para obtener TASKFLOW_CACHE_DIR
    let _ = dotenvy::dotenv();
    // CLI mínima: `task-cli demo --a <N> --b <N> [--cache <DIR>] [--resource] [--prov] [--messages <DIR>]`
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "demo" {
        let mut a: Option<i64> = None;
        let mut b: Option<i64> = None;
        let mut cache: Option<PathBuf> = None;
        let mut messages: Option<PathBuf> = None;
        let mut flags = AuditFlag::NONE;
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--a" => {
                    i += 1;
                    if i < args.len() { a = args[i].parse::<i64>().ok(); }
                }
                "--b" => {
                    i += 1;
                    if i < args.len() { b = args[i].parse::<i64>().ok(); }
                }
                "--cache" => {
                    i += 1;
                    if i < args.len() { cache = Some(PathBuf::from(&args[i])); }
                }
                "--messages" => {
                    i += 1;
                    if i < args.len() { messages = Some(PathBuf::from(&args[i])); }
                }
                "--resource" => { flags = flags | AuditFlag::RESOURCE; }
                "--prov" => { flags = flags | AuditFlag::PROV; }
                _ => {}
            }
            i += 1;
        }

        let (Some(a), Some(b)) = (a, b) else {
            eprintln!("[task demo] se requieren --a <N> y --b <N>");
            std::process::exit(2);
        };
        let cache = cache.or_else(|| std::env::var("TASKFLOW_CACHE_DIR").ok().map(PathBuf::from));

        let mut task = match Task::new(Box::new(SumTask::new()),
                                       SumTask::input_spec().unwrap_or_else(|e| { eprintln!("[task demo] spec: {e}"); std::process::exit(5) }),
                                       SumTask::output_spec().unwrap_or_else(|e| { eprintln!("[task demo] spec: {e}"); std::process::exit(5) })) {
            Ok(t) => t.audit_flags(flags),
            Err(e) => { eprintln!("[task demo] construcción: {e}"); std::process::exit(5); }
        };
        if let Some(dir) = cache { task.set_cache_dir(dir); }
        if let Some(dir) = messages {
            task = task.add_messenger(Box::new(FileMessenger::new(dir)));
        }
        if let Err(e) = task.replace_inputs_from(json!({"a": a, "b": b})) {
            eprintln!("[task demo] inputs: {e}");
            std::process::exit(4);
        }

        let mut runner = TaskRunner::new();
        if flags.contains(AuditFlag::RESOURCE) {
            // Sin colector real, el demo usa el sampler guionado del crate de
            // adapters con una corrida corta simulada.
            runner = runner.sampler_factory(Box::new(ScriptedSamplerFactory::new(vec![[0.0, 12.0, 512.0, 1024.0],
                                                                                      [0.1, 31.0, 768.0, 1536.0]])));
        }

        let fingerprint = match task.fingerprint() {
            Ok(fp) => fp,
            Err(e) => { eprintln!("[task demo] fingerprint: {e}"); std::process::exit(5); }
        };
        let cached = match runner.result(&task, &[]) {
            Ok(r) => r.is_some(),
            Err(e) => { eprintln!("[task demo] sonda de cache: {e}"); std::process::exit(5); }
        };

        match runner.run(&mut task, &[]) {
            Ok(result) => {
                println!("fingerprint: {fingerprint}");
                println!("cache: {}", if cached { "hit" } else { "miss" });
                if let Some(output) = &result.output {
                    println!("total: {}", output["total"]);
                }
                if let Some(stats) = &result.runtime {
                    println!("picos: cpu={:?} rss_gb={:?} vms_gb={:?}",
                             stats.cpu_peak_percent, stats.rss_peak_gb, stats.vms_peak_gb);
                }
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("[task demo] error: {e}");
                std::process::exit(5);
            }
        }
    }

    eprintln!("uso: task-cli demo --a <N> --b <N> [--cache <DIR>] [--resource] [--prov] [--messages <DIR>]");
    std::process::exit(2);
}
