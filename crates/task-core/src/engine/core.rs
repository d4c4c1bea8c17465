//! Core TaskRunner implementation
//!
//! Orquesta una ejecución idempotente: consulta el store, prepara el workdir
//! aislado, arranca monitor y auditoría según flags, delega en el task,
//! colecta outputs, persiste y recién entonces propaga el fallo si lo hubo.

use std::fs;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::audit::{gen_uid, now, AuditFlag, ContextSource, MessageBody};
use crate::errors::TaskError;
use crate::model::{ExecutionContext, ResultStatus, TaskResult};
use crate::monitor::{gather_runtime, ResourceSampler, SamplerFactory};
use crate::store::{FsResultStore, ResultStore};
use crate::task::Task;

/// Runner de ejecución de tasks deterministas.
///
/// Responsable de garantizar idempotencia (cache por fingerprint) y
/// crash-safety: en todo camino de salida queda un artefacto persistido y
/// ningún estado de proceso alterado.
pub struct TaskRunner<S>
    where S: ResultStore
{
    store: S,
    context: ContextSource,
    sampler_factory: Option<Box<dyn SamplerFactory>>,
}

impl TaskRunner<FsResultStore> {
    /// Runner con el store de filesystem por defecto.
    pub fn new() -> Self {
        Self::with_store(FsResultStore)
    }
}

impl Default for TaskRunner<FsResultStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TaskRunner<S>
    where S: ResultStore
{
    pub fn with_store(store: S) -> Self {
        Self { store,
               context: ContextSource::default(),
               sampler_factory: None }
    }

    pub fn context_source(mut self, source: ContextSource) -> Self {
        self.context = source;
        self
    }

    pub fn sampler_factory(mut self, factory: Box<dyn SamplerFactory>) -> Self {
        self.sampler_factory = Some(factory);
        self
    }

    /// Sonda de cache: resultado previo si existe, sin ejecutar nada.
    pub fn result(&self, task: &Task, cache_locations: &[PathBuf]) -> Result<Option<TaskResult>, TaskError> {
        let fingerprint = task.fingerprint()?;
        self.store.load(&fingerprint, &search_locations(task, cache_locations))
    }

    /// Ejecuta el envelope completo. Hit de cache retorna de inmediato sin
    /// efectos; miss ejecuta exactamente una vez y persiste. Un fallo del
    /// task se propaga recién después de completar la limpieza
    /// (monitor stop, eventos de cierre, persistencia del artefacto de
    /// diagnóstico); fallos de limpieza viajan junto al primario, nunca lo
    /// enmascaran.
    pub fn run(&mut self, task: &mut Task, cache_locations: &[PathBuf]) -> Result<TaskResult, TaskError> {
        let fingerprint = task.fingerprint()?;

        // INIT -> CACHE_HIT: terminal, cero efectos observables.
        if let Some(hit) = self.store.load(&fingerprint, &search_locations(task, cache_locations))? {
            log::debug!("cache hit para {fingerprint}");
            return Ok(hit);
        }

        let prov = task.audit_check(AuditFlag::PROV);
        let resource = task.audit_check(AuditFlag::RESOURCE);

        // El mensaje de inicio se arma antes de preparar el directorio pero
        // se envía después: el destino de los mensajes puede vivir dentro
        // del workdir.
        let task_activity = if prov { Some(gen_uid()) } else { None };
        let started_at = now();

        // CACHE_MISS -> PREPARING: workdir aislado <cache_root>/<fingerprint>.
        let cache_root = task.ensure_cache_dir()?.to_path_buf();
        let workdir = cache_root.join(&fingerprint);
        if !task.can_resume() && workdir.exists() {
            return Err(TaskError::Conflict(format!("workdir existente para {fingerprint} en task no reanudable")));
        }
        fs::create_dir_all(&workdir)
            .map_err(|e| TaskError::Storage(format!("workdir {}: {e}", workdir.display())))?;

        // AUDIT_START. Cualquier fallo antes de EXECUTING aborta la corrida
        // sin intentar la ejecución.
        if let Some(aid) = &task_activity {
            let mut body = MessageBody::new();
            body.insert("@id".into(), json!(aid));
            body.insert("@type".into(), json!("task"));
            body.insert("startedAtTime".into(), json!(started_at));
            task.audit(body, &self.context)?;
        }

        // MONITOR_START: el sampler corre junto a EXECUTING; única
        // interacción posterior: stop + lectura de su log.
        let mut sampler: Option<Box<dyn ResourceSampler>> = None;
        let mut monitor_activity: Option<String> = None;
        if resource {
            let factory = self.sampler_factory
                              .as_ref()
                              .ok_or_else(|| TaskError::Configuration("flag RESOURCE sin sampler factory configurada".into()))?;
            let mut s = factory.create(&workdir);
            s.start()?;
            if prov {
                let mid = gen_uid();
                let mut body = MessageBody::new();
                body.insert("@id".into(), json!(mid));
                body.insert("@type".into(), json!("monitor"));
                body.insert("startedAtTime".into(), json!(now()));
                task.audit(body, &self.context)?;
                monitor_activity = Some(mid);
            }
            sampler = Some(s);
        }

        // EXECUTING -> OUTPUT_COLLECTION. El workdir viaja explícito en el
        // contexto; no se muta el cwd del proceso y no hay nada que
        // restaurar en los caminos de salida.
        let ctx = ExecutionContext { workdir: workdir.clone(),
                                     inputs: task.inputs().clone() };
        let mut result = TaskResult::pending();
        let exec_err = match task.execute(&ctx) {
            Ok(()) => {
                result.output = Some(task.collect_outputs());
                result.status = ResultStatus::Ok;
                None
            }
            Err(e) => Some(e),
        };

        // Limpieza: corre completa en ambos caminos. `hard` aborta también
        // una corrida exitosa; la entrega de provenance es best-effort y
        // sólo se reporta.
        let mut hard: Vec<TaskError> = Vec::new();
        let mut notes: Vec<String> = Vec::new();

        // MONITOR_STOP + reducción del log a stats.
        if let Some(mut s) = sampler {
            match s.stop() {
                Ok(log_path) => match gather_runtime(&log_path) {
                    Ok(stats) => result.runtime = Some(stats),
                    Err(e) => hard.push(e),
                },
                Err(e) => hard.push(e),
            }
            if let Some(mid) = &monitor_activity {
                let mut body = MessageBody::new();
                body.insert("@id".into(), json!(mid));
                body.insert("endedAtTime".into(), json!(now()));
                if let Err(e) = task.audit(body, &self.context) {
                    log::warn!("entrega de evento monitor-end falló: {e}");
                    notes.push(format!("monitor-end: {e}"));
                }
                self.audit_runtime_entity(task, &result, task_activity.as_deref(), mid, &mut notes);
            }
        }

        // PERSISTING: también en fallo, para que quede artefacto de
        // diagnóstico (con status Failed, que el store no sirve como hit).
        if let Err(e) = self.store.save(&workdir, &result) {
            hard.push(e);
        }

        // AUDIT_END del task, después de persistir.
        if let Some(aid) = &task_activity {
            let mut body = MessageBody::new();
            body.insert("@id".into(), json!(aid));
            body.insert("endedAtTime".into(), json!(now()));
            if let Err(e) = task.audit(body, &self.context) {
                log::warn!("entrega de evento task-end falló: {e}");
                notes.push(format!("task-end: {e}"));
            }
        }

        // RESTORE_CONTEXT es estructural: nada global se tocó.
        finish(result, exec_err, hard, notes)
    }

    /// Eventos derivados que ligan los RuntimeStats a la actividad de
    /// monitoreo y ésta a la actividad del task.
    fn audit_runtime_entity(&self,
                            task: &mut Task,
                            result: &TaskResult,
                            task_activity: Option<&str>,
                            monitor_activity: &str,
                            notes: &mut Vec<String>) {
        let (Some(stats), Some(aid)) = (&result.runtime, task_activity) else {
            return;
        };
        let eid = gen_uid();
        let mut entity = MessageBody::new();
        if let Ok(Value::Object(fields)) = serde_json::to_value(stats) {
            for (k, v) in fields {
                entity.insert(k, v);
            }
        }
        entity.insert("@id".into(), json!(eid));
        entity.insert("@type".into(), json!("runtime"));
        entity.insert("prov:wasGeneratedBy".into(), json!(aid));
        if let Err(e) = task.audit(entity, &self.context) {
            log::warn!("entrega de entidad runtime falló: {e}");
            notes.push(format!("runtime-entity: {e}"));
        }

        let mut generation = MessageBody::new();
        generation.insert("@type".into(), json!("prov:Generation"));
        generation.insert("entity_generated".into(), json!(eid));
        generation.insert("hadActivity".into(), json!(monitor_activity));
        if let Err(e) = task.audit(generation, &self.context) {
            log::warn!("entrega de evento generation falló: {e}");
            notes.push(format!("generation: {e}"));
        }
    }
}

fn search_locations(task: &Task, cache_locations: &[PathBuf]) -> Vec<PathBuf> {
    let mut locations: Vec<PathBuf> = cache_locations.to_vec();
    if let Some(root) = task.cache_root() {
        locations.push(root.to_path_buf());
    }
    locations
}

/// Decide el valor de retorno: el error de ejecución manda; fallos duros de
/// limpieza lo acompañan (o encabezan, si la ejecución fue exitosa); las
/// notas best-effort sólo viajan como detalle.
fn finish(result: TaskResult,
          exec_err: Option<TaskError>,
          hard: Vec<TaskError>,
          notes: Vec<String>)
          -> Result<TaskResult, TaskError> {
    match exec_err {
        Some(primary) => {
            let details: Vec<String> = hard.iter().map(|e| e.to_string()).chain(notes).collect();
            if details.is_empty() {
                Err(primary)
            } else {
                Err(TaskError::Cleanup { primary: Box::new(primary),
                                         details })
            }
        }
        None => {
            let mut hard = hard.into_iter();
            match hard.next() {
                None => Ok(result),
                Some(first) => {
                    let details: Vec<String> = hard.map(|e| e.to_string()).chain(notes).collect();
                    if details.is_empty() {
                        Err(first)
                    } else {
                        Err(TaskError::Cleanup { primary: Box::new(first),
                                                 details })
                    }
                }
            }
        }
    }
}
