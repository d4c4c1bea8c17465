//! Instancia configurada de un task: kind + records declarados + flags +
//! messengers + cache root. La instancia es lo que el runner recibe; sólo
//! muta por reemplazo total de su record de inputs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::audit::{emit, AuditFlag, ContextSource, MessageBody, Messenger};
use crate::errors::TaskError;
use crate::hashing::hash_value;
use crate::model::{ExecutionContext, Record, RecordSpec, TaskFingerprintInput};

use super::TaskKind;

pub struct Task {
    kind: Box<dyn TaskKind>,
    inputs: Record,
    output_spec: RecordSpec,
    audit_flags: AuditFlag,
    cache_dir: Option<PathBuf>,
    messengers: Vec<Box<dyn Messenger>>,
    input_sets: HashMap<String, Map<String, Value>>,
}

impl Task {
    /// Un task sin campos de input declarados no tiene identidad cacheable:
    /// error de configuración en el punto de construcción.
    pub fn new(kind: Box<dyn TaskKind>, input_spec: RecordSpec, output_spec: RecordSpec) -> Result<Self, TaskError> {
        if input_spec.is_empty() {
            return Err(TaskError::Configuration(format!("spec de inputs vacío para {}", kind.type_name())));
        }
        Ok(Self { kind,
                  inputs: Record::new(input_spec),
                  output_spec,
                  audit_flags: AuditFlag::NONE,
                  cache_dir: None,
                  messengers: Vec::new(),
                  input_sets: HashMap::new() })
    }

    pub fn audit_flags(mut self, flags: AuditFlag) -> Self {
        self.audit_flags = flags;
        self
    }

    pub fn cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    pub fn add_messenger(mut self, messenger: Box<dyn Messenger>) -> Self {
        self.messengers.push(messenger);
        self
    }

    // ---- identidad ----

    /// Fingerprint determinista: `<TipoDeTask>_<hash>` sobre los valores
    /// actuales de los inputs en orden de declaración. Puro respecto a
    /// (tipo, inputs): mismo par produce el mismo string en cualquier
    /// proceso, en cualquier momento.
    pub fn fingerprint(&self) -> Result<String, TaskError> {
        let values: Vec<(&str, &Value)> = self.inputs
                                              .spec()
                                              .field_names()
                                              .filter_map(|n| self.inputs.get(n).map(|v| (n, v)))
                                              .collect();
        let input = TaskFingerprintInput { task_type: self.kind.type_name(),
                                           values };
        let as_value = serde_json::to_value(&input)
            .map_err(|e| TaskError::Serialization(format!("inputs no canonicalizables: {e}")))?;
        Ok(format!("{}_{}", self.kind.type_name(), hash_value(&as_value)))
    }

    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    // ---- inputs ----

    /// Reemplazo total del record de inputs aplicando `overrides` sobre los
    /// valores actuales. Nunca muta campos in place.
    pub fn replace_inputs(&mut self, overrides: &Map<String, Value>) -> Result<(), TaskError> {
        self.inputs = self.inputs.with_values(overrides)?;
        Ok(())
    }

    /// Igual que `replace_inputs` pero desde cualquier `Serialize`. Un valor
    /// irrepresentable en JSON (y por lo tanto no hasheable) se reporta como
    /// error de serialización: es el punto donde el fingerprinting fallaría.
    pub fn replace_inputs_from<T: Serialize>(&mut self, overrides: T) -> Result<(), TaskError> {
        let value = serde_json::to_value(overrides)
            .map_err(|e| TaskError::Serialization(format!("inputs no representables: {e}")))?;
        match value {
            Value::Object(map) => self.replace_inputs(&map),
            _ => Err(TaskError::Configuration("los overrides de inputs deben ser un objeto".into())),
        }
    }

    pub fn inputs(&self) -> &Record {
        &self.inputs
    }

    // ---- input sets con nombre ----

    /// Registra un set de inputs predefinido. Sobrescribir un nombre ya
    /// guardado exige `force`; sin él es un conflicto.
    pub fn save_set(&mut self, name: &str, values: Map<String, Value>, force: bool) -> Result<(), TaskError> {
        if self.input_sets.contains_key(name) && !force {
            return Err(TaskError::Conflict(format!("input set {name:?} ya guardado; use force para sobrescribir")));
        }
        self.input_sets.insert(name.to_string(), values);
        Ok(())
    }

    /// Reemplaza los inputs desde un set guardado. Nombre desconocido es un
    /// error de configuración.
    pub fn apply_set(&mut self, name: &str) -> Result<(), TaskError> {
        let values = self.input_sets
                         .get(name)
                         .cloned()
                         .ok_or_else(|| TaskError::Configuration(format!("input set desconocido: {name:?}")))?;
        self.replace_inputs(&values)
    }

    // ---- outputs ----

    /// Nombres declarados del record de salida, en orden.
    pub fn output_names(&self) -> Vec<&str> {
        self.output_spec.field_names().collect()
    }

    /// Output Collection: zipea los outputs crudos del kind sobre los
    /// nombres declarados. Campos no cubiertos por la secuencia quedan en su
    /// default nulo.
    pub fn collect_outputs(&self) -> IndexMap<String, Value> {
        let mut out: IndexMap<String, Value> = self.output_spec
                                                   .field_names()
                                                   .map(|n| (n.to_string(), Value::Null))
                                                   .collect();
        for (name, value) in self.output_names().into_iter().zip(self.kind.list_outputs()) {
            out[name] = value;
        }
        out
    }

    pub fn output_spec(&self) -> &RecordSpec {
        &self.output_spec
    }

    // ---- capacidades y auditoría ----

    pub fn execute(&mut self, ctx: &ExecutionContext) -> Result<(), TaskError> {
        self.kind.execute(ctx)
    }

    pub fn can_resume(&self) -> bool {
        self.kind.can_resume()
    }

    pub fn audit_check(&self, flag: AuditFlag) -> bool {
        self.audit_flags.contains(flag)
    }

    pub fn flags(&self) -> AuditFlag {
        self.audit_flags
    }

    /// Emite un mensaje hacia los messengers del task, gateado por sus
    /// propios flags.
    pub fn audit(&mut self, body: MessageBody, source: &ContextSource) -> Result<(), TaskError> {
        emit(&mut self.messengers, self.audit_flags, body, source)
    }

    // ---- cache root ----

    pub fn cache_root(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    pub fn set_cache_dir(&mut self, dir: PathBuf) {
        self.cache_dir = Some(dir);
    }

    /// Cache root del task, creando un directorio temporal persistente si no
    /// hay ninguno configurado (queda registrado en el task).
    pub fn ensure_cache_dir(&mut self) -> Result<&Path, TaskError> {
        if self.cache_dir.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("taskflow-")
                .tempdir()
                .map_err(|e| TaskError::Storage(format!("cache dir temporal: {e}")))?;
            self.cache_dir = Some(dir.into_path());
        }
        match &self.cache_dir {
            Some(dir) => Ok(dir.as_path()),
            None => unreachable!("cache_dir recién asignado"),
        }
    }
}
