//! Records declarados: listas estáticas de campos (nombre, tipo, default)
//! validadas al construir el task. Un `Record` es un snapshot inmutable: las
//! actualizaciones construyen un record nuevo completo, nunca mutan campos
//! in place.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::TaskError;

/// Tipo declarado de un campo. `File` transporta rutas como texto; `Json`
/// acepta cualquier valor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Integer,
    Float,
    Text,
    Boolean,
    File,
    Json,
}

impl FieldType {
    /// `Null` siempre se admite (campo sin valor todavía).
    fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (FieldType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldType::Float, Value::Number(_)) => true,
            (FieldType::Text, Value::String(_)) => true,
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::File, Value::String(_)) => true,
            (FieldType::Json, _) => true,
            _ => false,
        }
    }
}

/// Default de un campo: requerido (arranca en `Null`) o un valor concreto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldDefault {
    Required,
    Value(Value),
}

/// Declaración de un campo del record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    pub default: FieldDefault,
}

impl FieldSpec {
    pub fn required(name: &str, ty: FieldType) -> Self {
        Self { name: name.to_string(),
               ty,
               default: FieldDefault::Required }
    }

    pub fn with_default(name: &str, ty: FieldType, value: Value) -> Self {
        Self { name: name.to_string(),
               ty,
               default: FieldDefault::Value(value) }
    }
}

/// Lista ordenada de campos. El orden de declaración es el orden canónico:
/// fija el zip de Output Collection y la serialización del fingerprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSpec {
    fields: Vec<FieldSpec>,
}

impl RecordSpec {
    /// Nombres duplicados son un error de configuración.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, TaskError> {
        for (i, f) in fields.iter().enumerate() {
            if fields[..i].iter().any(|p| p.name == f.name) {
                return Err(TaskError::Configuration(format!("campo duplicado en spec: {}", f.name)));
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Record con valores, siempre completo respecto a su spec (campos sin valor
/// quedan en `Null`). Los valores preservan el orden de declaración.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    spec: RecordSpec,
    values: IndexMap<String, Value>,
}

impl Record {
    /// Record inicial: defaults declarados, `Null` para los requeridos.
    pub fn new(spec: RecordSpec) -> Self {
        let values = spec.fields()
                         .iter()
                         .map(|f| {
                             let v = match &f.default {
                                 FieldDefault::Required => Value::Null,
                                 FieldDefault::Value(v) => v.clone(),
                             };
                             (f.name.clone(), v)
                         })
                         .collect();
        Self { spec, values }
    }

    /// Reemplazo total: construye un record nuevo aplicando `overrides` sobre
    /// los valores actuales. Nombre desconocido o tipo incompatible es un
    /// error de configuración; el record original queda intacto.
    pub fn with_values(&self, overrides: &Map<String, Value>) -> Result<Record, TaskError> {
        let mut next = self.clone();
        for (name, value) in overrides {
            let field = next.spec
                            .field(name)
                            .ok_or_else(|| TaskError::Configuration(format!("campo desconocido: {name}")))?;
            if !field.ty.admits(value) {
                return Err(TaskError::Configuration(format!("valor incompatible con el tipo declarado de {name}")));
            }
            next.values[name.as_str()] = value.clone();
        }
        Ok(next)
    }

    pub fn spec(&self) -> &RecordSpec {
        &self.spec
    }

    pub fn values(&self) -> &IndexMap<String, Value> {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
