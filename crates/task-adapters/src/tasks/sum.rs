//! SumTask: aritmética determinista con outputs declarados.
//!
//! Suma `a + b`, deja una traza en el workdir y expone `total` y `label`
//! como outputs crudos. Sirve de kind de referencia: mismo par de inputs,
//! mismo fingerprint, mismo resultado, en cualquier proceso.

use std::fs;

use serde_json::{json, Value};

use task_core::errors::TaskError;
use task_core::model::{ExecutionContext, FieldSpec, FieldType, RecordSpec};
use task_core::task::TaskKind;

#[derive(Debug, Default)]
pub struct SumTask {
    total: Option<i64>,
}

impl SumTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spec de inputs: `a` y `b` enteros requeridos.
    pub fn input_spec() -> Result<RecordSpec, TaskError> {
        RecordSpec::new(vec![FieldSpec::required("a", FieldType::Integer),
                             FieldSpec::required("b", FieldType::Integer)])
    }

    /// Spec de outputs: `total` entero, `label` texto.
    pub fn output_spec() -> Result<RecordSpec, TaskError> {
        RecordSpec::new(vec![FieldSpec::required("total", FieldType::Integer),
                             FieldSpec::required("label", FieldType::Text)])
    }
}

impl TaskKind for SumTask {
    fn type_name(&self) -> &str {
        "SumTask"
    }

    fn execute(&mut self, ctx: &ExecutionContext) -> Result<(), TaskError> {
        let operand = |name: &str| {
            ctx.inputs
               .get(name)
               .and_then(Value::as_i64)
               .ok_or_else(|| TaskError::Execution(format!("input requerido sin valor entero: {name}")))
        };
        let total = operand("a")? + operand("b")?;
        // Traza en el workdir aislado: evidencia de dónde corrió el task.
        fs::write(ctx.workdir.join("sum.txt"), total.to_string())
            .map_err(|e| TaskError::Execution(format!("traza en workdir: {e}")))?;
        self.total = Some(total);
        Ok(())
    }

    fn list_outputs(&self) -> Vec<Value> {
        match self.total {
            Some(total) => vec![json!(total), json!(format!("sum={total}"))],
            None => Vec::new(),
        }
    }

    fn task_version(&self) -> Option<&str> {
        Some("1")
    }
}
