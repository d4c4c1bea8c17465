//! ProbeTask: kind instrumentado para validar el envelope.
//!
//! Cuenta cuántas veces fue ejecutado (handle compartido, se consulta desde
//! afuera después de correr), devuelve outputs guionados y puede fallar a
//! pedido. Con esto se verifican idempotencia (el contador no avanza en un
//! hit), conflicto/reanudación y la propagación de fallos tras la limpieza.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use serde_json::Value;

use task_core::errors::TaskError;
use task_core::model::{ExecutionContext, FieldSpec, FieldType, RecordSpec};
use task_core::task::TaskKind;

pub struct ProbeTask {
    runs: Rc<RefCell<usize>>,
    outputs: Vec<Value>,
    fail_with: Option<String>,
    resumable: bool,
}

impl ProbeTask {
    pub fn new() -> Self {
        Self { runs: Rc::new(RefCell::new(0)),
               outputs: Vec::new(),
               fail_with: None,
               resumable: false }
    }

    /// Outputs crudos que `list_outputs` devolverá tras ejecutar.
    pub fn with_outputs(mut self, outputs: Vec<Value>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Hace que `execute` falle con un error de aplicación.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn resumable(mut self, resumable: bool) -> Self {
        self.resumable = resumable;
        self
    }

    /// Handle del contador de ejecuciones; clonar antes de cederle el kind
    /// al task.
    pub fn runs_handle(&self) -> Rc<RefCell<usize>> {
        self.runs.clone()
    }

    /// Spec mínimo de inputs: un entero requerido.
    pub fn input_spec() -> Result<RecordSpec, TaskError> {
        RecordSpec::new(vec![FieldSpec::required("x", FieldType::Integer)])
    }
}

impl Default for ProbeTask {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskKind for ProbeTask {
    fn type_name(&self) -> &str {
        "ProbeTask"
    }

    fn execute(&mut self, ctx: &ExecutionContext) -> Result<(), TaskError> {
        *self.runs.borrow_mut() += 1;
        fs::write(ctx.workdir.join("_probe.touch"), "ran")
            .map_err(|e| TaskError::Execution(format!("traza en workdir: {e}")))?;
        match &self.fail_with {
            Some(message) => Err(TaskError::Execution(message.clone())),
            None => Ok(()),
        }
    }

    fn list_outputs(&self) -> Vec<Value> {
        self.outputs.clone()
    }

    fn can_resume(&self) -> bool {
        self.resumable
    }
}
