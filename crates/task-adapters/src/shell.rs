//! Familia shell: kinds declarados como placeholders.
//!
//! La ejecución de comandos externos queda fuera del core; estos tipos
//! existen para fijar la superficie (un comando, un script) sin
//! implementación todavía.
// TODO: implementar ShellTask sobre std::process::Command con captura de
// stdout/stderr como outputs declarados.

use serde_json::Value;

use task_core::errors::TaskError;
use task_core::model::ExecutionContext;
use task_core::task::TaskKind;

pub struct ShellTask {
    pub command: Vec<String>,
}

impl TaskKind for ShellTask {
    fn type_name(&self) -> &str {
        "ShellTask"
    }

    fn execute(&mut self, _ctx: &ExecutionContext) -> Result<(), TaskError> {
        unimplemented!("ejecución de comandos shell")
    }

    fn list_outputs(&self) -> Vec<Value> {
        unimplemented!("outputs de comandos shell")
    }
}

pub struct BashTask {
    pub script: String,
}

impl TaskKind for BashTask {
    fn type_name(&self) -> &str {
        "BashTask"
    }

    fn execute(&mut self, _ctx: &ExecutionContext) -> Result<(), TaskError> {
        unimplemented!("ejecución de scripts bash")
    }

    fn list_outputs(&self) -> Vec<Value> {
        unimplemented!("outputs de scripts bash")
    }
}

pub struct MatlabTask {
    pub script: String,
}

impl TaskKind for MatlabTask {
    fn type_name(&self) -> &str {
        "MatlabTask"
    }

    fn execute(&mut self, _ctx: &ExecutionContext) -> Result<(), TaskError> {
        unimplemented!("ejecución de scripts matlab")
    }

    fn list_outputs(&self) -> Vec<Value> {
        unimplemented!("outputs de scripts matlab")
    }
}
