//! Resultado persistible de una ejecución.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RuntimeStats;

/// Estado explícito del artefacto persistido. Un intento fallido también se
/// persiste (artefacto de diagnóstico) pero el store no lo sirve como hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Ok,
    Failed,
}

/// Resultado de una ejecución: outputs estructurados más stats opcionales.
/// Nace con nulls al comenzar la ejecución, recibe outputs una vez, recibe
/// runtime una vez, y se congela al persistir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: ResultStatus,
    pub output: Option<IndexMap<String, Value>>,
    pub runtime: Option<RuntimeStats>,
}

impl TaskResult {
    /// Resultado en vuelo: si la ejecución muere antes de completar outputs,
    /// esto es exactamente lo que queda persistido.
    pub fn pending() -> Self {
        Self { status: ResultStatus::Failed,
               output: None,
               runtime: None }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResultStatus::Ok
    }
}
