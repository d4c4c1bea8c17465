//! Errores del core (taxonomía cerrada).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Taxonomía de fallos del envelope. `Execution` es opaco: transporta el
/// fallo del task sin interpretarlo. `Cleanup` agrupa fallos ocurridos
/// durante la secuencia de limpieza sin enmascarar el error primario.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum TaskError {
    #[error("configuration: {0}")] Configuration(String),
    #[error("conflict: {0}")] Conflict(String),
    #[error("serialization: {0}")] Serialization(String),
    #[error("storage: {0}")] Storage(String),
    #[error("execution: {0}")] Execution(String),
    #[error("cleanup incompleto tras error primario: {primary}")] Cleanup {
        primary: Box<TaskError>,
        details: Vec<String>,
    },
}

impl TaskError {
    /// Error primario de una cadena `Cleanup`; identidad para el resto.
    pub fn primary(&self) -> &TaskError {
        match self {
            TaskError::Cleanup { primary, .. } => primary.primary(),
            other => other,
        }
    }
}
