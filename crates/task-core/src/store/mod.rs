//! Persistencia de resultados direccionada por fingerprint.

pub mod fs;

pub use fs::FsResultStore;

use std::path::{Path, PathBuf};

use crate::errors::TaskError;
use crate::model::TaskResult;

/// Store de resultados. `load` recorre las ubicaciones en orden y devuelve el
/// primer resultado completo; ausencia es `None`, no un error. `save` escribe
/// el artefacto bajo `<dir>` de forma que un lector concurrente nunca observe
/// un artefacto parcial.
pub trait ResultStore {
    fn load(&self, fingerprint: &str, locations: &[PathBuf]) -> Result<Option<TaskResult>, TaskError>;
    fn save(&self, dir: &Path, result: &TaskResult) -> Result<(), TaskError>;
}
