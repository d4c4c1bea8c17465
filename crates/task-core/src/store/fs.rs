//! Store de resultados sobre filesystem.
//!
//! Layout: `<location>/<fingerprint>/_result.json`, un artefacto por
//! ejecución completada o intentada. Invariantes:
//! - Un directorio de fingerprint sin artefacto es un miss (permite retomar
//!   corridas interrumpidas), no un error.
//! - La escritura va a un archivo temporal en el mismo directorio y se
//!   renombra encima del definitivo: un lector concurrente ve el artefacto
//!   anterior o el nuevo, nunca uno parcial.
//! - Escrituras sobre el mismo fingerprint son last-write-wins.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::constants::RESULT_FILE;
use crate::errors::TaskError;
use crate::model::TaskResult;

use super::ResultStore;

/// Implementación por defecto del store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsResultStore;

impl ResultStore for FsResultStore {
    fn load(&self, fingerprint: &str, locations: &[PathBuf]) -> Result<Option<TaskResult>, TaskError> {
        for location in locations {
            let artifact = location.join(fingerprint).join(RESULT_FILE);
            if !artifact.exists() {
                continue;
            }
            let raw = fs::read_to_string(&artifact)
                .map_err(|e| TaskError::Storage(format!("lectura de {}: {e}", artifact.display())))?;
            let result: TaskResult = serde_json::from_str(&raw)
                .map_err(|e| TaskError::Serialization(format!("artefacto {}: {e}", artifact.display())))?;
            // Artefactos de intentos fallidos quedan como diagnóstico pero no
            // se sirven como hit: un caller que reintenta debe re-ejecutar.
            if !result.is_ok() {
                log::debug!("artefacto fallido ignorado en {}", artifact.display());
                continue;
            }
            return Ok(Some(result));
        }
        Ok(None)
    }

    fn save(&self, dir: &Path, result: &TaskResult) -> Result<(), TaskError> {
        fs::create_dir_all(dir)
            .map_err(|e| TaskError::Storage(format!("creación de {}: {e}", dir.display())))?;
        let body = serde_json::to_string_pretty(result)
            .map_err(|e| TaskError::Serialization(format!("resultado no codificable: {e}")))?;
        let tmp = dir.join(format!(".{}.tmp-{}", RESULT_FILE, Uuid::new_v4().simple()));
        fs::write(&tmp, body)
            .map_err(|e| TaskError::Storage(format!("escritura de {}: {e}", tmp.display())))?;
        let target = dir.join(RESULT_FILE);
        fs::rename(&tmp, &target)
            .map_err(|e| TaskError::Storage(format!("rename hacia {}: {e}", target.display())))?;
        log::debug!("resultado persistido en {}", target.display());
        Ok(())
    }
}
