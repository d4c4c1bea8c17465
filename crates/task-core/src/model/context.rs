use std::path::PathBuf;

use super::Record;

/// Contexto de ejecución entregado a `TaskKind::execute`.
///
/// El directorio de trabajo viaja explícito en lugar de mutar el cwd del
/// proceso: ejecuciones concurrentes en el mismo proceso no colisionan y no
/// hay estado global que restaurar en los caminos de salida.
pub struct ExecutionContext {
    /// Directorio aislado `<cache_root>/<fingerprint>` de esta ejecución.
    pub workdir: PathBuf,
    /// Snapshot inmutable de los inputs con los que se calculó el fingerprint.
    pub inputs: Record,
}
