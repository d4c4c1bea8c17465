use std::path::{Path, PathBuf};

use crate::errors::TaskError;

/// Colaborador de muestreo. El controller lo arranca inmediatamente antes de
/// ejecutar y lo detiene inmediatamente después de Output Collection (o en el
/// camino de limpieza si la ejecución falla). `stop` devuelve la ruta del log
/// de muestras que el adapter reduce a `RuntimeStats`.
pub trait ResourceSampler {
    fn start(&mut self) -> Result<(), TaskError>;
    fn stop(&mut self) -> Result<PathBuf, TaskError>;
}

/// Fábrica de samplers: el sampler se crea con el workdir de la ejecución
/// como directorio de log, que sólo se conoce al preparar el directorio.
pub trait SamplerFactory {
    fn create(&self, logdir: &Path) -> Box<dyn ResourceSampler>;
}
