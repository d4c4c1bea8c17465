//! Sampler guionado: escribe filas enlatadas al detenerse.
//!
//! Valida el camino RESOURCE completo (start antes de ejecutar, stop en la
//! limpieza, reducción del log a picos) sin un colector de verdad. Las filas
//! siguen el contrato del log: `timestamp, cpu_percent, rss, vms`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use task_core::constants::PROF_FILE;
use task_core::errors::TaskError;
use task_core::monitor::{ResourceSampler, SamplerFactory};

pub struct ScriptedSampler {
    logdir: PathBuf,
    rows: Vec<[f64; 4]>,
    fail_stop: bool,
    started: bool,
}

impl ResourceSampler for ScriptedSampler {
    fn start(&mut self) -> Result<(), TaskError> {
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<PathBuf, TaskError> {
        if !self.started {
            return Err(TaskError::Configuration("stop sin start previo".into()));
        }
        if self.fail_stop {
            return Err(TaskError::Storage("sampler guionado: stop forzado a fallar".into()));
        }
        let path = self.logdir.join(PROF_FILE);
        let mut file = fs::File::create(&path)
            .map_err(|e| TaskError::Storage(format!("log de muestras {}: {e}", path.display())))?;
        for row in &self.rows {
            writeln!(file, "{}, {}, {}, {}", row[0], row[1], row[2], row[3])
                .map_err(|e| TaskError::Storage(format!("log de muestras {}: {e}", path.display())))?;
        }
        Ok(path)
    }
}

/// Fábrica de samplers guionados; las mismas filas para cada ejecución.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSamplerFactory {
    rows: Vec<[f64; 4]>,
    fail_stop: bool,
}

impl ScriptedSamplerFactory {
    pub fn new(rows: Vec<[f64; 4]>) -> Self {
        Self { rows,
               fail_stop: false }
    }

    /// Sin filas: el log queda vacío y los stats salen nulos.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Variante cuyo `stop` falla, para validar la agregación de fallos de
    /// limpieza.
    pub fn failing_stop() -> Self {
        Self { rows: Vec::new(),
               fail_stop: true }
    }
}

impl SamplerFactory for ScriptedSamplerFactory {
    fn create(&self, logdir: &Path) -> Box<dyn ResourceSampler> {
        Box::new(ScriptedSampler { logdir: logdir.to_path_buf(),
                                   rows: self.rows.clone(),
                                   fail_stop: self.fail_stop,
                                   started: false })
    }
}
