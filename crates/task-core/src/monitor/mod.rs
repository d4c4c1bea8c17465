//! Frontera con el monitoreo de recursos.
//!
//! El sampler corre como colaborador concurrente (thread o proceso aparte)
//! durante la ejecución del task; su única interacción con el controller es
//! start/stop y un log de muestras que se lee después de stop. Este módulo
//! define la frontera (`ResourceSampler`/`SamplerFactory`) y el adapter que
//! reduce el log a picos (`gather_runtime`).

pub mod sampler;

pub use sampler::{ResourceSampler, SamplerFactory};

use std::fs;
use std::path::Path;

use crate::constants::SAMPLE_UNIT_DIVISOR;
use crate::errors::TaskError;
use crate::model::RuntimeStats;

/// Reduce un log de muestras a picos por métrica.
///
/// Formato de fila: `timestamp, cpu_percent, rss, vms` (numéricos, separados
/// por coma). rss/vms se normalizan a GiB dividiendo por el divisor fijo.
/// Log ausente o vacío produce stats con todos los campos nulos: una
/// ejecución más corta que el intervalo de muestreo no es un error. Una fila
/// presente pero malformada sí lo es.
pub fn gather_runtime(log_path: &Path) -> Result<RuntimeStats, TaskError> {
    if !log_path.exists() {
        return Ok(RuntimeStats::default());
    }
    let raw = fs::read_to_string(log_path)
        .map_err(|e| TaskError::Storage(format!("log de muestras {}: {e}", log_path.display())))?;

    let mut rows: Vec<[f64; 4]> = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cols: Vec<f64> = line.split(',')
                                 .map(|c| c.trim().parse::<f64>())
                                 .collect::<Result<_, _>>()
                                 .map_err(|e| TaskError::Serialization(format!("fila de muestra inválida {line:?}: {e}")))?;
        if cols.len() < 4 {
            return Err(TaskError::Serialization(format!("fila de muestra incompleta: {line:?}")));
        }
        rows.push([cols[0], cols[1], cols[2], cols[3]]);
    }

    if rows.is_empty() {
        return Ok(RuntimeStats::default());
    }

    let peak = |idx: usize| rows.iter().map(|r| r[idx]).fold(f64::MIN, f64::max);
    log::debug!("{} muestras reducidas de {}", rows.len(), log_path.display());
    Ok(RuntimeStats { rss_peak_gb: Some(peak(2) / SAMPLE_UNIT_DIVISOR),
                      vms_peak_gb: Some(peak(3) / SAMPLE_UNIT_DIVISOR),
                      cpu_peak_percent: Some(peak(1)) })
}
