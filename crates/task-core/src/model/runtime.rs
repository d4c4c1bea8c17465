//! Picos de uso de recursos de una ejecución monitoreada.

use serde::{Deserialize, Serialize};

/// Resumen de picos producido por el adapter de monitoreo. Todos los campos
/// son opcionales: una ejecución más corta que el intervalo de muestreo
/// produce un log vacío y stats nulos, que es un estado válido.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuntimeStats {
    /// Pico de memoria residente, en GiB.
    pub rss_peak_gb: Option<f64>,
    /// Pico de memoria virtual, en GiB.
    pub vms_peak_gb: Option<f64>,
    /// Pico de uso de CPU, en porcentaje.
    pub cpu_peak_percent: Option<f64>,
}

impl RuntimeStats {
    pub fn is_empty(&self) -> bool {
        self.rss_peak_gb.is_none() && self.vms_peak_gb.is_none() && self.cpu_peak_percent.is_none()
    }
}
