//! Constantes del envelope de ejecución.
//!
//! Valores estáticos compartidos entre cache, auditoría y monitor. Los que
//! participan en contratos externos (nombres de artefactos, divisor de
//! unidades) deben mantenerse estables entre versiones: cambiarlos invalida
//! caches existentes.

/// Versión lógica del API del envelope. No entra al fingerprint (la identidad
/// de un task es su tipo + inputs, no la versión del runtime).
pub const API_VERSION: &str = "0.0.1";

/// Nombre del artefacto de resultado dentro de `<cache>/<fingerprint>/`.
/// Un directorio de fingerprint sin este archivo es un miss, no un error.
pub const RESULT_FILE: &str = "_result.json";

/// Nombre convencional del log de muestras de recursos dentro del workdir.
/// Lo produce el sampler externo; el core sólo lo lee.
pub const PROF_FILE: &str = "_resource.prof";

/// Divisor fijo para llevar rss/vms desde su unidad de almacenamiento a GiB.
pub const SAMPLE_UNIT_DIVISOR: f64 = 1024.0;

/// URL canónica del documento de contexto JSON-LD para mensajes de
/// provenance en builds release. En debug se usa la copia embebida.
pub const REMOTE_CONTEXT_URL: &str =
    "https://raw.githubusercontent.com/taskflow-rs/taskflow/main/schema/context.jsonld";
