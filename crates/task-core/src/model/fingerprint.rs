use serde::Serialize;
use serde_json::Value;

/// Insumos para calcular el fingerprint de un task. NO es el fingerprint
/// final (string `Tipo_hash`) sino el modelo previo a canonicalizar. Los
/// valores van como pares `(nombre, valor)` en orden de declaración del spec,
/// nunca en orden de iteración de un map.
#[derive(Serialize)]
pub struct TaskFingerprintInput<'a> {
    pub task_type: &'a str,
    pub values: Vec<(&'a str, &'a Value)>,
}
