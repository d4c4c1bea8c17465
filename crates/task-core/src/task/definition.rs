use serde_json::Value;

use crate::errors::TaskError;
use crate::model::ExecutionContext;

/// Trait que define un kind de task. Exactamente dos capacidades son
/// obligatorias: ejecutar (sin valor de retorno; los outputs se registran
/// internamente) y listar los outputs crudos en orden. El resto son hooks
/// con default.
pub trait TaskKind {
    /// Identidad de tipo del task; primer componente del fingerprint. Debe
    /// ser estable entre procesos y segura como nombre de directorio.
    fn type_name(&self) -> &str;

    /// Ejecuta el trabajo dentro del workdir del contexto. El único estado
    /// que puede levantar un fallo de aplicación; el core lo transporta
    /// opaco como `TaskError::Execution`.
    fn execute(&mut self, ctx: &ExecutionContext) -> Result<(), TaskError>;

    /// Outputs crudos en el orden en que Output Collection los zipea sobre
    /// los nombres declarados del record de salida.
    fn list_outputs(&self) -> Vec<Value>;

    /// Un task reanudable reutiliza un workdir existente e incompleto en vez
    /// de tratar su presencia como conflicto.
    fn can_resume(&self) -> bool {
        false
    }

    /// Revisión de la implementación del kind; no entra al fingerprint.
    fn task_version(&self) -> Option<&str> {
        None
    }

    /// Versión de la herramienta envuelta, si aplica.
    fn tool_version(&self) -> Option<&str> {
        None
    }
}
