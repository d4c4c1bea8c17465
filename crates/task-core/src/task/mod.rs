//! Tasks: el trait de capacidades (`TaskKind`) y la instancia configurada
//! (`Task`) que el Lifecycle Controller ejecuta.

pub mod definition;
pub mod instance;

pub use definition::TaskKind;
pub use instance::Task;
