//! task-adapters: kinds concretos sobre el envelope de task-core
//!
//! Este crate provee:
//! - Kinds deterministas para ejercitar el core: `SumTask` (aritmética con
//!   outputs declarados) y `ProbeTask` (contador de ejecuciones + outputs
//!   guionados, el caballo de batalla de los tests de idempotencia).
//! - `ScriptedSampler`: un sampler de recursos que escribe filas enlatadas,
//!   para validar el camino RESOURCE sin un colector real.
//! - Placeholders de la familia shell (`ShellTask`, `BashTask`,
//!   `MatlabTask`), declarados pero sin implementación.
//!
//! Nota: el core sólo conoce `TaskKind` (ejecutar + listar outputs); aquí
//! cada kind registra sus outputs internamente durante `execute` y los
//! expone crudos para que Output Collection los zipee sobre el spec.

pub mod sampler;
pub mod shell;
pub mod tasks;

pub use sampler::{ScriptedSampler, ScriptedSamplerFactory};
pub use shell::{BashTask, MatlabTask, ShellTask};
pub use tasks::{ProbeTask, SumTask};
