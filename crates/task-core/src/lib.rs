//! task-core: envelope idempotente de ejecución de tasks direccionado por cache
pub mod audit;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod hashing;
pub mod model;
pub mod monitor;
pub mod store;
pub mod task;

pub use audit::{AuditFlag, ContextSource, FileMessenger, MemoryMessenger, Messenger, PrintMessenger};
pub use engine::TaskRunner;
pub use errors::TaskError;
pub use model::{ExecutionContext, FieldDefault, FieldSpec, FieldType, Record, RecordSpec, ResultStatus,
                RuntimeStats, TaskResult};
pub use monitor::{gather_runtime, ResourceSampler, SamplerFactory};
pub use store::{FsResultStore, ResultStore};
pub use task::{Task, TaskKind};
