//! Modelo de datos del envelope: records declarados, stats de runtime,
//! resultado persistible y el insumo de fingerprint.

pub mod context;
pub mod fingerprint;
pub mod record;
pub mod result;
pub mod runtime;

pub use context::ExecutionContext;
pub use fingerprint::TaskFingerprintInput;
pub use record::{FieldDefault, FieldSpec, FieldType, Record, RecordSpec};
pub use result::{ResultStatus, TaskResult};
pub use runtime::RuntimeStats;
