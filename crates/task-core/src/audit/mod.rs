//! Auditoría de provenance: flags de capacidades, mensajes y sinks.
//!
//! Rol en el envelope:
//! - El Lifecycle Controller emite eventos start/end/entity describiendo una
//!   ejecución, sólo si el bit `PROV` está presente en los flags del task.
//! - `emit` es la única puerta: sin el bit, cero efectos observables.

pub mod flags;
pub mod message;
pub mod messenger;

pub use flags::AuditFlag;
pub use message::{gen_uid, make_message, now, ContextSource, MessageBody};
pub use messenger::{FileMessenger, MemoryMessenger, Messenger, PrintMessenger};

use serde_json::Value;

use crate::errors::TaskError;

/// Entrega `body` a todos los messengers si `flags` contiene `PROV`; no-op
/// en caso contrario. Un fallo de entrega corta el fan-out y se devuelve al
/// caller, que decide la política (el controller lo trata como best-effort).
pub fn emit(messengers: &mut [Box<dyn Messenger>],
            flags: AuditFlag,
            body: MessageBody,
            source: &ContextSource)
            -> Result<(), TaskError> {
    if !flags.contains(AuditFlag::PROV) {
        return Ok(());
    }
    let message: Value = make_message(body, source);
    for m in messengers.iter_mut() {
        m.send(&message)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CountingMessenger(Rc<RefCell<usize>>);

    impl Messenger for CountingMessenger {
        fn send(&mut self, _message: &Value) -> Result<(), TaskError> {
            *self.0.borrow_mut() += 1;
            Ok(())
        }
    }

    fn body() -> MessageBody {
        let mut b = MessageBody::new();
        b.insert("@id".into(), json!("uid:t"));
        b
    }

    #[test]
    fn emit_without_prov_bit_is_a_noop() {
        let hits = Rc::new(RefCell::new(0));
        let mut sinks: Vec<Box<dyn Messenger>> = vec![Box::new(CountingMessenger(hits.clone()))];
        emit(&mut sinks, AuditFlag::RESOURCE, body(), &ContextSource::Bundled).unwrap();
        emit(&mut sinks, AuditFlag::NONE, body(), &ContextSource::Bundled).unwrap();
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn emit_with_prov_fans_out_to_every_sink() {
        let a = Rc::new(RefCell::new(0));
        let b = Rc::new(RefCell::new(0));
        let mut sinks: Vec<Box<dyn Messenger>> =
            vec![Box::new(CountingMessenger(a.clone())), Box::new(CountingMessenger(b.clone()))];
        emit(&mut sinks, AuditFlag::PROV | AuditFlag::RESOURCE, body(), &ContextSource::Bundled).unwrap();
        assert_eq!(*a.borrow(), 1);
        assert_eq!(*b.borrow(), 1);
    }

    #[test]
    fn delivery_failure_is_surfaced() {
        struct FailingMessenger;
        impl Messenger for FailingMessenger {
            fn send(&mut self, _m: &Value) -> Result<(), TaskError> {
                Err(TaskError::Storage("sink caído".into()))
            }
        }
        let mut sinks: Vec<Box<dyn Messenger>> = vec![Box::new(FailingMessenger)];
        let err = emit(&mut sinks, AuditFlag::PROV, body(), &ContextSource::Bundled).unwrap_err();
        assert!(matches!(err, TaskError::Storage(_)));
    }
}
