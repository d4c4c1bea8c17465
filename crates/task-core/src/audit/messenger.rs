//! Sinks de mensajes de provenance.
//!
//! El core no implementa transporte: un `Messenger` recibe el mensaje ya
//! resuelto y lo entrega donde sea (stdout, archivo, memoria para tests).
//! Fallos de entrega se devuelven al caller de `emit`; la política de si
//! abortan o no es del Lifecycle Controller.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;
use uuid::Uuid;

use crate::errors::TaskError;

/// Sink de entrega de mensajes.
pub trait Messenger {
    fn send(&mut self, message: &Value) -> Result<(), TaskError>;
}

/// Imprime cada mensaje como JSON compacto por stdout.
#[derive(Debug, Default)]
pub struct PrintMessenger;

impl Messenger for PrintMessenger {
    fn send(&mut self, message: &Value) -> Result<(), TaskError> {
        let line = serde_json::to_string(message)
            .map_err(|e| TaskError::Serialization(format!("mensaje de auditoría: {e}")))?;
        println!("{line}");
        Ok(())
    }
}

/// Escribe un archivo `.jsonld` por mensaje bajo un directorio.
#[derive(Debug)]
pub struct FileMessenger {
    dir: PathBuf,
}

impl FileMessenger {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

impl Messenger for FileMessenger {
    fn send(&mut self, message: &Value) -> Result<(), TaskError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| TaskError::Storage(format!("directorio de mensajes {}: {e}", self.dir.display())))?;
        let body = serde_json::to_string_pretty(message)
            .map_err(|e| TaskError::Serialization(format!("mensaje de auditoría: {e}")))?;
        let path = self.dir.join(format!("{}.jsonld", Uuid::new_v4().simple()));
        fs::write(&path, body)
            .map_err(|e| TaskError::Storage(format!("escritura de mensaje {}: {e}", path.display())))
    }
}

/// Colector en memoria, para tests y para el binario de validación. Los
/// clones comparten buffer: se conserva un handle fuera del task y se
/// inspecciona después de correr.
#[derive(Debug, Default, Clone)]
pub struct MemoryMessenger {
    sent: Rc<RefCell<Vec<Value>>>,
}

impl MemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Value> {
        self.sent.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }
}

impl Messenger for MemoryMessenger {
    fn send(&mut self, message: &Value) -> Result<(), TaskError> {
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}
