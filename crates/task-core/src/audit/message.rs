//! Construcción de mensajes de provenance.
//!
//! Cada mensaje es un map plano clave/valor resuelto contra un documento de
//! contexto JSON-LD. El contexto puede ser la copia embebida en el crate o
//! una referencia a la URL canónica; la elección es configuración inyectable,
//! no lógica.

use chrono::Utc;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::constants::REMOTE_CONTEXT_URL;

/// Cuerpo plano de un mensaje, antes de resolver el contexto.
pub type MessageBody = Map<String, Value>;

/// Documento de contexto embebido, parseado una sola vez.
static BUNDLED_CONTEXT: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schema/context.jsonld"))
        .expect("context.jsonld embebido inválido")
});

/// Origen del documento de contexto de los mensajes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextSource {
    /// Copia local incluida en el crate (builds de desarrollo).
    Bundled,
    /// Referencia por URL; el core nunca hace fetch (el transporte es
    /// responsabilidad del consumidor de los mensajes).
    Remote(String),
}

impl Default for ContextSource {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            ContextSource::Bundled
        } else {
            ContextSource::Remote(REMOTE_CONTEXT_URL.to_string())
        }
    }
}

impl ContextSource {
    fn resolve(&self) -> Value {
        match self {
            ContextSource::Bundled => BUNDLED_CONTEXT.clone(),
            ContextSource::Remote(url) => json!({ "@context": url }),
        }
    }
}

/// Envuelve un cuerpo con su `@context` resuelto.
pub fn make_message(body: MessageBody, source: &ContextSource) -> Value {
    let mut wrapped = Map::new();
    let context = match source.resolve() {
        Value::Object(doc) => doc.get("@context").cloned().unwrap_or(Value::Null),
        other => other,
    };
    wrapped.insert("@context".to_string(), context);
    for (k, v) in body {
        wrapped.insert(k, v);
    }
    Value::Object(wrapped)
}

/// Identificador de actividad/entidad: `uid:<uuid4>`.
pub fn gen_uid() -> String {
    format!("uid:{}", Uuid::new_v4())
}

/// Timestamp RFC 3339 en UTC.
pub fn now() -> String {
    Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_message_injects_context_first() {
        let mut body = Map::new();
        body.insert("@id".into(), json!("uid:x"));
        let msg = make_message(body, &ContextSource::Remote("http://ctx".into()));
        assert_eq!(msg["@context"], json!("http://ctx"));
        assert_eq!(msg["@id"], json!("uid:x"));
    }

    #[test]
    fn bundled_context_parses() {
        let mut body = Map::new();
        body.insert("@type".into(), json!("task"));
        let msg = make_message(body, &ContextSource::Bundled);
        assert!(msg["@context"].is_object() || msg["@context"].is_string());
    }

    #[test]
    fn uids_carry_prefix_and_differ() {
        let a = gen_uid();
        let b = gen_uid();
        assert!(a.starts_with("uid:"));
        assert_ne!(a, b);
    }
}
