// Rust guideline compliant 2026-10-16

//! Shared domain types for document-model persistence.
//!
//! Defines `Document`, `ModelError`, and the hexagonal port traits `Model`
//! and `ModelInstance`. Application code depends on these traits only; real
//! object-mapping backends and test doubles implement them.
//!
//! Every operation follows the callback-last convention: the final parameter
//! is a completion handler invoked with `(error, value)`.

use serde_json::Value;

/// Own fields of a stored document, keyed by field name.
pub type Document = serde_json::Map<String, Value>;

/// Errors a document-model backend may report through a completion callback.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// No document matched the requested identifier.
    #[error("document not found: {id}")]
    NotFound {
        /// Identifier that was looked up.
        id: String,
    },
    /// A value could not be cast to the type declared for `path`.
    #[error("cast failed for `{path}`: {reason}")]
    Cast {
        /// Field path of the offending value.
        path: String,
        /// Human-readable description.
        reason: String,
    },
    /// The document failed validation before being written.
    #[error("validation failed: {reason}")]
    Validation {
        /// Human-readable description.
        reason: String,
    },
    /// The backing store could not be reached.
    #[error("connection failed: {reason}")]
    Connection {
        /// Human-readable description.
        reason: String,
    },
}

/// Hexagonal port: class-level queries of a document model.
///
/// Completion callbacks receive `(error, value)`. A backend calls each
/// callback at most once; whether it is called at all is up to the backend.
pub trait Model {
    /// Error type forwarded to completion callbacks.
    type Error;

    /// Look up every document matching `conditions`.
    ///
    /// On success `value` holds a JSON array of documents.
    fn find<F>(&self, conditions: &Value, callback: F)
    where
        F: FnOnce(Option<Self::Error>, Option<Value>);

    /// Look up a single document by its identifier.
    fn find_by_id<F>(&self, id: &Value, callback: F)
    where
        F: FnOnce(Option<Self::Error>, Option<Value>);
}

/// Hexagonal port: a single document belonging to a [`Model`].
pub trait ModelInstance {
    /// Error type forwarded to completion callbacks.
    type Error;

    /// Own fields of this document.
    fn fields(&self) -> &Document;

    /// Persist this document.
    ///
    /// On success `value` holds the stored document.
    fn save<F>(&self, callback: F)
    where
        F: FnOnce(Option<Self::Error>, Option<Value>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    // ------------------------------------------------------------------
    // ModelError
    // ------------------------------------------------------------------

    #[test]
    fn model_error_messages() {
        let not_found = ModelError::NotFound { id: "42".to_owned() };
        let cast = ModelError::Cast { path: "_id".to_owned(), reason: "not an ObjectId".to_owned() };
        let validation = ModelError::Validation { reason: "name is required".to_owned() };
        let connection = ModelError::Connection { reason: "timeout".to_owned() };
        assert_eq!(not_found.to_string(), "document not found: 42");
        assert_eq!(cast.to_string(), "cast failed for `_id`: not an ObjectId");
        assert_eq!(validation.to_string(), "validation failed: name is required");
        assert_eq!(connection.to_string(), "connection failed: timeout");
    }

    #[test]
    fn model_error_clone_compares_equal() {
        let e = ModelError::Connection { reason: "refused".to_owned() };
        assert_eq!(e.clone(), e);
        assert_ne!(e, ModelError::Validation { reason: "refused".to_owned() });
    }

    // ------------------------------------------------------------------
    // Port traits -- compile check with minimal in-memory impls
    // ------------------------------------------------------------------

    struct FixedModel {
        docs: Vec<Value>,
    }

    impl Model for FixedModel {
        type Error = ModelError;

        fn find<F>(&self, _conditions: &Value, callback: F)
        where
            F: FnOnce(Option<ModelError>, Option<Value>),
        {
            callback(None, Some(Value::Array(self.docs.clone())));
        }

        fn find_by_id<F>(&self, id: &Value, callback: F)
        where
            F: FnOnce(Option<ModelError>, Option<Value>),
        {
            match self.docs.iter().find(|doc| doc.get("id") == Some(id)) {
                Some(doc) => callback(None, Some(doc.clone())),
                None => callback(Some(ModelError::NotFound { id: id.to_string() }), None),
            }
        }
    }

    struct FixedInstance {
        fields: Document,
    }

    impl ModelInstance for FixedInstance {
        type Error = ModelError;

        fn fields(&self) -> &Document {
            &self.fields
        }

        fn save<F>(&self, callback: F)
        where
            F: FnOnce(Option<ModelError>, Option<Value>),
        {
            callback(None, Some(Value::Object(self.fields.clone())));
        }
    }

    #[test]
    fn model_trait_compiles_with_minimal_impl() {
        let model = FixedModel { docs: vec![json!({"id": 1}), json!({"id": 2})] };
        let seen = RefCell::new(Vec::new());

        model.find(&json!({}), |err, docs| seen.borrow_mut().push((err, docs)));
        model.find_by_id(&json!(2), |err, doc| seen.borrow_mut().push((err, doc)));
        model.find_by_id(&json!(3), |err, doc| seen.borrow_mut().push((err, doc)));

        let seen = seen.into_inner();
        assert_eq!(seen[0], (None, Some(json!([{"id": 1}, {"id": 2}]))));
        assert_eq!(seen[1], (None, Some(json!({"id": 2}))));
        assert_eq!(seen[2], (Some(ModelError::NotFound { id: "3".to_owned() }), None));
    }

    #[test]
    fn model_instance_trait_compiles_with_minimal_impl() {
        let mut fields = Document::new();
        fields.insert("name".to_owned(), json!("Ada"));
        let instance = FixedInstance { fields };
        let saved = RefCell::new(None);

        instance.save(|err, doc| *saved.borrow_mut() = Some((err, doc)));

        assert_eq!(instance.fields().get("name"), Some(&json!("Ada")));
        assert_eq!(saved.into_inner(), Some((None, Some(json!({"name": "Ada"})))));
    }
}
