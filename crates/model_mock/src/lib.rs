// Rust guideline compliant 2026-10-16

//! Test double for the `domain::Model` and `domain::ModelInstance` ports.
//!
//! [`create_mock`] returns a fresh [`ModelMock`] class. Its operations
//! (`find`, `find_by_id`, and `save` on every [`DocumentMock`] instance) do
//! nothing until a canned `(error, value)` pair is installed through the
//! matching [`Stub::returns`]. Once configured, an operation calls its
//! completion callback synchronously with that pair; the other arguments are
//! ignored.
//!
//! ```
//! use domain::Model as _;
//! use serde_json::json;
//!
//! let users = model_mock::create_mock();
//! users.find_stub().returns(None, Some(json!([{"id": 1}])));
//! users.find(&json!({}), |err, docs| {
//!     assert!(err.is_none());
//!     assert_eq!(docs, Some(json!([{"id": 1}])));
//! });
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use domain::{Document, Model, ModelError, ModelInstance};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// One of the stubbed operation slots of a mock class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Class-level `find`.
    Find,
    /// Class-level `find_by_id`.
    FindById,
    /// Instance-level `save`.
    Save,
}

impl Operation {
    /// Name of the operation as it appears on the model interface.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::FindById => "find_by_id",
            Self::Save => "save",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Stub configuration
// ---------------------------------------------------------------------------

/// Behavior installed in one operation slot.
#[derive(Debug, Clone)]
enum StubState<E> {
    /// Silent no-op: the callback is dropped without being called.
    Unconfigured,
    /// Configured without a pair: `save` echoes the instance, queries report
    /// `(None, None)`.
    Unset,
    /// Forward the captured pair to the callback.
    Returns { error: Option<E>, value: Option<Value> },
}

/// Per-class configuration, shared by the class handle, its clones, and
/// every instance created from it.
#[derive(Debug)]
struct Stubs<E> {
    find: RefCell<StubState<E>>,
    find_by_id: RefCell<StubState<E>>,
    save: RefCell<StubState<E>>,
}

impl<E> Stubs<E> {
    fn new() -> Self {
        Self {
            find: RefCell::new(StubState::Unconfigured),
            find_by_id: RefCell::new(StubState::Unconfigured),
            save: RefCell::new(StubState::Unconfigured),
        }
    }

    fn slot(&self, operation: Operation) -> &RefCell<StubState<E>> {
        match operation {
            Operation::Find => &self.find,
            Operation::FindById => &self.find_by_id,
            Operation::Save => &self.save,
        }
    }

    fn is_configured(&self, operation: Operation) -> bool {
        !matches!(*self.slot(operation).borrow(), StubState::Unconfigured)
    }
}

impl<E: Clone> Stubs<E> {
    /// Copy of the current behavior for `operation`.
    ///
    /// The borrow ends before the caller runs any callback, so callbacks may
    /// reconfigure the mock.
    fn snapshot(&self, operation: Operation) -> StubState<E> {
        self.slot(operation).borrow().clone()
    }

    /// Run the `find`/`find_by_id` behavior: forward the configured outcome or
    /// do nothing.
    fn forward<F>(&self, operation: Operation, callback: F)
    where
        F: FnOnce(Option<E>, Option<Value>),
    {
        match self.snapshot(operation) {
            StubState::Unconfigured => {
                tracing::debug!(%operation, "model_mock.invoke.unconfigured");
            }
            StubState::Unset => {
                tracing::trace!(%operation, has_error = false, "model_mock.invoke");
                callback(None, None);
            }
            StubState::Returns { error, value } => {
                tracing::trace!(%operation, has_error = error.is_some(), "model_mock.invoke");
                callback(error, value);
            }
        }
    }
}

/// Configurator for a single operation slot of a mock class.
///
/// Obtained from [`ModelMock::find_stub`], [`ModelMock::find_by_id_stub`],
/// [`ModelMock::save_stub`] or [`DocumentMock::save_stub`].
#[derive(Debug)]
pub struct Stub<E> {
    stubs: Rc<Stubs<E>>,
    operation: Operation,
}

impl<E> Stub<E> {
    /// Install the `(error, value)` pair reported by this operation.
    ///
    /// Replaces any earlier configuration of the same slot. The pair is
    /// reported exactly as given, `None` halves included.
    pub fn returns(&self, error: Option<E>, value: Option<Value>) {
        tracing::debug!(
            operation = %self.operation,
            has_error = error.is_some(),
            has_value = value.is_some(),
            "model_mock.stub.configured"
        );
        *self.stubs.slot(self.operation).borrow_mut() = StubState::Returns { error, value };
    }

    /// Configure this operation without a pair.
    ///
    /// `save` then echoes the instance: the callback receives
    /// `(None, <copy of the instance's fields>)`. `find` and `find_by_id`
    /// call back with `(None, None)`. Replaces any earlier configuration.
    pub fn returns_unset(&self) {
        tracing::debug!(operation = %self.operation, "model_mock.stub.configured_unset");
        *self.stubs.slot(self.operation).borrow_mut() = StubState::Unset;
    }

    /// Operation this configurator addresses.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// `true` once [`returns`](Self::returns) or
    /// [`returns_unset`](Self::returns_unset) has been called on this slot.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.stubs.is_configured(self.operation)
    }
}

// ---------------------------------------------------------------------------
// ModelMock
// ---------------------------------------------------------------------------

/// Create a fresh mock model class reporting `domain::ModelError`.
///
/// Each call returns an independent class; configuring one never affects
/// another. Use [`ModelMock::default`] to pick a different error type.
#[must_use]
pub fn create_mock() -> ModelMock {
    ModelMock::new()
}

/// Mock document-model class implementing the `domain::Model` port.
///
/// Cloning the handle yields the same class: clones and instances share one
/// stub configuration.
#[derive(Debug)]
pub struct ModelMock<E = ModelError> {
    stubs: Rc<Stubs<E>>,
}

impl ModelMock {
    /// Create a fresh, unconfigured class reporting `domain::ModelError`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Default for ModelMock<E> {
    fn default() -> Self {
        tracing::debug!("model_mock.created");
        Self { stubs: Rc::new(Stubs::new()) }
    }
}

impl<E> Clone for ModelMock<E> {
    fn clone(&self) -> Self {
        Self { stubs: Rc::clone(&self.stubs) }
    }
}

impl<E> ModelMock<E> {
    fn stub(&self, operation: Operation) -> Stub<E> {
        Stub { stubs: Rc::clone(&self.stubs), operation }
    }

    /// Configurator for [`Model::find`].
    #[must_use]
    pub fn find_stub(&self) -> Stub<E> {
        self.stub(Operation::Find)
    }

    /// Configurator for [`Model::find_by_id`].
    #[must_use]
    pub fn find_by_id_stub(&self) -> Stub<E> {
        self.stub(Operation::FindById)
    }

    /// Configurator for [`ModelInstance::save`], shared by every instance of
    /// this class.
    #[must_use]
    pub fn save_stub(&self) -> Stub<E> {
        self.stub(Operation::Save)
    }

    /// Create an instance of this class with no fields.
    #[must_use]
    pub fn new_document(&self) -> DocumentMock<E> {
        self.document(Document::new())
    }

    /// Create an instance of this class carrying `fields`.
    #[must_use]
    pub fn document(&self, fields: Document) -> DocumentMock<E> {
        DocumentMock { fields, stubs: Rc::clone(&self.stubs) }
    }
}

impl<E: Clone> Model for ModelMock<E> {
    type Error = E;

    /// Forward the configured pair to `callback`; `conditions` are ignored.
    fn find<F>(&self, conditions: &Value, callback: F)
    where
        F: FnOnce(Option<E>, Option<Value>),
    {
        tracing::trace!(%conditions, "model_mock.find");
        self.stubs.forward(Operation::Find, callback);
    }

    /// Forward the configured pair to `callback`; `id` is ignored.
    fn find_by_id<F>(&self, id: &Value, callback: F)
    where
        F: FnOnce(Option<E>, Option<Value>),
    {
        tracing::trace!(%id, "model_mock.find_by_id");
        self.stubs.forward(Operation::FindById, callback);
    }
}

// ---------------------------------------------------------------------------
// DocumentMock
// ---------------------------------------------------------------------------

/// Instance of a [`ModelMock`] class: caller-assigned fields plus the
/// class's shared `save` configuration.
#[derive(Debug)]
pub struct DocumentMock<E = ModelError> {
    fields: Document,
    stubs: Rc<Stubs<E>>,
}

impl<E> DocumentMock<E> {
    /// Value of field `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Assign field `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Mutable access to every field.
    pub fn fields_mut(&mut self) -> &mut Document {
        &mut self.fields
    }

    /// Configurator for `save`; same slot as the class's
    /// [`ModelMock::save_stub`].
    #[must_use]
    pub fn save_stub(&self) -> Stub<E> {
        Stub { stubs: Rc::clone(&self.stubs), operation: Operation::Save }
    }
}

impl<E: Clone> ModelInstance for DocumentMock<E> {
    type Error = E;

    fn fields(&self) -> &Document {
        &self.fields
    }

    /// Report the configured pair, or echo this document back when the slot
    /// was configured without one.
    fn save<F>(&self, callback: F)
    where
        F: FnOnce(Option<E>, Option<Value>),
    {
        match self.stubs.snapshot(Operation::Save) {
            StubState::Unconfigured => {
                tracing::debug!(operation = %Operation::Save, "model_mock.invoke.unconfigured");
            }
            StubState::Returns { error, value } => {
                tracing::trace!(
                    operation = %Operation::Save,
                    has_error = error.is_some(),
                    "model_mock.invoke"
                );
                callback(error, value);
            }
            StubState::Unset => {
                tracing::trace!(
                    operation = %Operation::Save,
                    field_count = self.fields.len(),
                    "model_mock.invoke.echo"
                );
                callback(None, Some(Value::Object(self.fields.clone())));
            }
        }
    }
}
