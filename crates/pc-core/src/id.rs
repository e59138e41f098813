//! Object identifiers.
//!
//! Ids name objects inside one editing session: the selection, the host's
//! layer list and history replay all refer to objects by id. They are never
//! written into a document. A parsed object carries [`ObjectId::unassigned`]
//! until the scene gives it a real id, so parsing a document does not grow
//! the id table.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

static NEXT: AtomicU64 = AtomicU64::new(1);

const UNASSIGNED: &str = "_unassigned";

/// Interned object id, e.g. `textbox_7`. Copy and compared as an integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// A new id for an object of `kind` (the shape's type name).
    pub fn mint(kind: &str) -> Self {
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(NAMES.get_or_intern(format!("{kind}_{n}")))
    }

    /// Placeholder carried by objects that have not joined a scene.
    pub fn unassigned() -> Self {
        Self(NAMES.get_or_intern_static(UNASSIGNED))
    }

    pub fn is_assigned(&self) -> bool {
        *self != Self::unassigned()
    }

    /// Find an id the session has already handed out. Unknown names return
    /// `None` without being interned.
    pub fn lookup(name: &str) -> Option<Self> {
        NAMES.get(name).map(Self).filter(ObjectId::is_assigned)
    }

    pub fn as_str(&self) -> &str {
        NAMES.resolve(&self.0)
    }

    /// The type-name part of the id (`textbox` for `textbox_7`).
    pub fn kind(&self) -> &str {
        let name = self.as_str();
        name.rsplit_once('_').map_or(name, |(kind, _)| kind)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
