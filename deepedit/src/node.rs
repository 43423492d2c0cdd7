//! Shared container handles.

use core::cell::{Ref, RefCell, RefMut};
use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use crate::{Container, Kind};

/// A shared, interior-mutable handle to a [`Container`].
///
/// Cloning a `Node` clones the handle: both clones see the same container, and
/// compare equal. Two separately built containers never compare equal, however
/// alike their contents; use [`Value::loose_eq`](crate::Value::loose_eq) for that.
#[derive(Clone)]
pub struct Node(Rc<RefCell<Container>>);

impl Node {
    /// Wrap `container` in a fresh handle.
    pub fn new(container: Container) -> Self {
        Node(Rc::new(RefCell::new(container)))
    }

    /// Returns `true` if both handles point at the same container.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Immutably borrow the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Container> {
        self.0.borrow()
    }

    /// Mutably borrow the container.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Container> {
        self.0.borrow_mut()
    }

    /// The kind name of the container.
    pub fn kind(&self) -> Kind {
        self.0.borrow().kind().clone()
    }

    pub(crate) fn address(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(container) => write!(f, "Node({container})"),
            Err(_) => write!(f, "Node(<borrowed> @ {:#x})", self.address()),
        }
    }
}

/// A non-owning handle, used for identity-keyed entries.
///
/// While a `WeakNode` exists the allocation it points at cannot be reused, so
/// its address stays a valid identity even after the container is dropped.
#[derive(Clone)]
pub(crate) struct WeakNode(Weak<RefCell<Container>>);

impl WeakNode {
    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}
