//! Edit configuration.

use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use std::sync::Arc;

use crate::{EditError, Kind, KindRegistry, KindSpec, LookupOptions, SetCall, Shape, Value};

/// How missing ancestors are produced.
#[derive(Clone, Default)]
pub enum Construct {
    /// Build an empty container of the kind resolved for the depth.
    #[default]
    Auto,
    /// Never build ancestors; a gap before the final key ends the edit with
    /// no change.
    Disabled,
    /// Call this factory with the depth.
    With(Rc<dyn Fn(usize) -> Value>),
}

/// Which kind to build for a missing ancestor at a given depth.
#[derive(Clone, Default)]
pub enum TypeResolution {
    /// The kind of the root container.
    #[default]
    SameAsRoot,
    /// One spec per depth; the last one repeats for deeper levels.
    Fixed(Vec<KindSpec>),
    /// Ask this function for each depth.
    PerDepth(Rc<dyn Fn(usize) -> KindSpec>),
}

/// Caller override for the final, value-level write.
pub type Setter = Rc<dyn Fn(SetCall<'_>) -> Result<(), EditError>>;

/// Options for [`edit_one`](crate::edit_one) and [`edit_batch`](crate::edit_batch).
///
/// ```
/// use deepedit::{EditOptions, Shape};
///
/// let options = EditOptions::new()
///     .loose(true)
///     .types([Shape::Record, Shape::List])
///     .else_return("unchanged");
/// assert!(options.lookup.loose);
/// ```
#[derive(Clone, Default)]
pub struct EditOptions {
    /// Ancestor construction policy.
    pub construct: Construct,
    /// Ancestor kind resolution.
    pub types: TypeResolution,
    /// Passed to the decision function as `current` when a key is absent.
    pub not_found: Option<Value>,
    /// Replace a non-container found mid-chain with a fresh container.
    pub overwrite_ancestors: bool,
    /// Override for the final write.
    pub setter: Option<Setter>,
    /// Key matching.
    pub lookup: LookupOptions,
    /// Returned when nothing changed.
    pub else_return: Option<Value>,
    /// Raised when nothing changed. Takes precedence over `else_return`.
    pub else_throw: Option<Arc<dyn core::error::Error + Send + Sync>>,
    /// Kind recognition and construction.
    pub registry: KindRegistry,
}

impl EditOptions {
    /// Default options: construct ancestors like the root, strict keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build missing ancestors with `f(depth)`.
    pub fn construct(mut self, f: impl Fn(usize) -> Value + 'static) -> Self {
        self.construct = Construct::With(Rc::new(f));
        self
    }

    /// Never build missing ancestors.
    pub fn no_construct(mut self) -> Self {
        self.construct = Construct::Disabled;
        self
    }

    /// Build every missing ancestor as `spec`.
    pub fn kind(mut self, spec: impl Into<KindSpec>) -> Self {
        self.types = TypeResolution::Fixed(vec![spec.into()]);
        self
    }

    /// Build the ancestor at depth `i` as `specs[min(i, len - 1)]`.
    pub fn types<S: Into<KindSpec>>(mut self, specs: impl IntoIterator<Item = S>) -> Self {
        self.types = TypeResolution::Fixed(specs.into_iter().map(Into::into).collect());
        self
    }

    /// Build the ancestor at depth `i` as `f(i)`.
    pub fn get_type(mut self, f: impl Fn(usize) -> KindSpec + 'static) -> Self {
        self.types = TypeResolution::PerDepth(Rc::new(f));
        self
    }

    /// Placeholder handed to the decision function for absent keys.
    pub fn not_found(mut self, placeholder: impl Into<Value>) -> Self {
        self.not_found = Some(placeholder.into());
        self
    }

    /// Replace non-containers found mid-chain.
    pub fn overwrite_ancestors(mut self, yes: bool) -> Self {
        self.overwrite_ancestors = yes;
        self
    }

    /// Override the final write. Call [`SetCall::apply_default`] to delegate.
    pub fn set(mut self, f: impl Fn(SetCall<'_>) -> Result<(), EditError> + 'static) -> Self {
        self.setter = Some(Rc::new(f));
        self
    }

    /// Match keys structurally.
    pub fn loose(mut self, yes: bool) -> Self {
        self.lookup.loose = yes;
        self
    }

    /// With `loose`, take the last match.
    pub fn reverse(mut self, yes: bool) -> Self {
        self.lookup.reverse = yes;
        self
    }

    /// Return `value` when nothing changed.
    pub fn else_return(mut self, value: impl Into<Value>) -> Self {
        self.else_return = Some(value.into());
        self
    }

    /// Fail with `err` when nothing changed.
    pub fn else_throw(mut self, err: impl core::error::Error + Send + Sync + 'static) -> Self {
        self.else_throw = Some(Arc::new(err));
        self
    }

    /// Treat these kinds as lists.
    pub fn arrays<K: Into<Kind>>(self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.recognize(kinds, Shape::List)
    }

    /// Treat these kinds as maps.
    pub fn maps<K: Into<Kind>>(self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.recognize(kinds, Shape::Map)
    }

    /// Treat these kinds as sets.
    pub fn sets<K: Into<Kind>>(self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.recognize(kinds, Shape::Set)
    }

    /// Treat these kinds as identity maps.
    pub fn weak_maps<K: Into<Kind>>(self, kinds: impl IntoIterator<Item = K>) -> Self {
        self.recognize(kinds, Shape::IdentityMap)
    }

    fn recognize<K: Into<Kind>>(
        mut self,
        kinds: impl IntoIterator<Item = K>,
        shape: Shape,
    ) -> Self {
        for kind in kinds {
            self.registry.register(kind, shape);
        }
        self
    }

    /// The "nothing changed" result.
    pub(crate) fn otherwise(&self) -> Result<Option<Value>, EditError> {
        if let Some(err) = &self.else_throw {
            return Err(EditError::NoChange(Arc::clone(err)));
        }
        Ok(self.else_return.clone())
    }
}

impl Debug for EditOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let construct = match &self.construct {
            Construct::Auto => "auto",
            Construct::Disabled => "disabled",
            Construct::With(_) => "custom",
        };
        let types = match &self.types {
            TypeResolution::SameAsRoot => "same-as-root".to_string(),
            TypeResolution::Fixed(specs) => format!("{specs:?}"),
            TypeResolution::PerDepth(_) => "per-depth".to_string(),
        };
        f.debug_struct("EditOptions")
            .field("construct", &construct)
            .field("types", &types)
            .field("not_found", &self.not_found)
            .field("overwrite_ancestors", &self.overwrite_ancestors)
            .field("setter", &self.setter.as_ref().map(|_| ".."))
            .field("lookup", &self.lookup)
            .field("else_return", &self.else_return)
            .field("else_throw", &self.else_throw)
            .field("registry", &self.registry)
            .finish()
    }
}
