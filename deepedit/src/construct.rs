//! Building missing ancestors.

use crate::{Construct, EditError, EditOptions, Kind, KindSpec, TypeResolution, Value, trace};

/// Produces the container placed at a gap in a key chain.
///
/// Resolution order: an explicit [`Construct::With`] factory; otherwise the
/// kind resolved for the depth by [`TypeResolution`], instantiated through the
/// registry. A fresh container never copies anything from the value it may be
/// replacing.
pub(crate) struct Ancestors<'a> {
    options: &'a EditOptions,
    root_kind: Option<Kind>,
    root_type: String,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(root: &Value, options: &'a EditOptions) -> Self {
        Self {
            options,
            root_kind: root.as_node().map(|node| node.kind()),
            root_type: root.type_name().into_owned(),
        }
    }

    /// Whether gaps before the final key may be filled at all.
    pub(crate) fn enabled(&self) -> bool {
        !matches!(self.options.construct, Construct::Disabled)
    }

    pub(crate) fn construct(&self, depth: usize) -> Result<Value, EditError> {
        let built = match &self.options.construct {
            Construct::With(factory) => factory(depth),
            Construct::Auto | Construct::Disabled => {
                self.resolve(depth)?.build(&self.options.registry)?
            }
        };
        trace!(depth, kind = %built.type_name(), "constructed ancestor");
        Ok(built)
    }

    /// The kind spec for a missing ancestor at `depth`.
    pub(crate) fn resolve(&self, depth: usize) -> Result<KindSpec, EditError> {
        match &self.options.types {
            TypeResolution::PerDepth(f) => Ok(f(depth)),
            TypeResolution::Fixed(specs) if !specs.is_empty() => {
                Ok(specs[depth.min(specs.len() - 1)].clone())
            }
            TypeResolution::Fixed(_) | TypeResolution::SameAsRoot => match &self.root_kind {
                Some(kind) => Ok(KindSpec::Name(kind.clone())),
                None => Err(EditError::Unconstructible {
                    depth,
                    found: self.root_type.clone(),
                }),
            },
        }
    }
}
