//! The path walker.
//!
//! # Per-chain walk
//!
//! Starting at the root, each key is looked up in the current container:
//!
//! - **missing**: the decision function runs (once per chain) with the
//!   `not_found` placeholder. Cancelling ends the chain with no change, as
//!   does a gap before the final key when construction is disabled.
//! - **final key**: the decision function runs now if it has not yet. A
//!   cancel returns the existing value (or the no-change result); a commit is
//!   written through the setter override or [`default_set`], and returned.
//! - **intermediate key**: a missing child, or a non-container child under
//!   `overwrite_ancestors`, is replaced by a fresh ancestor written with
//!   [`default_set`]. The walk then descends into the child.
//!
//! An empty chain never changes anything.
//!
//! # No-change result
//!
//! `else_throw` if configured, else `else_return`, else `None`.

use crate::{
    Decision, DecisionContext, EditError, EditOptions, KeyChain, Lookup, SetCall, Value,
    construct::Ancestors, debug, default_set, lookup, trace,
};

/// Edit one key chain with default options.
///
/// ```
/// use deepedit::{Decision, Value, edit, list};
///
/// let root = list!["before"];
/// let result = edit(&root, 0, |cx| {
///     let before = cx.current.as_ref().and_then(Value::as_str).unwrap_or_default();
///     Decision::commit(format!("{before}+after"))
/// })
/// .unwrap();
/// assert_eq!(result, Some(Value::from("before+after")));
/// assert_eq!(root.get(0), result);
/// ```
pub fn edit(
    root: &Value,
    chain: impl Into<KeyChain>,
    decide: impl FnMut(DecisionContext) -> Decision,
) -> Result<Option<Value>, EditError> {
    edit_one(root, chain, decide, &EditOptions::default())
}

/// Edit one key chain.
///
/// Returns the committed value, the existing value when the decision
/// cancelled on a present key, or the no-change result.
pub fn edit_one(
    root: &Value,
    chain: impl Into<KeyChain>,
    mut decide: impl FnMut(DecisionContext) -> Decision,
    options: &EditOptions,
) -> Result<Option<Value>, EditError> {
    Walker::new(root, options).walk(&chain.into(), &mut decide)
}

/// Edit several key chains against the same root, in order.
///
/// Results line up with the chains. Each chain is fully committed before the
/// next is walked, so later chains see earlier writes. The first error stops
/// the batch.
pub fn edit_batch<C: Into<KeyChain>>(
    root: &Value,
    chains: impl IntoIterator<Item = C>,
    mut decide: impl FnMut(DecisionContext) -> Decision,
    options: &EditOptions,
) -> Result<Vec<Option<Value>>, EditError> {
    let walker = Walker::new(root, options);
    chains
        .into_iter()
        .map(|chain| walker.walk(&chain.into(), &mut decide))
        .collect()
}

struct Walker<'a> {
    root: &'a Value,
    options: &'a EditOptions,
    ancestors: Ancestors<'a>,
}

impl<'a> Walker<'a> {
    fn new(root: &'a Value, options: &'a EditOptions) -> Self {
        Self {
            root,
            options,
            ancestors: Ancestors::new(root, options),
        }
    }

    fn walk(
        &self,
        chain: &KeyChain,
        decide: &mut impl FnMut(DecisionContext) -> Decision,
    ) -> Result<Option<Value>, EditError> {
        let keys = chain.keys();
        let Some(last) = keys.len().checked_sub(1) else {
            debug!("empty key chain, nothing to edit");
            return self.options.otherwise();
        };

        let mut current = self.root.clone();
        let mut decision: Option<Decision> = None;

        for (depth, key) in keys.iter().enumerate() {
            let child = match lookup(&current, key, self.options.lookup) {
                Lookup::Found { value, .. } => Some(value),
                Lookup::NotFound => None,
            };
            trace!(depth, %key, found = child.is_some(), "edit step");

            if child.is_none() {
                let placeholder = self.options.not_found.clone();
                let outcome =
                    decision.get_or_insert_with(|| decide(DecisionContext::missing(placeholder)));
                if *outcome == Decision::Cancel {
                    debug!(depth, %key, "cancelled on a missing key");
                    return self.options.otherwise();
                }
                if depth < last && !self.ancestors.enabled() {
                    debug!(depth, %key, "missing ancestor and construction is disabled");
                    return self.options.otherwise();
                }
            }

            if depth == last {
                let outcome = match decision {
                    Some(outcome) => outcome,
                    None => match &child {
                        Some(existing) => decide(DecisionContext::found(existing.clone())),
                        None => decide(DecisionContext::missing(self.options.not_found.clone())),
                    },
                };
                return match outcome {
                    Decision::Cancel => match child {
                        Some(existing) => Ok(Some(existing)),
                        None => self.options.otherwise(),
                    },
                    Decision::Commit(value) => {
                        self.commit(&current, key, value.clone())?;
                        Ok(Some(value))
                    }
                };
            }

            current = match child {
                Some(child) if child.is_container() || !self.options.overwrite_ancestors => child,
                _ if !self.ancestors.enabled() => {
                    debug!(depth, %key, "non-container ancestor and construction is disabled");
                    return self.options.otherwise();
                }
                _ => {
                    let fresh = self.ancestors.construct(depth)?;
                    default_set(&current, key, fresh.clone(), self.options)?;
                    fresh
                }
            };
        }

        self.options.otherwise()
    }

    fn commit(&self, target: &Value, key: &Value, value: Value) -> Result<(), EditError> {
        trace!(%key, %value, custom = self.options.setter.is_some(), "commit");
        let call = SetCall {
            target,
            key,
            value,
            options: self.options,
        };
        match &self.options.setter {
            Some(setter) => setter(call),
            None => call.apply_default(),
        }
    }
}
