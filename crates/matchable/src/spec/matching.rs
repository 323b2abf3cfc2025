//! Selection and ordering of applicable patterns.
//!
//! 1. Resolve the candidate's ancestry chain, most general type first.
//! 2. Keep the patterns whose target is in the chain and whose accessor and
//!    predicate succeed on the candidate.
//! 3. Order them per `Precedence`.
//! 4. Fold their values left to right through the captured wrappers.

use matchable_types::{Ancestry, TypeRegistry, Value};
use smallvec::SmallVec;

use super::Spec;
use crate::{MatchError, Pattern};

/// Ordering of applicable patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precedence {
    /// Type-based patterns first, ancestors before descendants; then all
    /// attribute-based patterns in insertion order. An attribute pattern
    /// thus overrides every type pattern, wherever both sit in the hierarchy.
    #[default]
    AttributesLast,
    /// One group per type along the ancestry chain: the type's own type
    /// patterns, then its attribute patterns. A descendant's type pattern
    /// overrides an ancestor's attribute pattern.
    Typewise,
}

impl Precedence {
    pub fn typewise(typewise: bool) -> Self {
        if typewise {
            Precedence::Typewise
        } else {
            Precedence::AttributesLast
        }
    }
}

type Order = SmallVec<[usize; 8]>;

impl Spec {
    /// Match `obj` with the default precedence.
    pub fn match_value(&self, types: &TypeRegistry, obj: &Value) -> Result<Value, MatchError> {
        self.match_with(types, obj, Precedence::default())
    }

    /// Match `obj` and combine the values of every applicable pattern.
    ///
    /// Fails with `MatchError::NoMatch` when nothing applies.
    #[tracing::instrument(level = "trace", skip_all, fields(ty = ?obj.type_id(), ?precedence))]
    pub fn match_with(
        &self,
        types: &TypeRegistry,
        obj: &Value,
        precedence: Precedence,
    ) -> Result<Value, MatchError> {
        let order = self.order(types, obj, precedence)?;
        let mut values = order.iter().map(|&slot| &self.entries[slot].value);

        let Some(first) = values.next() else {
            return Err(MatchError::NoMatch {
                object: obj.clone(),
            });
        };
        let combined = values.fold(first.clone(), |acc, next| acc.combine(next));
        Ok(combined.into_value())
    }

    /// The applicable patterns in combination order.
    pub fn applicable(
        &self,
        types: &TypeRegistry,
        obj: &Value,
        precedence: Precedence,
    ) -> Result<Vec<&Pattern>, MatchError> {
        let order = self.order(types, obj, precedence)?;
        Ok(order
            .iter()
            .map(|&slot| &self.entries[slot].pattern)
            .collect())
    }

    fn order(
        &self,
        types: &TypeRegistry,
        obj: &Value,
        precedence: Precedence,
    ) -> Result<Order, MatchError> {
        let ty = obj.type_id();
        let ancestry = types.ancestry(ty).ok_or(MatchError::UnknownType(ty))?;

        let order = match precedence {
            Precedence::AttributesLast => self.order_attributes_last(types, obj, ancestry),
            Precedence::Typewise => self.order_typewise(types, obj, ancestry),
        };

        for &slot in &order {
            tracing::trace!(pattern = ?self.entries[slot].pattern.id(), "applicable");
        }
        Ok(order)
    }

    fn order_attributes_last(
        &self,
        types: &TypeRegistry,
        obj: &Value,
        ancestry: Ancestry<'_>,
    ) -> Order {
        let mut order = Order::new();
        for ty in ancestry.iter() {
            if let Some(group) = self.groups.get(&ty) {
                order.extend(group.type_based.iter().copied());
            }
        }
        order.extend(self.attribute_order.iter().copied().filter(|&slot| {
            let pattern = &self.entries[slot].pattern;
            ancestry.contains(pattern.target()) && pattern.test(types, obj)
        }));
        order
    }

    fn order_typewise(&self, types: &TypeRegistry, obj: &Value, ancestry: Ancestry<'_>) -> Order {
        let mut order = Order::new();
        for ty in ancestry.iter() {
            let Some(group) = self.groups.get(&ty) else {
                continue;
            };
            order.extend(group.type_based.iter().copied());
            order.extend(
                group
                    .attribute_based
                    .iter()
                    .copied()
                    .filter(|&slot| self.entries[slot].pattern.test(types, obj)),
            );
        }
        order
    }
}
