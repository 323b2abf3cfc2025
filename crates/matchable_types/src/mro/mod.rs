//! C3 linearization of the type hierarchy.
//!
//! Produces the method resolution order of a type: the type itself first,
//! then its ancestors, ending with the root `object` type. The matching
//! engine consumes the reverse of this order (most general first).
//!
//! # Guarantees
//!
//! 1. A type precedes its bases.
//! 2. Bases keep their declared order.
//! 3. If `A` precedes `B` in one linearization, it does so everywhere.
//!
//! # Example
//!
//! ```text
//! A(object), B(A), C(A), D(B, C)
//!
//! MRO of D: [D, B, C, A, object]
//! ```

use smallvec::SmallVec;

use crate::TypeId;

/// Stack-allocated MRO; typical hierarchies stay below eight entries.
pub type Mro = SmallVec<[TypeId; 8]>;

/// The C3 merge could not find a consistent order.
///
/// `heads` lists the candidates left when no list head was free of every tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MroConflict {
    pub heads: Vec<TypeId>,
}

/// Compute the C3 linearization for `ty` with the given direct `bases`.
///
/// `get_mro` supplies the already computed MRO of each base. A base without a
/// known MRO is treated as a direct child of `object`.
///
/// The merge takes, at each step, the first list head that does not appear in
/// the tail of any list.
pub fn linearize<F>(ty: TypeId, bases: &[TypeId], get_mro: F) -> Result<Mro, MroConflict>
where
    F: Fn(TypeId) -> Option<Mro>,
{
    let mut result = Mro::new();
    result.push(ty);

    if bases.is_empty() {
        return Ok(result);
    }

    // [L(B1), L(B2), ..., [B1, B2, ...]]
    let mut lists: Vec<Vec<TypeId>> = bases
        .iter()
        .map(|&base| match get_mro(base) {
            Some(mro) => mro.to_vec(),
            None if base == TypeId::OBJECT => vec![base],
            None => vec![base, TypeId::OBJECT],
        })
        .collect();
    lists.push(bases.to_vec());

    loop {
        lists.retain(|list| !list.is_empty());
        if lists.is_empty() {
            break;
        }

        let head = lists
            .iter()
            .map(|list| list[0])
            .find(|candidate| lists.iter().all(|list| !list[1..].contains(candidate)));

        let Some(head) = head else {
            return Err(MroConflict {
                heads: lists.iter().map(|list| list[0]).collect(),
            });
        };

        result.push(head);
        for list in &mut lists {
            if list[0] == head {
                list.remove(0);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
