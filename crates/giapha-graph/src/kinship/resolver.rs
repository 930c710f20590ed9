//! The kinship rule table.
//!
//! Given two people and their position under a common ancestor, pick the
//! terms each uses for the other. The pair is normalized so the person in
//! the lower generation comes first; mirrored cases are the same code with
//! the answer swapped back, so `resolve(a, b)` and `resolve(b, a)` always
//! agree.

use super::is_senior;
use super::term::{KinshipTerm, ParentSiblingRole, Relation, Side};
use crate::ancestry::Ancestor;
use giapha_core::Person;

/// One person's position relative to the common ancestor.
#[derive(Debug, Clone, Copy)]
pub struct Lineage<'p, 'a> {
    pub person: &'a Person,
    /// Generations below the common ancestor.
    pub depth: usize,
    /// The ancestor's child on this person's line first, the person last.
    pub path: &'p [&'a Person],
}

impl<'p, 'a> Lineage<'p, 'a> {
    /// The common ancestor's child on this line, or the person itself when
    /// it is the ancestor.
    pub fn branch_point(&self) -> &'a Person {
        self.path.first().copied().unwrap_or(self.person)
    }

    pub fn side(&self) -> Side {
        Side::of_branch(self.branch_point())
    }
}

impl<'p, 'a> From<&'p Ancestor<'a>> for Lineage<'p, 'a> {
    fn from(ancestor: &'p Ancestor<'a>) -> Self {
        Self {
            person: ancestor.path.last().copied().unwrap_or(ancestor.person),
            depth: ancestor.depth,
            path: &ancestor.path,
        }
    }
}

/// The terms two people use for each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub a_calls_b: KinshipTerm,
    pub b_calls_a: KinshipTerm,
    pub relation: Relation,
}

impl Resolution {
    fn swapped(self) -> Self {
        Self {
            a_calls_b: self.b_calls_a,
            b_calls_a: self.a_calls_b,
            relation: self.relation,
        }
    }

    fn fallback() -> Self {
        Self {
            a_calls_b: KinshipTerm::Relative,
            b_calls_a: KinshipTerm::Relative,
            relation: Relation::Relative,
        }
    }
}

/// Resolves the terms between `a` and `b`.
pub fn resolve(a: &Lineage<'_, '_>, b: &Lineage<'_, '_>) -> Resolution {
    if a.depth < b.depth {
        resolve_ordered(b, a).swapped()
    } else {
        resolve_ordered(a, b)
    }
}

/// Rule table proper. `lower.depth >= upper.depth`.
fn resolve_ordered(lower: &Lineage<'_, '_>, upper: &Lineage<'_, '_>) -> Resolution {
    match (lower.depth, upper.depth) {
        // Same person; the engine never asks.
        (0, 0) => Resolution::fallback(),

        // Direct line: upper is the common ancestor.
        (depth, 0) => Resolution {
            a_calls_b: KinshipTerm::Ancestor {
                depth,
                side: lower.side(),
                gender: upper.person.gender,
            },
            b_calls_a: KinshipTerm::Descendant {
                depth,
                gender: lower.person.gender,
            },
            relation: Relation::Lineal { generations: depth },
        },

        (1, 1) => {
            let lower_is_elder = is_senior(lower.person, upper.person);
            Resolution {
                a_calls_b: KinshipTerm::Sibling {
                    elder: !lower_is_elder,
                    gender: upper.person.gender,
                },
                b_calls_a: KinshipTerm::Sibling {
                    elder: lower_is_elder,
                    gender: lower.person.gender,
                },
                relation: Relation::Siblings,
            }
        }

        // Cousins rank by their branches, not their own ages.
        (l, u) if l == u => {
            let lower_is_elder = is_senior(lower.branch_point(), upper.branch_point());
            Resolution {
                a_calls_b: KinshipTerm::Cousin {
                    elder: !lower_is_elder,
                    gender: upper.person.gender,
                },
                b_calls_a: KinshipTerm::Cousin {
                    elder: lower_is_elder,
                    gender: lower.person.gender,
                },
                relation: Relation::Cousins,
            }
        }

        // Upper is a sibling of one of lower's ancestors.
        (depth, 1) => Resolution {
            a_calls_b: KinshipTerm::ParentSibling {
                role: role_of(upper, lower),
                generations: depth - 1,
                extended: false,
                gender: upper.person.gender,
            },
            b_calls_a: KinshipTerm::Nibling {
                extended: false,
                gender: lower.person.gender,
            },
            relation: Relation::ParentSibling,
        },

        (l, u) if l > u => {
            let a_calls_b = if l - u == 1 {
                KinshipTerm::ParentSibling {
                    role: role_of(upper, lower),
                    generations: 1,
                    extended: true,
                    gender: upper.person.gender,
                }
            } else {
                KinshipTerm::ExtendedElder {
                    gender: upper.person.gender,
                }
            };
            Resolution {
                a_calls_b,
                b_calls_a: KinshipTerm::Nibling {
                    extended: true,
                    gender: lower.person.gender,
                },
                relation: Relation::Extended,
            }
        }

        _ => Resolution::fallback(),
    }
}

/// Uncle/aunt role of `upper` as seen from `lower`. The side comes from
/// lower's branch; Bác vs Chú compares the two branch-points.
fn role_of(upper: &Lineage<'_, '_>, lower: &Lineage<'_, '_>) -> ParentSiblingRole {
    ParentSiblingRole::pick(
        lower.side(),
        upper.person.gender,
        is_senior(upper.branch_point(), lower.branch_point()),
    )
}
