//! Kinship inference.
//!
//! Works out what two family members call each other. The pipeline:
//!
//! 1. walk both people's ancestry ([`AncestryMap`](crate::AncestryMap)),
//! 2. pick their lowest common ancestor,
//! 3. run the rule table on the two depths and branch paths,
//! 4. fall back to a spouse's blood line and rewrite for in-laws.
//!
//! [`KinshipEngine`] drives all of it.

mod engine;
mod in_law;
mod labels;
mod resolver;
mod term;

pub use engine::{compute_kinship, EngineConfig, KinshipEngine, KinshipPair, KinshipResult};
pub use in_law::to_in_law;
pub use labels::{TermLabels, Vietnamese};
pub use resolver::{resolve, Lineage, Resolution};
pub use term::{KinshipTerm, ParentSiblingRole, Relation, Side};

use giapha_core::Person;
use std::cmp::Ordering;

/// Orders two people of the same generation, senior first.
///
/// Birth order decides when both have one and they differ, then birth
/// year, then ID. The ID step keeps the order strict so that both
/// directions of a query agree.
pub fn seniority(a: &Person, b: &Person) -> Ordering {
    if let (Some(x), Some(y)) = (a.birth_order, b.birth_order) {
        if x != y {
            return x.cmp(&y);
        }
    }
    if let (Some(x), Some(y)) = (a.birth_year, b.birth_year) {
        if x != y {
            return x.cmp(&y);
        }
    }
    a.id.cmp(&b.id)
}

/// True if `a` is senior to `b`.
pub fn is_senior(a: &Person, b: &Person) -> bool {
    seniority(a, b) == Ordering::Less
}

#[cfg(test)]
mod tests {
    use super::*;
    use giapha_core::Gender;

    #[test]
    fn test_birth_order_beats_birth_year() {
        let a = Person::new("a", "A", Gender::Male)
            .with_birth_order(1)
            .with_birth_year(1990);
        let b = Person::new("b", "B", Gender::Male)
            .with_birth_order(2)
            .with_birth_year(1980);
        assert!(is_senior(&a, &b));
        assert!(!is_senior(&b, &a));
    }

    #[test]
    fn test_falls_back_to_year_then_id() {
        let a = Person::new("z", "A", Gender::Male).with_birth_year(1970);
        let b = Person::new("a", "B", Gender::Male)
            .with_birth_order(1)
            .with_birth_year(1975);
        assert!(is_senior(&a, &b));

        let c = Person::new("c", "C", Gender::Female);
        let d = Person::new("d", "D", Gender::Female);
        assert!(is_senior(&c, &d));
        assert!(!is_senior(&d, &c));
    }
}
