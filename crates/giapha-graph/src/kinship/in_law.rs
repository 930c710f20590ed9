//! In-law rewriting.
//!
//! When a person is only connected through their spouse, the blood
//! relative's term for that spouse is turned into the term for the person
//! who married in: a son becomes a daughter-in-law, an uncle's slot
//! becomes Thím or Mợ, and so on. "họ" survives the rewrite. The rewrite
//! works on tags only.

use super::term::KinshipTerm;
use giapha_core::Gender;

/// Rewrites `term` (what a blood relative calls the in-law's spouse) into
/// what the blood relative calls the in-law, given the in-law's gender.
pub fn to_in_law(term: KinshipTerm, gender: Gender) -> KinshipTerm {
    match term {
        KinshipTerm::Descendant { depth, .. } => KinshipTerm::ChildInLaw {
            depth,
            extended: false,
            gender,
        },
        KinshipTerm::Nibling { extended, .. } => KinshipTerm::ChildInLaw {
            depth: 2,
            extended,
            gender,
        },
        KinshipTerm::Sibling { elder, .. } => KinshipTerm::SiblingInLaw {
            elder,
            extended: false,
            gender,
        },
        KinshipTerm::Cousin { elder, .. } => KinshipTerm::SiblingInLaw {
            elder,
            extended: true,
            gender,
        },
        KinshipTerm::ParentSibling {
            role,
            generations,
            extended,
            ..
        } => KinshipTerm::ParentSiblingSpouse {
            role,
            generations,
            extended,
            gender,
        },
        KinshipTerm::Ancestor { depth: 1, .. } => KinshipTerm::StepParent { gender },
        KinshipTerm::Ancestor { depth, side, .. } => KinshipTerm::Ancestor {
            depth,
            side,
            gender,
        },
        KinshipTerm::ExtendedElder { .. } => KinshipTerm::ExtendedElder { gender },
        other => other,
    }
}
