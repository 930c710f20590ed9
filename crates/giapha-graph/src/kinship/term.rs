//! Structured kinship terms.
//!
//! Every address term the engine produces is one of these tags. Display
//! strings are rendered separately by a [`TermLabels`](super::TermLabels)
//! implementation, and the in-law adapter rewrites tags, never strings.
//!
//! Gender fields always describe the person being addressed.

use giapha_core::{Gender, Person};
use serde::{Deserialize, Serialize};

/// Paternal (nội) or maternal (ngoại) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Paternal,
    Maternal,
}

impl Side {
    /// The side a branch belongs to, judged by the gender of the common
    /// ancestor's child on that branch.
    pub fn of_branch(branch_point: &Person) -> Self {
        if branch_point.gender.is_male() {
            Side::Paternal
        } else {
            Side::Maternal
        }
    }
}

/// A sibling of one's parent (or of a further ancestor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentSiblingRole {
    /// Bác: father's elder brother.
    PaternalElder,
    /// Chú: father's younger brother.
    PaternalYounger,
    /// Cô: father's sister.
    PaternalAunt,
    /// Dì: mother's sister.
    MaternalAunt,
    /// Cậu: mother's brother.
    MaternalUncle,
}

impl ParentSiblingRole {
    /// Picks the role for a relative of `gender` on `side`. `senior` says
    /// whether the relative's branch is senior to the speaker's; it only
    /// matters for a paternal male relative.
    pub fn pick(side: Side, gender: Gender, senior: bool) -> Self {
        match (side, gender.is_male()) {
            (Side::Paternal, true) if senior => ParentSiblingRole::PaternalElder,
            (Side::Paternal, true) => ParentSiblingRole::PaternalYounger,
            (Side::Paternal, false) => ParentSiblingRole::PaternalAunt,
            (Side::Maternal, true) => ParentSiblingRole::MaternalUncle,
            (Side::Maternal, false) => ParentSiblingRole::MaternalAunt,
        }
    }
}

/// What one person calls another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "term", rename_all = "snake_case")]
pub enum KinshipTerm {
    /// Vợ / Chồng.
    Spouse { gender: Gender },

    /// Cha/Mẹ, Ông/Bà nội|ngoại, Cụ, Kỵ, ...
    Ancestor {
        depth: usize,
        side: Side,
        gender: Gender,
    },

    /// Con, Cháu, Chắt, Chút, Chít + trai|gái.
    Descendant { depth: usize, gender: Gender },

    /// Anh trai, Chị gái, Em trai, Em gái.
    Sibling { elder: bool, gender: Gender },

    /// Bác, Chú, Cô, Dì, Cậu. `generations` is 1 for a parent's sibling,
    /// 2 for a grandparent's sibling (Ông chú), and so on. `extended`
    /// adds "họ".
    ParentSibling {
        role: ParentSiblingRole,
        generations: usize,
        extended: bool,
        gender: Gender,
    },

    /// Cháu, said by an uncle or aunt. `extended` gives Cháu họ.
    Nibling { extended: bool, gender: Gender },

    /// Anh họ, Chị họ, Em họ.
    Cousin { elder: bool, gender: Gender },

    /// Ông họ / Bà họ: two or more generations up on a side branch.
    ExtendedElder { gender: Gender },

    /// Con rể/dâu, Cháu rể/dâu, ... by descendant depth. `extended` adds
    /// "họ" for the spouse of a Cháu họ.
    ChildInLaw {
        depth: usize,
        extended: bool,
        gender: Gender,
    },

    /// Anh rể, Chị dâu, Em rể, Em dâu. `extended` adds "họ" for a
    /// cousin's spouse.
    SiblingInLaw {
        elder: bool,
        extended: bool,
        gender: Gender,
    },

    /// Thím, Mợ, Dượng, Bác gái, Bác trai.
    ParentSiblingSpouse {
        role: ParentSiblingRole,
        generations: usize,
        extended: bool,
        gender: Gender,
    },

    /// Cha dượng / Mẹ kế.
    StepParent { gender: Gender },

    /// Họ hàng: related, but outside the rule table.
    Relative,

    /// Người dưng: no relation found.
    Stranger,
}

impl KinshipTerm {
    /// True for the terms only the in-law adapter produces.
    pub fn is_in_law(&self) -> bool {
        matches!(
            self,
            KinshipTerm::ChildInLaw { .. }
                | KinshipTerm::SiblingInLaw { .. }
                | KinshipTerm::ParentSiblingSpouse { .. }
                | KinshipTerm::StepParent { .. }
        )
    }
}

/// The kind of relationship a result describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "relation", rename_all = "snake_case")]
pub enum Relation {
    Spouses,
    /// Direct line, `generations` apart.
    Lineal { generations: usize },
    Siblings,
    /// Uncle/aunt and nephew/niece, at any height.
    ParentSibling,
    Cousins,
    /// Side branches across generations.
    Extended,
    Relative,
    Unrelated,
}
