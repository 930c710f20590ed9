//! Display strings for kinship terms.
//!
//! The resolver works purely on [`KinshipTerm`] tags. Turning them into
//! words is the job of a [`TermLabels`] implementation; [`Vietnamese`] is
//! the one the engine uses by default.

use super::term::{KinshipTerm, ParentSiblingRole, Relation, Side};
use giapha_core::{Gender, Person};

/// Descendant titles by depth, starting at depth 1.
const DESCENDANT_TITLES: [&str; 5] = ["Con", "Cháu", "Chắt", "Chút", "Chít"];

/// Ancestor titles from depth 3 on. Depth 1 and 2 have their own words.
const ANCESTOR_TITLES: [&str; 2] = ["Cụ", "Kỵ"];

/// Renders kinship tags as words.
pub trait TermLabels {
    /// The address term itself.
    fn term(&self, term: &KinshipTerm) -> String;

    /// A short description of the relationship.
    fn relation(&self, relation: Relation, via_marriage: bool) -> String;

    /// Path sentence: how far `person` is from the common ancestor.
    fn generations_from(&self, person: &Person, ancestor: &Person, depth: usize) -> String;

    /// Path sentence: `person` is married to `spouse`.
    fn married_to(&self, person: &Person, spouse: &Person) -> String;
}

/// Vietnamese kinship vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vietnamese;

fn gendered(gender: Gender, male: &'static str, female: &'static str) -> &'static str {
    if gender.is_male() {
        male
    } else {
        female
    }
}

fn side_word(side: Side) -> &'static str {
    match side {
        Side::Paternal => "nội",
        Side::Maternal => "ngoại",
    }
}

fn descendant_title(depth: usize) -> &'static str {
    let index = depth.clamp(1, DESCENDANT_TITLES.len()) - 1;
    DESCENDANT_TITLES[index]
}

fn role_word(role: ParentSiblingRole) -> &'static str {
    match role {
        ParentSiblingRole::PaternalElder => "Bác",
        ParentSiblingRole::PaternalYounger => "Chú",
        ParentSiblingRole::PaternalAunt => "Cô",
        ParentSiblingRole::MaternalAunt => "Dì",
        ParentSiblingRole::MaternalUncle => "Cậu",
    }
}

fn spouse_of_role_word(role: ParentSiblingRole, gender: Gender) -> &'static str {
    match role {
        ParentSiblingRole::PaternalElder => gendered(gender, "Bác trai", "Bác gái"),
        ParentSiblingRole::PaternalYounger | ParentSiblingRole::PaternalAunt => {
            gendered(gender, "Dượng", "Thím")
        }
        ParentSiblingRole::MaternalUncle | ParentSiblingRole::MaternalAunt => {
            gendered(gender, "Dượng", "Mợ")
        }
    }
}

/// Prepends generation prefixes to an uncle/aunt word: Ông/Bà for a
/// grandparent's sibling, then Cụ, then Kỵ.
fn with_generation_prefix(word: &str, generations: usize, gender: Gender, extended: bool) -> String {
    let label = match generations {
        0 | 1 => word.to_string(),
        2 => format!("{} {}", gendered(gender, "Ông", "Bà"), word.to_lowercase()),
        n => format!(
            "{} {} {}",
            ANCESTOR_TITLES[(n - 3).min(ANCESTOR_TITLES.len() - 1)],
            gendered(gender, "ông", "bà"),
            word.to_lowercase()
        ),
    };
    with_ho(label, extended)
}

fn with_ho(mut label: String, extended: bool) -> String {
    if extended {
        label.push_str(" họ");
    }
    label
}

impl Vietnamese {
    fn ancestor(depth: usize, side: Side, gender: Gender) -> String {
        match depth {
            0 | 1 => gendered(gender, "Cha", "Mẹ").to_string(),
            2 => format!("{} {}", gendered(gender, "Ông", "Bà"), side_word(side)),
            3 | 4 => format!(
                "{} {} {}",
                ANCESTOR_TITLES[depth - 3],
                gendered(gender, "ông", "bà"),
                side_word(side)
            ),
            _ => format!(
                "Tổ {} {} (đời {})",
                gendered(gender, "ông", "bà"),
                side_word(side),
                depth
            ),
        }
    }

    fn descendant(depth: usize, gender: Gender) -> String {
        let label = format!("{} {}", descendant_title(depth), gendered(gender, "trai", "gái"));
        if depth > DESCENDANT_TITLES.len() {
            format!("{} (đời {})", label, depth)
        } else {
            label
        }
    }
}

impl TermLabels for Vietnamese {
    fn term(&self, term: &KinshipTerm) -> String {
        match *term {
            KinshipTerm::Spouse { gender } => gendered(gender, "Chồng", "Vợ").to_string(),
            KinshipTerm::Ancestor {
                depth,
                side,
                gender,
            } => Self::ancestor(depth, side, gender),
            KinshipTerm::Descendant { depth, gender } => Self::descendant(depth, gender),
            KinshipTerm::Sibling { elder, gender } => {
                let word = if elder {
                    gendered(gender, "Anh trai", "Chị gái")
                } else {
                    gendered(gender, "Em trai", "Em gái")
                };
                word.to_string()
            }
            KinshipTerm::ParentSibling {
                role,
                generations,
                extended,
                gender,
            } => with_generation_prefix(role_word(role), generations, gender, extended),
            KinshipTerm::Nibling { extended, gender } => {
                if extended {
                    "Cháu họ".to_string()
                } else {
                    gendered(gender, "Cháu trai", "Cháu gái").to_string()
                }
            }
            KinshipTerm::Cousin { elder, gender } => {
                if elder {
                    gendered(gender, "Anh họ", "Chị họ").to_string()
                } else {
                    "Em họ".to_string()
                }
            }
            KinshipTerm::ExtendedElder { gender } => gendered(gender, "Ông họ", "Bà họ").to_string(),
            KinshipTerm::ChildInLaw {
                depth,
                extended,
                gender,
            } => with_ho(
                format!("{} {}", descendant_title(depth), gendered(gender, "rể", "dâu")),
                extended,
            ),
            KinshipTerm::SiblingInLaw {
                elder,
                extended,
                gender,
            } => {
                let word = if elder {
                    gendered(gender, "Anh rể", "Chị dâu")
                } else {
                    gendered(gender, "Em rể", "Em dâu")
                };
                with_ho(word.to_string(), extended)
            }
            KinshipTerm::ParentSiblingSpouse {
                role,
                generations,
                extended,
                gender,
            } => with_generation_prefix(
                spouse_of_role_word(role, gender),
                generations,
                gender,
                extended,
            ),
            KinshipTerm::StepParent { gender } => {
                gendered(gender, "Cha dượng", "Mẹ kế").to_string()
            }
            KinshipTerm::Relative => "Họ hàng".to_string(),
            KinshipTerm::Stranger => "Người dưng".to_string(),
        }
    }

    fn relation(&self, relation: Relation, via_marriage: bool) -> String {
        let base = match relation {
            Relation::Spouses => "Vợ chồng".to_string(),
            Relation::Lineal { generations } => format!("Quan hệ trực hệ ({} đời)", generations),
            Relation::Siblings => "Anh chị em ruột".to_string(),
            Relation::ParentSibling => "Quan hệ chú bác cô dì và cháu".to_string(),
            Relation::Cousins => "Anh chị em họ".to_string(),
            Relation::Extended => "Họ hàng khác thế hệ".to_string(),
            Relation::Relative => "Quan hệ họ hàng".to_string(),
            Relation::Unrelated => "Không có quan hệ họ hàng".to_string(),
        };
        if via_marriage {
            format!("{} (qua hôn nhân)", base)
        } else {
            base
        }
    }

    fn generations_from(&self, person: &Person, ancestor: &Person, depth: usize) -> String {
        if depth == 0 {
            format!("{} là tổ tiên chung.", person.full_name)
        } else {
            format!(
                "{} cách tổ tiên chung {} {} đời.",
                person.full_name, ancestor.full_name, depth
            )
        }
    }

    fn married_to(&self, person: &Person, spouse: &Person) -> String {
        format!(
            "{} là {} của {}.",
            person.full_name,
            gendered(person.gender, "chồng", "vợ"),
            spouse.full_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(term: KinshipTerm) -> String {
        Vietnamese.term(&term)
    }

    #[test]
    fn test_ancestor_labels() {
        let grandpa = |depth, side| KinshipTerm::Ancestor {
            depth,
            side,
            gender: Gender::Male,
        };
        assert_eq!(label(grandpa(1, Side::Paternal)), "Cha");
        assert_eq!(label(grandpa(2, Side::Paternal)), "Ông nội");
        assert_eq!(label(grandpa(2, Side::Maternal)), "Ông ngoại");
        assert_eq!(label(grandpa(3, Side::Paternal)), "Cụ ông nội");
        assert_eq!(label(grandpa(4, Side::Maternal)), "Kỵ ông ngoại");
        assert_eq!(label(grandpa(6, Side::Paternal)), "Tổ ông nội (đời 6)");
        assert_eq!(
            label(KinshipTerm::Ancestor {
                depth: 1,
                side: Side::Maternal,
                gender: Gender::Female
            }),
            "Mẹ"
        );
    }

    #[test]
    fn test_descendant_labels() {
        let child = |depth, gender| KinshipTerm::Descendant { depth, gender };
        assert_eq!(label(child(1, Gender::Male)), "Con trai");
        assert_eq!(label(child(2, Gender::Female)), "Cháu gái");
        assert_eq!(label(child(3, Gender::Male)), "Chắt trai");
        assert_eq!(label(child(7, Gender::Other)), "Chít gái (đời 7)");
    }

    #[test]
    fn test_parent_sibling_prefixes() {
        let uncle = |generations, extended| KinshipTerm::ParentSibling {
            role: ParentSiblingRole::PaternalYounger,
            generations,
            extended,
            gender: Gender::Male,
        };
        assert_eq!(label(uncle(1, false)), "Chú");
        assert_eq!(label(uncle(1, true)), "Chú họ");
        assert_eq!(label(uncle(2, false)), "Ông chú");
        assert_eq!(label(uncle(3, false)), "Cụ ông chú");
        assert_eq!(label(uncle(5, false)), "Kỵ ông chú");

        let aunt = KinshipTerm::ParentSibling {
            role: ParentSiblingRole::MaternalAunt,
            generations: 2,
            extended: false,
            gender: Gender::Female,
        };
        assert_eq!(label(aunt), "Bà dì");
    }

    #[test]
    fn test_in_law_labels() {
        assert_eq!(
            label(KinshipTerm::ChildInLaw {
                depth: 1,
                extended: false,
                gender: Gender::Female
            }),
            "Con dâu"
        );
        assert_eq!(
            label(KinshipTerm::SiblingInLaw {
                elder: true,
                extended: false,
                gender: Gender::Male
            }),
            "Anh rể"
        );
        assert_eq!(
            label(KinshipTerm::SiblingInLaw {
                elder: false,
                extended: true,
                gender: Gender::Female
            }),
            "Em dâu họ"
        );
        let spouse_of = |role, gender| KinshipTerm::ParentSiblingSpouse {
            role,
            generations: 1,
            extended: false,
            gender,
        };
        assert_eq!(label(spouse_of(ParentSiblingRole::PaternalYounger, Gender::Female)), "Thím");
        assert_eq!(label(spouse_of(ParentSiblingRole::MaternalUncle, Gender::Female)), "Mợ");
        assert_eq!(label(spouse_of(ParentSiblingRole::PaternalAunt, Gender::Male)), "Dượng");
        assert_eq!(label(spouse_of(ParentSiblingRole::PaternalElder, Gender::Female)), "Bác gái");
        assert_eq!(label(KinshipTerm::StepParent { gender: Gender::Female }), "Mẹ kế");
    }

    #[test]
    fn test_path_sentences() {
        let ong = Person::new("o", "Nguyễn Văn Tổ", Gender::Male);
        let chau = Person::new("c", "Nguyễn Văn Cháu", Gender::Male);
        let vo = Person::new("v", "Lê Thị Vợ", Gender::Female);

        assert_eq!(
            Vietnamese.generations_from(&chau, &ong, 2),
            "Nguyễn Văn Cháu cách tổ tiên chung Nguyễn Văn Tổ 2 đời."
        );
        assert_eq!(
            Vietnamese.generations_from(&ong, &ong, 0),
            "Nguyễn Văn Tổ là tổ tiên chung."
        );
        assert_eq!(
            Vietnamese.married_to(&vo, &chau),
            "Lê Thị Vợ là vợ của Nguyễn Văn Cháu."
        );
    }
}
