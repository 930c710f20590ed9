//! Lineage recalculation.
//!
//! Recomputes every person's generation number and birth order from the
//! relationship edges alone. The stored values on [`Person`] are ignored,
//! so running the recalculation on its own output changes nothing.

use crate::builder::GraphBuilder;
use crate::collation::compare_names;
use crate::graph::{index_people, FamilyGraph, PersonLookup};
use giapha_core::{Person, Relationship};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Recomputed lineage fields for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageUpdate {
    pub id: String,
    /// 1 for founders. `None` when the person hangs off no root.
    pub generation: Option<u32>,
    /// 1-based rank among siblings. Always `None` for in-laws.
    pub birth_order: Option<u32>,
}

impl LineageUpdate {
    /// True if applying this update would change `person`.
    pub fn differs_from(&self, person: &Person) -> bool {
        person.generation != self.generation || person.birth_order != self.birth_order
    }

    /// Writes the recomputed fields onto `person`.
    pub fn apply_to(&self, person: &mut Person) {
        person.generation = self.generation;
        person.birth_order = self.birth_order;
    }
}

/// Recomputes generation and birth order for everyone in `people`.
///
/// The result has one entry per person, in input order.
pub fn recalculate_lineage(people: &[Person], relationships: &[Relationship]) -> Vec<LineageUpdate> {
    let lookup = index_people(people);
    let mut builder = GraphBuilder::new();
    builder.add_people(people).add_relationships(relationships);
    let graph = builder.build();

    let generations = assign_generations(people, &graph, &lookup);
    let birth_orders = assign_birth_orders(people, &graph, &lookup);

    people
        .iter()
        .map(|person| LineageUpdate {
            id: person.id.clone(),
            generation: generations.get(person.id.as_str()).copied(),
            birth_order: birth_orders.get(person.id.as_str()).copied(),
        })
        .collect()
}

fn has_known_parent(person: &Person, graph: &FamilyGraph, lookup: &PersonLookup<'_>) -> bool {
    graph
        .parents_of(&person.id)
        .into_iter()
        .any(|parent| lookup.contains_key(parent))
}

/// Generations by BFS from every founder, then in-laws take their spouse's.
fn assign_generations<'a>(
    people: &'a [Person],
    graph: &FamilyGraph,
    lookup: &PersonLookup<'a>,
) -> HashMap<&'a str, u32> {
    let mut generations: HashMap<&'a str, u32> = HashMap::new();

    let roots = people
        .iter()
        .filter(|person| !person.is_in_law && !has_known_parent(person, graph, lookup));

    for root in roots {
        if generations.contains_key(root.id.as_str()) {
            continue;
        }
        generations.insert(&root.id, 1);

        let mut queue: VecDeque<(&'a str, u32)> = VecDeque::from([(root.id.as_str(), 1)]);
        while let Some((id, generation)) = queue.pop_front() {
            for child_id in graph.children_of(id) {
                let Some(&child) = lookup.get(child_id) else {
                    continue;
                };
                if generations.contains_key(child.id.as_str()) {
                    continue;
                }
                generations.insert(&child.id, generation + 1);
                queue.push_back((&child.id, generation + 1));
            }
        }
    }

    // An in-law may marry someone who is itself an in-law; keep going
    // until nothing new is assigned.
    loop {
        let mut assigned = false;
        for person in people.iter().filter(|p| p.is_in_law) {
            if generations.contains_key(person.id.as_str()) {
                continue;
            }
            let adopted = graph
                .spouses_of(&person.id)
                .into_iter()
                .find_map(|spouse| generations.get(spouse).copied());
            if let Some(generation) = adopted {
                generations.insert(&person.id, generation);
                assigned = true;
            }
        }
        if !assigned {
            break;
        }
    }

    generations
}

/// Oldest first, unknown years last, then by name.
fn birth_sequence(a: &Person, b: &Person) -> Ordering {
    let by_year = match (a.birth_year, b.birth_year) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_year.then_with(|| compare_names(&a.full_name, &b.full_name))
}

/// Birth order per parent. A child listed under two parents keeps the
/// smaller of the two ranks.
fn assign_birth_orders<'a>(
    people: &'a [Person],
    graph: &FamilyGraph,
    lookup: &PersonLookup<'a>,
) -> HashMap<&'a str, u32> {
    let mut orders: HashMap<&'a str, u32> = HashMap::new();

    for parent in people {
        let mut children: Vec<&'a Person> = Vec::new();
        for child_id in graph.children_of(&parent.id) {
            let Some(&child) = lookup.get(child_id) else {
                continue;
            };
            if !children.iter().any(|seen| seen.id == child.id) {
                children.push(child);
            }
        }
        children.sort_by(|a, b| birth_sequence(a, b));

        for (rank, child) in children.iter().filter(|c| !c.is_in_law).enumerate() {
            let rank = rank as u32 + 1;
            orders
                .entry(child.id.as_str())
                .and_modify(|order| *order = (*order).min(rank))
                .or_insert(rank);
        }
    }

    orders
}

/// Summary of a recalculation against the stored values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageReport {
    pub updates: Vec<LineageUpdate>,
    /// How many people would change.
    pub changed: usize,
    /// People no founder reaches.
    pub detached: usize,
    #[serde(skip)]
    changed_mask: Vec<bool>,
}

impl LineageReport {
    /// Recalculates and compares against the stored fields of `people`.
    pub fn build(people: &[Person], relationships: &[Relationship]) -> Self {
        let updates = recalculate_lineage(people, relationships);
        let changed_mask: Vec<bool> = updates
            .iter()
            .zip(people)
            .map(|(update, person)| update.differs_from(person))
            .collect();
        let changed = changed_mask.iter().filter(|&&c| c).count();
        let detached = updates.iter().filter(|u| u.generation.is_none()).count();

        debug!(people = people.len(), changed, detached, "lineage recalculated");

        Self {
            updates,
            changed,
            detached,
            changed_mask,
        }
    }

    /// Only the updates that would change a stored record.
    pub fn changed_updates(&self) -> impl Iterator<Item = &LineageUpdate> {
        self.updates
            .iter()
            .zip(&self.changed_mask)
            .filter(|&(_, &changed)| changed)
            .map(|(update, _)| update)
    }

    pub fn is_clean(&self) -> bool {
        self.changed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giapha_core::Gender;

    fn family() -> (Vec<Person>, Vec<Relationship>) {
        let people = vec![
            Person::new("ong", "Nguyễn Văn Ông", Gender::Male),
            Person::new("ba", "Trần Thị Bà", Gender::Female).in_law(),
            Person::new("bac", "Nguyễn Văn Bác", Gender::Male).with_birth_year(1950),
            Person::new("chu", "Nguyễn Văn Chú", Gender::Male).with_birth_year(1958),
            Person::new("co", "Nguyễn Thị Cô", Gender::Female).with_birth_year(1955),
            Person::new("thim", "Lê Thị Thím", Gender::Female).in_law(),
            Person::new("chau", "Nguyễn Văn Cháu", Gender::Male),
        ];
        let relationships = vec![
            Relationship::marriage("ong", "ba"),
            Relationship::parent_of("ong", "bac"),
            Relationship::parent_of("ong", "chu"),
            Relationship::parent_of("ong", "co"),
            Relationship::parent_of("ba", "bac"),
            Relationship::parent_of("ba", "chu"),
            Relationship::parent_of("ba", "co"),
            Relationship::marriage("chu", "thim"),
            Relationship::parent_of("chu", "chau"),
        ];
        (people, relationships)
    }

    fn by_id<'u>(updates: &'u [LineageUpdate], id: &str) -> &'u LineageUpdate {
        updates.iter().find(|u| u.id == id).unwrap()
    }

    #[test]
    fn test_generations() {
        let (people, relationships) = family();
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(updates.len(), people.len());
        assert_eq!(by_id(&updates, "ong").generation, Some(1));
        assert_eq!(by_id(&updates, "ba").generation, Some(1));
        assert_eq!(by_id(&updates, "chu").generation, Some(2));
        assert_eq!(by_id(&updates, "thim").generation, Some(2));
        assert_eq!(by_id(&updates, "chau").generation, Some(3));
    }

    #[test]
    fn test_birth_order_by_year() {
        let (people, relationships) = family();
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(by_id(&updates, "bac").birth_order, Some(1));
        assert_eq!(by_id(&updates, "co").birth_order, Some(2));
        assert_eq!(by_id(&updates, "chu").birth_order, Some(3));
        assert_eq!(by_id(&updates, "chau").birth_order, Some(1));
        assert_eq!(by_id(&updates, "ong").birth_order, None);
    }

    #[test]
    fn test_in_laws_get_no_birth_order() {
        let (people, relationships) = family();
        let updates = recalculate_lineage(&people, &relationships);

        for update in &updates {
            let person = people.iter().find(|p| p.id == update.id).unwrap();
            if person.is_in_law {
                assert_eq!(update.birth_order, None, "{}", person.id);
            }
        }
    }

    #[test]
    fn test_unknown_years_sort_last_then_by_name() {
        let people = vec![
            Person::new("p", "Cha", Gender::Male),
            Person::new("x", "Đức", Gender::Male),
            Person::new("y", "Dũng", Gender::Male),
            Person::new("z", "An", Gender::Female).with_birth_year(2000),
        ];
        let relationships = vec![
            Relationship::parent_of("p", "x"),
            Relationship::parent_of("p", "y"),
            Relationship::parent_of("p", "z"),
        ];
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(by_id(&updates, "z").birth_order, Some(1));
        assert_eq!(by_id(&updates, "y").birth_order, Some(2));
        assert_eq!(by_id(&updates, "x").birth_order, Some(3));
    }

    #[test]
    fn test_dangling_and_duplicate_edges_are_ignored() {
        let people = vec![
            Person::new("p", "Cha", Gender::Male),
            Person::new("a", "An", Gender::Male),
        ];
        let relationships = vec![
            Relationship::parent_of("p", "ghost"),
            Relationship::parent_of("p", "a"),
            Relationship::adopted("p", "a"),
        ];
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(by_id(&updates, "a").birth_order, Some(1));
        assert_eq!(by_id(&updates, "a").generation, Some(2));
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let (mut people, relationships) = family();
        let first = recalculate_lineage(&people, &relationships);
        for (person, update) in people.iter_mut().zip(&first) {
            update.apply_to(person);
        }

        let second = recalculate_lineage(&people, &relationships);
        assert_eq!(first, second);

        let report = LineageReport::build(&people, &relationships);
        assert!(report.is_clean());
        assert_eq!(report.changed_updates().count(), 0);
    }

    #[test]
    fn test_report_counts_changes() {
        let (people, relationships) = family();
        let mut detached = people.clone();
        detached.push(Person::new("le", "Lẻ Loi", Gender::Female).in_law());

        let report = LineageReport::build(&detached, &relationships);
        assert_eq!(report.detached, 1);
        // Everyone but the lone in-law gets a generation they did not have.
        assert_eq!(report.changed, people.len());
        assert!(report.changed_updates().all(|u| u.id != "le"));
    }

    #[test]
    fn test_half_siblings_keep_their_best_rank() {
        let people = vec![
            Person::new("cha", "Nguyễn Văn Cha", Gender::Male),
            Person::new("me_ca", "Trần Thị Cả", Gender::Female).in_law(),
            Person::new("me_hai", "Lê Thị Hai", Gender::Female).in_law(),
            Person::new("an", "Nguyễn Văn An", Gender::Male).with_birth_year(1990),
            Person::new("binh", "Nguyễn Thị Bình", Gender::Female).with_birth_year(1995),
            Person::new("chi", "Nguyễn Thị Chi", Gender::Female).with_birth_year(2000),
        ];
        let relationships = vec![
            Relationship::marriage("cha", "me_ca"),
            Relationship::marriage("cha", "me_hai"),
            Relationship::parent_of("cha", "an"),
            Relationship::parent_of("me_ca", "an"),
            Relationship::parent_of("cha", "binh"),
            Relationship::parent_of("me_hai", "binh"),
            Relationship::parent_of("cha", "chi"),
            Relationship::parent_of("me_ca", "chi"),
        ];
        let updates = recalculate_lineage(&people, &relationships);

        // Father ranks them 1, 2, 3; each mother ranks only her own.
        assert_eq!(by_id(&updates, "an").birth_order, Some(1));
        assert_eq!(by_id(&updates, "binh").birth_order, Some(1));
        assert_eq!(by_id(&updates, "chi").birth_order, Some(2));
        assert_eq!(by_id(&updates, "me_hai").generation, Some(1));
    }

    #[test]
    fn test_in_law_chains_resolve_through_spouses() {
        let people = vec![
            // Listed before the spouse it depends on, so one pass is not enough.
            Person::new("chong_sau", "Phạm Văn Sau", Gender::Male).in_law(),
            Person::new("ong", "Nguyễn Văn Ông", Gender::Male),
            Person::new("con", "Nguyễn Văn Con", Gender::Male),
            Person::new("vo", "Lê Thị Vợ", Gender::Female).in_law(),
            Person::new("x", "Hoàng Văn Xa", Gender::Male).in_law(),
            Person::new("y", "Đinh Thị Ý", Gender::Female).in_law(),
        ];
        let relationships = vec![
            Relationship::parent_of("ong", "con"),
            Relationship::marriage("con", "vo"),
            Relationship::marriage("vo", "chong_sau"),
            Relationship::marriage("x", "y"),
        ];
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(by_id(&updates, "vo").generation, Some(2));
        assert_eq!(by_id(&updates, "chong_sau").generation, Some(2));
        // An in-law couple with no blood spouse never gets a generation.
        assert_eq!(by_id(&updates, "x").generation, None);
        assert_eq!(by_id(&updates, "y").generation, None);
    }

    #[test]
    fn test_stale_stored_values_are_reported() {
        let people = vec![
            Person::new("p", "Cha", Gender::Male).with_generation(1),
            Person::new("c", "Con", Gender::Male)
                .with_generation(1)
                .with_birth_order(1),
        ];
        let relationships = vec![Relationship::parent_of("p", "c")];

        let report = LineageReport::build(&people, &relationships);
        assert_eq!(report.changed, 1);
        let changed: Vec<_> = report.changed_updates().collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].id, "c");
        assert_eq!(changed[0].generation, Some(2));
    }

    #[test]
    fn test_name_ties_ignore_unicode_form() {
        let people = vec![
            Person::new("p", "Cha", Gender::Male),
            // "Ánh" with a combining acute accent.
            Person::new("x", "A\u{0301}nh", Gender::Female).with_birth_year(1990),
            Person::new("y", "Anh", Gender::Male).with_birth_year(1990),
            Person::new("z", "Bảo", Gender::Male).with_birth_year(1990),
        ];
        let relationships = vec![
            Relationship::parent_of("p", "x"),
            Relationship::parent_of("p", "y"),
            Relationship::parent_of("p", "z"),
        ];
        let updates = recalculate_lineage(&people, &relationships);

        assert_eq!(by_id(&updates, "y").birth_order, Some(1));
        assert_eq!(by_id(&updates, "x").birth_order, Some(2));
        assert_eq!(by_id(&updates, "z").birth_order, Some(3));
    }
}
