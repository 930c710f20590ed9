//! Upward ancestry walks.
//!
//! Breadth-first traversal through parent links, recording for every
//! ancestor how many generations up it sits and which descendants the walk
//! passed through to reach it. BFS explores by increasing depth, so the
//! first visit to an ancestor is always at its minimum depth.

use crate::graph::{FamilyGraph, PersonLookup};
use giapha_core::Person;
use std::collections::{HashMap, VecDeque};

/// An ancestor reached by the walk.
#[derive(Debug, Clone)]
pub struct Ancestor<'a> {
    pub person: &'a Person,

    /// Parent hops from the start. The start itself has depth 0.
    pub depth: usize,

    /// Descendants between this ancestor and the start, beginning with the
    /// ancestor's own child and ending with the start. `path.len() == depth`.
    pub path: Vec<&'a Person>,
}

impl<'a> Ancestor<'a> {
    /// The ancestor's child on the path, or the start itself at depth 0.
    pub fn branch_point(&self) -> &'a Person {
        self.path.first().copied().unwrap_or(self.person)
    }
}

/// Every ancestor of one person, in BFS order.
#[derive(Debug, Clone, Default)]
pub struct AncestryMap<'a> {
    entries: Vec<Ancestor<'a>>,
    index: HashMap<&'a str, usize>,
}

impl<'a> AncestryMap<'a> {
    /// Walks up from `start`.
    ///
    /// Parents missing from `people` are neither recorded nor climbed
    /// through. A start missing from `people` yields an empty map.
    pub fn walk(start: &str, graph: &FamilyGraph, people: &PersonLookup<'a>) -> Self {
        let mut map = Self::default();
        let Some(&start) = people.get(start) else {
            return map;
        };

        map.record(Ancestor {
            person: start,
            depth: 0,
            path: Vec::new(),
        });

        let mut queue = VecDeque::from([0usize]);
        while let Some(current) = queue.pop_front() {
            let (person, depth) = {
                let entry = &map.entries[current];
                (entry.person, entry.depth)
            };

            for parent_id in graph.parents_of(&person.id) {
                if map.index.contains_key(parent_id) {
                    continue;
                }
                let Some(&parent) = people.get(parent_id) else {
                    continue;
                };

                let mut path = Vec::with_capacity(depth + 1);
                path.push(person);
                path.extend(map.entries[current].path.iter().copied());

                queue.push_back(map.record(Ancestor {
                    person: parent,
                    depth: depth + 1,
                    path,
                }));
            }
        }

        map
    }

    fn record(&mut self, ancestor: Ancestor<'a>) -> usize {
        let position = self.entries.len();
        self.index.insert(ancestor.person.id.as_str(), position);
        self.entries.push(ancestor);
        position
    }

    /// Looks up an ancestor by ID.
    pub fn get(&self, id: &str) -> Option<&Ancestor<'a>> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates ancestors in the order the walk found them.
    pub fn iter(&self) -> impl Iterator<Item = &Ancestor<'a>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::index_people;
    use giapha_core::{Gender, Relationship};

    fn family() -> (Vec<Person>, Vec<Relationship>) {
        let people = vec![
            Person::new("ong_noi", "Ông Nội", Gender::Male),
            Person::new("ba_noi", "Bà Nội", Gender::Female),
            Person::new("ong_ngoai", "Ông Ngoại", Gender::Male),
            Person::new("cha", "Cha", Gender::Male),
            Person::new("me", "Mẹ", Gender::Female),
            Person::new("con", "Con", Gender::Male),
        ];
        let relationships = vec![
            Relationship::parent_of("ong_noi", "cha"),
            Relationship::parent_of("ba_noi", "cha"),
            Relationship::parent_of("ong_ngoai", "me"),
            Relationship::parent_of("cha", "con"),
            Relationship::parent_of("me", "con"),
        ];
        (people, relationships)
    }

    #[test]
    fn test_walk_records_depths_and_paths() {
        let (people, relationships) = family();
        let lookup = index_people(&people);
        let graph = FamilyGraph::from_relationships(&relationships);

        let map = AncestryMap::walk("con", &graph, &lookup);
        assert_eq!(map.len(), 6);

        let start = map.get("con").unwrap();
        assert_eq!(start.depth, 0);
        assert!(start.path.is_empty());

        let grandpa = map.get("ong_ngoai").unwrap();
        assert_eq!(grandpa.depth, 2);
        let path: Vec<&str> = grandpa.path.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(path, vec!["me", "con"]);
        assert_eq!(grandpa.branch_point().id, "me");
    }

    #[test]
    fn test_walk_is_breadth_first() {
        let (people, relationships) = family();
        let lookup = index_people(&people);
        let graph = FamilyGraph::from_relationships(&relationships);

        let order: Vec<&str> = AncestryMap::walk("con", &graph, &lookup)
            .iter()
            .map(|a| a.person.id.as_str())
            .collect();
        assert_eq!(order, vec!["con", "cha", "me", "ong_noi", "ba_noi", "ong_ngoai"]);
    }

    #[test]
    fn test_walk_skips_unknown_people() {
        let (people, mut relationships) = family();
        relationships.push(Relationship::parent_of("ghost", "con"));
        let lookup = index_people(&people);
        let graph = FamilyGraph::from_relationships(&relationships);

        let map = AncestryMap::walk("con", &graph, &lookup);
        assert!(!map.contains("ghost"));
        assert!(AncestryMap::walk("ghost", &graph, &lookup).is_empty());
    }

    #[test]
    fn test_cycle_no_infinite_loop() {
        let people = vec![
            Person::new("a", "A", Gender::Male),
            Person::new("b", "B", Gender::Male),
        ];
        let relationships = vec![
            Relationship::parent_of("a", "b"),
            Relationship::parent_of("b", "a"),
            Relationship::parent_of("a", "a"),
        ];
        let lookup = index_people(&people);
        let graph = FamilyGraph::from_relationships(&relationships);

        let map = AncestryMap::walk("a", &graph, &lookup);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("b").unwrap().depth, 1);
    }
}
