use core::fmt;

use fnv::FnvHashMap;

use crate::roster::*;

/// A maximal set of students connected transitively by together constraints.
/// Derived fresh each run; membership is best-effort for the placer, not a
/// guarantee of co-location.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct TogetherGroup {
    members: Vec<StudentId>,
}

impl TogetherGroup {
    pub(crate) fn members(&self) -> &[StudentId] {
        &self.members
    }

    pub(crate) fn contains(&self, id: StudentId) -> bool {
        self.members.contains(&id)
    }
}

impl fmt::Debug for TogetherGroup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.members)
    }
}

/// Connected components over the together-constraint edges. Separate
/// constraints play no part here. Groups come out ordered by first
/// appearance in the constraint list, members likewise; students with no
/// together constraint appear in no group.
pub(crate) fn build_groups(constraints: &[Constraint]) -> Vec<TogetherGroup> {
    // Slot per component; merged-away slots become None and are compacted at
    // the end, keeping first-appearance order stable.
    let mut slots: Vec<Option<Vec<StudentId>>> = vec![];
    let mut slot_of: FnvHashMap<StudentId, usize> = FnvHashMap::default();

    for constraint in constraints {
        if constraint.kind() != ConstraintKind::Together {
            continue;
        }
        let (a, b) = constraint.pair();

        match (slot_of.get(&a).copied(), slot_of.get(&b).copied()) {
            (None, None) => {
                let ix = slots.len();
                slots.push(Some(vec![a, b]));
                slot_of.insert(a, ix);
                slot_of.insert(b, ix);
            }
            (Some(ix), None) => {
                slots[ix].as_mut().unwrap().push(b);
                slot_of.insert(b, ix);
            }
            (None, Some(ix)) => {
                slots[ix].as_mut().unwrap().push(a);
                slot_of.insert(a, ix);
            }
            (Some(ix_a), Some(ix_b)) => {
                if ix_a == ix_b {
                    continue;
                }
                // The edge bridges two components: fold the later one into
                // the earlier one
                let (keep, drop) = if ix_a < ix_b {
                    (ix_a, ix_b)
                } else {
                    (ix_b, ix_a)
                };
                let dropped = slots[drop].take().unwrap();
                for &id in &dropped {
                    slot_of.insert(id, keep);
                }
                slots[keep].as_mut().unwrap().extend(dropped);
            }
        }
    }

    slots
        .into_iter()
        .flatten()
        .map(|members| TogetherGroup { members })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn together(a: u32, b: u32) -> Constraint {
        Constraint::together(StudentId(a), StudentId(b))
    }

    fn separate(a: u32, b: u32) -> Constraint {
        Constraint::separate(StudentId(a), StudentId(b))
    }

    fn member_ids(group: &TogetherGroup) -> Vec<u32> {
        group.members().iter().map(|id| id.0).collect_vec()
    }

    #[test]
    fn test_chain_builds_one_group() {
        let groups = build_groups(&[together(0, 1), together(1, 2), together(2, 3)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disjoint_pairs_stay_apart() {
        let groups = build_groups(&[together(0, 1), together(5, 6)]);
        assert_eq!(groups.len(), 2);
        assert_eq!(member_ids(&groups[0]), vec![0, 1]);
        assert_eq!(member_ids(&groups[1]), vec![5, 6]);
    }

    #[test]
    fn test_bridge_edge_merges_components() {
        // Two components form first, then an edge joins them; the later
        // component folds into the earlier one
        let groups = build_groups(&[together(0, 1), together(5, 6), together(6, 1)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![0, 1, 5, 6]);
    }

    #[test]
    fn test_separate_edges_are_ignored() {
        let groups = build_groups(&[separate(0, 1), together(2, 3), separate(2, 4)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(member_ids(&groups[0]), vec![2, 3]);
    }

    #[test]
    fn test_no_together_constraints_no_groups() {
        assert!(build_groups(&[separate(0, 1)]).is_empty());
        assert!(build_groups(&[]).is_empty());
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let constraints = vec![together(3, 1), together(8, 9), together(1, 4)];
        let first = build_groups(&constraints);
        let second = build_groups(&constraints);
        assert_eq!(first, second);
        assert_eq!(member_ids(&first[0]), vec![3, 1, 4]);
    }
}
