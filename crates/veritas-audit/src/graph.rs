//! Coherence graph - claims as nodes, `depends_on` and `contradicts` as edges
//!
//! Cycle detection uses Tarjan's strongly-connected-component algorithm with
//! an explicit stack, so long reasoning chains cannot overflow the call stack.

use crate::{AuditError, DependencyCycle};
use std::collections::HashMap;
use veritas_domain::{Claim, ClaimId, CoherenceEdge, RelationType};

/// Graph over one snapshot's claims
///
/// Node indices follow snapshot order. Dependency adjacency lists are sorted
/// and deduplicated; contradiction pairs are unordered, deduplicated, and kept
/// ordered by (smaller id, larger id).
#[derive(Debug, Clone)]
pub struct CoherenceGraph {
    ids: Vec<ClaimId>,
    dependencies: Vec<Vec<usize>>,
    contradictions: Vec<(usize, usize)>,
}

impl CoherenceGraph {
    /// Build the graph, rejecting edges that cannot be placed in it
    ///
    /// # Errors
    ///
    /// [`AuditError::MalformedGraph`] if an edge references a claim that is
    /// not in `claims`, if a claim contradicts itself, or if two claims share
    /// an identifier.
    pub fn build(claims: &[Claim], relations: &[CoherenceEdge]) -> Result<Self, AuditError> {
        let mut index = HashMap::with_capacity(claims.len());
        for (i, claim) in claims.iter().enumerate() {
            if index.insert(claim.id.clone(), i).is_some() {
                return Err(AuditError::MalformedGraph {
                    from: claim.id.clone(),
                    to: claim.id.clone(),
                    reason: "claim identifier appears more than once".to_string(),
                });
            }
        }

        let ids: Vec<ClaimId> = claims.iter().map(|c| c.id.clone()).collect();
        let mut dependencies = vec![Vec::new(); ids.len()];
        let mut contradictions = Vec::new();

        for edge in relations {
            let (from, to) = match (index.get(&edge.from), index.get(&edge.to)) {
                (Some(&from), Some(&to)) => (from, to),
                (None, _) => return Err(dangling(edge, &edge.from)),
                (_, None) => return Err(dangling(edge, &edge.to)),
            };

            match edge.relation {
                RelationType::DependsOn => dependencies[from].push(to),
                RelationType::Contradicts => {
                    if from == to {
                        return Err(AuditError::MalformedGraph {
                            from: edge.from.clone(),
                            to: edge.to.clone(),
                            reason: "a claim cannot contradict itself".to_string(),
                        });
                    }
                    if ids[from] < ids[to] {
                        contradictions.push((from, to));
                    } else {
                        contradictions.push((to, from));
                    }
                }
            }
        }

        for targets in &mut dependencies {
            targets.sort_unstable();
            targets.dedup();
        }

        contradictions.sort_by(|a, b| (&ids[a.0], &ids[a.1]).cmp(&(&ids[b.0], &ids[b.1])));
        contradictions.dedup();

        tracing::debug!(
            "Built coherence graph: {} claims, {} dependency edges, {} contradictions",
            ids.len(),
            dependencies.iter().map(Vec::len).sum::<usize>(),
            contradictions.len()
        );

        Ok(Self {
            ids,
            dependencies,
            contradictions,
        })
    }

    /// Number of claims (nodes)
    pub fn claim_count(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct `depends_on` edges
    pub fn dependency_count(&self) -> usize {
        self.dependencies.iter().map(Vec::len).sum()
    }

    /// Number of distinct contradicting pairs
    pub fn contradiction_count(&self) -> usize {
        self.contradictions.len()
    }

    /// Claim identifier at a node index; indices come from this graph
    pub(crate) fn id(&self, index: usize) -> &ClaimId {
        &self.ids[index]
    }

    /// Contradicting pairs as (smaller id, larger id)
    pub fn contradictions(&self) -> impl Iterator<Item = (&ClaimId, &ClaimId)> {
        self.contradictions.iter().map(|&(a, b)| (&self.ids[a], &self.ids[b]))
    }

    pub(crate) fn contradiction_indices(&self) -> &[(usize, usize)] {
        &self.contradictions
    }

    /// Strongly connected components of the `depends_on` subgraph
    ///
    /// Every node appears in exactly one component. Components come out in
    /// reverse topological order, as Tarjan's algorithm emits them.
    pub(crate) fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.ids.len();
        let mut indices: Vec<Option<usize>> = vec![None; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack = Vec::new();
        let mut components = Vec::new();
        let mut next_index = 0usize;

        // (node, position of the next successor to visit)
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if indices[root].is_some() {
                continue;
            }

            indices[root] = Some(next_index);
            lowlink[root] = next_index;
            next_index += 1;
            stack.push(root);
            on_stack[root] = true;
            frames.push((root, 0));

            while let Some(frame) = frames.last_mut() {
                let v = frame.0;

                if let Some(&w) = self.dependencies[v].get(frame.1) {
                    frame.1 += 1;
                    match indices[w] {
                        None => {
                            indices[w] = Some(next_index);
                            lowlink[w] = next_index;
                            next_index += 1;
                            stack.push(w);
                            on_stack[w] = true;
                            frames.push((w, 0));
                        }
                        Some(w_index) if on_stack[w] => {
                            lowlink[v] = lowlink[v].min(w_index);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }

                if indices[v] == Some(lowlink[v]) {
                    let mut component = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    components.push(component);
                }
            }
        }

        components
    }

    /// Circular reasoning in the `depends_on` subgraph
    ///
    /// A cycle is a component with more than one claim, or a single claim
    /// that depends on itself. Each cycle is reported once with its members
    /// sorted; cycles are ordered by representative (smallest member).
    pub fn find_cycles(&self) -> Vec<DependencyCycle> {
        let mut cycles: Vec<DependencyCycle> = self
            .strongly_connected_components()
            .into_iter()
            .filter(|component| match component.as_slice() {
                [single] => self.dependencies[*single].binary_search(single).is_ok(),
                _ => true,
            })
            .map(|component| {
                let mut members: Vec<ClaimId> =
                    component.into_iter().map(|i| self.ids[i].clone()).collect();
                members.sort();
                DependencyCycle {
                    representative: members[0].clone(),
                    members,
                }
            })
            .collect();

        cycles.sort_by(|a, b| a.representative.cmp(&b.representative));
        cycles
    }
}

fn dangling(edge: &CoherenceEdge, missing: &ClaimId) -> AuditError {
    AuditError::MalformedGraph {
        from: edge.from.clone(),
        to: edge.to.clone(),
        reason: format!("claim {} does not exist", missing),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    proptest! {
        /// Property: SCCs partition the nodes, and cycle members never repeat
        #[test]
        fn test_components_partition_nodes(
            n in 1usize..20,
            raw_edges in prop::collection::vec((0usize..20, 0usize..20), 0..60),
        ) {
            let claims: Vec<Claim> = (0..n)
                .map(|i| Claim::new(ClaimId::new(format!("n{:02}", i)).unwrap(), "node"))
                .collect();
            let edges: Vec<CoherenceEdge> = raw_edges
                .into_iter()
                .filter(|&(a, b)| a < n && b < n)
                .map(|(a, b)| CoherenceEdge::depends_on(claims[a].id.clone(), claims[b].id.clone()))
                .collect();

            let graph = CoherenceGraph::build(&claims, &edges).unwrap();

            let mut seen = HashSet::new();
            for component in graph.strongly_connected_components() {
                for node in component {
                    prop_assert!(seen.insert(node));
                }
            }
            prop_assert_eq!(seen.len(), n);

            let mut in_cycle = HashSet::new();
            for cycle in graph.find_cycles() {
                prop_assert_eq!(&cycle.representative, &cycle.members[0]);
                for member in cycle.members {
                    prop_assert!(in_cycle.insert(member));
                }
            }
        }
    }
}
