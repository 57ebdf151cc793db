//! Built-in expanders: the per-type/direction standard expander and the
//! per-step path description expander.

use std::sync::Arc;

use dendrite_api::{Direction, Expander, GraphView, Path, RelRef, RelTypeId};

use crate::error::{Error, Result};

/// Expands by relationship type and direction.
///
/// An empty type table expands every relationship in both directions.
/// All mutators are copy-on-write; the value itself is immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardExpander {
    types: Vec<(RelTypeId, Direction)>,
}

impl StandardExpander {
    /// Expander over all relationship types, both directions.
    pub fn all() -> Self {
        StandardExpander::default()
    }

    /// Expander over a single relationship type.
    pub fn for_type(rel_type: RelTypeId, direction: Direction) -> Self {
        StandardExpander::all().add(rel_type, direction)
    }

    /// A copy of this expander that additionally follows `rel_type` in
    /// `direction`.
    pub fn add(&self, rel_type: RelTypeId, direction: Direction) -> Self {
        let mut types = self.types.clone();
        types.push((rel_type, direction));
        StandardExpander { types }
    }
}

impl<G: GraphView> Expander<G> for StandardExpander {
    fn expand(&self, graph: &G, path: &dyn Path) -> Vec<RelRef> {
        let node = path.end_node();
        if self.types.is_empty() {
            graph.relationships(node, Direction::Both, None).collect()
        } else {
            self.types
                .iter()
                .flat_map(|&(rel_type, direction)| {
                    graph.relationships(node, direction, Some(rel_type))
                })
                .collect()
        }
    }

    fn reversed(&self) -> Arc<dyn Expander<G>> {
        Arc::new(StandardExpander {
            types: self
                .types
                .iter()
                .map(|&(rel_type, direction)| (rel_type, direction.reversed()))
                .collect(),
        })
    }
}

/// Describes a path as an ordered sequence of expansion steps: step `i`
/// supplies the candidate relationships at path length `i`, and a path
/// longer than the step list gets no candidates at all.
pub struct PathDescription<G: GraphView> {
    steps: Vec<Arc<dyn Expander<G>>>,
}

impl<G: GraphView + 'static> Default for PathDescription<G> {
    fn default() -> Self {
        PathDescription::new()
    }
}

impl<G: GraphView> Clone for PathDescription<G> {
    fn clone(&self) -> Self {
        PathDescription {
            steps: self.steps.clone(),
        }
    }
}

impl<G: GraphView + 'static> PathDescription<G> {
    pub fn new() -> Self {
        PathDescription { steps: Vec::new() }
    }

    /// A copy of this description with one more step, expanding
    /// `rel_type` in `direction`.
    pub fn step(&self, rel_type: RelTypeId, direction: Direction) -> Self {
        self.step_with(Arc::new(StandardExpander::for_type(rel_type, direction)))
    }

    /// A copy of this description with `expander` appended as a step.
    pub fn step_with(&self, expander: Arc<dyn Expander<G>>) -> Self {
        let mut steps = self.steps.clone();
        steps.push(expander);
        PathDescription { steps }
    }

    /// The aggregated expander. A description without steps is a
    /// configuration error.
    pub fn build(&self) -> Result<Arc<dyn Expander<G>>> {
        if self.steps.is_empty() {
            return Err(Error::EmptyPathDescription);
        }
        Ok(Arc::new(StepExpander {
            steps: self.steps.clone(),
        }))
    }
}

struct StepExpander<G: GraphView> {
    steps: Vec<Arc<dyn Expander<G>>>,
}

impl<G: GraphView + 'static> Expander<G> for StepExpander<G> {
    fn expand(&self, graph: &G, path: &dyn Path) -> Vec<RelRef> {
        match self.steps.get(path.length()) {
            Some(step) => step.expand(graph, path),
            None => Vec::new(),
        }
    }

    fn reversed(&self) -> Arc<dyn Expander<G>> {
        let mut steps: Vec<Arc<dyn Expander<G>>> =
            self.steps.iter().map(|step| step.reversed()).collect();
        steps.reverse();
        Arc::new(StepExpander { steps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathData;
    use crate::testgraph::TestGraph;

    #[test]
    fn reversed_flips_every_direction() {
        let expander = StandardExpander::all()
            .add(1, Direction::Outgoing)
            .add(2, Direction::Both);
        let reversed = <StandardExpander as Expander<TestGraph>>::reversed(&expander);

        let mut graph = TestGraph::new();
        let (a, b, c) = (graph.node(), graph.node(), graph.node());
        graph.edge(a, b, 1);
        graph.edge(c, a, 2);

        // Forward from a: outgoing :1 plus both-ways :2.
        let forward = expander.expand(&graph, &PathData::single(a));
        assert_eq!(forward.len(), 2);
        // Reversed from b: the :1 relationship is now seen incoming.
        let back = reversed.expand(&graph, &PathData::single(b));
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].other_node(b), a);
    }

    #[test]
    fn steps_apply_per_path_length() {
        let mut graph = TestGraph::new();
        let (a, b, c) = (graph.node(), graph.node(), graph.node());
        let ab = graph.edge(a, b, 1);
        graph.edge(b, c, 2);

        let description: PathDescription<TestGraph> = PathDescription::new()
            .step(1, Direction::Outgoing)
            .step(2, Direction::Outgoing);
        let expander = description.build().unwrap();

        let at_a = PathData::single(a);
        assert_eq!(expander.expand(&graph, &at_a).len(), 1);

        // At length 1 only step two applies; the :1 relationship from b is
        // not offered.
        let at_b = PathData::from_segments(vec![a, b], vec![ab]);
        let rels = expander.expand(&graph, &at_b);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].rel_type, 2);
    }

    #[test]
    fn past_the_last_step_nothing_expands() {
        let mut graph = TestGraph::new();
        let (a, b, c) = (graph.node(), graph.node(), graph.node());
        let ab = graph.edge(a, b, 1);
        let bc = graph.edge(b, c, 1);
        graph.edge(c, a, 1);

        let description: PathDescription<TestGraph> = PathDescription::new()
            .step(1, Direction::Outgoing)
            .step(1, Direction::Outgoing);
        let expander = description.build().unwrap();
        let at_c = PathData::from_segments(vec![a, b, c], vec![ab, bc]);
        assert!(expander.expand(&graph, &at_c).is_empty());
    }

    #[test]
    fn reversed_steps_run_backwards() {
        let mut graph = TestGraph::new();
        let (a, b, c) = (graph.node(), graph.node(), graph.node());
        graph.edge(a, b, 1);
        let bc = graph.edge(b, c, 2);

        let description: PathDescription<TestGraph> = PathDescription::new()
            .step(1, Direction::Outgoing)
            .step(2, Direction::Outgoing);
        let reversed = description.build().unwrap().reversed();

        // First reversed step is step two, walked backwards from c.
        let at_c = PathData::single(c);
        let rels = reversed.expand(&graph, &at_c);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].rel_type, 2);
        assert_eq!(rels[0].other_node(c), b);

        let at_b = PathData::from_segments(vec![c, b], vec![bc]);
        let rels = reversed.expand(&graph, &at_b);
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].rel_type, 1);
        assert_eq!(rels[0].other_node(b), a);
    }

    #[test]
    fn empty_description_is_a_configuration_error() {
        let description: PathDescription<TestGraph> = PathDescription::new();
        assert!(matches!(
            description.build(),
            Err(Error::EmptyPathDescription)
        ));
    }
}
