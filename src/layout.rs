use iced::Point;

use crate::graph::{Graph, Node, NodeId, Role};

const INITIAL_Y: f32 = 60.0;
const ROW_SPACING: f32 = 200.0;

// Tools feed in from the left, the agent sits to their right
const TOOL_X: f32 = 60.0;
const AGENT_X: f32 = 440.0;

pub const TOOL_A_ID: NodeId = 1;
pub const TOOL_B_ID: NodeId = 2;
pub const AGENT_ID: NodeId = 3;

/// Starting position of a node with the given role.
pub fn initial_position(role: Role) -> Point {
    match role {
        Role::ToolA => Point::new(TOOL_X, INITIAL_Y),
        Role::ToolB => Point::new(TOOL_X, INITIAL_Y + ROW_SPACING),
        // Vertically centred between the two tools
        Role::Agent => Point::new(
            AGENT_X,
            INITIAL_Y + (ROW_SPACING + Role::ToolA.size().height - Role::Agent.size().height) / 2.0,
        ),
    }
}

/// The fixed editor graph: two tools and one agent.
pub fn initial_graph() -> Graph {
    Graph::new(
        [(TOOL_A_ID, Role::ToolA), (TOOL_B_ID, Role::ToolB), (AGENT_ID, Role::Agent)]
            .into_iter()
            .map(|(id, role)| Node::new(id, role, initial_position(role)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_nodes_do_not_overlap() {
        let graph = initial_graph();
        let nodes = graph.nodes();
        assert_eq!(nodes.len(), 3);
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert!(a.bounds().intersection(&b.bounds()).is_none());
            }
        }
    }

    #[test]
    fn single_agent() {
        let graph = initial_graph();
        assert_eq!(graph.agent().map(|n| n.id()), Some(AGENT_ID));
        assert_eq!(graph.role(TOOL_B_ID), Some(Role::ToolB));
    }
}
