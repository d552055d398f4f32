use iced::{Point, Vector};

use crate::graph::{NodeId, PortRef};

/// The pointer interaction currently in progress.
///
/// Node and link drags bind to disjoint press targets but share the same
/// move/release stream, so every handler matches on this first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    DraggingNode {
        node: NodeId,
        /// Pointer position relative to the node's top-left at press time.
        offset: Vector,
        origin: Point,
        moved: bool,
    },
    DraggingLink {
        source: PortRef,
        pointer: Point,
        hovered: Option<PortRef>,
    },
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        match self {
            Gesture::DraggingNode { node, .. } => Some(*node),
            _ => None,
        }
    }
}
