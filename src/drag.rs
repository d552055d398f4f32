use iced::{Point, Size};

use crate::geometry;
use crate::gesture::Gesture;
use crate::graph::{Graph, HitResult, NodeId};

/// Pointer travel below which a press/release counts as a click.
pub const CLICK_TOLERANCE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Click(NodeId),
    Moved(NodeId),
}

/// Claim the gesture for a node body press. Port presses are left to the
/// link controller.
pub fn begin_node_drag(
    gesture: &mut Gesture,
    graph: &Graph,
    hit: HitResult,
    pointer: Point,
) -> bool {
    let HitResult::Node(id) = hit else {
        return false;
    };
    if !gesture.is_idle() {
        return false;
    }
    let Some(node) = graph.node(id) else {
        return false;
    };

    *gesture = Gesture::DraggingNode {
        node: id,
        offset: pointer - node.position,
        origin: pointer,
        moved: false,
    };
    true
}

/// Move the dragged node under the pointer, clamped inside the canvas.
/// Returns whether the node's position changed.
pub fn update_node_drag(
    gesture: &mut Gesture,
    graph: &mut Graph,
    pointer: Point,
    canvas: Size,
) -> bool {
    let Gesture::DraggingNode {
        node,
        offset,
        origin,
        moved,
    } = gesture
    else {
        return false;
    };

    if !*moved && pointer.distance(*origin) > CLICK_TOLERANCE {
        *moved = true;
    }

    let Some(node) = graph.node_mut(*node) else {
        return false;
    };
    let target = geometry::clamp_to_canvas(pointer - *offset, node.size(), canvas);
    if target == node.position {
        return false;
    }
    node.position = target;
    true
}

/// Settle the drag. Idempotent when no node drag is active.
pub fn end_node_drag(gesture: &mut Gesture) -> Option<DragOutcome> {
    let Gesture::DraggingNode { node, moved, .. } = *gesture else {
        return None;
    };
    *gesture = Gesture::Idle;
    Some(if moved {
        DragOutcome::Moved(node)
    } else {
        DragOutcome::Click(node)
    })
}
