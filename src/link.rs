use iced::Point;
use tracing::debug;

use crate::gesture::Gesture;
use crate::graph::{Graph, NodeKind, PortDirection, PortRef};
use crate::store::{Connection, ConnectionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Committed(Connection),
    /// Dropped on a port with the wrong role pairing.
    Rejected,
    /// Dropped away from any input port.
    Cancelled,
}

/// Start drawing a link from an output port.
pub fn begin_link(gesture: &mut Gesture, source: PortRef, pointer: Point) -> bool {
    if source.direction != PortDirection::Output || !gesture.is_idle() {
        return false;
    }
    *gesture = Gesture::DraggingLink {
        source,
        pointer,
        hovered: None,
    };
    true
}

/// Track the pointer and whichever input port it is over.
pub fn update_link(gesture: &mut Gesture, pointer: Point, over: Option<PortRef>) -> bool {
    let Gesture::DraggingLink {
        pointer: current,
        hovered,
        ..
    } = gesture
    else {
        return false;
    };
    *current = pointer;
    *hovered = over.filter(|port| port.direction == PortDirection::Input);
    true
}

/// Validate and install a link between `source` and `target`.
///
/// Only tool → agent links are accepted; anything else leaves the store
/// untouched.
pub fn complete_link(
    graph: &Graph,
    store: &mut ConnectionStore,
    source: PortRef,
    target: PortRef,
) -> LinkOutcome {
    if source.direction != PortDirection::Output || target.direction != PortDirection::Input {
        return LinkOutcome::Rejected;
    }
    let source_kind = graph.role(source.node).map(|r| r.kind());
    let target_kind = graph.role(target.node).map(|r| r.kind());
    if source_kind != Some(NodeKind::Tool) || target_kind != Some(NodeKind::Agent) {
        debug!(source = source.node, target = target.node, "link rejected");
        return LinkOutcome::Rejected;
    }

    store.remove_source(source.node);
    store.remove_target(target.node);
    let connection = Connection::new(source.node, target.node);
    store.set(connection);
    debug!(source = source.node, target = target.node, "link committed");
    LinkOutcome::Committed(connection)
}

/// Abandon the in-progress link. Never touches the store.
pub fn cancel_link(gesture: &mut Gesture) {
    if matches!(gesture, Gesture::DraggingLink { .. }) {
        *gesture = Gesture::Idle;
    }
}

/// Resolve a link gesture on pointer release at `pointer`.
pub fn finish_link(
    gesture: &mut Gesture,
    graph: &Graph,
    store: &mut ConnectionStore,
    pointer: Option<Point>,
) -> Option<LinkOutcome> {
    let Gesture::DraggingLink { source, .. } = *gesture else {
        return None;
    };

    let target = pointer.and_then(|p| graph.input_port_at(p));
    let outcome = match target {
        Some(target) => complete_link(graph, store, source, target),
        None => LinkOutcome::Cancelled,
    };
    cancel_link(gesture);
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{initial_graph, AGENT_ID, TOOL_A_ID, TOOL_B_ID};

    #[test]
    fn tool_to_agent_is_committed() {
        let graph = initial_graph();
        let mut store = ConnectionStore::new();
        let source = PortRef::output(TOOL_A_ID);
        let outcome = complete_link(&graph, &mut store, source, PortRef::input(AGENT_ID));
        assert_eq!(outcome, LinkOutcome::Committed(Connection::new(TOOL_A_ID, AGENT_ID)));
        assert_eq!(store.current(), Some(Connection::new(TOOL_A_ID, AGENT_ID)));
    }

    #[test]
    fn second_tool_evicts_first() {
        let graph = initial_graph();
        let mut store = ConnectionStore::new();
        complete_link(&graph, &mut store, PortRef::output(TOOL_A_ID), PortRef::input(AGENT_ID));
        complete_link(&graph, &mut store, PortRef::output(TOOL_B_ID), PortRef::input(AGENT_ID));
        assert_eq!(store.iter().count(), 1);
        assert_eq!(store.current(), Some(Connection::new(TOOL_B_ID, AGENT_ID)));
    }

    #[test]
    fn wrong_pairings_leave_store_unchanged() {
        let graph = initial_graph();
        let mut store = ConnectionStore::new();
        store.set(Connection::new(TOOL_A_ID, AGENT_ID));

        let attempts = [
            (PortRef::output(AGENT_ID), PortRef::input(TOOL_A_ID)),
            (PortRef::output(TOOL_A_ID), PortRef::input(TOOL_B_ID)),
            (PortRef::output(TOOL_B_ID), PortRef::input(TOOL_B_ID)),
            (PortRef::output(AGENT_ID), PortRef::input(AGENT_ID)),
            (PortRef::input(TOOL_B_ID), PortRef::input(AGENT_ID)),
            (PortRef::output(99), PortRef::input(AGENT_ID)),
        ];
        for (source, target) in attempts {
            assert_eq!(complete_link(&graph, &mut store, source, target), LinkOutcome::Rejected);
            assert_eq!(store.current(), Some(Connection::new(TOOL_A_ID, AGENT_ID)));
        }
    }

    #[test]
    fn only_output_ports_start_links() {
        let mut gesture = Gesture::Idle;
        assert!(!begin_link(&mut gesture, PortRef::input(AGENT_ID), Point::ORIGIN));
        assert!(begin_link(&mut gesture, PortRef::output(TOOL_A_ID), Point::ORIGIN));
        // Already linking
        assert!(!begin_link(&mut gesture, PortRef::output(TOOL_B_ID), Point::ORIGIN));
    }

    #[test]
    fn release_in_empty_space_cancels() {
        let graph = initial_graph();
        let mut store = ConnectionStore::new();
        let mut gesture = Gesture::Idle;
        begin_link(&mut gesture, PortRef::output(TOOL_A_ID), Point::ORIGIN);
        update_link(&mut gesture, Point::new(800.0, 500.0), None);

        let outcome = finish_link(&mut gesture, &graph, &mut store, Some(Point::new(800.0, 500.0)));
        assert_eq!(outcome, Some(LinkOutcome::Cancelled));
        assert!(gesture.is_idle());
        assert!(!store.is_connected());
    }

    #[test]
    fn hover_ignores_output_ports() {
        let mut gesture = Gesture::Idle;
        begin_link(&mut gesture, PortRef::output(TOOL_A_ID), Point::ORIGIN);
        update_link(&mut gesture, Point::new(1.0, 1.0), Some(PortRef::output(TOOL_B_ID)));
        assert!(matches!(gesture, Gesture::DraggingLink { hovered: None, .. }));
        update_link(&mut gesture, Point::new(2.0, 2.0), Some(PortRef::input(AGENT_ID)));
        assert!(matches!(
            gesture,
            Gesture::DraggingLink { hovered: Some(p), .. } if p == PortRef::input(AGENT_ID)
        ));
    }
}
