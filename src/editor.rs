use iced::widget::canvas::Cache;
use iced::{Point, Size};
use tracing::{debug, info};

use crate::config::Config;
use crate::drag::{self, DragOutcome};
use crate::gesture::Gesture;
use crate::graph::{Graph, HitResult, Role};
use crate::link::{self, LinkOutcome};
use crate::scene::Scene;
use crate::store::{Connection, ConnectionStatus, ConnectionStore};

/// Pointer input forwarded by the canvas, in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub enum EditorMessage {
    PointerPressed { position: Point, canvas: Size },
    PointerMoved { position: Point, canvas: Size },
    /// `None` when the pointer was released outside the window.
    PointerReleased { position: Option<Point> },
}

/// Something the application shell has to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    AgentClicked,
}

/// Single owner of the graph, the connection store and the gesture state.
pub struct Editor {
    graph: Graph,
    store: ConnectionStore,
    gesture: Gesture,
    scene: Scene,
    config: Config,
    pub(crate) cache: Cache,
}

impl Editor {
    pub fn new(graph: Graph, config: &Config) -> Self {
        let mut editor = Self {
            graph,
            store: ConnectionStore::new(),
            gesture: Gesture::Idle,
            scene: Scene::default(),
            config: config.clone(),
            cache: Cache::new(),
        };
        editor.sync();
        editor
    }

    pub fn update(&mut self, message: EditorMessage) -> Option<EditorEvent> {
        match message {
            EditorMessage::PointerPressed { position, .. } => {
                self.pointer_pressed(position);
                None
            }
            EditorMessage::PointerMoved { position, canvas } => {
                self.pointer_moved(position, canvas);
                None
            }
            EditorMessage::PointerReleased { position } => self.pointer_released(position),
        }
    }

    fn pointer_pressed(&mut self, position: Point) {
        let claimed = match self.graph.hit_test(position) {
            HitResult::Port(port) => link::begin_link(&mut self.gesture, port, position),
            hit @ HitResult::Node(_) => {
                drag::begin_node_drag(&mut self.gesture, &self.graph, hit, position)
            }
            HitResult::None => false,
        };
        if claimed {
            self.sync();
        }
    }

    fn pointer_moved(&mut self, position: Point, canvas: Size) {
        match self.gesture {
            Gesture::DraggingNode { .. } => {
                if drag::update_node_drag(&mut self.gesture, &mut self.graph, position, canvas) {
                    self.sync();
                }
            }
            Gesture::DraggingLink { .. } => {
                let over = self.graph.input_port_at(position);
                if link::update_link(&mut self.gesture, position, over) {
                    self.sync();
                }
            }
            Gesture::Idle => {}
        }
    }

    fn pointer_released(&mut self, position: Option<Point>) -> Option<EditorEvent> {
        let mut committed = false;
        let event = match self.gesture {
            Gesture::DraggingNode { .. } => match drag::end_node_drag(&mut self.gesture) {
                Some(DragOutcome::Click(node)) if self.graph.role(node) == Some(Role::Agent) => {
                    Some(EditorEvent::AgentClicked)
                }
                Some(DragOutcome::Moved(node)) => {
                    debug!(node, "node drag ended");
                    None
                }
                _ => None,
            },
            Gesture::DraggingLink { .. } => {
                match link::finish_link(&mut self.gesture, &self.graph, &mut self.store, position) {
                    Some(LinkOutcome::Committed(connection)) => {
                        info!(source = connection.source, "tool linked to agent");
                        committed = true;
                    }
                    Some(LinkOutcome::Cancelled) => debug!("link cancelled"),
                    _ => {}
                }
                None
            }
            Gesture::Idle => None,
        };
        // Cleared whatever the outcome
        self.gesture = Gesture::Idle;
        self.sync();
        if committed {
            for link in self.scene.links() {
                debug!(path = %link.path.to_svg(), "link curve");
            }
        }
        event
    }

    /// Tool-selector shortcut: wire `tool` straight to the agent.
    pub fn select_tool(&mut self, tool: Role) {
        let source = self.graph.find_role(tool).filter(|n| n.role().is_tool());
        let (Some(source), Some(agent)) = (source, self.graph.agent()) else {
            return;
        };
        let connection = Connection::new(source.id(), agent.id());
        self.store.set(connection);
        info!(source = connection.source, "tool selected");
        self.sync();
    }

    pub fn disconnect(&mut self) {
        self.store.clear();
        info!("disconnected");
        self.sync();
    }

    /// Render/sync: rebuild the scene and invalidate the cached canvas layer.
    fn sync(&mut self) {
        self.scene.sync(&self.graph, &self.store, &self.gesture);
        self.cache.clear();
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_connected()
    }

    pub fn selected_tool(&self) -> Option<Role> {
        self.store.selected_tool(&self.graph)
    }

    pub fn status(&self) -> ConnectionStatus {
        self.store.status(&self.graph, &self.config)
    }

    pub fn label(&self, role: Role) -> &str {
        self.config.tool(role).map_or("Agent", |p| p.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PortDirection;
    use crate::layout::{initial_graph, AGENT_ID, TOOL_A_ID, TOOL_B_ID};
    use iced::Vector;

    const CANVAS: Size = Size::new(1000.0, 700.0);

    fn editor() -> Editor {
        Editor::new(initial_graph(), &Config::default())
    }

    fn port(editor: &Editor, node: u32, direction: PortDirection) -> Point {
        editor.graph().node(node).unwrap().port_position(direction)
    }

    fn press(editor: &mut Editor, position: Point) -> Option<EditorEvent> {
        editor.update(EditorMessage::PointerPressed { position, canvas: CANVAS })
    }

    fn drag_to(editor: &mut Editor, position: Point) {
        editor.update(EditorMessage::PointerMoved { position, canvas: CANVAS });
    }

    fn release(editor: &mut Editor, position: Point) -> Option<EditorEvent> {
        editor.update(EditorMessage::PointerReleased {
            position: Some(position),
        })
    }

    fn link_gesture(editor: &mut Editor, from: u32, to: u32) {
        let start = port(editor, from, PortDirection::Output);
        let end = port(editor, to, PortDirection::Input);
        press(editor, start);
        drag_to(editor, Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0));
        drag_to(editor, end);
        release(editor, end);
    }

    #[test]
    fn most_recent_tool_link_wins() {
        let mut editor = editor();
        link_gesture(&mut editor, TOOL_A_ID, AGENT_ID);
        assert_eq!(editor.store.current(), Some(Connection::new(TOOL_A_ID, AGENT_ID)));

        link_gesture(&mut editor, TOOL_B_ID, AGENT_ID);
        assert_eq!(editor.store.current(), Some(Connection::new(TOOL_B_ID, AGENT_ID)));
        assert_eq!(editor.scene().links().len(), 1);
        assert_eq!(editor.status().text(), "ToolB → Agent");
        assert!(editor.scene().is_selected(Role::ToolB));
        assert!(!editor.scene().is_selected(Role::ToolA));
    }

    #[test]
    fn committed_link_curve_joins_port_anchors() {
        let mut editor = editor();
        link_gesture(&mut editor, TOOL_B_ID, AGENT_ID);

        let expected = crate::geometry::curve_path(
            port(&editor, TOOL_B_ID, PortDirection::Output),
            port(&editor, AGENT_ID, PortDirection::Input),
        );
        assert_eq!(editor.scene().links()[0].path.to_svg(), expected.to_svg());
    }

    #[test]
    fn invalid_gestures_change_nothing() {
        let mut editor = editor();
        link_gesture(&mut editor, TOOL_A_ID, AGENT_ID);
        let before = editor.store.current();

        link_gesture(&mut editor, AGENT_ID, TOOL_B_ID);
        link_gesture(&mut editor, TOOL_B_ID, TOOL_A_ID);
        link_gesture(&mut editor, AGENT_ID, AGENT_ID);

        assert_eq!(editor.store.current(), before);
        assert!(editor.gesture().is_idle());
        assert!(editor.scene().temp_curve().is_none());
    }

    #[test]
    fn dragging_a_linked_node_moves_the_curve() {
        let mut editor = editor();
        link_gesture(&mut editor, TOOL_A_ID, AGENT_ID);

        let grab = editor.graph().node(AGENT_ID).unwrap().position + Vector::new(40.0, 30.0);
        press(&mut editor, grab);
        drag_to(&mut editor, grab + Vector::new(120.0, 90.0));

        let path = editor.scene().links()[0].path;
        assert_eq!(path.end, port(&editor, AGENT_ID, PortDirection::Input));
        assert_eq!(path.start, port(&editor, TOOL_A_ID, PortDirection::Output));
        assert!(editor.scene().is_dragging(AGENT_ID));

        release(&mut editor, grab + Vector::new(120.0, 90.0));
        assert!(!editor.scene().is_dragging(AGENT_ID));
        assert_eq!(
            editor.scene().links()[0].path.end,
            port(&editor, AGENT_ID, PortDirection::Input)
        );
    }

    #[test]
    fn drag_far_outside_stays_in_bounds() {
        let mut editor = editor();
        let grab = editor.graph().node(TOOL_B_ID).unwrap().position + Vector::new(10.0, 10.0);
        press(&mut editor, grab);
        drag_to(&mut editor, Point::new(-4000.0, 9000.0));
        release(&mut editor, Point::new(-4000.0, 9000.0));

        let node = editor.graph().node(TOOL_B_ID).unwrap();
        assert_eq!(node.position.x, 10.0);
        assert_eq!(node.position.y, CANVAS.height - node.size().height - 10.0);
    }

    #[test]
    fn selector_click_connects_and_selects() {
        let mut editor = editor();
        editor.select_tool(Role::ToolB);
        assert_eq!(editor.store.current(), Some(Connection::new(TOOL_B_ID, AGENT_ID)));
        assert_eq!(editor.scene().links().len(), 1);
        assert!(editor.scene().is_selected(Role::ToolB));

        // Re-selecting the same tool is a harmless no-op
        editor.select_tool(Role::ToolB);
        assert_eq!(editor.scene().links().len(), 1);
    }

    #[test]
    fn disconnect_clears_everything() {
        let mut editor = editor();
        editor.select_tool(Role::ToolA);
        editor.disconnect();
        assert!(!editor.is_connected());
        assert_eq!(editor.status().text(), "Not Connected");
        assert!(editor.scene().links().is_empty());
        assert_eq!(editor.selected_tool(), None);
    }

    #[test]
    fn agent_click_opens_but_agent_drag_does_not() {
        let mut editor = editor();
        let body = editor.graph().node(AGENT_ID).unwrap().position + Vector::new(60.0, 40.0);

        press(&mut editor, body);
        assert_eq!(release(&mut editor, body), Some(EditorEvent::AgentClicked));

        press(&mut editor, body);
        drag_to(&mut editor, body + Vector::new(50.0, 0.0));
        assert_eq!(release(&mut editor, body + Vector::new(50.0, 0.0)), None);

        let tool = editor.graph().node(TOOL_A_ID).unwrap().position + Vector::new(60.0, 40.0);
        press(&mut editor, tool);
        assert_eq!(release(&mut editor, tool), None);
    }

    #[test]
    fn release_outside_window_cancels_link() {
        let mut editor = editor();
        let start = port(&editor, TOOL_A_ID, PortDirection::Output);
        press(&mut editor, start);
        assert!(editor.scene().temp_curve().is_some());
        editor.update(EditorMessage::PointerReleased { position: None });
        assert!(editor.gesture().is_idle());
        assert!(editor.scene().temp_curve().is_none());
        assert!(!editor.is_connected());
    }

    #[test]
    fn moves_without_a_gesture_are_ignored() {
        let mut editor = editor();
        let before = editor.graph().node(TOOL_A_ID).unwrap().position;
        drag_to(&mut editor, Point::new(500.0, 500.0));
        assert_eq!(editor.graph().node(TOOL_A_ID).unwrap().position, before);
        assert!(editor.gesture().is_idle());
    }
}
