use std::collections::HashMap;

use crate::geometry::{self, CurvePath};
use crate::gesture::Gesture;
use crate::graph::{Graph, NodeId, PortDirection, PortRef, Role};
use crate::store::{Connection, ConnectionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortVisual {
    #[default]
    Idle,
    /// Source of the link being drawn.
    Active,
    HoveredWhileLinking,
    Connected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLink {
    pub connection: Connection,
    pub path: CurvePath,
}

/// Everything the canvas and the tool selector draw, derived from the
/// graph, the connection store and the current gesture.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    links: Vec<SceneLink>,
    temp: Option<CurvePath>,
    ports: HashMap<PortRef, PortVisual>,
    selected_tool: Option<Role>,
    dragging: Option<NodeId>,
}

impl Scene {
    /// Regenerate the scene from scratch.
    pub fn sync(&mut self, graph: &Graph, store: &ConnectionStore, gesture: &Gesture) {
        self.links.clear();
        self.ports.clear();

        for connection in store.iter() {
            let source = graph.port_position(PortRef::output(connection.source));
            let target = graph.port_position(PortRef::input(connection.target));
            if let (Some(start), Some(end)) = (source, target) {
                self.links.push(SceneLink {
                    connection: *connection,
                    path: geometry::curve_path(start, end),
                });
            }
        }

        self.temp = match gesture {
            Gesture::DraggingLink { source, pointer, hovered } => {
                self.ports.insert(*source, PortVisual::Active);
                if let Some(port) = hovered {
                    self.ports.insert(*port, PortVisual::HoveredWhileLinking);
                }
                graph
                    .port_position(*source)
                    .map(|start| geometry::curve_path(start, *pointer))
            }
            _ => None,
        };

        // Connected wins over the transient linking states
        for link in &self.links {
            self.ports
                .insert(PortRef::output(link.connection.source), PortVisual::Connected);
            self.ports
                .insert(PortRef::input(link.connection.target), PortVisual::Connected);
        }

        self.selected_tool = store.selected_tool(graph);
        self.dragging = gesture.dragged_node();
    }

    pub fn links(&self) -> &[SceneLink] {
        &self.links
    }

    pub fn temp_curve(&self) -> Option<&CurvePath> {
        self.temp.as_ref()
    }

    pub fn port_visual(&self, node: NodeId, direction: PortDirection) -> PortVisual {
        self.ports
            .get(&PortRef { node, direction })
            .copied()
            .unwrap_or_default()
    }

    pub fn is_selected(&self, tool: Role) -> bool {
        self.selected_tool == Some(tool)
    }

    pub fn is_dragging(&self, node: NodeId) -> bool {
        self.dragging == Some(node)
    }
}
