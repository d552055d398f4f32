use iced::{Point, Rectangle, Size};

use crate::geometry;

pub const NODE_HEADER_HEIGHT: f32 = 28.0;
pub const PORT_RADIUS: f32 = 6.0;
/// Ports are easier to grab than they look.
pub const PORT_HIT_RADIUS: f32 = 15.0;

pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    ToolA,
    ToolB,
    Agent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Tool,
    Agent,
}

impl Role {
    pub const TOOLS: [Role; 2] = [Role::ToolA, Role::ToolB];

    pub fn kind(self) -> NodeKind {
        match self {
            Role::ToolA | Role::ToolB => NodeKind::Tool,
            Role::Agent => NodeKind::Agent,
        }
    }

    pub fn is_tool(self) -> bool {
        self.kind() == NodeKind::Tool
    }

    /// Rendered bounds of a node with this role.
    pub fn size(self) -> Size {
        match self {
            Role::ToolA | Role::ToolB => Size::new(180.0, 84.0),
            Role::Agent => Size::new(200.0, 100.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    role: Role,
    pub position: Point,
}

impl Node {
    pub fn new(id: NodeId, role: Role, position: Point) -> Self {
        Self { id, role, position }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn size(&self) -> Size {
        self.role.size()
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position, self.size())
    }

    /// Centre of the given port, on the node's left or right edge.
    pub fn port_position(&self, direction: PortDirection) -> Point {
        geometry::anchor(self.port_rect(direction))
    }

    pub fn port_rect(&self, direction: PortDirection) -> Rectangle {
        let size = self.size();
        let x = match direction {
            PortDirection::Input => self.position.x,
            PortDirection::Output => self.position.x + size.width,
        };
        let y = self.position.y + size.height / 2.0;
        Rectangle::new(
            Point::new(x - PORT_RADIUS, y - PORT_RADIUS),
            Size::new(PORT_RADIUS * 2.0, PORT_RADIUS * 2.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub node: NodeId,
    pub direction: PortDirection,
}

impl PortRef {
    pub fn input(node: NodeId) -> Self {
        Self {
            node,
            direction: PortDirection::Input,
        }
    }

    pub fn output(node: NodeId) -> Self {
        Self {
            node,
            direction: PortDirection::Output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    None,
    Node(NodeId),
    Port(PortRef),
}

/// The nodes on the canvas, in draw order (last is topmost).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.node(id).map(Node::role)
    }

    pub fn find_role(&self, role: Role) -> Option<&Node> {
        self.nodes.iter().find(|n| n.role == role)
    }

    pub fn agent(&self) -> Option<&Node> {
        self.find_role(Role::Agent)
    }

    pub fn port_position(&self, port: PortRef) -> Option<Point> {
        self.node(port.node).map(|n| n.port_position(port.direction))
    }

    pub fn hit_test(&self, point: Point) -> HitResult {
        // Topmost node first; its ports win over its body since they may
        // stick out past the edge.
        for node in self.nodes.iter().rev() {
            for direction in [PortDirection::Output, PortDirection::Input] {
                if node.port_position(direction).distance(point) < PORT_HIT_RADIUS {
                    return HitResult::Port(PortRef {
                        node: node.id,
                        direction,
                    });
                }
            }
            if node.bounds().contains(point) {
                return HitResult::Node(node.id);
            }
        }
        HitResult::None
    }

    /// The input port under `point`, if any.
    pub fn input_port_at(&self, point: Point) -> Option<PortRef> {
        match self.hit_test(point) {
            HitResult::Port(port) if port.direction == PortDirection::Input => Some(port),
            _ => None,
        }
    }
}
