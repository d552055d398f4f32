use crate::config::Config;
use crate::graph::{Graph, NodeId, Role};

/// Directed edge from a tool's output to the agent's input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
}

impl Connection {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected { tool: Role, label: String },
    Disconnected,
}

impl ConnectionStatus {
    pub fn text(&self) -> &str {
        match self {
            ConnectionStatus::Connected { label, .. } => label,
            ConnectionStatus::Disconnected => "Not Connected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected { .. })
    }
}

/// Holds the single active connection.
///
/// Only one tool may feed the agent at a time; `set` replaces
/// whatever was there.
#[derive(Debug, Clone, Default)]
pub struct ConnectionStore {
    current: Option<Connection>,
}

impl ConnectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, connection: Connection) {
        self.current = Some(connection);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<Connection> {
        self.current
    }

    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    pub fn remove_source(&mut self, source: NodeId) {
        if self.current.is_some_and(|c| c.source == source) {
            self.current = None;
        }
    }

    pub fn remove_target(&mut self, target: NodeId) {
        if self.current.is_some_and(|c| c.target == target) {
            self.current = None;
        }
    }

    /// Connections as a slice-like iterator, for code that draws "every" link.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.current.iter()
    }

    /// The tool that currently feeds the agent.
    ///
    /// This is the tool selector's "chosen" entry; it is derived here on
    /// every read so selector and links can never disagree.
    pub fn selected_tool(&self, graph: &Graph) -> Option<Role> {
        self.current()
            .and_then(|c| graph.role(c.source))
            .filter(|role| role.is_tool())
    }

    pub fn status(&self, graph: &Graph, config: &Config) -> ConnectionStatus {
        match self.selected_tool(graph) {
            Some(tool) => {
                let name = config.tool(tool).map_or("Tool", |p| p.label.as_str());
                ConnectionStatus::Connected {
                    tool,
                    label: format!("{name} → Agent"),
                }
            }
            None => ConnectionStatus::Disconnected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{initial_graph, AGENT_ID, TOOL_A_ID, TOOL_B_ID};

    #[test]
    fn set_replaces_previous_connection() {
        let mut store = ConnectionStore::new();
        store.set(Connection::new(TOOL_A_ID, AGENT_ID));
        store.set(Connection::new(TOOL_B_ID, AGENT_ID));
        assert_eq!(store.iter().count(), 1);
        assert_eq!(store.current(), Some(Connection::new(TOOL_B_ID, AGENT_ID)));
    }

    #[test]
    fn remove_only_matching_endpoints() {
        let mut store = ConnectionStore::new();
        store.set(Connection::new(TOOL_A_ID, AGENT_ID));
        store.remove_source(TOOL_B_ID);
        assert!(store.is_connected());
        store.remove_target(AGENT_ID);
        assert!(!store.is_connected());
    }

    #[test]
    fn status_labels_follow_source_role() {
        let graph = initial_graph();
        let config = Config::default();
        let mut store = ConnectionStore::new();
        assert_eq!(store.status(&graph, &config).text(), "Not Connected");
        assert_eq!(store.selected_tool(&graph), None);

        store.set(Connection::new(TOOL_A_ID, AGENT_ID));
        assert_eq!(store.status(&graph, &config).text(), "ToolA → Agent");
        assert_eq!(store.selected_tool(&graph), Some(Role::ToolA));

        store.set(Connection::new(TOOL_B_ID, AGENT_ID));
        assert_eq!(store.status(&graph, &config).text(), "ToolB → Agent");
        assert_eq!(store.selected_tool(&graph), Some(Role::ToolB));

        store.clear();
        assert!(!store.status(&graph, &config).is_connected());
    }
}
