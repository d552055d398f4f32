use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke, Text};
use iced::{Color, Point, Rectangle, Size};

use crate::editor::{Editor, EditorMessage};
use crate::geometry::CurvePath;
use crate::gesture::Gesture;
use crate::graph::{
    HitResult, Node, NodeKind, PortDirection, Role, NODE_HEADER_HEIGHT, PORT_RADIUS,
};
use crate::scene::PortVisual;
use crate::Message;

// Dark canvas palette
mod palette {
    use iced::Color;

    pub const CANVAS_BG: Color = Color::from_rgb(0.075, 0.075, 0.085);
    pub const GRID_DOT: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.04);

    pub const NODE_BG: Color = Color::from_rgb(0.11, 0.11, 0.13);
    pub const NODE_HEADER: Color = Color::from_rgb(0.15, 0.15, 0.18);
    pub const NODE_BORDER: Color = Color::from_rgb(0.22, 0.22, 0.26);
    pub const NODE_BORDER_DRAGGING: Color = Color::from_rgb(0.50, 0.50, 0.58);

    // Warm amber for tools, cool cyan for the agent
    pub const ACCENT_TOOL: Color = Color::from_rgb(0.92, 0.65, 0.25);
    pub const ACCENT_AGENT: Color = Color::from_rgb(0.30, 0.75, 0.85);

    pub const PORT_IDLE: Color = Color::from_rgb(0.45, 0.45, 0.50);
    pub const PORT_ACTIVE: Color = Color::from_rgb(0.92, 0.65, 0.25);
    pub const PORT_HOVER: Color = Color::from_rgb(0.95, 0.95, 0.60);
    pub const PORT_CONNECTED: Color = Color::from_rgb(0.35, 0.75, 0.45);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.92, 0.92, 0.94);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.55, 0.55, 0.60);

    pub const LINK_COLOR: Color = Color::from_rgb(0.35, 0.75, 0.45);
    pub const LINK_GLOW: Color = Color::from_rgba(0.35, 0.75, 0.45, 0.25);
    pub const LINK_PENDING: Color = Color::from_rgb(0.50, 0.70, 0.80);
}

const GRID_SIZE: f32 = 40.0;

impl canvas::Program<Message> for Editor {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let content = self.cache.draw(renderer, bounds.size(), |frame| {
            frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::CANVAS_BG);

            let cols = (bounds.width / GRID_SIZE) as i32 + 1;
            let rows = (bounds.height / GRID_SIZE) as i32 + 1;
            for row in 0..rows {
                for col in 0..cols {
                    let center = Point::new(col as f32 * GRID_SIZE, row as f32 * GRID_SIZE);
                    let dot = Path::circle(center, 1.0);
                    frame.fill(&dot, palette::GRID_DOT);
                }
            }

            for link in self.scene().links() {
                draw_link(frame, &link.path);
            }

            for node in self.graph().nodes() {
                draw_node(frame, self, node);
            }
        });

        // The temp curve follows the pointer, so it is never cached
        let mut pending = Frame::new(renderer, bounds.size());
        if let Some(path) = self.scene().temp_curve() {
            draw_pending_link(&mut pending, path);
        }

        vec![content, pending.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let iced::Event::Mouse(mouse_event) = event else {
            return None;
        };

        let message = match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = cursor.position_in(bounds)?;
                EditorMessage::PointerPressed {
                    position,
                    canvas: bounds.size(),
                }
            }
            // Moves and releases are tracked outside the canvas too, like a
            // document-level listener, but only while a gesture is active.
            mouse::Event::CursorMoved { .. } if !self.gesture().is_idle() => {
                EditorMessage::PointerMoved {
                    position: relative(cursor, bounds)?,
                    canvas: bounds.size(),
                }
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if !self.gesture().is_idle() => {
                EditorMessage::PointerReleased {
                    position: relative(cursor, bounds),
                }
            }
            mouse::Event::CursorLeft if !self.gesture().is_idle() => {
                EditorMessage::PointerReleased { position: None }
            }
            _ => return None,
        };

        Some(canvas::Action::publish(Message::Editor(message)).and_capture())
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        match self.gesture() {
            Gesture::DraggingNode { .. } => mouse::Interaction::Grabbing,
            Gesture::DraggingLink { .. } => mouse::Interaction::Crosshair,
            Gesture::Idle => match cursor.position_in(bounds).map(|p| self.graph().hit_test(p)) {
                Some(HitResult::Node(id)) if self.graph().role(id) == Some(Role::Agent) => {
                    mouse::Interaction::Pointer
                }
                Some(HitResult::Node(_)) => mouse::Interaction::Grab,
                Some(HitResult::Port(_)) => mouse::Interaction::Crosshair,
                _ => mouse::Interaction::default(),
            },
        }
    }
}

/// Cursor position relative to the canvas, even when outside it.
fn relative(cursor: mouse::Cursor, bounds: Rectangle) -> Option<Point> {
    cursor
        .position()
        .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y))
}

fn rounded_rect(pos: Point, size: Size, radius: f32) -> Path {
    Path::new(|builder| {
        let r = radius.min(size.width / 2.0).min(size.height / 2.0);
        let x = pos.x;
        let y = pos.y;
        let w = size.width;
        let h = size.height;

        builder.move_to(Point::new(x + r, y));
        builder.line_to(Point::new(x + w - r, y));
        builder.arc_to(Point::new(x + w, y), Point::new(x + w, y + r), r);
        builder.line_to(Point::new(x + w, y + h - r));
        builder.arc_to(Point::new(x + w, y + h), Point::new(x + w - r, y + h), r);
        builder.line_to(Point::new(x + r, y + h));
        builder.arc_to(Point::new(x, y + h), Point::new(x, y + h - r), r);
        builder.line_to(Point::new(x, y + r));
        builder.arc_to(Point::new(x, y), Point::new(x + r, y), r);
        builder.close();
    })
}

fn draw_node(frame: &mut Frame, editor: &Editor, node: &Node) {
    let size = node.size();
    let corner_radius = 8.0;
    let dragging = editor.scene().is_dragging(node.id());
    let accent = match node.role().kind() {
        NodeKind::Tool => palette::ACCENT_TOOL,
        NodeKind::Agent => palette::ACCENT_AGENT,
    };

    // Shadow, lifted while dragging
    let lift = if dragging { 4.0 } else { 1.0 };
    frame.fill(
        &rounded_rect(
            Point::new(node.position.x - 1.0, node.position.y - 1.0 + lift),
            Size::new(size.width + 2.0, size.height + 2.0),
            corner_radius + 1.0,
        ),
        Color::from_rgba(0.0, 0.0, 0.0, 0.4),
    );

    let body = rounded_rect(node.position, size, corner_radius);
    frame.fill(&body, palette::NODE_BG);

    let header = Path::new(|builder| {
        let r = corner_radius;
        let x = node.position.x;
        let y = node.position.y;
        let w = size.width;
        let h = NODE_HEADER_HEIGHT;

        builder.move_to(Point::new(x + r, y));
        builder.line_to(Point::new(x + w - r, y));
        builder.arc_to(Point::new(x + w, y), Point::new(x + w, y + r), r);
        builder.line_to(Point::new(x + w, y + h));
        builder.line_to(Point::new(x, y + h));
        builder.line_to(Point::new(x, y + r));
        builder.arc_to(Point::new(x, y), Point::new(x + r, y), r);
        builder.close();
    });
    frame.fill(&header, palette::NODE_HEADER);

    frame.stroke(
        &Path::line(
            Point::new(node.position.x, node.position.y + NODE_HEADER_HEIGHT),
            Point::new(node.position.x + size.width, node.position.y + NODE_HEADER_HEIGHT),
        ),
        Stroke::default().with_color(accent).with_width(1.5),
    );

    let border = if dragging {
        palette::NODE_BORDER_DRAGGING
    } else {
        palette::NODE_BORDER
    };
    frame.stroke(&body, Stroke::default().with_color(border).with_width(1.0));

    frame.fill_text(Text {
        content: editor.label(node.role()).to_string(),
        position: Point::new(node.position.x + 12.0, node.position.y + 7.0),
        color: palette::TEXT_PRIMARY,
        size: iced::Pixels(13.0),
        ..Text::default()
    });

    let subtitle = match node.role().kind() {
        NodeKind::Tool => "Tool",
        NodeKind::Agent => "Click to configure",
    };
    frame.fill_text(Text {
        content: subtitle.to_string(),
        position: Point::new(node.position.x + 12.0, node.position.y + NODE_HEADER_HEIGHT + 12.0),
        color: palette::TEXT_SECONDARY,
        size: iced::Pixels(11.0),
        ..Text::default()
    });

    for direction in [PortDirection::Input, PortDirection::Output] {
        let pos = node.port_position(direction);
        let color = match editor.scene().port_visual(node.id(), direction) {
            PortVisual::Idle => palette::PORT_IDLE,
            PortVisual::Active => palette::PORT_ACTIVE,
            PortVisual::HoveredWhileLinking => palette::PORT_HOVER,
            PortVisual::Connected => palette::PORT_CONNECTED,
        };

        frame.fill(
            &Path::circle(pos, PORT_RADIUS + 3.0),
            Color::from_rgba(color.r, color.g, color.b, 0.25),
        );
        frame.fill(&Path::circle(pos, PORT_RADIUS), color);
        frame.fill(
            &Path::circle(pos, PORT_RADIUS - 2.0),
            Color::from_rgba(1.0, 1.0, 1.0, 0.15),
        );
    }
}

fn curve(path: &CurvePath) -> Path {
    Path::new(|builder| {
        builder.move_to(path.start);
        builder.bezier_curve_to(path.ctrl1, path.ctrl2, path.end);
    })
}

fn draw_link(frame: &mut Frame, path: &CurvePath) {
    let path = curve(path);

    frame.stroke(
        &path,
        Stroke::default()
            .with_color(palette::LINK_GLOW)
            .with_width(8.0)
            .with_line_cap(canvas::LineCap::Round),
    );
    frame.stroke(
        &path,
        Stroke::default()
            .with_color(palette::LINK_COLOR)
            .with_width(2.5)
            .with_line_cap(canvas::LineCap::Round),
    );
}

fn draw_pending_link(frame: &mut Frame, path: &CurvePath) {
    let end = path.end;
    let path = curve(path);

    frame.stroke(
        &path,
        Stroke::default()
            .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.1))
            .with_width(10.0)
            .with_line_cap(canvas::LineCap::Round),
    );
    frame.stroke(
        &path,
        Stroke::default()
            .with_color(palette::LINK_PENDING)
            .with_width(3.0)
            .with_line_cap(canvas::LineCap::Round),
    );

    // Cursor endpoint indicator
    frame.fill(&Path::circle(end, 6.0), Color::from_rgba(1.0, 1.0, 1.0, 0.3));
    frame.fill(&Path::circle(end, 3.0), palette::LINK_PENDING);
}
