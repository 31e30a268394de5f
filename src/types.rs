use serde::{Deserialize, Serialize};

/// Pointer position in screen (client) pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Which part of a layer the pointer grabbed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grip {
    /// The layer body: drag moves the layer
    Body,
    /// The corner resize handle
    Resize,
}

impl Grip {
    /// Tailwind cursor class shown over this grip
    pub fn cursor_class(&self) -> &'static str {
        match self {
            Grip::Body => "cursor-move",
            Grip::Resize => "cursor-nwse-resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Direct manipulation: select, move, resize
    #[default]
    Edit,
    /// Clicks on layers target the assistive action instead of dragging
    Magic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Short transient message shown above the workspace
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveTab {
    Generate,
    Editor,
}
