//! # Layout Geometry
//!
//! Cosmetic positioning data carried alongside a machine so that graphical
//! editors can round-trip their canvas layout through the toolchain.
//! Nothing in this module affects the semantics of generated code: a machine
//! with no layout at all generates byte-identical executable artifacts.
//!
//! Layout maps are keyed by state/transition *name* (the editor-facing key),
//! and use `BTreeMap` so serialization order is deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A point on the editor canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a point from its coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-canvas geometry for a single state.
///
/// States have two presentations: closed (name only) and open (actions
/// visible), each with its own dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StateLayout {
    /// Centre of the state on the canvas.
    pub position: Point2D,
    /// Width when closed.
    pub width: f64,
    /// Height when closed.
    pub height: f64,
    /// Width when expanded to show actions.
    pub expanded_width: f64,
    /// Height when expanded to show actions.
    pub expanded_height: f64,
}

/// Bezier layout for a single transition.
///
/// Four control points: source attachment, two curve controls, and the
/// target attachment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLayout {
    pub control_points: Vec<Point2D>,
}

impl TransitionLayout {
    /// A straight-line layout between two points.
    pub fn straight(source: Point2D, target: Point2D) -> Self {
        let third = Point2D::new(
            source.x + (target.x - source.x) / 3.0,
            source.y + (target.y - source.y) / 3.0,
        );
        let two_thirds = Point2D::new(
            source.x + (target.x - source.x) * 2.0 / 3.0,
            source.y + (target.y - source.y) * 2.0 / 3.0,
        );
        Self {
            control_points: vec![source, third, two_thirds, target],
        }
    }
}

/// Editor window geometry, preserved verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The full cosmetic layout of one machine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineLayout {
    /// State name → geometry.
    #[serde(default)]
    pub states: BTreeMap<String, StateLayout>,
    /// Transition key (e.g. `"Initial-0"`) → bezier layout.
    #[serde(default)]
    pub transitions: BTreeMap<String, TransitionLayout>,
    /// Editor window placement, if the editor recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowLayout>,
}

impl MachineLayout {
    /// True if no layout information is present at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty() && self.transitions.is_empty() && self.window.is_none()
    }
}
