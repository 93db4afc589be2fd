//! Location domain model.
//!
//! # Invariants
//! - `visitation_order` is the only sort key for locations.
//! - `UNKNOWN_LOCATION_ORDER` is reserved for the Unknown Location and
//!   identifies it regardless of name.
//! - Color channels are stored separately and assembled into `Color` on read.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable location identifier.
pub type LocationId = Uuid;

/// Reserved order marking the Unknown Location.
pub const UNKNOWN_LOCATION_ORDER: i32 = i32::MAX;
pub const UNKNOWN_LOCATION_NAME: &str = "Unknown Location";
/// Display value for locations without a usable name.
pub const LOCATION_NAME_PLACEHOLDER: &str = "Unknown Name";
/// Name given to location drafts opened from scratch.
pub const NEW_LOCATION_NAME: &str = "New Location";

/// Inclusive range of orders a user may assign.
pub const MIN_USER_ORDER: i32 = 1;
pub const MAX_USER_ORDER: i32 = 100;
pub const DEFAULT_USER_ORDER: i32 = 50;

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl Color {
    pub const fn new(red: f64, green: f64, blue: f64, opacity: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity,
        }
    }

    /// Gray used by the Unknown Location.
    pub const UNKNOWN: Color = Color::new(0.5, 0.5, 0.5, 0.5);
    /// Default for newly drafted locations.
    pub const DEFAULT: Color = Color::new(0.25, 0.25, 0.25, 0.5);

    /// Clamps every channel into `0.0..=1.0`; NaN becomes `0.0`.
    pub fn clamped(self) -> Self {
        let channel = |value: f64| {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, 1.0)
            }
        };
        Self::new(
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            channel(self.opacity),
        )
    }
}

/// A place items are bought at, ordered by visitation.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    /// `None` and blank names render as `LOCATION_NAME_PLACEHOLDER`.
    pub name: Option<String>,
    pub visitation_order: i32,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub opacity: f64,
}

impl Location {
    /// Creates a user location with default fields and a fresh id.
    pub fn new(name: impl Into<String>, visitation_order: i32) -> Self {
        Self::with_id(Uuid::new_v4(), name, visitation_order)
    }

    /// Creates a location with a caller-provided id.
    pub fn with_id(id: LocationId, name: impl Into<String>, visitation_order: i32) -> Self {
        let mut location = Self {
            id,
            name: Some(name.into()),
            visitation_order,
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            opacity: 0.0,
        };
        location.set_color(Color::DEFAULT);
        location
    }

    /// Builds the Unknown Location with its fixed name, order and color.
    pub fn unknown() -> Self {
        let mut location = Self::new(UNKNOWN_LOCATION_NAME, UNKNOWN_LOCATION_ORDER);
        location.set_color(Color::UNKNOWN);
        location
    }

    pub fn is_unknown(&self) -> bool {
        self.visitation_order == UNKNOWN_LOCATION_ORDER
    }

    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => LOCATION_NAME_PLACEHOLDER,
        }
    }

    pub fn color(&self) -> Color {
        Color::new(self.red, self.green, self.blue, self.opacity)
    }

    pub fn set_color(&mut self, color: Color) {
        let color = color.clamped();
        self.red = color.red;
        self.green = color.green;
        self.blue = color.blue;
        self.opacity = color.opacity;
    }
}

/// Clamps a user-entered order into `MIN_USER_ORDER..=MAX_USER_ORDER`.
pub fn clamp_user_order(order: i32) -> i32 {
    order.clamp(MIN_USER_ORDER, MAX_USER_ORDER)
}
