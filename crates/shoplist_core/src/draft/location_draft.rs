//! Editable copy of a location.

use crate::model::location::{
    clamp_user_order, Color, Location, LocationId, DEFAULT_USER_ORDER, NEW_LOCATION_NAME,
    UNKNOWN_LOCATION_ORDER,
};
use crate::view::LocationView;

/// Editable copy of a location's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    /// Source location, or `None` for a location that does not exist yet.
    pub id: Option<LocationId>,
    pub name: String,
    /// Ignored on commit for the Unknown Location.
    pub visitation_order: i32,
    pub color: Color,
    is_unknown_location: bool,
}

impl LocationDraft {
    pub fn from_location(location: &Location) -> Self {
        Self {
            id: Some(location.id),
            name: location.name.clone().unwrap_or_default(),
            visitation_order: location.visitation_order,
            color: location.color(),
            is_unknown_location: location.is_unknown(),
        }
    }

    /// Defaults for a location that does not exist yet.
    pub fn new() -> Self {
        Self {
            id: None,
            name: NEW_LOCATION_NAME.to_string(),
            visitation_order: DEFAULT_USER_ORDER,
            color: Color::DEFAULT,
            is_unknown_location: false,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    pub fn is_unknown_location(&self) -> bool {
        self.is_unknown_location
    }

    pub fn can_be_saved(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Renders the draft as it would appear once committed.
    pub fn preview(&self, item_count: usize) -> LocationView {
        let mut location = Location::new(self.name.clone(), self.effective_order());
        location.id = self.id.unwrap_or(location.id);
        location.set_color(self.color);
        LocationView::build(&location, item_count, self.id.is_some())
    }

    fn effective_order(&self) -> i32 {
        if self.is_unknown_location {
            UNKNOWN_LOCATION_ORDER
        } else {
            clamp_user_order(self.visitation_order)
        }
    }

    /// Writes the draft's fields onto `location`.
    ///
    /// The Unknown Location keeps its reserved order; every other order is
    /// clamped to the user-facing range.
    pub(crate) fn apply_to(&self, location: &mut Location) {
        if !(self.name.is_empty() && location.name.is_none()) {
            location.name = Some(self.name.clone());
        }
        location.visitation_order = if location.is_unknown() {
            UNKNOWN_LOCATION_ORDER
        } else {
            clamp_user_order(self.visitation_order)
        };
        location.set_color(self.color);
    }
}

impl Default for LocationDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::LocationDraft;
    use crate::model::location::{Color, Location, UNKNOWN_LOCATION_ORDER};

    #[test]
    fn order_is_clamped_for_user_locations() {
        let mut location = Location::new("Deli", 10);
        let mut draft = LocationDraft::from_location(&location);
        draft.visitation_order = 500;
        draft.apply_to(&mut location);
        assert_eq!(location.visitation_order, 100);

        draft.visitation_order = -3;
        draft.apply_to(&mut location);
        assert_eq!(location.visitation_order, 1);
    }

    #[test]
    fn unknown_location_order_is_fixed() {
        let mut unknown = Location::unknown();
        let mut draft = LocationDraft::from_location(&unknown);
        assert!(draft.is_unknown_location());

        draft.visitation_order = 5;
        draft.color = Color::new(1.0, 0.0, 0.0, 1.0);
        draft.apply_to(&mut unknown);
        assert_eq!(unknown.visitation_order, UNKNOWN_LOCATION_ORDER);
        assert_eq!(unknown.color(), Color::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(draft.preview(0).visitation_order, UNKNOWN_LOCATION_ORDER);
    }

    #[test]
    fn preview_marks_new_drafts_as_not_existing() {
        let draft = LocationDraft::new();
        let view = draft.preview(0);
        assert!(!view.is_existing_location);
        assert!(!view.is_unknown_location);
        assert_eq!(view.name, "New Location");
        assert_eq!(view.visitation_order, 50);
    }
}
