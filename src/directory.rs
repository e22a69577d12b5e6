//! Restaurant directory.
//!
//! Maps the restaurant names guests use to SevenRooms venue ids.

use serde::Serialize;

/// A bookable venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Restaurant {
    /// SevenRooms venue id used in API paths.
    pub venue_id: String,
    /// Display name.
    pub name: String,
    /// Short lowercase key.
    pub key: String,
}

impl Restaurant {
    pub fn new(
        venue_id: impl Into<String>,
        name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            venue_id: venue_id.into(),
            name: name.into(),
            key: key.into(),
        }
    }
}

/// Lookup table of known restaurants.
#[derive(Debug, Clone)]
pub struct RestaurantDirectory {
    restaurants: Vec<Restaurant>,
}

impl RestaurantDirectory {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    /// The venues available through this deployment.
    pub fn builtin() -> Self {
        Self::new(vec![
            Restaurant::new(
                "ahhzfnNldmVucm9vbXMtc2VjdXJlLWRlbW9yHAsSD25pZ2h0bG9vcF9WZW51ZRiAgOikn42lCQw",
                "Casa Playa",
                "casaplaya",
            ),
            Restaurant::new(
                "ahhzfnNldmVucm9vbXMtc2VjdXJlLWRlbW9yHAsSD25pZ2h0bG9vcF9WZW51ZRiAgOik34TyCww",
                "SW Steakhouse",
                "swsteakhouse",
            ),
            Restaurant::new(
                "ahhzfnNldmVucm9vbXMtc2VjdXJlLWRlbW9yHAsSD25pZ2h0bG9vcF9WZW51ZRiAgOixg9myCww",
                "Jardin",
                "jardin",
            ),
            Restaurant::new(
                "ahhzfnNldmVucm9vbXMtc2VjdXJlLWRlbW9yHAsSD25pZ2h0bG9vcF9WZW51ZRiAgOjxjZGBCww",
                "La Cave",
                "lacave",
            ),
        ])
    }

    /// Find a restaurant by display name or key, ignoring case and surrounding whitespace.
    pub fn find(&self, name: &str) -> Option<&Restaurant> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.restaurants
            .iter()
            .find(|r| r.name.to_lowercase() == wanted || r.key == wanted)
    }

    /// Display names in directory order.
    pub fn names(&self) -> Vec<String> {
        self.restaurants.iter().map(|r| r.name.clone()).collect()
    }
}

impl Default for RestaurantDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}
