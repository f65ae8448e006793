//! Real Las Vegas / Henderson locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. They are routable against OSRM
//! Nevada data and close enough together that straight-line distances stay in
//! the tens of kilometres.

use route_planner::Point;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> Point {
        Point::new(self.name, self.lat, self.lng)
    }
}

/// Convert a slice of locations into request points, preserving order.
pub fn to_points(locations: &[Location]) -> Vec<Point> {
    locations.iter().map(Location::point).collect()
}

// ============================================================================
// Major Casinos / Hotels
// ============================================================================

pub const CASINOS: &[Location] = &[
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Location::new("Encore at Wynn", 36.1289345, -115.1653620),
    Location::new("MGM Grand", 36.1023654, -115.1688720),
    Location::new("Bellagio", 36.1126, -115.1767),
    Location::new("Caesars Palace", 36.1162, -115.1745),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
];

// ============================================================================
// Henderson / East Las Vegas Area
// ============================================================================

pub const HENDERSON_LOCATIONS: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Extended Stay America Henderson", 36.1283949, -115.0826989),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Naga", 36.0137634, -114.9928676),
    Location::new("RibCage", 35.9949754, -115.0999810),
    Location::new("Buffalo Wild Wings Henderson", 36.0090449, -114.9917034),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
];

// ============================================================================
// North Las Vegas / Outlying Areas
// ============================================================================

pub const NORTH_VEGAS_LOCATIONS: &[Location] = &[
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Roberto's Taco Shop", 36.1452953, -115.0478347),
    Location::new("Monarca Mexican Restaurant", 36.1440711, -115.0634197),
    Location::new("Pizza Hut North", 36.1443292, -115.0624966),
    Location::new("La Costa del Sol", 36.1470458, -115.0644345),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
];

// ============================================================================
// South Strip / Airport Area
// ============================================================================

pub const SOUTH_STRIP_LOCATIONS: &[Location] = &[
    Location::new("Buffalo Wild Wings South", 36.0543044, -115.1714860),
    Location::new("Dickey's Barbecue Pit", 36.0544257, -115.1715391),
    Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Location::new("Denny's South", 36.0591086, -115.1717250),
    Location::new("Tahiti Joe's Restaurant", 36.0592855, -115.1716402),
    Location::new("Matryoshka", 36.0492150, -115.1710486),
    Location::new("kabuki Japanese", 36.0675472, -115.1779391),
    Location::new("Mikos Izakaya", 36.0429503, -115.1527627),
    Location::new("Budget Suites South", 36.0366259, -115.1713361),
    Location::new("TENDER Steak & Seafood", 36.0949700, -115.1761289),
    Location::new("Pyramid Cafe", 36.0956586, -115.1761902),
    Location::new("Diablo's Cantina", 36.0955372, -115.1751818),
    Location::new("Burger Bar", 36.0943773, -115.1760142),
];

/// Every fixture location; stays within the 50-point request limit.
pub fn all_locations() -> Vec<Location> {
    let mut all = Vec::with_capacity(40);
    all.extend_from_slice(CASINOS);
    all.extend_from_slice(HENDERSON_LOCATIONS);
    all.extend_from_slice(NORTH_VEGAS_LOCATIONS);
    all.extend_from_slice(SOUTH_STRIP_LOCATIONS);
    all
}

/// Locations spread across the metro area (good for multi-hop routes).
pub fn geographically_diverse_locations() -> Vec<Location> {
    vec![
        // North
        Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
        Location::new("Beers and Bets", 36.1428945, -115.1573836),
        // Central Strip
        Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
        Location::new("Bellagio", 36.1126, -115.1767),
        Location::new("MGM Grand", 36.1023654, -115.1688720),
        // South
        Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
        Location::new("Budget Suites South", 36.0366259, -115.1713361),
        // East / Henderson
        Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
        Location::new("Sunset Station Area", 36.0614, -115.0631),
        Location::new("Longhorn Casino", 36.1070664, -115.0591256),
        Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
        Location::new("Islander's Grill", 36.0335058, -114.9856162),
    ]
}
