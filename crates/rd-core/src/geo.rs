//! Planar coordinates and compass headings.
//!
//! Coordinates are abstract map units: `+y` is north and `+x` is east.  They
//! drive direction narration and visualization only; travel cost always comes
//! from edge weights.

/// A position on the city map.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Bearing from `self` towards `other` in degrees, clockwise from north,
    /// normalised to `[0, 360)`.  Coincident points yield `0.0`.
    pub fn bearing_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let deg = dx.atan2(dy).to_degrees();
        if deg < 0.0 { deg + 360.0 } else { deg }
    }

    /// Compass heading from `self` towards `other`.
    #[inline]
    pub fn heading_to(self, other: Point) -> CompassPoint {
        CompassPoint::from_bearing(self.bearing_to(other))
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── CompassPoint ──────────────────────────────────────────────────────────────

/// One of the eight compass points, indexed clockwise from `North = 0`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CompassPoint {
    North     = 0,
    NorthEast = 1,
    East      = 2,
    SouthEast = 3,
    South     = 4,
    SouthWest = 5,
    West      = 6,
    NorthWest = 7,
}

impl CompassPoint {
    /// All points in index order.
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::North,
        CompassPoint::NorthEast,
        CompassPoint::East,
        CompassPoint::SouthEast,
        CompassPoint::South,
        CompassPoint::SouthWest,
        CompassPoint::West,
        CompassPoint::NorthWest,
    ];

    /// Width of one octant in degrees.
    const OCTANT: f64 = 45.0;

    /// Quantize a bearing (degrees clockwise from north, any range) to the
    /// nearest compass point.
    ///
    /// Each octant spans 45° centred on its direction.  A bearing lying
    /// exactly on the boundary between two octants resolves to the one with
    /// the lower index, so 22.5° is `North`, 67.5° is `NorthEast`, and
    /// 337.5° (between `NorthWest` and `North`) is `North`.
    pub fn from_bearing(bearing: f64) -> Self {
        let b = bearing.rem_euclid(360.0);
        let half = Self::OCTANT / 2.0;
        if b >= 360.0 - half {
            return CompassPoint::North;
        }
        let idx = ((b - half) / Self::OCTANT).ceil().max(0.0) as usize;
        Self::ALL[idx.min(7)]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case label used in route narration.
    pub fn as_str(self) -> &'static str {
        match self {
            CompassPoint::North     => "north",
            CompassPoint::NorthEast => "northeast",
            CompassPoint::East      => "east",
            CompassPoint::SouthEast => "southeast",
            CompassPoint::South     => "south",
            CompassPoint::SouthWest => "southwest",
            CompassPoint::West      => "west",
            CompassPoint::NorthWest => "northwest",
        }
    }

    /// Abbreviation (`N`, `NE`, …).
    pub fn abbrev(self) -> &'static str {
        match self {
            CompassPoint::North     => "N",
            CompassPoint::NorthEast => "NE",
            CompassPoint::East      => "E",
            CompassPoint::SouthEast => "SE",
            CompassPoint::South     => "S",
            CompassPoint::SouthWest => "SW",
            CompassPoint::West      => "W",
            CompassPoint::NorthWest => "NW",
        }
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
