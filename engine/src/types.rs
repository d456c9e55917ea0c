// ═══════════════════════════════════════════════════════════════════════
// Core types — factions, regions, adjacency edges, geometry
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};

/// Health a region starts with and is reset to after changing hands.
pub const MAX_HEALTH: i32 = 10;

// ── Enums ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Opponent,
}

impl Faction {
    pub const ALL: [Faction; 2] = [Faction::Player, Faction::Opponent];

    /// The other side.
    pub fn rival(self) -> Faction {
        match self {
            Faction::Player => Faction::Opponent,
            Faction::Opponent => Faction::Player,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Player => write!(f, "Player"),
            Faction::Opponent => write!(f, "Opponent"),
        }
    }
}

/// How a simulation tick reads region state while it updates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickResolution {
    /// Counts for every region come from the state at the start of the tick.
    #[default]
    Snapshot,
    /// Regions update one by one in index order; later regions see
    /// owners and orders already changed earlier in the same pass.
    Sequential,
}

// ── Region ID ──────────────────────────────────────────────────────────
// Index into the map's region array; stable for the whole session.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RegionId(pub usize);

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ── Geometry ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Div<f32> for Point {
    type Output = Point;
    fn div(self, rhs: f32) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}

/// The rectangle regions live in, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }

    /// Strict containment: points on the edge are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x > 0.0 && p.y > 0.0 && p.x < self.width as f32 && p.y < self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // 1024x768 window minus the 200px scoreboard column.
        Viewport::new(824, 768)
    }
}

// ── Adjacency edge ─────────────────────────────────────────────────────

/// Directed edge to a bordering region. `boundary` is the average of
/// the sampled border crossings and only matters for presentation
/// (arrow anchors).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjacentRegion {
    pub region: RegionId,
    pub boundary: Point,
}

// ── Region ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub center: Point,
    pub owner: Faction,
    pub health: i32,
    /// Outstanding order: the neighbor this region attacks or reinforces.
    pub target: Option<RegionId>,
    pub neighbors: Vec<AdjacentRegion>,
    pub selected: bool,
}

impl Region {
    pub fn new(id: RegionId, center: Point, owner: Faction) -> Self {
        Region {
            id,
            center,
            owner,
            health: MAX_HEALTH,
            target: None,
            neighbors: Vec::new(),
            selected: false,
        }
    }

    /// The adjacency edge to `other`, if this region borders it.
    pub fn adjacent(&self, other: RegionId) -> Option<&AdjacentRegion> {
        self.neighbors.iter().find(|a| a.region == other)
    }

    pub fn borders(&self, other: RegionId) -> bool {
        self.adjacent(other).is_some()
    }

    /// Replace the outstanding order. Targets outside the neighbor list
    /// are refused and leave the current order untouched.
    pub fn set_target(&mut self, target: Option<RegionId>) -> bool {
        match target {
            Some(t) if !self.borders(t) => false,
            _ => {
                self.target = target;
                true
            }
        }
    }

    /// Boundary anchor of the current order, for drawing its arrow.
    pub fn target_anchor(&self) -> Option<Point> {
        self.target
            .and_then(|t| self.adjacent(t))
            .map(|a| a.boundary)
    }
}

// ── Orders & events ────────────────────────────────────────────────────

/// A change of one region's order, as chosen by a planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderChange {
    pub source: RegionId,
    pub target: RegionId,
    pub score: i32,
}

/// Ownership change produced by a simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    pub region: RegionId,
    pub new_owner: Faction,
}

/// Input forwarded into the map by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// A selection click at a viewport position.
    Select(Point),
}

/// Something the renderer or audio layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    RegionFlipped { region: RegionId, new_owner: Faction },
    OrderIssued { source: RegionId, target: RegionId, faction: Faction },
}
