//! Board state and ordinary moves.

use crate::game::neighbors::{debit_neighbor_owners, has_neighbor, isolated_free_neighbors};
use crate::game::regions::RegionTracker;

/// Unique identifier for a player.
///
/// Valid players are numbered `1..=players`; `0` never identifies a player.
pub type PlayerId = u32;

/// A coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u32,
    /// Y coordinate (row); row 0 is the bottom of the rendered board.
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Get adjacent coordinates (up, down, left, right).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, width: u32, height: u32) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.y + 1 < height {
            result[count as usize] = Coord::new(self.x, self.y + 1); // up
            count += 1;
        }
        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // down
            count += 1;
        }
        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x + 1 < width {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }

        (result, count)
    }
}

/// Complete board state.
///
/// The board is the only mutable state of the engine. Every public mutating
/// operation either completes all counter updates or leaves the board
/// untouched; illegal moves are reported as `false` with no state change.
#[derive(Debug, Clone)]
pub struct Board {
    /// Width of the board in cells.
    width: u32,
    /// Height of the board in cells.
    height: u32,
    /// Number of players.
    players: u32,
    /// Maximum number of disjoint regions a single player may own.
    area_limit: u32,
    /// Width of one cell in the text rendering.
    field_width: u32,
    /// Cell owners in row-major order; `None` is a free cell.
    pub(crate) owners: Vec<Option<PlayerId>>,
    /// Connected-component tracking over cell indices.
    pub(crate) regions: RegionTracker,
    /// Split-detection scratch: generation stamp per cell.
    pub(crate) visited: Vec<u64>,
    /// Current split-detection generation.
    pub(crate) generation: u64,
    /// Current number of disjoint regions per player (index `player - 1`).
    pub(crate) areas: Vec<u32>,
    /// Number of cells owned per player.
    pub(crate) fields: Vec<u64>,
    /// Number of free cells adjacent to each player's territory.
    pub(crate) free_neighbors: Vec<u64>,
    /// Whether each player has spent their golden move.
    pub(crate) used_golden: Vec<bool>,
    /// Number of free cells on the whole board.
    pub(crate) free_cells: u64,
}

impl Board {
    /// Create a new board with all cells free.
    ///
    /// Returns `None` if any parameter is zero or if the grid and per-player
    /// tables cannot be allocated; no partial board is ever observable.
    #[must_use]
    pub fn new(width: u32, height: u32, players: u32, area_limit: u32) -> Option<Self> {
        if width == 0 || height == 0 || players == 0 || area_limit == 0 {
            return None;
        }

        let cells = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        let slots = usize::try_from(players).ok()?;

        let mut owners = Vec::new();
        owners.try_reserve_exact(cells).ok()?;
        owners.resize(cells, None);

        let mut visited = Vec::new();
        visited.try_reserve_exact(cells).ok()?;
        visited.resize(cells, 0u64);

        let regions = RegionTracker::new(cells)?;

        let field_width = if players <= 9 {
            1
        } else {
            crate::game::render::digits(players) + 1
        };

        Some(Self {
            width,
            height,
            players,
            area_limit,
            field_width,
            owners,
            regions,
            visited,
            generation: 0,
            areas: vec![0; slots],
            fields: vec![0; slots],
            free_neighbors: vec![0; slots],
            used_golden: vec![false; slots],
            free_cells: u64::from(width) * u64::from(height),
        })
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of players.
    #[must_use]
    pub const fn players(&self) -> u32 {
        self.players
    }

    /// Get the maximum number of disjoint regions per player.
    #[must_use]
    pub const fn area_limit(&self) -> u32 {
        self.area_limit
    }

    /// Get the width of one cell in the text rendering.
    #[must_use]
    pub const fn field_width(&self) -> u32 {
        self.field_width
    }

    /// Check if a coordinate is within the board bounds.
    #[must_use]
    pub const fn in_bounds(&self, pos: Coord) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Convert a coordinate to an index into the cell arrays.
    ///
    /// The caller must have bounds-checked `pos`.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn index(&self, pos: Coord) -> usize {
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Get the owner of a cell, or `None` if the cell is free or out of bounds.
    #[must_use]
    pub fn owner(&self, pos: Coord) -> Option<PlayerId> {
        if self.in_bounds(pos) {
            self.owners[self.index(pos)]
        } else {
            None
        }
    }

    /// Counter slot for a player, or `None` if `player` is out of range.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const fn slot(&self, player: PlayerId) -> Option<usize> {
        if player == 0 || player > self.players {
            None
        } else {
            Some((player - 1) as usize)
        }
    }

    /// Number of cells currently owned by `player`.
    ///
    /// Returns 0 for a player number out of range.
    #[must_use]
    pub fn occupied_fields(&self, player: PlayerId) -> u64 {
        self.slot(player).map_or(0, |s| self.fields[s])
    }

    /// Number of cells `player` could still take.
    ///
    /// A player saturated at the area limit may only extend existing regions,
    /// so the answer is their free-neighbor count; otherwise any free cell on
    /// the board is reachable. Returns 0 for a player number out of range.
    #[must_use]
    pub fn free_fields(&self, player: PlayerId) -> u64 {
        let Some(slot) = self.slot(player) else {
            return 0;
        };
        if self.areas[slot] == self.area_limit {
            self.free_neighbors[slot]
        } else {
            self.free_cells
        }
    }

    /// Current number of disjoint regions owned by `player`.
    ///
    /// Returns 0 for a player number out of range.
    #[must_use]
    pub fn region_count(&self, player: PlayerId) -> u32 {
        self.slot(player).map_or(0, |s| self.areas[s])
    }

    /// Whether `player` has already spent their golden move.
    ///
    /// Returns `false` for a player number out of range.
    #[must_use]
    pub fn golden_used(&self, player: PlayerId) -> bool {
        self.slot(player).is_some_and(|s| self.used_golden[s])
    }

    /// Place a piece for `player` at `pos`.
    ///
    /// Fails (returning `false`, with no state change) if the player number
    /// or position is invalid, the cell is occupied, or the placement would
    /// start a new region for a player already at the area limit.
    pub fn place(&mut self, player: PlayerId, pos: Coord) -> bool {
        let Some(slot) = self.slot(player) else {
            return false;
        };
        if !self.in_bounds(pos) {
            return false;
        }
        let idx = self.index(pos);
        if self.owners[idx].is_some() {
            return false;
        }

        if has_neighbor(self, player, pos) {
            // Extends an existing region: the cell stops being a free
            // neighbor of the mover and may expose new ones.
            self.free_cells -= 1;
            self.free_neighbors[slot] -= 1;
            self.free_neighbors[slot] += isolated_free_neighbors(self, player, pos);
            debit_neighbor_owners(self, player, pos);
            self.fuse_with_neighbors(player, pos);
        } else {
            if self.areas[slot] == self.area_limit {
                return false;
            }
            self.free_neighbors[slot] += isolated_free_neighbors(self, player, pos);
            debit_neighbor_owners(self, player, pos);
            self.owners[idx] = Some(player);
            self.areas[slot] += 1;
            self.fields[slot] += 1;
            self.free_cells -= 1;
        }
        true
    }

    /// Assign `pos` to `player` and merge it with every adjacent region of
    /// the same player.
    ///
    /// Increments the player's area and field counts for the new cell, then
    /// each union that actually joins two components takes one area back, so
    /// placing between N separate own regions collapses them into one.
    pub(crate) fn fuse_with_neighbors(&mut self, player: PlayerId, pos: Coord) {
        let Some(slot) = self.slot(player) else {
            return;
        };
        self.areas[slot] += 1;
        self.fields[slot] += 1;
        let idx = self.index(pos);
        self.owners[idx] = Some(player);

        let (adjacent, count) = pos.adjacent(self.width, self.height);
        for nb in &adjacent[..count as usize] {
            let nb_idx = self.index(*nb);
            if self.owners[nb_idx] == Some(player) && self.regions.union(nb_idx, idx) {
                self.areas[slot] -= 1;
            }
        }
    }
}
