//! Toroidal multi-occupancy lattice.
//!
//! Each cell holds an unordered set of agent handles; the grid also records every placed
//! agent's cell so removal never needs the caller to remember where the agent stood.

use crate::agent::AgentId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use slotmap::SecondaryMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<AgentId>>,
    positions: SecondaryMap<AgentId, GridPos>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0, "width must be positive");
        assert!(height > 0, "height must be positive");
        Self {
            width,
            height,
            cells: vec![Vec::new(); width * height],
            positions: SecondaryMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of agents currently placed.
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    /// Map signed coordinates onto the torus.
    pub fn wrap(&self, x: i64, y: i64) -> GridPos {
        GridPos {
            x: x.rem_euclid(self.width as i64) as usize,
            y: y.rem_euclid(self.height as i64) as usize,
        }
    }

    /// Insert `id` at `pos`, wrapping out-of-range coordinates. An agent that is already
    /// placed is moved, so it never occupies two cells. Returns the cell actually used.
    pub fn place(&mut self, id: AgentId, pos: GridPos) -> GridPos {
        let pos = self.wrap(pos.x as i64, pos.y as i64);
        self.remove(id);
        let idx = self.index(pos);
        self.cells[idx].push(id);
        self.positions.insert(id, pos);
        pos
    }

    /// Remove `id` from its cell. No-op (returns `None`) if it is not placed.
    pub fn remove(&mut self, id: AgentId) -> Option<GridPos> {
        let pos = self.positions.remove(id)?;
        let idx = self.index(pos);
        let cell = &mut self.cells[idx];
        if let Some(slot) = cell.iter().position(|&occupant| occupant == id) {
            cell.swap_remove(slot);
        }
        Some(pos)
    }

    pub fn position(&self, id: AgentId) -> Option<GridPos> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn occupants(&self, pos: GridPos) -> &[AgentId] {
        let pos = self.wrap(pos.x as i64, pos.y as i64);
        &self.cells[self.index(pos)]
    }

    pub fn is_empty(&self, pos: GridPos) -> bool {
        self.occupants(pos).is_empty()
    }

    /// Moore neighbourhood of `pos` on the torus, in row-major offset order, without
    /// duplicates (lattices narrower than three cells fold onto themselves).
    pub fn neighbors(&self, pos: GridPos, include_center: bool) -> Vec<GridPos> {
        let mut out = Vec::with_capacity(9);
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                let cell = self.wrap(pos.x as i64 + dx, pos.y as i64 + dy);
                if !include_center && cell == pos {
                    continue;
                }
                if !out.contains(&cell) {
                    out.push(cell);
                }
            }
        }
        out
    }

    /// Empty cells of the Moore neighbourhood of `pos` (center excluded).
    pub fn empty_neighbors(&self, pos: GridPos) -> Vec<GridPos> {
        self.neighbors(pos, false)
            .into_iter()
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    /// Uniformly random cell over the whole lattice.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> GridPos {
        GridPos {
            x: rng.random_range(0..self.width),
            y: rng.random_range(0..self.height),
        }
    }

    fn index(&self, pos: GridPos) -> usize {
        pos.y * self.width + pos.x
    }
}
