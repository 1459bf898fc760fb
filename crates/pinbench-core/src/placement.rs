use crate::grid::OccupancyGrid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// Random draws allowed per pin before falling back to the linear probe.
pub const MAX_ATTEMPTS_PER_PIN: u32 = 5;

/// Counters describing how a single placement went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementStats {
    pub pins: usize,
    /// Pins that landed on a free cell with their first draw.
    pub first_draw_hits: usize,
    /// Draws that hit an occupied cell and were retried.
    pub redraws: usize,
    /// Pins placed by the forward probe after exhausting their draws.
    pub probe_fallbacks: usize,
}

impl PlacementStats {
    pub fn accumulate(&mut self, other: &PlacementStats) {
        self.pins += other.pins;
        self.first_draw_hits += other.first_draw_hits;
        self.redraws += other.redraws;
        self.probe_fallbacks += other.probe_fallbacks;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    InvalidPinCount { max: usize, actual: usize },
    GridNotClear { occupied: usize },
    PinCountMismatch { expected: usize, actual: usize },
}

impl PlacementError {
    /// `true` when the error signals a defect in placement itself rather than a bad request.
    pub fn is_internal_fault(&self) -> bool {
        matches!(self, PlacementError::PinCountMismatch { .. })
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::InvalidPinCount { max, actual } => {
                write!(f, "pin count ({actual}) must be in 1..={max}")
            }
            PlacementError::GridNotClear { occupied } => {
                write!(f, "grid must be clear before placement ({occupied} cells occupied)")
            }
            PlacementError::PinCountMismatch { expected, actual } => write!(
                f,
                "number of pins ({actual}) differs from requested ({expected})"
            ),
        }
    }
}

impl Error for PlacementError {}

/// Scatter `pins` distinct pins over a clear grid.
///
/// Each pin gets up to [`MAX_ATTEMPTS_PER_PIN`] uniform draws (x first, then y).
/// If every draw lands on an occupied cell, the pin goes to the first free cell
/// found by scanning forward from the last conflicting cell, wrapping around the
/// end of the grid. The final pin count is recounted before returning.
pub fn place_pins<R: Rng + ?Sized>(
    grid: &mut OccupancyGrid,
    pins: usize,
    rng: &mut R,
) -> Result<PlacementStats, PlacementError> {
    let cell_count = grid.cell_count();
    if pins == 0 || pins > cell_count {
        return Err(PlacementError::InvalidPinCount {
            max: cell_count,
            actual: pins,
        });
    }
    if !grid.is_clear() {
        return Err(PlacementError::GridNotClear {
            occupied: grid.occupied_count(),
        });
    }

    let size = grid.size();
    let mut stats = PlacementStats {
        pins,
        ..PlacementStats::default()
    };
    for _ in 0..pins {
        let mut attempts = 0u32;
        loop {
            let x = rng.random_range(0..size);
            let y = rng.random_range(0..size);
            let index = grid.index_of(x, y);
            attempts += 1;
            if grid.occupy_at(index) {
                if attempts == 1 {
                    stats.first_draw_hits += 1;
                }
                break;
            }
            if attempts < MAX_ATTEMPTS_PER_PIN {
                stats.redraws += 1;
                continue;
            }
            // A miss here is caught by the recount below.
            if let Some(free) = probe_forward(grid, index) {
                grid.occupy_at(free);
            }
            stats.probe_fallbacks += 1;
            break;
        }
    }

    let placed = grid.occupied_count();
    if placed != pins {
        return Err(PlacementError::PinCountMismatch {
            expected: pins,
            actual: placed,
        });
    }
    Ok(stats)
}

/// First free cell after `start`, scanning forward with wraparound.
fn probe_forward(grid: &OccupancyGrid, start: usize) -> Option<usize> {
    let cell_count = grid.cell_count();
    (1..=cell_count)
        .map(|shift| (start + shift) % cell_count)
        .find(|&i| !grid.is_occupied_at(i))
}

/// Owns the occupancy grid and the random stream used to fill it.
///
/// The stream is seeded once; successive placements continue it.
pub struct GridPlacer<R> {
    grid: OccupancyGrid,
    rng: R,
}

impl<R: Rng> GridPlacer<R> {
    pub fn new(size: usize, rng: R) -> Self {
        Self {
            grid: OccupancyGrid::new(size),
            rng,
        }
    }

    pub fn place(&mut self, pins: usize) -> Result<PlacementStats, PlacementError> {
        place_pins(&mut self.grid, pins, &mut self.rng)
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }
}
