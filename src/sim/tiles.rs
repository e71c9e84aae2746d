//! Tile grid arena
//!
//! Obstacles live in a flat `Vec<Tile>` indexed by tile coordinate, with
//! `Tile::Empty` as the "nothing here" value. World positions map to tiles by
//! floor division with the tile size.
//!
//! Text layout, one character per tile:
//! - `.` empty
//! - `#` solid wall/ground
//! - `B` breakable brick

use serde::{Deserialize, Serialize};

use super::rect::AxisAlignedRect;
use crate::math::Vector2;

/// Integer tile coordinate (column, row)
pub type TileCoord = Vector2<i32>;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Solid,
    Brick,
}

impl Tile {
    pub fn is_empty(self) -> bool {
        self == Tile::Empty
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | ' ' => Some(Tile::Empty),
            '#' => Some(Tile::Solid),
            'B' | 'b' => Some(Tile::Brick),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Solid => '#',
            Tile::Brick => 'B',
        }
    }
}

/// A static collider handed to the resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub rect: AxisAlignedRect<f32>,
    /// Grid cell this obstacle came from (None for free-standing colliders)
    pub tile: Option<TileCoord>,
}

impl Obstacle {
    /// Collider that does not belong to the grid (paddles, moving platforms)
    pub fn free(rect: AxisAlignedRect<f32>) -> Self {
        Self { rect, tile: None }
    }
}

/// Fixed-size grid of tiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    cols: i32,
    rows: i32,
    tile_size: i32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Empty grid. Non-positive dimensions produce a 0x0 grid.
    pub fn new(cols: i32, rows: i32, tile_size: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        Self {
            cols,
            rows,
            tile_size: tile_size.max(1),
            tiles: vec![Tile::Empty; (cols * rows) as usize],
        }
    }

    /// Build from text rows
    ///
    /// Short rows are padded with empty tiles; unknown characters become
    /// empty tiles.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_size: i32) -> Self {
        let cols = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0) as i32;
        let mut grid = Self::new(cols, rows.len() as i32, tile_size);
        let mut unknown = 0;

        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.as_ref().chars().enumerate() {
                let tile = Tile::from_char(c).unwrap_or_else(|| {
                    unknown += 1;
                    Tile::Empty
                });
                grid.set(TileCoord::new(x as i32, y as i32), tile);
            }
        }
        if unknown > 0 {
            log::warn!("Tile layout had {} unknown characters, treated as empty", unknown);
        }
        grid
    }

    /// Inverse of [`TileGrid::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.cols.max(1) as usize)
            .take(self.rows as usize)
            .map(|row| row.iter().map(|t| t.as_char()).collect())
            .collect()
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Grid extent in world units
    pub fn world_size(&self) -> Vector2<f32> {
        Vector2::new(
            (self.cols * self.tile_size) as f32,
            (self.rows * self.tile_size) as f32,
        )
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.cols && coord.y < self.rows
    }

    fn index(&self, coord: TileCoord) -> Option<usize> {
        self.contains(coord)
            .then(|| (coord.y * self.cols + coord.x) as usize)
    }

    /// Tile at `coord`; anything outside the grid is empty
    pub fn get(&self, coord: TileCoord) -> Tile {
        self.index(coord).map(|i| self.tiles[i]).unwrap_or_default()
    }

    /// Place a tile. Returns false outside the grid.
    pub fn set(&mut self, coord: TileCoord, tile: Tile) -> bool {
        match self.index(coord) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Empty a cell, returning what was there
    pub fn clear(&mut self, coord: TileCoord) -> Tile {
        match self.index(coord) {
            Some(i) => std::mem::take(&mut self.tiles[i]),
            None => Tile::Empty,
        }
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// World position -> tile coordinate (floor division by tile size)
    pub fn world_to_tile(&self, pos: Vector2<f32>) -> TileCoord {
        let size = self.tile_size as f32;
        Vector2::new(pos.x / size, pos.y / size).floor_to_i32()
    }

    /// Top-left world position of a tile
    pub fn tile_to_world(&self, coord: TileCoord) -> Vector2<f32> {
        (coord * self.tile_size).as_f32()
    }

    /// World-space bounds of a cell
    pub fn tile_rect(&self, coord: TileCoord) -> AxisAlignedRect<f32> {
        let size = self.tile_size as f32;
        AxisAlignedRect::from_pos_size(self.tile_to_world(coord), Vector2::new(size, size))
    }

    /// Tile under a world position
    pub fn tile_at_world(&self, pos: Vector2<f32>) -> (TileCoord, Tile) {
        let coord = self.world_to_tile(pos);
        (coord, self.get(coord))
    }

    /// Occupied cells in the 3x3 block around the tile containing `center`
    ///
    /// Only the immediate neighborhood is scanned, not the whole level. A
    /// mover that travels more than a tile per tick can skip past obstacles.
    /// Positions far enough off the grid to saturate the tile coordinate
    /// simply find nothing.
    pub fn neighborhood(&self, center: Vector2<f32>, out: &mut Vec<Obstacle>) {
        let origin = self.world_to_tile(center);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (Some(x), Some(y)) = (origin.x.checked_add(dx), origin.y.checked_add(dy)) else {
                    continue;
                };
                let coord = TileCoord::new(x, y);
                if !self.get(coord).is_empty() {
                    out.push(Obstacle {
                        rect: self.tile_rect(coord),
                        tile: Some(coord),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: [&str; 4] = ["....", ".B..", "....", "####"];

    #[test]
    fn test_rows_roundtrip() {
        let grid = TileGrid::from_rows(&LAYOUT, 32);
        assert_eq!((grid.cols(), grid.rows()), (4, 4));
        assert_eq!(grid.get(TileCoord::new(1, 1)), Tile::Brick);
        assert_eq!(grid.get(TileCoord::new(2, 3)), Tile::Solid);
        assert_eq!(grid.to_rows(), LAYOUT.map(String::from).to_vec());
    }

    #[test]
    fn test_ragged_rows_and_unknown_chars() {
        let grid = TileGrid::from_rows(&["#", "#?#"], 16);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.to_rows(), vec!["#..".to_string(), "#.#".to_string()]);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let mut grid = TileGrid::new(2, 2, 10);
        assert_eq!(grid.get(TileCoord::new(-1, 0)), Tile::Empty);
        assert_eq!(grid.get(TileCoord::new(2, 0)), Tile::Empty);
        assert!(!grid.set(TileCoord::new(5, 5), Tile::Solid));
        assert_eq!(grid.clear(TileCoord::new(9, 9)), Tile::Empty);
    }

    #[test]
    fn test_set_and_clear() {
        let mut grid = TileGrid::new(3, 3, 10);
        assert!(grid.set(TileCoord::new(1, 2), Tile::Brick));
        assert_eq!(grid.count(Tile::Brick), 1);
        assert_eq!(grid.clear(TileCoord::new(1, 2)), Tile::Brick);
        assert_eq!(grid.count(Tile::Brick), 0);
    }

    #[test]
    fn test_world_tile_conversion() {
        let grid = TileGrid::new(10, 10, 32);
        assert_eq!(grid.world_to_tile(Vector2::new(0.0, 31.9)), TileCoord::new(0, 0));
        assert_eq!(grid.world_to_tile(Vector2::new(32.0, 64.5)), TileCoord::new(1, 2));
        assert_eq!(grid.world_to_tile(Vector2::new(-0.5, 10.0)), TileCoord::new(-1, 0));
        assert_eq!(grid.tile_to_world(TileCoord::new(3, 1)), Vector2::new(96.0, 32.0));
        let r = grid.tile_rect(TileCoord::new(2, 0));
        assert_eq!((r.left(), r.right(), r.top(), r.bottom()), (64.0, 96.0, 0.0, 32.0));
    }

    #[test]
    fn test_neighborhood_only_scans_3x3() {
        let mut grid = TileGrid::new(10, 10, 10);
        for x in 0..10 {
            grid.set(TileCoord::new(x, 5), Tile::Solid);
        }
        let mut out = Vec::new();
        grid.neighborhood(Vector2::new(45.0, 45.0), &mut out);
        let coords: Vec<_> = out.iter().filter_map(|o| o.tile).collect();
        assert_eq!(
            coords,
            vec![TileCoord::new(3, 5), TileCoord::new(4, 5), TileCoord::new(5, 5)]
        );

        out.clear();
        grid.neighborhood(Vector2::new(45.0, 5.0), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_neighborhood_far_off_grid_is_empty() {
        let grid = TileGrid::from_rows(&LAYOUT, 32);
        let mut out = Vec::new();
        for center in [
            Vector2::new(1e12, 10.0),
            Vector2::new(-1e12, -1e12),
            Vector2::new(10.0, f32::MAX),
            Vector2::new(f32::INFINITY, f32::NEG_INFINITY),
        ] {
            grid.neighborhood(center, &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn test_grid_serializes() {
        let grid = TileGrid::from_rows(&LAYOUT, 8);
        let json = serde_json::to_string(&grid).unwrap();
        let back: TileGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
