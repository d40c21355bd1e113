use crate::world::{EMPTY, Material};

#[inline]
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB in a u32, which is what softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

/// Halves every channel.
#[inline]
pub const fn shade(color: u32) -> u32 {
    (color >> 1) & 0x007F_7F7F
}

/// Colors for everything the renderer and minimap paint.
#[derive(Debug, Clone)]
pub struct Palette {
    walls: Vec<u32>, // index 0 is material 1
    pub sky: u32,
    pub ground: u32,
    pub floor_tile: u32,
    pub marker: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            walls: vec![
                pack_rgb(0, 255, 0),
                pack_rgb(0, 0, 255),
                pack_rgb(255, 255, 0),
                pack_rgb(0, 255, 255),
                pack_rgb(255, 0, 255),
            ],
            sky: pack_rgb(30, 30, 70),
            ground: pack_rgb(40, 40, 40),
            floor_tile: pack_rgb(20, 20, 20),
            marker: pack_rgb(255, 255, 255),
        }
    }
}

impl Palette {
    /// Color of a wall material. Ids past the table wrap around.
    pub fn wall(&self, material: Material) -> u32 {
        debug_assert_ne!(material, EMPTY, "empty cells have no wall color");
        let idx = (material as usize).saturating_sub(1) % self.walls.len();
        self.walls[idx]
    }

    /// Minimap color of a cell, walls or floor.
    pub fn tile(&self, material: Material) -> u32 {
        if material == EMPTY {
            self.floor_tile
        } else {
            self.wall(material)
        }
    }
}
