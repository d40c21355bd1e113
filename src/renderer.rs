use rayon::prelude::*;

use crate::camera::Orientation;
use crate::canvas::{Canvas, FrameBuffer};
use crate::palette::{Palette, shade};
use crate::vector::Vector2;
use crate::world::{EMPTY, Grid, Material};

// Stand-in for 1/0 on an axis the ray never moves along
const UNREACHABLE: f64 = 1e30;
// Smallest distance used for projection; a viewer touching a wall face
// gets a very tall but finite slice
const MIN_PERP_DIST: f64 = 1e-6;
const MAX_LINE_HEIGHT: f64 = (1 << 24) as f64;

/// Which family of grid lines the ray crossed last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Stepped along X; an east or west face.
    X,
    /// Stepped along Y; a north or south face.
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub map_x: usize,
    pub map_y: usize,
    pub material: Material,
    pub side: Side,
    /// Distance along the view direction, not along the ray.
    pub perp_dist: f64,
}

/// One vertical strip of the 3D view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub column: u32,
    pub draw_start: i32,
    pub draw_end: i32,
    pub material: Material,
    pub shaded: bool,
}

/// Walks the grid from `origin` along `ray_dir` until a wall cell is entered.
///
/// `origin` must be inside the grid. The closed border of every `Grid`
/// guarantees the walk ends.
pub fn cast_ray(grid: &Grid, origin: Vector2, ray_dir: Vector2) -> Hit {
    let mut map_x = origin.x as i64;
    let mut map_y = origin.y as i64;

    // Ray length between two consecutive x (or y) grid lines
    let delta_x = if ray_dir.x == 0.0 { UNREACHABLE } else { (1.0 / ray_dir.x).abs() };
    let delta_y = if ray_dir.y == 0.0 { UNREACHABLE } else { (1.0 / ray_dir.y).abs() };

    // Ray length from the origin to the first x (or y) grid line
    let (step_x, mut side_x) = if ray_dir.x < 0.0 {
        (-1, (origin.x - map_x as f64) * delta_x)
    } else {
        (1, (map_x as f64 + 1.0 - origin.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray_dir.y < 0.0 {
        (-1, (origin.y - map_y as f64) * delta_y)
    } else {
        (1, (map_y as f64 + 1.0 - origin.y) * delta_y)
    };

    let mut side;
    let material = loop {
        if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            side = Side::X;
        } else {
            side_y += delta_y;
            map_y += step_y;
            side = Side::Y;
        }
        let m = grid.cell(map_x as usize, map_y as usize);
        if m != EMPTY {
            break m;
        }
    };

    let perp_dist = match side {
        Side::X => side_x - delta_x,
        Side::Y => side_y - delta_y,
    };

    Hit {
        map_x: map_x as usize,
        map_y: map_y as usize,
        material,
        side,
        perp_dist,
    }
}

/// Top and bottom rows of a wall at `perp_dist` on a screen `height` tall.
pub fn line_extent(perp_dist: f64, height: u32) -> (i32, i32) {
    let h = height as i32;
    let dist = if perp_dist > MIN_PERP_DIST { perp_dist } else { MIN_PERP_DIST };
    let line_height = (height as f64 / dist).min(MAX_LINE_HEIGHT) as i32;

    let draw_start = (-line_height / 2 + h / 2).max(0);
    let draw_end = (line_height / 2 + h / 2).min(h - 1);
    (draw_start, draw_end)
}

/// Casts the ray for screen column `x` of a `width`x`height` view.
pub fn cast_column(grid: &Grid, view: &Orientation, x: u32, width: u32, height: u32) -> Slice {
    let camera_x = 2.0 * x as f64 / width as f64 - 1.0;
    let hit = cast_ray(grid, view.position, view.ray_direction(camera_x));
    let (draw_start, draw_end) = line_extent(hit.perp_dist, height);

    Slice {
        column: x,
        draw_start,
        draw_end,
        material: hit.material,
        shaded: hit.side == Side::Y,
    }
}

/// Every column of the view, left to right. Columns are cast in parallel
/// against a copy of `view`.
pub fn project(grid: &Grid, view: &Orientation, width: u32, height: u32) -> Vec<Slice> {
    let snapshot = *view;
    (0..width)
        .into_par_iter()
        .map(|x| cast_column(grid, &snapshot, x, width, height))
        .collect()
}

pub fn draw_slices<C: Canvas + ?Sized>(canvas: &mut C, slices: &[Slice], palette: &Palette) {
    for s in slices {
        let base = palette.wall(s.material);
        let color = if s.shaded { shade(base) } else { base };
        canvas.vertical_line(s.column as i32, s.draw_start, s.draw_end, color);
    }
}

/// Clears to sky and ground, then draws the walls seen from `view`.
pub fn render_frame(fb: &mut FrameBuffer<'_>, grid: &Grid, view: &Orientation, palette: &Palette) {
    let (width, height) = (fb.width(), fb.height());
    let mid = height / 2;
    fb.fill_rows(0, mid, palette.sky);
    fb.fill_rows(mid, height, palette.ground);

    let slices = project(grid, view, width as u32, height as u32);
    draw_slices(fb, &slices, palette);
}
