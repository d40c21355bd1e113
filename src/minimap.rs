use crate::camera::Orientation;
use crate::canvas::Canvas;
use crate::palette::Palette;
use crate::world::Grid;

const MARKER_RADIUS: f64 = 2.0;
const HEADING_LENGTH: f64 = 5.0; // pixels per unit of direction

/// Top-down view of the map scaled into a `width`x`height` box at the
/// canvas origin, with the viewer as a dot and a short heading line.
pub fn render_minimap<C: Canvas + ?Sized>(
    canvas: &mut C,
    grid: &Grid,
    view: &Orientation,
    palette: &Palette,
    width: u32,
    height: u32,
) {
    let tile_w = width as f64 / grid.width() as f64;
    let tile_h = height as f64 / grid.height() as f64;

    for (y, row) in grid.rows().enumerate() {
        for (x, &material) in row.iter().enumerate() {
            canvas.fill_rect(
                x as f64 * tile_w,
                y as f64 * tile_h,
                tile_w,
                tile_h,
                palette.tile(material),
            );
        }
    }

    let px = view.position.x * tile_w;
    let py = view.position.y * tile_h;
    canvas.fill_circle(px, py, MARKER_RADIUS, palette.marker);
    canvas.line(
        px,
        py,
        px + HEADING_LENGTH * view.direction.x,
        py + HEADING_LENGTH * view.direction.y,
        palette.marker,
    );
}
