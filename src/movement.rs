use crate::camera::Orientation;
use crate::world::Grid;

/// Held inputs for one simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub forward: bool,
    pub back: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRates {
    pub move_rate: f64, // cells per second
    pub turn_rate: f64, // radians per second
}

/// Advances the viewer by one frame of `dt` seconds.
///
/// `None` or a non-finite `dt` leaves the viewer untouched.
pub fn step(
    grid: &Grid,
    view: &mut Orientation,
    controls: Controls,
    dt: Option<f64>,
    rates: MoveRates,
) {
    let Some(dt) = dt.filter(|dt| dt.is_finite()) else {
        return;
    };
    let move_speed = dt * rates.move_rate;
    let rotation_speed = dt * rates.turn_rate;

    if controls.forward {
        slide(grid, view, move_speed);
    }
    if controls.back {
        slide(grid, view, -move_speed);
    }
    if controls.turn_left {
        view.rotate(rotation_speed);
    }
    if controls.turn_right {
        view.rotate(-rotation_speed);
    }
}

/// Moves along `direction` one axis at a time so a blocked axis does not
/// stop motion on the other. The Y check sees the already-moved X.
/// A step that would leave the map counts as blocked.
fn slide(grid: &Grid, view: &mut Orientation, distance: f64) {
    let pos = view.position;
    let dir = view.direction;

    let next_x = pos.x + dir.x * distance;
    if grid.is_open(next_x, pos.y) {
        view.position.x = next_x;
    }

    let next_y = pos.y + dir.y * distance;
    if grid.is_open(view.position.x, next_y) {
        view.position.y = next_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector2;
    use crate::world::walled_room;
    use pretty_assertions::assert_eq;

    const RATES: MoveRates = MoveRates {
        move_rate: 3.0,
        turn_rate: 2.0,
    };

    fn forward() -> Controls {
        Controls {
            forward: true,
            ..Controls::default()
        }
    }

    fn viewer(x: f64, y: f64, dx: f64, dy: f64) -> Orientation {
        Orientation::new(Vector2::new(x, y), Vector2::new(dx, dy), 0.66)
    }

    #[test]
    fn missing_or_infinite_frame_time_is_a_no_op() {
        let grid = walled_room(8);
        let start = viewer(3.5, 3.5, 1.0, 0.0);
        let all = Controls {
            forward: true,
            back: false,
            turn_left: true,
            turn_right: false,
        };
        for dt in [None, Some(f64::INFINITY), Some(f64::NAN)] {
            let mut v = start;
            step(&grid, &mut v, all, dt, RATES);
            assert_eq!(v, start);
        }
    }

    #[test]
    fn forward_and_back_scale_with_frame_time() {
        let grid = walled_room(8);
        let mut v = viewer(3.5, 3.5, 1.0, 0.0);
        step(&grid, &mut v, forward(), Some(0.5), RATES);
        assert_eq!(v.position, Vector2::new(5.0, 3.5));

        let back = Controls {
            back: true,
            ..Controls::default()
        };
        step(&grid, &mut v, back, Some(0.25), RATES);
        assert_eq!(v.position, Vector2::new(4.25, 3.5));
    }

    #[test]
    fn wall_blocks_motion_into_it() {
        let grid = walled_room(5);
        let mut v = viewer(3.5, 2.5, 1.0, 0.0);
        step(&grid, &mut v, forward(), Some(0.3), RATES);
        assert_eq!(v.position, Vector2::new(3.5, 2.5));
    }

    #[test]
    fn huge_step_past_the_border_is_blocked() {
        let grid = walled_room(5);
        let mut v = viewer(2.5, 2.5, 0.0, 1.0);
        step(&grid, &mut v, forward(), Some(10.0), RATES);
        assert_eq!(v.position, Vector2::new(2.5, 2.5));
    }

    #[test]
    fn diagonal_move_slides_along_wall() {
        // Row 3 is a wall; heading south-east the Y move is refused and the
        // X move still happens.
        let grid = Grid::from_rows(&[
            [1, 1, 1, 1, 1],
            [1, 0, 0, 0, 1],
            [1, 0, 0, 0, 1],
            [1, 1, 1, 1, 1],
        ])
        .unwrap();
        let mut v = viewer(1.5, 2.5, 1.0, 1.0);
        let rates = MoveRates {
            move_rate: 1.0,
            turn_rate: 0.0,
        };
        step(&grid, &mut v, forward(), Some(1.0), rates);

        let expected_x = 1.5 + std::f64::consts::FRAC_1_SQRT_2;
        assert!((v.position.x - expected_x).abs() < 1e-12);
        assert_eq!(v.position.y, 2.5);
    }

    #[test]
    fn y_check_uses_the_moved_x() {
        // Moving to x = 2.x puts the Y move over the wall at (2, 1);
        // checking against the old x = 1 would have let it through.
        let grid = Grid::from_rows(&[
            [1, 1, 1, 1, 1],
            [1, 0, 1, 0, 1],
            [1, 0, 0, 0, 1],
            [1, 1, 1, 1, 1],
        ])
        .unwrap();
        let mut v = viewer(1.8, 2.2, 1.0, -1.0);
        let rates = MoveRates {
            move_rate: 0.5,
            turn_rate: 0.0,
        };
        step(&grid, &mut v, forward(), Some(1.0), rates);

        assert!(v.position.x > 2.0);
        assert_eq!(v.position.y, 2.2);
    }

    #[test]
    fn turning_uses_turn_rate_and_sign() {
        let grid = walled_room(5);
        let mut left = viewer(2.5, 2.5, -1.0, 0.0);
        let mut right = left;
        let turn = |l, r| Controls {
            turn_left: l,
            turn_right: r,
            ..Controls::default()
        };
        step(&grid, &mut left, turn(true, false), Some(0.1), RATES);
        step(&grid, &mut right, turn(false, true), Some(0.1), RATES);

        let mut expected = viewer(2.5, 2.5, -1.0, 0.0);
        expected.rotate(0.2);
        assert_eq!(left, expected);
        expected.rotate(-0.4);
        assert!((right.direction - expected.direction).length() < 1e-12);
        assert_eq!(left.position, right.position);
    }
}
