use std::collections::hash_map::RandomState;
use std::collections::HashSet;
use std::hash::BuildHasher;

use tracing::{debug, trace};

use grid::{ArrayView, BitGridView, Distance, GridError, GridView, Point, Result, SettableGridView};

use crate::calculation::{Cone, FovCalculation};
use crate::shadowcast;

/// Result backing. Both variants expose identical observable behavior;
/// they differ only in which representation is primary.
enum Storage {
    /// Bit-packed visibility; brightness is recomputed from the recorded
    /// calculations on read.
    Boolean(BitGridView),
    /// Dense brightness values; visibility reads as `value > 0`.
    Scalar(ArrayView<f64>),
}

/// Field-of-view engine over a transparency view (`true` = see-through).
///
/// Dimensions are pinned to the transparency view at construction. Each
/// call to [`calculate`](Fov::calculate) replaces the visible set; the
/// `calculate_append` variants accumulate instead. The engine tracks the
/// visible set before the most recent mutation so callers can diff.
pub struct Fov<V, S = RandomState>
where
    V: GridView<Item = bool>,
{
    transparency: V,
    storage: Storage,
    current: HashSet<Point, S>,
    previous: HashSet<Point, S>,
    calculations: Vec<FovCalculation>,
    recalculated_hooks: Vec<Box<dyn FnMut(&FovCalculation)>>,
    reset_hooks: Vec<Box<dyn FnMut()>>,
}

impl<V: GridView<Item = bool>> Fov<V> {
    /// Engine with a bit-packed boolean backing.
    pub fn boolean(transparency: V) -> Result<Self> {
        Self::boolean_with_hasher(transparency, RandomState::new())
    }

    /// Engine with a dense `f64` brightness backing.
    pub fn scalar(transparency: V) -> Result<Self> {
        Self::scalar_with_hasher(transparency, RandomState::new())
    }
}

impl<V, S> Fov<V, S>
where
    V: GridView<Item = bool>,
    S: BuildHasher + Clone,
{
    pub fn boolean_with_hasher(transparency: V, hasher: S) -> Result<Self> {
        let storage = Storage::Boolean(BitGridView::new(
            transparency.width(),
            transparency.height(),
        )?);
        Ok(Self::with_storage(transparency, storage, hasher))
    }

    pub fn scalar_with_hasher(transparency: V, hasher: S) -> Result<Self> {
        let storage = Storage::Scalar(ArrayView::new(
            transparency.width(),
            transparency.height(),
        )?);
        Ok(Self::with_storage(transparency, storage, hasher))
    }

    fn with_storage(transparency: V, storage: Storage, hasher: S) -> Self {
        Self {
            transparency,
            storage,
            current: HashSet::with_hasher(hasher.clone()),
            previous: HashSet::with_hasher(hasher),
            calculations: Vec::new(),
            recalculated_hooks: Vec::new(),
            reset_hooks: Vec::new(),
        }
    }
}

impl<V, S> Fov<V, S>
where
    V: GridView<Item = bool>,
    S: BuildHasher,
{
    pub fn transparency(&self) -> &V {
        &self.transparency
    }

    /// Calculations recorded since the last reset, in call order.
    pub fn calculations(&self) -> &[FovCalculation] {
        &self.calculations
    }

    /// The currently visible positions.
    pub fn current_fov(&self) -> &HashSet<Point, S> {
        &self.current
    }

    /// Positions visible now that were not before the last mutation.
    pub fn newly_seen(&self) -> impl Iterator<Item = Point> + '_ {
        self.current.difference(&self.previous).copied()
    }

    /// Positions visible before the last mutation that no longer are.
    pub fn newly_unseen(&self) -> impl Iterator<Item = Point> + '_ {
        self.previous.difference(&self.current).copied()
    }

    /// Registers a callback fired after every completed calculation.
    pub fn on_recalculated(&mut self, callback: impl FnMut(&FovCalculation) + 'static) {
        self.recalculated_hooks.push(Box::new(callback));
    }

    /// Registers a callback fired after every completed reset.
    pub fn on_reset(&mut self, callback: impl FnMut() + 'static) {
        self.reset_hooks.push(Box::new(callback));
    }

    /// Whether `pos` is currently visible.
    pub fn visibility_at(&self, pos: Point) -> Result<bool> {
        match &self.storage {
            Storage::Boolean(bits) => bits.get(pos),
            Storage::Scalar(values) => Ok(values.get(pos)? > 0.0),
        }
    }

    /// Brightness at `pos`: 0 when not visible, 1 at a calculation origin,
    /// otherwise in (0, 1] falling off with distance. When several
    /// calculations light a cell the maximum wins.
    pub fn brightness_at(&self, pos: Point) -> Result<f64> {
        match &self.storage {
            Storage::Boolean(bits) => {
                if !bits.get(pos)? {
                    return Ok(0.0);
                }
                let best = self.calculations.iter().fold(0.0f64, |acc, calc| {
                    let bright =
                        1.0 - calc.distance.calculate(calc.origin, pos) / (calc.radius + 1.0);
                    acc.max(bright)
                });
                Ok(best)
            }
            Storage::Scalar(values) => values.get(pos),
        }
    }

    /// Read-only boolean view of the current result.
    pub fn boolean_result(&self) -> BooleanResult<'_, V, S> {
        BooleanResult { fov: self }
    }

    /// Read-only brightness view of the current result.
    pub fn scalar_result(&self) -> ScalarResult<'_, V, S> {
        ScalarResult { fov: self }
    }

    /// Computes visibility from `origin`, replacing any previous result.
    ///
    /// A radius below 1 is clamped to 1.
    pub fn calculate(&mut self, origin: Point, radius: f64, distance: Distance) -> Result<()> {
        self.run(origin, radius, distance, None, true)
    }

    /// Cone-restricted [`calculate`](Self::calculate). `angle_deg` uses the
    /// compass convention (0 = up, clockwise); `span_deg` is the full arc
    /// width and must lie in `[0, 360]`.
    pub fn calculate_cone(
        &mut self,
        origin: Point,
        radius: f64,
        distance: Distance,
        angle_deg: f64,
        span_deg: f64,
    ) -> Result<()> {
        self.run(origin, radius, distance, Some(Cone::new(angle_deg, span_deg)), true)
    }

    /// Like [`calculate`](Self::calculate) but accumulates on top of the
    /// existing result instead of resetting it.
    pub fn calculate_append(
        &mut self,
        origin: Point,
        radius: f64,
        distance: Distance,
    ) -> Result<()> {
        self.run(origin, radius, distance, None, false)
    }

    /// Cone-restricted [`calculate_append`](Self::calculate_append).
    pub fn calculate_append_cone(
        &mut self,
        origin: Point,
        radius: f64,
        distance: Distance,
        angle_deg: f64,
        span_deg: f64,
    ) -> Result<()> {
        self.run(origin, radius, distance, Some(Cone::new(angle_deg, span_deg)), false)
    }

    /// Clears the result: the visible set rotates into the previous set,
    /// the backing zeroes, and recorded calculations are dropped.
    pub fn reset(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
        match &mut self.storage {
            Storage::Boolean(bits) => bits.fill(false),
            Storage::Scalar(values) => values.fill(0.0),
        }
        self.calculations.clear();
        for hook in &mut self.reset_hooks {
            hook();
        }
        trace!("fov visibility reset");
    }

    fn run(
        &mut self,
        origin: Point,
        radius: f64,
        distance: Distance,
        cone: Option<Cone>,
        reset_first: bool,
    ) -> Result<()> {
        // Validate everything before touching state.
        self.transparency.bounds_check(origin)?;
        if let Some(cone) = &cone {
            if !cone.angle_deg.is_finite() {
                return Err(GridError::InvalidParameter {
                    what: format!("cone angle must be finite, got {}", cone.angle_deg),
                });
            }
            if !(0.0..=360.0).contains(&cone.span_deg) {
                return Err(GridError::InvalidParameter {
                    what: format!("cone span must be within [0, 360], got {}", cone.span_deg),
                });
            }
        }

        if reset_first {
            self.reset();
        } else {
            // Snapshot the pre-call visible set so the delta accessors
            // compare against it.
            self.previous.clear();
            self.previous.extend(self.current.iter().copied());
        }

        let calc = FovCalculation {
            origin,
            radius: radius.max(1.0),
            distance,
            cone,
        };

        let storage = &mut self.storage;
        let current = &mut self.current;
        shadowcast::sweep(&self.transparency, &calc, &mut |pos, brightness| {
            match storage {
                Storage::Boolean(bits) => {
                    let _ = bits.set(pos, true);
                }
                Storage::Scalar(values) => {
                    if brightness > values.get(pos).unwrap_or(f64::MAX) {
                        let _ = values.set(pos, brightness);
                    }
                }
            }
            current.insert(pos);
        });

        self.calculations.push(calc);
        for hook in &mut self.recalculated_hooks {
            hook(&calc);
        }
        debug!(
            origin.x = origin.x,
            origin.y = origin.y,
            radius = calc.radius,
            visible = self.current.len(),
            "fov recalculated"
        );
        Ok(())
    }
}

/// Boolean adapter over a borrowed [`Fov`].
pub struct BooleanResult<'a, V, S>
where
    V: GridView<Item = bool>,
{
    fov: &'a Fov<V, S>,
}

impl<V, S> GridView for BooleanResult<'_, V, S>
where
    V: GridView<Item = bool>,
    S: BuildHasher,
{
    type Item = bool;

    fn width(&self) -> i32 {
        self.fov.transparency.width()
    }

    fn height(&self) -> i32 {
        self.fov.transparency.height()
    }

    fn get(&self, pos: Point) -> Result<bool> {
        self.fov.visibility_at(pos)
    }
}

/// Brightness adapter over a borrowed [`Fov`].
pub struct ScalarResult<'a, V, S>
where
    V: GridView<Item = bool>,
{
    fov: &'a Fov<V, S>,
}

impl<V, S> GridView for ScalarResult<'_, V, S>
where
    V: GridView<Item = bool>,
    S: BuildHasher,
{
    type Item = f64;

    fn width(&self) -> i32 {
        self.fov.transparency.width()
    }

    fn height(&self) -> i32 {
        self.fov.transparency.height()
    }

    fn get(&self, pos: Point) -> Result<f64> {
        self.fov.brightness_at(pos)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use grid::ascii::parse_bit_grid;

    use super::*;

    fn open_grid(width: i32, height: i32) -> BitGridView {
        BitGridView::filled(width, height, true).unwrap()
    }

    #[test]
    fn test_origin_always_visible() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(5, 5), 10.0, Distance::Chebyshev)
            .unwrap();
        assert!(fov.visibility_at(Point::new(5, 5)).unwrap());
        assert_eq!(fov.brightness_at(Point::new(5, 5)).unwrap(), 1.0);
    }

    #[test]
    fn test_open_grid_fully_visible() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(5, 5), 10.0, Distance::Chebyshev)
            .unwrap();
        assert_eq!(fov.current_fov().len(), 121);
        let result = fov.boolean_result();
        assert!(result.positions().all(|p| result.get(p).unwrap()));
    }

    #[test]
    fn test_radius_limits_visibility() {
        let map = open_grid(21, 21);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(10, 10), 3.0, Distance::Chebyshev)
            .unwrap();
        assert!(fov.visibility_at(Point::new(13, 10)).unwrap());
        assert!(!fov.visibility_at(Point::new(14, 10)).unwrap());
        assert_eq!(fov.current_fov().len(), 49);
    }

    #[test]
    fn test_radius_one_sees_origin_and_neighbors() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(5, 5), 1.0, Distance::Chebyshev)
            .unwrap();
        assert_eq!(fov.current_fov().len(), 9);

        // Under Manhattan distance the diagonals fall outside radius 1.
        fov.calculate(Point::new(5, 5), 1.0, Distance::Manhattan)
            .unwrap();
        assert_eq!(fov.current_fov().len(), 5);
        assert!(!fov.visibility_at(Point::new(6, 6)).unwrap());
    }

    #[test]
    fn test_radius_below_one_clamps() {
        let map = open_grid(5, 5);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(2, 2), 0.25, Distance::Chebyshev)
            .unwrap();
        assert_eq!(fov.calculations()[0].radius, 1.0);
        assert!(fov.visibility_at(Point::new(3, 2)).unwrap());
    }

    #[test]
    fn test_wall_shadows_cells_behind_it() {
        let map = parse_bit_grid(
            "...........
             ...........
             ...........
             ...........
             ...........
             .....#.....
             ...........
             ...........
             ...........
             ...........
             ...........",
            ".",
        )
        .unwrap();
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(5, 4), 10.0, Distance::Chebyshev)
            .unwrap();
        // The wall itself is visible, the column straight behind it is not.
        assert!(fov.visibility_at(Point::new(5, 5)).unwrap());
        for y in 6..11 {
            assert!(!fov.visibility_at(Point::new(5, y)).unwrap(), "y = {y}");
        }
        // Off-axis cells around the shadow stay lit.
        assert!(fov.visibility_at(Point::new(4, 6)).unwrap());
        assert!(fov.visibility_at(Point::new(6, 6)).unwrap());
    }

    #[test]
    fn test_boolean_and_scalar_variants_agree_behind_walls() {
        let map = parse_bit_grid(
            "..........
             ....#.....
             ..........
             ..#.......
             ..........",
            ".",
        )
        .unwrap();
        let mut boolean = Fov::boolean(&map).unwrap();
        let mut scalar = Fov::scalar(&map).unwrap();
        for fov in [&mut boolean, &mut scalar] {
            fov.calculate(Point::new(1, 2), 6.0, Distance::Euclidean)
                .unwrap();
        }

        for pos in boolean.boolean_result().positions() {
            assert_eq!(
                boolean.visibility_at(pos).unwrap(),
                scalar.visibility_at(pos).unwrap(),
                "visibility mismatch at {pos:?}"
            );
            let a = boolean.brightness_at(pos).unwrap();
            let b = scalar.brightness_at(pos).unwrap();
            assert!((a - b).abs() < 1e-9, "brightness mismatch at {pos:?}");
        }
    }

    #[test]
    fn test_boolean_and_scalar_variants_agree_on_appends() {
        let map = open_grid(11, 7);
        let mut boolean = Fov::boolean(&map).unwrap();
        let mut scalar = Fov::scalar(&map).unwrap();
        for fov in [&mut boolean, &mut scalar] {
            fov.calculate_append(Point::new(2, 3), 3.0, Distance::Euclidean)
                .unwrap();
            fov.calculate_append(Point::new(8, 3), 3.0, Distance::Euclidean)
                .unwrap();
        }

        assert_eq!(boolean.current_fov(), scalar.current_fov());
        for pos in boolean.boolean_result().positions() {
            let a = boolean.brightness_at(pos).unwrap();
            let b = scalar.brightness_at(pos).unwrap();
            assert!((a - b).abs() < 1e-9, "brightness mismatch at {pos:?}");
        }
    }

    #[test]
    fn test_visibility_matches_positive_brightness() {
        let map = parse_bit_grid(
            "........
             ..#.....
             ........
             .....#..
             ........",
            ".",
        )
        .unwrap();
        let mut fov = Fov::scalar(&map).unwrap();
        fov.calculate(Point::new(0, 0), 5.0, Distance::Chebyshev)
            .unwrap();
        for pos in fov.boolean_result().positions() {
            let visible = fov.visibility_at(pos).unwrap();
            let bright = fov.brightness_at(pos).unwrap();
            assert_eq!(visible, bright > 0.0);
        }
    }

    #[test]
    fn test_append_keeps_both_calculations() {
        let map = open_grid(11, 11);
        let mut fov = Fov::scalar(&map).unwrap();
        fov.calculate_append(Point::new(2, 5), 3.0, Distance::Chebyshev)
            .unwrap();
        fov.calculate_append(Point::new(8, 5), 3.0, Distance::Chebyshev)
            .unwrap();

        assert_eq!(fov.calculations().len(), 2);
        assert!(fov.visibility_at(Point::new(0, 5)).unwrap());
        assert!(fov.visibility_at(Point::new(10, 5)).unwrap());
        assert_eq!(fov.brightness_at(Point::new(2, 5)).unwrap(), 1.0);
        assert_eq!(fov.brightness_at(Point::new(8, 5)).unwrap(), 1.0);
    }

    #[test]
    fn test_append_deltas_are_relative_to_previous_call() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate_append(Point::new(2, 5), 3.0, Distance::Chebyshev)
            .unwrap();
        let first: HashSet<Point> = fov.current_fov().iter().copied().collect();
        fov.calculate_append(Point::new(8, 5), 3.0, Distance::Chebyshev)
            .unwrap();

        let newly: HashSet<Point> = fov.newly_seen().collect();
        assert!(!newly.is_empty());
        assert!(newly.iter().all(|p| !first.contains(p)));
        assert!(newly.contains(&Point::new(10, 5)));
        // Appending never hides anything.
        assert_eq!(fov.newly_unseen().count(), 0);
    }

    #[test]
    fn test_deltas_across_recalculation() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(2, 5), 2.0, Distance::Chebyshev)
            .unwrap();
        let first: HashSet<Point> = fov.current_fov().iter().copied().collect();
        fov.calculate(Point::new(8, 5), 2.0, Distance::Chebyshev)
            .unwrap();

        let newly_seen: HashSet<Point> = fov.newly_seen().collect();
        let newly_unseen: HashSet<Point> = fov.newly_unseen().collect();
        assert!(newly_seen.contains(&Point::new(10, 5)));
        assert!(newly_unseen.contains(&Point::new(0, 5)));
        assert!(newly_seen.is_disjoint(&newly_unseen));
        assert!(first.iter().all(|p| !newly_seen.contains(p)));
    }

    #[test]
    fn test_append_is_idempotent_for_identical_parameters() {
        let map = open_grid(9, 9);
        let mut once = Fov::boolean(&map).unwrap();
        once.calculate_append(Point::new(4, 4), 3.0, Distance::Chebyshev)
            .unwrap();
        let mut twice = Fov::boolean(&map).unwrap();
        twice
            .calculate_append(Point::new(4, 4), 3.0, Distance::Chebyshev)
            .unwrap();
        twice
            .calculate_append(Point::new(4, 4), 3.0, Distance::Chebyshev)
            .unwrap();

        assert_eq!(once.current_fov(), twice.current_fov());
        for pos in once.boolean_result().positions() {
            assert_eq!(
                once.brightness_at(pos).unwrap(),
                twice.brightness_at(pos).unwrap()
            );
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let map = open_grid(7, 7);
        let mut fov = Fov::scalar(&map).unwrap();
        fov.calculate(Point::new(3, 3), 4.0, Distance::Chebyshev)
            .unwrap();
        let seen: HashSet<Point> = fov.current_fov().iter().copied().collect();
        fov.reset();

        assert!(fov.current_fov().is_empty());
        assert!(fov.calculations().is_empty());
        assert!(fov
            .boolean_result()
            .positions()
            .all(|p| !fov.visibility_at(p).unwrap()));
        // The pre-reset set is retained for diffing until the next call.
        let unseen: HashSet<Point> = fov.newly_unseen().collect();
        assert_eq!(unseen, seen);

        // A second reset changes nothing observable on the result side.
        fov.reset();
        assert!(fov.current_fov().is_empty());
        assert!(fov.calculations().is_empty());
    }

    #[test]
    fn test_cone_points_up() {
        let map = open_grid(11, 11);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate_cone(Point::new(5, 5), 4.0, Distance::Chebyshev, 0.0, 90.0)
            .unwrap();
        assert!(fov.visibility_at(Point::new(5, 3)).unwrap());
        assert!(fov.visibility_at(Point::new(6, 3)).unwrap());
        assert!(!fov.visibility_at(Point::new(5, 7)).unwrap());
        assert!(!fov.visibility_at(Point::new(8, 5)).unwrap());
        assert!(!fov.visibility_at(Point::new(2, 5)).unwrap());
    }

    #[test]
    fn test_full_span_cone_equals_unrestricted() {
        let map = parse_bit_grid(
            ".........
             ...#.....
             .........
             ......#..
             .........",
            ".",
        )
        .unwrap();
        let mut plain = Fov::boolean(&map).unwrap();
        plain
            .calculate(Point::new(4, 2), 6.0, Distance::Chebyshev)
            .unwrap();
        let mut cone = Fov::boolean(&map).unwrap();
        cone.calculate_cone(Point::new(4, 2), 6.0, Distance::Chebyshev, 123.0, 360.0)
            .unwrap();
        assert_eq!(plain.current_fov(), cone.current_fov());
    }

    #[test]
    fn test_invalid_parameters_rejected_before_mutation() {
        let map = open_grid(5, 5);
        let mut fov = Fov::boolean(&map).unwrap();
        fov.calculate(Point::new(2, 2), 2.0, Distance::Chebyshev)
            .unwrap();
        let seen = fov.current_fov().len();

        assert!(matches!(
            fov.calculate(Point::new(9, 2), 2.0, Distance::Chebyshev),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            fov.calculate_cone(Point::new(2, 2), 2.0, Distance::Chebyshev, 0.0, -1.0),
            Err(GridError::InvalidParameter { .. })
        ));
        assert!(matches!(
            fov.calculate_cone(Point::new(2, 2), 2.0, Distance::Chebyshev, 0.0, 361.0),
            Err(GridError::InvalidParameter { .. })
        ));
        // The failed calls left the prior result untouched.
        assert_eq!(fov.current_fov().len(), seen);
        assert_eq!(fov.calculations().len(), 1);
    }

    #[test]
    fn test_callbacks_fire_after_mutation() {
        let map = open_grid(5, 5);
        let mut fov = Fov::boolean(&map).unwrap();
        let recalculations = Rc::new(Cell::new(0));
        let resets = Rc::new(Cell::new(0));
        {
            let recalculations = Rc::clone(&recalculations);
            fov.on_recalculated(move |calc| {
                assert_eq!(calc.origin, Point::new(2, 2));
                recalculations.set(recalculations.get() + 1);
            });
        }
        {
            let resets = Rc::clone(&resets);
            fov.on_reset(move || resets.set(resets.get() + 1));
        }

        fov.calculate(Point::new(2, 2), 3.0, Distance::Chebyshev)
            .unwrap();
        assert_eq!(recalculations.get(), 1);
        assert_eq!(resets.get(), 1);

        fov.calculate_append(Point::new(2, 2), 3.0, Distance::Chebyshev)
            .unwrap();
        assert_eq!(recalculations.get(), 2);
        assert_eq!(resets.get(), 1);

        fov.reset();
        assert_eq!(resets.get(), 2);
    }

    #[test]
    fn test_symmetry_across_a_wall() {
        let map = parse_bit_grid(
            ".........
             ....#....
             .........",
            ".",
        )
        .unwrap();
        // (1, 1) and (7, 1) sit on either side of the wall at (4, 1), so
        // neither sees the other; the off-row pair sees each other fine.
        for (a, b, expected) in [
            (Point::new(1, 1), Point::new(7, 1), false),
            (Point::new(1, 2), Point::new(7, 2), true),
        ] {
            let mut from_a = Fov::boolean(&map).unwrap();
            from_a.calculate(a, 10.0, Distance::Chebyshev).unwrap();
            let mut from_b = Fov::boolean(&map).unwrap();
            from_b.calculate(b, 10.0, Distance::Chebyshev).unwrap();
            assert_eq!(from_a.visibility_at(b).unwrap(), expected);
            assert_eq!(
                from_a.visibility_at(b).unwrap(),
                from_b.visibility_at(a).unwrap()
            );
        }
    }
}
