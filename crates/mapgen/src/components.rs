//! Connected-component discovery on walkability grids.

use std::collections::VecDeque;

use tracing::debug;

use grid::{Area, BitGridView, Distance, GridView, SettableGridView};

/// Finds every maximal connected region of `true` cells.
///
/// Adjacency follows the metric: Manhattan connects four ways, the others
/// eight. Components are emitted in the order their first cell appears in
/// a row-major scan; positions within a component carry no ordering
/// guarantee. Runs in O(width * height).
pub fn find_components<V: GridView<Item = bool>>(view: &V, distance: Distance) -> Vec<Area> {
    let neighbors = distance.adjacency();
    let mut visited = match BitGridView::new(view.width(), view.height()) {
        Ok(visited) => visited,
        // Dimensions come from an existing view, so this cannot fail; an
        // empty view has no components either way.
        Err(_) => return Vec::new(),
    };

    let mut areas = Vec::new();
    for start in view.positions() {
        if visited.get(start).unwrap_or(true) || !view.get(start).unwrap_or(false) {
            continue;
        }

        let mut area = Area::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let _ = visited.set(start, true);

        while let Some(current) = queue.pop_front() {
            area.add(current);
            for &direction in neighbors {
                let next = current + direction;
                if !view.in_bounds(next)
                    || visited.get(next).unwrap_or(true)
                    || !view.get(next).unwrap_or(false)
                {
                    continue;
                }
                let _ = visited.set(next, true);
                queue.push_back(next);
            }
        }
        areas.push(area);
    }

    debug!(
        components = areas.len(),
        width = view.width(),
        height = view.height(),
        "connected components found"
    );
    areas
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use grid::ascii::parse_bit_grid;
    use grid::Point;

    use super::*;

    #[test]
    fn test_four_way_vs_eight_way() {
        let map = parse_bit_grid(
            "#####
             #.#.#
             #..##
             #####",
            ".",
        )
        .unwrap();

        let mut four_way = find_components(&map, Distance::Manhattan);
        four_way.sort_by_key(Area::len);
        assert_eq!(four_way.len(), 2);
        assert_eq!(four_way[0].len(), 1);
        assert_eq!(four_way[1].len(), 3);

        let eight_way = find_components(&map, Distance::Chebyshev);
        assert_eq!(eight_way.len(), 1);
        assert_eq!(eight_way[0].len(), 4);
    }

    #[test]
    fn test_empty_grid_has_no_components() {
        let map = BitGridView::new(6, 4).unwrap();
        assert!(find_components(&map, Distance::Chebyshev).is_empty());
    }

    #[test]
    fn test_full_grid_is_one_component() {
        let map = BitGridView::filled(6, 4, true).unwrap();
        let areas = find_components(&map, Distance::Manhattan);
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].len(), 24);
    }

    #[test]
    fn test_components_partition_the_floor() {
        let map = parse_bit_grid(
            "..##..##
             ..##..##
             ########
             .#.#.#.#",
            ".",
        )
        .unwrap();
        let areas = find_components(&map, Distance::Manhattan);

        let mut seen: HashSet<Point> = HashSet::new();
        for area in &areas {
            for pos in area.iter() {
                assert!(map.get(pos).unwrap(), "{pos:?} is not floor");
                assert!(seen.insert(pos), "{pos:?} appears in two components");
            }
        }
        assert_eq!(seen.len(), map.count_set());
    }

    #[test]
    fn test_emission_order_is_row_major_by_first_cell() {
        let map = parse_bit_grid(
            "#.#
             ###
             .##",
            ".",
        )
        .unwrap();
        let areas = find_components(&map, Distance::Manhattan);
        assert_eq!(areas.len(), 2);
        assert!(areas[0].contains(Point::new(1, 0)));
        assert!(areas[1].contains(Point::new(0, 2)));
    }
}
