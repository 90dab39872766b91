use crate::world::Grid;

/// True when every cell of `working` matches `goal` in color and occupancy.
///
/// Both grids must have the same dimensions; this is established when a
/// simulation is built and not re-checked here.
pub fn compare(working: &Grid, goal: &Grid) -> bool {
    working
        .rows()
        .zip(goal.rows())
        .all(|(working_row, goal_row)| working_row == goal_row)
}

/// `(row, col)` of each cell where `working` differs from `goal`, in row-major order.
pub fn mismatches(working: &Grid, goal: &Grid) -> Vec<(usize, usize)> {
    working
        .rows()
        .zip(goal.rows())
        .enumerate()
        .flat_map(|(row, (working_row, goal_row))| {
            working_row
                .iter()
                .zip(goal_row)
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(move |(col, _)| (row, col))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_world;
    use crate::world::Color;

    #[test]
    fn identical_worlds_match() {
        let world = parse_world("u\n-rx\nbg-\n1 1").unwrap();
        assert!(compare(&world.grid, &world.grid.clone()));
        assert!(mismatches(&world.grid, &world.grid).is_empty());
    }

    #[test]
    fn occupancy_alone_breaks_a_match() {
        let start = parse_world("r\n---\n0 0").unwrap();
        let goal = parse_world("r\n---\n2 0").unwrap();
        assert!(!compare(&start.grid, &goal.grid));
        assert_eq!(mismatches(&start.grid, &goal.grid), vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn color_alone_breaks_a_match() {
        let start = parse_world("u\n---\n---\n0 0").unwrap();
        let mut goal = start.clone();
        goal.grid.cell_mut(1, 2).unwrap().color = Color::Blue;
        assert!(!compare(&start.grid, &goal.grid));
        assert_eq!(mismatches(&start.grid, &goal.grid), vec![(1, 2)]);
    }
}
