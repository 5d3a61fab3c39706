//! Isolated tile removal
//!
//! Erodes thin ground features: a ground cell touching exactly one other
//! ground cell (N/S/E/W) becomes water. Each pass updates the mask in place,
//! scanning x-major, so a cell can see conversions made earlier in the same
//! pass. This is a bounded heuristic and not a connected-component filter.
//! Lone cells with no ground neighbour at all are left alone, and wide
//! peninsulas survive.

use tracing::debug;

use crate::tilemap::Tilemap;

/// What a cleanup run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Passes executed, including a final pass that changed nothing
    pub passes: u32,
    /// Ground cells converted to water across all passes
    pub removed: usize,
}

/// Run up to `max_passes` removal passes, stopping early once a pass changes nothing.
pub fn remove_isolated_tiles(mask: &mut Tilemap<bool>, max_passes: u32) -> CleanupReport {
    let mut report = CleanupReport::default();

    for _ in 0..max_passes {
        let removed = remove_pass(mask);
        report.passes += 1;
        report.removed += removed;
        debug!(pass = report.passes, removed, "isolated tile pass");
        if removed == 0 {
            break;
        }
    }

    report
}

/// One in-place pass. Returns how many cells were converted.
pub fn remove_pass(mask: &mut Tilemap<bool>) -> usize {
    let mut removed = 0;

    for x in 0..mask.width {
        for y in 0..mask.height {
            if *mask.get(x, y) && mask.count_cardinal(x, y, |&g| g) == 1 {
                mask.set(x, y, false);
                removed += 1;
            }
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a mask from rows, top row first is y = 0. '#' is ground.
    fn mask_from(rows: &[&str]) -> Tilemap<bool> {
        let height = rows.len();
        let width = rows[0].len();
        let mut mask = Tilemap::new_with(width, height, false);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                mask.set(x, y, c == '#');
            }
        }
        mask
    }

    fn rows_of(mask: &Tilemap<bool>) -> Vec<String> {
        (0..mask.height)
            .map(|y| (0..mask.width).map(|x| if *mask.get(x, y) { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_pair_is_removed_in_scan_order() {
        // (1,1) is scanned first and removed; (2,1) then has no ground neighbour and stays
        let mut mask = mask_from(&[
            "....",
            ".##.",
            "....",
        ]);
        assert_eq!(remove_pass(&mut mask), 1);
        assert_eq!(rows_of(&mask), vec!["....", "..#.", "...."]);
    }

    #[test]
    fn test_lone_cell_is_kept() {
        let mut mask = mask_from(&[
            "...",
            ".#.",
            "...",
        ]);
        let report = remove_isolated_tiles(&mut mask, 5);
        assert!(*mask.get(1, 1));
        assert_eq!(report, CleanupReport { passes: 1, removed: 0 });
    }

    #[test]
    fn test_spur_erodes_one_cell_per_pass() {
        // Horizontal spur off a solid block; only its tip has a single neighbour
        let mut mask = mask_from(&[
            "##.....",
            "#####..",
            "##.....",
        ]);

        assert_eq!(remove_pass(&mut mask), 1);
        assert_eq!(rows_of(&mask)[1], "####...");

        assert_eq!(remove_pass(&mut mask), 1);
        assert_eq!(rows_of(&mask)[1], "###....");
    }

    #[test]
    fn test_stops_at_iteration_budget() {
        let mut mask = mask_from(&[
            "##.....",
            "#####..",
            "##.....",
        ]);
        let report = remove_isolated_tiles(&mut mask, 1);
        assert_eq!(report, CleanupReport { passes: 1, removed: 1 });
        assert!(*mask.get(3, 1));
    }

    #[test]
    fn test_stops_early_at_fixed_point() {
        let mut mask = mask_from(&[
            "##.....",
            "#####..",
            "##.....",
        ]);
        let report = remove_isolated_tiles(&mut mask, 10);
        // The whole spur goes, then one pass confirms nothing else changes
        assert_eq!(report, CleanupReport { passes: 4, removed: 3 });
        assert_eq!(rows_of(&mask), vec!["##.....", "##.....", "##....."]);
    }

    #[test]
    fn test_zero_budget_changes_nothing() {
        let mut mask = mask_from(&[".##.", "...."]);
        let before = mask.clone();
        assert_eq!(remove_isolated_tiles(&mut mask, 0), CleanupReport::default());
        assert_eq!(mask, before);
    }

    #[test]
    fn test_thick_peninsula_survives() {
        let mut mask = mask_from(&[
            "####....",
            "########",
            "########",
            "####....",
        ]);
        let before = mask.clone();
        let report = remove_isolated_tiles(&mut mask, 10);
        assert_eq!(report.removed, 0);
        assert_eq!(mask, before);
    }

    #[test]
    fn test_never_creates_ground() {
        let mut mask = mask_from(&[
            "#.#.#",
            ".##..",
            "#.###",
            "..#..",
        ]);
        let before = mask.clone();
        remove_isolated_tiles(&mut mask, 10);
        for (x, y, &g) in mask.iter() {
            if g {
                assert!(*before.get(x, y), "water at ({x}, {y}) became ground");
            }
        }
    }
}
