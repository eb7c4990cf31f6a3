//! Property-based tests using proptest

use barcode_studio::ModuleGrid;
use barcode_studio::encoder::{VectorLayout, check_digit, merge_runs, rasterize};
use barcode_studio::models::Margins;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..24, 1usize..24).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), w), h)
    })
}

proptest! {
    #[test]
    fn test_prop_rects_cover_exactly_the_ink(rows in grid_strategy()) {
        let grid = ModuleGrid::from_rows(&rows);
        let rects = merge_runs(&grid);

        for (y, row) in rows.iter().enumerate() {
            for (x, &ink) in row.iter().enumerate() {
                let covering = rects.iter().filter(|r| r.contains(x as u32, y as u32)).count();
                prop_assert_eq!(covering, usize::from(ink), "cell ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_prop_rects_never_overlap(rows in grid_strategy()) {
        let rects = merge_runs(&ModuleGrid::from_rows(&rows));
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_prop_rect_count_bounded_by_ink(rows in grid_strategy()) {
        let grid = ModuleGrid::from_rows(&rows);
        let rects = merge_runs(&grid);
        prop_assert!(rects.len() <= grid.ink_count());
        let area: u32 = rects.iter().map(|r| r.width * r.height).sum();
        prop_assert_eq!(area as usize, grid.ink_count());
    }

    #[test]
    fn test_prop_merge_leaves_grid_untouched(rows in grid_strategy()) {
        let grid = ModuleGrid::from_rows(&rows);
        let before = grid.clone();
        let _ = merge_runs(&grid);
        prop_assert_eq!(grid, before);
    }

    #[test]
    fn test_prop_scaled_rects_stay_inside_document(
        rows in grid_strategy(),
        cell_w in 1u32..6,
        cell_h in 1u32..6,
        margin in 0u32..12,
    ) {
        let grid = ModuleGrid::from_rows(&rows);
        let mut layout = VectorLayout::new(Margins::uniform(margin));
        layout.cell_width = cell_w;
        layout.cell_height = cell_h;
        let out = rasterize(&grid, &layout).unwrap();
        for r in &out.rects {
            prop_assert!(r.x >= margin && r.y >= margin);
            prop_assert!(r.x + r.width <= out.width - margin);
            prop_assert!(r.y + r.height <= out.height - margin);
        }
    }

    #[test]
    fn test_prop_check_digit_completes_the_sum(digits in prop::collection::vec(0u8..10, 1..18)) {
        let check = check_digit(&digits);
        prop_assert!(check < 10);
        prop_assert_eq!(check, check_digit(&digits));

        let mut full = digits.clone();
        full.push(check);
        let sum: u32 = full
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &d)| u32::from(d) * if i % 2 == 0 { 1 } else { 3 })
            .sum();
        prop_assert_eq!(sum % 10, 0);
    }
}
