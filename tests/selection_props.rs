use proptest::prelude::*;

use galpick_lib::catalog::{Catalog, ImageEntry};
use galpick_lib::selection::{Action, SelectionSurface};
use galpick_lib::summary::Summary;

/// Unique positive numbers in an arbitrary (not sorted) render order.
fn render_order() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::hash_set(1..500u32, 1..12)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_flat_map(|numbers| Just(numbers).prop_shuffle())
}

fn surface_for(numbers: &[u32]) -> SelectionSurface {
    let entries = numbers
        .iter()
        .map(|n| ImageEntry::new(*n, format!("img_{}.jpg", n)))
        .collect();
    SelectionSurface::new(&Catalog::from_entries(entries).expect("catalog"))
}

proptest! {
    #[test]
    fn prop_summary_matches_shadow_selection(
        numbers in render_order(),
        picks in proptest::collection::vec(0..64usize, 0..40),
    ) {
        let mut surface = surface_for(&numbers);
        let mut shadow = vec![false; numbers.len()];

        for pick in picks {
            let idx = pick % numbers.len();
            shadow[idx] = !shadow[idx];
            let summary = surface.apply(Action::Toggle(numbers[idx])).expect("toggle");

            let chosen: Vec<u32> = numbers
                .iter()
                .zip(&shadow)
                .filter(|(_, on)| **on)
                .map(|(n, _)| *n)
                .collect();
            let want_numbers = chosen
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let want_lines: Vec<String> = chosen
                .iter()
                .map(|n| format!("#{}: img_{}.jpg", n, n))
                .collect();

            prop_assert_eq!(&summary.numbers, &want_numbers);
            prop_assert_eq!(&summary.lines, &want_lines);
            prop_assert_eq!(summary.export_visible(), !chosen.is_empty());
            prop_assert_eq!(surface.selected_count(), chosen.len());
        }
    }

    #[test]
    fn prop_double_toggle_restores_summary(
        numbers in render_order(),
        setup in proptest::collection::vec(0..64usize, 0..20),
        pick in 0..64usize,
    ) {
        let mut surface = surface_for(&numbers);
        for p in setup {
            surface.toggle(numbers[p % numbers.len()]).expect("toggle");
        }
        let before = Summary::project(&surface);

        let target = numbers[pick % numbers.len()];
        surface.apply(Action::Toggle(target)).expect("first toggle");
        let after = surface.apply(Action::Toggle(target)).expect("second toggle");

        prop_assert_eq!(after, before);
    }
}
