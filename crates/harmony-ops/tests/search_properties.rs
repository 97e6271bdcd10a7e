//! Behavioural checks for search, partition and remap working together.

use harmony_core::{HarmonicTemplate, Hue, HueHistogram, Sector, TemplateShape};
use harmony_ops::harmonize::harmonize_hues;
use harmony_ops::partition::partition;
use harmony_ops::remap::RemapTable;
use harmony_ops::search::{search, search_shapes};

/// Plain running-minimum search, strict `<`, shape then alpha ascending.
fn sequential_search(hist: &HueHistogram, shapes: &[TemplateShape]) -> (TemplateShape, Hue, f64) {
    let mut best = (shapes[0], Hue::ZERO, f64::INFINITY);
    for &shape in shapes {
        for alpha in Hue::all() {
            let score = HarmonicTemplate::new(shape, alpha).unwrap().score(hist);
            if score < best.2 {
                best = (shape, alpha, score);
            }
        }
    }
    best
}

/// Small deterministic generator so histograms vary without a rand dependency.
fn lcg_histogram(seed: u64, filled: usize) -> HueHistogram {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as u32
    };
    let mut hist = HueHistogram::new();
    for _ in 0..filled {
        let hue = (next() % 256) as u16;
        let weight = (next() % 1000) as f64 / 997.0;
        hist.add(hue, weight).unwrap();
    }
    if hist.total() == 0.0 {
        hist.add(0, 1.0).unwrap();
    }
    hist
}

#[test]
fn single_hue_at_zero_against_lower_i() {
    let mut hist = HueHistogram::new();
    hist.add(0, 1.0).unwrap();

    let outcome = search_shapes(&hist, &[TemplateShape::LowerI]).unwrap();
    assert_eq!(outcome.score, 0.0);
    assert!(outcome.template.sectors()[0].contains(Hue::ZERO));

    for alpha in Hue::all() {
        let t = HarmonicTemplate::new(TemplateShape::LowerI, alpha).unwrap();
        assert!(t.score(&hist) >= outcome.score);
    }
}

#[test]
fn uniform_over_first_thirteen_hues() {
    let mut hist = HueHistogram::new();
    for h in 0..13 {
        hist.add(h, 1.0).unwrap();
    }
    let outcome = search_shapes(&hist, &[TemplateShape::LowerI]).unwrap();
    assert_eq!(outcome.score, 0.0);
    assert_eq!(outcome.template.alpha(), Hue::ZERO);
}

#[test]
fn matches_sequential_running_minimum() {
    for (seed, filled) in [(1, 3), (7, 20), (42, 200), (99, 1), (2024, 60)] {
        let hist = lcg_histogram(seed, filled);
        let outcome = search(&hist).unwrap();
        let (shape, alpha, score) = sequential_search(&hist, &TemplateShape::ALL);
        assert_eq!(outcome.template.shape(), Some(shape), "seed {seed}");
        assert_eq!(outcome.template.alpha(), alpha, "seed {seed}");
        assert_eq!(outcome.score, score, "seed {seed}");
    }
}

#[test]
fn per_shape_minima_match_sequential() {
    let hist = lcg_histogram(5, 40);
    let outcome = search(&hist).unwrap();
    for entry in &outcome.per_shape {
        let (_, alpha, score) = sequential_search(&hist, &[entry.shape]);
        assert_eq!(entry.alpha, alpha, "{}", entry.shape);
        assert_eq!(entry.score, score, "{}", entry.shape);
    }
    let best = outcome
        .per_shape
        .iter()
        .map(|s| s.score)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(outcome.score, best);
}

#[test]
fn search_is_deterministic() {
    let hist = lcg_histogram(11, 80);
    let first = search(&hist).unwrap();
    for _ in 0..5 {
        let again = search(&hist).unwrap();
        assert_eq!(again.template, first.template);
        assert_eq!(again.per_shape, first.per_shape);
    }
}

#[test]
fn two_hues_against_upper_i() {
    let template = HarmonicTemplate::new(TemplateShape::UpperI, Hue::ZERO).unwrap();
    let hues = [10u8, 200];

    let parts = partition(&hues, &template);
    for (&h, &s) in hues.iter().zip(parts.sectors()) {
        let (nearest, _) = template.nearest_sector(Hue::from_u8(h));
        assert_eq!(s as usize, nearest);
    }

    let remapped = RemapTable::new(&template).apply(&hues, &parts).unwrap();
    for ((&before, &after), &s) in hues.iter().zip(&remapped).zip(parts.sectors()) {
        let center = template.sectors()[s as usize].center();
        assert!(center.distance(Hue::from_u8(after)) <= center.distance(Hue::from_u8(before)));
    }

    let (via_pipeline, max_distance) = harmonize_hues(&hues, &template).unwrap();
    assert_eq!(via_pipeline, remapped);
    assert_eq!(max_distance, 56);
}

#[test]
fn sector_center_maps_to_itself() {
    for shape in TemplateShape::ALL {
        for alpha in [0u8, 1, 100, 255] {
            let t = HarmonicTemplate::new(shape, Hue::from_u8(alpha)).unwrap();
            let table = RemapTable::new(&t);
            for (i, s) in t.sectors().iter().enumerate() {
                assert!(s.center().distance(table.target(i, s.center())) <= 1);
            }
        }
    }
}

#[test]
fn full_circle_template_is_rejected() {
    assert!(Sector::new(0, 256).is_ok());
    let err = HarmonicTemplate::custom("full", &[256], &[0], Hue::ZERO).unwrap_err();
    assert!(matches!(err, harmony_core::Error::DegenerateTemplate { .. }));
}

#[test]
fn bad_inputs_are_rejected() {
    let mut hist = HueHistogram::new();
    assert!(hist.add(256, 1.0).is_err());
    assert!(hist.add(3, -1.0).is_err());
    assert!(search(&hist).is_err());
}
