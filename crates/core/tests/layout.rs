use rnacoords_core::{decompose, layout, parse, plot_coords, LayoutError};

fn compare_f64(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

const STRUCTURES: &[&str] = &[
    "()",
    "(..)",
    "(...)",
    "(((...)))",
    "((...)(...))",
    "((..((...))..((...))..))",
    "(((...)))..((...))",
    ".",
    ".....",
    "..((...))..",
];

#[test]
fn arrays_cover_every_position() {
    for s in STRUCTURES {
        let coords = plot_coords(s).unwrap();
        assert_eq!(coords.x.len(), s.len(), "{}: x length", s);
        assert_eq!(coords.y.len(), s.len(), "{}: y length", s);
        assert_eq!(coords.arc.len(), s.len(), "{}: arc length", s);
        assert_eq!(coords.len(), s.len());
        assert!(!coords.is_empty());
    }
}

#[test]
fn all_values_finite() {
    for s in STRUCTURES {
        let coords = plot_coords(s).unwrap();
        for i in 0..coords.len() {
            assert!(
                coords.x[i].is_finite() && coords.y[i].is_finite() && coords.arc[i].is_finite(),
                "{}: non-finite value at {}",
                s,
                i
            );
        }
    }
}

#[test]
fn paired_bases_sit_one_unit_apart() {
    for s in STRUCTURES {
        let pt = parse(s).unwrap();
        let coords = plot_coords(s).unwrap();
        for i in 0..pt.n_bases {
            let j = pt.pairs[i];
            if j > i {
                let dx = coords.x[i] - coords.x[j];
                let dy = coords.y[i] - coords.y[j];
                let dist = (dx * dx + dy * dy).sqrt();
                assert!(
                    compare_f64(dist, 1.0, 1e-6),
                    "{}: pair ({}, {}) distance {}",
                    s,
                    i,
                    j,
                    dist
                );
            }
        }
    }
}

#[test]
fn drawing_is_centered_on_origin() {
    for s in STRUCTURES {
        let l = layout(s).unwrap();
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for lp in &l.loops {
            min_x = min_x.min(lp.x);
            max_x = max_x.max(lp.x);
            min_y = min_y.min(lp.y);
            max_y = max_y.max(lp.y);
        }
        for b in &l.bases {
            min_x = min_x.min(b.x);
            max_x = max_x.max(b.x);
            min_y = min_y.min(b.y);
            max_y = max_y.max(b.y);
        }
        assert!(
            compare_f64(0.5 * (min_x + max_x), 0.0, 1e-9),
            "{}: bbox x center",
            s
        );
        assert!(
            compare_f64(0.5 * (min_y + max_y), 0.0, 1e-9),
            "{}: bbox y center",
            s
        );
    }
}

#[test]
fn decompose_builds_the_loop_tree() {
    // Triple stem closing a hairpin of three
    let pt = parse("(((...)))").unwrap();
    let infos = decompose(&pt);
    assert_eq!(infos.len(), 4);
    assert!(infos[0].parent_pair.is_none());
    assert_eq!(infos[0].child_pairs, vec![(0, 8)]);
    assert!(infos[0].unpaired_bases.is_empty());
    assert_eq!(infos[1].parent_pair, Some((0, 8)));
    assert_eq!(infos[1].child_pairs, vec![(1, 7)]);
    assert_eq!(infos[3].parent_pair, Some((2, 6)));
    assert_eq!(infos[3].unpaired_bases, vec![3, 4, 5]);
}

#[test]
fn decompose_orders_multiloop_branches_in_sequence() {
    let pt = parse("((...)(...))").unwrap();
    let infos = decompose(&pt);
    assert_eq!(infos.len(), 4);
    assert_eq!(infos[1].parent_pair, Some((0, 11)));
    assert_eq!(infos[1].child_pairs, vec![(1, 5), (6, 10)]);
    assert_eq!(infos[2].parent_pair, Some((1, 5)));
    assert_eq!(infos[3].parent_pair, Some((6, 10)));
}

#[test]
fn pairless_structure_still_lays_out() {
    let coords = plot_coords(".....").unwrap();
    assert_eq!(coords.len(), 5);
    // Evenly spaced on one circle: consecutive gaps all equal
    let gap = |i: usize| {
        let dx = coords.x[i + 1] - coords.x[i];
        let dy = coords.y[i + 1] - coords.y[i];
        (dx * dx + dy * dy).sqrt()
    };
    let first = gap(0);
    for i in 1..4 {
        assert!(compare_f64(gap(i), first, 1e-9), "gap {} != gap 0", i);
    }
}

#[test]
fn error_cases() {
    assert_eq!(plot_coords("").unwrap_err(), LayoutError::EmptyStructure);
    assert_eq!(
        plot_coords("(x)").unwrap_err(),
        LayoutError::InvalidCharacter('x')
    );
    assert_eq!(plot_coords("((..)").unwrap_err(), LayoutError::UnmatchedOpen);
    assert_eq!(plot_coords("())").unwrap_err(), LayoutError::UnmatchedClose);
}

#[test]
fn layout_serializes_to_json() {
    let l = layout("(..)").unwrap();
    let json = serde_json::to_string(&l).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(v["bases"].as_array().unwrap().len(), 4);
    assert_eq!(v["loops"].as_array().unwrap().len(), 2);
    assert!(v["bases"][0]["x"].is_number());
    assert!(v["bases"][0]["angle"].is_number());
    assert!(v["loops"][0]["radius"].is_number());
}
