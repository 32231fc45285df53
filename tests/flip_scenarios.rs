use std::time::{Duration, Instant};

use guido_flip::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx_rect(a: Rect, b: Rect) -> bool {
    (a.x - b.x).abs() < 1e-2
        && (a.y - b.y).abs() < 1e-2
        && (a.width - b.width).abs() < 1e-2
        && (a.height - b.height).abs() < 1e-2
}

fn inline_transform(tree: &ElementTree, element: ElementId) -> Option<String> {
    tree.inline_style(element).and_then(|s| s.transform.clone())
}

fn inline_matrix(tree: &ElementTree, element: ElementId) -> Matrix2d {
    inline_transform(tree, element)
        .expect("element has an inline transform")
        .parse()
        .expect("inline transform is a matrix")
}

fn watched(id: &str) -> FlipAttributes {
    FlipAttributes::participant(id).hooks(Hooks::START | Hooks::COMPLETE)
}

fn kinds(events: &[FlipEvent]) -> Vec<String> {
    events
        .iter()
        .map(|e| {
            let kind = match e {
                FlipEvent::Appear { .. } => "appear",
                FlipEvent::StartImmediate { .. } => "immediate",
                FlipEvent::Start { .. } => "start",
                FlipEvent::Complete { .. } => "complete",
            };
            format!("{}:{}", kind, e.flip_id())
        })
        .collect()
}

#[test]
fn test_move_and_shrink_card() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let card = tree
        .append(root, Some(watched("card-1")), Rect::new(0.0, 0.0, 100.0, 100.0))
        .unwrap();

    let mut flipper = Flipper::new(root)
        .flip_key("expanded")
        .duration(100.0)
        .ease("linear");
    let mut events = Vec::new();
    let t0 = Instant::now();

    assert!(flipper.before_update(&mut tree, "collapsed", None));
    tree.set_layout(card, Rect::new(0.0, 200.0, 50.0, 50.0));
    let started = flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0);

    assert_eq!(started, 1);
    assert_eq!(
        inline_transform(&tree, card).as_deref(),
        Some("matrix(2, 0, 0, 2, 0, -200)")
    );
    assert_eq!(
        tree.inline_style(card).unwrap().transform_origin.as_deref(),
        Some("0 0")
    );
    // The from-state puts the card back where it was
    assert!(approx_rect(
        tree.bounding_rect(card),
        Rect::new(0.0, 0.0, 100.0, 100.0)
    ));

    flipper.tick(&mut tree, t0 + ms(50), &mut |e: FlipEvent| events.push(e));
    let mid = inline_matrix(&tree, card);
    assert!((mid.a - 1.5).abs() < 1e-3);
    assert!((mid.f + 100.0).abs() < 1e-2);

    let running = flipper.tick(&mut tree, t0 + ms(110), &mut |e: FlipEvent| events.push(e));
    assert_eq!(running, 0);
    assert_eq!(
        inline_transform(&tree, card).as_deref(),
        Some("matrix(1, 0, 0, 1, 0, 0)")
    );
    assert!(approx_rect(
        tree.bounding_rect(card),
        Rect::new(0.0, 200.0, 50.0, 50.0)
    ));

    assert_eq!(
        events,
        vec![
            FlipEvent::Start {
                flip_id: "card-1".into(),
                element: card,
                group: None
            },
            FlipEvent::Complete {
                flip_id: "card-1".into(),
                element: card,
                group: None
            },
        ]
    );
}

#[test]
fn test_content_waits_for_selected_card() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();

    let mut cards = Vec::new();
    let mut contents = Vec::new();
    for i in 0..3 {
        let y = i as f32 * 100.0;
        cards.push(
            tree.append(
                root,
                Some(FlipAttributes::participant(format!("card-{}", i)).stagger("card")),
                Rect::new(0.0, y, 80.0, 80.0),
            )
            .unwrap(),
        );
        contents.push(
            tree.append(
                root,
                Some(
                    FlipAttributes::participant(format!("content-{}", i))
                        .stagger("card-content"),
                ),
                Rect::new(100.0, y, 80.0, 80.0),
            )
            .unwrap(),
        );
    }

    let mut flipper = Flipper::new(root)
        .flip_key("closed")
        .duration(200.0)
        .ease("linear")
        .stagger("card", StaggerPolicy::new().interval(40.0))
        .stagger(
            "card-content",
            StaggerPolicy::new()
                .interval(10.0)
                .delay_until(DelayUntil::start_of(|_, current| {
                    current.as_ref().map(|i| format!("card-{}", i))
                })),
        );
    let t0 = Instant::now();

    flipper.before_update(&mut tree, "open", Some("2".to_string()));
    for (i, (&card, &content)) in cards.iter().zip(&contents).enumerate() {
        let y = i as f32 * 100.0;
        tree.set_layout(card, Rect::new(300.0, y, 80.0, 80.0));
        tree.set_layout(content, Rect::new(400.0, y, 80.0, 80.0));
    }
    assert_eq!(flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0), 6);

    let registry = flipper.registry();
    let card_2_delay = registry.get("card-2").unwrap().tween.delay_ms();
    assert_eq!(card_2_delay, 80.0);
    for i in 0..3 {
        let delay = registry.get(&format!("content-{}", i)).unwrap().tween.delay_ms();
        assert!(delay >= card_2_delay, "content-{} starts at {}", i, delay);
    }

    let before: Vec<Option<String>> = contents
        .iter()
        .map(|&c| inline_transform(&tree, c))
        .collect();

    // card-0 and card-1 are moving, card-2 is not yet; neither is any content
    flipper.tick(&mut tree, t0 + ms(60), &mut |_: FlipEvent| {});
    let after: Vec<Option<String>> = contents
        .iter()
        .map(|&c| inline_transform(&tree, c))
        .collect();
    assert_eq!(before, after);
    assert_ne!(
        inline_transform(&tree, cards[0]).as_deref(),
        Some("matrix(1, 0, 0, 1, -300, 0)")
    );
    assert_eq!(
        inline_transform(&tree, cards[2]).as_deref(),
        Some("matrix(1, 0, 0, 1, -300, 0)")
    );

    // Once card-2 has started, the first content follows
    flipper.tick(&mut tree, t0 + ms(100), &mut |_: FlipEvent| {});
    assert_ne!(inline_transform(&tree, contents[0]), before[0]);
}

#[test]
fn test_scale_only_compensation() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let parent = tree
        .append(
            root,
            Some(FlipAttributes::participant("panel")),
            Rect::new(0.0, 0.0, 200.0, 200.0),
        )
        .unwrap();
    let child = tree
        .append(
            parent,
            Some(FlipAttributes::inverse("panel").compensate(Compensate::SCALE)),
            Rect::new(0.0, 0.0, 50.0, 20.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("big").ease("linear");
    flipper.before_update(&mut tree, "small", None);
    tree.set_layout(parent, Rect::new(100.0, 100.0, 100.0, 100.0));
    tree.set_layout(child, Rect::new(100.0, 100.0, 50.0, 20.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());

    assert_eq!(
        inline_transform(&tree, child).as_deref(),
        Some("scale(0.5, 0.5)")
    );
    assert_eq!(
        tree.inline_style(child).unwrap().transform_origin.as_deref(),
        Some("0 0")
    );
    // Size is preserved even though the parent is drawn at twice its size
    let rect = tree.bounding_rect(child);
    assert!((rect.width - 50.0).abs() < 1e-2);
    assert!((rect.height - 20.0).abs() < 1e-2);
}

#[test]
fn test_interrupted_transition_converges() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(root, Some(watched("box")), Rect::new(0.0, 0.0, 100.0, 100.0))
        .unwrap();

    let mut flipper = Flipper::new(root)
        .flip_key("a")
        .duration(100.0)
        .ease("linear");
    let mut events = Vec::new();
    let t0 = Instant::now();

    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(300.0, 0.0, 100.0, 100.0));
    flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0);
    flipper.tick(&mut tree, t0 + ms(50), &mut |e: FlipEvent| events.push(e));
    assert!(approx_rect(
        tree.bounding_rect(el),
        Rect::new(150.0, 0.0, 100.0, 100.0)
    ));

    // Interrupt halfway
    flipper.before_update(&mut tree, "c", None);
    tree.set_layout(el, Rect::new(0.0, 300.0, 100.0, 100.0));
    flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0 + ms(50));

    assert_eq!(flipper.registry().len(), 1);
    // Continues from where the first transition left off
    assert!(approx_rect(
        tree.bounding_rect(el),
        Rect::new(150.0, 0.0, 100.0, 100.0)
    ));

    // The new transition has not moved yet, so only the old one reports
    assert_eq!(kinds(&events), vec!["start:box", "complete:box"]);
    assert!(events.iter().all(|e| e.element() == el));

    let running = flipper.tick(&mut tree, t0 + ms(160), &mut |e: FlipEvent| events.push(e));
    assert_eq!(running, 0);
    assert_eq!(
        kinds(&events),
        vec!["start:box", "complete:box", "start:box", "complete:box"]
    );
    assert!(approx_rect(
        tree.bounding_rect(el),
        Rect::new(0.0, 300.0, 100.0, 100.0)
    ));
}

#[test]
fn test_unchanged_layout_starts_nothing() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(root, Some(watched("still")), Rect::new(10.0, 10.0, 50.0, 50.0))
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a");
    flipper.before_update(&mut tree, "b", None);
    let mut events = Vec::new();
    let started = flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), Instant::now());

    assert_eq!(started, 0);
    assert!(!flipper.is_animating());
    assert!(events.is_empty());
    assert!(inline_transform(&tree, el).is_none());
}

#[test]
fn test_off_viewport_is_skipped() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("far")),
            Rect::new(0.0, 1000.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a");
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(0.0, 1200.0, 50.0, 50.0));
    let started = flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());

    assert_eq!(started, 0);
    assert!(inline_transform(&tree, el).is_none());

    // A taller viewport brings the same move into view
    tree.set_viewport(800.0, 2000.0);
    flipper.before_update(&mut tree, "c", None);
    tree.set_layout(el, Rect::new(0.0, 1000.0, 50.0, 50.0));
    let started = flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());
    assert_eq!(started, 1);
}

#[test]
fn test_moving_into_view_animates() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("incoming")),
            Rect::new(0.0, 1000.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a");
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(0.0, 100.0, 50.0, 50.0));
    let started = flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());
    assert_eq!(started, 1);
}

#[test]
fn test_unchanged_flip_key_skips_pass() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a")),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("same");
    assert!(!flipper.before_update(&mut tree, "same", None));
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    assert_eq!(
        flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now()),
        0
    );
    assert!(inline_transform(&tree, el).is_none());
}

#[test]
fn test_unknown_easing_falls_back_to_ease_out_sine() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a")),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root)
        .flip_key("a")
        .duration(100.0)
        .ease("jiggle");
    let t0 = Instant::now();
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0);
    flipper.tick(&mut tree, t0 + ms(50), &mut |_: FlipEvent| {});

    let eased = (std::f32::consts::PI / 4.0).sin();
    let expected = -100.0 * (1.0 - eased);
    assert!((inline_matrix(&tree, el).e - expected).abs() < 1e-2);
}

#[test]
fn test_per_element_overrides() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(
                FlipAttributes::participant("a")
                    .duration(500.0)
                    .delay(20.0)
                    .ease("easeInQuad"),
            ),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a").duration(100.0);
    let t0 = Instant::now();
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0);

    let token = flipper.registry().get("a").unwrap();
    assert_eq!(token.tween.duration_ms(), 500.0);
    assert_eq!(token.tween.delay_ms(), 20.0);

    // 270ms in: 250ms active, half of 500ms; easeInQuad gives 0.25
    flipper.tick(&mut tree, t0 + ms(270), &mut |_: FlipEvent| {});
    assert!((inline_matrix(&tree, el).e + 75.0).abs() < 1e-2);
}

#[test]
fn test_transform_origin_left_alone_when_disabled() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a")),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root)
        .flip_key("a")
        .apply_transform_origin(false);
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());

    assert!(tree.inline_style(el).unwrap().transform.is_some());
    assert!(tree.inline_style(el).unwrap().transform_origin.is_none());
}

#[test]
fn test_removed_element_stops_quietly() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(watched("gone").hooks(Hooks::START_IMMEDIATE | Hooks::START | Hooks::COMPLETE)),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a").duration(100.0);
    let mut events = Vec::new();
    let t0 = Instant::now();
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0);

    tree.remove(el);
    let running = flipper.tick(&mut tree, t0 + ms(10), &mut |e: FlipEvent| events.push(e));

    assert_eq!(running, 0);
    // Set up, but never moved or completed
    assert_eq!(kinds(&events), vec!["immediate:gone"]);
}

#[test]
fn test_custom_easing_is_per_flipper() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a").ease("step")),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root)
        .flip_key("a")
        .duration(100.0)
        .easing("step", TimingFunction::custom(|t| if t < 0.5 { 0.0 } else { 1.0 }));
    assert!(!Flipper::new(root).config().easings.contains("step"));

    let t0 = Instant::now();
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0);

    flipper.tick(&mut tree, t0 + ms(40), &mut |_: FlipEvent| {});
    assert_eq!(inline_matrix(&tree, el).e, -100.0);
    flipper.tick(&mut tree, t0 + ms(60), &mut |_: FlipEvent| {});
    assert_eq!(inline_matrix(&tree, el).e, 0.0);
}

fn stacked_rows(tree: &mut ElementTree, ids: &[&str], stagger: &str) -> Vec<ElementId> {
    let root = tree.root();
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            tree.append(
                root,
                Some(watched(id).stagger(stagger)),
                Rect::new(0.0, i as f32 * 20.0, 100.0, 10.0),
            )
            .unwrap()
        })
        .collect()
}

#[test]
fn test_reverse_toggled_between_passes() {
    init_logger();
    let mut tree = ElementTree::new(800.0, 600.0);
    let rows = stacked_rows(&mut tree, &["a", "b"], "rows");

    let mut flipper = Flipper::new(tree.root())
        .flip_key("left")
        .duration(100.0)
        .ease("linear")
        .stagger("rows", StaggerPolicy::new().interval(40.0));
    let mut events = Vec::new();
    let t0 = Instant::now();

    flipper.before_update(&mut tree, "right", None);
    for (i, &row) in rows.iter().enumerate() {
        tree.set_layout(row, Rect::new(50.0, i as f32 * 20.0, 100.0, 10.0));
    }
    flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0);
    assert_eq!(flipper.registry().get("a").unwrap().tween.delay_ms(), 0.0);
    assert_eq!(flipper.registry().get("b").unwrap().tween.delay_ms(), 40.0);
    flipper.tick(&mut tree, t0 + ms(20), &mut |e: FlipEvent| events.push(e));

    // The next run goes through the group in the opposite order
    flipper.set_stagger(
        StaggerConfig::new().with("rows", StaggerPolicy::new().interval(40.0).reverse(true)),
    );
    flipper.before_update(&mut tree, "far-right", None);
    for (i, &row) in rows.iter().enumerate() {
        tree.set_layout(row, Rect::new(100.0, i as f32 * 20.0, 100.0, 10.0));
    }
    flipper.after_update(&mut tree, &mut |e: FlipEvent| events.push(e), t0 + ms(20));
    assert_eq!(flipper.registry().get("a").unwrap().tween.delay_ms(), 40.0);
    assert_eq!(flipper.registry().get("b").unwrap().tween.delay_ms(), 0.0);

    for at in [30, 70, 200] {
        flipper.tick(&mut tree, t0 + ms(at), &mut |e: FlipEvent| events.push(e));
    }
    assert!(!flipper.is_animating());
    assert_eq!(
        kinds(&events),
        vec![
            "start:a",
            "complete:a",
            "complete:b",
            "start:b",
            "start:a",
            "complete:a",
            "complete:b",
        ]
    );
    assert!(approx_rect(
        tree.bounding_rect(rows[1]),
        Rect::new(100.0, 20.0, 100.0, 10.0)
    ));
}

#[test]
fn test_content_waits_for_card_to_finish() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let cards = stacked_rows(&mut tree, &["card-0", "card-1"], "card");
    let root = tree.root();
    let contents: Vec<ElementId> = (0..2)
        .map(|i| {
            tree.append(
                root,
                Some(FlipAttributes::participant(format!("content-{}", i)).stagger("card-content")),
                Rect::new(200.0, i as f32 * 20.0, 100.0, 10.0),
            )
            .unwrap()
        })
        .collect();

    let mut flipper = Flipper::new(root)
        .flip_key("closed")
        .duration(200.0)
        .ease("linear")
        .stagger("card", StaggerPolicy::new().interval(40.0))
        .stagger(
            "card-content",
            StaggerPolicy::new()
                .interval(10.0)
                .delay_until(DelayUntil::finish_of(|_, current| {
                    current.as_ref().map(|i| format!("card-{}", i))
                })),
        );
    let t0 = Instant::now();

    flipper.before_update(&mut tree, "open", Some("1".to_string()));
    for (i, (&card, &content)) in cards.iter().zip(&contents).enumerate() {
        let y = i as f32 * 20.0;
        tree.set_layout(card, Rect::new(300.0, y, 100.0, 10.0));
        tree.set_layout(content, Rect::new(400.0, y, 100.0, 10.0));
    }
    assert_eq!(flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0), 4);

    let delay = |id: &str| flipper.registry().get(id).unwrap().tween.delay_ms();
    assert_eq!(delay("card-0"), 0.0);
    assert_eq!(delay("card-1"), 40.0);
    // card-1 ends at 40 + 200
    assert_eq!(delay("content-0"), 240.0);
    assert_eq!(delay("content-1"), 250.0);

    let parked = inline_transform(&tree, contents[0]);
    flipper.tick(&mut tree, t0 + ms(230), &mut |_: FlipEvent| {});
    assert_eq!(inline_transform(&tree, contents[0]), parked);
    flipper.tick(&mut tree, t0 + ms(250), &mut |_: FlipEvent| {});
    assert_ne!(inline_transform(&tree, contents[0]), parked);
}

#[test]
fn test_decision_data_survives_unchanged_key() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a").should_flip(|previous, current| {
                previous.as_deref() == Some("2") && current.as_deref() == Some("3")
            })),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("x");
    flipper.before_update(&mut tree, "y", Some("1".to_string()));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());

    // Same key: no pass, but the newer data is remembered
    assert!(!flipper.before_update(&mut tree, "y", Some("2".to_string())));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());

    flipper.before_update(&mut tree, "z", Some("3".to_string()));
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    let started = flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, Instant::now());
    assert_eq!(started, 1);
}

#[test]
fn test_spring_preset_by_name() {
    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();
    let el = tree
        .append(
            root,
            Some(FlipAttributes::participant("a").ease("gentle")),
            Rect::new(0.0, 0.0, 50.0, 50.0),
        )
        .unwrap();

    let mut flipper = Flipper::new(root).flip_key("a").duration(1000.0);
    let t0 = Instant::now();
    flipper.before_update(&mut tree, "b", None);
    tree.set_layout(el, Rect::new(100.0, 0.0, 50.0, 50.0));
    flipper.after_update(&mut tree, &mut |_: FlipEvent| {}, t0);

    // Past the target around the first peak
    let peak = (0..20)
        .map(|i| {
            flipper.tick(&mut tree, t0 + ms(300 + i * 10), &mut |_: FlipEvent| {});
            inline_matrix(&tree, el).e
        })
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "peak translate {}", peak);

    flipper.tick(&mut tree, t0 + ms(1010), &mut |_: FlipEvent| {});
    assert_eq!(inline_matrix(&tree, el).e, 0.0);
}
