//! A list that reverses its order and back, staggering the rows and holding
//! the row details back until the selected row has started moving. The
//! stagger runs the other way on the return trip.

use guido_flip::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

const ROWS: usize = 5;

fn main() {
    env_logger::init();

    let mut tree = ElementTree::new(400.0, 600.0);
    let root = tree.root();

    let mut rows = Vec::new();
    for i in 0..ROWS {
        let row = tree
            .append(
                root,
                Some(
                    FlipAttributes::participant(format!("row-{}", i))
                        .stagger("rows")
                        .ease("gentle")
                        .hooks(Hooks::START_IMMEDIATE | Hooks::START),
                ),
                Rect::new(0.0, i as f32 * 50.0, 400.0, 40.0),
            )
            .expect("root exists");
        let detail = tree
            .append(
                row,
                Some(
                    FlipAttributes::participant(format!("detail-{}", i))
                        .stagger("details")
                        .channels(Channels::TRANSLATE | Channels::OPACITY)
                        .hooks(Hooks::START),
                ),
                Rect::new(300.0, i as f32 * 50.0, 80.0, 40.0),
            )
            .expect("row exists");
        rows.push((row, detail));
    }

    let stagger = |reverse: bool| {
        StaggerConfig::new()
            .with("rows", StaggerPolicy::new().interval(60.0).reverse(reverse))
            .with(
                "details",
                StaggerPolicy::new()
                    .interval(20.0)
                    .delay_until(DelayUntil::start_of(|_, current| {
                        current.as_ref().map(|selected| format!("row-{}", selected))
                    })),
            )
    };
    let mut flipper = Flipper::new(root).duration(600.0).flip_key("ascending");

    let t0 = Instant::now();
    let mut on_event = |event: FlipEvent| {
        println!("{:>6.1}ms {:?}", t0.elapsed().as_secs_f32() * 1000.0, event)
    };

    for (key, selected, descending) in [("descending", "2", true), ("ascending", "4", false)] {
        flipper.set_stagger(stagger(!descending));
        flipper.before_update(&mut tree, key, Some(selected.to_string()));
        for (i, &(row, detail)) in rows.iter().enumerate() {
            let slot = if descending { ROWS - 1 - i } else { i };
            let y = slot as f32 * 50.0;
            tree.set_layout(row, Rect::new(0.0, y, 400.0, 40.0));
            tree.set_layout(detail, Rect::new(300.0, y, 80.0, 40.0));
            tree.set_base_opacity(detail, if descending { 0.6 } else { 1.0 });
        }
        flipper.after_update(&mut tree, &mut on_event, Instant::now());

        while flipper.is_animating() {
            thread::sleep(Duration::from_millis(16));
            flipper.tick(&mut tree, Instant::now(), &mut on_event);
        }
    }
}
