//! Cards switching between a grid and a single column.
//!
//! Each card carries a label that keeps its size while the card scales, and
//! the frame loop prints the card transforms as the transition runs.
//! Run with `RUST_LOG=debug` to see the engine's decisions.

use guido_flip::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

const CARDS: usize = 4;

fn grid_rect(i: usize) -> Rect {
    let col = (i % 2) as f32;
    let row = (i / 2) as f32;
    Rect::new(20.0 + col * 220.0, 20.0 + row * 220.0, 200.0, 200.0)
}

fn list_rect(i: usize) -> Rect {
    Rect::new(20.0, 20.0 + i as f32 * 70.0, 420.0, 60.0)
}

fn main() {
    env_logger::init();

    let mut tree = ElementTree::new(800.0, 600.0);
    let root = tree.root();

    let mut cards = Vec::new();
    for i in 0..CARDS {
        let id = format!("card-{}", i);
        let rect = grid_rect(i);
        let card = tree
            .append(
                root,
                Some(
                    FlipAttributes::participant(id.clone())
                        .group("grid")
                        .hooks(Hooks::START | Hooks::COMPLETE),
                ),
                rect,
            )
            .expect("root exists");
        let label = tree
            .append(
                card,
                Some(FlipAttributes::inverse(id).compensate(Compensate::SCALE)),
                Rect::new(rect.x + 10.0, rect.y + 10.0, 80.0, 20.0),
            )
            .expect("card exists");
        cards.push((card, label));
    }

    let mut flipper = Flipper::new(root)
        .flip_key("grid")
        .duration(300.0)
        .ease("easeOutQuad");

    let mut on_event = |event: FlipEvent| println!("{:?}", event);

    flipper.before_update(&mut tree, "list", None);
    for (i, &(card, label)) in cards.iter().enumerate() {
        let rect = list_rect(i);
        tree.set_layout(card, rect);
        tree.set_layout(label, Rect::new(rect.x + 10.0, rect.y + 10.0, 80.0, 20.0));
        tree.set_attributes(
            card,
            Some(
                FlipAttributes::participant(format!("card-{}", i))
                    .group("list")
                    .hooks(Hooks::START | Hooks::COMPLETE),
            ),
        );
    }
    let started = flipper.after_update(&mut tree, &mut on_event, Instant::now());
    println!("{} transitions started", started);

    while flipper.is_animating() {
        thread::sleep(Duration::from_millis(16));
        flipper.tick(&mut tree, Instant::now(), &mut on_event);

        let (card, label) = cards[0];
        println!(
            "card-0: {} / label: {}",
            tree.computed_transform(card),
            tree.computed_transform(label)
        );
    }
}
