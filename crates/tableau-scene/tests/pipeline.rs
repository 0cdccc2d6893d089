use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use pretty_assertions::assert_eq;
use tableau_engine::logging::{init_logging, LoggingConfig};
use tableau_scene::prelude::*;

fn setup() {
    init_logging(LoggingConfig::for_tests());
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn rect_then_text() {
    setup();
    let g = Graph::build()
        .rect((100.0, 200.0), opts().fill(Color::BLUE))
        .unwrap()
        .text("Hello", opts().id("hello").translate(10.0, 10.0))
        .unwrap();

    let children = g.children(Uid::ROOT);
    assert_eq!(children.len(), 2);
    assert_eq!(g.get(children[0]).unwrap().kind(), Kind::Rect);
    assert_eq!(g.get(children[1]).unwrap().kind(), Kind::Text);
    assert_eq!(g.find_id("hello"), Some(children[1]));
    assert_eq!(
        g.get(children[0]).unwrap().data(),
        &Data::Rect(Rectangle::from((100.0, 200.0)))
    );
}

#[test]
fn group_with_translated_line() {
    setup();
    let g = Graph::build()
        .group(|g| g.line(((0.0, 0.0), (10.0, 10.0)), opts()), opts().translate(5.0, 5.0))
        .unwrap();

    let [group] = g.children(Uid::ROOT) else { panic!("expected one root child") };
    let group = g.get(*group).unwrap();
    assert_eq!(group.kind(), Kind::Group);
    assert_eq!(group.transforms().translate, Some(Vec2::new(5.0, 5.0)));

    let [line] = group.children() else { panic!("expected one group child") };
    let line = g.get(*line).unwrap();
    assert_eq!(line.kind(), Kind::Line);
    assert!(line.transforms().is_empty());
}

#[test]
fn arc_band_hit_test() {
    setup();
    let g = Graph::build().arc((10.0, 0.0, FRAC_PI_2), opts()).unwrap();
    let cfg = HitConfig::default();

    // inside the sector and inside the chord triangle
    assert_eq!(hit_test(&g, Vec2::new(3.0, 3.0), &cfg).unwrap(), None);
    // on the 45° ray between the chord and the rim
    let band = Vec2::polar(9.5, FRAC_PI_4);
    assert_eq!(hit_test(&g, band, &cfg).unwrap(), Some(Uid::new(1)));
    // beyond the rim
    assert_eq!(hit_test(&g, Vec2::polar(10.5, FRAC_PI_4), &cfg).unwrap(), None);
}

// ── lifecycle ─────────────────────────────────────────────────────────────

#[test]
fn modify_delete_and_graft() {
    setup();
    let hud = Graph::build().text("score", opts().id("score")).unwrap();
    let g = Graph::build()
        .group(
            |g| g.circle(4.0, opts().tag("enemy"))?.circle(6.0, opts().tag("enemy")),
            opts().id("enemies"),
        )
        .unwrap()
        .graft(hud, opts().translate(0.0, 20.0))
        .unwrap()
        .modify(Tag::from("enemy"), |p| p.merge(opts().fill(Color::RED)))
        .unwrap();

    assert_eq!(g.find_tag("enemy").len(), 2);
    assert!(g.find_id("score").is_some());
    g.validate().unwrap();

    let g = g.delete("enemies").unwrap();
    assert!(g.find_tag("enemy").is_empty());
    assert_eq!(g.children(Uid::ROOT).len(), 1);
    g.validate().unwrap();
}

#[test]
fn serialized_graph_is_comparable() {
    setup();
    let build = || {
        Graph::build_with(opts().font("mono"))
            .unwrap()
            .text("a", opts())
            .unwrap()
            .group(|g| g.sector((5.0, 0.0, 1.0), opts().rotate(0.25)), opts())
            .unwrap()
    };
    let a = build();
    let json = a.to_json().unwrap();
    let back = Graph::from_json(&json).unwrap();
    assert_eq!(back, a);
    assert_eq!(back.digest().unwrap(), build().digest().unwrap());

    let walked: Vec<Kind> = visits(&back).unwrap().iter().map(|v| v.primitive.kind()).collect();
    assert_eq!(walked, vec![Kind::Group, Kind::Text, Kind::Group, Kind::Sector]);
}
