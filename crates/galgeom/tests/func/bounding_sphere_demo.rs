use galgeom::demos;
use galgeom::func::Store;
use galgeom::view::{Context, Drawable};
use std::sync::Arc;

#[test]
fn end_to_end_with_default_count() {
    let mut ctx = Context::new(Store::with_seed(2024));
    let demo = demos::bounding_sphere(&mut ctx).unwrap();
    let sampling = ctx.store().owner(demo.cloud.register()).unwrap();
    let sphere_fn = ctx.store().owner(demo.sphere.register()).unwrap();

    assert_eq!(ctx.store_mut().get(demo.count).map(|c| *c).unwrap(), 25);
    assert_eq!(ctx.eval_outputs(), 0);
    assert_eq!(ctx.store().run_count(sampling), 1);
    assert_eq!(ctx.store().run_count(sphere_fn), 1);

    // Draw order follows the show order.
    let drawn: Vec<_> = ctx
        .scene()
        .iter()
        .map(|(_, name, d)| (name.to_string(), d.kind()))
        .collect();
    assert_eq!(
        drawn,
        [
            ("cloud".to_string(), "point_cloud"),
            ("sphere".to_string(), "sphere")
        ]
    );

    let cloud = ctx.store_mut().get(demo.cloud).unwrap();
    let sphere = ctx.store_mut().get(demo.sphere).unwrap();
    assert_eq!(cloud.len(), 25);
    match ctx.scene().get_by_name("sphere") {
        Some(Drawable::Sphere(shown)) => assert!(Arc::ptr_eq(shown, &sphere)),
        other => panic!("unexpected drawable {:?}", other),
    }

    // The only sphere is the first output of the bounding sphere function.
    let spheres = ctx
        .scene()
        .iter()
        .filter(|(_, _, d)| matches!(d, Drawable::Sphere(_)))
        .count();
    assert_eq!(spheres, 1);
    assert!(sphere.radius > 0.0 && sphere.radius <= 3.0f32.sqrt());
    assert!(cloud
        .iter()
        .all(|pt| na::distance(pt, &sphere.center) <= sphere.radius * (1.0 + 1.0e-4)));

    let bounds = ctx.scene().bounds().unwrap();
    assert!(bounds.contains_local_point(&sphere.center));
    assert!(cloud.iter().all(|pt| bounds.contains_local_point(pt)));
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut ctx = Context::new(Store::with_seed(seed));
        let demo = demos::bounding_sphere(&mut ctx).unwrap();
        let _ = ctx.eval_outputs();
        let sphere = ctx.store_mut().get(demo.sphere).unwrap();
        *sphere
    };

    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn run_by_name() {
    let mut ctx = Context::default();
    assert!(demos::run("bounding-sphere", &mut ctx).unwrap());
    assert!(!demos::run("no-such-demo", &mut ctx).unwrap());
    assert_eq!(ctx.inputs().len(), 1);
}
