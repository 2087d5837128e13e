use galgeom::func::{geom, input, Datum, FuncError, Store};
use galgeom::math::{Point, Point2, Real};
use std::sync::Arc;

#[test]
fn diamond_dependencies_run_once() {
    let mut store = Store::with_seed(0);
    let x = store.variable(1.0 as Real);
    let a = store.map1("a", x.output(), |x: &Real| Ok(x + 1.0)).unwrap();
    let b = store.map1("b", x.output(), |x: &Real| Ok(x * 2.0)).unwrap();
    let c = store
        .map2("c", a, b, |a: &Real, b: &Real| Ok(a * b))
        .unwrap();
    let fa = store.owner(a.register()).unwrap();
    let fc = store.owner(c.register()).unwrap();

    assert_eq!(*store.get(c).unwrap(), 4.0);
    store.set(&x, 2.0).unwrap();
    assert_eq!(*store.get(c).unwrap(), 12.0);
    assert_eq!(store.run_count(fa), 2);
    assert_eq!(store.run_count(fc), 2);
    assert_eq!(store.function_name(fc), Some("c"));
}

#[test]
fn errors_carry_the_failing_function() {
    let mut store = Store::new();
    let lo = geom::number_f32(&mut store, -1.0);
    let hi = geom::number_f32(&mut store, 1.0);
    let mins = geom::vec3(&mut store, lo, lo, lo).unwrap();
    let maxs = geom::vec3(&mut store, hi, hi, hi).unwrap();
    let aabb = geom::box3(&mut store, mins, maxs).unwrap();
    let count = store.variable(-3);
    let cloud = geom::random_point_cloud_from_box(&mut store, aabb, count.output()).unwrap();
    let (sphere, _) = geom::bounding_sphere(&mut store, cloud).unwrap();

    let err = store.get(sphere).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        FuncError::InvalidInput {
            function: "random_point_cloud_from_box",
            ..
        }
    ));

    store.set(&count, 0).unwrap();
    let err = store.get(sphere).unwrap_err();
    assert!(matches!(
        err,
        FuncError::Evaluation { ref function, .. } if function == "bounding_sphere"
    ));
    assert!(matches!(err.root_cause(), FuncError::Geometry(_)));

    store.set(&count, 8).unwrap();
    let sphere = store.get(sphere).unwrap();
    assert!(sphere.radius > 0.0);
}

#[test]
fn custom_multi_output_functions() {
    let mut store = Store::new();
    let pts = store.constant(vec![
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(2.0, 1.0),
    ]);
    let circle = geom::bounding_circle(&mut store, pts).unwrap();
    assert_relative_eq!(store.get(circle).unwrap().radius(), 2.0, epsilon = 1.0e-5);

    let split = |inputs: &[Arc<dyn Datum>]| -> Result<Vec<Arc<dyn Datum>>, FuncError> {
        let pts: &Vec<Point2<Real>> = input(inputs, 0)?;
        let xs: Vec<Real> = pts.iter().map(|p| p.x).collect();
        let ys: Vec<Real> = pts.iter().map(|p| p.y).collect();
        Ok(vec![Arc::new(xs) as Arc<dyn Datum>, Arc::new(ys) as Arc<dyn Datum>])
    };
    let (fid, outputs) = store
        .add_function(
            "split",
            &[pts.register()],
            &[std::any::type_name::<Vec<Real>>(), std::any::type_name::<Vec<Real>>()],
            Box::new(split),
        )
        .unwrap();
    assert_eq!(outputs.len(), 2);

    let ys = outputs[1].typed::<Vec<Real>>().unwrap();
    assert_eq!(*store.get(ys).unwrap(), vec![0.0, 0.0, 1.0]);
    assert!(outputs[0].typed::<Vec<Point<Real>>>().is_err());
    assert_eq!(store.function_outputs(fid).unwrap().len(), 2);

    store.remove_function(fid).unwrap();
    assert!(matches!(
        store.get(ys),
        Err(FuncError::MissingRegister(_))
    ));
}
