mod common_macroquad3d;

use common_macroquad3d::{draw_scene, easy_draw_text, scene_framing};
use galgeom::func::{geom, Store};
use galgeom::view::{Context, Drawable};
use macroquad::prelude::*;
use macroquad::ui::root_ui;

#[macroquad::main("convex_hull3d")]
async fn main() {
    let mut ctx = Context::new(Store::with_seed(0));
    let half = ctx.slider_f32("Half extent", 0.1, 2.0, 1.0).unwrap();
    let count = ctx.slider_i32("Point count", 4, 200, 50).unwrap();

    let store = ctx.store_mut();
    let mins = store
        .map1("mins", half, |h: &f32| Ok(galgeom::math::Point::new(-h, -h, -h)))
        .unwrap();
    let maxs = store
        .map1("maxs", half, |h: &f32| Ok(galgeom::math::Point::new(*h, *h, *h)))
        .unwrap();
    let aabb = geom::box3(store, mins, maxs).unwrap();
    let cloud = geom::random_point_cloud_from_box(store, aabb, count).unwrap();
    let hull = geom::point_cloud_convex_hull(store, cloud).unwrap();

    let _ = ctx.show("cloud", cloud);
    let _ = ctx.show("hull", hull);

    let mut half_value = 1.0f32;
    let mut count_value = 50.0f32;

    loop {
        clear_background(BLACK);

        root_ui().slider(0, "Half extent", 0.1..2.0, &mut half_value);
        root_ui().slider(1, "Point count", 4.0..200.0, &mut count_value);
        let _ = ctx.set_slider("Half extent", half_value as f64).unwrap();
        let _ = ctx.set_slider("Point count", count_value as f64).unwrap();
        let _ = ctx.eval_outputs();

        let (target, distance) = scene_framing(ctx.scene());
        let angle = get_time() as f32 * 0.3;
        set_camera(&Camera3D {
            position: target + Vec3::new(angle.cos(), 0.6, angle.sin()) * distance,
            up: Vec3::new(0f32, 1f32, 0f32),
            target,
            ..Default::default()
        });
        draw_scene(ctx.scene(), Vec3::new(1.0, 3.0, 2.0));

        set_default_camera();
        if let Some(Drawable::Mesh(mesh)) = ctx.scene().get_by_name("hull") {
            easy_draw_text(&format!(
                "hull: {} vertices, {} triangles, volume {:.3}",
                mesh.vertices().len(),
                mesh.num_triangles(),
                mesh.volume()
            ));
        }
        next_frame().await
    }
}
