mod common_macroquad3d;

use common_macroquad3d::{draw_scene, easy_draw_text, scene_framing};
use galgeom::demos;
use galgeom::func::Store;
use galgeom::view::{Context, Drawable};
use macroquad::prelude::*;
use macroquad::ui::root_ui;

const LABEL: &str = "Point count";

#[macroquad::main("bounding_sphere3d")]
async fn main() {
    let mut ctx = Context::new(Store::with_seed(0));
    let _ = demos::bounding_sphere(&mut ctx).unwrap();

    let slider = ctx.inputs().find(LABEL).unwrap();
    let (min, max) = slider.range();
    let mut count = slider.value() as f32;

    loop {
        clear_background(BLACK);

        // The slider edits the graph variable, `eval_outputs` only re-runs the
        // sampling and the bounding sphere when the count changed.
        root_ui().slider(0, LABEL, min as f32..max as f32, &mut count);
        let _ = ctx.set_slider(LABEL, count as f64).unwrap();
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
        if let Some(Drawable::Sphere(sphere)) = ctx.scene().get_by_name("sphere") {
            easy_draw_text(&format!(
                "{} points, bounding sphere radius: {:.3}",
                count.round(),
                sphere.radius
            ));
        }
        next_frame().await
    }
}
