use std::f32::consts::TAU;

use galgeom::math::{Point, Real, Vector};
use galgeom::shape::TriMesh;
use galgeom::view::{Drawable, Scene};
use macroquad::{
    color::{Color, WHITE},
    math::{Vec2, Vec3, Vec4},
    models::{draw_cube_wires, draw_line_3d, draw_mesh, draw_sphere, draw_sphere_wires, Mesh},
    ui::Vertex,
};

#[allow(dead_code)]
fn main() {
    println!(
        "This module contains helper functions to draw galgeom scenes with macroquad,
    isolated from the rest of the examples for the sake of simplicity."
    );
}

/// Converts a [`galgeom::math::Point`] to a [`Vec3`], which is used by [`macroquad`]
#[allow(dead_code)]
pub fn mquad_from_na(a: Point<Real>) -> Vec3 {
    Vec3::new(a.x, a.y, a.z)
}

/// Draws a text in the top left corner of the screen.
///
/// This uses a hardcoded position, size, color.
#[allow(dead_code)]
pub fn easy_draw_text(text: &str) {
    macroquad::text::draw_text(text, 10.0, 48.0 + 18.0, 30.0, WHITE);
}

/// The camera target and a camera distance that fit the whole scene.
#[allow(dead_code)]
pub fn scene_framing(scene: &Scene) -> (Vec3, f32) {
    let target = scene
        .bounds()
        .map(|b| mquad_from_na(b.center()))
        .unwrap_or(Vec3::ZERO);
    (target, scene.radius() * 3.0)
}

/// Draws every drawable of the scene, in draw order.
#[allow(dead_code)]
pub fn draw_scene(scene: &Scene, light_pos: Vec3) {
    let palette = [
        Color::new(0.9, 0.9, 0.9, 1.0),
        Color::new(1.0, 0.8, 0.2, 1.0),
        Color::new(0.3, 0.7, 1.0, 1.0),
        Color::new(0.5, 1.0, 0.5, 1.0),
    ];

    for (i, (_, _, drawable)) in scene.iter().enumerate() {
        draw_drawable(drawable, palette[i % palette.len()], light_pos);
    }
}

/// Uses [`macroquad`] to display a single drawable.
#[allow(dead_code)]
pub fn draw_drawable(drawable: &Drawable, color: Color, light_pos: Vec3) {
    match drawable {
        Drawable::Box3(aabb) => draw_cube_wires(
            mquad_from_na(aabb.center()),
            mquad_from_na(aabb.extents().into()),
            color,
        ),
        Drawable::PointCloud(cloud) => {
            for pt in cloud.iter() {
                draw_sphere(mquad_from_na(*pt), 0.02, None, color);
            }
        }
        Drawable::Sphere(sphere) => {
            draw_sphere_wires(mquad_from_na(sphere.center), sphere.radius, None, color)
        }
        Drawable::Circle2d(circle) => {
            let center = Vec3::new(circle.center().x, circle.center().y, 0.0);
            draw_polyline(circle_polyline(center, circle.radius(), 64), color);
        }
        Drawable::Mesh(mesh) => {
            // Macroquad meshes are indexed with u16.
            if mesh.num_triangles() * 3 <= u16::MAX as usize {
                draw_mesh(&mquad_mesh_from_trimesh(mesh, light_pos, color));
            }
        }
        Drawable::Plane(plane) => {
            let n = plane.normal.into_inner();
            let axis = if n.x.abs() < 0.9 {
                Vector::x()
            } else {
                Vector::y()
            };
            let u = n.cross(&axis).normalize();
            let v = n.cross(&u);
            let corners = [u + v, u - v, -u - v, -u + v].map(|d| mquad_from_na(plane.point + d));
            let edges = (0..4).map(|i| (corners[i], corners[(i + 1) % 4])).collect();
            draw_polyline(edges, color);
        }
    }
}

/// Uses [`macroquad`] to display the line passed as parameter.
#[allow(dead_code)]
pub fn draw_polyline(polyline: Vec<(Vec3, Vec3)>, color: Color) {
    for (a, b) in polyline {
        draw_line_3d(a, b, color);
    }
}

fn circle_polyline(center: Vec3, radius: f32, subdivs: usize) -> Vec<(Vec3, Vec3)> {
    let at = |i: usize| {
        let angle = i as f32 * TAU / subdivs as f32;
        center + Vec3::new(angle.cos(), angle.sin(), 0.0) * radius
    };
    (0..subdivs).map(|i| (at(i), at(i + 1))).collect()
}

/// Create a usable mesh for [`macroquad`].
///
/// This duplicates the trimesh vertices and bakes light into their colors
/// using [`mquad_compute_normals_and_bake_light`].
#[allow(dead_code)]
pub fn mquad_mesh_from_trimesh(trimesh: &TriMesh, light_pos: Vec3, color: Color) -> Mesh {
    let mquad_points: Vec<Vertex> = trimesh
        .vertices()
        .iter()
        .map(|p| Vertex {
            position: mquad_from_na(*p),
            uv: Vec2::new(p.x, p.y),
            color: color.into(),
            normal: Vec4::ZERO,
        })
        .collect();
    let mquad_indices: Vec<u16> = trimesh
        .indices()
        .iter()
        .flatten()
        .map(|v| *v as u16)
        .collect();

    // Macroquad needs custom shaders to use normals, so the lighting is baked
    // into the vertex colors instead.
    let vertices = mquad_compute_normals_and_bake_light(&mquad_points, &mquad_indices, light_pos);
    let indices = (0..vertices.len()).map(|i| i as u16).collect();
    Mesh {
        vertices,
        indices,
        texture: None,
    }
}

/// Bakes light into vertices, using an hardcoded light strength.
#[allow(dead_code)]
pub fn mquad_compute_normals_and_bake_light(
    points: &[Vertex],
    indices: &[u16],
    light_pos: Vec3,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(indices.len());
    for tri in indices.chunks(3) {
        let v0 = &points[tri[0] as usize];
        let v1 = &points[tri[1] as usize];
        let v2 = &points[tri[2] as usize];
        let normal = (v0.position - v2.position)
            .cross(v1.position - v2.position)
            .normalize();
        let brightness_mod = 0.4 + (0.6 / 2.) * (normal.dot(light_pos.normalize()) + 1.);

        for &i in tri {
            let mut color = points[i as usize].color;
            for c in &mut color[..3] {
                *c = (*c as f32 * brightness_mod) as u8;
            }

            vertices.push(Vertex {
                position: points[i as usize].position,
                uv: Vec2::ZERO,
                color,
                normal: Vec4::ZERO,
            });
        }
    }
    vertices
}
