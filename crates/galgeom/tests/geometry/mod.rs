mod bounding_circle;
mod convex_hull;
mod minimal_bounding_sphere;
mod trimesh_queries;
