mod bounding_sphere_demo;
mod graph;
mod mesh_functions;
