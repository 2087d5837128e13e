use crate::bounding_volume::{Aabb, BoundingSphere, BoundingVolume};
use crate::func::Datum;
use crate::math::{Point, Real};
use crate::shape::{Circle2d, Plane, PointCloud, TriMesh};
use slab::Slab;
use std::sync::Arc;

/// A value the viewer knows how to draw.
///
/// Drawables share the values computed by the function graph instead of
/// copying them.
#[derive(Debug, Clone)]
pub enum Drawable {
    /// A 3D box.
    Box3(Arc<Aabb>),
    /// A point cloud.
    PointCloud(Arc<PointCloud>),
    /// A sphere.
    Sphere(Arc<BoundingSphere>),
    /// A circle of the `z = 0` plane.
    Circle2d(Arc<Circle2d>),
    /// A triangle mesh.
    Mesh(Arc<TriMesh>),
    /// An infinite plane.
    Plane(Arc<Plane>),
}

macro_rules! try_drawable {
    ($value: ident, $($ty: ty => $variant: ident),*) => {
        $(
            let $value = match $value.downcast_arc::<$ty>() {
                Ok(v) => return Ok(Drawable::$variant(v)),
                Err(v) => v,
            };
        )*
    };
}

impl Drawable {
    /// Wraps a graph value, or gives it back if its type can't be drawn.
    pub fn from_datum(value: Arc<dyn Datum>) -> Result<Self, Arc<dyn Datum>> {
        try_drawable!(
            value,
            Aabb => Box3,
            PointCloud => PointCloud,
            BoundingSphere => Sphere,
            Circle2d => Circle2d,
            TriMesh => Mesh,
            Plane => Plane
        );
        Err(value)
    }

    /// A short name of the kind of this drawable.
    pub fn kind(&self) -> &'static str {
        match self {
            Drawable::Box3(_) => "box3",
            Drawable::PointCloud(_) => "point_cloud",
            Drawable::Sphere(_) => "sphere",
            Drawable::Circle2d(_) => "circle2d",
            Drawable::Mesh(_) => "mesh",
            Drawable::Plane(_) => "plane",
        }
    }

    /// The bounding box of this drawable.
    ///
    /// Returns `None` for unbounded (planes) or empty drawables.
    pub fn aabb(&self) -> Option<Aabb> {
        let aabb = match self {
            Drawable::Box3(aabb) => **aabb,
            Drawable::PointCloud(cloud) => cloud.aabb(),
            Drawable::Sphere(sphere) => sphere.aabb(),
            Drawable::Circle2d(circle) => {
                let rect = circle.aabb();
                Aabb::new(
                    Point::new(rect.mins.x, rect.mins.y, 0.0),
                    Point::new(rect.maxs.x, rect.maxs.y, 0.0),
                )
            }
            Drawable::Mesh(mesh) => mesh.aabb(),
            Drawable::Plane(_) => return None,
        };
        aabb.is_valid().then_some(aabb)
    }

    /// The shared value behind this drawable.
    pub fn datum(&self) -> Arc<dyn Datum> {
        match self {
            Drawable::Box3(v) => v.clone() as Arc<dyn Datum>,
            Drawable::PointCloud(v) => v.clone() as Arc<dyn Datum>,
            Drawable::Sphere(v) => v.clone() as Arc<dyn Datum>,
            Drawable::Circle2d(v) => v.clone() as Arc<dyn Datum>,
            Drawable::Mesh(v) => v.clone() as Arc<dyn Datum>,
            Drawable::Plane(v) => v.clone() as Arc<dyn Datum>,
        }
    }
}

/// The identifier of a drawable of a [`Scene`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawId(pub usize);

#[derive(Debug)]
struct SceneEntry {
    name: String,
    drawable: Drawable,
}

/// The named drawables currently displayed.
#[derive(Debug, Default)]
pub struct Scene {
    entries: Slab<SceneEntry>,
    // Draw order. Holds every key of `entries` exactly once.
    order: Vec<DrawId>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the drawable `old`, or adds a new one if `old` is `None` or no
    /// longer exists.
    ///
    /// A replaced drawable keeps its identifier, hence its draw order. New
    /// drawables are drawn last.
    pub fn replace_drawable(
        &mut self,
        old: Option<DrawId>,
        name: &str,
        drawable: Drawable,
    ) -> DrawId {
        if let Some(id) = old {
            if let Some(entry) = self.entries.get_mut(id.0) {
                entry.drawable = drawable;
                name.clone_into(&mut entry.name);
                return id;
            }
        }

        let id = DrawId(self.entries.insert(SceneEntry {
            name: name.to_string(),
            drawable,
        }));
        self.order.push(id);
        id
    }

    /// Removes a drawable.
    pub fn remove(&mut self, id: DrawId) -> Option<Drawable> {
        if !self.entries.contains(id.0) {
            return None;
        }
        self.order.retain(|o| *o != id);
        Some(self.entries.remove(id.0).drawable)
    }

    /// Moves the given drawables to the front of the draw order, in the order
    /// they are listed.
    ///
    /// Unknown identifiers are ignored. The other drawables keep their
    /// relative order, after the listed ones.
    pub fn set_draw_order(&mut self, ids: impl IntoIterator<Item = DrawId>) {
        let mut order = Vec::with_capacity(self.order.len());
        for id in ids {
            if self.entries.contains(id.0) && !order.contains(&id) {
                order.push(id);
            }
        }
        for id in &self.order {
            if !order.contains(id) {
                order.push(*id);
            }
        }
        self.order = order;
    }

    /// The drawable with the given identifier.
    pub fn get(&self, id: DrawId) -> Option<&Drawable> {
        self.entries.get(id.0).map(|e| &e.drawable)
    }

    /// The first drawable, in draw order, with the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&Drawable> {
        self.iter().find(|(_, n, _)| *n == name).map(|(_, _, d)| d)
    }

    /// All the drawables, in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (DrawId, &str, &Drawable)> {
        self.order.iter().map(move |id| {
            let e = &self.entries[id.0];
            (*id, e.name.as_str(), &e.drawable)
        })
    }

    /// The number of drawables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The box containing every bounded drawable, or `None` if there is none.
    pub fn bounds(&self) -> Option<Aabb> {
        self.iter()
            .filter_map(|(_, _, d)| d.aabb())
            .reduce(|a, b| a.merged(&b))
    }

    /// The radius of a sphere containing every bounded drawable, centered on [`Scene::bounds`].
    pub fn radius(&self) -> Real {
        self.bounds()
            .map(|b| b.half_extents().norm())
            .unwrap_or(1.0)
    }
}
