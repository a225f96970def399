//! The set of live shapes.
//!
//! The registry is plain data: it never talks to a rendering engine. The
//! [`SceneMutator`](crate::SceneMutator) pairs every registry change with the
//! matching engine call.

use glam::Vec3;
use rand::prelude::*;

use crate::geometry::spatial_distance;
use crate::shape::{Color, Palette, Shape, ShapeId, ShapeKind};

pub struct ShapeRegistry {
    shapes: Vec<Shape>,
    next_id: u64,
    palette: Palette,
    rng: StdRng,
    kinds: Vec<ShapeKind>,
}

impl ShapeRegistry {
    /// `seed` drives the random kind picked by [`create_random`](Self::create_random).
    pub fn new(seed: u64) -> Self {
        Self {
            shapes: Vec::new(),
            next_id: 1,
            palette: Palette::default(),
            rng: StdRng::seed_from_u64(seed),
            kinds: ShapeKind::ALL.to_vec(),
        }
    }

    /// Restrict the kinds [`create_random`](Self::create_random) picks from.
    /// An empty list keeps the current pool.
    pub fn with_kinds(mut self, kinds: &[ShapeKind]) -> Self {
        if !kinds.is_empty() {
            self.kinds = kinds.to_vec();
        }
        self
    }

    /// Register a new shape with the next palette color and unit scale.
    pub fn create(&mut self, kind: ShapeKind, position: Vec3) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        let color = self.palette.next_color();
        self.shapes.push(Shape::new(id, kind, position, color));
        id
    }

    pub fn create_random(&mut self, position: Vec3) -> ShapeId {
        let kind = *self.kinds.choose(&mut self.rng).unwrap_or(&ShapeKind::Box);
        self.create(kind, position)
    }

    /// Advance the shared palette. Creation and recolor draw from the same cursor.
    pub fn next_color(&mut self) -> Color {
        self.palette.next_color()
    }

    /// Closest shape strictly within `max_distance`; the first one found wins ties.
    pub fn find_nearest(&self, position: Vec3, max_distance: f32) -> Option<ShapeId> {
        self.find_nearest_excluding(position, max_distance, None)
    }

    pub fn find_nearest_excluding(
        &self,
        position: Vec3,
        max_distance: f32,
        exclude: Option<ShapeId>,
    ) -> Option<ShapeId> {
        let mut best = None::<(ShapeId, f32)>;
        for shape in &self.shapes {
            if Some(shape.id) == exclude {
                continue;
            }
            let d = spatial_distance(shape.position, position);
            if !(d < max_distance) {
                continue;
            }
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((shape.id, d)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Deregister a shape. Returns `None` when it was already gone.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(idx))
    }

    #[inline]
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    #[inline]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(|s| s.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
