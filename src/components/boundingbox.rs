use glam::Vec2;

/// Axis-aligned box anchored at an entity position plus an offset.
///
/// Frames derive one of these from their hitbox (or sprite rectangle) so the
/// movement and damage code can ask geometric questions without caring where
/// the numbers came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Anchor position, usually the owning entity's position.
    pub position: Vec2,
    /// Displacement of the box's top-left corner from `position`.
    pub offset: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl BoundingBox {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            offset: Vec2::ZERO,
            size,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Top-left corner in world space. Negative sizes are normalized.
    pub fn min(&self) -> Vec2 {
        let p0 = self.position + self.offset;
        p0.min(p0 + self.size)
    }

    /// Bottom-right corner in world space.
    pub fn max(&self) -> Vec2 {
        let p0 = self.position + self.offset;
        p0.max(p0 + self.size)
    }

    pub fn width(&self) -> f32 {
        self.size.x.abs()
    }

    pub fn height(&self) -> f32 {
        self.size.y.abs()
    }

    /// Same box moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            position: self.position + delta,
            ..*self
        }
    }

    /// Point containment, edges included.
    pub fn contains_point(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Box vs box overlap. Touching edges count as a hit.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (min_a, max_a) = (self.min(), self.max());
        let (min_b, max_b) = (other.min(), other.max());
        min_a.x <= max_b.x && max_a.x >= min_b.x && min_a.y <= max_b.y && max_a.y >= min_b.y
    }
}
