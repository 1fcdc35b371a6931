/// Bounding box
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bbox {
    pub(crate) top: f64,
    pub(crate) right: f64,
    pub(crate) bottom: f64,
    pub(crate) left: f64,
}

impl Bbox {
    /// Returns true if two bounding boxes overlap
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !((other.left > self.right)
            || (other.right < self.left)
            || (other.top < self.bottom)
            || (other.bottom > self.top))
    }

    /// Smallest box containing both boxes
    #[inline]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
            left: self.left.min(other.left),
        }
    }
}
