//! Reassembles the accepted output segments into closed contours.

use crate::algorithm::ClipError;
use crate::point_chain::PointChain;
use crate::polygon::{Contour, Polygon};
use crate::segment::Segment;

pub(crate) struct Connector {
    open_chains: Vec<PointChain>,
    closed_chains: Vec<PointChain>,
}

impl Connector {
    pub(crate) fn new() -> Self {
        Self {
            open_chains: Vec::new(),
            closed_chains: Vec::new(),
        }
    }

    pub(crate) fn add_segment(&mut self, segment: Segment) {
        let linked = self
            .open_chains
            .iter_mut()
            .position(|chain| chain.link_segment(&segment));

        let Some(j) = linked else {
            // The segment cannot be connected with any open chain
            self.open_chains.push(PointChain::init(segment));
            return;
        };

        if self.open_chains[j].is_closed() {
            let chain = self.open_chains.remove(j);
            self.closed_chains.push(chain);
            return;
        }

        // The extended chain may now connect end-to-end with a later chain
        let (head, tail) = self.open_chains.split_at_mut(j + 1);
        let target = &mut head[j];
        let mut merged = None;
        for (offset, candidate) in tail.iter_mut().enumerate() {
            if target.link_point_chain(candidate) {
                merged = Some(j + 1 + offset);
                break;
            }
        }
        if let Some(k) = merged {
            self.open_chains.remove(k);
        }
    }

    /// Finish the computation. Any chain still open at this point means the
    /// sweep missed an intersection or the input was malformed, which is
    /// reported instead of silently emitting an open contour.
    pub(crate) fn into_polygon(self) -> Result<Polygon, ClipError> {
        if !self.open_chains.is_empty() {
            return Err(ClipError::UnclosedChains(
                self.open_chains
                    .into_iter()
                    .map(|chain| Contour::from_points(chain.into_points()))
                    .collect(),
            ));
        }

        let mut polygon = Polygon::new();
        for chain in self.closed_chains {
            polygon.push_contour(Contour::from_points(chain.into_points()));
        }
        Ok(polygon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point2D;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    #[test]
    fn test_unordered_segments_form_closed_contour() {
        let mut connector = Connector::new();
        // square edges in scrambled order and orientation
        connector.add_segment(seg(1.0, 1.0, 0.0, 1.0));
        connector.add_segment(seg(0.0, 0.0, 1.0, 0.0));
        connector.add_segment(seg(1.0, 0.0, 1.0, 1.0));
        connector.add_segment(seg(0.0, 1.0, 0.0, 0.0));
        let polygon = connector.into_polygon().unwrap();
        assert_eq!(polygon.ncontours(), 1);
        assert_eq!(polygon.contours()[0].len(), 4);
    }

    #[test]
    fn test_two_chains_merge() {
        let mut connector = Connector::new();
        // two disconnected pieces of a triangle, then the bridge
        connector.add_segment(seg(0.0, 0.0, 2.0, 0.0));
        connector.add_segment(seg(1.0, 2.0, 0.0, 0.0));
        connector.add_segment(seg(2.0, 0.0, 1.0, 2.0));
        let polygon = connector.into_polygon().unwrap();
        assert_eq!(polygon.ncontours(), 1);
        assert_eq!(polygon.contours()[0].len(), 3);
    }

    #[test]
    fn test_unclosed_chain_is_reported() {
        let mut connector = Connector::new();
        connector.add_segment(seg(0.0, 0.0, 1.0, 0.0));
        connector.add_segment(seg(1.0, 0.0, 1.0, 1.0));
        match connector.into_polygon() {
            Err(ClipError::UnclosedChains(chains)) => {
                assert_eq!(chains.len(), 1);
                assert_eq!(chains[0].len(), 3);
            }
            other => panic!("expected unclosed chain error, got {:?}", other),
        }
    }
}
