use std::collections::VecDeque;

use crate::point::Point2D;
use crate::segment::Segment;

/// An open chain of connected output segments. Chains grow at both ends until
/// the two ends meet, which closes the chain into a contour.
#[derive(Debug, Clone)]
pub(crate) struct PointChain {
    nodes: VecDeque<Point2D>,
    is_closed: bool,
}

impl PointChain {
    #[inline]
    pub(crate) fn init(initial_segment: Segment) -> Self {
        let mut nodes = VecDeque::with_capacity(2);
        nodes.push_back(*initial_segment.begin());
        nodes.push_back(*initial_segment.end());
        Self {
            nodes,
            is_closed: false,
        }
    }

    /// Link a segment to the chain. Matching is by exact point equality,
    /// segments produced by the sweep share exact coordinates at junctions
    /// because split points are snapped onto endpoints.
    pub(crate) fn link_segment(&mut self, segment: &Segment) -> bool {
        let front = *self.nodes.front().unwrap();
        let back = *self.nodes.back().unwrap();
        let begin = *segment.begin();
        let end = *segment.end();

        if begin == front {
            if end == back {
                self.is_closed = true;
            } else {
                self.nodes.push_front(end);
            }
            return true;
        }
        if end == back {
            if begin == front {
                self.is_closed = true;
            } else {
                self.nodes.push_back(begin);
            }
            return true;
        }
        if end == front {
            if begin == back {
                self.is_closed = true;
            } else {
                self.nodes.push_front(begin);
            }
            return true;
        }
        if begin == back {
            if end == front {
                self.is_closed = true;
            } else {
                self.nodes.push_back(end);
            }
            return true;
        }
        false
    }

    /// Link another chain end-to-end to this one, reversing it if necessary.
    /// On success the other chain is drained.
    pub(crate) fn link_point_chain(&mut self, chain: &mut PointChain) -> bool {
        let chain_front = *chain.nodes.front().unwrap();
        let chain_back = *chain.nodes.back().unwrap();
        let self_front = *self.nodes.front().unwrap();
        let self_back = *self.nodes.back().unwrap();

        if chain_front == self_back {
            chain.nodes.pop_front();
            self.nodes.extend(chain.nodes.drain(..));
            return true;
        }
        if chain_back == self_front {
            self.nodes.pop_front();
            for p in chain.nodes.drain(..).rev() {
                self.nodes.push_front(p);
            }
            return true;
        }
        if chain_front == self_front {
            self.nodes.pop_front();
            for p in chain.nodes.drain(..) {
                self.nodes.push_front(p);
            }
            return true;
        }
        if chain_back == self_back {
            self.nodes.pop_back();
            for p in chain.nodes.drain(..).rev() {
                self.nodes.push_back(p);
            }
            return true;
        }
        false
    }

    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.is_closed
    }

    #[inline]
    pub(crate) fn into_points(self) -> Vec<Point2D> {
        self.nodes.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    #[test]
    fn test_link_segment_closes_square() {
        let mut chain = PointChain::init(seg(0.0, 0.0, 1.0, 0.0));
        assert!(chain.link_segment(&seg(1.0, 0.0, 1.0, 1.0)));
        assert!(chain.link_segment(&seg(1.0, 1.0, 0.0, 1.0)));
        assert!(!chain.is_closed());
        assert!(chain.link_segment(&seg(0.0, 1.0, 0.0, 0.0)));
        assert!(chain.is_closed());
        assert_eq!(chain.into_points().len(), 4);
    }

    #[test]
    fn test_link_segment_rejects_unrelated() {
        let mut chain = PointChain::init(seg(0.0, 0.0, 1.0, 0.0));
        assert!(!chain.link_segment(&seg(5.0, 5.0, 6.0, 5.0)));
    }

    #[test]
    fn test_link_point_chain_with_reversal() {
        // (0,0)-(1,0) and (2,0)-(1,0): linkable after reversing the second
        let mut chain = PointChain::init(seg(0.0, 0.0, 1.0, 0.0));
        let mut other = PointChain::init(seg(2.0, 0.0, 1.0, 0.0));
        assert!(chain.link_point_chain(&mut other));
        assert_eq!(
            chain.into_points(),
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(1.0, 0.0),
                Point2D::new(2.0, 0.0)
            ]
        );
    }
}
