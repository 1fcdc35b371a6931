//! The Martinez-Rueda sweep driver.
//!
//! Segments of both polygons are turned into sweep event pairs and processed
//! in lexicographic order. Left events enter the status line, right events
//! retire their segment and decide whether it contributes to the requested
//! operation. Newly adjacent segments in the status line are tested against
//! each other and subdivided at their intersection points, which feeds new
//! event pairs back into the queue mid-sweep.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::bbox::Bbox;
use crate::connector::Connector;
use crate::point::{find_intersection, Point2D, SegmentIntersection};
use crate::polygon::{BoolOpType, Contour, Polygon};
use crate::segment::Segment;
use crate::sweep_event::{
    status_order, sweep_order, EdgeType, EventArena, EventIndex, PolygonType,
};

/// Failure of a boolean operation
#[derive(Debug)]
pub enum ClipError {
    /// The connector could not close every output contour. This indicates a
    /// malformed input (typically a self-intersecting contour) or a missed
    /// intersection; the unclosed chains are returned for diagnosis.
    UnclosedChains(Vec<Contour>),
}

impl fmt::Display for ClipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipError::UnclosedChains(chains) => {
                write!(
                    f,
                    "boolean operation produced {} unclosed output chain(s)",
                    chains.len()
                )
            }
        }
    }
}

impl std::error::Error for ClipError {}

/// Compute `op` on the two polygons.
///
/// Input contours must not self-intersect (holes and multiple disjoint
/// contours are fine). Consecutive duplicate points and a closing point equal
/// to the first are removed before the sweep; contours with fewer than three
/// remaining points are ignored.
pub fn boolean_op(
    subject: &Polygon,
    clipping: &Polygon,
    op: BoolOpType,
) -> Result<Polygon, ClipError> {
    let subject = clean(subject);
    let clipping = clean(clipping);

    // Trivial case: at least one of the polygons is empty
    if subject.ncontours() == 0 || clipping.ncontours() == 0 {
        return Ok(match op {
            BoolOpType::Difference => subject,
            BoolOpType::Union => {
                if subject.ncontours() == 0 {
                    clipping
                } else {
                    subject
                }
            }
            BoolOpType::Intersection => Polygon::new(),
        });
    }

    // Trivial case: the bounding boxes do not overlap
    let subject_bbox = subject.bounding_box();
    let clipping_bbox = clipping.bounding_box();
    if !subject_bbox.overlaps(&clipping_bbox) {
        return Ok(match op {
            BoolOpType::Difference => subject,
            BoolOpType::Intersection => Polygon::new(),
            BoolOpType::Union => {
                let mut result = subject;
                for contour in clipping.contours() {
                    result.push_contour(contour.clone());
                }
                result
            }
        });
    }

    BooleanOp::new(op, subject.nvertices() + clipping.nvertices())
        .sweep(&subject, &clipping, &subject_bbox, &clipping_bbox)
}

/// Drop consecutive duplicate points, a closing point equal to the first, and
/// contours left with fewer than three vertices.
fn clean(polygon: &Polygon) -> Polygon {
    let mut out = Polygon::new();
    for contour in polygon.contours() {
        if contour.len() <= 2 {
            continue;
        }
        let mut cleaned = Contour::new();
        for &p in contour.points() {
            if cleaned.points().last() != Some(&p) {
                cleaned.push(p);
            }
        }
        if cleaned.len() > 1 && cleaned.points().first() == cleaned.points().last() {
            cleaned.pop();
        }
        if cleaned.len() >= 3 {
            out.push_contour(cleaned);
        }
    }
    out
}

/// Event queue: a binary min-heap of arena indices under the sweep order.
/// Grows mid-sweep when segments are divided.
struct EventQueue {
    heap: Vec<EventIndex>,
}

impl EventQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, arena: &EventArena, e: EventIndex) {
        self.heap.push(e);
        self.sift_up(arena, self.heap.len() - 1);
    }

    fn pop(&mut self, arena: &EventArena) -> Option<EventIndex> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(arena, 0);
        }
        Some(min)
    }

    fn sift_up(&mut self, arena: &EventArena, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if sweep_order(arena, self.heap[i], self.heap[parent]) == Ordering::Less {
                self.heap.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, arena: &EventArena, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < self.heap.len()
                && sweep_order(arena, self.heap[left], self.heap[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < self.heap.len()
                && sweep_order(arena, self.heap[right], self.heap[smallest]) == Ordering::Less
            {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.heap.swap(i, smallest);
            i = smallest;
        }
    }
}

/// The ordered set of left events whose segments currently cross the sweep
/// line, bottom to top. Each contained event stores its position so the
/// matching right event can find it without a search; positions are fixed up
/// when an insert or removal shifts the tail.
struct StatusLine {
    events: Vec<EventIndex>,
}

impl StatusLine {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn len(&self) -> usize {
        self.events.len()
    }

    fn get(&self, pos: usize) -> EventIndex {
        self.events[pos]
    }

    fn insert(&mut self, arena: &mut EventArena, pos: usize, e: EventIndex) {
        self.events.insert(pos, e);
        for (i, &ev) in self.events.iter().enumerate().skip(pos) {
            arena[ev].status_position = i;
        }
    }

    fn remove(&mut self, arena: &mut EventArena, pos: usize) -> EventIndex {
        let e = self.events.remove(pos);
        for (i, &ev) in self.events.iter().enumerate().skip(pos) {
            arena[ev].status_position = i;
        }
        e
    }
}

struct BooleanOp {
    op: BoolOpType,
    arena: EventArena,
    queue: EventQueue,
    status: StatusLine,
    connector: Connector,
    /// Number of intersections found, for diagnostics
    intersections: usize,
}

impl BooleanOp {
    fn new(op: BoolOpType, nvertices: usize) -> Self {
        Self {
            op,
            arena: EventArena::with_capacity(nvertices * 2),
            queue: EventQueue::with_capacity(nvertices * 2),
            status: StatusLine::new(),
            connector: Connector::new(),
            intersections: 0,
        }
    }

    fn sweep(
        mut self,
        subject: &Polygon,
        clipping: &Polygon,
        subject_bbox: &Bbox,
        clipping_bbox: &Bbox,
    ) -> Result<Polygon, ClipError> {
        // Insert the endpoints of all edges into the event queue
        for contour in subject.contours() {
            for p in 0..contour.len() {
                self.process_segment(contour.segment(p), PolygonType::Subject);
            }
        }
        for contour in clipping.contours() {
            for p in 0..contour.len() {
                self.process_segment(contour.segment(p), PolygonType::Clipping);
            }
        }

        // Past this x no further intersection between the operands is possible
        let minmax_x = subject_bbox.right.min(clipping_bbox.right);
        let mut processed = 0usize;

        while let Some(e) = self.queue.pop(&self.arena) {
            processed += 1;
            let point = self.arena[e].point;
            trace!(
                x = point.x,
                y = point.y,
                left = self.arena[e].left,
                "processing event"
            );

            match self.op {
                BoolOpType::Intersection if point.x > minmax_x => break,
                BoolOpType::Difference if point.x > subject_bbox.right => break,
                BoolOpType::Union if point.x > minmax_x => {
                    // everything still queued lies right of the other polygon,
                    // hand the remaining segments to the connector unchecked
                    if !self.arena[e].left {
                        self.connector.add_segment(self.arena.segment(e));
                    }
                    while let Some(e) = self.queue.pop(&self.arena) {
                        if !self.arena[e].left {
                            self.connector.add_segment(self.arena.segment(e));
                        }
                    }
                    break;
                }
                _ => {}
            }

            if self.arena[e].left {
                self.handle_left_event(e);
            } else {
                self.handle_right_event(e);
            }
        }

        debug!(
            events = self.arena.len(),
            processed,
            intersections = self.intersections,
            "sweep complete"
        );
        self.connector.into_polygon()
    }

    /// Compute the events associated to segment `s` and insert them into the
    /// event queue
    fn process_segment(&mut self, s: Segment, polygon: PolygonType) {
        if s.begin() == s.end() {
            // zero-length edge, nothing to sweep
            return;
        }
        let e1 = self.arena.alloc(
            *s.begin(),
            true,
            polygon,
            EventIndex::PLACEHOLDER,
            EdgeType::Normal,
        );
        let e2 = self
            .arena
            .alloc(*s.end(), true, polygon, e1, EdgeType::Normal);
        self.arena[e1].other = e2;

        if s.begin().x < s.end().x {
            self.arena[e2].left = false;
        } else if s.begin().x > s.end().x {
            self.arena[e1].left = false;
        } else if s.begin().y < s.end().y {
            // the segment is vertical, the bottom endpoint is the left one
            self.arena[e2].left = false;
        } else {
            self.arena[e1].left = false;
        }

        self.queue.push(&self.arena, e1);
        self.queue.push(&self.arena, e2);
    }

    /// Insert the segment of `e` into the status line, computing its
    /// `inside`/`in_out` flags from the segments below it, then test it
    /// against both new neighbors.
    fn handle_left_event(&mut self, e: EventIndex) {
        let mut inside = false;
        let mut in_out = false;
        let mut pos = 0;
        while pos < self.status.len() {
            let below = self.status.get(pos);
            if status_order(&self.arena, below, e) != Ordering::Less {
                break;
            }
            if self.arena[below].polygon != self.arena[e].polygon {
                inside = !inside;
            } else {
                in_out = !in_out;
            }
            pos += 1;
        }
        self.arena[e].inside = inside;
        self.arena[e].in_out = in_out;
        self.status.insert(&mut self.arena, pos, e);

        if pos + 1 < self.status.len() {
            self.possible_intersection(e, self.status.get(pos + 1));
        }
        if pos > 0 {
            self.possible_intersection(e, self.status.get(pos - 1));
        }
    }

    /// Decide whether the finished segment contributes to the result, remove
    /// it from the status line, and test its former neighbors against each
    /// other.
    fn handle_right_event(&mut self, e: EventIndex) {
        let left = self.arena[e].other;
        let pos = self.arena[left].status_position;

        if self.contributes(e) {
            self.connector.add_segment(self.arena.segment(e));
        }

        self.status.remove(&mut self.arena, pos);
        if pos > 0 && pos < self.status.len() {
            self.possible_intersection(self.status.get(pos), self.status.get(pos - 1));
        }
    }

    /// The contribution decision table, evaluated when a segment is retired
    fn contributes(&self, e: EventIndex) -> bool {
        let event = &self.arena[e];
        let other_inside = self.arena[event.other].inside;
        match event.edge_type {
            EdgeType::Normal => match self.op {
                BoolOpType::Intersection => other_inside,
                BoolOpType::Union => !other_inside,
                BoolOpType::Difference => {
                    (event.polygon == PolygonType::Subject && !other_inside)
                        || (event.polygon == PolygonType::Clipping && other_inside)
                }
            },
            EdgeType::SameSign => {
                matches!(self.op, BoolOpType::Intersection | BoolOpType::Union)
            }
            EdgeType::DifferentSign => self.op == BoolOpType::Difference,
            EdgeType::NonContributing => false,
        }
    }

    /// Resolve the geometric relationship between the segments of two
    /// adjacent left events
    fn possible_intersection(&mut self, e1: EventIndex, e2: EventIndex) {
        if self.arena[e1].polygon == self.arena[e2].polygon {
            // edges of one operand only meet at shared contour vertices,
            // self-intersecting inputs are a documented precondition violation
            return;
        }

        match find_intersection(&self.arena.segment(e1), &self.arena.segment(e2)) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point(ip) => self.handle_crossing(e1, e2, ip),
            SegmentIntersection::Overlap(_, _) => self.handle_overlap(e1, e2),
        }
    }

    fn handle_crossing(&mut self, e1: EventIndex, e2: EventIndex, ip: Point2D) {
        let e1_other = self.arena[e1].other;
        let e2_other = self.arena[e2].other;

        // a touch at a shared endpoint is a plain polygon-chain vertex
        if self.arena[e1].point.epsilon_equal(&self.arena[e2].point)
            || self.arena[e1_other]
                .point
                .epsilon_equal(&self.arena[e2_other].point)
        {
            return;
        }

        self.intersections += 1;
        if self.arena[e1].point != ip && self.arena[e1_other].point != ip {
            self.divide_segment(e1, ip);
        }
        if self.arena[e2].point != ip && self.arena[e2_other].point != ip {
            self.divide_segment(e2, ip);
        }
    }

    /// The segments are collinear and overlap in more than one point.
    /// Classify by how the four endpoints nest, so that exactly one copy of
    /// the shared part survives with the right transition tag.
    fn handle_overlap(&mut self, e1: EventIndex, e2: EventIndex) {
        self.intersections += 2;
        let e1_other = self.arena[e1].other;
        let e2_other = self.arena[e2].other;

        let transition = if self.arena[e1].in_out == self.arena[e2].in_out {
            EdgeType::SameSign
        } else {
            EdgeType::DifferentSign
        };

        // the four endpoint events in sweep order; a shared endpoint
        // collapses to a single `None` marker
        let mut sorted: Vec<Option<EventIndex>> = Vec::with_capacity(4);
        if self.arena[e1].point == self.arena[e2].point {
            sorted.push(None);
        } else if sweep_order(&self.arena, e1, e2) == Ordering::Less {
            sorted.push(Some(e1));
            sorted.push(Some(e2));
        } else {
            sorted.push(Some(e2));
            sorted.push(Some(e1));
        }
        if self.arena[e1_other].point == self.arena[e2_other].point {
            sorted.push(None);
        } else if sweep_order(&self.arena, e1_other, e2_other) == Ordering::Less {
            sorted.push(Some(e1_other));
            sorted.push(Some(e2_other));
        } else {
            sorted.push(Some(e2_other));
            sorted.push(Some(e1_other));
        }

        if sorted.len() == 2 {
            // identical segments: one copy is retired, the other carries the
            // transition tag and survives into the connector where the
            // operation wants it
            self.arena[e1].edge_type = EdgeType::NonContributing;
            self.arena[e1_other].edge_type = EdgeType::NonContributing;
            self.arena[e2].edge_type = transition;
            self.arena[e2_other].edge_type = transition;
            return;
        }

        if sorted.len() == 3 {
            // the segments share one endpoint
            let Some(middle) = sorted[1] else { return };
            let middle_other = self.arena[middle].other;
            self.arena[middle].edge_type = EdgeType::NonContributing;
            self.arena[middle_other].edge_type = EdgeType::NonContributing;

            let target = if let Some(first) = sorted[0] {
                // the shared endpoint is the right one
                let first_other = self.arena[first].other;
                self.arena[first_other].edge_type = transition;
                first
            } else if let Some(last) = sorted[2] {
                // the shared endpoint is the left one
                let last_other = self.arena[last].other;
                self.arena[last_other].edge_type = transition;
                last_other
            } else {
                return;
            };
            let split = self.arena[middle].point;
            self.divide_segment(target, split);
            return;
        }

        let (Some(first), Some(second), Some(third), Some(fourth)) =
            (sorted[0], sorted[1], sorted[2], sorted[3])
        else {
            return;
        };

        if first != self.arena[fourth].other {
            // partial overlap, neither segment contains the other: the middle
            // part becomes its own tagged segment on both operands
            self.arena[second].edge_type = EdgeType::NonContributing;
            self.arena[third].edge_type = transition;
            let split_first = self.arena[second].point;
            self.divide_segment(first, split_first);
            let split_second = self.arena[third].point;
            self.divide_segment(second, split_second);
            return;
        }

        // one segment contains the other
        let second_other = self.arena[second].other;
        self.arena[second].edge_type = EdgeType::NonContributing;
        self.arena[second_other].edge_type = EdgeType::NonContributing;
        let split_first = self.arena[second].point;
        self.divide_segment(first, split_first);

        let fourth_other = self.arena[fourth].other;
        self.arena[fourth_other].edge_type = transition;
        let split_second = self.arena[third].point;
        self.divide_segment(fourth_other, split_second);
    }

    /// Split the segment of left event `e` at `p`, retargeting the existing
    /// pair to the left half and queueing a fresh pair for the right half
    fn divide_segment(&mut self, e: EventIndex, p: Point2D) {
        trace!(x = p.x, y = p.y, "dividing segment");
        let other = self.arena[e].other;
        let polygon = self.arena[e].polygon;
        let e_type = self.arena[e].edge_type;
        let other_type = self.arena[other].edge_type;

        // right event closing the left half
        let r = self.arena.alloc(p, false, polygon, e, e_type);
        // left event opening the right half
        let l = self.arena.alloc(p, true, polygon, other, other_type);

        // rounding guard: if the split point sorts after the far endpoint the
        // left/right roles of the right half must be swapped
        if sweep_order(&self.arena, l, other) == Ordering::Greater {
            self.arena[other].left = true;
            self.arena[l].left = false;
        }

        self.arena[other].other = l;
        self.arena[e].other = r;
        self.queue.push(&self.arena, l);
        self.queue.push(&self.arena, r);
    }
}
