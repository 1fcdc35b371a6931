//! Sweep events, the event arena, and the two orderings that drive the
//! Martinez-Rueda sweep.
//!
//! Every segment is represented by a pair of events, one per endpoint, that
//! reference each other through `other`. All events of one computation live in
//! a single arena and are addressed by `EventIndex`, which sidesteps the
//! ownership cycle of the mutual back-references. The arena index also serves
//! as the final tie-breaker of the sweep order: collinear degenerate segments
//! have no geometric order, and without a tie-break the comparator would not
//! be a strict total order, corrupting the event queue.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use crate::point::Point2D;
use crate::segment::Segment;
use crate::utils::signed_area3;

/// Indicates if the edge belongs to the subject or clipping polygon
#[derive(Debug, PartialEq, Copy, Clone, Eq)]
pub(crate) enum PolygonType {
    Subject,
    Clipping,
}

/// Classification of edges discovered to be collinear with an edge of the
/// other polygon
#[derive(Debug, PartialEq, Copy, Clone, Eq)]
pub(crate) enum EdgeType {
    Normal,
    NonContributing,
    SameSign,
    DifferentSign,
}

/// Handle into the event arena. Doubles as the event creation order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub(crate) struct EventIndex(pub(crate) usize);

impl EventIndex {
    /// Stand-in while the second event of a pair is not allocated yet
    pub(crate) const PLACEHOLDER: EventIndex = EventIndex(usize::MAX);
}

#[derive(Debug, Clone)]
pub(crate) struct SweepEvent {
    /// Point associated with the event
    pub point: Point2D,
    /// Is the point the left endpoint of the edge (point, other.point)?
    pub left: bool,
    /// Polygon to which the associated segment belongs
    pub polygon: PolygonType,
    /// Event associated to the other endpoint of the edge
    pub other: EventIndex,
    /// Only set on left events while in the status line. Does the edge
    /// represent an inside-outside transition of its own polygon for a
    /// vertical ray from below?
    pub in_out: bool,
    /// Only set on left events while in the status line. Is the edge inside
    /// the other polygon?
    pub inside: bool,
    /// Used for overlapping edges
    pub edge_type: EdgeType,
    /// Only valid for left events currently in the status line
    pub status_position: usize,
}

/// Owns every event of one computation. Events are never freed individually,
/// the arena is dropped as a whole when the computation finishes.
#[derive(Debug, Default)]
pub(crate) struct EventArena {
    events: Vec<SweepEvent>,
}

impl EventArena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn alloc(
        &mut self,
        point: Point2D,
        left: bool,
        polygon: PolygonType,
        other: EventIndex,
        edge_type: EdgeType,
    ) -> EventIndex {
        self.events.push(SweepEvent {
            point,
            left,
            polygon,
            other,
            in_out: false,
            inside: false,
            edge_type,
            status_position: 0,
        });
        EventIndex(self.events.len() - 1)
    }

    /// The segment associated to the event, directed from the event's own
    /// point to the partner's point
    pub(crate) fn segment(&self, e: EventIndex) -> Segment {
        Segment::new(self[e].point, self[self[e].other].point)
    }

    /// Is the segment associated to `e` below point `p`?
    pub(crate) fn below(&self, e: EventIndex, p: &Point2D) -> bool {
        let event = &self[e];
        let other = &self[event.other].point;
        if event.left {
            signed_area3(&event.point, other, p) > 0.0
        } else {
            signed_area3(other, &event.point, p) > 0.0
        }
    }

}

impl Index<EventIndex> for EventArena {
    type Output = SweepEvent;

    #[inline]
    fn index(&self, index: EventIndex) -> &SweepEvent {
        &self.events[index.0]
    }
}

impl IndexMut<EventIndex> for EventArena {
    #[inline]
    fn index_mut(&mut self, index: EventIndex) -> &mut SweepEvent {
        &mut self.events[index.0]
    }
}

/// Sweep processing order. `Less` means `a` is popped from the event queue
/// before `b`.
///
/// The tie-break sequence must make this a strict total order:
/// x, then y, then right endpoints before left endpoints, then the lower
/// segment, then creation order.
pub(crate) fn sweep_order(arena: &EventArena, a: EventIndex, b: EventIndex) -> Ordering {
    let ea = &arena[a];
    let eb = &arena[b];

    match ea.point.x.total_cmp(&eb.point.x) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match ea.point.y.total_cmp(&eb.point.y) {
        Ordering::Equal => {}
        ord => return ord,
    }

    // Same point, but one is a left endpoint and the other a right one.
    // The right endpoint is processed first, so that segments ending here are
    // retired before segments starting here are considered.
    if ea.left != eb.left {
        return if ea.left {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    // Same point, both left or both right endpoints. The event associated to
    // the bottom segment is processed first.
    let a_other = &arena[ea.other].point;
    let b_other = &arena[eb.other].point;
    let sa = if ea.left {
        signed_area3(&ea.point, a_other, b_other)
    } else {
        signed_area3(a_other, &ea.point, b_other)
    };
    if sa < 0.0 {
        return Ordering::Greater;
    }
    if sa > 0.0 {
        return Ordering::Less;
    }

    // Perfectly collinear, fall back to creation order
    a.cmp(&b)
}

/// Status-line order for two left events. `Less` means the segment of `a`
/// lies below the segment of `b` at the sweep position where `b` starts.
pub(crate) fn status_order(arena: &EventArena, a: EventIndex, b: EventIndex) -> Ordering {
    let ea = &arena[a];
    let eb = &arena[b];
    let a_other = arena[ea.other].point;
    let b_other = arena[eb.other].point;

    if signed_area3(&ea.point, &a_other, &b_other) != 0.0
        || signed_area3(&ea.point, &a_other, &eb.point) != 0.0
    {
        // Segments are not collinear.
        // If they share their left endpoint, use the right endpoint to sort
        if ea.point == eb.point {
            return if arena.below(a, &b_other) {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        // Different left endpoints: the segment of `b` was inserted into the
        // status line after the segment of `a`
        return if arena.below(a, &eb.point) {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    // Segments are collinear
    if ea.point == eb.point {
        return a.cmp(&b);
    }
    sweep_order(arena, a, b)
}
