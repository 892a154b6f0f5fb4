//! Legal destination generators for each piece type.
//!
//! Generators only see the hive through [`HiveView`], a read-only view that
//! answers occupancy and stack-height questions. The sliding, climbing and
//! connectivity gates are provided methods built on those two queries, so any
//! occupancy store gets them for free.

use crate::hex::{Direction, HexCoord};
use crate::piece::PieceType;
use std::collections::HashSet;

/// Two occupied (or, when climbing, taller) flanking cells close a gate
pub const FOM_BLOCKERS: usize = 2;

/// Number of slides a spider makes
pub const SPIDER_STEPS: usize = 3;

/// Read-only view of the hive used by move generation
pub trait HiveView {
    /// Whether any piece sits at `at`
    fn is_occupied(&self, at: HexCoord) -> bool;

    /// Number of pieces stacked at `at` (0 when empty)
    fn stack_height(&self, at: HexCoord) -> usize;

    /// Every cell holding at least one piece
    fn occupied_cells(&self) -> Vec<HexCoord>;

    /// Whether a piece leaving `from` for `to` still touches the hive at `to`.
    ///
    /// `from` itself only counts as a neighbor when pieces remain under the
    /// one that leaves.
    fn destination_touches_hive(&self, from: HexCoord, to: HexCoord) -> bool {
        if self.is_occupied(to) {
            return true;
        }

        if self.stack_height(from) > 1 {
            return to.neighbors().iter().any(|&n| self.is_occupied(n));
        }

        to.neighbors()
            .iter()
            .any(|&n| n != from && self.is_occupied(n))
    }

    /// Freedom-of-movement check for a ground-level slide between adjacent cells
    fn can_slide_to(&self, from: HexCoord, to: HexCoord) -> bool {
        if !from.is_adjacent(&to) {
            return false;
        }

        let blocked = from
            .shared_neighbors(&to)
            .into_iter()
            .filter(|&n| self.is_occupied(n))
            .count();

        blocked < FOM_BLOCKERS
    }

    /// Freedom-of-movement check for a move that may change level.
    ///
    /// Same-level moves defer to [`HiveView::can_slide_to`]. Otherwise the gate
    /// only closes when both flanking stacks are taller than the source (minus
    /// the moving piece) and the destination.
    fn can_climb_to(&self, from: HexCoord, to: HexCoord) -> bool {
        if !from.is_adjacent(&to) {
            return false;
        }

        let from_height = self.stack_height(from).saturating_sub(1);
        let to_height = self.stack_height(to);

        if from_height == to_height {
            return self.can_slide_to(from, to);
        }

        let taller = from
            .shared_neighbors(&to)
            .into_iter()
            .filter(|&n| {
                let h = self.stack_height(n);
                h > from_height && h > to_height
            })
            .count();

        taller < FOM_BLOCKERS
    }

    /// Whether lifting the top piece at `from` (and, with `to`, setting it
    /// down there) keeps the hive a single connected group.
    ///
    /// The lifted piece is never actually removed: the traversal skips `from`
    /// when the piece is alone in its cell, which is exactly the set of cells
    /// left occupied after a lift.
    fn would_stay_connected(&self, from: HexCoord, to: Option<HexCoord>) -> bool {
        if !self.is_occupied(from) {
            return true;
        }

        if let Some(to) = to {
            if !self.destination_touches_hive(from, to) {
                return false;
            }
        }

        // A stack stays behind, so the cell is still part of the hive
        if self.stack_height(from) > 1 {
            return true;
        }

        let remaining: HashSet<HexCoord> = self
            .occupied_cells()
            .into_iter()
            .filter(|&c| c != from)
            .collect();

        let Some(&start) = remaining.iter().next() else {
            return true;
        };

        let mut visited = HashSet::with_capacity(remaining.len());
        let mut stack = vec![start];
        while let Some(cur) = stack.pop() {
            if !visited.insert(cur) {
                continue;
            }
            for n in cur.neighbors() {
                if remaining.contains(&n) && !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }

        visited.len() == remaining.len()
    }
}

/// All cells the top piece at `from` may move to, given its type.
///
/// Returns an empty set when lifting the piece would split the hive.
pub fn legal_destinations<H: HiveView + ?Sized>(
    hive: &H,
    piece_type: PieceType,
    from: HexCoord,
) -> HashSet<HexCoord> {
    if !hive.would_stay_connected(from, None) {
        return HashSet::new();
    }

    match piece_type {
        PieceType::Queen => queen_moves(hive, from),
        PieceType::Beetle => beetle_moves(hive, from),
        PieceType::Grasshopper => grasshopper_moves(hive, from),
        PieceType::Spider => spider_moves(hive, from),
        PieceType::Ant => ant_moves(hive, from),
    }
}

/// One step of a ground-level crawl from `cur`, for a piece that started at `origin`
fn can_crawl<H: HiveView + ?Sized>(hive: &H, origin: HexCoord, cur: HexCoord, to: HexCoord) -> bool {
    !hive.is_occupied(to) && hive.destination_touches_hive(origin, to) && hive.can_slide_to(cur, to)
}

fn queen_moves<H: HiveView + ?Sized>(hive: &H, from: HexCoord) -> HashSet<HexCoord> {
    from.neighbors()
        .into_iter()
        .filter(|&to| can_crawl(hive, from, from, to))
        .collect()
}

fn beetle_moves<H: HiveView + ?Sized>(hive: &H, from: HexCoord) -> HashSet<HexCoord> {
    from.neighbors()
        .into_iter()
        .filter(|&to| hive.destination_touches_hive(from, to) && hive.can_climb_to(from, to))
        .collect()
}

fn grasshopper_moves<H: HiveView + ?Sized>(hive: &H, from: HexCoord) -> HashSet<HexCoord> {
    let mut dests = HashSet::new();

    for dir in Direction::ALL {
        let mut cur = from.neighbor(dir);
        if !hive.is_occupied(cur) {
            continue;
        }
        while hive.is_occupied(cur) {
            cur = cur.neighbor(dir);
        }
        dests.insert(cur);
    }

    dests
}

fn spider_moves<H: HiveView + ?Sized>(hive: &H, from: HexCoord) -> HashSet<HexCoord> {
    fn walk<H: HiveView + ?Sized>(
        hive: &H,
        origin: HexCoord,
        path: &mut Vec<HexCoord>,
        dests: &mut HashSet<HexCoord>,
    ) {
        let cur = path.last().copied().unwrap_or(origin);
        if path.len() == SPIDER_STEPS {
            dests.insert(cur);
            return;
        }

        for next in cur.neighbors() {
            if path.contains(&next) || !can_crawl(hive, origin, cur, next) {
                continue;
            }
            path.push(next);
            walk(hive, origin, path, dests);
            path.pop();
        }
    }

    let mut dests = HashSet::new();
    let mut path = Vec::with_capacity(SPIDER_STEPS);
    walk(hive, from, &mut path, &mut dests);
    dests
}

fn ant_moves<H: HiveView + ?Sized>(hive: &H, from: HexCoord) -> HashSet<HexCoord> {
    let mut reached = HashSet::new();
    let mut frontier = vec![from];

    while let Some(cur) = frontier.pop() {
        for next in cur.neighbors() {
            if next == from || reached.contains(&next) {
                continue;
            }
            if !can_crawl(hive, from, cur, next) {
                continue;
            }
            reached.insert(next);
            frontier.push(next);
        }
    }

    reached
}
