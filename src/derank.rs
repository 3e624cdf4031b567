// Arg-min over the children of a heap node.
//
// Small tournaments are unrolled so ties keep resolving to the left-most
// element, which the open list relies on for a stable sift-down.

/// Core comparison and index selection
#[inline(always)]
#[must_use]
fn fight<T: PartialOrd>(a: &[T], l: usize, r: usize) -> usize {
    if a[l] <= a[r] { l } else { r }
}

// 0   1
// *   *
//  \ /
//   *
#[inline(always)]
#[must_use]
pub fn derank_2<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 2);
    fight(a, 0, 1)
}

// 0   1   2   3
// *   *   *   *
//  \ /     \ /
//   *       *
//    \     /
//       *
#[inline(always)]
#[must_use]
pub fn derank_4<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 4);
    fight(
        a, //
        fight(a, 0, 1),
        fight(a, 2, 3),
    )
}

// 0 1   2 3   4 5   6 7
//  *     *     *     *
//     *           *
//           *
#[inline(always)]
#[must_use]
pub fn derank_8<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(a.len() == 8);
    let l = fight(a, fight(a, 0, 1), fight(a, 2, 3));
    let r = fight(a, fight(a, 4, 5), fight(a, 6, 7));
    fight(a, l, r)
}

/// Finds the index of the smallest element, preferring the left-most one.
///
/// ```
/// use astar_pathfinding::derank::derank;
/// assert_eq!(derank(&[3, 1, 2]), 1);
/// assert_eq!(derank(&[1, 0, 0, 5]), 1);
/// assert_eq!(derank(&[7]), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn derank<T: PartialOrd>(a: &[T]) -> usize {
    debug_assert!(!a.is_empty(), "Can't derank an empty slice");
    match a.len() {
        1 => 0,
        2 => derank_2(a),
        4 => derank_4(a),
        8 => derank_8(a),
        len => (1..len).fold(0, |best, i| fight(a, best, i)),
    }
}
