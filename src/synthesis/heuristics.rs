// Admissibility checks for line candidates.
//
// A line whose endpoint is white can always be shortened or dropped without
// changing the result, so those are never generated. The Patch-Ratio check
// bounds how many separate black runs a line may stitch together relative to
// the erasures it would force: with `w` white cells on the segment the line
// costs `1 + w` operations, so it is only worth keeping when it replaces at
// most `w + 1` black patches.

use crate::core::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentProfile {
    pub white_count: usize,
    pub black_patches: usize,
}

pub fn profile(segment: &[Cell]) -> SegmentProfile {
    let mut white_count = 0;
    let mut black_patches = 0;
    let mut in_patch = false;
    for &cell in segment {
        match cell {
            Cell::White => {
                white_count += 1;
                in_patch = false;
            }
            Cell::Black => {
                if !in_patch {
                    black_patches += 1;
                    in_patch = true;
                }
            }
        }
    }
    SegmentProfile { white_count, black_patches }
}

pub fn endpoints_black(segment: &[Cell]) -> bool {
    matches!(
        (segment.first(), segment.last()),
        (Some(Cell::Black), Some(Cell::Black))
    )
}

pub fn patch_ratio_admits(segment: &[Cell]) -> bool {
    let p = profile(segment);
    p.black_patches <= p.white_count + 1
}

/// Full line check: black endpoints, plus Patch-Ratio when enabled.
pub fn line_admissible(segment: &[Cell], patch_ratio: bool) -> bool {
    endpoints_black(segment) && (!patch_ratio || patch_ratio_admits(segment))
}
