//! Greedy first-fit pagination

use crate::document::Block;
use crate::layout::page::{Page, PageSet};
use crate::measure::HeightMeasure;

/// Partition `blocks` into capacity-bounded pages.
///
/// Deterministic greedy first-fit in a single left-to-right pass: a page is
/// closed as soon as the next block would push it past `capacity`, unless
/// the page is still empty. A block whose own height exceeds the capacity
/// is placed alone on its page, which is then allowed to overflow; blocks
/// are never split. An empty input yields exactly one empty page.
///
/// The result is a pure function of the blocks, their measured heights and
/// the capacity. Negative or non-finite heights are clamped to zero, so
/// there is no failure path.
pub fn paginate<M>(blocks: &[Block], capacity: f32, measure: &M) -> PageSet
where
    M: HeightMeasure + ?Sized,
{
    let mut pages = Vec::new();
    let mut current = Page::new(0, 0);

    for (position, block) in blocks.iter().enumerate() {
        let h = sanitize(measure.measure(block));

        if current.height + h > capacity && !current.is_empty() {
            let next_start = current.block_range.end;
            pages.push(current);
            current = Page::new(pages.len(), next_start);
        }

        current.block_range.end = position + 1;
        current.height += h;
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }

    PageSet::from_pages(pages)
}

/// Clamp malformed heights so running totals stay finite and non-negative
fn sanitize(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BlockId;
    use crate::measure::{FixedEstimate, RenderedHeights};

    fn blocks(n: usize) -> Vec<Block> {
        (0..n)
            .map(|i| Block::paragraph(BlockId(i as u64), format!("block {}", i)))
            .collect()
    }

    #[test]
    fn test_three_blocks_fit_one_a4_page() {
        // Capacity 1122, three blocks of height 50 each
        let set = paginate(&blocks(3), 1122.0, &FixedEstimate::new(50.0));
        assert_eq!(set.page_count(), 1);
        assert_eq!(set.page(0).unwrap().block_count(), 3);
        assert_eq!(set.page(0).unwrap().height, 150.0);
    }

    #[test]
    fn test_greedy_first_fit_splits_after_two() {
        // Capacity 120, three blocks of height 50: 50+50 fit, the third spills
        let set = paginate(&blocks(3), 120.0, &FixedEstimate::new(50.0));
        assert_eq!(set.page_count(), 2);
        assert_eq!(set.page(0).unwrap().block_range, 0..2);
        assert_eq!(set.page(1).unwrap().block_range, 2..3);
        assert_eq!(set.page(1).unwrap().height, 50.0);
    }

    #[test]
    fn test_oversized_block_gets_own_page() {
        // A block taller than the page is placed alone and overflows
        let set = paginate(&blocks(1), 10.0, &FixedEstimate::new(50.0));
        assert_eq!(set.page_count(), 1);
        assert_eq!(set.page(0).unwrap().block_count(), 1);
        assert!(set.page(0).unwrap().height > 10.0);
    }

    #[test]
    fn test_oversized_block_between_neighbors() {
        let mut measure = RenderedHeights::with_fallback(FixedEstimate::new(40.0));
        measure.record(BlockId(1), 500.0);

        let set = paginate(&blocks(3), 100.0, &measure);
        assert_eq!(set.page_count(), 3);
        assert_eq!(set.page(0).unwrap().block_range, 0..1);
        assert_eq!(set.page(1).unwrap().block_range, 1..2);
        assert_eq!(set.page(1).unwrap().height, 500.0);
        assert_eq!(set.page(2).unwrap().block_range, 2..3);
    }

    #[test]
    fn test_empty_input_yields_one_empty_page() {
        let set = paginate(&[], 1122.0, &FixedEstimate::default());
        assert_eq!(set.page_count(), 1);
        assert!(set.page(0).unwrap().is_empty());
    }

    #[test]
    fn test_negative_and_nan_heights_clamped() {
        struct Broken;
        impl HeightMeasure for Broken {
            fn measure(&self, block: &Block) -> f32 {
                match block.id.0 % 3 {
                    0 => -25.0,
                    1 => f32::NAN,
                    _ => 30.0,
                }
            }
        }

        let set = paginate(&blocks(6), 100.0, &Broken);
        assert!(set.is_partition_of(6));
        for page in set.pages() {
            assert!(page.height >= 0.0);
            assert!(page.height.is_finite());
        }
    }

    #[test]
    fn test_partition_is_lossless_and_ordered() {
        let mut measure = RenderedHeights::with_fallback(FixedEstimate::new(50.0));
        // Uneven heights exercise varied break positions
        for i in 0..40u64 {
            measure.record(BlockId(i), 10.0 + (i * 17 % 90) as f32);
        }

        let input = blocks(40);
        let set = paginate(&input, 200.0, &measure);
        assert!(set.is_partition_of(40));

        let mut seen = Vec::new();
        for page in set.pages() {
            for position in page.block_range.clone() {
                seen.push(input[position].id);
            }
        }
        let expected: Vec<_> = input.iter().map(|b| b.id).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_multi_block_pages_respect_capacity() {
        let mut measure = RenderedHeights::with_fallback(FixedEstimate::new(50.0));
        for i in 0..30u64 {
            measure.record(BlockId(i), 10.0 + (i * 37 % 250) as f32);
        }

        let input = blocks(30);
        let set = paginate(&input, 200.0, &measure);
        for page in set.pages() {
            if page.block_count() > 1 {
                assert!(page.height <= 200.0);
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let input = blocks(25);
        let measure = FixedEstimate::new(37.0);
        let first = paginate(&input, 150.0, &measure);
        let second = paginate(&input, 150.0, &measure);
        assert_eq!(first, second);
    }
}
