//! Cartesian product of a product's option values.

/// Lazily yields every combination of value indices, one index per option.
///
/// Order matches nested loops with the last option varying fastest, so for
/// sizes `[2, 2]` the sequence is `[0,0] [0,1] [1,0] [1,1]`. That order is
/// what variant numbers and inventory remainders are assigned by.
#[derive(Debug, Clone)]
pub struct Combinations {
    sizes: Vec<usize>,
    /// Next combination to yield; `None` once exhausted.
    next: Option<Vec<usize>>,
    remaining: usize,
}

impl Combinations {
    /// Combinations over options with the given value counts, or `None` when
    /// their count does not fit in `usize`.
    ///
    /// Any zero-sized option makes the product empty. An empty `sizes` slice
    /// yields a single empty combination.
    #[must_use]
    pub fn new(sizes: &[usize]) -> Option<Self> {
        let total = sizes
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))?;
        let next = (total > 0).then(|| vec![0; sizes.len()]);
        Some(Self {
            sizes: sizes.to_vec(),
            next,
            remaining: total,
        })
    }

    /// Step the odometer; returns `None` after the last combination.
    fn advance(&self, current: &[usize]) -> Option<Vec<usize>> {
        let mut following = current.to_vec();
        for pos in (0..following.len()).rev() {
            following[pos] += 1;
            if following[pos] < self.sizes[pos] {
                return Some(following);
            }
            following[pos] = 0;
        }
        None
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = self.advance(&current);
        self.remaining = self.remaining.saturating_sub(1);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Combinations {}
