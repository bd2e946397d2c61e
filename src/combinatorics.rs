//! Subset enumeration for the recombination of modular factors.
//!
//! ```rust
//! use polyfactor::combinatorics::CombinationIterator;
//!
//! let mut c = CombinationIterator::new(4, 3);
//! let mut combinations = vec![];
//! while let Some(a) = c.next() {
//!     combinations.push(a.to_vec());
//! }
//!
//! let ans = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
//!
//! assert_eq!(combinations, ans);
//! ```

/// An iterator over the `k`-subsets of the indices `0..n`, in lexicographic order.
///
/// The iterator lends its internal buffer, so it is driven with `while let`
/// instead of a `for` loop:
/// ```rust
/// use polyfactor::combinatorics::CombinationIterator;
/// let mut combos = CombinationIterator::new(4, 2);
///
/// while let Some(c) = combos.next() {
///     println!("{:?}", c);
/// }
/// ```
pub struct CombinationIterator {
    n: usize,
    indices: Vec<usize>,
    init: bool,
}

impl CombinationIterator {
    /// Creates a new `CombinationIterator` for generating combinations of `k` elements from a set of `n` elements.
    pub fn new(n: usize, k: usize) -> CombinationIterator {
        CombinationIterator {
            indices: (0..k).collect(),
            n,
            init: false,
        }
    }

    /// Advances the iterator and returns the next combination.
    pub fn next(&mut self) -> Option<&[usize]> {
        if self.indices.is_empty() || self.indices.len() > self.n {
            return None;
        }

        if !self.init {
            self.init = true;
            return Some(&self.indices);
        }

        let k = self.indices.len();
        let pos = (0..k)
            .rev()
            .find(|&i| self.indices[i] < self.n - k + i)?;

        let a = self.indices[pos] + 1;
        for (p, vv) in self.indices[pos..].iter_mut().enumerate() {
            *vv = a + p;
        }

        Some(&self.indices)
    }

    /// The indices in `0..n` that are not part of the current combination.
    pub fn complement(&self) -> Vec<usize> {
        let mut it = self.indices.iter().peekable();
        (0..self.n)
            .filter(|i| {
                if it.peek() == Some(&i) {
                    it.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::CombinationIterator;

    #[test]
    fn combinations() {
        let mut c = CombinationIterator::new(4, 3);
        let mut combinations = vec![];
        while let Some(a) = c.next() {
            combinations.push(a.to_vec());
        }

        let ans = vec![[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

        assert_eq!(combinations, ans);
    }

    #[test]
    fn complement() {
        let mut c = CombinationIterator::new(5, 2);
        c.next();
        c.next();
        assert_eq!(c.complement(), vec![1, 3, 4]);

        let mut count = 1;
        while c.next().is_some() {
            count += 1;
        }
        assert_eq!(count, 9);

        assert!(CombinationIterator::new(2, 3).next().is_none());
        assert!(CombinationIterator::new(3, 0).next().is_none());
    }
}
