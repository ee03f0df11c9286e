//! Crossover operators for recombining tours.

use crate::core::{Genome, ANCHOR};
use rand::seq::index;
use rand::RngCore;
use std::sync::Arc;

/// Produces a child tour by mixing two parent tours.
///
/// Implementations must return a valid tour over the same points as the
/// parents.
///
/// # Examples
/// ```
/// use tourga::ops::CrossoverOperator;
/// use tourga::Genome;
/// use rand::SeedableRng;
///
/// struct KeepSecond;
///
/// impl CrossoverOperator for KeepSecond {
///     fn crossover(&self, _a: &Genome, b: &Genome, _rng: &mut dyn rand::RngCore) -> Genome {
///         b.clone()
///     }
/// }
///
/// let a = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
/// let b = Genome::new(vec![0, 2, 1, 0], 3).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// assert_eq!(KeepSecond.crossover(&a, &b, &mut rng), b);
/// ```
pub trait CrossoverOperator: Send + Sync {
    /// Combines two parents into one child.
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome;
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &T {
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for &mut T {
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Box<T> {
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

impl<T: CrossoverOperator + ?Sized> CrossoverOperator for Arc<T> {
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome {
        (**self).crossover(parent_a, parent_b, rng)
    }
}

/// Order crossover.
///
/// A contiguous block `[start, end)` of the first parent is copied into the
/// child at the same positions. The remaining slots are filled left to right
/// with the missing points in the order they appear in the second parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCrossover;

impl OrderCrossover {
    /// Creates the operator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs the crossover with explicit cut points.
    ///
    /// # Examples
    /// ```
    /// use tourga::ops::OrderCrossover;
    /// use tourga::Genome;
    /// let a = Genome::new(vec![0, 1, 2, 3, 4, 5, 0], 6).unwrap();
    /// let b = Genome::new(vec![0, 5, 4, 3, 2, 1, 0], 6).unwrap();
    /// let child = OrderCrossover::with_cuts(&a, &b, 2, 4);
    /// assert_eq!(child.indices(), &[0, 5, 2, 3, 4, 1, 0]);
    /// ```
    ///
    /// # Panics
    /// Panics unless `1 <= start < end <= parent_a.len() - 1`, or when the
    /// parents have different lengths.
    #[must_use]
    pub fn with_cuts(parent_a: &Genome, parent_b: &Genome, start: usize, end: usize) -> Genome {
        let len = parent_a.len();
        assert_eq!(len, parent_b.len(), "parents must cover the same points");
        assert!(
            1 <= start && start < end && end < len,
            "cut points {start}..{end} fall outside the interior of a tour of length {len}"
        );

        let mut child: Vec<Option<usize>> = vec![None; len];
        let mut used = vec![false; len];
        child[0] = Some(ANCHOR);
        child[len - 1] = Some(ANCHOR);
        used[ANCHOR] = true;
        for (slot, &gene) in child[start..end]
            .iter_mut()
            .zip(&parent_a.indices()[start..end])
        {
            *slot = Some(gene);
            used[gene] = true;
        }

        let mut pointer = 1;
        for &gene in parent_b.indices() {
            if used[gene] {
                continue;
            }
            while child[pointer].is_some() {
                pointer += 1;
            }
            child[pointer] = Some(gene);
            used[gene] = true;
        }

        Genome::from_unchecked(child.into_iter().flatten().collect())
    }
}

impl CrossoverOperator for OrderCrossover {
    fn crossover(&self, parent_a: &Genome, parent_b: &Genome, rng: &mut dyn RngCore) -> Genome {
        debug_assert_eq!(parent_a.len(), parent_b.len());
        let interior = parent_a.interior().len();
        if interior < 2 {
            return parent_a.clone();
        }
        let cuts = index::sample(rng, interior, 2);
        let (lhs, rhs) = (cuts.index(0) + 1, cuts.index(1) + 1);
        let (start, end) = (lhs.min(rhs), lhs.max(rhs));
        tracing::trace!(start, end, "order crossover cut points");
        Self::with_cuts(parent_a, parent_b, start, end)
    }
}
