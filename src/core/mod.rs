//! Core tour primitives.
//!
//! This module provides the point table, the anchored tour representation and
//! the population container that the operators and the engine work on. The
//! types carry their invariants with them: a [`Genome`] built through the
//! public constructors is always a permutation of every non-anchor point with
//! the anchor at both ends.

pub mod distance;
pub mod history;

use crate::error::{GenomeError, TourError, TourResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt::{self, Display, Formatter};
use std::ops::Index;

/// Index of the anchor ("home") point in every [`PointSet`].
pub const ANCHOR: usize = 0;

/// A named location on the plane.
///
/// # Examples
/// ```
/// use tourga::Point;
/// let point = Point::new("Porto Alegre", -51.2, -30.0);
/// assert_eq!(point.name, "Porto Alegre");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Human readable identity of the point.
    pub name: String,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Immutable table of points with the anchor stored at index [`ANCHOR`].
///
/// # Examples
/// ```
/// use tourga::{Point, PointSet};
/// let points = PointSet::new(
///     Point::new("home", 0.0, 0.0),
///     vec![Point::new("shop", 1.0, 0.0)],
/// )
/// .unwrap();
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.anchor().name, "home");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Builds a point set from the anchor and the remaining points.
    ///
    /// # Errors
    /// Returns [`TourError::EmptyPointSet`] when fewer than two points are
    /// supplied in total and [`TourError::NonFiniteCoordinate`] when any
    /// coordinate is NaN or infinite.
    pub fn new(anchor: Point, others: Vec<Point>) -> TourResult<Self> {
        let mut points = Vec::with_capacity(others.len() + 1);
        points.push(anchor);
        points.extend(others);
        if points.len() < 2 {
            return Err(TourError::EmptyPointSet {
                found: points.len(),
            });
        }
        if let Some(bad) = points.iter().find(|point| !point.is_finite()) {
            return Err(TourError::NonFiniteCoordinate {
                name: bad.name.clone(),
            });
        }
        Ok(Self { points })
    }

    /// Builds a point set from already-parsed `(name, x, y)` records plus a
    /// fixed anchor.
    ///
    /// # Examples
    /// ```
    /// use tourga::PointSet;
    /// let points = PointSet::from_records(
    ///     "depot",
    ///     (0.0, 0.0),
    ///     vec![("north", 0.0, 5.0), ("east", 5.0, 0.0)],
    /// )
    /// .unwrap();
    /// assert_eq!(points.len(), 3);
    /// assert_eq!(points[2].name, "east");
    /// ```
    ///
    /// # Errors
    /// See [`PointSet::new`].
    pub fn from_records<N, I>(
        anchor_name: impl Into<String>,
        anchor_xy: (f64, f64),
        records: I,
    ) -> TourResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, f64, f64)>,
    {
        let anchor = Point::new(anchor_name, anchor_xy.0, anchor_xy.1);
        let others = records
            .into_iter()
            .map(|(name, x, y)| Point::new(name, x, y))
            .collect();
        Self::new(anchor, others)
    }

    /// Returns the number of points, anchor included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a point set holds at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the anchor point.
    #[must_use]
    pub fn anchor(&self) -> &Point {
        &self.points[ANCHOR]
    }

    /// Returns every point in index order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Resolves a tour into the names of the points it visits.
    ///
    /// # Examples
    /// ```
    /// use tourga::{instances, Genome};
    /// let points = instances::unit_square();
    /// let tour = Genome::new(vec![0, 3, 2, 1, 0], points.len()).unwrap();
    /// assert_eq!(points.names_of(&tour), vec!["A", "D", "C", "B", "A"]);
    /// ```
    #[must_use]
    pub fn names_of(&self, genome: &Genome) -> Vec<&str> {
        genome
            .indices()
            .iter()
            .map(|&idx| self.points[idx].name.as_str())
            .collect()
    }
}

impl Index<usize> for PointSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

/// One candidate closed tour.
///
/// The sequence holds `n_points + 1` indices: the anchor, a permutation of
/// `1..n_points`, and the anchor again.
///
/// # Examples
/// ```
/// use tourga::Genome;
/// let genome = Genome::new(vec![0, 2, 1, 3, 0], 4).unwrap();
/// assert_eq!(genome.interior(), &[2, 1, 3]);
/// ```
///
/// With the `serde` feature a genome serializes as its plain index sequence
/// and is validated again when deserialized.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Genome {
    indices: Vec<usize>,
}

impl Genome {
    /// Wraps a sequence of indices after checking that it is a valid tour over
    /// `n_points` points.
    ///
    /// # Errors
    /// Returns a [`GenomeError`] describing the first violation found.
    pub fn new(indices: Vec<usize>, n_points: usize) -> Result<Self, GenomeError> {
        validate(&indices, n_points)?;
        Ok(Self { indices })
    }

    /// Creates a random tour: the interior is shuffled uniformly, the anchor
    /// bookends it.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use tourga::Genome;
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    /// let genome = Genome::random(6, &mut rng);
    /// assert_eq!(genome.len(), 7);
    /// assert!(genome.validate(6).is_ok());
    /// ```
    pub fn random<R: Rng + ?Sized>(n_points: usize, rng: &mut R) -> Self {
        let mut genome = Self::identity(n_points);
        let last = genome.indices.len() - 1;
        genome.indices[1..last].shuffle(rng);
        genome
    }

    /// The tour that visits every point in index order.
    ///
    /// # Examples
    /// ```
    /// use tourga::Genome;
    /// assert_eq!(Genome::identity(4).indices(), &[0, 1, 2, 3, 0]);
    /// ```
    #[must_use]
    pub fn identity(n_points: usize) -> Self {
        let mut indices = Vec::with_capacity(n_points + 1);
        indices.push(ANCHOR);
        indices.extend(1..n_points);
        indices.push(ANCHOR);
        Self { indices }
    }

    pub(crate) fn from_unchecked(indices: Vec<usize>) -> Self {
        debug_assert!(
            validate(&indices, indices.len().saturating_sub(1)).is_ok(),
            "operator produced an invalid tour: {indices:?}"
        );
        Self { indices }
    }

    /// Checks the tour invariant against a point count.
    ///
    /// # Errors
    /// Returns a [`GenomeError`] describing the first violation found.
    pub fn validate(&self, n_points: usize) -> Result<(), GenomeError> {
        validate(&self.indices, n_points)
    }

    /// Returns the full sequence, anchor at both ends.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Returns the non-anchor part of the tour.
    #[must_use]
    pub fn interior(&self) -> &[usize] {
        let last = self.indices.len().saturating_sub(1);
        &self.indices[1.min(last)..last]
    }

    pub(crate) fn indices_mut(&mut self) -> &mut [usize] {
        &mut self.indices
    }

    /// Number of entries in the sequence (points visited plus the return leg).
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Indicates whether the sequence is empty, which never happens for a
    /// validated genome.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of distinct points the tour covers, anchor included.
    #[must_use]
    pub fn n_points(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }
}

impl TryFrom<Vec<usize>> for Genome {
    type Error = GenomeError;

    /// Validates `indices` as a tour over `indices.len() - 1` points.
    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        let n_points = indices.len().saturating_sub(1);
        Self::new(indices, n_points)
    }
}

impl From<Genome> for Vec<usize> {
    fn from(genome: Genome) -> Self {
        genome.indices
    }
}

impl Display for Genome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for idx in &self.indices {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{idx}")?;
            first = false;
        }
        Ok(())
    }
}

fn validate(indices: &[usize], n_points: usize) -> Result<(), GenomeError> {
    let expected = n_points + 1;
    if indices.len() != expected || n_points < 1 {
        return Err(GenomeError::LengthMismatch {
            n_points,
            expected,
            found: indices.len(),
        });
    }
    let first = indices[0];
    let last = indices[indices.len() - 1];
    if first != ANCHOR || last != ANCHOR {
        return Err(GenomeError::AnchorNotFixed { first, last });
    }
    let mut seen = vec![false; n_points];
    for &index in &indices[1..indices.len() - 1] {
        if index == ANCHOR || index >= n_points {
            return Err(GenomeError::IndexOutOfRange { index, n_points });
        }
        if seen[index] {
            return Err(GenomeError::DuplicateIndex { index });
        }
        seen[index] = true;
    }
    Ok(())
}

/// Ordered collection of the genomes of one generation.
///
/// Until [`Population::sort_by_fitness`] is called the order is insertion
/// order; afterwards index 0 holds the cheapest tour.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use tourga::Population;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let population = Population::random(8, 5, &mut rng);
/// assert_eq!(population.len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Population {
    genomes: Vec<Genome>,
}

impl Population {
    /// Creates `size` independent random tours over `n_points` points.
    pub fn random<R: Rng + ?Sized>(size: usize, n_points: usize, rng: &mut R) -> Self {
        let genomes = (0..size).map(|_| Genome::random(n_points, rng)).collect();
        Self { genomes }
    }

    /// Wraps existing genomes, keeping their order.
    #[must_use]
    pub fn from_genomes(genomes: Vec<Genome>) -> Self {
        Self { genomes }
    }

    /// Creates an empty population with room for `capacity` genomes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            genomes: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of genomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    /// Indicates whether the population holds no genomes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }

    /// Appends a genome.
    pub fn push(&mut self, genome: Genome) {
        self.genomes.push(genome);
    }

    /// Returns the genomes in their current order.
    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Returns the first genome, which is the best one once sorted.
    #[must_use]
    pub fn best(&self) -> Option<&Genome> {
        self.genomes.first()
    }

    /// Returns the second genome, which is the runner-up once sorted.
    #[must_use]
    pub fn second_best(&self) -> Option<&Genome> {
        self.genomes.get(1)
    }

    /// Replaces every genome with the contents of `next`.
    pub fn replace(&mut self, next: Population) {
        self.genomes = next.genomes;
    }

    /// Stable ascending sort by the paired fitness values, which are reordered
    /// alongside so that `fitness[i]` keeps describing `genomes()[i]`.
    ///
    /// NaN costs sort after every finite cost.
    ///
    /// # Examples
    /// ```
    /// use tourga::{Genome, Population};
    /// let a = Genome::new(vec![0, 1, 2, 0], 3).unwrap();
    /// let b = Genome::new(vec![0, 2, 1, 0], 3).unwrap();
    /// let mut population = Population::from_genomes(vec![a.clone(), b.clone()]);
    /// let mut fitness = vec![5.0, 1.0];
    /// population.sort_by_fitness(&mut fitness);
    /// assert_eq!(population.best(), Some(&b));
    /// assert_eq!(fitness, vec![1.0, 5.0]);
    /// ```
    pub fn sort_by_fitness(&mut self, fitness: &mut Vec<f64>) {
        debug_assert_eq!(self.genomes.len(), fitness.len());
        let mut paired: Vec<(Genome, f64)> = self
            .genomes
            .drain(..)
            .zip(fitness.drain(..))
            .collect();
        paired.sort_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs));
        let (genomes, costs) = paired.into_iter().unzip();
        self.genomes = genomes;
        *fitness = costs;
    }

    /// Returns an iterator over the genomes.
    pub fn iter(&self) -> impl Iterator<Item = &Genome> {
        self.genomes.iter()
    }
}
