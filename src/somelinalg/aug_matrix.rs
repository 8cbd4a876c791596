use nalgebra::{DMatrix, DVector};
use rand::Rng;
use std::fmt;
use std::ops::{Index, IndexMut};
use tabled::{builder::Builder, settings::Style};

/// Augmented matrix [A | b] of a linear system A*x = b, n rows by n + 1 columns,
/// stored in a single contiguous row-major buffer. Rows are therefore disjoint
/// slices of the buffer, which is what lets the parallel elimination sweep hand
/// every row to its own rayon task without locks. The buffer is owned by the
/// caller of the solve and is mutated in place, never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct AugMatrix {
    data: Vec<f64>,
    n: usize,
}

impl AugMatrix {
    pub fn new(data: Vec<f64>, n: usize) -> AugMatrix {
        assert!(n > 0, "system must have at least one equation");
        assert_eq!(
            data.len(),
            n * (n + 1),
            "augmented matrix must be n x (n + 1)"
        );
        AugMatrix { data, n }
    }

    /// build from per-row slices, handy in tests
    pub fn from_rows(rows: &[Vec<f64>]) -> AugMatrix {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * (n + 1));
        for row in rows {
            assert_eq!(row.len(), n + 1, "each row must hold n + 1 entries");
            data.extend_from_slice(row);
        }
        AugMatrix::new(data, n)
    }

    /// assemble [A | b] from a coefficient matrix and a right-hand side
    pub fn from_system(A: &DMatrix<f64>, b: &DVector<f64>) -> AugMatrix {
        let n = A.nrows();
        assert!(A.is_square(), "coefficient matrix must be square");
        assert_eq!(b.len(), n, "rhs length must match the matrix dimension");
        let mut data = Vec::with_capacity(n * (n + 1));
        for i in 0..n {
            for j in 0..n {
                data.push(A[(i, j)]);
            }
            data.push(b[i]);
        }
        AugMatrix::new(data, n)
    }

    /// fill with entries drawn uniformly from [0, 100), like a randomly
    /// generated test system
    pub fn random(n: usize) -> AugMatrix {
        let mut rng = rand::rng();
        Self::random_with(n, &mut rng)
    }

    /// same but with a caller-supplied generator (seeded in tests)
    pub fn random_with<R: Rng>(n: usize, rng: &mut R) -> AugMatrix {
        let data = (0..n * (n + 1))
            .map(|_| rng.random_range(0.0..100.0))
            .collect();
        AugMatrix::new(data, n)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// width of one row, n + 1
    pub fn row_len(&self) -> usize {
        self.n + 1
    }

    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.n + 1;
        &self.data[i * w..(i + 1) * w]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        let w = self.n + 1;
        &mut self.data[i * w..(i + 1) * w]
    }

    /// simultaneous shared view of row `src` and exclusive view of row `dst`
    pub fn row_pair(&mut self, src: usize, dst: usize) -> (&[f64], &mut [f64]) {
        assert_ne!(src, dst, "row_pair needs two distinct rows");
        let w = self.n + 1;
        if src < dst {
            let (head, tail) = self.data.split_at_mut(dst * w);
            (&head[src * w..src * w + w], &mut tail[..w])
        } else {
            let (head, tail) = self.data.split_at_mut(src * w);
            (&tail[..w], &mut head[dst * w..dst * w + w])
        }
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let w = self.n + 1;
        let (lo, hi) = (r1.min(r2), r1.max(r2));
        let (head, tail) = self.data.split_at_mut(hi * w);
        head[lo * w..lo * w + w].swap_with_slice(&mut tail[..w]);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// the first n columns, as a nalgebra matrix
    pub fn coefficients(&self) -> DMatrix<f64> {
        DMatrix::from_fn(self.n, self.n, |i, j| self[(i, j)])
    }

    /// the last column
    pub fn rhs(&self) -> DVector<f64> {
        DVector::from_fn(self.n, |i, _| self[(i, self.n)])
    }

    /// after a successful solve the last column holds x
    pub fn solution(&self) -> DVector<f64> {
        self.rhs()
    }

    /// whole augmented matrix as nalgebra, n x (n + 1)
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.n, self.n + 1, &self.data)
    }
}

impl Index<(usize, usize)> for AugMatrix {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * (self.n + 1) + j]
    }
}

impl IndexMut<(usize, usize)> for AugMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * (self.n + 1) + j]
    }
}

impl fmt::Display for AugMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        for i in 0..self.n {
            builder.push_record(self.row(i).iter().map(|v| format!("{:10.2}", v)));
        }
        let mut table = builder.build();
        table.with(Style::modern());
        write!(f, "{}", table)
    }
}
