//! Dense numeric arrays.
//!
//! [`NdArray`] is a shape plus row-major `f64` data. A shape of `[]` is a
//! scalar. Broadcasting follows the NumPy rules: shapes are right-aligned and
//! each dimension must either match or be 1.

use std::fmt;

/// Row-major array of `f64` with an explicit shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

/// Shapes that cannot be broadcast together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    /// Left-hand shape.
    pub left: Vec<usize>,
    /// Right-hand shape.
    pub right: Vec<usize>,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shapes {:?} and {:?} cannot be broadcast together",
            self.left, self.right
        )
    }
}

impl std::error::Error for ShapeError {}

impl NdArray {
    /// A zero-dimensional array holding one value.
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    /// A one-dimensional array.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// An array with the given shape, or `None` if `data` has the wrong length.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<f64>) -> Option<Self> {
        (shape.iter().product::<usize>() == data.len()).then_some(Self { shape, data })
    }

    /// `n` evenly spaced values from `start` to `stop`, both inclusive.
    pub fn linspace(start: f64, stop: f64, n: usize) -> Self {
        let data = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                let mut data: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
                data[n - 1] = stop;
                data
            }
        };
        Self::from_vec(data)
    }

    /// Array of zeros with the given shape.
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            data: vec![0.0; shape.iter().product()],
        }
    }

    /// Shape of the array.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Flat row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this is a zero-dimensional array.
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// The single value of a zero-dimensional or one-element array.
    pub fn as_scalar(&self) -> Option<f64> {
        (self.data.len() == 1).then(|| self.data[0])
    }

    /// Apply `f` to every element.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Expand to `shape`, repeating along broadcast dimensions.
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self, ShapeError> {
        let target = broadcast_shapes(&self.shape, shape)?;
        if target != shape {
            return Err(ShapeError {
                left: self.shape.clone(),
                right: shape.to_vec(),
            });
        }
        if self.shape == shape {
            return Ok(self.clone());
        }

        let total: usize = shape.iter().product();
        let offset = shape.len() - self.shape.len();
        let source_strides = strides(&self.shape);
        let mut data = Vec::with_capacity(total);
        let mut index = vec![0usize; shape.len()];
        for _ in 0..total {
            let flat: usize = self
                .shape
                .iter()
                .enumerate()
                .map(|(axis, &dim)| {
                    let i = if dim == 1 { 0 } else { index[axis + offset] };
                    i * source_strides[axis]
                })
                .sum();
            data.push(self.data[flat]);
            increment(&mut index, shape);
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Combine two arrays element-wise after broadcasting.
    pub fn zip_with(
        &self,
        other: &NdArray,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Self, ShapeError> {
        let shape = broadcast_shapes(&self.shape, &other.shape)?;
        let a = self.broadcast_to(&shape)?;
        let b = other.broadcast_to(&shape)?;
        Ok(Self {
            shape,
            data: a.data.iter().zip(&b.data).map(|(&x, &y)| f(x, y)).collect(),
        })
    }
}

impl From<f64> for NdArray {
    fn from(value: f64) -> Self {
        Self::scalar(value)
    }
}

impl From<Vec<f64>> for NdArray {
    fn from(data: Vec<f64>) -> Self {
        Self::from_vec(data)
    }
}

impl<const N: usize> From<[f64; N]> for NdArray {
    fn from(data: [f64; N]) -> Self {
        Self::from_vec(data.to_vec())
    }
}

/// Broadcast two shapes together.
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Result<Vec<usize>, ShapeError> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0; ndim];
    for axis in 0..ndim {
        let da = dim_from_right(a, ndim - 1 - axis);
        let db = dim_from_right(b, ndim - 1 - axis);
        shape[axis] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => {
                return Err(ShapeError {
                    left: a.to_vec(),
                    right: b.to_vec(),
                });
            }
        };
    }
    Ok(shape)
}

fn dim_from_right(shape: &[usize], k: usize) -> usize {
    if k < shape.len() {
        shape[shape.len() - 1 - k]
    } else {
        1
    }
}

fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

fn increment(index: &mut [usize], shape: &[usize]) {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return;
        }
        index[axis] = 0;
    }
}
