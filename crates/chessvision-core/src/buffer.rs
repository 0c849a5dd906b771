//! Owned, row-major 2D buffers used for every intermediate image.
//!
//! A [`PixelBuffer<T>`] holds `width * height` values laid out row by row with
//! the origin at the top-left corner. Every pipeline stage consumes one or more
//! buffers by reference and returns a freshly allocated buffer of the same
//! dimensions.

/// Flat index of `(x, y)` in a row-major buffer of the given width.
#[inline]
pub fn index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}

/// Errors raised when wrapping raw data into a buffer or view.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("buffer length mismatch for {width}x{height} (expected {expected} values, got {got})")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> PixelBuffer<T> {
    /// Allocate a `width x height` buffer filled with `T::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, T::default())
    }
}

impl<T: Clone> PixelBuffer<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> PixelBuffer<T> {
    /// Wrap row-major `data`; its length must be `width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, BufferError> {
        let expected = width * height;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_dims<U>(&self, other: &PixelBuffer<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Value at `(x, y)`. Panics when the coordinate lies outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &T {
        debug_assert!(x < self.width && y < self.height);
        &self.data[index(x, y, self.width)]
    }

    /// Value at a signed coordinate, `None` outside the buffer.
    #[inline]
    pub fn get_checked(&self, x: isize, y: isize) -> Option<&T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(&self.data[index(x as usize, y as usize, self.width)])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        debug_assert!(x < self.width && y < self.height);
        self.data[index(x, y, self.width)] = value;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = index(0, y, self.width);
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Apply `f` to every value, keeping the dimensions.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> PixelBuffer<U> {
        PixelBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Iterate `(x, y, &value)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (i % width, i / width, v))
    }
}

impl PixelBuffer<u16> {
    /// Widen 16-bit samples into the floating-point domain used by the filters.
    pub fn to_f64(&self) -> PixelBuffer<f64> {
        self.map(|&v| v as f64)
    }
}

impl PixelBuffer<f64> {
    /// Largest value in the buffer, `0.0` when empty.
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}
