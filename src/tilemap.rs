/// A 2D grid of terrain samples, stored row-major.
///
/// `x` is the column (world x offset), `y` is the row (world z offset).
/// The grid does not wrap: neighborhoods are clipped at
/// the edges and smoothing mirrors values across the border.
#[derive(Clone, Debug, PartialEq)]
pub struct Tilemap<T> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Tilemap<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    /// Build a tilemap from row vectors. Returns `None` when the rows are
    /// ragged; an empty input yields a 0x0 map.
    pub fn from_rows(rows: &[Vec<T>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend(row.iter().cloned());
        }

        Some(Self { width, height, data })
    }

    /// Build a tilemap by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self { width, height, data }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height, "({}, {}) out of bounds", x, y);
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.data[self.index(x, y)]
    }

    /// Signed lookup; `None` outside the grid.
    pub fn try_get(&self, x: i32, y: i32) -> Option<&T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.get(x as usize, y as usize))
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    pub fn same_shape<U>(&self, other: &Tilemap<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values in the square window of the given radius around (x, y),
    /// clipped at the grid edges.
    pub fn window(&self, x: usize, y: usize, radius: usize) -> impl Iterator<Item = &T> + '_ {
        let x0 = x.saturating_sub(radius);
        let x1 = (x + radius).min(self.width - 1);
        let y0 = y.saturating_sub(radius);
        let y1 = (y + radius).min(self.height - 1);

        (y0..=y1).flat_map(move |wy| (x0..=x1).map(move |wx| self.get(wx, wy)))
    }

    /// Row slice for row `y`.
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Apply `f` to every value, keeping the shape.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Tilemap<U> {
        Tilemap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Iterate over all cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        self.data.iter().enumerate().map(move |(idx, val)| {
            let x = idx % self.width;
            let y = idx / self.width;
            (x, y, val)
        })
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut T)> {
        let width = self.width;
        self.data.iter_mut().enumerate().map(move |(idx, val)| {
            let x = idx % width;
            let y = idx / width;
            (x, y, val)
        })
    }
}

impl<T: Clone + Send + Sync> Tilemap<T> {
    /// Build a tilemap row by row in parallel. `f(x, y)` must not depend on
    /// evaluation order.
    pub fn par_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> T + Sync) -> Self {
        use rayon::prelude::*;

        let rows: Vec<Vec<T>> = (0..height)
            .into_par_iter()
            .map(|y| (0..width).map(|x| f(x, y)).collect())
            .collect();

        let mut data = Vec::with_capacity(width * height);
        for row in rows {
            data.extend(row);
        }
        Self { width, height, data }
    }
}

impl Tilemap<f32> {
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::MIN, f32::max)
    }

    /// Divide every value by the grid maximum so the best cell scores 1.0.
    /// A grid whose maximum is not positive is returned unchanged.
    pub fn normalized_to_max(&self) -> Self {
        let max_val = self.max_value();
        if self.is_empty() || max_val <= 0.0 {
            return self.clone();
        }
        self.map(|v| v / max_val)
    }

    /// Separable gaussian blur with mirrored borders (`d c b a | a b c d | d c b a`).
    /// The kernel extends four sigmas on each side.
    pub fn gaussian_smooth(&self, sigma: f32) -> Self {
        if self.is_empty() || sigma <= 0.0 {
            return self.clone();
        }

        let radius = (4.0 * sigma + 0.5) as usize;
        let kernel = gaussian_kernel(radius, sigma);
        let half_kernel = radius as i32;

        // Horizontal pass
        let mut horizontal = Tilemap::new_with(self.width, self.height, 0.0);
        for y in 0..self.height {
            for x in 0..self.width {
                let mut sum = 0.0;
                let mut weight_sum = 0.0;

                for (ki, &weight) in kernel.iter().enumerate() {
                    let offset = ki as i32 - half_kernel;
                    let sx = mirror_index(x as i32 + offset, self.width);
                    sum += *self.get(sx, y) * weight;
                    weight_sum += weight;
                }

                horizontal.set(x, y, sum / weight_sum);
            }
        }

        // Vertical pass
        let mut result = Tilemap::new_with(self.width, self.height, 0.0);
        for y in 0..self.height {
            for x in 0..self.width {
                let mut sum = 0.0;
                let mut weight_sum = 0.0;

                for (ki, &weight) in kernel.iter().enumerate() {
                    let offset = ki as i32 - half_kernel;
                    let sy = mirror_index(y as i32 + offset, self.height);
                    sum += *horizontal.get(x, sy) * weight;
                    weight_sum += weight;
                }

                result.set(x, y, sum / weight_sum);
            }
        }

        result
    }
}

/// Reflect an out-of-range index back into `0..len`, repeating the edge sample.
fn mirror_index(i: i32, len: usize) -> usize {
    let len = len as i32;
    let period = 2 * len;
    let m = i.rem_euclid(period);
    if m < len {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Generate a 1D Gaussian kernel.
fn gaussian_kernel(radius: usize, sigma: f32) -> Vec<f32> {
    let size = radius * 2 + 1;
    let mut kernel = Vec::with_capacity(size);

    let sigma_sq = sigma * sigma;
    let norm = 1.0 / (2.0 * std::f32::consts::PI * sigma_sq).sqrt();

    for i in 0..size {
        let x = i as f32 - radius as f32;
        kernel.push(norm * (-x * x / (2.0 * sigma_sq)).exp());
    }

    kernel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![1, 2, 3], vec![4, 5]];
        assert!(Tilemap::from_rows(&rows).is_none());

        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let map = Tilemap::from_rows(&rows).unwrap();
        assert_eq!(map.width, 3);
        assert_eq!(map.height, 2);
        assert_eq!(*map.get(0, 1), 4);
        assert_eq!(map.row(1), &[4, 5, 6]);
    }

    #[test]
    fn test_window_clips_at_corner() {
        let map = Tilemap::from_fn(5, 5, |x, y| x + y * 5);
        let corner: Vec<usize> = map.window(0, 0, 1).copied().collect();
        assert_eq!(corner, vec![0, 1, 5, 6]);

        let center: Vec<usize> = map.window(2, 2, 1).copied().collect();
        assert_eq!(center.len(), 9);
    }

    #[test]
    fn test_try_get_bounds() {
        let map = Tilemap::new_with(3, 2, 7u8);
        assert_eq!(map.try_get(-1, 0), None);
        assert_eq!(map.try_get(3, 0), None);
        assert_eq!(map.try_get(2, 1), Some(&7));
    }

    #[test]
    fn test_mirror_index() {
        assert_eq!(mirror_index(-1, 5), 0);
        assert_eq!(mirror_index(-2, 5), 1);
        assert_eq!(mirror_index(5, 5), 4);
        assert_eq!(mirror_index(6, 5), 3);
        assert_eq!(mirror_index(3, 1), 0);
    }

    #[test]
    fn test_gaussian_preserves_constant_field() {
        let map = Tilemap::new_with(6, 4, 0.6f32);
        let smoothed = map.gaussian_smooth(1.0);
        for (_, _, &v) in smoothed.iter() {
            assert!((v - 0.6).abs() < 1e-5);
        }
    }

    #[test]
    fn test_gaussian_spreads_spike() {
        let mut map = Tilemap::new_with(9, 9, 0.0f32);
        map.set(4, 4, 1.0);
        let smoothed = map.gaussian_smooth(1.0);

        let center = *smoothed.get(4, 4);
        assert!(center < 0.2 && center > 0.1);
        assert!(*smoothed.get(3, 4) < center);
        let total: f32 = smoothed.iter().map(|(_, _, v)| *v).sum();
        assert!((total - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_normalized_to_max() {
        let rows = vec![vec![0.2f32, 0.4], vec![0.1, 0.8]];
        let map = Tilemap::from_rows(&rows).unwrap().normalized_to_max();
        assert!((*map.get(1, 1) - 1.0).abs() < 1e-6);
        assert!((*map.get(0, 0) - 0.25).abs() < 1e-6);

        let zeros = Tilemap::new_with(2, 2, 0.0f32);
        assert_eq!(zeros.normalized_to_max(), zeros);
    }

    #[test]
    fn test_par_from_fn_matches_sequential() {
        let a = Tilemap::from_fn(7, 5, |x, y| x * 31 + y);
        let b = Tilemap::par_from_fn(7, 5, |x, y| x * 31 + y);
        assert_eq!(a, b);
    }
}
