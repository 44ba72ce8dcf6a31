/// Read-only row access over a row-major raster.
pub trait RasterView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { raster: self, y: 0 }
    }

    /// True when `other` covers the same pixel grid.
    fn same_shape<O: RasterView>(&self, other: &O) -> bool
    where
        Self: Sized,
    {
        self.width() == other.width() && self.height() == other.height()
    }
}

pub struct Rows<'a, R: ?Sized + RasterView> {
    raster: &'a R,
    y: usize,
}

impl<'a, R: RasterView> Iterator for Rows<'a, R> {
    type Item = &'a [R::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.raster.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.raster.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.raster.height().saturating_sub(self.y);
        (left, Some(left))
    }
}

impl<'a, R: RasterView> ExactSizeIterator for Rows<'a, R> {}
