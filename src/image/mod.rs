//! Image views over shared row-major buffers.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer with an explicit origin
//! offset and stride. The stride counts elements between the starts of
//! consecutive rows, so a stride larger than the width represents padded rows
//! or a sub-region of a larger image. ROI slices are zero-copy views into the
//! same backing slice: they keep the stride and advance the offset.
//!
//! `ImageViewMut` is the writable counterpart used for convolution outputs.
//! Because it holds a unique borrow, an output view can never alias an input
//! view.

use crate::util::{CornerKitError, CornerKitResult};

/// Borrowed 2D image view with an origin offset and explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    offset: usize,
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width` and no offset.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> CornerKitResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride starting at element 0.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> CornerKitResult<Self> {
        Self::with_offset(data, 0, width, height, stride)
    }

    /// Creates a view whose pixel `(0, 0)` lives at `data[offset]`.
    pub fn with_offset(
        data: &'a [T],
        offset: usize,
        width: usize,
        height: usize,
        stride: usize,
    ) -> CornerKitResult<Self> {
        check_buffer(data.len(), offset, width, height, stride)?;
        Ok(Self {
            data,
            offset,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the index of pixel `(0, 0)` in the backing slice.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the whole backing slice, including data outside the view.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(self.offset + y * self.stride + x)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset + y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> CornerKitResult<ImageView<'a, T>> {
        let offset = roi_offset(self.offset, self.stride, self.width, self.height, x, y, width, height)?;
        ImageView::with_offset(self.data, offset, width, height, self.stride)
    }
}

impl<T: Copy> ImageView<'_, T> {
    /// Reads pixel `(x, y)` without an `Option` wrapper.
    ///
    /// # Panics
    /// Panics if `(x, y)` lies outside the view.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} view",
            self.width,
            self.height
        );
        self.data[self.offset + y * self.stride + x]
    }
}

/// Mutable 2D image view with an origin offset and explicit stride.
#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageViewMut<'a, T> {
    /// Creates a contiguous mutable view with `stride == width` and no offset.
    pub fn from_slice(data: &'a mut [T], width: usize, height: usize) -> CornerKitResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a mutable view with an explicit stride starting at element 0.
    pub fn new(
        data: &'a mut [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> CornerKitResult<Self> {
        Self::with_offset(data, 0, width, height, stride)
    }

    /// Creates a mutable view whose pixel `(0, 0)` lives at `data[offset]`.
    pub fn with_offset(
        data: &'a mut [T],
        offset: usize,
        width: usize,
        height: usize,
        stride: usize,
    ) -> CornerKitResult<Self> {
        check_buffer(data.len(), offset, width, height, stride)?;
        Ok(Self {
            data,
            offset,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the index of pixel `(0, 0)` in the backing slice.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &*self.data,
            offset: self.offset,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Returns a mutable slice for row `y` with length `width`.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let start = self.offset + y * self.stride;
        self.data.get_mut(start..start + self.width)
    }

    /// Writes `value` at `(x, y)`; returns `false` if the pixel is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: T) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match self.data.get_mut(self.offset + y * self.stride + x) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Returns a mutable zero-copy ROI view, consuming this view.
    pub fn into_roi(
        self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> CornerKitResult<ImageViewMut<'a, T>> {
        let offset = roi_offset(self.offset, self.stride, self.width, self.height, x, y, width, height)?;
        ImageViewMut::with_offset(self.data, offset, width, height, self.stride)
    }
}

/// Owned contiguous image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy + Default> OwnedImage<T> {
    /// Creates a zero-filled image.
    pub fn new(width: usize, height: usize) -> CornerKitResult<Self> {
        Self::filled(width, height, T::default())
    }
}

impl<T: Copy> OwnedImage<T> {
    /// Creates an image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> CornerKitResult<Self> {
        let len = required_len(0, width, height, width)?;
        Ok(Self {
            data: vec![value; len],
            width,
            height,
        })
    }
}

impl<T> OwnedImage<T> {
    /// Wraps a contiguous buffer of exactly `width * height` elements.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> CornerKitResult<Self> {
        let needed = required_len(0, width, height, width)?;
        if data.len() < needed {
            return Err(CornerKitError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(CornerKitError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw row-major pixel buffer.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            offset: 0,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns a mutable view of the image.
    pub fn view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            data: &mut self.data,
            offset: 0,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

fn check_buffer(
    len: usize,
    offset: usize,
    width: usize,
    height: usize,
    stride: usize,
) -> CornerKitResult<()> {
    let needed = required_len(offset, width, height, stride)?;
    if len < needed {
        return Err(CornerKitError::BufferTooSmall { needed, got: len });
    }
    Ok(())
}

fn required_len(offset: usize, width: usize, height: usize, stride: usize) -> CornerKitResult<usize> {
    if width == 0 || height == 0 {
        return Err(CornerKitError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(CornerKitError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .and_then(|v| v.checked_add(offset))
        .ok_or(CornerKitError::InvalidDimensions { width, height })
}

#[allow(clippy::too_many_arguments)]
fn roi_offset(
    offset: usize,
    stride: usize,
    img_width: usize,
    img_height: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> CornerKitResult<usize> {
    if width == 0 || height == 0 {
        return Err(CornerKitError::InvalidDimensions { width, height });
    }
    let out_of_bounds = CornerKitError::RoiOutOfBounds {
        x,
        y,
        width,
        height,
        img_width,
        img_height,
    };
    let end_x = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
    let end_y = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
    if end_x > img_width || end_y > img_height {
        return Err(out_of_bounds);
    }
    Ok(offset + y * stride + x)
}
