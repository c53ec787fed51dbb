use cornerkit::convolve::{horizontal, vertical};
use cornerkit::{ImageView, ImageViewMut, Kernel1D, OwnedImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Clipped, renormalized convolution at one pixel, computed the slow way.
fn reference_at(
    samples: &dyn Fn(isize) -> Option<i64>,
    weights: &[i64],
) -> (i64, i64) {
    let radius = (weights.len() / 2) as isize;
    let mut total = 0i64;
    let mut weight = 0i64;
    for (k, &w) in weights.iter().enumerate() {
        if let Some(s) = samples(k as isize - radius) {
            total += s * w;
            weight += w;
        }
    }
    (total, weight)
}

fn is_border(pos: usize, len: usize, radius: usize) -> bool {
    pos < radius || pos >= len - radius
}

#[test]
fn constant_image_is_reproduced_for_every_pixel_type() {
    let mut rng = StdRng::seed_from_u64(11);
    for radius in 1..=4 {
        let width = 2 * radius + 1 + rng.random_range(0..6);
        let height = 2 * radius + 1 + rng.random_range(0..6);

        let weights_i: Vec<i32> = (0..2 * radius + 1).map(|_| rng.random_range(1..20)).collect();
        let kernel_i = Kernel1D::new(weights_i).unwrap();
        let weights_f: Vec<f32> = (0..2 * radius + 1).map(|_| rng.random_range(0.1..3.0)).collect();
        let kernel_f = Kernel1D::new(weights_f).unwrap();

        let input = OwnedImage::<u8>::filled(width, height, 173).unwrap();
        let mut output = OwnedImage::<u8>::new(width, height).unwrap();
        horizontal(&kernel_i, input.view(), &mut output.view_mut()).unwrap();
        vertical(&kernel_i, input.view(), &mut output.view_mut()).unwrap();

        let input16 = OwnedImage::<i16>::filled(width, height, -1234).unwrap();
        let mut output16 = OwnedImage::<i16>::new(width, height).unwrap();
        horizontal(&kernel_i, input16.view(), &mut output16.view_mut()).unwrap();
        vertical(&kernel_i, input16.view(), &mut output16.view_mut()).unwrap();

        let input32 = OwnedImage::<f32>::filled(width, height, 42.25).unwrap();
        let mut output32 = OwnedImage::<f32>::new(width, height).unwrap();
        horizontal(&kernel_f, input32.view(), &mut output32.view_mut()).unwrap();
        vertical(&kernel_f, input32.view(), &mut output32.view_mut()).unwrap();

        for y in 0..height {
            for x in 0..width {
                let border = is_border(x, width, radius) || is_border(y, height, radius);
                let (u, s, f) = (
                    output.view().at(x, y),
                    output16.view().at(x, y),
                    output32.view().at(x, y),
                );
                if border {
                    assert_eq!(u, 173, "u8 at ({x}, {y}), radius {radius}");
                    assert_eq!(s, -1234, "i16 at ({x}, {y}), radius {radius}");
                    assert!((f - 42.25).abs() < 1e-4, "f32 at ({x}, {y}): {f}");
                } else {
                    assert_eq!((u, s, f), (0, 0, 0.0), "interior touched at ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn horizontal_u8_matches_reference_on_random_data() {
    let mut rng = StdRng::seed_from_u64(3);
    let (width, height) = (13, 7);
    let data: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
    let input = OwnedImage::from_vec(data, width, height).unwrap();
    let kernel = Kernel1D::new(vec![1, 4, 6, 4, 1]).unwrap();
    let weights: Vec<i64> = kernel.weights().iter().map(|&w| i64::from(w)).collect();
    let mut output = OwnedImage::<u8>::new(width, height).unwrap();
    horizontal(&kernel, input.view(), &mut output.view_mut()).unwrap();

    let view = input.view();
    for y in 0..height {
        for x in (0..2).chain(width - 2..width) {
            let sample = |d: isize| {
                let sx = x as isize + d;
                (0..width as isize)
                    .contains(&sx)
                    .then(|| i64::from(view.at(sx as usize, y)))
            };
            let (total, weight) = reference_at(&sample, &weights);
            assert_eq!(output.view().at(x, y), (total / weight) as u8, "({x}, {y})");
        }
    }
}

#[test]
fn vertical_i16_matches_reference_on_random_data() {
    let mut rng = StdRng::seed_from_u64(5);
    let (width, height) = (6, 11);
    let data: Vec<i16> = (0..width * height).map(|_| rng.random_range(-3000..3000)).collect();
    let input = OwnedImage::from_vec(data, width, height).unwrap();
    let kernel = Kernel1D::new(vec![2, 3, 9, 3, 2, 1, 1]).unwrap();
    let weights: Vec<i64> = kernel.weights().iter().map(|&w| i64::from(w)).collect();
    let mut output = OwnedImage::<i16>::new(width, height).unwrap();
    vertical(&kernel, input.view(), &mut output.view_mut()).unwrap();

    let view = input.view();
    for y in (0..3).chain(height - 3..height) {
        for x in 0..width {
            let sample = |d: isize| {
                let sy = y as isize + d;
                (0..height as isize)
                    .contains(&sy)
                    .then(|| i64::from(view.at(x, sy as usize)))
            };
            let (total, weight) = reference_at(&sample, &weights);
            assert_eq!(output.view().at(x, y), (total / weight) as i16, "({x}, {y})");
        }
    }
}

#[test]
fn sub_region_views_stay_inside_their_window() {
    // A 5x5 view at (2, 1) of a 10x8 buffer; everything outside must stay untouched.
    let (buf_w, buf_h) = (10, 8);
    let src: Vec<f32> = (0..buf_w * buf_h).map(|i| (i % 7) as f32).collect();
    let mut dst = vec![-9.0f32; buf_w * buf_h];

    let input = ImageView::with_offset(&src, buf_w + 2, 5, 5, buf_w).unwrap();
    let mut output = ImageViewMut::with_offset(&mut dst, buf_w + 2, 5, 5, buf_w).unwrap();
    let kernel = Kernel1D::new(vec![1.0f32, 1.0, 1.0]).unwrap();
    horizontal(&kernel, input, &mut output).unwrap();
    vertical(&kernel, input, &mut output).unwrap();

    // Top-left corner of the view: the vertical pass wrote it last.
    let expected = (input.at(0, 0) + input.at(0, 1)) / 2.0;
    assert!((output.as_view().at(0, 0) - expected).abs() < 1e-6);

    for y in 0..buf_h {
        for x in 0..buf_w {
            let inside = (2..7).contains(&x) && (1..6).contains(&y);
            if !inside {
                assert_eq!(dst[y * buf_w + x], -9.0, "outside write at ({x}, {y})");
            }
        }
    }
    // View interior (3..6, 2..5 in buffer coordinates) is untouched too.
    for y in 2..5 {
        for x in 3..6 {
            assert_eq!(dst[y * buf_w + x], -9.0);
        }
    }
}
