use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Source indices and 8.8 fixed-point weight for each destination index
/// along one axis.
#[derive(Debug, Default, Clone, PartialEq)]
struct Taps {
    near: Vec<usize>,
    far: Vec<usize>,
    weight: Vec<u32>, // 0..=256, share of `far`
}

impl Taps {
    fn build(dst_len: usize, src_len: usize) -> Self {
        let mut taps = Taps {
            near: Vec::with_capacity(dst_len),
            far: Vec::with_capacity(dst_len),
            weight: Vec::with_capacity(dst_len),
        };
        if src_len == 0 {
            return taps;
        }

        let ratio = src_len as f32 / dst_len as f32;
        let last = src_len - 1;
        for i in 0..dst_len {
            let f = i as f32 * ratio;
            let near = (f.floor() as usize).min(last);
            taps.near.push(near);
            taps.far.push((near + 1).min(last));
            taps.weight.push(((f - near as f32) * 256.0).round().clamp(0.0, 256.0) as u32);
        }
        taps
    }
}

/// Precomputed mapping from window pixels to internal framebuffer pixels.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StretchTable {
    src_w: usize,
    dst_w: usize,
    cols: Taps,
    rows: Taps,
}

impl StretchTable {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            src_w,
            dst_w,
            cols: Taps::build(dst_w, src_w),
            rows: Taps::build(dst_h, src_h),
        }
    }

    pub fn matches(&self, dst_w: usize, dst_h: usize) -> bool {
        self.dst_w == dst_w && self.rows.near.len() == dst_h
    }

    /// Bilinear stretch of `src` into `dst`, rows in parallel.
    pub fn blit(&self, dst: &mut [u32], src: &[u32]) {
        if self.dst_w == 0 || self.src_w == 0 {
            return;
        }
        let (sw, cols, rows) = (self.src_w, &self.cols, &self.rows);

        dst.par_chunks_mut(self.dst_w)
            .enumerate()
            .take(rows.near.len())
            .for_each(|(y, dst_row)| {
                let top = &src[rows.near[y] * sw..][..sw];
                let bottom = &src[rows.far[y] * sw..][..sw];
                let wy = rows.weight[y];

                for (x, out) in dst_row.iter_mut().enumerate() {
                    let (x0, x1, wx) = (cols.near[x], cols.far[x], cols.weight[x]);
                    let upper = lerp_color(top[x0], top[x1], wx);
                    let lower = lerp_color(bottom[x0], bottom[x1], wx);
                    *out = lerp_color(upper, lower, wy);
                }
            });
    }
}

#[inline]
fn lerp_color(a: u32, b: u32, w256: u32) -> u32 {
    let inv = 256 - w256;
    // R and B share one multiply (00RR00BB), G gets its own
    let rb = (((a & 0x00FF_00FF) * inv + (b & 0x00FF_00FF) * w256) >> 8) & 0x00FF_00FF;
    let g = (((a & 0x0000_FF00) * inv + (b & 0x0000_FF00) * w256) >> 8) & 0x0000_FF00;
    rb | g
}
