use std::mem;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Vec4 { x, y, z, w }
    }
    #[inline(always)]
    pub fn as_array(&self) -> &[f32; 4] {
        let ary: &[f32; 4] = unsafe { mem::transmute(self) };
        ary
    }
}

/// Column-major 4x4 matrix, laid out the way `glUniformMatrix4fv` expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4x4 {
    pub c0: Vec4,
    pub c1: Vec4,
    pub c2: Vec4,
    pub c3: Vec4,
}

impl Mat4x4 {
    /// Orthographic projection of the rectangle starting at `pos` with size
    /// `size` onto NDC, with y pointing down (top-left origin).
    pub fn ortho_top_left(pos: [f32; 2], size: [f32; 2]) -> Self {
        let [l, t] = pos;
        let r = l + size[0];
        let b = t + size[1];
        Mat4x4 {
            c0: Vec4::new(2.0 / (r - l), 0.0, 0.0, 0.0),
            c1: Vec4::new(0.0, 2.0 / (t - b), 0.0, 0.0),
            c2: Vec4::new(0.0, 0.0, -1.0, 0.0),
            c3: Vec4::new((r + l) / (l - r), (t + b) / (b - t), 0.0, 1.0),
        }
    }

    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut arr = [0.0; 16];
        for (i, col) in [self.c0, self.c1, self.c2, self.c3].iter().enumerate() {
            arr[i * 4..i * 4 + 4].copy_from_slice(col.as_array());
        }
        arr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // column-major multiply of (x, y, 0, 1)
    fn project(m: &Mat4x4, x: f32, y: f32) -> (f32, f32) {
        let a = m.to_cols_array();
        let px = a[0] * x + a[4] * y + a[12];
        let py = a[1] * x + a[5] * y + a[13];
        // snap away float noise so corners compare exactly
        let snap = |v: f32| (v * 1e4).round() / 1e4;
        (snap(px), snap(py))
    }

    #[test]
    fn ortho_maps_display_corners_to_ndc() {
        let m = Mat4x4::ortho_top_left([0.0, 0.0], [1200.0, 800.0]);
        assert_eq!(project(&m, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(project(&m, 1200.0, 800.0), (1.0, -1.0));
        assert_eq!(project(&m, 600.0, 400.0), (0.0, 0.0));
    }

    #[test]
    fn ortho_honours_display_origin() {
        let m = Mat4x4::ortho_top_left([100.0, 50.0], [200.0, 100.0]);
        assert_eq!(project(&m, 100.0, 50.0), (-1.0, 1.0));
        assert_eq!(project(&m, 300.0, 150.0), (1.0, -1.0));
    }

    #[test]
    fn cols_array_is_column_major() {
        let m = Mat4x4::ortho_top_left([0.0, 0.0], [2.0, 2.0]);
        let arr = m.to_cols_array();
        assert_eq!(arr[0], 1.0);
        assert_eq!(arr[5], -1.0);
        assert_eq!(arr[10], -1.0);
        assert_eq!(&arr[12..16], &[-1.0, 1.0, 0.0, 1.0]);
    }
}
