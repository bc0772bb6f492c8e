//! 4x4 Matrix utilities for placing colliders and building the camera
//!
//! Matrices are column-major: `m[col][row]`. Translation lives in column 3.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Translation matrix
pub fn translation(offset: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = offset.x;
    m[3][1] = offset.y;
    m[3][2] = offset.z;
    m
}

/// Non-uniform scale matrix
pub fn scale(factors: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = factors.x;
    m[1][1] = factors.y;
    m[2][2] = factors.z;
    m
}

/// Rotation of `angle` radians around an arbitrary axis (right-handed)
///
/// The axis does not need to be normalized. A zero axis yields the identity.
pub fn rotation(angle: f32, axis: Vec3) -> Mat4 {
    let u = axis.normalized();
    if u == Vec3::ZERO {
        return IDENTITY;
    }

    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;
    let (x, y, z) = (u.x, u.y, u.z);

    let mut m = IDENTITY;

    m[0][0] = t * x * x + c;
    m[0][1] = t * x * y + s * z;
    m[0][2] = t * x * z - s * y;

    m[1][0] = t * x * y - s * z;
    m[1][1] = t * y * y + c;
    m[1][2] = t * y * z + s * x;

    m[2][0] = t * x * z + s * y;
    m[2][1] = t * y * z - s * x;
    m[2][2] = t * z * z + c;

    m
}

/// Camera orientation from a yaw (around world Y) and a pitch
///
/// Pitch rotates around the horizontal axis perpendicular to the yaw heading,
/// so looking up and down never rolls the camera.
pub fn yaw_pitch(yaw: f32, pitch: f32) -> Mat4 {
    let pitch_axis = Vec3::new(yaw.cos(), 0.0, yaw.sin());
    mul(rotation(yaw, Vec3::Y), rotation(-pitch, pitch_axis))
}

/// Perspective projection from an explicit view frustum
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    let dx = right - left;
    let dy = top - bottom;
    let dz = far - near;

    let mut m = IDENTITY;

    m[0][0] = 2.0 * near / dx;
    m[1][1] = 2.0 * near / dy;

    m[2][0] = (right + left) / dx;
    m[2][1] = (top + bottom) / dy;
    m[2][2] = -(near + far) / dz;
    m[2][3] = -1.0;

    m[3][2] = -2.0 * near * far / dz;
    m[3][3] = 0.0;

    m
}

/// Symmetric perspective projection
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width / height
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let fy = (fov_y / 2.0).tan();
    let fx = fy * aspect;
    frustum(-fx * near, fx * near, -fy * near, fy * near, near, far)
}

/// View matrix for a camera at `eye` with the given yaw and pitch
pub fn view(eye: Vec3, yaw: f32, pitch: f32) -> Mat4 {
    mul(yaw_pitch(yaw, pitch), translation(-eye))
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a point (w = 1) by a 4x4 matrix, without perspective divide
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
        m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
        m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
    )
}

/// Transform a direction (w = 0) by a 4x4 matrix
pub fn transform_vector(m: Mat4, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform_point(IDENTITY, p), p);
    }

    #[test]
    fn test_translation_moves_points_not_vectors() {
        let m = translation(Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(transform_point(m, Vec3::ZERO), Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(transform_vector(m, Vec3::X), Vec3::X);
    }

    #[test]
    fn test_scale() {
        let m = scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(transform_point(m, Vec3::splat(1.0)), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_rotation_about_z() {
        let m = rotation(FRAC_PI_2, Vec3::Z);
        let result = transform_vector(m, Vec3::X);
        assert!(vec_approx_eq(result, Vec3::Y), "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_axis_is_normalized() {
        let a = rotation(0.7, Vec3::new(0.0, 5.0, 0.0));
        let b = rotation(0.7, Vec3::Y);
        assert!(mat_approx_eq(a, b));
    }

    #[test]
    fn test_rotation_zero_axis_is_identity() {
        assert_eq!(rotation(1.0, Vec3::ZERO), IDENTITY);
    }

    #[test]
    fn test_mul_applies_right_first() {
        // scale then translate
        let m = mul(translation(Vec3::new(1.0, 0.0, 0.0)), scale(Vec3::splat(2.0)));
        let p = transform_point(m, Vec3::new(1.0, 1.0, 1.0));
        assert!(vec_approx_eq(p, Vec3::new(3.0, 2.0, 2.0)));
    }

    #[test]
    fn test_mul_identity() {
        let m = rotation(0.3, Vec3::new(1.0, 1.0, 0.0));
        assert!(mat_approx_eq(mul(IDENTITY, m), m));
        assert!(mat_approx_eq(mul(m, IDENTITY), m));
    }

    #[test]
    fn test_rotation_inverse_is_transpose() {
        let m = rotation(1.1, Vec3::new(0.3, -0.4, 0.8));
        assert!(mat_approx_eq(mul(m, transpose(m)), IDENTITY));
    }

    #[test]
    fn test_yaw_pitch_zero_is_identity() {
        assert!(mat_approx_eq(yaw_pitch(0.0, 0.0), IDENTITY));
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let m = perspective(FRAC_PI_2, 1.0, 0.1, 100.0);

        // clip-space z/w for a point on the near plane is -1, far plane is +1
        for (depth, expected) in [(0.1f32, -1.0f32), (100.0, 1.0)] {
            let p = Vec3::new(0.0, 0.0, -depth);
            let z = m[2][2] * p.z + m[3][2];
            let w = m[2][3] * p.z + m[3][3];
            assert!((z / w - expected).abs() < 0.001, "depth {} mapped to {}", depth, z / w);
        }
    }

    #[test]
    fn test_frustum_symmetric_has_no_skew() {
        let m = frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 10.0);
        assert_eq!(m[2][0], 0.0);
        assert_eq!(m[2][1], 0.0);
        assert_eq!(m[0][0], 1.0);
        assert_eq!(m[1][1], 1.0);
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, 1.5, -2.0);
        let m = view(eye, 0.4, 0.2);
        assert!(vec_approx_eq(transform_point(m, eye), Vec3::ZERO));
    }
}
