//! CSS Color Module Level 4 — §18 Sample code for color conversions.
//! Spec: <https://www.w3.org/TR/css-color-4/#color-conversion-code>
//!
//! Only the conversions needed to place a canonical color in sRGB are here.
//! Missing (`none`) channels count as zero, and results are clipped to the
//! sRGB gamut.

use crate::resolve::{Channel, Color};

type Vector = [f64; 3];
type Matrix = [Vector; 3];

/// Bradford chromatic adaptation from D50 to D65.
const D50_TO_D65: Matrix = [
    [0.955_473_452_7, -0.023_098_536_9, 0.063_259_308_7],
    [-0.028_369_707_0, 1.009_995_458_0, 0.021_041_399_0],
    [0.012_314_001_7, -0.020_507_696_4, 1.330_365_936_6],
];

const XYZ_D65_TO_LINEAR_SRGB: Matrix = [
    [3.240_969_941_9, -1.537_383_177_6, -0.498_610_760_3],
    [-0.969_243_636_3, 1.875_967_501_5, 0.041_555_057_4],
    [0.055_630_079_7, -0.203_976_958_9, 1.056_971_514_2],
];

const LINEAR_P3_TO_XYZ_D65: Matrix = [
    [0.486_570_948_6, 0.265_667_693_2, 0.198_217_285_2],
    [0.228_974_564_1, 0.691_738_521_8, 0.079_286_914_1],
    [0.0, 0.045_113_381_9, 1.043_944_368_9],
];

const OKLAB_TO_LMS: Matrix = [
    [1.0, 0.396_337_777_4, 0.215_803_757_3],
    [1.0, -0.105_561_345_8, -0.063_854_172_8],
    [1.0, -0.089_484_177_5, -1.291_485_548],
];

const LMS_TO_LINEAR_SRGB: Matrix = [
    [4.076_741_662_1, -3.307_711_591_3, 0.230_969_929_2],
    [-1.268_438_004_6, 2.609_757_401_1, -0.341_319_396_5],
    [-0.004_196_086_3, -0.703_418_614_7, 1.707_614_701],
];

/// D50 reference white.
const D50_WHITE: Vector = [0.964_22, 1.0, 0.825_21];

const LAB_KAPPA: f64 = 24389.0 / 27.0;
const LAB_EPSILON: f64 = 216.0 / 24389.0;

fn multiply(matrix: &Matrix, vector: Vector) -> Vector {
    matrix.map(|row| {
        row[0].mul_add(vector[0], row[1].mul_add(vector[1], row[2] * vector[2]))
    })
}

fn gamma_encode(linear: f64) -> f64 {
    let magnitude = linear.abs();
    if magnitude <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055_f64
            .mul_add(magnitude.powf(1.0 / 2.4), -0.055)
            .copysign(linear)
    }
}

fn gamma_decode(encoded: f64) -> f64 {
    let magnitude = encoded.abs();
    if magnitude <= 0.040_45 {
        encoded / 12.92
    } else {
        ((magnitude + 0.055) / 1.055).powf(2.4).copysign(encoded)
    }
}

fn hsl_to_srgb(hue: f64, saturation: f64, lightness: f64) -> Vector {
    let chroma = saturation * lightness.min(1.0 - lightness);
    let channel = |offset: f64| {
        let sector = (offset + hue / 30.0).rem_euclid(12.0);
        (-chroma).mul_add((sector - 3.0).min(9.0 - sector).clamp(-1.0, 1.0), lightness)
    };
    [channel(0.0), channel(8.0), channel(4.0)]
}

fn hwb_to_srgb(hue: f64, whiteness: f64, blackness: f64) -> Vector {
    if whiteness + blackness >= 1.0 {
        let grey = whiteness / (whiteness + blackness);
        return [grey; 3];
    }
    hsl_to_srgb(hue, 1.0, 0.5)
        .map(|channel| channel.mul_add(1.0 - whiteness - blackness, whiteness))
}

fn polar_to_rectangular(chroma: f64, hue: f64) -> (f64, f64) {
    let radians = hue.to_radians();
    (chroma * radians.cos(), chroma * radians.sin())
}

fn lab_to_xyz_d50(lightness: f64, green_red: f64, blue_yellow: f64) -> Vector {
    let luma_axis = (lightness + 16.0) / 116.0;
    let red_axis = green_red / 500.0 + luma_axis;
    let blue_axis = luma_axis - blue_yellow / 200.0;
    let axis = |component: f64| {
        let cubed = component.powi(3);
        if cubed > LAB_EPSILON {
            cubed
        } else {
            116.0_f64.mul_add(component, -16.0) / LAB_KAPPA
        }
    };
    let luminance = if lightness > LAB_KAPPA * LAB_EPSILON {
        luma_axis.powi(3)
    } else {
        lightness / LAB_KAPPA
    };
    [
        axis(red_axis) * D50_WHITE[0],
        luminance * D50_WHITE[1],
        axis(blue_axis) * D50_WHITE[2],
    ]
}

fn xyz_d50_to_linear_srgb(xyz: Vector) -> Vector {
    multiply(&XYZ_D65_TO_LINEAR_SRGB, multiply(&D50_TO_D65, xyz))
}

fn oklab_to_linear_srgb(lightness: f64, green_red: f64, blue_yellow: f64) -> Vector {
    let lms = multiply(&OKLAB_TO_LMS, [lightness, green_red, blue_yellow]).map(|cone| cone.powi(3));
    multiply(&LMS_TO_LINEAR_SRGB, lms)
}

/// Gamma-encoded sRGB channels in `[0, 1]`, or `None` for spaces without a
/// conversion here (`a98rgb`, `prophoto`, `rec2020`).
pub fn to_srgb(color: &Color) -> Option<Vector> {
    let [first, second, third] = color.components.map(|channel| match channel {
        Channel::Value(value) => value,
        Channel::None => 0.0,
    });
    let encoded = match color.color_space {
        "srgb" => [first, second, third],
        "srgb-linear" => [first, second, third].map(gamma_encode),
        "hsl" => hsl_to_srgb(first, second / 100.0, third / 100.0),
        "hwb" => hwb_to_srgb(first, second / 100.0, third / 100.0),
        "lab" => xyz_d50_to_linear_srgb(lab_to_xyz_d50(first, second, third)).map(gamma_encode),
        "lch" => {
            let (green_red, blue_yellow) = polar_to_rectangular(second, third);
            xyz_d50_to_linear_srgb(lab_to_xyz_d50(first, green_red, blue_yellow)).map(gamma_encode)
        }
        "oklab" => oklab_to_linear_srgb(first, second, third).map(gamma_encode),
        "oklch" => {
            let (green_red, blue_yellow) = polar_to_rectangular(second, third);
            oklab_to_linear_srgb(first, green_red, blue_yellow).map(gamma_encode)
        }
        "p3" => {
            let linear = [first, second, third].map(gamma_decode);
            multiply(&XYZ_D65_TO_LINEAR_SRGB, multiply(&LINEAR_P3_TO_XYZ_D65, linear))
                .map(gamma_encode)
        }
        "xyz-d65" => multiply(&XYZ_D65_TO_LINEAR_SRGB, [first, second, third]).map(gamma_encode),
        "xyz-d50" => xyz_d50_to_linear_srgb([first, second, third]).map(gamma_encode),
        _ => return None,
    };
    Some(encoded.map(|channel| channel.clamp(0.0, 1.0)))
}

/// [`to_srgb`] quantized to 8-bit channels.
pub fn to_rgb8(color: &Color) -> Option<[u8; 3]> {
    to_srgb(color).map(|channels| channels.map(|channel| (channel * 255.0).round() as u8))
}
