//! Length units used by OOXML geometry.
//!
//! All geometry in a presentation package is expressed in English Metric
//! Units (EMU). Font sizes use hundredths of a point.

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMU per typographic point (1/72 inch).
pub const EMU_PER_POINT: i64 = 12_700;

/// Points per inch.
pub const POINTS_PER_INCH: i64 = 72;

/// Convert inches to EMU, truncating toward zero.
pub fn emu_from_inches(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64) as i64
}

/// Convert EMU to inches.
pub fn inches_from_emu(emu: i64) -> f64 {
    emu as f64 / EMU_PER_INCH as f64
}

/// Convert a font size in hundredths of a point to points.
pub fn points_from_centipoints(centipoints: u32) -> f64 {
    centipoints as f64 / 100.0
}

/// Convert a font size in points to hundredths of a point, truncating.
pub fn centipoints_from_points(points: f64) -> u32 {
    (points * 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_from_inches() {
        assert_eq!(emu_from_inches(1.0), 914_400);
        assert_eq!(emu_from_inches(0.1), 91_440);
        assert_eq!(emu_from_inches(36.0), 32_918_400);
        assert_eq!(emu_from_inches(48.0), 43_891_200);
    }

    #[test]
    fn test_emu_from_inches_truncates() {
        // 914400 * 0.0000017 = 1.55448
        assert_eq!(emu_from_inches(0.0000017), 1);
    }

    #[test]
    fn test_inches_round_trip() {
        assert_eq!(inches_from_emu(914_400), 1.0);
        assert_eq!(inches_from_emu(emu_from_inches(0.25)), 0.25);
        assert_eq!(inches_from_emu(emu_from_inches(36.0)), 36.0);
    }

    #[test]
    fn test_point_conversions() {
        assert_eq!(EMU_PER_POINT * POINTS_PER_INCH, EMU_PER_INCH);
        assert_eq!(points_from_centipoints(1200), 12.0);
        assert_eq!(centipoints_from_points(12.0), 1200);
        assert_eq!(centipoints_from_points(12.345), 1234);
    }
}
