/// Linearly re-map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Computes `(x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min`
/// with integer division truncating toward zero. The output range may be
/// inverted (`out_min > out_max`), which is how the Y axis is flipped on
/// screen.
///
/// No clamping is performed: `x` outside the input range yields a value
/// outside the output range. Callers pass `in_max != in_min`.
///
/// # Examples
///
/// ```
/// use joylite::control::map_value;
///
/// assert_eq!(map_value(0, 0, 4095, 3, 117), 3);
/// assert_eq!(map_value(4095, 0, 4095, 56, 3), 3);
/// ```
pub const fn map_value(x: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{ADC_MAX, ADC_MIN, PWM_WRAP};

    #[test]
    fn boundaries_map_to_output_bounds() {
        assert_eq!(map_value(ADC_MIN, ADC_MIN, ADC_MAX, 3, 117), 3);
        assert_eq!(map_value(ADC_MAX, ADC_MIN, ADC_MAX, 3, 117), 117);
        assert_eq!(map_value(ADC_MIN, ADC_MIN, ADC_MAX, 0, PWM_WRAP as i32), 0);
        assert_eq!(
            map_value(ADC_MAX, ADC_MIN, ADC_MAX, 0, PWM_WRAP as i32),
            PWM_WRAP as i32
        );
    }

    #[test]
    fn midpoint_truncates() {
        // 2048 * 114 / 4095 = 57.01…, truncated to 57.
        assert_eq!(map_value(2048, 0, 4095, 3, 117), 60);
        assert_eq!(map_value(2048, 0, 4095, 0, 20_000), 10_002);
    }

    #[test]
    fn inverted_range() {
        assert_eq!(map_value(0, 0, 4095, 56, 3), 56);
        assert_eq!(map_value(4095, 0, 4095, 56, 3), 3);
        // -53 * 2048 / 4095 = -26.5…, truncated toward zero to -26.
        assert_eq!(map_value(2048, 0, 4095, 56, 3), 30);
    }

    #[test]
    fn out_of_range_input_is_not_clamped() {
        assert_eq!(map_value(-10, 0, 10, 0, 100), -100);
        assert_eq!(map_value(20, 0, 10, 0, 100), 200);
    }

    #[test]
    fn output_stays_within_bounds_for_full_adc_range() {
        for x in ADC_MIN..=ADC_MAX {
            let v = map_value(x, ADC_MIN, ADC_MAX, 0, PWM_WRAP as i32);
            assert!((0..=PWM_WRAP as i32).contains(&v), "x={} -> {}", x, v);
        }
    }
}
