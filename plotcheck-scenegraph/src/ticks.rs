/// Generate approximately `count` evenly spaced, nicely rounded ticks within
/// `[start, stop]`
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return vec![];
    }

    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value = |i: f64| if inc < 0.0 { i / -inc } else { i * inc };
    let ticks = (0..n).map(|i| {
        if reverse {
            value(i2 - i as f64)
        } else {
            value(i1 + i as f64)
        }
    });

    // normalize negative zero so it formats as "0"
    ticks.map(|t| if t == 0.0 { 0.0 } else { t }).collect()
}

/// Returns `(i1, i2, inc)`: tick `k` is `k * inc`, or `k / -inc` when `inc`
/// is negative, for `k` in `i1..=i2`
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inverse = 10f64.powf(-power) / factor;
        i1 = (start * inverse).round();
        i2 = (stop * inverse).round();
        if i1 / inverse < start {
            i1 += 1.0;
        }
        if i2 / inverse > stop {
            i2 -= 1.0;
        }
        inc = -inverse;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Shortest decimal rendering of a tick value
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 1.0, 5.0, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0])]
    #[case(0.0, 10.0, 5.0, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0])]
    #[case(-0.45, 9.45, 5.0, vec![0.0, 2.0, 4.0, 6.0, 8.0])]
    #[case(1.0, 1.0, 5.0, vec![1.0])]
    #[case(0.0, 100.0, 4.0, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0])]
    fn test_ticks(
        #[case] start: f64,
        #[case] stop: f64,
        #[case] count: f64,
        #[case] expected: Vec<f64>,
    ) {
        assert_eq!(ticks(start, stop, count), expected);
    }

    #[test]
    fn test_reversed_ticks() {
        assert_eq!(ticks(1.0, 0.0, 5.0), vec![1.0, 0.8, 0.6, 0.4, 0.2, 0.0]);
    }

    #[test]
    fn test_invalid_count() {
        assert!(ticks(0.0, 1.0, 0.0).is_empty());
        assert!(ticks(0.0, f64::NAN, 5.0).is_empty());
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(0.2), "0.2");
        assert_eq!(format_tick(20.0), "20");
        assert_eq!(format_tick(-2.5), "-2.5");
    }
}
