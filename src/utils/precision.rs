pub trait Precision {
    fn max_precision(self, max_precision: u32) -> Self;

    /// Render with exactly `decimals` fractional digits, rounding half away from zero.
    fn to_fixed(self, decimals: u32) -> String;
}

impl Precision for f64 {
    fn max_precision(self, max_precision: u32) -> Self {
        let p = f64::from(10i32.pow(max_precision));
        (self * p).round() / p
    }

    fn to_fixed(self, decimals: u32) -> String {
        let rounded = self.max_precision(decimals);
        // avoid rendering `-0` for values that round to zero
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{:.*}", decimals as usize, rounded)
    }
}
