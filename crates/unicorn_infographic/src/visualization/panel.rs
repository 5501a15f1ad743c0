/// Rectangle of the figure a chart draws into (pixels)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Panel {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrinks the panel by the given margins
    pub fn inset(&self, left: f64, top: f64, right: f64, bottom: f64) -> Panel {
        Panel::new(
            self.x + left,
            self.y + top,
            self.width - left - right,
            self.height - top - bottom,
        )
    }

    /// Largest centered sub-panel with the given width/height ratio
    pub fn fit_aspect(&self, aspect: f64) -> Panel {
        if self.height <= 0.0 || aspect <= 0.0 {
            return *self;
        }
        let (w, h) = if self.width / self.height > aspect {
            (self.height * aspect, self.height)
        } else {
            (self.width, self.width / aspect)
        };
        Panel::new(
            self.x + (self.width - w) / 2.0,
            self.y + (self.height - h) / 2.0,
            w,
            h,
        )
    }
}

/// Linear map from data values to pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    d0: f64,
    d1: f64,
    r0: f64,
    r1: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, mut d1) = domain;
        if (d1 - d0).abs() < 1e-12 {
            d1 = d0 + 1.0;
        }
        Self {
            d0,
            d1,
            r0: range.0,
            r1: range.1,
        }
    }

    #[inline]
    pub fn map(&self, value: f64) -> f64 {
        self.r0 + (value - self.d0) / (self.d1 - self.d0) * (self.r1 - self.r0)
    }
}

/// Tick positions at a 1/2/5 x 10^n step covering [min, max]
pub fn nice_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max_ticks < 2 {
        return Vec::new();
    }
    if (max - min).abs() < 1e-12 {
        return vec![min];
    }

    let step = nice_step((max - min) / (max_ticks - 1) as f64);
    let start = (min / step).floor() * step;
    let end = (max / step).ceil() * step;

    let count = ((end - start) / step).round() as usize;
    (0..=count)
        .map(|i| start + i as f64 * step)
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect()
}

fn nice_step(rough: f64) -> f64 {
    let exponent = rough.log10().floor();
    let base = 10f64.powf(exponent);
    let fraction = rough / base;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick label with no more decimals than the step needs
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    };
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_and_center() {
        let panel = Panel::new(10.0, 20.0, 100.0, 50.0);
        let inner = panel.inset(5.0, 10.0, 15.0, 20.0);
        assert_eq!(inner, Panel::new(15.0, 30.0, 80.0, 20.0));
        assert_eq!(panel.center(), (60.0, 45.0));

        // margins larger than the panel collapse it instead of going negative
        let collapsed = panel.inset(80.0, 0.0, 80.0, 0.0);
        assert_eq!(collapsed.width, 0.0);
    }

    #[test]
    fn test_fit_aspect() {
        let panel = Panel::new(0.0, 0.0, 400.0, 100.0);
        let fitted = panel.fit_aspect(2.0);
        assert_eq!(fitted, Panel::new(100.0, 0.0, 200.0, 100.0));

        let tall = Panel::new(0.0, 0.0, 100.0, 400.0).fit_aspect(2.0);
        assert_eq!(tall, Panel::new(0.0, 175.0, 100.0, 50.0));
    }

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(scale.map(0.0), 100.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(5.0), 50.0);

        // zero-width domain does not divide by zero
        let flat = LinearScale::new((3.0, 3.0), (0.0, 10.0));
        assert!(flat.map(3.0).is_finite());
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 22.0, 6), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0]);
        let fractional = nice_ticks(0.0, 1.0, 6);
        assert_eq!(fractional.len(), 6);
        assert!((fractional[1] - 0.2).abs() < 1e-12);
        assert!((fractional[5] - 1.0).abs() < 1e-12);
        assert_eq!(nice_ticks(4.0, 4.0, 6), vec![4.0]);
        assert!(nice_ticks(f64::NAN, 1.0, 6).is_empty());
    }

    #[test]
    fn test_nice_ticks_cover_range() {
        let ticks = nice_ticks(3.7, 141.0, 8);
        assert!(ticks[0] <= 3.7);
        assert!(*ticks.last().unwrap() >= 141.0);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(20.0, 5.0), "20");
        assert_eq!(format_tick(0.4, 0.2), "0.4");
        assert_eq!(format_tick(0.05, 0.05), "0.05");
    }
}
