use std::fmt;
use std::sync::Arc;

use crate::core::{HorizontalAxisPosition, VerticalAxisPosition};
use crate::error::{ChartError, ChartResult};

pub type LabelFormatterFn = Arc<dyn Fn(f64) -> String + Send + Sync + 'static>;

/// Turns axis values into label text.
#[derive(Clone, Default)]
pub struct LabelFormatter {
    custom: Option<LabelFormatterFn>,
}

impl LabelFormatter {
    #[must_use]
    pub fn custom(formatter: LabelFormatterFn) -> Self {
        Self {
            custom: Some(formatter),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        match &self.custom {
            Some(formatter) => formatter(value),
            None => format_decimal(value),
        }
    }
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFormatter")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Up to two decimals, trailing zeros trimmed.
fn format_decimal(value: f64) -> String {
    let text = format!("{value:.2}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// How wide a vertical axis is allowed to be.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisSizeConstraint {
    /// Fits the widest label, bounded by `[min_dp, max_dp]`.
    Auto { min_dp: f64, max_dp: f64 },
    Exact(f64),
    /// Fraction of the surface width, in `(0, 0.5]`.
    Fraction(f64),
    /// As wide as the given text.
    TextWidth(String),
}

impl Default for AxisSizeConstraint {
    fn default() -> Self {
        Self::Auto {
            min_dp: 0.0,
            max_dp: f64::MAX,
        }
    }
}

impl AxisSizeConstraint {
    pub fn auto(min_dp: f64, max_dp: f64) -> ChartResult<Self> {
        if !min_dp.is_finite() || min_dp < 0.0 || max_dp.is_nan() || max_dp < min_dp {
            return Err(ChartError::InvalidData(
                "auto axis size bounds must satisfy 0 <= min <= max".to_owned(),
            ));
        }
        Ok(Self::Auto { min_dp, max_dp })
    }

    pub fn exact(size_dp: f64) -> ChartResult<Self> {
        if !size_dp.is_finite() || size_dp < 0.0 {
            return Err(ChartError::InvalidData(
                "exact axis size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self::Exact(size_dp))
    }

    pub fn fraction(fraction: f64) -> ChartResult<Self> {
        if !(fraction > 0.0 && fraction <= 0.5) {
            return Err(ChartError::InvalidFraction {
                name: "axis size fraction",
                value: fraction,
            });
        }
        Ok(Self::Fraction(fraction))
    }

    pub(super) fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Auto { min_dp, max_dp } => Self::auto(*min_dp, *max_dp).map(|_| ()),
            Self::Exact(size_dp) => Self::exact(*size_dp).map(|_| ()),
            Self::Fraction(fraction) => Self::fraction(*fraction).map(|_| ()),
            Self::TextWidth(_) => Ok(()),
        }
    }
}

/// Shared label and tick styling of an axis, in density-independent units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLabelStyle {
    pub font_size_sp: f64,
    pub tick_length_dp: f64,
    pub label_padding_dp: f64,
}

impl Default for AxisLabelStyle {
    fn default() -> Self {
        Self {
            font_size_sp: 12.0,
            tick_length_dp: 4.0,
            label_padding_dp: 4.0,
        }
    }
}

impl AxisLabelStyle {
    fn validate(self) -> ChartResult<Self> {
        let values = [
            (self.font_size_sp, "font_size_sp"),
            (self.tick_length_dp, "tick_length_dp"),
            (self.label_padding_dp, "label_padding_dp"),
        ];
        for (value, name) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "axis {name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct VerticalAxisConfig {
    pub position: VerticalAxisPosition,
    pub label_count: usize,
    pub style: AxisLabelStyle,
    pub size_constraint: AxisSizeConstraint,
    pub formatter: LabelFormatter,
}

impl VerticalAxisConfig {
    #[must_use]
    pub fn new(position: VerticalAxisPosition) -> Self {
        Self {
            position,
            label_count: 5,
            style: AxisLabelStyle::default(),
            size_constraint: AxisSizeConstraint::default(),
            formatter: LabelFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_label_count(mut self, label_count: usize) -> Self {
        self.label_count = label_count;
        self
    }

    #[must_use]
    pub fn with_size_constraint(mut self, size_constraint: AxisSizeConstraint) -> Self {
        self.size_constraint = size_constraint;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisLabelStyle) -> Self {
        self.style = style;
        self
    }

    pub(super) fn validate(self) -> ChartResult<Self> {
        self.style.validate()?;
        self.size_constraint.validate()?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct HorizontalAxisConfig {
    pub position: HorizontalAxisPosition,
    /// Label every `label_spacing` x steps.
    pub label_spacing: usize,
    /// Reserves half of the first and last label widths as unscalable padding.
    pub add_extreme_labels_padding: bool,
    pub style: AxisLabelStyle,
    pub formatter: LabelFormatter,
}

impl HorizontalAxisConfig {
    #[must_use]
    pub fn new(position: HorizontalAxisPosition) -> Self {
        Self {
            position,
            label_spacing: 1,
            add_extreme_labels_padding: false,
            style: AxisLabelStyle::default(),
            formatter: LabelFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_label_spacing(mut self, label_spacing: usize) -> Self {
        self.label_spacing = label_spacing;
        self
    }

    #[must_use]
    pub fn with_extreme_labels_padding(mut self, enabled: bool) -> Self {
        self.add_extreme_labels_padding = enabled;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: LabelFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: AxisLabelStyle) -> Self {
        self.style = style;
        self
    }

    pub(super) fn validate(self) -> ChartResult<Self> {
        if self.label_spacing == 0 {
            return Err(ChartError::InvalidData(
                "horizontal axis label spacing must be >= 1".to_owned(),
            ));
        }
        self.style.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_formatter_trims_zeros() {
        let formatter = LabelFormatter::default();
        assert_eq!(formatter.format(4.0), "4");
        assert_eq!(formatter.format(2.5), "2.5");
        assert_eq!(formatter.format(-0.001), "0");
        assert_eq!(formatter.format(1234.567), "1234.57");
    }
}
