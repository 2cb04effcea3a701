//! Bar chart models and the slot that owns the active one.

use super::board::HealthStatus;

/// One bar: a label, a value and how to colour it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    /// Value as shown above the bar, e.g. "245ms" or "2.10 MB".
    pub text: String,
    pub tone: HealthStatus,
}

/// A complete bar chart ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartModel {
    pub title: String,
    /// Unit suffix for the value axis.
    pub unit: &'static str,
    pub bars: Vec<ChartBar>,
}

impl BarChartModel {
    pub fn new(title: impl Into<String>, unit: &'static str) -> Self {
        Self {
            title: title.into(),
            unit,
            bars: Vec::new(),
        }
    }

    pub fn push(&mut self, bar: ChartBar) {
        self.bars.push(bar);
    }

    /// Largest value, or zero for an empty chart.
    pub fn max_value(&self) -> f64 {
        self.bars.iter().map(|b| b.value).fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// Holds at most one active chart.
///
/// A new chart is only installed after the previous one has been released,
/// so reloads replace the chart instead of accumulating them.
#[derive(Debug, Default)]
pub struct ChartSlot {
    active: Option<BarChartModel>,
}

impl ChartSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Release the current chart (if any) and install `chart`.
    ///
    /// Returns true if a previous chart was released.
    pub fn replace(&mut self, chart: BarChartModel) -> bool {
        let released = self.release();
        self.active = Some(chart);
        released
    }

    /// Drop the active chart. Returns true if there was one.
    pub fn release(&mut self) -> bool {
        self.active.take().is_some()
    }

    pub fn active(&self) -> Option<&BarChartModel> {
        self.active.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(title: &str, values: &[f64]) -> BarChartModel {
        let mut chart = BarChartModel::new(title, "ms");
        for (i, v) in values.iter().enumerate() {
            chart.push(ChartBar {
                label: format!("bar{}", i),
                value: *v,
                text: format!("{}ms", v),
                tone: HealthStatus::Healthy,
            });
        }
        chart
    }

    #[test]
    fn test_replace_releases_previous_chart() {
        let mut slot = ChartSlot::new();
        assert!(slot.is_empty());

        assert!(!slot.replace(chart("first", &[1.0])));
        assert_eq!(slot.active().unwrap().title, "first");

        assert!(slot.replace(chart("second", &[2.0, 3.0])));
        let active = slot.active().unwrap();
        assert_eq!(active.title, "second");
        assert_eq!(active.bars.len(), 2);
    }

    #[test]
    fn test_release_empties_slot() {
        let mut slot = ChartSlot::new();
        slot.replace(chart("only", &[]));

        assert!(slot.release());
        assert!(slot.is_empty());
        assert!(!slot.release());
    }

    #[test]
    fn test_max_value() {
        assert_eq!(chart("c", &[120.0, 480.0, 30.0]).max_value(), 480.0);
        assert_eq!(chart("c", &[]).max_value(), 0.0);
    }
}
