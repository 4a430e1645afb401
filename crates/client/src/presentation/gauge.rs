use rust_decimal::{Decimal, RoundingStrategy};

/// Colors of the circular progress gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugePalette {
    pub path: &'static str,
    pub text: &'static str,
    pub trail: &'static str,
    pub background: &'static str,
}

pub const DEFAULT_PALETTE: GaugePalette = GaugePalette {
    path: "#3FE8BD",
    text: "#8D98AF",
    trail: "#3D3E52",
    background: "#3D3E52",
};

/// View model of a circular progress gauge for a fraction in [0, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressGauge {
    fraction: Decimal,
}

impl ProgressGauge {
    pub const MAX_VALUE: Decimal = Decimal::ONE;
    pub const STROKE_WIDTH: u32 = 8;
    pub const TEXT_SIZE: u32 = 26;

    pub fn new(fraction: Decimal) -> Self {
        Self { fraction }
    }

    pub fn fraction(&self) -> Decimal {
        self.fraction
    }

    /// Portion of the ring to fill, clamped to [0, MAX_VALUE]
    pub fn fill(&self) -> Decimal {
        self.fraction.clamp(Decimal::ZERO, Self::MAX_VALUE)
    }

    /// Percentage with at most one decimal place, e.g. `12.3%` or `50%`
    ///
    /// Not clamped: a position at 120% utilisation reads `120%`. Fractions
    /// too large to scale fall back to the clamped fill.
    pub fn label(&self) -> String {
        let percent = self
            .fraction
            .checked_mul(Decimal::ONE_HUNDRED)
            .unwrap_or_else(|| self.fill() * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        format!("{}%", percent)
    }

    pub fn palette(&self) -> GaugePalette {
        DEFAULT_PALETTE
    }
}
