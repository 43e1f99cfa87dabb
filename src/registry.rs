//! Name-based indicator factory.
//!
//! Callers that know the indicator only at runtime build a [`Params`]
//! bag and ask [`build_indicator`] for a boxed [`Indicator`]. The set of
//! names is closed; every entry maps to one catalog module.

use std::collections::BTreeMap;

use crate::error::TtiError;
use crate::frame::Frame;
use crate::indicator::Indicator;
use crate::indicators::*;

/// A runtime parameter value. The closed set of kinds mirrors what the
/// catalog constructors accept.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    MaMode(MaMode),
    PerformanceMode(PerformanceMode),
}

impl ParamValue {
    fn kind(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "integer",
            ParamValue::Float(_) => "float",
            ParamValue::MaMode(_) => "moving average mode",
            ParamValue::PerformanceMode(_) => "performance mode",
        }
    }
}

/// Named parameter bag. Missing entries fall back to the catalog
/// defaults; present entries must carry the right kind.
#[derive(Debug, Clone, Default)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    pub fn with(mut self, name: &str, value: ParamValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn set(&mut self, name: &str, value: ParamValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    fn period(&self, name: &str, default: usize) -> Result<usize, TtiError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::Int(v)) if *v >= 0 => Ok(*v as usize),
            Some(ParamValue::Int(v)) => Err(TtiError::WrongValueForInputParameter {
                parameter: name.to_string(),
                constraint: ">= 0".to_string(),
                actual: v.to_string(),
            }),
            Some(other) => Err(TtiError::WrongTypeForInputParameter {
                parameter: name.to_string(),
                expected: "integer".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }

    fn float(&self, name: &str, default: f64) -> Result<f64, TtiError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::Float(v)) => Ok(*v),
            Some(ParamValue::Int(v)) => Ok(*v as f64),
            Some(other) => Err(TtiError::WrongTypeForInputParameter {
                parameter: name.to_string(),
                expected: "float".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }

    fn ma_mode(&self, name: &str, default: MaMode) -> Result<MaMode, TtiError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::MaMode(mode)) => Ok(*mode),
            Some(other) => Err(TtiError::WrongTypeForInputParameter {
                parameter: name.to_string(),
                expected: "moving average mode".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }

    fn performance_mode(
        &self,
        name: &str,
        default: PerformanceMode,
    ) -> Result<PerformanceMode, TtiError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(ParamValue::PerformanceMode(mode)) => Ok(*mode),
            Some(other) => Err(TtiError::WrongTypeForInputParameter {
                parameter: name.to_string(),
                expected: "performance mode".to_string(),
                actual: other.kind().to_string(),
            }),
        }
    }
}

/// Every buildable indicator name, in catalog order.
pub const INDICATOR_NAMES: &[&str] = &[
    "accumulation_distribution_line",
    "average_true_range",
    "bollinger_bands",
    "chaikin_money_flow",
    "chaikin_oscillator",
    "chande_momentum_oscillator",
    "commodity_channel_index",
    "detrended_price_oscillator",
    "directional_movement_index",
    "double_exponential_moving_average",
    "ease_of_movement",
    "envelopes",
    "fibonacci_retracement",
    "forecast_oscillator",
    "ichimoku_cloud",
    "intraday_movement_index",
    "klinger_oscillator",
    "linear_regression_indicator",
    "linear_regression_slope",
    "mass_index",
    "median_price",
    "momentum",
    "moving_average",
    "moving_average_convergence_divergence",
    "negative_volume_index",
    "on_balance_volume",
    "parabolic_sar",
    "performance",
    "positive_volume_index",
    "price_and_volume_trend",
    "price_channel",
    "price_oscillator",
    "price_rate_of_change",
    "projection_bands",
    "projection_oscillator",
    "qstick",
    "range_indicator",
    "relative_momentum_index",
    "relative_strength_index",
    "relative_volatility_index",
    "standard_deviation",
    "stochastic_momentum_index",
    "stochastic_oscillator",
    "swing_index",
    "time_series_forecast",
    "triple_exponential_moving_average",
    "typical_price",
    "ultimate_oscillator",
    "vertical_horizontal_filter",
    "volatility_chaikins",
    "volume_oscillator",
    "volume_rate_of_change",
    "weighted_close",
    "wilders_smoothing",
    "williams_accumulation_distribution",
    "williams_r",
];

// legacy shorthands kept only to refuse them with a pointer forward
const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("adl", "accumulation_distribution_line"),
    ("atr", "average_true_range"),
    ("bb", "bollinger_bands"),
    ("cmf", "chaikin_money_flow"),
    ("macd", "moving_average_convergence_divergence"),
    ("obv", "on_balance_volume"),
    ("rsi", "relative_strength_index"),
    ("sar", "parabolic_sar"),
    ("wr", "williams_r"),
];

pub fn indicator_names() -> &'static [&'static str] {
    INDICATOR_NAMES
}

/// Builds the named indicator over `input_data`, taking any missing
/// parameter from the catalog defaults.
pub fn build_indicator(
    name: &str,
    input_data: &Frame,
    params: &Params,
    fill_missing_values: bool,
) -> Result<Box<dyn Indicator>, TtiError> {
    let fill = fill_missing_values;
    let indicator: Box<dyn Indicator> = match name {
        "accumulation_distribution_line" => {
            Box::new(AccumulationDistributionLine::new(input_data, fill)?)
        }
        "average_true_range" => Box::new(AverageTrueRange::new(input_data, fill)?),
        "bollinger_bands" => Box::new(BollingerBands::new(
            input_data,
            params.period("period", 20)?,
            params.float("std_number", 2.0)?,
            fill,
        )?),
        "chaikin_money_flow" => Box::new(ChaikinMoneyFlow::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "chaikin_oscillator" => Box::new(ChaikinOscillator::new(input_data, fill)?),
        "chande_momentum_oscillator" => Box::new(ChandeMomentumOscillator::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "commodity_channel_index" => Box::new(CommodityChannelIndex::new(
            input_data,
            params.period("period", 20)?,
            fill,
        )?),
        "detrended_price_oscillator" => Box::new(DetrendedPriceOscillator::new(
            input_data,
            params.period("period", 6)?,
            fill,
        )?),
        "directional_movement_index" => {
            Box::new(DirectionalMovementIndex::new(input_data, fill)?)
        }
        "double_exponential_moving_average" => Box::new(DoubleExponentialMovingAverage::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "ease_of_movement" => Box::new(EaseOfMovement::new(
            input_data,
            params.period("period", 40)?,
            fill,
        )?),
        "envelopes" => Box::new(Envelopes::new(
            input_data,
            params.period("period", 20)?,
            params.float("shift", 0.1)?,
            fill,
        )?),
        "fibonacci_retracement" => Box::new(FibonacciRetracement::new(input_data, fill)?),
        "forecast_oscillator" => Box::new(ForecastOscillator::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "ichimoku_cloud" => Box::new(IchimokuCloud::new(input_data, fill)?),
        "intraday_movement_index" => Box::new(IntradayMovementIndex::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "klinger_oscillator" => Box::new(KlingerOscillator::new(input_data, fill)?),
        "linear_regression_indicator" => Box::new(LinearRegressionIndicator::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "linear_regression_slope" => Box::new(LinearRegressionSlope::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "mass_index" => Box::new(MassIndex::new(input_data, fill)?),
        "median_price" => Box::new(MedianPrice::new(input_data, fill)?),
        "momentum" => Box::new(Momentum::new(
            input_data,
            params.period("period", 12)?,
            fill,
        )?),
        "moving_average" => Box::new(MovingAverage::new(
            input_data,
            params.period("period", 20)?,
            params.ma_mode("ma_type", MaMode::Simple)?,
            fill,
        )?),
        "moving_average_convergence_divergence" => {
            Box::new(MovingAverageConvergenceDivergence::new(input_data, fill)?)
        }
        "negative_volume_index" => Box::new(NegativeVolumeIndex::new(input_data, fill)?),
        "on_balance_volume" => Box::new(OnBalanceVolume::new(input_data, fill)?),
        "parabolic_sar" => Box::new(ParabolicSar::new(input_data, fill)?),
        "performance" => Box::new(Performance::new(
            input_data,
            params.performance_mode("mode", PerformanceMode::LongTarget)?,
            params.float("target", 0.05)?,
            fill,
        )?),
        "positive_volume_index" => Box::new(PositiveVolumeIndex::new(input_data, fill)?),
        "price_and_volume_trend" => Box::new(PriceAndVolumeTrend::new(input_data, fill)?),
        "price_channel" => Box::new(PriceChannel::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "price_oscillator" => Box::new(PriceOscillator::new(
            input_data,
            params.period("short_period", 7)?,
            params.period("long_period", 14)?,
            fill,
        )?),
        "price_rate_of_change" => Box::new(PriceRateOfChange::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "projection_bands" => Box::new(ProjectionBands::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "projection_oscillator" => Box::new(ProjectionOscillator::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "qstick" => Box::new(Qstick::new(input_data, params.period("period", 8)?, fill)?),
        "range_indicator" => Box::new(RangeIndicator::new(
            input_data,
            params.period("range_period", 5)?,
            params.period("smoothing_period", 3)?,
            fill,
        )?),
        "relative_momentum_index" => Box::new(RelativeMomentumIndex::new(
            input_data,
            params.period("period", 8)?,
            params.period("momentum_period", 4)?,
            fill,
        )?),
        "relative_strength_index" => Box::new(RelativeStrengthIndex::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "relative_volatility_index" => Box::new(RelativeVolatilityIndex::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "standard_deviation" => Box::new(StandardDeviation::new(
            input_data,
            params.period("period", 20)?,
            fill,
        )?),
        "stochastic_momentum_index" => Box::new(StochasticMomentumIndex::new(
            input_data,
            params.period("period", 5)?,
            params.period("smoothing_period", 3)?,
            fill,
        )?),
        "stochastic_oscillator" => Box::new(StochasticOscillator::new(
            input_data,
            params.period("k_periods", 14)?,
            params.period("k_slowing_periods", 1)?,
            params.period("d_periods", 3)?,
            params.ma_mode("d_method", MaMode::Simple)?,
            fill,
        )?),
        "swing_index" => Box::new(SwingIndex::new(
            input_data,
            params.float("limit_move", 10.0)?,
            fill,
        )?),
        "time_series_forecast" => Box::new(TimeSeriesForecast::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        "triple_exponential_moving_average" => Box::new(TripleExponentialMovingAverage::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "typical_price" => Box::new(TypicalPrice::new(input_data, fill)?),
        "ultimate_oscillator" => Box::new(UltimateOscillator::new(input_data, fill)?),
        "vertical_horizontal_filter" => Box::new(VerticalHorizontalFilter::new(
            input_data,
            params.period("period", 28)?,
            fill,
        )?),
        "volatility_chaikins" => Box::new(VolatilityChaikins::new(
            input_data,
            params.period("period", 10)?,
            params.period("change_period", 10)?,
            fill,
        )?),
        "volume_oscillator" => Box::new(VolumeOscillator::new(
            input_data,
            params.period("short_period", 2)?,
            params.period("long_period", 5)?,
            fill,
        )?),
        "volume_rate_of_change" => Box::new(VolumeRateOfChange::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "weighted_close" => Box::new(WeightedClose::new(input_data, fill)?),
        "wilders_smoothing" => Box::new(WildersSmoothing::new(
            input_data,
            params.period("period", 5)?,
            fill,
        )?),
        "williams_accumulation_distribution" => {
            Box::new(WilliamsAccumulationDistribution::new(input_data, fill)?)
        }
        "williams_r" => Box::new(WilliamsR::new(
            input_data,
            params.period("period", 14)?,
            fill,
        )?),
        other => {
            if let Some((_, replacement)) =
                LEGACY_ALIASES.iter().find(|(alias, _)| *alias == other)
            {
                return Err(TtiError::DeprecatedMethod {
                    name: other.to_string(),
                    replacement: replacement.to_string(),
                });
            }
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "indicator".to_string(),
                constraint: "a catalog indicator name".to_string(),
                actual: other.to_string(),
            });
        }
    };
    Ok(indicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(n: usize) -> Frame {
        let index = (0..n)
            .map(|i| {
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64)
            })
            .collect();
        let close: Vec<f64> = (0..n)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 8.0 + i as f64 * 0.1)
            .collect();
        let open: Vec<f64> = close.iter().map(|c| c - 0.5).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 3.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 3.0).collect();
        let volume: Vec<f64> = (0..n).map(|i| 1000.0 + (i % 7) as f64 * 50.0).collect();
        Frame::from_columns(
            index,
            vec![
                ("open", open),
                ("high", high),
                ("low", low),
                ("close", close),
                ("volume", volume),
            ],
        )
        .unwrap()
    }

    #[test]
    fn builds_by_name_with_defaults() {
        let data = sample(60);
        let obv = build_indicator("on_balance_volume", &data, &Params::new(), false).unwrap();
        assert_eq!(obv.properties().short_name, "OBV");
        assert_eq!(obv.ti_data().len(), data.len());
    }

    #[test]
    fn explicit_parameters_reach_the_constructor() {
        let data = sample(60);
        let params = Params::new().with("period", ParamValue::Int(3));
        let rsi = build_indicator("relative_strength_index", &data, &params, false).unwrap();
        // warmup shrinks with the shorter period
        assert!(rsi.ti_data().column("rsi").unwrap()[3].is_finite());
    }

    #[test]
    fn wrong_parameter_kind_is_rejected() {
        let data = sample(60);
        let params = Params::new().with("period", ParamValue::Float(3.5));
        let result = build_indicator("relative_strength_index", &data, &params, false);
        assert!(matches!(
            result,
            Err(TtiError::WrongTypeForInputParameter { .. })
        ));
    }

    #[test]
    fn legacy_alias_is_refused_with_a_pointer() {
        let data = sample(60);
        let result = build_indicator("macd", &data, &Params::new(), false);
        match result {
            Err(TtiError::DeprecatedMethod { name, replacement }) => {
                assert_eq!(name, "macd");
                assert_eq!(replacement, "moving_average_convergence_divergence");
            }
            other => panic!("expected DeprecatedMethod, got {other:?}"),
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let data = sample(60);
        let result = build_indicator("no_such_indicator", &data, &Params::new(), false);
        assert!(matches!(
            result,
            Err(TtiError::WrongValueForInputParameter { .. })
        ));
    }

    #[test]
    fn every_name_builds_on_a_long_sample() {
        let data = sample(120);
        for name in indicator_names() {
            let indicator = build_indicator(name, &data, &Params::new(), false)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(indicator.ti_data().len(), data.len(), "{name}");
        }
    }
}
