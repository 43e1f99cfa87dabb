//! The indicator catalog.
//!
//! One module per indicator. Every type here implements
//! [`crate::indicator::Indicator`] and is re-exported for convenience.

pub mod accumulation_distribution_line;
pub mod average_true_range;
pub mod bollinger_bands;
pub mod chaikin_money_flow;
pub mod chaikin_oscillator;
pub mod chande_momentum_oscillator;
pub mod commodity_channel_index;
pub mod detrended_price_oscillator;
pub mod directional_movement_index;
pub mod double_exponential_moving_average;
pub mod ease_of_movement;
pub mod envelopes;
pub mod fibonacci_retracement;
pub mod forecast_oscillator;
pub mod ichimoku_cloud;
pub mod intraday_movement_index;
pub mod klinger_oscillator;
pub mod linear_regression_indicator;
pub mod linear_regression_slope;
pub mod mass_index;
pub mod median_price;
pub mod momentum;
pub mod moving_average;
pub mod moving_average_convergence_divergence;
pub mod negative_volume_index;
pub mod on_balance_volume;
pub mod parabolic_sar;
pub mod performance;
pub mod positive_volume_index;
pub mod price_and_volume_trend;
pub mod price_channel;
pub mod price_oscillator;
pub mod price_rate_of_change;
pub mod projection_bands;
pub mod projection_oscillator;
pub mod qstick;
pub mod range_indicator;
pub mod relative_momentum_index;
pub mod relative_strength_index;
pub mod relative_volatility_index;
pub mod standard_deviation;
pub mod stochastic_momentum_index;
pub mod stochastic_oscillator;
pub mod swing_index;
pub mod time_series_forecast;
pub mod triple_exponential_moving_average;
pub mod typical_price;
pub mod ultimate_oscillator;
pub mod vertical_horizontal_filter;
pub mod volatility_chaikins;
pub mod volume_oscillator;
pub mod volume_rate_of_change;
pub mod weighted_close;
pub mod wilders_smoothing;
pub mod williams_accumulation_distribution;
pub mod williams_r;

pub use accumulation_distribution_line::AccumulationDistributionLine;
pub use average_true_range::AverageTrueRange;
pub use bollinger_bands::BollingerBands;
pub use chaikin_money_flow::ChaikinMoneyFlow;
pub use chaikin_oscillator::ChaikinOscillator;
pub use chande_momentum_oscillator::ChandeMomentumOscillator;
pub use commodity_channel_index::CommodityChannelIndex;
pub use detrended_price_oscillator::DetrendedPriceOscillator;
pub use directional_movement_index::DirectionalMovementIndex;
pub use double_exponential_moving_average::DoubleExponentialMovingAverage;
pub use ease_of_movement::EaseOfMovement;
pub use envelopes::Envelopes;
pub use fibonacci_retracement::FibonacciRetracement;
pub use forecast_oscillator::ForecastOscillator;
pub use ichimoku_cloud::IchimokuCloud;
pub use intraday_movement_index::IntradayMovementIndex;
pub use klinger_oscillator::KlingerOscillator;
pub use linear_regression_indicator::LinearRegressionIndicator;
pub use linear_regression_slope::LinearRegressionSlope;
pub use mass_index::MassIndex;
pub use median_price::MedianPrice;
pub use momentum::Momentum;
pub use moving_average::{MaMode, MovingAverage};
pub use moving_average_convergence_divergence::MovingAverageConvergenceDivergence;
pub use negative_volume_index::NegativeVolumeIndex;
pub use on_balance_volume::OnBalanceVolume;
pub use parabolic_sar::ParabolicSar;
pub use performance::{Performance, PerformanceMode};
pub use positive_volume_index::PositiveVolumeIndex;
pub use price_and_volume_trend::PriceAndVolumeTrend;
pub use price_channel::PriceChannel;
pub use price_oscillator::PriceOscillator;
pub use price_rate_of_change::PriceRateOfChange;
pub use projection_bands::ProjectionBands;
pub use projection_oscillator::ProjectionOscillator;
pub use qstick::Qstick;
pub use range_indicator::RangeIndicator;
pub use relative_momentum_index::RelativeMomentumIndex;
pub use relative_strength_index::RelativeStrengthIndex;
pub use relative_volatility_index::RelativeVolatilityIndex;
pub use standard_deviation::StandardDeviation;
pub use stochastic_momentum_index::StochasticMomentumIndex;
pub use stochastic_oscillator::StochasticOscillator;
pub use swing_index::SwingIndex;
pub use time_series_forecast::TimeSeriesForecast;
pub use triple_exponential_moving_average::TripleExponentialMovingAverage;
pub use typical_price::TypicalPrice;
pub use ultimate_oscillator::UltimateOscillator;
pub use vertical_horizontal_filter::VerticalHorizontalFilter;
pub use volatility_chaikins::VolatilityChaikins;
pub use volume_oscillator::VolumeOscillator;
pub use volume_rate_of_change::VolumeRateOfChange;
pub use weighted_close::WeightedClose;
pub use wilders_smoothing::WildersSmoothing;
pub use williams_accumulation_distribution::WilliamsAccumulationDistribution;
pub use williams_r::WilliamsR;
