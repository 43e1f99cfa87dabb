//! Active trading simulation.
//!
//! [`TradingSimulator`] consumes one signal per trading day and runs a
//! long/short strategy under an optional exposure cap. Within a round the
//! close step always runs before the open step: a closure frees exposure
//! for a same-day open, but a position opened today is never closed today.
//! Positions are scanned for closure in insertion (row) order.
//!
//! The simulator owns its portfolio and ledger outright; callers only ever
//! see snapshots.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::TtiError;
use crate::graph::GraphSpec;
use crate::signal::Signal;

/// Side of an opened position, also the per-day open action in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TradingAction {
    None,
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionStatus {
    None,
    Open,
    Closed,
}

/// One row of the position table, parallel to the date index. The row is
/// written on the day the position opens; closure flips `status` in place.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PortfolioRow {
    pub position: TradingAction,
    pub status: PositionStatus,
    pub exposure: f64,
}

impl PortfolioRow {
    fn empty() -> Self {
        PortfolioRow {
            position: TradingAction::None,
            status: PositionStatus::None,
            exposure: 0.0,
        }
    }
}

/// Date-aligned simulation ledger, one entry per consumed round.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationLedger {
    pub index: Vec<NaiveDate>,
    pub signal: Vec<Signal>,
    pub open_trading_action: Vec<TradingAction>,
    pub stock_value: Vec<f64>,
    pub exposure: Vec<f64>,
    pub portfolio_value: Vec<f64>,
    pub earnings: Vec<f64>,
    pub balance: Vec<f64>,
}

impl SimulationLedger {
    fn with_capacity(n: usize) -> Self {
        SimulationLedger {
            index: Vec::with_capacity(n),
            signal: Vec::with_capacity(n),
            open_trading_action: Vec::with_capacity(n),
            stock_value: Vec::with_capacity(n),
            exposure: Vec::with_capacity(n),
            portfolio_value: Vec::with_capacity(n),
            earnings: Vec::with_capacity(n),
            balance: Vec::with_capacity(n),
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Snapshot of the run, rounded to two decimals at reporting time only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStatistics {
    pub number_of_trading_days: usize,
    pub number_of_buy_signals: usize,
    pub number_of_ignored_buy_signals: usize,
    pub number_of_sell_signals: usize,
    pub number_of_ignored_sell_signals: usize,
    pub last_open_long_positions: usize,
    pub last_open_short_positions: usize,
    pub last_stock_value: f64,
    pub last_exposure: f64,
    pub last_portfolio_value: f64,
    pub last_earnings: f64,
    pub final_balance: f64,
}

/// Everything a simulation run hands back to the caller.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    pub ledger: SimulationLedger,
    pub statistics: SimulationStatistics,
    pub graph: GraphSpec,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug)]
pub struct TradingSimulator {
    index: Vec<NaiveDate>,
    close: Vec<f64>,
    max_exposure: Option<f64>,
    short_exposure_factor: f64,

    portfolio: Vec<PortfolioRow>,
    ledger: SimulationLedger,
    exposure_total: f64,
    earnings: f64,
    round: usize,

    buy_signals: usize,
    ignored_buy_signals: usize,
    sell_signals: usize,
    ignored_sell_signals: usize,
}

impl TradingSimulator {
    /// Build a simulator over a date index and its aligned close prices.
    pub fn new(
        index: &[NaiveDate],
        close: &[f64],
        max_exposure: Option<f64>,
        short_exposure_factor: f64,
    ) -> Result<Self, TtiError> {
        if close.len() != index.len() {
            return Err(TtiError::NotValidInputDataForSimulation {
                argument: "close_values".to_string(),
                details: format!(
                    "{} close values for {} index rows",
                    close.len(),
                    index.len()
                ),
            });
        }
        if index.is_empty() {
            return Err(TtiError::NotValidInputDataForSimulation {
                argument: "close_values".to_string(),
                details: "empty input".to_string(),
            });
        }
        if !(short_exposure_factor >= 1.0) {
            return Err(TtiError::WrongValueForInputParameter {
                parameter: "short_exposure_factor".to_string(),
                constraint: ">= 1.0".to_string(),
                actual: short_exposure_factor.to_string(),
            });
        }
        if let Some(cap) = max_exposure {
            if !(cap > 0.0) {
                return Err(TtiError::WrongValueForInputParameter {
                    parameter: "max_exposure".to_string(),
                    constraint: "> 0.0".to_string(),
                    actual: cap.to_string(),
                });
            }
        }

        Ok(TradingSimulator {
            portfolio: vec![PortfolioRow::empty(); index.len()],
            ledger: SimulationLedger::with_capacity(index.len()),
            index: index.to_vec(),
            close: close.to_vec(),
            max_exposure,
            short_exposure_factor,
            exposure_total: 0.0,
            earnings: 0.0,
            round: 0,
            buy_signals: 0,
            ignored_buy_signals: 0,
            sell_signals: 0,
            ignored_sell_signals: 0,
        })
    }

    /// Consume the next day's signal. Rounds past the end of the index are
    /// ignored.
    pub fn run_round(&mut self, signal: Signal) {
        let i = self.round;
        if i >= self.index.len() {
            return;
        }
        self.round += 1;

        match signal {
            Signal::Buy => self.buy_signals += 1,
            Signal::Sell => self.sell_signals += 1,
            Signal::Hold => {}
        }

        let mut action = TradingAction::None;
        if i == 0 {
            // First row carries no action regardless of the signal.
            match signal {
                Signal::Buy => self.ignored_buy_signals += 1,
                Signal::Sell => self.ignored_sell_signals += 1,
                Signal::Hold => {}
            }
            self.push_ledger_row(0, signal, action, 0.0, 0.0, 0.0, 0.0);
            return;
        }

        let price = self.close[i];

        // Close step: scan previously opened rows in insertion order.
        for j in 0..i {
            if self.portfolio[j].status != PositionStatus::Open {
                continue;
            }
            match self.portfolio[j].position {
                TradingAction::Long if price > self.portfolio[j].exposure => {
                    self.earnings += price - self.portfolio[j].exposure;
                    self.exposure_total -= self.portfolio[j].exposure;
                    self.portfolio[j].status = PositionStatus::Closed;
                }
                TradingAction::Short
                    if self.portfolio[j].exposure > self.short_exposure_factor * price =>
                {
                    self.earnings +=
                        self.portfolio[j].exposure / self.short_exposure_factor - price;
                    self.exposure_total -= self.portfolio[j].exposure;
                    self.portfolio[j].status = PositionStatus::Closed;
                }
                _ => {}
            }
        }

        // Open step.
        match signal {
            Signal::Buy => {
                if self.cap_allows(price) {
                    self.portfolio[i] = PortfolioRow {
                        position: TradingAction::Long,
                        status: PositionStatus::Open,
                        exposure: price,
                    };
                    self.exposure_total += price;
                    action = TradingAction::Long;
                } else {
                    self.ignored_buy_signals += 1;
                }
            }
            Signal::Sell => {
                let exposure = self.short_exposure_factor * price;
                if self.cap_allows(exposure) {
                    self.portfolio[i] = PortfolioRow {
                        position: TradingAction::Short,
                        status: PositionStatus::Open,
                        exposure,
                    };
                    self.exposure_total += exposure;
                    action = TradingAction::Short;
                } else {
                    self.ignored_sell_signals += 1;
                }
            }
            Signal::Hold => {}
        }

        // Mark-to-market.
        let (longs, shorts) = self.open_position_counts();
        let portfolio_value = price * (longs as f64 - shorts as f64);
        let balance = self.earnings + portfolio_value;
        self.push_ledger_row(
            i,
            signal,
            action,
            self.exposure_total,
            portfolio_value,
            self.earnings,
            balance,
        );
    }

    fn cap_allows(&self, additional: f64) -> bool {
        match self.max_exposure {
            Some(cap) => self.exposure_total + additional <= cap,
            None => true,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push_ledger_row(
        &mut self,
        i: usize,
        signal: Signal,
        action: TradingAction,
        exposure: f64,
        portfolio_value: f64,
        earnings: f64,
        balance: f64,
    ) {
        self.ledger.index.push(self.index[i]);
        self.ledger.signal.push(signal);
        self.ledger.open_trading_action.push(action);
        self.ledger.stock_value.push(self.close[i]);
        self.ledger.exposure.push(exposure);
        self.ledger.portfolio_value.push(portfolio_value);
        self.ledger.earnings.push(earnings);
        self.ledger.balance.push(balance);
    }

    fn open_position_counts(&self) -> (usize, usize) {
        let mut longs = 0;
        let mut shorts = 0;
        for row in &self.portfolio {
            if row.status == PositionStatus::Open {
                match row.position {
                    TradingAction::Long => longs += 1,
                    TradingAction::Short => shorts += 1,
                    TradingAction::None => {}
                }
            }
        }
        (longs, shorts)
    }

    pub fn ledger(&self) -> &SimulationLedger {
        &self.ledger
    }

    pub fn portfolio(&self) -> &[PortfolioRow] {
        &self.portfolio
    }

    pub fn statistics(&self) -> SimulationStatistics {
        let (longs, shorts) = self.open_position_counts();
        let last = self.ledger.len().checked_sub(1);
        let last_of = |v: &[f64]| last.map(|i| round2(v[i])).unwrap_or(0.0);
        SimulationStatistics {
            number_of_trading_days: self.ledger.len(),
            number_of_buy_signals: self.buy_signals,
            number_of_ignored_buy_signals: self.ignored_buy_signals,
            number_of_sell_signals: self.sell_signals,
            number_of_ignored_sell_signals: self.ignored_sell_signals,
            last_open_long_positions: longs,
            last_open_short_positions: shorts,
            last_stock_value: last_of(&self.ledger.stock_value),
            last_exposure: last_of(&self.ledger.exposure),
            last_portfolio_value: last_of(&self.ledger.portfolio_value),
            last_earnings: last_of(&self.ledger.earnings),
            final_balance: last_of(&self.ledger.balance),
        }
    }

    pub fn graph(&self) -> GraphSpec {
        let mut spec = GraphSpec::new("Trading Simulation", "Value", true);
        let x = &self.ledger.index;
        spec.add_line("stock value", x, &self.ledger.stock_value, "black", 0.9, 0);
        spec.add_line("exposure", x, &self.ledger.exposure, "tab:orange", 0.8, 1);
        spec.add_line(
            "portfolio value",
            x,
            &self.ledger.portfolio_value,
            "tab:blue",
            0.8,
            1,
        );
        spec.add_line("earnings", x, &self.ledger.earnings, "tab:green", 0.8, 1);
        spec.add_line("balance", x, &self.ledger.balance, "tab:red", 1.0, 1);
        spec
    }

    pub fn into_outcome(self) -> SimulationOutcome {
        let statistics = self.statistics();
        let graph = self.graph();
        SimulationOutcome {
            ledger: self.ledger,
            statistics,
            graph,
        }
    }
}
