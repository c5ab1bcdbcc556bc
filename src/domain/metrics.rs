//! Trade accounting and summary statistics.

use super::position::Trade;

#[derive(Debug, Clone, PartialEq)]
pub struct TradeSummary {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub total_profit_pct: f64,
    pub avg_profit_per_trade: f64,
    pub win_rate: f64,
    pub largest_win_pct: f64,
    pub largest_loss_pct: f64,
}

impl TradeSummary {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut winning_trades = 0usize;
        let mut losing_trades = 0usize;
        let mut total_profit_pct = 0.0_f64;
        let mut largest_win_pct = 0.0_f64;
        let mut largest_loss_pct = 0.0_f64;

        for trade in trades {
            let pnl = trade.profit_pct;
            total_profit_pct += pnl;
            if pnl > 0.0 {
                winning_trades += 1;
                largest_win_pct = largest_win_pct.max(pnl);
            } else if pnl < 0.0 {
                losing_trades += 1;
                largest_loss_pct = largest_loss_pct.max(pnl.abs());
            }
        }

        let total_trades = trades.len();
        let (avg_profit_per_trade, win_rate) = if total_trades > 0 {
            (
                total_profit_pct / total_trades as f64,
                winning_trades as f64 / total_trades as f64,
            )
        } else {
            (0.0, 0.0)
        };

        TradeSummary {
            total_trades,
            winning_trades,
            losing_trades,
            total_profit_pct,
            avg_profit_per_trade,
            win_rate,
            largest_win_pct,
            largest_loss_pct,
        }
    }
}
