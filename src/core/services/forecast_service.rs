//! One-step-ahead spending forecast from a linear trend fit.

use chrono::NaiveDate;

use crate::errors::Result;
use crate::ledger::Expense;

/// Minimum number of records needed to fit a trend line.
const MIN_OBSERVATIONS: usize = 2;

/// Outcome of a forecast request. Too little history is a reportable
/// status, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Forecast {
    /// Point estimate for the day after the reference date.
    Projected { amount: f64 },
    /// Fewer than two records on file.
    InsufficientData { observed: usize },
}

/// Ordinary least-squares forecaster over `(day-offset, amount)` pairs.
pub struct ForecastService;

impl ForecastService {
    /// Projects the amount expected the day after `today`.
    ///
    /// Offsets are whole days from the earliest record's date, so the
    /// earliest record sits at offset 0 regardless of insertion order. The
    /// fitted line is evaluated at `(today - earliest) + 1`. When every
    /// record shares one date the offsets have zero variance and the fit
    /// degenerates to a flat line through the mean amount.
    pub fn predict_next(expenses: &[Expense], today: NaiveDate) -> Result<Forecast> {
        if expenses.len() < MIN_OBSERVATIONS {
            return Ok(Forecast::InsufficientData {
                observed: expenses.len(),
            });
        }

        let mut dates = Vec::with_capacity(expenses.len());
        for expense in expenses {
            dates.push(expense.date()?);
        }
        // Non-empty by the length check above.
        let earliest = dates.iter().copied().min().unwrap_or(today);

        let xs: Vec<f64> = dates
            .iter()
            .map(|d| (*d - earliest).num_days() as f64)
            .collect();
        let ys: Vec<f64> = expenses.iter().map(|e| e.amount).collect();

        let (slope, intercept) = fit_line(&xs, &ys);
        let next_offset = ((today - earliest).num_days() + 1) as f64;
        let amount = slope * next_offset + intercept;

        tracing::debug!(slope, intercept, next_offset, "Fitted spending trend");
        Ok(Forecast::Projected { amount })
    }
}

/// Least-squares slope and intercept; flat mean line when the x values
/// carry no variance.
fn fit_line(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        covariance += (x - mean_x) * (y - mean_y);
        variance += (x - mean_x) * (x - mean_x);
    }

    if variance == 0.0 {
        return (0.0, mean_y);
    }
    let slope = covariance / variance;
    (slope, mean_y - slope * mean_x)
}
