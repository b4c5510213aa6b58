//! The validated, immutable deal record.
//!
//! A [`Deal`] is constructed exactly once from validated external data
//! (typically an import layer) and is never mutated by the engine.
//! Construction is the only place in the pipeline where validation
//! failures propagate as hard errors.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Product kinds supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductKind {
    /// FX swap.
    FxSwap,
    /// Interest rate swap.
    Irs,
    /// Cash deposit.
    Deposit,
    /// Cash loan.
    Loan,
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::FxSwap => "FX_SWAP",
            Self::Irs => "IRS",
            Self::Deposit => "DEPOSIT",
            Self::Loan => "LOAN",
        };
        write!(f, "{name}")
    }
}

/// Direction of a position: deposit-side or loan-side.
///
/// The direction fixes the sign convention of every PnL component:
/// loan-side positions earn the client/OIS differential, deposit-side
/// positions pay it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Deposit-side position ("D").
    Deposit,
    /// Loan-side position ("L").
    Loan,
}

impl Direction {
    /// PnL sign: `+1.0` for loan-side, `-1.0` for deposit-side.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Loan => 1.0,
            Self::Deposit => -1.0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "D"),
            Self::Loan => write!(f, "L"),
        }
    }
}

/// One treasury position.
///
/// Invariants enforced at construction:
/// - `value_date >= trade_date`
/// - `maturity_date > value_date`
/// - `amount > 0`
/// - `client_rate` and `ois_equivalent_rate` in `[0, 1]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Unique deal identifier.
    pub deal_id: String,

    /// Free-text description.
    pub comment: String,

    /// Product kind.
    pub product: ProductKind,

    /// Deposit-side or loan-side.
    pub direction: Direction,

    /// Currency pair ("EUR/USD") or single currency ("USD").
    pub pair_currency: String,

    /// Notional amount, strictly positive.
    pub amount: f64,

    /// Date the deal was traded.
    pub trade_date: NaiveDate,

    /// Date interest starts accruing.
    pub value_date: NaiveDate,

    /// Date the deal matures.
    pub maturity_date: NaiveDate,

    /// Rate agreed with the client, decimal in `[0, 1]`.
    pub client_rate: f64,

    /// OIS-equivalent rate at trade time, decimal in `[0, 1]`.
    pub ois_equivalent_rate: f64,

    /// Optional trader identifier.
    pub trader_id: Option<String>,
}

impl Deal {
    /// Starts building a deal.
    #[must_use]
    pub fn builder() -> DealBuilder {
        DealBuilder::default()
    }

    /// Base currency: the left leg of a "BASE/QUOTE" pair, or the whole
    /// string when the deal is single-currency.
    #[must_use]
    pub fn base_currency(&self) -> &str {
        match self.pair_currency.split_once('/') {
            Some((base, _)) => base,
            None => &self.pair_currency,
        }
    }

    /// Quote currency: the right leg of the pair, defaulting to "USD"
    /// for single-currency deals.
    #[must_use]
    pub fn quote_currency(&self) -> &str {
        match self.pair_currency.split_once('/') {
            Some((_, quote)) => quote,
            None => "USD",
        }
    }

    /// True when the deal has matured on or before `valuation_date`.
    #[must_use]
    pub fn is_expired(&self, valuation_date: NaiveDate) -> bool {
        self.maturity_date <= valuation_date
    }
}

/// Builder for [`Deal`] with validation at `build()`.
#[derive(Debug, Clone, Default)]
pub struct DealBuilder {
    deal_id: Option<String>,
    comment: Option<String>,
    product: Option<ProductKind>,
    direction: Option<Direction>,
    pair_currency: Option<String>,
    amount: Option<f64>,
    trade_date: Option<NaiveDate>,
    value_date: Option<NaiveDate>,
    maturity_date: Option<NaiveDate>,
    client_rate: Option<f64>,
    ois_equivalent_rate: Option<f64>,
    trader_id: Option<String>,
}

impl DealBuilder {
    /// Sets the deal identifier.
    #[must_use]
    pub fn deal_id(mut self, id: impl Into<String>) -> Self {
        self.deal_id = Some(id.into());
        self
    }

    /// Sets the comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the product kind.
    #[must_use]
    pub fn product(mut self, product: ProductKind) -> Self {
        self.product = Some(product);
        self
    }

    /// Sets the direction.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Sets the currency pair or single currency.
    #[must_use]
    pub fn pair_currency(mut self, pair: impl Into<String>) -> Self {
        self.pair_currency = Some(pair.into());
        self
    }

    /// Sets the notional amount.
    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Sets the trade date.
    #[must_use]
    pub fn trade_date(mut self, date: NaiveDate) -> Self {
        self.trade_date = Some(date);
        self
    }

    /// Sets the value date.
    #[must_use]
    pub fn value_date(mut self, date: NaiveDate) -> Self {
        self.value_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: NaiveDate) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the client rate (decimal).
    #[must_use]
    pub fn client_rate(mut self, rate: f64) -> Self {
        self.client_rate = Some(rate);
        self
    }

    /// Sets the OIS-equivalent rate at trade time (decimal).
    #[must_use]
    pub fn ois_equivalent_rate(mut self, rate: f64) -> Self {
        self.ois_equivalent_rate = Some(rate);
        self
    }

    /// Sets the trader identifier.
    #[must_use]
    pub fn trader_id(mut self, id: impl Into<String>) -> Self {
        self.trader_id = Some(id.into());
        self
    }

    /// Validates and builds the deal.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingField`] for any unset required field
    /// and [`CoreError::InvalidField`] for any violated invariant, naming
    /// the offending field.
    pub fn build(self) -> CoreResult<Deal> {
        let deal_id = self.deal_id.ok_or_else(|| CoreError::missing_field("deal_id"))?;
        if deal_id.is_empty() {
            return Err(CoreError::invalid_field("deal_id", "must not be empty"));
        }

        let pair_currency = self
            .pair_currency
            .ok_or_else(|| CoreError::missing_field("pair_currency"))?;
        if pair_currency.len() < 3 {
            return Err(CoreError::invalid_field(
                "pair_currency",
                "must be a currency code or BASE/QUOTE pair",
            ));
        }

        let amount = self.amount.ok_or_else(|| CoreError::missing_field("amount"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::invalid_field("amount", "must be strictly positive"));
        }

        let trade_date = self
            .trade_date
            .ok_or_else(|| CoreError::missing_field("trade_date"))?;
        let value_date = self
            .value_date
            .ok_or_else(|| CoreError::missing_field("value_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| CoreError::missing_field("maturity_date"))?;

        if value_date < trade_date {
            return Err(CoreError::invalid_field(
                "value_date",
                "must be on or after trade_date",
            ));
        }
        if maturity_date <= value_date {
            return Err(CoreError::invalid_field(
                "maturity_date",
                "must be after value_date",
            ));
        }

        let client_rate = self
            .client_rate
            .ok_or_else(|| CoreError::missing_field("client_rate"))?;
        validate_rate("client_rate", client_rate)?;

        let ois_equivalent_rate = self
            .ois_equivalent_rate
            .ok_or_else(|| CoreError::missing_field("ois_equivalent_rate"))?;
        validate_rate("ois_equivalent_rate", ois_equivalent_rate)?;

        Ok(Deal {
            deal_id,
            comment: self.comment.unwrap_or_default(),
            product: self.product.ok_or_else(|| CoreError::missing_field("product"))?,
            direction: self
                .direction
                .ok_or_else(|| CoreError::missing_field("direction"))?,
            pair_currency,
            amount,
            trade_date,
            value_date,
            maturity_date,
            client_rate,
            ois_equivalent_rate,
            trader_id: self.trader_id,
        })
    }
}

fn validate_rate(field: &str, rate: f64) -> CoreResult<()> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(CoreError::invalid_field(field, "must be a decimal in [0, 1]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn valid_builder() -> DealBuilder {
        Deal::builder()
            .deal_id("D001")
            .comment("3M USD deposit")
            .product(ProductKind::Deposit)
            .direction(Direction::Deposit)
            .pair_currency("USD")
            .amount(10_000_000.0)
            .trade_date(d(2025, 1, 13))
            .value_date(d(2025, 1, 15))
            .maturity_date(d(2025, 4, 15))
            .client_rate(0.05)
            .ois_equivalent_rate(0.048)
    }

    #[test]
    fn test_build_valid_deal() {
        let deal = valid_builder().build().unwrap();
        assert_eq!(deal.deal_id, "D001");
        assert_eq!(deal.base_currency(), "USD");
        assert_eq!(deal.quote_currency(), "USD");
    }

    #[test]
    fn test_pair_split() {
        let deal = valid_builder().pair_currency("EUR/USD").build().unwrap();
        assert_eq!(deal.base_currency(), "EUR");
        assert_eq!(deal.quote_currency(), "USD");
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = valid_builder().amount(-1.0).build().unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { ref field, .. } if field == "amount"));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let err = valid_builder().client_rate(1.5).build().unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { ref field, .. } if field == "client_rate"));
    }

    #[test]
    fn test_maturity_before_value_rejected() {
        let err = valid_builder()
            .maturity_date(d(2025, 1, 15))
            .build()
            .unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidField { ref field, .. } if field == "maturity_date")
        );
    }

    #[test]
    fn test_value_before_trade_rejected() {
        let err = valid_builder()
            .value_date(d(2025, 1, 10))
            .build()
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidField { ref field, .. } if field == "value_date"));
    }

    #[test]
    fn test_missing_field() {
        let err = Deal::builder().deal_id("D001").build().unwrap_err();
        assert!(matches!(err, CoreError::MissingField { .. }));
    }

    #[test]
    fn test_direction_sign() {
        assert_eq!(Direction::Loan.sign(), 1.0);
        assert_eq!(Direction::Deposit.sign(), -1.0);
    }

    #[test]
    fn test_expiry() {
        let deal = valid_builder().build().unwrap();
        assert!(deal.is_expired(d(2025, 4, 15)));
        assert!(deal.is_expired(d(2025, 5, 1)));
        assert!(!deal.is_expired(d(2025, 4, 14)));
    }
}
