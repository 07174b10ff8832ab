use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed VAT rate applied when a line item is flagged
pub fn vat_rate() -> Decimal {
  Decimal::new(18, 2) // 0.18
}

/// VAT amount for a base amount, rounded to 2 decimal places.
/// Returns 0.00 when the flag is off.
pub fn vat_amount(amount: Decimal, has_vat: bool) -> Decimal {
  if has_vat {
    (amount * vat_rate()).round_dp(2)
  } else {
    Decimal::new(0, 2)
  }
}

/// A line item as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurposeLine {
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
}

/// A line item enriched with its computed VAT amount and line total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedLine {
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
  pub vat_amount: Decimal,
  pub total: Decimal,
}

/// Invoice-level aggregates. Calculated, never persisted as authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
  pub total_amount: Decimal,
  pub vat_total: Decimal,
}

impl InvoiceTotals {
  pub fn total_without_vat(&self) -> Decimal {
    (self.total_amount - self.vat_total).round_dp(2)
  }
}

/// Computes per-line VAT and totals plus the invoice-level aggregates.
///
/// Returns a fresh enriched collection instead of writing back onto the
/// input lines; an empty input yields an empty collection and (0.00, 0.00).
pub fn calculate_totals(lines: &[PurposeLine]) -> (Vec<ComputedLine>, InvoiceTotals) {
  let mut computed = Vec::with_capacity(lines.len());
  let mut total_amount = Decimal::ZERO;
  let mut vat_total = Decimal::ZERO;

  for line in lines {
    let vat = vat_amount(line.amount, line.has_vat);
    let total = (line.amount + vat).round_dp(2);

    total_amount += total;
    vat_total += vat;

    computed.push(ComputedLine {
      description: line.description.clone(),
      amount: line.amount,
      has_vat: line.has_vat,
      vat_amount: vat,
      total,
    });
  }

  (
    computed,
    InvoiceTotals {
      total_amount: total_amount.round_dp(2),
      vat_total: vat_total.round_dp(2),
    },
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn line(amount: Decimal, has_vat: bool) -> PurposeLine {
    PurposeLine {
      description: "Consulting services".to_string(),
      amount,
      has_vat,
    }
  }

  #[test]
  fn test_vat_amount_without_flag_is_zero() {
    assert_eq!(vat_amount(dec!(100), false), dec!(0.00));
    assert_eq!(vat_amount(dec!(0), false), dec!(0.00));
    assert_eq!(vat_amount(dec!(9999.99), false), dec!(0.00));
  }

  #[test]
  fn test_vat_amount_with_flag() {
    assert_eq!(vat_amount(dec!(100), true), dec!(18.00));
    assert_eq!(vat_amount(dec!(50), true), dec!(9.00));
    // 33.33 * 0.18 = 5.9994 -> 6.00
    assert_eq!(vat_amount(dec!(33.33), true), dec!(6.00));
  }

  #[test]
  fn test_empty_lines_yield_zero_totals() {
    let (computed, totals) = calculate_totals(&[]);
    assert!(computed.is_empty());
    assert_eq!(totals.total_amount, dec!(0.00));
    assert_eq!(totals.vat_total, dec!(0.00));
  }

  #[test]
  fn test_mixed_lines() {
    let lines = vec![line(dec!(100), true), line(dec!(50), false)];
    let (computed, totals) = calculate_totals(&lines);

    assert_eq!(totals.vat_total, dec!(18.00));
    assert_eq!(totals.total_amount, dec!(168.00));
    assert_eq!(totals.total_without_vat(), dec!(150.00));

    assert_eq!(computed[0].vat_amount, dec!(18.00));
    assert_eq!(computed[0].total, dec!(118.00));
    assert_eq!(computed[1].vat_amount, dec!(0.00));
    assert_eq!(computed[1].total, dec!(50.00));
  }

  #[test]
  fn test_input_is_not_mutated() {
    let lines = vec![line(dec!(100), true)];
    let snapshot = lines.clone();
    let _ = calculate_totals(&lines);
    assert_eq!(lines, snapshot);
  }
}
