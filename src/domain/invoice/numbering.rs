use chrono::{Local, NaiveDateTime};

/// Mints invoice numbers from the current local timestamp.
///
/// The encoding is year, day, month, hour, minute, second with no separators.
/// Two invocations within the same wall-clock second produce identical
/// strings; uniqueness is enforced only by the store's constraint on
/// `invoices.invoice_number`, which rejects a collision without retrying.
pub struct InvoiceNumberGenerator;

impl InvoiceNumberGenerator {
  pub fn generate() -> String {
    Self::format(Local::now().naive_local())
  }

  fn format(timestamp: NaiveDateTime) -> String {
    timestamp.format("%Y%d%m%H%M%S").to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  #[test]
  fn test_field_order_is_year_day_month() {
    let ts = NaiveDate::from_ymd_opt(2024, 3, 5)
      .unwrap()
      .and_hms_opt(4, 5, 6)
      .unwrap();
    assert_eq!(InvoiceNumberGenerator::format(ts), "20240503040506");
  }

  #[test]
  fn test_same_second_produces_identical_numbers() {
    // Documented non-uniqueness boundary: the encoding carries no
    // sub-second component, so one instant maps to exactly one string.
    let ts = NaiveDate::from_ymd_opt(2025, 12, 31)
      .unwrap()
      .and_hms_opt(23, 59, 59)
      .unwrap();
    assert_eq!(
      InvoiceNumberGenerator::format(ts),
      InvoiceNumberGenerator::format(ts)
    );
  }

  #[test]
  fn test_generated_number_shape() {
    let number = InvoiceNumberGenerator::generate();
    assert_eq!(number.len(), 14);
    assert!(number.chars().all(|c| c.is_ascii_digit()));
  }
}
