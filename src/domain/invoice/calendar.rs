use chrono::{Datelike, NaiveDate};

use super::value_objects::Language;

const MONTHS_EN: [&str; 12] = [
  "January",
  "February",
  "March",
  "April",
  "May",
  "June",
  "July",
  "August",
  "September",
  "October",
  "November",
  "December",
];

const MONTHS_KA: [&str; 12] = [
  "იანვარი",
  "თებერვალი",
  "მარტი",
  "აპრილი",
  "მაისი",
  "ივნისი",
  "ივლისი",
  "აგვისტო",
  "სექტემბერი",
  "ოქტომბერი",
  "ნოემბერი",
  "დეკემბერი",
];

/// Formats an invoice date with the month name of the given language.
/// Georgian dates carry the customary year suffix "წ.".
pub fn localized_date(date: NaiveDate, language: Language) -> String {
  let month = (date.month0()) as usize;
  match language {
    Language::English => format!("{} {}, {}", date.day(), MONTHS_EN[month], date.year()),
    Language::Georgian => format!("{} {}, {}წ.", date.day(), MONTHS_KA[month], date.year()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_english_date() {
    let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
    assert_eq!(localized_date(date, Language::English), "6 August, 2025");
  }

  #[test]
  fn test_georgian_date() {
    let date = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
    assert_eq!(localized_date(date, Language::Georgian), "6 აგვისტო, 2025წ.");
  }

  #[test]
  fn test_year_boundaries() {
    let jan = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let dec = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    assert_eq!(localized_date(jan, Language::English), "1 January, 2026");
    assert_eq!(localized_date(dec, Language::Georgian), "31 დეკემბერი, 2026წ.");
  }
}
