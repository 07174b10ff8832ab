use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Language '{0}' is not supported")]
  UnsupportedLanguage(String),
  #[error("Unknown template type: {0}")]
  UnknownTemplate(String),
  #[error("Invalid currency code: {0}")]
  InvalidCurrency(String),
  #[error("Invalid invoice number: {0}")]
  InvalidInvoiceNumber(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid description: {0}")]
  InvalidDescription(String),
}

// Invoice language. The only place the {en, ka} enumeration is spelled out;
// DTO validation, the template selector and persistence all parse through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
  #[serde(rename = "en")]
  English,
  #[serde(rename = "ka")]
  Georgian,
}

impl Language {
  pub fn as_str(&self) -> &'static str {
    match self {
      Language::English => "en",
      Language::Georgian => "ka",
    }
  }
}

impl FromStr for Language {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "en" => Ok(Language::English),
      "ka" => Ok(Language::Georgian),
      _ => Err(ValueObjectError::UnsupportedLanguage(s.to_string())),
    }
  }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Template layout variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplateKind {
  #[serde(rename = "template1")]
  Template1,
  #[serde(rename = "template2")]
  Template2,
  #[serde(rename = "template3")]
  Template3,
  #[serde(rename = "template4")]
  Template4,
}

impl TemplateKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TemplateKind::Template1 => "template1",
      TemplateKind::Template2 => "template2",
      TemplateKind::Template3 => "template3",
      TemplateKind::Template4 => "template4",
    }
  }

  /// Lenient parse used by the template selector: an unknown identifier is
  /// substituted with the first template and logged, it never fails.
  pub fn parse_or_first(s: &str) -> TemplateKind {
    TemplateKind::from_str(s).unwrap_or_else(|_| {
      tracing::warn!(template = %s, "Invalid template type, using template1");
      TemplateKind::Template1
    })
  }
}

impl FromStr for TemplateKind {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "template1" => Ok(TemplateKind::Template1),
      "template2" => Ok(TemplateKind::Template2),
      "template3" => Ok(TemplateKind::Template3),
      "template4" => Ok(TemplateKind::Template4),
      _ => Err(ValueObjectError::UnknownTemplate(s.to_string())),
    }
  }
}

impl fmt::Display for TemplateKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Currency - ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
  GEL,
  USD,
  EUR,
}

impl Currency {
  pub fn as_str(&self) -> &'static str {
    match self {
      Currency::GEL => "GEL",
      Currency::USD => "USD",
      Currency::EUR => "EUR",
    }
  }

  pub fn symbol(&self) -> &'static str {
    match self {
      Currency::GEL => "₾",
      Currency::USD => "$",
      Currency::EUR => "€",
    }
  }
}

impl FromStr for Currency {
  type Err = ValueObjectError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_uppercase().as_str() {
      "GEL" => Ok(Currency::GEL),
      "USD" => Ok(Currency::USD),
      "EUR" => Ok(Currency::EUR),
      _ => Err(ValueObjectError::InvalidCurrency(s.to_string())),
    }
  }
}

impl fmt::Display for Currency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// Invoice number as persisted. Minting happens in numbering::InvoiceNumberGenerator;
// this type only guards against empty/oversized values read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
  pub fn new(value: String) -> Result<Self, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot be empty".to_string(),
      ));
    }
    if trimmed.len() > 100 {
      return Err(ValueObjectError::InvalidInvoiceNumber(
        "Invoice number cannot exceed 100 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_language_parsing() {
    assert_eq!(Language::from_str("en").unwrap(), Language::English);
    assert_eq!(Language::from_str("ka").unwrap(), Language::Georgian);
    assert!(matches!(
      Language::from_str("fr"),
      Err(ValueObjectError::UnsupportedLanguage(_))
    ));
    // Case sensitive, as in the wire format
    assert!(Language::from_str("EN").is_err());
  }

  #[test]
  fn test_template_kind_parsing() {
    assert_eq!(
      TemplateKind::from_str("template3").unwrap(),
      TemplateKind::Template3
    );
    assert!(TemplateKind::from_str("template9").is_err());
  }

  #[test]
  fn test_template_kind_fallback() {
    assert_eq!(
      TemplateKind::parse_or_first("template9"),
      TemplateKind::Template1
    );
    assert_eq!(
      TemplateKind::parse_or_first("template2"),
      TemplateKind::Template2
    );
  }

  #[test]
  fn test_currency() {
    assert_eq!(Currency::from_str("gel").unwrap(), Currency::GEL);
    assert_eq!(Currency::GEL.symbol(), "₾");
    assert!(Currency::from_str("JPY").is_err());
  }

  #[test]
  fn test_invoice_number() {
    assert!(InvoiceNumber::new("20240503040506".to_string()).is_ok());
    assert!(InvoiceNumber::new("  ".to_string()).is_err());
    assert!(InvoiceNumber::new("x".repeat(101)).is_err());
  }
}
