use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Currency, InvoiceNumber, Language, TemplateKind};

// Payer - the entity being billed, owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payer {
  pub id: Uuid,
  pub owner_id: Uuid,
  pub identification_code: String,
  pub name_ka: String,
  pub name_en: Option<String>,
  pub phone_number: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Payer {
  pub fn new(
    owner_id: Uuid,
    identification_code: String,
    name_ka: String,
    name_en: Option<String>,
    phone_number: Option<String>,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      owner_id,
      identification_code,
      name_ka,
      name_en,
      phone_number,
      created_at: now,
      updated_at: now,
    }
  }

  pub fn update(
    &mut self,
    identification_code: String,
    name_ka: String,
    name_en: Option<String>,
    phone_number: Option<String>,
  ) {
    self.identification_code = identification_code;
    self.name_ka = name_ka;
    self.name_en = name_en;
    self.phone_number = phone_number;
    self.updated_at = Utc::now();
  }
}

// Purpose - a line item, exists only as a child of an invoice.
// Purposes are bulk-replaced on invoice update, never patched individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purpose {
  pub id: Uuid,
  pub invoice_id: Uuid,
  pub description: String,
  pub amount: Decimal,
  pub has_vat: bool,
  pub vat_amount: Decimal,
}

impl Purpose {
  pub fn new(
    invoice_id: Uuid,
    description: String,
    amount: Decimal,
    has_vat: bool,
    vat_amount: Decimal,
  ) -> Self {
    Self {
      id: Uuid::new_v4(),
      invoice_id,
      description,
      amount,
      has_vat,
      vat_amount,
    }
  }
}

// Invoice - a saved ("favourite") invoice configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Uuid,
  pub receiver_id: Uuid,
  pub payer_id: Uuid,
  pub invoice_number: InvoiceNumber,
  pub total_amount: Decimal,
  pub currency: Currency,
  pub language: Language,
  pub template: TemplateKind,
  pub use_invoice_date_currency_rate: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Invoice {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    receiver_id: Uuid,
    payer_id: Uuid,
    invoice_number: InvoiceNumber,
    total_amount: Decimal,
    currency: Currency,
    language: Language,
    template: TemplateKind,
    use_invoice_date_currency_rate: bool,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      receiver_id,
      payer_id,
      invoice_number,
      total_amount,
      currency,
      language,
      template,
      use_invoice_date_currency_rate,
      created_at: now,
      updated_at: now,
    }
  }

  /// Applies an update. The number is minted fresh by the caller on every
  /// update; the stored one is otherwise immutable.
  #[allow(clippy::too_many_arguments)]
  pub fn update(
    &mut self,
    payer_id: Uuid,
    invoice_number: InvoiceNumber,
    total_amount: Decimal,
    currency: Currency,
    language: Language,
    template: TemplateKind,
    use_invoice_date_currency_rate: bool,
  ) {
    self.payer_id = payer_id;
    self.invoice_number = invoice_number;
    self.total_amount = total_amount;
    self.currency = currency;
    self.language = language;
    self.template = template;
    self.use_invoice_date_currency_rate = use_invoice_date_currency_rate;
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_payer_update_touches_timestamp() {
    let mut payer = Payer::new(
      Uuid::new_v4(),
      "12345678901".to_string(),
      "შპს მაგალითი".to_string(),
      Some("Example LLC".to_string()),
      None,
    );
    let created = payer.created_at;
    payer.update(
      "12345678901".to_string(),
      "შპს მაგალითი".to_string(),
      Some("Example LLC".to_string()),
      Some("+995 555 123456".to_string()),
    );
    assert_eq!(payer.created_at, created);
    assert!(payer.updated_at >= created);
    assert_eq!(payer.phone_number.as_deref(), Some("+995 555 123456"));
  }

  #[test]
  fn test_invoice_update_replaces_number() {
    let mut invoice = Invoice::new(
      Uuid::new_v4(),
      Uuid::new_v4(),
      InvoiceNumber::new("20240503040506".to_string()).unwrap(),
      dec!(118.00),
      Currency::GEL,
      Language::Georgian,
      TemplateKind::Template1,
      false,
    );

    let new_payer = Uuid::new_v4();
    invoice.update(
      new_payer,
      InvoiceNumber::new("20240503040507".to_string()).unwrap(),
      dec!(236.00),
      Currency::USD,
      Language::English,
      TemplateKind::Template2,
      true,
    );

    assert_eq!(invoice.payer_id, new_payer);
    assert_eq!(invoice.invoice_number.value(), "20240503040507");
    assert_eq!(invoice.total_amount, dec!(236.00));
    assert_eq!(invoice.language, Language::English);
  }
}
