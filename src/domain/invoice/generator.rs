use chrono::Local;
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::auth::entities::User;

use super::calendar::localized_date;
use super::entities::Payer;
use super::errors::InvoiceError;
use super::numbering::InvoiceNumberGenerator;
use super::ports::{PdfConverter, TemplateRenderer};
use super::totals::{PurposeLine, calculate_totals};
use super::value_objects::{Currency, Language, TemplateKind};

/// Everything the generator needs from the request, with the payer already
/// resolved against the caller's own records.
#[derive(Debug, Clone)]
pub struct GenerationInput {
  pub payer: Payer,
  pub purposes: Vec<PurposeLine>,
  pub language: String,
  pub template: String,
  pub currency: Currency,
}

/// Maps a (language, template type) pair onto a renderable template.
///
/// An unsupported language is a hard error; an unknown template type is
/// substituted with the first template and logged as a warning.
pub struct TemplateSelector;

impl TemplateSelector {
  pub fn resolve(language: &str, template: &str) -> Result<(Language, &'static str), InvoiceError> {
    let language = Language::from_str(language)
      .map_err(|_| InvoiceError::LanguageNotSupported(language.to_string()))?;
    let kind = TemplateKind::parse_or_first(template);
    Ok((language, Self::template_file(language, kind)))
  }

  fn template_file(language: Language, kind: TemplateKind) -> &'static str {
    match (language, kind) {
      (Language::English, TemplateKind::Template1) => "invoice_template_1_en.html.tera",
      (Language::English, TemplateKind::Template2) => "invoice_template_2_en.html.tera",
      (Language::English, TemplateKind::Template3) => "invoice_template_3_en.html.tera",
      (Language::English, TemplateKind::Template4) => "invoice_template_4_en.html.tera",
      (Language::Georgian, TemplateKind::Template1) => "invoice_template_1_ka.html.tera",
      (Language::Georgian, TemplateKind::Template2) => "invoice_template_2_ka.html.tera",
      (Language::Georgian, TemplateKind::Template3) => "invoice_template_3_ka.html.tera",
      (Language::Georgian, TemplateKind::Template4) => "invoice_template_4_ka.html.tera",
    }
  }
}

/// Orchestrates invoice generation: context preparation, template rendering
/// and PDF conversion. Any failure is terminal for the request; no partial
/// output is ever returned.
pub struct InvoiceGenerator {
  renderer: Arc<dyn TemplateRenderer>,
  converter: Arc<dyn PdfConverter>,
}

impl InvoiceGenerator {
  pub fn new(renderer: Arc<dyn TemplateRenderer>, converter: Arc<dyn PdfConverter>) -> Self {
    Self {
      renderer,
      converter,
    }
  }

  /// Generates a PDF invoice for the given input on behalf of the receiver.
  ///
  /// # Errors
  /// `InvoiceError::LanguageNotSupported` before any rendering attempt when
  /// the language is outside the supported set, `InvoiceError::Generation`
  /// when the template cannot be resolved/rendered or PDF conversion fails.
  pub async fn generate(
    &self,
    input: &GenerationInput,
    receiver: &User,
  ) -> Result<Vec<u8>, InvoiceError> {
    let (_, template) = TemplateSelector::resolve(&input.language, &input.template)?;

    let context = self.prepare_context(input, receiver);
    let html = self.renderer.render(template, &context)?;

    match self.converter.convert(&html).await {
      Ok(pdf) => {
        tracing::info!(template, "PDF generation successful");
        Ok(pdf)
      }
      Err(e) => {
        tracing::error!(template, error = %e, "PDF generation failed");
        Err(InvoiceError::Generation(format!(
          "Failed to generate PDF: {}",
          e
        )))
      }
    }
  }

  /// Assembles the flat key-value context consumed by the templates: totals,
  /// the current date in both supported languages, payer details and the
  /// receiver's identity and banking fields.
  fn prepare_context(&self, input: &GenerationInput, receiver: &User) -> serde_json::Value {
    let (purposes, totals) = calculate_totals(&input.purposes);

    let today = Local::now().date_naive();
    let date_now = localized_date(today, Language::Georgian);
    let date_now_en = localized_date(today, Language::English);

    json!({
      "invoice_number": InvoiceNumberGenerator::generate(),
      "purposes": purposes,
      "total_amount": totals.total_amount,
      "vat_total": totals.vat_total,
      "total_without_vat": totals.total_without_vat(),
      "currency": input.currency.as_str(),
      "currency_symbol": input.currency.symbol(),
      "date_now": date_now,
      "date_now_en": date_now_en,
      "receiver_ka": receiver.receiver_name_ka,
      "receiver_en": receiver.receiver_name_en.as_deref().unwrap_or(""),
      "receiver_id": receiver.identification_code,
      "receiver_phone": receiver.phone_number.as_deref().unwrap_or(""),
      "payer_ka": input.payer.name_ka,
      "payer_en": input.payer.name_en.as_deref().unwrap_or(""),
      "payer_id": input.payer.identification_code,
      "payer_phone": input.payer.phone_number.as_deref().unwrap_or(""),
      "bank_name_ka": receiver.bank_name_ka,
      "bank_name_en": receiver.bank_name_en.as_deref().unwrap_or(""),
      "bank_acc_num": receiver.bank_account_number,
      "bank_code": receiver.bank_code,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use rust_decimal_macros::dec;
  use std::sync::atomic::{AtomicBool, Ordering};
  use uuid::Uuid;

  struct RecordingRenderer {
    called: AtomicBool,
  }

  impl TemplateRenderer for RecordingRenderer {
    fn render(&self, _template: &str, _context: &serde_json::Value) -> Result<String, InvoiceError> {
      self.called.store(true, Ordering::SeqCst);
      Ok("<html></html>".to_string())
    }
  }

  struct StubConverter {
    fail: bool,
  }

  #[async_trait]
  impl PdfConverter for StubConverter {
    async fn convert(&self, _html: &str) -> Result<Vec<u8>, InvoiceError> {
      if self.fail {
        Err(InvoiceError::Generation("converter exited with 1".to_string()))
      } else {
        Ok(b"%PDF-1.7".to_vec())
      }
    }
  }

  fn receiver() -> User {
    User::new(
      "vendor@example.com".to_string(),
      "argon2-hash".to_string(),
      crate::domain::auth::entities::UserProfile {
        receiver_name_ka: "გიორგი მაისურაძე".to_string(),
        receiver_name_en: Some("Giorgi Maisuradze".to_string()),
        identification_code: "01001234567".to_string(),
        address: None,
        phone_number: Some("+995 555 000111".to_string()),
        bank_account_number: "GE29NB0000000101904917".to_string(),
        bank_name_ka: "საქართველოს ბანკი".to_string(),
        bank_name_en: Some("Bank of Georgia".to_string()),
        bank_code: "BAGAGE22".to_string(),
      },
    )
  }

  fn input(language: &str, template: &str) -> GenerationInput {
    GenerationInput {
      payer: Payer::new(
        Uuid::new_v4(),
        "405103399".to_string(),
        "შპს გადამხდელი".to_string(),
        Some("Payer LLC".to_string()),
        None,
      ),
      purposes: vec![
        PurposeLine {
          description: "Development work".to_string(),
          amount: dec!(100),
          has_vat: true,
        },
        PurposeLine {
          description: "Hosting".to_string(),
          amount: dec!(50),
          has_vat: false,
        },
      ],
      language: language.to_string(),
      template: template.to_string(),
      currency: Currency::GEL,
    }
  }

  #[test]
  fn test_selector_rejects_unsupported_language() {
    let err = TemplateSelector::resolve("fr", "template1").unwrap_err();
    assert!(matches!(err, InvoiceError::LanguageNotSupported(ref l) if l == "fr"));
  }

  #[test]
  fn test_selector_falls_back_on_unknown_template() {
    let (language, file) = TemplateSelector::resolve("en", "template9").unwrap();
    assert_eq!(language, Language::English);
    assert_eq!(file, "invoice_template_1_en.html.tera");
  }

  #[test]
  fn test_selector_resolves_georgian_templates() {
    let (_, file) = TemplateSelector::resolve("ka", "template4").unwrap();
    assert_eq!(file, "invoice_template_4_ka.html.tera");
  }

  #[tokio::test]
  async fn test_generate_fails_before_rendering_on_bad_language() {
    let renderer = Arc::new(RecordingRenderer {
      called: AtomicBool::new(false),
    });
    let generator = InvoiceGenerator::new(renderer.clone(), Arc::new(StubConverter { fail: false }));

    let err = generator
      .generate(&input("fr", "template1"), &receiver())
      .await
      .unwrap_err();

    assert!(matches!(err, InvoiceError::LanguageNotSupported(_)));
    assert!(!renderer.called.load(Ordering::SeqCst));
  }

  #[tokio::test]
  async fn test_generate_wraps_converter_failure() {
    let renderer = Arc::new(RecordingRenderer {
      called: AtomicBool::new(false),
    });
    let generator = InvoiceGenerator::new(renderer, Arc::new(StubConverter { fail: true }));

    let err = generator
      .generate(&input("en", "template1"), &receiver())
      .await
      .unwrap_err();

    match err {
      InvoiceError::Generation(msg) => {
        assert!(msg.contains("Failed to generate PDF"));
        assert!(msg.contains("converter exited with 1"));
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_generate_returns_pdf_bytes() {
    let renderer = Arc::new(RecordingRenderer {
      called: AtomicBool::new(false),
    });
    let generator = InvoiceGenerator::new(renderer, Arc::new(StubConverter { fail: false }));

    let pdf = generator
      .generate(&input("ka", "template2"), &receiver())
      .await
      .unwrap();
    assert!(pdf.starts_with(b"%PDF"));
  }

  #[test]
  fn test_context_merges_totals_and_parties() {
    let generator = InvoiceGenerator::new(
      Arc::new(RecordingRenderer {
        called: AtomicBool::new(false),
      }),
      Arc::new(StubConverter { fail: false }),
    );

    let context = generator.prepare_context(&input("ka", "template1"), &receiver());

    assert_eq!(context["total_amount"], json!("168.00"));
    assert_eq!(context["vat_total"], json!("18.00"));
    assert_eq!(context["total_without_vat"], json!("150.00"));
    assert_eq!(context["payer_ka"], json!("შპს გადამხდელი"));
    assert_eq!(context["payer_phone"], json!(""));
    assert_eq!(context["receiver_id"], json!("01001234567"));
    assert_eq!(context["bank_code"], json!("BAGAGE22"));
    assert_eq!(context["currency"], json!("GEL"));
    assert_eq!(
      context["invoice_number"].as_str().unwrap().len(),
      14
    );
    assert_eq!(context["purposes"].as_array().unwrap().len(), 2);
  }
}
