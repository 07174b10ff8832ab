use std::sync::Arc;
use tera::Tera;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::TemplateRenderer;

/// Tera-backed renderer for the invoice templates shipped under `templates/`
#[derive(Clone)]
pub struct TeraInvoiceRenderer {
  tera: Arc<Tera>,
}

impl TeraInvoiceRenderer {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::new("templates/**/*.html.tera")?;
    tera.autoescape_on(vec![".html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Builds a renderer from template name/content pairs; used by tests
  pub fn from_templates(templates: Vec<(&str, &str)>) -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(templates)?;

    Ok(Self {
      tera: Arc::new(tera),
    })
  }
}

impl TemplateRenderer for TeraInvoiceRenderer {
  fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, InvoiceError> {
    let context = tera::Context::from_value(context.clone())
      .map_err(|e| InvoiceError::Generation(format!("invalid template context: {}", e)))?;

    self.tera.render(template, &context).map_err(|e| {
      if matches!(e.kind, tera::ErrorKind::TemplateNotFound(_)) {
        InvoiceError::Generation(format!("Template not found: {}", template))
      } else {
        InvoiceError::Generation(format!("Template rendering failed: {}", e))
      }
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_render_with_context() {
    let renderer = TeraInvoiceRenderer::from_templates(vec![(
      "invoice_template_1_en.html.tera",
      "<p>Invoice {{ invoice_number }} for {{ payer_en }}</p>",
    )])
    .unwrap();

    let html = renderer
      .render(
        "invoice_template_1_en.html.tera",
        &json!({"invoice_number": "20240503040506", "payer_en": "Payer LLC"}),
      )
      .unwrap();

    assert!(html.contains("20240503040506"));
    assert!(html.contains("Payer LLC"));
  }

  #[test]
  fn test_missing_template_is_generation_error() {
    let renderer = TeraInvoiceRenderer::from_templates(vec![]).unwrap();

    let err = renderer
      .render("invoice_template_1_en.html.tera", &json!({}))
      .unwrap_err();

    match err {
      InvoiceError::Generation(msg) => assert!(msg.contains("Template not found")),
      other => panic!("unexpected error: {other:?}"),
    }
  }
}
