use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::PdfConverter;

/// HTML-to-PDF converter shelling out to wkhtmltopdf.
///
/// Markup is piped through stdin and the PDF is read back from stdout, so no
/// intermediate files touch the disk. Conversion is synchronous from the
/// caller's perspective: the child process is awaited to completion.
pub struct WkHtmlToPdfConverter {
  wkhtmltopdf_path: String,
}

impl WkHtmlToPdfConverter {
  pub fn new(wkhtmltopdf_path: Option<String>) -> Self {
    Self {
      wkhtmltopdf_path: wkhtmltopdf_path.unwrap_or_else(|| "wkhtmltopdf".to_string()),
    }
  }

  /// Checks the binary is present and runnable; called once at startup
  pub async fn verify_installed(&self) -> Result<(), InvoiceError> {
    let output = Command::new(&self.wkhtmltopdf_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        InvoiceError::Generation(format!(
          "wkhtmltopdf not found: {}. Please install wkhtmltopdf.",
          e
        ))
      })?;

    if !output.status.success() {
      return Err(InvoiceError::Generation(
        "wkhtmltopdf is not working correctly".to_string(),
      ));
    }

    Ok(())
  }
}

#[async_trait]
impl PdfConverter for WkHtmlToPdfConverter {
  async fn convert(&self, html: &str) -> Result<Vec<u8>, InvoiceError> {
    let mut child = Command::new(&self.wkhtmltopdf_path)
      .args([
        "--page-size",
        "A4",
        "--margin-top",
        "10mm",
        "--margin-bottom",
        "10mm",
        "--margin-left",
        "10mm",
        "--margin-right",
        "10mm",
        "--encoding",
        "utf-8",
        "--quiet",
        "-", // read HTML from stdin
        "-", // write PDF to stdout
      ])
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .spawn()
      .map_err(|e| {
        InvoiceError::Generation(format!("wkhtmltopdf execution failed: {}", e))
      })?;

    let mut stdin = child
      .stdin
      .take()
      .ok_or_else(|| InvoiceError::Generation("failed to open wkhtmltopdf stdin".to_string()))?;

    stdin
      .write_all(html.as_bytes())
      .await
      .map_err(|e| InvoiceError::Generation(format!("failed to write markup: {}", e)))?;
    drop(stdin);

    let output = child
      .wait_with_output()
      .await
      .map_err(|e| InvoiceError::Generation(format!("wkhtmltopdf did not finish: {}", e)))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(InvoiceError::Generation(format!(
        "wkhtmltopdf failed: {}",
        stderr
      )));
    }

    if output.stdout.is_empty() {
      return Err(InvoiceError::Generation(
        "wkhtmltopdf produced no output".to_string(),
      ));
    }

    Ok(output.stdout)
  }
}
