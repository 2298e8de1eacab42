use billwerk_api::{BillwerkApiError, Client, Request, Settings};
use tracing_subscriber::EnvFilter;

/// Refunds part of a settled invoice.
///
/// Reads the API key from `billwerk.toml` or `BILLWERK__API_KEY`; run with
/// `RUST_LOG=billwerk_api=debug` to see each request.
#[tokio::main]
pub async fn main() -> Result<(), BillwerkApiError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_settings(Settings::new()?)?;

    let invoice = client.send(Request::invoices().get("inv-1001")).await?;
    tracing::info!(invoice = %invoice.handle, state = ?invoice.state, "fetched invoice");

    let req = Request::refunds()
        .create(invoice.handle)
        .amount(invoice.amount / 2)
        .text("Partial refund");

    match client.send(req).await {
        Ok(refund) => tracing::info!(refund = %refund.id, state = ?refund.state, "refund created"),
        Err(err @ BillwerkApiError::Api { .. }) => {
            tracing::error!(code = err.code(), "refund rejected: {err}");
            return Err(err);
        }
        Err(err) => return Err(err),
    }
    Ok(())
}
