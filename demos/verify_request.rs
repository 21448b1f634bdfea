use std::io;

use tracing_subscriber::EnvFilter;
use vonage::{
    Credentials, VerifyCheckRequest, VerifyRequest, VerifyWorkflow, VonageClient, VonageError,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("VONAGE_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VONAGE_API_KEY environment variable is required",
        )
    })?;
    let api_secret = std::env::var("VONAGE_API_SECRET").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VONAGE_API_SECRET environment variable is required",
        )
    })?;
    let client = VonageClient::new(Credentials::api_key_secret(api_key, api_secret)?);

    // With a request id and code at hand, check the code instead of starting over.
    if let (Ok(request_id), Ok(code)) = (
        std::env::var("VONAGE_REQUEST_ID"),
        std::env::var("VONAGE_CODE"),
    ) {
        let request = VerifyCheckRequest::build()
            .with_request_id(request_id)
            .with_code(code)
            .create()?;
        match client.send(&request).await {
            Ok(response) => println!("status: {}, price: {:?}", response.status, response.price),
            Err(VonageError::Verify { status, error_text }) => {
                println!("check failed: status {status}, error_text: {error_text:?}");
            }
            Err(err) => return Err(err.into()),
        }
        return Ok(());
    }

    let number = std::env::var("VONAGE_NUMBER").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VONAGE_NUMBER environment variable is required",
        )
    })?;
    let brand = std::env::var("VONAGE_BRAND").unwrap_or_else(|_| "Vonage demo".to_owned());

    let request = VerifyRequest::build()
        .with_number(number)
        .with_brand(brand)
        .with_workflow(VerifyWorkflow::SmsTts)
        .with_code_length(6)
        .create()?;

    let response = client.send(&request).await?;
    println!(
        "request_id: {}, status: {}",
        response.request_id, response.status
    );

    Ok(())
}
