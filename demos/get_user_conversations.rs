use std::io;

use tracing_subscriber::EnvFilter;
use vonage::{Credentials, FetchOrder, GetUserConversationsRequest, MemberState, VonageClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let token = std::env::var("VONAGE_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VONAGE_TOKEN environment variable is required (application JWT)",
        )
    })?;
    let user_id = std::env::var("VONAGE_USER_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VONAGE_USER_ID environment variable is required",
        )
    })?;

    let client = VonageClient::new(Credentials::bearer_token(token)?);
    let builder = match std::env::var("VONAGE_CURSOR") {
        Ok(cursor) => GetUserConversationsRequest::build_with_cursor(cursor),
        Err(_) => GetUserConversationsRequest::build(),
    };
    let request = builder
        .with_user_id(user_id)
        .with_page_size(20)
        .with_order(FetchOrder::Descending)
        .with_state(MemberState::Joined)
        .create()?;

    let page = client.send(&request).await?;
    for conversation in page.conversations() {
        println!(
            "id: {}, name: {:?}, state: {:?}",
            conversation.id, conversation.name, conversation.state
        );
    }
    println!("next cursor: {:?}", page.next_cursor());

    Ok(())
}
