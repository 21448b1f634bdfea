use crate::domain::{
    Conversation, FetchOrder, GetConversationRequest, GetUserConversationsRequest, HttpMethod,
    MemberState, UserConversations, VonageRequest,
};

use super::{encode_path_segment, encode_query, format_date};

impl VonageRequest for GetUserConversationsRequest {
    type Response = UserConversations;

    const METHOD: HttpMethod = HttpMethod::Get;

    fn resource_path(&self) -> String {
        format!(
            "/v1/users/{}/conversations",
            encode_path_segment(self.user_id())
        )
    }

    fn query_string(&self) -> String {
        encode_query(&user_conversations_query(self))
    }
}

fn user_conversations_query(request: &GetUserConversationsRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page_size", request.page_size().to_string()),
        (FetchOrder::FIELD, request.order().as_str().to_owned()),
        ("order_by", request.order_by().to_owned()),
    ];
    if let Some(start_date) = request.start_date() {
        params.push(("date_start", format_date(&start_date)));
    }
    if request.include_custom_data() {
        params.push(("include_custom_data", "true".to_owned()));
    }
    if let Some(state) = request.state() {
        params.push((MemberState::FIELD, state.as_str().to_owned()));
    }
    if let Some(cursor) = request.cursor() {
        params.push(("cursor", cursor.to_owned()));
    }
    params
}

impl VonageRequest for GetConversationRequest {
    type Response = Conversation;

    const METHOD: HttpMethod = HttpMethod::Get;

    fn resource_path(&self) -> String {
        format!(
            "/v1/conversations/{}",
            encode_path_segment(self.conversation_id())
        )
    }
}
