use std::marker::PhantomData;

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::evaluation::InputEvaluation;
use crate::domain::request::stage::{ForOptional, ForUserId};
use crate::domain::validation::{
    ValidationError, verify_higher_or_equal_than, verify_lower_or_equal_than, verify_not_empty,
};
use crate::domain::value::{FetchOrder, MemberState};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Lists the conversations a user is a member of (`GET /v1/users/{user_id}/conversations`).
pub struct GetUserConversationsRequest {
    user_id: String,
    page_size: u32,
    order: FetchOrder,
    order_by: String,
    start_date: Option<DateTime<Utc>>,
    include_custom_data: bool,
    state: Option<MemberState>,
    cursor: Option<String>,
}

impl GetUserConversationsRequest {
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
    pub const MIN_PAGE_SIZE: u32 = 1;
    pub const MAX_PAGE_SIZE: u32 = 100;
    pub const DEFAULT_ORDER_BY: &'static str = "created";

    /// Start building a request for the first page.
    pub fn build() -> GetUserConversationsRequestBuilder<ForUserId> {
        GetUserConversationsRequestBuilder::new(None)
    }

    /// Start building a request continuing from a pagination cursor.
    pub fn build_with_cursor(
        cursor: impl Into<String>,
    ) -> GetUserConversationsRequestBuilder<ForUserId> {
        GetUserConversationsRequestBuilder::new(Some(cursor.into()))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn order(&self) -> FetchOrder {
        self.order
    }

    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    pub fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    pub fn include_custom_data(&self) -> bool {
        self.include_custom_data
    }

    pub fn state(&self) -> Option<MemberState> {
        self.state
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn verify_user_id(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.user_id, "UserId")
    }

    fn verify_minimum_page_size(&self) -> Result<(), ValidationError> {
        verify_higher_or_equal_than(self, self.page_size, Self::MIN_PAGE_SIZE, "PageSize")
    }

    fn verify_maximum_page_size(&self) -> Result<(), ValidationError> {
        verify_lower_or_equal_than(self, self.page_size, Self::MAX_PAGE_SIZE, "PageSize")
    }
}

#[derive(Debug, Clone)]
/// Staged builder for [`GetUserConversationsRequest`].
///
/// ```rust
/// use vonage::{FetchOrder, GetUserConversationsRequest, VonageRequest};
///
/// let request = GetUserConversationsRequest::build()
///     .with_user_id("US-123")
///     .with_order(FetchOrder::Descending)
///     .create()?;
/// assert_eq!(
///     request.endpoint_path(),
///     "/v1/users/US-123/conversations?page_size=10&order=desc&order_by=created"
/// );
/// # Ok::<(), vonage::ValidationError>(())
/// ```
pub struct GetUserConversationsRequestBuilder<S> {
    user_id: String,
    page_size: u32,
    order: FetchOrder,
    order_by: Option<String>,
    start_date: Option<DateTime<Utc>>,
    include_custom_data: bool,
    state: Option<MemberState>,
    cursor: Option<String>,
    stage: PhantomData<S>,
}

impl GetUserConversationsRequestBuilder<ForUserId> {
    fn new(cursor: Option<String>) -> Self {
        Self {
            user_id: String::new(),
            page_size: GetUserConversationsRequest::DEFAULT_PAGE_SIZE,
            order: FetchOrder::default(),
            order_by: None,
            start_date: None,
            include_custom_data: false,
            state: None,
            cursor,
            stage: PhantomData,
        }
    }

    pub fn with_user_id(
        self,
        value: impl Into<String>,
    ) -> GetUserConversationsRequestBuilder<ForOptional> {
        GetUserConversationsRequestBuilder {
            user_id: value.into(),
            page_size: self.page_size,
            order: self.order,
            order_by: self.order_by,
            start_date: self.start_date,
            include_custom_data: self.include_custom_data,
            state: self.state,
            cursor: self.cursor,
            stage: PhantomData,
        }
    }
}

impl GetUserConversationsRequestBuilder<ForOptional> {
    pub fn with_page_size(self, value: u32) -> Self {
        Self {
            page_size: value,
            ..self
        }
    }

    pub fn with_order(self, value: FetchOrder) -> Self {
        Self {
            order: value,
            ..self
        }
    }

    pub fn with_order_by(self, value: impl Into<String>) -> Self {
        Self {
            order_by: Some(value.into()),
            ..self
        }
    }

    /// Only list conversations created at or after `value`.
    pub fn with_start_date<Tz: TimeZone>(self, value: DateTime<Tz>) -> Self {
        Self {
            start_date: Some(value.with_timezone(&Utc)),
            ..self
        }
    }

    pub fn include_custom_data(self) -> Self {
        Self {
            include_custom_data: true,
            ..self
        }
    }

    pub fn with_state(self, value: MemberState) -> Self {
        Self {
            state: Some(value),
            ..self
        }
    }

    /// Validate the accumulated values.
    ///
    /// Rules run in order: `UserId`, minimum `PageSize`, maximum `PageSize`.
    pub fn create(self) -> Result<GetUserConversationsRequest, ValidationError> {
        let candidate = GetUserConversationsRequest {
            user_id: self.user_id,
            page_size: self.page_size,
            order: self.order,
            order_by: self
                .order_by
                .unwrap_or_else(|| GetUserConversationsRequest::DEFAULT_ORDER_BY.to_owned()),
            start_date: self.start_date,
            include_custom_data: self.include_custom_data,
            state: self.state,
            cursor: self.cursor,
        };
        InputEvaluation::evaluate(candidate).with_rules(&[
            GetUserConversationsRequest::verify_user_id,
            GetUserConversationsRequest::verify_minimum_page_size,
            GetUserConversationsRequest::verify_maximum_page_size,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Fetches a single conversation (`GET /v1/conversations/{conversation_id}`).
pub struct GetConversationRequest {
    conversation_id: String,
}

impl GetConversationRequest {
    pub fn parse(conversation_id: impl Into<String>) -> Result<Self, ValidationError> {
        InputEvaluation::evaluate(Self {
            conversation_id: conversation_id.into(),
        })
        .with_rules(&[Self::verify_conversation_id])
    }

    pub fn conversation_id(&self) -> &str {
        &self.conversation_id
    }

    fn verify_conversation_id(&self) -> Result<(), ValidationError> {
        verify_not_empty(self, &self.conversation_id, "ConversationId")
    }
}
